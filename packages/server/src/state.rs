use std::sync::Arc;

use anyhow::Context;
use common::Submission;
use sea_orm::DatabaseConnection;
use tracing::info;

use crate::audit::{AuditSink, DbAuditSink, LogAuditSink, MemoryAuditSink};
use crate::config::{AppConfig, AuditSinkKind, PeriodSource, StoreBackend};
use crate::periods::{AcademicPeriodResolver, DbPeriodResolver, StaticPeriodResolver};
use crate::store::{DbSubmissionStore, MemorySubmissionStore, SubmissionStore};
use crate::workflow::WorkflowEngine;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<WorkflowEngine>,
    pub periods: Arc<dyn AcademicPeriodResolver>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(
        engine: WorkflowEngine,
        periods: Arc<dyn AcademicPeriodResolver>,
        config: AppConfig,
    ) -> Self {
        Self {
            engine: Arc::new(engine),
            periods,
            config: Arc::new(config),
        }
    }

    /// Wire adapters as configured. `db` must be present when
    /// [`AppConfig::needs_database`] is true.
    pub async fn from_config(
        config: AppConfig,
        db: Option<DatabaseConnection>,
    ) -> anyhow::Result<Self> {
        let require_db = || db.clone().context("database.url is required by this configuration");

        let store: Arc<dyn SubmissionStore> = match config.store.backend {
            StoreBackend::Memory => {
                let store = MemorySubmissionStore::new();
                if let Some(ref path) = config.store.seed_file {
                    let count = load_seed(&store, path).await?;
                    info!(path = %path, count, "Loaded seed submissions");
                }
                Arc::new(store)
            }
            StoreBackend::Postgres => Arc::new(DbSubmissionStore::new(require_db()?)),
        };

        let audit: Arc<dyn AuditSink> = match config.audit.sink {
            AuditSinkKind::Log => Arc::new(LogAuditSink),
            AuditSinkKind::Memory => Arc::new(MemoryAuditSink::new()),
            AuditSinkKind::Database => Arc::new(DbAuditSink::new(require_db()?)),
        };

        let periods: Arc<dyn AcademicPeriodResolver> = match config.periods.source {
            PeriodSource::Static => Arc::new(StaticPeriodResolver::new(
                config.periods.list.clone(),
                config.periods.current.as_deref(),
            )),
            PeriodSource::Database => Arc::new(DbPeriodResolver::new(require_db()?)),
        };

        let engine = WorkflowEngine::new(store, audit)
            .with_bulk_concurrency(config.listing.bulk_concurrency);

        Ok(Self::new(engine, periods, config))
    }
}

async fn load_seed(store: &MemorySubmissionStore, path: &str) -> anyhow::Result<usize> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading seed file {path}"))?;
    let submissions: Vec<Submission> =
        serde_json::from_str(&raw).with_context(|| format!("parsing seed file {path}"))?;

    let count = submissions.len();
    for submission in submissions {
        store.insert(submission).await?;
    }
    Ok(count)
}
