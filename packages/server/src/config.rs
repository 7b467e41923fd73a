use common::AcademicPeriod;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    /// Allowed origins. Empty means any origin.
    #[serde(default)]
    pub allow_origins: Vec<String>,
    #[serde(default = "default_cors_max_age")]
    pub max_age: u64,
}

fn default_cors_max_age() -> u64 {
    3600
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_origins: Vec::new(),
            max_age: default_cors_max_age(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub cors: CorsConfig,
}

fn default_host() -> String {
    "127.0.0.1".into()
}
fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors: CorsConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DatabaseConfig {
    /// Required when any backend below is `postgres`/`database`.
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Memory,
    Postgres,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    /// JSON array of submissions loaded into the memory backend at startup.
    #[serde(default)]
    pub seed_file: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AuditSinkKind {
    #[default]
    Log,
    Memory,
    Database,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AuditConfig {
    #[serde(default)]
    pub sink: AuditSinkKind,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PeriodSource {
    #[default]
    Static,
    Database,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct PeriodsConfig {
    #[serde(default)]
    pub source: PeriodSource,
    /// Static period list, oldest first.
    #[serde(default)]
    pub list: Vec<AcademicPeriod>,
    /// Id of the current period. Defaults to the last entry of `list`.
    #[serde(default)]
    pub current: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ListingConfig {
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,
    /// Upper bound on ids in one bulk command.
    #[serde(default = "default_bulk_max")]
    pub bulk_max: usize,
    /// Transitions a bulk command or referral clear runs at once. Keep it
    /// below the database pool size.
    #[serde(default = "default_bulk_concurrency")]
    pub bulk_concurrency: usize,
}

fn default_page_size() -> u64 {
    20
}
fn default_max_page_size() -> u64 {
    100
}
fn default_bulk_max() -> usize {
    100
}
fn default_bulk_concurrency() -> usize {
    crate::workflow::DEFAULT_BULK_CONCURRENCY
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            bulk_max: default_bulk_max(),
            bulk_concurrency: default_bulk_concurrency(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub audit: AuditConfig,
    #[serde(default)]
    pub periods: PeriodsConfig,
    #[serde(default)]
    pub listing: ListingConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("MEDCERT_CONFIG").unwrap_or_else(|_| "config/config".to_string());

        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("store.backend", "memory")?
            .set_default("audit.sink", "log")?
            .set_default("periods.source", "static")?
            // Load from config/config.toml
            .add_source(File::with_name(&config_path).required(false))
            // Override from environment (e.g., MEDCERT__DATABASE__URL)
            .add_source(Environment::with_prefix("MEDCERT").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    /// Whether any component needs a database connection.
    pub fn needs_database(&self) -> bool {
        self.store.backend == StoreBackend::Postgres
            || self.audit.sink == AuditSinkKind::Database
            || self.periods.source == PeriodSource::Database
    }
}
