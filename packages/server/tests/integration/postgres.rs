use std::sync::Arc;

use ::common::{Actor, AuditEntry, CertificationStatus, StatusUpdate, Trigger};
use chrono::Utc;

use server::audit::{AuditSink, DbAuditSink};
use server::periods::{AcademicPeriodResolver, DbPeriodResolver};
use server::store::{DbSubmissionStore, StoreError, SubmissionStore};
use server::workflow::{SubmissionFilter, WorkflowEngine, WorkflowError};

use crate::common::{CURRENT_PERIOD, PREVIOUS_PERIOD, fresh_database, periods, sample_submission};

fn verify_update(actor: &str) -> StatusUpdate {
    StatusUpdate {
        status: CertificationStatus::Verified,
        rejection_reason: None,
        consultation_reason: None,
        advised_for_consultation_at: None,
        reviewed_at: Some(Utc::now()),
        certificate_issued_at: None,
        reviewed_by: actor.to_string(),
    }
}

mod store {
    use super::*;

    #[tokio::test]
    async fn racing_writers_at_same_version_yield_one_conflict() {
        let db = fresh_database().await;
        let store = DbSubmissionStore::new(db);
        store
            .insert(sample_submission("S1", CURRENT_PERIOD, "Ana Cruz", "2021-00001", 0))
            .await
            .unwrap();

        let first = verify_update("staff_A");
        let second = verify_update("staff_B");
        let (a, b) = tokio::join!(
            store.compare_and_set("S1", 0, &first),
            store.compare_and_set("S1", 0, &second),
        );

        let results = [a, b];
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert_eq!(
            results
                .iter()
                .filter(|r| matches!(r, Err(StoreError::VersionConflict { expected: 0, .. })))
                .count(),
            1
        );

        let stored = store.get("S1").await.unwrap().unwrap();
        assert_eq!(stored.version, 1);
        assert_eq!(stored.status, CertificationStatus::Verified);
        assert!(stored.reviewed_by.is_some());
    }

    #[tokio::test]
    async fn compare_and_set_on_missing_row_is_not_found() {
        let store = DbSubmissionStore::new(fresh_database().await);

        let err = store
            .compare_and_set("S404", 0, &verify_update("staff_A"))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::NotFound(id) if id == "S404"));
    }

    #[tokio::test]
    async fn duplicate_insert_is_rejected() {
        let store = DbSubmissionStore::new(fresh_database().await);
        let submission = sample_submission("S1", CURRENT_PERIOD, "Ana Cruz", "2021-00001", 0);
        store.insert(submission.clone()).await.unwrap();

        let err = store.insert(submission).await.unwrap_err();

        assert!(matches!(err, StoreError::AlreadyExists(id) if id == "S1"));
    }

    #[tokio::test]
    async fn query_pushes_down_status_and_period() {
        let store = DbSubmissionStore::new(fresh_database().await);
        store
            .insert(sample_submission("S1", CURRENT_PERIOD, "Ana Cruz", "2021-00001", 0))
            .await
            .unwrap();
        store
            .insert(sample_submission("S2", CURRENT_PERIOD, "Bo Reyes", "2021-00002", 1))
            .await
            .unwrap();
        store
            .insert(sample_submission("S9", PREVIOUS_PERIOD, "Eve Reyes", "2020-00009", 2))
            .await
            .unwrap();
        store
            .compare_and_set("S2", 0, &verify_update("staff_A"))
            .await
            .unwrap();

        let found = store
            .query(
                &SubmissionFilter::new()
                    .with_status(CertificationStatus::Pending)
                    .with_period(CURRENT_PERIOD),
            )
            .await
            .unwrap();

        let ids: Vec<&str> = found.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["S1"]);
        assert_eq!(found[0].completion_percent(), 33);
    }
}

mod audit {
    use super::*;

    #[tokio::test]
    async fn records_and_reads_back_in_order() {
        let sink = DbAuditSink::new(fresh_database().await);
        let first = AuditEntry {
            submission_id: "S1".into(),
            from_state: CertificationStatus::Pending,
            to_state: CertificationStatus::ForConsultation,
            trigger: Trigger::AdviseConsultation,
            actor: "staff_A".into(),
            actor_role: Some("nurse".into()),
            reason: Some("possible TB".into()),
            recorded_at: Utc::now(),
        };
        let second = AuditEntry {
            from_state: CertificationStatus::ForConsultation,
            to_state: CertificationStatus::Pending,
            trigger: Trigger::CancelAdvice,
            actor_role: None,
            reason: None,
            recorded_at: first.recorded_at + chrono::Duration::seconds(1),
            ..first.clone()
        };

        sink.record(&first).await.unwrap();
        sink.record(&second).await.unwrap();

        let history = sink.history("S1").await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].trigger, Trigger::AdviseConsultation);
        assert_eq!(history[0].reason.as_deref(), Some("possible TB"));
        assert_eq!(history[0].actor_role.as_deref(), Some("nurse"));
        assert_eq!(history[1].to_state, CertificationStatus::Pending);
        assert!(sink.history("S2").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn engine_over_postgres_audits_each_transition() {
        let db = fresh_database().await;
        let store = Arc::new(DbSubmissionStore::new(db.clone()));
        store
            .insert(sample_submission("S1", CURRENT_PERIOD, "Ana Cruz", "2021-00001", 0))
            .await
            .unwrap();
        let engine = WorkflowEngine::new(store, Arc::new(DbAuditSink::new(db)));
        let actor = Actor::new("staff_A").with_role("physician");

        let (verify, reject) = tokio::join!(
            engine.apply_transition("S1", Trigger::Verify, &actor, None),
            engine.apply_transition("S1", Trigger::Reject, &actor, Some("blurry xray")),
        );
        assert!(verify.is_ok() ^ reject.is_ok());
        assert!(matches!(
            verify.err().or(reject.err()),
            Some(WorkflowError::InvalidTransition { .. })
        ));

        let trail = engine.history("S1").await.unwrap();
        assert_eq!(trail.len(), 1);
        assert_eq!(trail[0].actor, "staff_A");
        assert_eq!(trail[0].actor_role.as_deref(), Some("physician"));
    }
}

mod academic_periods {
    use super::*;

    #[tokio::test]
    async fn seeded_periods_flag_the_current_one() {
        let db = fresh_database().await;
        server::seed::seed_periods(&db, &periods(), Some(PREVIOUS_PERIOD))
            .await
            .unwrap();
        // Re-seeding moves the flag without duplicating rows.
        server::seed::seed_periods(&db, &periods(), Some(CURRENT_PERIOD))
            .await
            .unwrap();

        let resolver = DbPeriodResolver::new(db);

        assert_eq!(resolver.current().await.unwrap().id, CURRENT_PERIOD);
        let ids: Vec<String> = resolver
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![PREVIOUS_PERIOD, CURRENT_PERIOD]);
    }
}
