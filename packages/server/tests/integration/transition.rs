use crate::common::{CURRENT_PERIOD, PREVIOUS_PERIOD, TestApp, routes};
use serde_json::json;

mod single {
    use super::*;

    #[tokio::test]
    async fn referral_then_verify_clears_consultation() {
        let app = TestApp::spawn().await;
        app.seed("S1", CURRENT_PERIOD, "Ana Cruz", "2021-00001", 0).await;

        let referred = app
            .transition("S1", "advise_consultation", Some("possible TB"), "staff_A")
            .await;
        assert_eq!(referred.status, 200, "{}", referred.text);
        assert_eq!(referred.body["status"], "for_consultation");
        assert_eq!(referred.body["consultation_reason"], "possible TB");
        assert!(referred.body["advised_for_consultation_at"].is_string());
        assert_eq!(
            referred.body["available_actions"],
            json!(["verify", "reject", "cancel_advice"])
        );

        let verified = app.transition("S1", "verify", None, "staff_B").await;
        assert_eq!(verified.status, 200);
        assert_eq!(verified.body["status"], "verified");
        assert!(verified.body["consultation_reason"].is_null());
        assert_eq!(verified.body["reviewed_by"], "staff_B");
        assert_eq!(verified.body["version"], 2);
    }

    #[tokio::test]
    async fn issue_on_pending_is_invalid_transition() {
        let app = TestApp::spawn().await;
        app.seed("S2", CURRENT_PERIOD, "Bo Reyes", "2021-00002", 0).await;

        let res = app.transition("S2", "issue_certificate", None, "staff_A").await;

        assert_eq!(res.status, 409);
        assert_eq!(res.code(), "INVALID_TRANSITION");
    }

    #[tokio::test]
    async fn repeating_issue_is_invalid_transition() {
        let app = TestApp::spawn().await;
        app.seed("S1", CURRENT_PERIOD, "Ana Cruz", "2021-00001", 0).await;
        app.transition("S1", "verify", None, "staff_A").await;

        let issued = app.transition("S1", "issue_certificate", None, "staff_A").await;
        assert_eq!(issued.status, 200);
        assert!(issued.body["certificate_issued_at"].is_string());
        assert_eq!(issued.body["available_actions"], json!([]));

        let again = app.transition("S1", "issue_certificate", None, "staff_A").await;
        assert_eq!(again.status, 409);
        assert_eq!(again.code(), "INVALID_TRANSITION");
    }

    #[tokio::test]
    async fn blank_reason_is_missing_reason() {
        let app = TestApp::spawn().await;
        app.seed("S1", CURRENT_PERIOD, "Ana Cruz", "2021-00001", 0).await;

        let res = app.transition("S1", "reject", Some("   "), "staff_A").await;

        assert_eq!(res.status, 400);
        assert_eq!(res.code(), "MISSING_REASON");
        assert_eq!(res.body["message"], "A reason is required to reject");

        let unchanged = app.get(&routes::submission("S1")).await;
        assert_eq!(unchanged.body["status"], "pending");
    }

    #[tokio::test]
    async fn missing_actor_is_unauthorized() {
        let app = TestApp::spawn().await;
        app.seed("S1", CURRENT_PERIOD, "Ana Cruz", "2021-00001", 0).await;

        let res = app
            .post_without_actor(&routes::transitions("S1"), &json!({"trigger": "verify"}))
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.code(), "ACTOR_MISSING");
    }

    #[tokio::test]
    async fn unknown_trigger_is_validation_error() {
        let app = TestApp::spawn().await;
        app.seed("S1", CURRENT_PERIOD, "Ana Cruz", "2021-00001", 0).await;

        let res = app
            .post_as(&routes::transitions("S1"), &json!({"trigger": "approve"}), "staff_A")
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.code(), "VALIDATION_ERROR");

        let malformed = app
            .post_raw_as(&routes::transitions("S1"), "{\"trigger\":", "staff_A")
            .await;
        assert_eq!(malformed.status, 400);
        assert_eq!(malformed.code(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn unknown_submission_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.transition("nope", "verify", None, "staff_A").await;

        assert_eq!(res.status, 404);
        assert_eq!(res.code(), "NOT_FOUND");
    }

    #[tokio::test]
    async fn conflicting_requests_never_both_succeed() {
        let app = TestApp::spawn().await;
        app.seed("S1", CURRENT_PERIOD, "Ana Cruz", "2021-00001", 0).await;

        let (verify, reject) = tokio::join!(
            app.transition("S1", "verify", None, "staff_A"),
            app.transition("S1", "reject", Some("blurry xray"), "staff_B"),
        );

        let statuses = [verify.status, reject.status];
        assert_eq!(statuses.iter().filter(|s| **s == 200).count(), 1);
        assert_eq!(statuses.iter().filter(|s| **s == 409).count(), 1);

        let stored = app.get(&routes::submission("S1")).await;
        assert_eq!(stored.body["version"], 1);
    }
}

mod history {
    use super::*;

    #[tokio::test]
    async fn records_each_applied_transition() {
        let app = TestApp::spawn().await;
        app.seed("S1", CURRENT_PERIOD, "Ana Cruz", "2021-00001", 0).await;
        app.transition("S1", "reject", Some("missing xray"), "staff_A")
            .await;
        app.transition("S1", "issue_certificate", None, "staff_A")
            .await;
        app.transition("S1", "advise_consultation", Some("recheck"), "staff_B")
            .await;

        let res = app.get(&routes::history("S1")).await;

        assert_eq!(res.status, 200);
        let entries = res.body.as_array().unwrap();
        assert_eq!(entries.len(), 2, "failed transitions are not audited");
        assert_eq!(entries[0]["from_state"], "pending");
        assert_eq!(entries[0]["to_state"], "rejected");
        assert_eq!(entries[0]["reason"], "missing xray");
        assert_eq!(entries[0]["actor_role"], "nurse");
        assert_eq!(entries[1]["trigger"], "advise_consultation");
        assert_eq!(entries[1]["actor"], "staff_B");
    }

    #[tokio::test]
    async fn unknown_submission_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::history("nope")).await;

        assert_eq!(res.status, 404);
    }
}

mod bulk {
    use super::*;

    #[tokio::test]
    async fn partial_failure_reports_failed_ids() {
        let app = TestApp::spawn().await;
        app.seed("S1", CURRENT_PERIOD, "Ana Cruz", "2021-00001", 0).await;
        app.seed("S2", CURRENT_PERIOD, "Bo Reyes", "2021-00002", 0).await;
        app.seed("S3", CURRENT_PERIOD, "Cara Lim", "2021-00003", 0).await;
        app.transition("S2", "verify", None, "staff_A").await;

        let res = app
            .post_as(
                routes::BULK_TRANSITIONS,
                &json!({"ids": ["S1", "S2", "S404", "S3"], "trigger": "reject", "reason": "incomplete"}),
                "staff_A",
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        let succeeded: Vec<&str> = res.body["succeeded"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["id"].as_str().unwrap())
            .collect();
        assert_eq!(succeeded, vec!["S1", "S3"]);
        assert_eq!(
            res.body["failed"],
            json!([
                {"id": "S2", "code": "INVALID_TRANSITION", "message": "Cannot reject a submission that is already verified"},
                {"id": "S404", "code": "NOT_FOUND", "message": "Submission 'S404' not found, please refresh"},
            ])
        );

        let s1 = app.get(&routes::submission("S1")).await;
        assert_eq!(s1.body["status"], "rejected");
    }

    #[tokio::test]
    async fn empty_and_duplicate_ids_are_rejected() {
        let app = TestApp::spawn().await;

        let empty = app
            .post_as(routes::BULK_TRANSITIONS, &json!({"ids": [], "trigger": "verify"}), "staff_A")
            .await;
        assert_eq!(empty.status, 400);
        assert_eq!(empty.code(), "VALIDATION_ERROR");

        let duplicate = app
            .post_as(
                routes::BULK_TRANSITIONS,
                &json!({"ids": ["S1", "S1"], "trigger": "verify"}),
                "staff_A",
            )
            .await;
        assert_eq!(duplicate.status, 400);
    }
}

mod referrals {
    use super::*;

    #[tokio::test]
    async fn cancel_after_verified_referral_returns_to_pending() {
        let app = TestApp::spawn().await;
        app.seed("S1", CURRENT_PERIOD, "Ana Cruz", "2021-00001", 0).await;
        app.transition("S1", "verify", None, "staff_A").await;
        app.transition("S1", "advise_consultation", Some("abnormal CBC"), "staff_A")
            .await;

        let res = app.transition("S1", "cancel_advice", None, "staff_A").await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["status"], "pending");
        assert!(res.body["consultation_reason"].is_null());
    }

    #[tokio::test]
    async fn clear_defaults_to_current_period() {
        let app = TestApp::spawn().await;
        app.seed("S1", CURRENT_PERIOD, "Ana Cruz", "2021-00001", 0).await;
        app.seed("S2", CURRENT_PERIOD, "Bo Reyes", "2021-00002", 0).await;
        app.seed("S9", PREVIOUS_PERIOD, "Eve Reyes", "2020-00009", 0).await;
        for id in ["S1", "S2", "S9"] {
            app.transition(id, "advise_consultation", Some("follow-up"), "staff_A")
                .await;
        }

        let res = app
            .post_as(routes::CLEAR_REFERRALS, &json!({}), "staff_A")
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["succeeded"].as_array().unwrap().len(), 2);
        assert_eq!(res.body["failed"], json!([]));

        let previous = app.get(&routes::submission("S9")).await;
        assert_eq!(previous.body["status"], "for_consultation");

        let rest = app
            .post_as(&format!("{}?period=all", routes::CLEAR_REFERRALS), &json!({}), "staff_A")
            .await;
        assert_eq!(rest.body["succeeded"][0]["id"], "S9");
    }

    #[tokio::test]
    async fn clear_requires_actor() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_actor(routes::CLEAR_REFERRALS, &json!({}))
            .await;

        assert_eq!(res.status, 401);
    }
}
