use crate::common::{CURRENT_PERIOD, PREVIOUS_PERIOD, TestApp, routes};
use serde_json::json;

/// Four current-period submissions and one from last term.
async fn seeded_app() -> TestApp {
    let app = TestApp::spawn().await;
    app.seed("S1", CURRENT_PERIOD, "Ana Cruz", "2021-00001", 1).await;
    app.seed("S2", CURRENT_PERIOD, "Bo Reyes", "2021-00002", 4).await;
    app.seed("S3", CURRENT_PERIOD, "Cara Lim", "2022-00003", 4).await;
    app.seed("S4", CURRENT_PERIOD, "Dan Santos", "2022-00004", 2).await;
    app.seed("S9", PREVIOUS_PERIOD, "Eve Reyes", "2020-00009", 9).await;
    app
}

mod listing {
    use super::*;

    #[tokio::test]
    async fn defaults_to_current_period_in_recency_order() {
        let app = seeded_app().await;

        let res = app.get(routes::SUBMISSIONS).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["period"], CURRENT_PERIOD);
        // S2 and S3 share an upload time; id breaks the tie.
        assert_eq!(res.ids(), vec!["S2", "S3", "S4", "S1"]);
        assert_eq!(res.body["pagination"]["total"], 4);
    }

    #[tokio::test]
    async fn period_all_lifts_the_scope() {
        let app = seeded_app().await;

        let res = app.get(&format!("{}?period=all", routes::SUBMISSIONS)).await;

        assert_eq!(res.status, 200);
        assert!(res.body["period"].is_null());
        assert_eq!(res.ids(), vec!["S9", "S2", "S3", "S4", "S1"]);
    }

    #[tokio::test]
    async fn explicit_period_is_honoured() {
        let app = seeded_app().await;

        let res = app
            .get(&format!("{}?period={PREVIOUS_PERIOD}", routes::SUBMISSIONS))
            .await;

        assert_eq!(res.ids(), vec!["S9"]);
    }

    #[tokio::test]
    async fn text_search_matches_name_or_student_number() {
        let app = seeded_app().await;

        let by_name = app
            .get(&format!("{}?period=all&q=REYES", routes::SUBMISSIONS))
            .await;
        assert_eq!(by_name.ids(), vec!["S9", "S2"]);

        let by_number = app
            .get(&format!("{}?q=2022-", routes::SUBMISSIONS))
            .await;
        assert_eq!(by_number.ids(), vec!["S3", "S4"]);
    }

    #[tokio::test]
    async fn status_filter_combines_with_text() {
        let app = seeded_app().await;
        app.transition("S2", "reject", Some("missing xray"), "staff_A")
            .await;

        let res = app
            .get(&format!("{}?status=rejected&q=reyes", routes::SUBMISSIONS))
            .await;

        assert_eq!(res.ids(), vec!["S2"]);
        assert_eq!(res.body["data"][0]["rejection_reason"], "missing xray");
    }

    #[tokio::test]
    async fn date_range_is_inclusive() {
        let app = seeded_app().await;

        let res = app
            .get(&format!(
                "{}?from=2025-08-01T10:00:00Z&to=2025-08-01T12:00:00Z",
                routes::SUBMISSIONS
            ))
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.ids(), vec!["S2", "S3", "S4"]);
    }

    #[tokio::test]
    async fn inverted_date_range_is_rejected() {
        let app = seeded_app().await;

        let res = app
            .get(&format!(
                "{}?from=2025-09-01T00:00:00Z&to=2025-08-01T00:00:00Z",
                routes::SUBMISSIONS
            ))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.code(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn unknown_status_is_rejected() {
        let app = seeded_app().await;

        let res = app
            .get(&format!("{}?status=approved", routes::SUBMISSIONS))
            .await;

        assert_eq!(res.status, 400);
    }

    #[tokio::test]
    async fn pages_slice_the_ordered_listing() {
        let app = seeded_app().await;

        let first = app
            .get(&format!("{}?page=1&per_page=3", routes::SUBMISSIONS))
            .await;
        assert_eq!(first.ids(), vec!["S2", "S3", "S4"]);
        assert_eq!(first.body["pagination"]["total_pages"], 2);

        let second = app
            .get(&format!("{}?page=2&per_page=3", routes::SUBMISSIONS))
            .await;
        assert_eq!(second.ids(), vec!["S1"]);
    }

    #[tokio::test]
    async fn per_page_is_clamped() {
        let app = seeded_app().await;

        let res = app
            .get(&format!("{}?per_page=1000", routes::SUBMISSIONS))
            .await;

        assert_eq!(res.body["pagination"]["per_page"], 100);
    }
}

mod detail {
    use super::*;

    #[tokio::test]
    async fn shows_completion_and_available_actions() {
        let app = seeded_app().await;

        let res = app.get(&routes::submission("S1")).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["status"], "pending");
        assert_eq!(res.body["completion_percent"], 33);
        assert_eq!(res.body["documents"]["cbc"], "uploads/S1/cbc.pdf");
        assert!(res.body["documents"]["hepa_b"].is_null());
        assert_eq!(res.body["missing_documents"].as_array().unwrap().len(), 4);
        assert_eq!(
            res.body["available_actions"],
            json!(["verify", "reject", "advise_consultation"])
        );
        assert_eq!(res.body["version"], 0);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let app = seeded_app().await;

        let res = app.get(&routes::submission("nope")).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.code(), "NOT_FOUND");
    }
}

mod counts {
    use super::*;

    #[tokio::test]
    async fn every_status_is_reported() {
        let app = seeded_app().await;
        app.transition("S1", "verify", None, "staff_A").await;
        app.transition("S2", "advise_consultation", Some("possible TB"), "staff_A")
            .await;

        let res = app.get(routes::COUNTS).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["total"], 4);
        assert_eq!(
            res.body["counts"],
            json!([
                {"status": "pending", "count": 2},
                {"status": "for_consultation", "count": 1},
                {"status": "verified", "count": 1},
                {"status": "rejected", "count": 0},
                {"status": "issued", "count": 0},
            ])
        );

        let all = app.get(&format!("{}?period=all", routes::COUNTS)).await;
        assert_eq!(all.body["total"], 5);
    }
}

mod triggers {
    use super::*;

    #[tokio::test]
    async fn catalogue_lists_reason_requirements() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::TRIGGERS).await;

        assert_eq!(res.status, 200);
        let reject = res
            .body
            .as_array()
            .unwrap()
            .iter()
            .find(|t| t["trigger"] == "reject")
            .unwrap();
        assert_eq!(reject["requires_reason"], true);
        assert_eq!(reject["from"], json!(["pending", "for_consultation"]));
    }
}
