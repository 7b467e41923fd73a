use crate::common::{CURRENT_PERIOD, PREVIOUS_PERIOD, TestApp, routes};

#[tokio::test]
async fn lists_periods_with_current() {
    let app = TestApp::spawn().await;

    let res = app.get(routes::PERIODS).await;

    assert_eq!(res.status, 200);
    assert_eq!(res.body["current"], CURRENT_PERIOD);
    let ids: Vec<&str> = res.body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec![PREVIOUS_PERIOD, CURRENT_PERIOD]);
}

#[tokio::test]
async fn returns_current_period() {
    let app = TestApp::spawn().await;

    let res = app.get(routes::CURRENT_PERIOD).await;

    assert_eq!(res.status, 200);
    assert_eq!(res.body["id"], CURRENT_PERIOD);
    assert_eq!(res.body["name"], "First Semester 2025-2026");
}

#[tokio::test]
async fn serves_openapi_document() {
    let app = TestApp::spawn().await;

    let res = app.get("/api-docs/openapi.json").await;

    assert_eq!(res.status, 200);
    assert!(res.body["paths"]["/api/v1/submissions/{id}/transitions"].is_object());
}
