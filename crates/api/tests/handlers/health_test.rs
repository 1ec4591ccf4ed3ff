use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crate::test_utils::TestContext;

#[tokio::test]
async fn test_health_check() {
    let ctx = TestContext::new().await;

    let response = ctx.server.get("/health").await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({ "status": "ok", "service": "booking-test" })
    );
}

#[tokio::test]
async fn test_version_matches_package() {
    let ctx = TestContext::new().await;

    let response = ctx.server.get("/version").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["version"], env!("CARGO_PKG_VERSION"));
}
