use axum::Json;
use serde_json::json;

/// Authentication stub. There is no real account model; every login returns
/// the same fixed token.
pub async fn login() -> Json<serde_json::Value> {
    Json(json!({ "token": "test123" }))
}
