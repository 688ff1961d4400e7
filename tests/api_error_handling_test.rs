use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use tower::util::ServiceExt; // for `oneshot`

use encheres::api;
use encheres::db;
use encheres::state::AppState;

async fn setup_test_app() -> Router {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    let uploads = std::env::temp_dir().join(format!("encheres-test-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&uploads).expect("Failed to create uploads dir");
    api::api_router(AppState::new(db, uploads))
}

fn json_request(method: &str, uri: &str, payload: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method(method)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(payload).unwrap()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method(method)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = setup_test_app().await;
    let response = app.oneshot(empty_request("GET", "/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ok");
}

#[tokio::test]
async fn test_login_returns_token() {
    let app = setup_test_app().await;
    let response = app
        .oneshot(json_request(
            "POST",
            "/login",
            &serde_json::json!({ "username": "admin", "password": "admin" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["token"], "test123");
}

#[tokio::test]
async fn test_missing_resources_return_404() {
    let app = setup_test_app().await;

    for uri in [
        "/clients/9999",
        "/encheres/9999",
        "/lots/9999",
        "/encheres/9999/stats",
        "/encheres/9999/report",
    ] {
        let response = app.clone().oneshot(empty_request("GET", uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "GET {}", uri);
        let json = body_json(response).await;
        assert!(json["error"].as_str().is_some(), "GET {} has no error body", uri);
    }
}

#[tokio::test]
async fn test_delete_missing_resources_return_404() {
    let app = setup_test_app().await;

    for uri in [
        "/clients/9999",
        "/encheres/9999",
        "/lots/9999",
        "/images/9999",
        "/encheres/9999/participants/9999",
    ] {
        let response = app
            .clone()
            .oneshot(empty_request("DELETE", uri))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "DELETE {}", uri);
    }
}

#[tokio::test]
async fn test_create_client_requires_name_and_email() {
    let app = setup_test_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/clients",
            &serde_json::json!({ "email": "no-name@example.com" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/clients",
            &serde_json::json!({ "name": "No Email" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_json_is_rejected() {
    let app = setup_test_app().await;

    let request = Request::builder()
        .uri("/clients")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_enchere_requires_name() {
    let app = setup_test_app().await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/encheres",
            &serde_json::json!({ "date": "2025-06-01", "address": "Somewhere" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

async fn create_enchere(app: &Router) -> i32 {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/encheres",
            &serde_json::json!({ "name": "Vente", "date": "2025-06-01", "address": "" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap() as i32
}

#[tokio::test]
async fn test_lot_creation_validates_price_and_enchere() {
    let app = setup_test_app().await;
    let enchere = create_enchere(&app).await;

    // Missing starting price
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/encheres/{}/lots", enchere),
            &serde_json::json!({ "name": "Vase" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Valid starting price is required");

    // Negative starting price
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/encheres/{}/lots", enchere),
            &serde_json::json!({ "name": "Vase", "starting_price": -5.0 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Unknown enchere
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/encheres/9999/lots",
            &serde_json::json!({ "name": "Vase", "starting_price": 10.0 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_sell_validation() {
    let app = setup_test_app().await;
    let enchere = create_enchere(&app).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/encheres/{}/lots", enchere),
            &serde_json::json!({ "name": "Vase", "starting_price": 10.0 }),
        ))
        .await
        .unwrap();
    let lot_id = body_json(response).await["id"].as_i64().unwrap();

    // Selling a lot that does not exist
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/lots/9999/sell",
            &serde_json::json!({ "clientId": 1, "soldPrice": 10.0 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Missing fields
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/lots/{}/sell", lot_id),
            &serde_json::json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Zero price is not a sale
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/lots/{}/sell", lot_id),
            &serde_json::json!({ "clientId": 1, "soldPrice": 0.0 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_participant_routes_validate_inputs() {
    let app = setup_test_app().await;
    let enchere = create_enchere(&app).await;

    // Missing clientId
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/encheres/{}/participants", enchere),
            &serde_json::json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Unknown client
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/encheres/{}/participants", enchere),
            &serde_json::json!({ "clientId": 9999 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Unknown enchere
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/encheres/9999/participants",
            &serde_json::json!({ "clientId": 1 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Notes update on a client who never joined
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/encheres/{}/participants/9999", enchere),
            &serde_json::json!({ "notes": "n/a" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_upload_to_missing_lot_returns_404() {
    let app = setup_test_app().await;

    let boundary = "X-ENCHERES-TEST-BOUNDARY";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"a.png\"\r\nContent-Type: image/png\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"fake");
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    let request = Request::builder()
        .uri("/lots/9999/images")
        .method("POST")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_error_bodies_use_the_error_key() {
    let app = setup_test_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/clients",
            &serde_json::json!({ "name": "X" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Name and email are required");
}
