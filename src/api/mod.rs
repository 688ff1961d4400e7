pub mod auth;
pub mod client;
pub mod enchere;
pub mod health;
pub mod image;
pub mod lot;
pub mod participation;
pub mod stats;

use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};

use crate::services::ServiceError;
use crate::state::AppState;

/// Map a service failure onto the HTTP taxonomy: validation and invalid
/// state → 400, missing entity → 404, duplicate → 409, anything from the
/// database → logged and returned as a generic 500.
pub(crate) fn error_response(err: ServiceError) -> Response {
    match err {
        ServiceError::Validation(msg) | ServiceError::InvalidState(msg) => (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": msg})),
        )
            .into_response(),
        ServiceError::NotFound(what) => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": format!("{} not found", what)})),
        )
            .into_response(),
        ServiceError::Conflict(msg) => (
            StatusCode::CONFLICT,
            Json(serde_json::json!({"error": msg})),
        )
            .into_response(),
        ServiceError::Database(msg) => {
            tracing::error!("Database error: {}", msg);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": "Internal server error"})),
            )
                .into_response()
        }
    }
}

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Auth (stub)
        .route("/login", post(auth::login))
        // Clients
        .route(
            "/clients",
            get(client::list_clients).post(client::create_client),
        )
        .route(
            "/clients/:id",
            get(client::get_client)
                .put(client::update_client)
                .delete(client::delete_client),
        )
        // Encheres
        .route(
            "/encheres",
            get(enchere::list_encheres).post(enchere::create_enchere),
        )
        .route(
            "/encheres/:id",
            get(enchere::get_enchere)
                .put(enchere::update_enchere)
                .delete(enchere::delete_enchere),
        )
        // Lots
        .route(
            "/encheres/:id/lots",
            get(lot::list_lots).post(lot::create_lot),
        )
        .route(
            "/lots/:id",
            get(lot::get_lot).put(lot::update_lot).delete(lot::delete_lot),
        )
        .route("/lots/:id/sell", post(lot::sell_lot))
        // Images
        .route(
            "/lots/:id/images",
            get(image::list_images).post(image::upload_image),
        )
        .route("/images/:id", axum::routing::delete(image::delete_image))
        // Participants
        .route(
            "/encheres/:id/participants",
            get(participation::list_participants).post(participation::add_participant),
        )
        .route(
            "/encheres/:id/participants/:client_id",
            put(participation::update_participant)
                .delete(participation::remove_participant),
        )
        // Analytics
        .route("/encheres/:id/stats", get(stats::enchere_stats))
        .route("/encheres/:id/report", get(stats::enchere_report))
        .route(
            "/encheres/:id/clients/:client_id/purchases",
            get(stats::client_purchases),
        )
        // Room for the multipart framing on top of the image cap; the exact
        // 10 MiB check on the file itself lives in the upload handler.
        .layer(DefaultBodyLimit::max(image::MAX_IMAGE_BYTES + 64 * 1024))
        .with_state(state)
}
