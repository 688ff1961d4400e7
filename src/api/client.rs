use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::DatabaseConnection;

use crate::api::error_response;
use crate::services::client_service::{self, ClientInput};

pub async fn list_clients(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    match client_service::list_clients(&db).await {
        Ok(clients) => Json(clients).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn get_client(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match client_service::get_client(&db, id).await {
        Ok(client) => Json(client).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn create_client(
    State(db): State<DatabaseConnection>,
    Json(input): Json<ClientInput>,
) -> impl IntoResponse {
    match client_service::create_client(&db, input).await {
        Ok(client) => (StatusCode::CREATED, Json(client)).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn update_client(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
    Json(input): Json<ClientInput>,
) -> impl IntoResponse {
    match client_service::update_client(&db, id, input).await {
        Ok(client) => Json(client).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn delete_client(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match client_service::delete_client(&db, id).await {
        Ok(()) => Json(serde_json::json!({"message": "Client deleted successfully"}))
            .into_response(),
        Err(e) => error_response(e),
    }
}
