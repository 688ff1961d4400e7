use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::DatabaseConnection;

use crate::api::error_response;
use crate::services::enchere_service::{self, EnchereInput};

pub async fn list_encheres(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    match enchere_service::list_encheres(&db).await {
        Ok(encheres) => Json(encheres).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn get_enchere(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match enchere_service::get_enchere(&db, id).await {
        Ok(enchere) => Json(enchere).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn create_enchere(
    State(db): State<DatabaseConnection>,
    Json(input): Json<EnchereInput>,
) -> impl IntoResponse {
    match enchere_service::create_enchere(&db, input).await {
        Ok(enchere) => (StatusCode::CREATED, Json(enchere)).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn update_enchere(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
    Json(input): Json<EnchereInput>,
) -> impl IntoResponse {
    match enchere_service::update_enchere(&db, id, input).await {
        Ok(enchere) => Json(enchere).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn delete_enchere(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match enchere_service::delete_enchere(&db, id).await {
        Ok(()) => Json(serde_json::json!({"message": "Enchere deleted successfully"}))
            .into_response(),
        Err(e) => error_response(e),
    }
}
