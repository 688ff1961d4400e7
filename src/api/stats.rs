use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use sea_orm::DatabaseConnection;

use crate::api::error_response;
use crate::services::stats_service;

pub async fn enchere_stats(
    State(db): State<DatabaseConnection>,
    Path(enchere_id): Path<i32>,
) -> impl IntoResponse {
    match stats_service::enchere_stats(&db, enchere_id).await {
        Ok(stats) => Json(stats).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn client_purchases(
    State(db): State<DatabaseConnection>,
    Path((enchere_id, client_id)): Path<(i32, i32)>,
) -> impl IntoResponse {
    match stats_service::client_purchases(&db, enchere_id, client_id).await {
        Ok(purchases) => Json(purchases).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn enchere_report(
    State(db): State<DatabaseConnection>,
    Path(enchere_id): Path<i32>,
) -> impl IntoResponse {
    match stats_service::enchere_report(&db, enchere_id).await {
        Ok(report) => Json(report).into_response(),
        Err(e) => error_response(e),
    }
}
