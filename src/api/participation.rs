use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;

use crate::api::error_response;
use crate::services::participation_service;
use crate::services::ServiceError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddParticipantRequest {
    pub client_id: Option<i32>,
    pub local_number: Option<i32>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateParticipantRequest {
    pub notes: Option<String>,
}

pub async fn list_participants(
    State(db): State<DatabaseConnection>,
    Path(enchere_id): Path<i32>,
) -> impl IntoResponse {
    match participation_service::list_participants(&db, enchere_id).await {
        Ok(participants) => Json(participants).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn add_participant(
    State(db): State<DatabaseConnection>,
    Path(enchere_id): Path<i32>,
    Json(req): Json<AddParticipantRequest>,
) -> impl IntoResponse {
    let Some(client_id) = req.client_id else {
        return error_response(ServiceError::Validation(
            "Client ID is required".to_string(),
        ));
    };

    match participation_service::add_participant(
        &db,
        enchere_id,
        client_id,
        req.local_number,
        req.notes,
    )
    .await
    {
        Ok(participant) => (StatusCode::CREATED, Json(participant)).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn remove_participant(
    State(db): State<DatabaseConnection>,
    Path((enchere_id, client_id)): Path<(i32, i32)>,
) -> impl IntoResponse {
    match participation_service::remove_participant(&db, enchere_id, client_id).await {
        Ok(()) => Json(serde_json::json!({"message": "Participant removed successfully"}))
            .into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn update_participant(
    State(db): State<DatabaseConnection>,
    Path((enchere_id, client_id)): Path<(i32, i32)>,
    Json(req): Json<UpdateParticipantRequest>,
) -> impl IntoResponse {
    match participation_service::update_participant_notes(
        &db,
        enchere_id,
        client_id,
        req.notes.unwrap_or_default(),
    )
    .await
    {
        Ok(()) => Json(serde_json::json!({"message": "Participant notes updated successfully"}))
            .into_response(),
        Err(e) => error_response(e),
    }
}
