use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;

use crate::api::error_response;
use crate::services::lot_service::{self, LotInput};
use crate::services::ServiceError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellRequest {
    pub client_id: Option<i32>,
    pub sold_price: Option<f64>,
}

pub async fn list_lots(
    State(db): State<DatabaseConnection>,
    Path(enchere_id): Path<i32>,
) -> impl IntoResponse {
    match lot_service::list_lots(&db, enchere_id).await {
        Ok(lots) => Json(lots).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn get_lot(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match lot_service::get_lot(&db, id).await {
        Ok(lot) => Json(lot).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn create_lot(
    State(db): State<DatabaseConnection>,
    Path(enchere_id): Path<i32>,
    Json(input): Json<LotInput>,
) -> impl IntoResponse {
    match lot_service::create_lot(&db, enchere_id, input).await {
        Ok(lot) => (StatusCode::CREATED, Json(lot)).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn update_lot(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
    Json(input): Json<LotInput>,
) -> impl IntoResponse {
    match lot_service::update_lot(&db, id, input).await {
        Ok(lot) => Json(lot).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn sell_lot(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
    Json(req): Json<SellRequest>,
) -> impl IntoResponse {
    let (client_id, sold_price) = match (req.client_id, req.sold_price) {
        (Some(c), Some(p)) => (c, p),
        _ => {
            return error_response(ServiceError::Validation(
                "Client ID and valid sold price are required".to_string(),
            ));
        }
    };

    match lot_service::sell_lot(&db, id, client_id, sold_price).await {
        Ok(lot) => Json(lot).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn delete_lot(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match lot_service::delete_lot(state.db(), &state.uploads_dir, id).await {
        Ok(()) => {
            Json(serde_json::json!({"message": "Lot deleted successfully"})).into_response()
        }
        Err(e) => error_response(e),
    }
}
