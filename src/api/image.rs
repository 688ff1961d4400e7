use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::api::error_response;
use crate::services::image_service;
use crate::state::AppState;

/// Upload size cap, enforced before the bytes reach the image service.
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

pub async fn list_images(
    State(db): State<DatabaseConnection>,
    Path(lot_id): Path<i32>,
) -> impl IntoResponse {
    match image_service::list_images(&db, lot_id).await {
        Ok(images) => Json(images).into_response(),
        Err(e) => error_response(e),
    }
}

/// Accept one image file per request (multipart field "image", optional
/// "name" and "description" text fields). Non-image MIME types and files
/// over 10 MiB are rejected here.
pub async fn upload_image(
    State(state): State<AppState>,
    Path(lot_id): Path<i32>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut file: Option<(String, String, Vec<u8>)> = None;
    let mut display_name: Option<String> = None;
    let mut description: Option<String> = None;

    while let Some(field) = multipart.next_field().await.unwrap_or(None) {
        match field.name() {
            Some("image") => {
                let original_name = field
                    .file_name()
                    .unwrap_or("upload")
                    .to_string();
                let mime_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();

                if !mime_type.starts_with("image/") {
                    return (
                        StatusCode::BAD_REQUEST,
                        Json(json!({ "error": "Only image files are allowed" })),
                    )
                        .into_response();
                }

                let data = match field.bytes().await {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        return (
                            StatusCode::BAD_REQUEST,
                            Json(json!({ "error": e.to_string() })),
                        )
                            .into_response();
                    }
                };

                if data.len() > MAX_IMAGE_BYTES {
                    return (
                        StatusCode::BAD_REQUEST,
                        Json(json!({ "error": "Image exceeds the 10 MiB limit" })),
                    )
                        .into_response();
                }

                file = Some((original_name, mime_type, data.to_vec()));
            }
            Some("name") => {
                display_name = field.text().await.ok().filter(|s| !s.is_empty());
            }
            Some("description") => {
                description = field.text().await.ok().filter(|s| !s.is_empty());
            }
            _ => {}
        }
    }

    let Some((original_name, mime_type, data)) = file else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "No image file provided" })),
        )
            .into_response();
    };

    match image_service::store_image(
        state.db(),
        &state.uploads_dir,
        lot_id,
        &original_name,
        display_name,
        description,
        &mime_type,
        &data,
    )
    .await
    {
        Ok(image) => {
            let url = format!("/uploads/{}", image.file_path);
            let mut body = serde_json::to_value(&image).unwrap_or_default();
            if let Some(obj) = body.as_object_mut() {
                obj.insert("url".to_string(), json!(url));
            }
            (StatusCode::CREATED, Json(body)).into_response()
        }
        Err(e) => error_response(e),
    }
}

pub async fn delete_image(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match image_service::delete_image(state.db(), &state.uploads_dir, id).await {
        Ok(()) => {
            Json(json!({"message": "Image deleted successfully"})).into_response()
        }
        Err(e) => error_response(e),
    }
}
