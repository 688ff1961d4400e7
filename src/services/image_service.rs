//! Image metadata + blob storage for lot photos.
//!
//! MIME and size limits are enforced by the upload handler before the bytes
//! reach this module.

use sea_orm::*;
use std::path::Path;

use crate::models::image::{self, Entity as Image};
use crate::models::lot::Entity as Lot;
use crate::services::ServiceError;

pub async fn list_images(
    db: &DatabaseConnection,
    lot_id: i32,
) -> Result<Vec<image::Model>, ServiceError> {
    let images = Image::find()
        .filter(image::Column::LotId.eq(lot_id))
        .all(db)
        .await?;
    Ok(images)
}

/// Persist an uploaded file under a generated unique name and record its
/// metadata row. Returns the stored row.
pub async fn store_image(
    db: &DatabaseConnection,
    uploads_dir: &Path,
    lot_id: i32,
    original_name: &str,
    display_name: Option<String>,
    description: Option<String>,
    mime_type: &str,
    data: &[u8],
) -> Result<image::Model, ServiceError> {
    Lot::find_by_id(lot_id)
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound("Lot"))?;

    let extension = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("bin");
    let file_name = format!("{}.{}", uuid::Uuid::new_v4(), extension);

    let target = uploads_dir.join(&file_name);
    std::fs::write(&target, data)
        .map_err(|e| ServiceError::Database(format!("Failed to save image file: {}", e)))?;

    let now = chrono::Utc::now().to_rfc3339();
    let new_image = image::ActiveModel {
        lot_id: Set(lot_id),
        name: Set(display_name.unwrap_or_else(|| original_name.to_string())),
        description: Set(description.unwrap_or_default()),
        file_path: Set(file_name),
        file_size: Set(data.len() as i64),
        mime_type: Set(mime_type.to_string()),
        created_at: Set(now),
        ..Default::default()
    };

    Ok(new_image.insert(db).await?)
}

/// Delete an image row and its backing file. A file that is already gone is
/// not an error.
pub async fn delete_image(
    db: &DatabaseConnection,
    uploads_dir: &Path,
    id: i32,
) -> Result<(), ServiceError> {
    let img = Image::find_by_id(id)
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound("Image"))?;

    let path = uploads_dir.join(&img.file_path);
    if let Err(e) = std::fs::remove_file(&path) {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!("Failed to remove image file {:?}: {}", path, e);
        }
    }

    Image::delete_by_id(id).exec(db).await?;
    Ok(())
}
