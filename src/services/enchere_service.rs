//! Auction (enchere) CRUD

use sea_orm::*;

use crate::models::enchere::{self, Entity as Enchere};
use crate::services::ServiceError;
use crate::utils::format::format_date;

#[derive(Debug, Clone, serde::Deserialize, Default)]
pub struct EnchereInput {
    #[serde(default)]
    pub name: String,
    pub date: Option<String>,
    pub address: Option<String>,
}

/// List all auctions, most recent first.
pub async fn list_encheres(db: &DatabaseConnection) -> Result<Vec<enchere::Model>, ServiceError> {
    let encheres = Enchere::find()
        .order_by_desc(enchere::Column::Date)
        .all(db)
        .await?;
    Ok(encheres)
}

pub async fn get_enchere(db: &DatabaseConnection, id: i32) -> Result<enchere::Model, ServiceError> {
    Enchere::find_by_id(id)
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound("Enchere"))
}

pub async fn create_enchere(
    db: &DatabaseConnection,
    input: EnchereInput,
) -> Result<enchere::Model, ServiceError> {
    if input.name.trim().is_empty() {
        return Err(ServiceError::Validation("Name is required".to_string()));
    }

    let now = chrono::Utc::now().to_rfc3339();
    let new_enchere = enchere::ActiveModel {
        name: Set(input.name),
        date: Set(format_date(&input.date.unwrap_or_default())),
        address: Set(input.address.unwrap_or_default()),
        created_at: Set(now),
        ..Default::default()
    };

    Ok(new_enchere.insert(db).await?)
}

pub async fn update_enchere(
    db: &DatabaseConnection,
    id: i32,
    input: EnchereInput,
) -> Result<enchere::Model, ServiceError> {
    if input.name.trim().is_empty() {
        return Err(ServiceError::Validation("Name is required".to_string()));
    }

    let existing = Enchere::find_by_id(id)
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound("Enchere"))?;

    let mut active: enchere::ActiveModel = existing.into();
    active.name = Set(input.name);
    active.date = Set(format_date(&input.date.unwrap_or_default()));
    active.address = Set(input.address.unwrap_or_default());

    Ok(active.update(db).await?)
}

/// Delete an auction. Lots (and their images) and participations cascade.
pub async fn delete_enchere(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let res = Enchere::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::NotFound("Enchere"));
    }
    Ok(())
}
