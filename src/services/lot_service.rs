//! Lot management, including the one stateful operation in the system:
//! selling a lot to a registered client.

use sea_orm::sea_query::Expr;
use sea_orm::*;
use std::path::Path;

use crate::models::client::Entity as Client;
use crate::models::image::{self, Entity as Image};
use crate::models::lot::{self, Entity as Lot, LotWithBuyer};
use crate::services::ServiceError;

#[derive(Debug, Clone, serde::Deserialize, Default)]
pub struct LotInput {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub starting_price: Option<f64>,
    pub notes: Option<String>,
}

/// All lots of an auction, LEFT-joined with the buyer's name, ordered by id.
pub async fn list_lots(
    db: &DatabaseConnection,
    enchere_id: i32,
) -> Result<Vec<LotWithBuyer>, ServiceError> {
    let lots = Lot::find()
        .filter(lot::Column::EnchereId.eq(enchere_id))
        .order_by_asc(lot::Column::Id)
        .find_also_related(Client)
        .all(db)
        .await?;

    Ok(lots
        .into_iter()
        .map(|(l, buyer)| LotWithBuyer::from_join(l, buyer))
        .collect())
}

pub async fn get_lot(db: &DatabaseConnection, id: i32) -> Result<LotWithBuyer, ServiceError> {
    let (lot, buyer) = Lot::find_by_id(id)
        .find_also_related(Client)
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound("Lot"))?;

    Ok(LotWithBuyer::from_join(lot, buyer))
}

/// Create a lot in an auction. The auction must exist and the starting price
/// must be present and non-negative.
pub async fn create_lot(
    db: &DatabaseConnection,
    enchere_id: i32,
    input: LotInput,
) -> Result<lot::Model, ServiceError> {
    let starting_price = match input.starting_price {
        Some(p) if p >= 0.0 => p,
        _ => {
            return Err(ServiceError::Validation(
                "Valid starting price is required".to_string(),
            ));
        }
    };

    crate::services::enchere_service::get_enchere(db, enchere_id).await?;

    let now = chrono::Utc::now().to_rfc3339();
    let new_lot = lot::ActiveModel {
        enchere_id: Set(enchere_id),
        name: Set(input.name),
        description: Set(input.description.unwrap_or_default()),
        category: Set(input.category.unwrap_or_default()),
        starting_price: Set(starting_price),
        sold_price: Set(None),
        sold_to: Set(None),
        sold_at: Set(None),
        notes: Set(input.notes.unwrap_or_default()),
        created_at: Set(now),
        ..Default::default()
    };

    Ok(new_lot.insert(db).await?)
}

/// Update a lot's descriptive fields. The owning auction and the sale state
/// are not touched here.
pub async fn update_lot(
    db: &DatabaseConnection,
    id: i32,
    input: LotInput,
) -> Result<LotWithBuyer, ServiceError> {
    if let Some(p) = input.starting_price {
        if p < 0.0 {
            return Err(ServiceError::Validation(
                "Starting price must be non-negative".to_string(),
            ));
        }
    }

    let existing = Lot::find_by_id(id)
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound("Lot"))?;

    let mut active: lot::ActiveModel = existing.into();
    active.name = Set(input.name);
    active.description = Set(input.description.unwrap_or_default());
    active.category = Set(input.category.unwrap_or_default());
    if let Some(p) = input.starting_price {
        active.starting_price = Set(p);
    }
    active.notes = Set(input.notes.unwrap_or_default());
    active.update(db).await?;

    get_lot(db, id).await
}

/// Sell a lot to a client.
///
/// The write is a single conditional UPDATE guarded by `sold_to IS NULL`, so
/// concurrent sell attempts on the same lot cannot both succeed: the loser
/// sees zero affected rows and gets the already-sold error.
pub async fn sell_lot(
    db: &DatabaseConnection,
    id: i32,
    client_id: i32,
    sold_price: f64,
) -> Result<LotWithBuyer, ServiceError> {
    if sold_price <= 0.0 {
        return Err(ServiceError::Validation(
            "Client ID and valid sold price are required".to_string(),
        ));
    }

    let lot = Lot::find_by_id(id)
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound("Lot"))?;

    if lot.sold_to.is_some() {
        return Err(ServiceError::InvalidState("Lot is already sold".to_string()));
    }

    Client::find_by_id(client_id)
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound("Client"))?;

    let now = chrono::Utc::now().to_rfc3339();
    let res = Lot::update_many()
        .col_expr(lot::Column::SoldPrice, Expr::value(sold_price))
        .col_expr(lot::Column::SoldTo, Expr::value(client_id))
        .col_expr(lot::Column::SoldAt, Expr::value(now))
        .filter(lot::Column::Id.eq(id))
        .filter(lot::Column::SoldTo.is_null())
        .exec(db)
        .await?;

    if res.rows_affected == 0 {
        // Lost the race against a concurrent sale
        return Err(ServiceError::InvalidState("Lot is already sold".to_string()));
    }

    get_lot(db, id).await
}

/// Delete a lot. Its image rows cascade; the backing files are removed
/// best-effort before the row goes away.
pub async fn delete_lot(
    db: &DatabaseConnection,
    uploads_dir: &Path,
    id: i32,
) -> Result<(), ServiceError> {
    let images = Image::find()
        .filter(image::Column::LotId.eq(id))
        .all(db)
        .await?;

    let res = Lot::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::NotFound("Lot"));
    }

    for img in images {
        let path = uploads_dir.join(&img.file_path);
        if let Err(e) = std::fs::remove_file(&path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!("Failed to remove image file {:?}: {}", path, e);
            }
        }
    }

    Ok(())
}
