use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A lot put up for sale in one auction.
///
/// `sold_price`, `sold_to` and `sold_at` are all null while the lot is
/// available and all set once it is sold. `sold_to` references the buying
/// client and is nulled out when that client is deleted (the price and the
/// sale timestamp are preserved).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "lots")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub enchere_id: i32,
    pub name: String,
    pub description: String,
    pub category: String,
    pub starting_price: f64,
    pub sold_price: Option<f64>,
    pub sold_to: Option<i32>,
    pub sold_at: Option<String>,
    pub notes: String,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::enchere::Entity",
        from = "Column::EnchereId",
        to = "super::enchere::Column::Id"
    )]
    Enchere,
    #[sea_orm(
        belongs_to = "super::client::Entity",
        from = "Column::SoldTo",
        to = "super::client::Column::Id"
    )]
    Buyer,
    #[sea_orm(has_many = "super::image::Entity")]
    Image,
}

impl Related<super::enchere::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enchere.def()
    }
}

impl Related<super::client::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Buyer.def()
    }
}

impl Related<super::image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Image.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Lot enriched with the buyer's name when sold (LEFT JOIN on client).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LotWithBuyer {
    pub id: i32,
    pub enchere_id: i32,
    pub name: String,
    pub description: String,
    pub category: String,
    pub starting_price: f64,
    pub sold_price: Option<f64>,
    pub sold_to: Option<i32>,
    pub sold_at: Option<String>,
    pub sold_to_name: Option<String>,
    pub notes: String,
    pub created_at: String,
}

impl LotWithBuyer {
    pub fn from_join(lot: Model, buyer: Option<super::client::Model>) -> Self {
        Self {
            id: lot.id,
            enchere_id: lot.enchere_id,
            name: lot.name,
            description: lot.description,
            category: lot.category,
            starting_price: lot.starting_price,
            sold_price: lot.sold_price,
            sold_to: lot.sold_to,
            sold_at: lot.sold_at,
            sold_to_name: buyer.map(|c| c.name),
            notes: lot.notes,
            created_at: lot.created_at,
        }
    }
}
