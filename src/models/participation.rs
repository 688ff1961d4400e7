use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::utils::format::format_bidder_number;

/// Registration of a client in one auction, with the auction-scoped bidder
/// number. The number is stored as an integer; zero-padded display ("001")
/// is a formatting concern handled in the DTO layer.
///
/// `notes` here is the per-(auction, client) note; `client.notes` is the
/// global one.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "participation")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub enchere_id: i32,
    pub client_id: i32,
    pub local_number: i32,
    pub notes: String,
    pub registered_at: String,
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
        from = "Column::ClientId",
        to = "super::client::Column::Id"
    )]
    Client,
}

impl Related<super::enchere::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enchere.def()
    }
}

impl Related<super::client::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Roster entry: client details joined with the participation row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantDto {
    pub id: i32,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub notes: String,
    pub local_number: String,
    pub registered_at: String,
}

impl ParticipantDto {
    pub fn from_join(participation: Model, client: super::client::Model) -> Self {
        Self {
            id: client.id,
            name: client.name,
            surname: client.surname,
            email: client.email,
            phone: client.phone,
            address: client.address,
            notes: participation.notes,
            local_number: format_bidder_number(participation.local_number),
            registered_at: participation.registered_at,
        }
    }
}
