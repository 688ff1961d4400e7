//! Auction roster management with auto-incrementing bidder numbers.

use sea_orm::*;

use crate::models::client::Entity as Client;
use crate::models::participation::{self, Entity as Participation, ParticipantDto};
use crate::services::ServiceError;

/// Participants of an auction, ordered by bidder number.
pub async fn list_participants(
    db: &DatabaseConnection,
    enchere_id: i32,
) -> Result<Vec<ParticipantDto>, ServiceError> {
    let rows = Participation::find()
        .filter(participation::Column::EnchereId.eq(enchere_id))
        .order_by_asc(participation::Column::LocalNumber)
        .find_also_related(Client)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(p, client)| client.map(|c| ParticipantDto::from_join(p, c)))
        .collect())
}

/// Register a client in an auction.
///
/// When no bidder number is supplied, the next one is the current maximum in
/// this auction plus one (an empty roster starts at 1, displayed as "001").
pub async fn add_participant(
    db: &DatabaseConnection,
    enchere_id: i32,
    client_id: i32,
    local_number: Option<i32>,
    notes: Option<String>,
) -> Result<ParticipantDto, ServiceError> {
    crate::services::enchere_service::get_enchere(db, enchere_id).await?;

    let client = Client::find_by_id(client_id)
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound("Client"))?;

    let existing = Participation::find()
        .filter(participation::Column::EnchereId.eq(enchere_id))
        .filter(participation::Column::ClientId.eq(client_id))
        .one(db)
        .await?;
    if existing.is_some() {
        return Err(ServiceError::Conflict(
            "Client is already participating in this enchere".to_string(),
        ));
    }

    let number = match local_number {
        Some(n) => n,
        None => next_bidder_number(db, enchere_id).await?,
    };

    let now = chrono::Utc::now().to_rfc3339();
    let row = participation::ActiveModel {
        enchere_id: Set(enchere_id),
        client_id: Set(client_id),
        local_number: Set(number),
        notes: Set(notes.unwrap_or_default()),
        registered_at: Set(now),
        ..Default::default()
    };
    let saved = row.insert(db).await?;

    Ok(ParticipantDto::from_join(saved, client))
}

async fn next_bidder_number(
    db: &DatabaseConnection,
    enchere_id: i32,
) -> Result<i32, ServiceError> {
    let highest = Participation::find()
        .filter(participation::Column::EnchereId.eq(enchere_id))
        .order_by_desc(participation::Column::LocalNumber)
        .one(db)
        .await?;
    Ok(highest.map(|p| p.local_number).unwrap_or(0) + 1)
}

pub async fn remove_participant(
    db: &DatabaseConnection,
    enchere_id: i32,
    client_id: i32,
) -> Result<(), ServiceError> {
    let res = Participation::delete_many()
        .filter(participation::Column::EnchereId.eq(enchere_id))
        .filter(participation::Column::ClientId.eq(client_id))
        .exec(db)
        .await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::NotFound("Participation"));
    }
    Ok(())
}

/// Update the auction-scoped note attached to a participation. The client's
/// global notes field is left alone.
pub async fn update_participant_notes(
    db: &DatabaseConnection,
    enchere_id: i32,
    client_id: i32,
    notes: String,
) -> Result<(), ServiceError> {
    let row = Participation::find()
        .filter(participation::Column::EnchereId.eq(enchere_id))
        .filter(participation::Column::ClientId.eq(client_id))
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound("Participation"))?;

    let mut active: participation::ActiveModel = row.into();
    active.notes = Set(notes);
    active.update(db).await?;
    Ok(())
}
