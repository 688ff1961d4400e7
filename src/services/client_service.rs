//! Client directory - CRUD over the global client table

use sea_orm::*;

use crate::models::client::{self, Entity as Client};
use crate::services::ServiceError;

/// Fields accepted when creating or updating a client.
#[derive(Debug, Clone, serde::Deserialize, Default)]
pub struct ClientInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub surname: String,
    #[serde(default)]
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
}

/// List all clients ordered by name.
pub async fn list_clients(db: &DatabaseConnection) -> Result<Vec<client::Model>, ServiceError> {
    let clients = Client::find()
        .order_by_asc(client::Column::Name)
        .all(db)
        .await?;
    Ok(clients)
}

pub async fn get_client(db: &DatabaseConnection, id: i32) -> Result<client::Model, ServiceError> {
    Client::find_by_id(id)
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound("Client"))
}

/// Create a client. Name and email are required; the email must not be used
/// by any existing client.
pub async fn create_client(
    db: &DatabaseConnection,
    input: ClientInput,
) -> Result<client::Model, ServiceError> {
    if input.name.trim().is_empty() || input.email.trim().is_empty() {
        return Err(ServiceError::Validation(
            "Name and email are required".to_string(),
        ));
    }

    let existing = Client::find()
        .filter(client::Column::Email.eq(input.email.clone()))
        .one(db)
        .await?;
    if existing.is_some() {
        return Err(ServiceError::Conflict(
            "Client with this email already exists".to_string(),
        ));
    }

    let now = chrono::Utc::now().to_rfc3339();
    let new_client = client::ActiveModel {
        name: Set(input.name),
        surname: Set(input.surname),
        email: Set(input.email),
        phone: Set(input.phone.unwrap_or_default()),
        address: Set(input.address.unwrap_or_default()),
        notes: Set(input.notes.unwrap_or_default()),
        created_at: Set(now),
        ..Default::default()
    };

    Ok(new_client.insert(db).await?)
}

/// Update a client. The new email must not collide with a different client.
pub async fn update_client(
    db: &DatabaseConnection,
    id: i32,
    input: ClientInput,
) -> Result<client::Model, ServiceError> {
    if input.name.trim().is_empty() || input.email.trim().is_empty() {
        return Err(ServiceError::Validation(
            "Name and email are required".to_string(),
        ));
    }

    let existing = Client::find_by_id(id)
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound("Client"))?;

    let email_taken = Client::find()
        .filter(client::Column::Email.eq(input.email.clone()))
        .filter(client::Column::Id.ne(id))
        .one(db)
        .await?;
    if email_taken.is_some() {
        return Err(ServiceError::Conflict(
            "Email is already taken by another client".to_string(),
        ));
    }

    let mut active: client::ActiveModel = existing.into();
    active.name = Set(input.name);
    active.surname = Set(input.surname);
    active.email = Set(input.email);
    active.phone = Set(input.phone.unwrap_or_default());
    active.address = Set(input.address.unwrap_or_default());
    active.notes = Set(input.notes.unwrap_or_default());

    Ok(active.update(db).await?)
}

/// Delete a client. Participations cascade; lots bought by the client keep
/// their sold_price but lose the buyer reference (ON DELETE SET NULL).
pub async fn delete_client(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let res = Client::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::NotFound("Client"));
    }
    Ok(())
}
