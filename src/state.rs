//! Application state shared across all handlers

use sea_orm::DatabaseConnection;
use std::path::PathBuf;

#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    /// Directory where uploaded lot images are stored.
    pub uploads_dir: PathBuf,
}

impl AppState {
    pub fn new(db: DatabaseConnection, uploads_dir: PathBuf) -> Self {
        Self { db, uploads_dir }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

// Allow handlers that only need the database to extract it directly
impl axum::extract::FromRef<AppState> for DatabaseConnection {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}
