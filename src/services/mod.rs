//! Services Layer
//!
//! Pure business logic without the HTTP layer. Handlers translate
//! `ServiceError` variants into status codes at the API boundary.

pub mod client_service;
pub mod enchere_service;
pub mod image_service;
pub mod lot_service;
pub mod participation_service;
pub mod stats_service;

/// Error type for service operations
#[derive(Debug)]
pub enum ServiceError {
    Database(String),
    NotFound(&'static str),
    Validation(String),
    Conflict(String),
    InvalidState(String),
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(e: sea_orm::DbErr) -> Self {
        ServiceError::Database(e.to_string())
    }
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceError::Database(msg) => write!(f, "database error: {}", msg),
            ServiceError::NotFound(what) => write!(f, "{} not found", what),
            ServiceError::Validation(msg) => write!(f, "{}", msg),
            ServiceError::Conflict(msg) => write!(f, "{}", msg),
            ServiceError::InvalidState(msg) => write!(f, "{}", msg),
        }
    }
}
