// errors.rs
use astra::Response;
use thiserror::Error;

use crate::geocoding::GeocodeError;
use crate::media::MediaError;

/// Errors originating from either the server logic
/// (routing, missing resources, gates) or downstream layers (DB, outbound APIs).
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Payload Too Large: {0}")]
    PayloadTooLarge(String),

    #[error("Database Error: {0}")]
    DbError(String),

    #[error("Geocoding Error: {0}")]
    Geocoding(#[from] GeocodeError),

    #[error("Media Error: {0}")]
    Media(#[from] MediaError),

    #[error("Internal Server Error")]
    InternalError,
}

impl From<rusqlite::Error> for ServerError {
    fn from(e: rusqlite::Error) -> Self {
        ServerError::DbError(e.to_string())
    }
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;
