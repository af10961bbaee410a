// src/media/mod.rs
use thiserror::Error;

use crate::domain::StoredImage;
use crate::forms::UploadedFile;

mod cloudinary;

pub use cloudinary::{CloudinaryConfig, CloudinaryStore, DEFAULT_BASE_URL as CLOUDINARY_BASE_URL};

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("API error: {status} - {body}")]
    Api { status: u16, body: String },

    #[error("unexpected response: {0}")]
    Decode(String),

    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),
}

/// Durable storage for uploaded images.
pub trait MediaStore: Send + Sync {
    fn upload(&self, file: &UploadedFile) -> Result<StoredImage, MediaError>;
}
