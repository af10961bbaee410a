// src/media/cloudinary.rs
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::time::Duration;

use crate::clock::now_unix;
use crate::domain::StoredImage;
use crate::forms::UploadedFile;
use crate::media::{MediaError, MediaStore};

pub const DEFAULT_BASE_URL: &str = "https://api.cloudinary.com";

const ALLOWED_FORMATS: &[&str] = &["png", "jpg", "jpeg"];

#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    /// Folder every upload is placed in, e.g. "listings_dev".
    pub folder: String,
    pub base_url: String,
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

pub struct CloudinaryStore {
    cfg: CloudinaryConfig,
    client: Client,
}

impl CloudinaryStore {
    pub fn new(cfg: CloudinaryConfig, timeout: Duration) -> Result<Self, MediaError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MediaError::Request(e.to_string()))?;

        Ok(Self { cfg, client })
    }

    fn upload_url(&self) -> String {
        format!(
            "{}/v1_1/{}/image/upload",
            self.cfg.base_url.trim_end_matches('/'),
            self.cfg.cloud_name
        )
    }
}

/// Lowercased format of the upload, from its extension or else its content type.
fn image_format(file: &UploadedFile) -> Option<String> {
    let from_ext = file
        .file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());

    from_ext.or_else(|| {
        file.content_type
            .as_ref()
            .filter(|m| m.type_() == mime::IMAGE)
            .map(|m| m.subtype().as_str().to_ascii_lowercase())
    })
}

fn check_format(file: &UploadedFile) -> Result<(), MediaError> {
    match image_format(file) {
        Some(fmt) if ALLOWED_FORMATS.contains(&fmt.as_str()) => Ok(()),
        Some(fmt) => Err(MediaError::UnsupportedFormat(fmt)),
        None => Err(MediaError::UnsupportedFormat(file.file_name.clone())),
    }
}

/// Request signature: sorted `key=value` pairs joined by `&`, secret appended, SHA-256 hex.
fn sign(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut sorted = params.to_vec();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let joined = sorted
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    format!("{:x}", Sha256::digest(format!("{joined}{api_secret}").as_bytes()))
}

impl MediaStore for CloudinaryStore {
    fn upload(&self, file: &UploadedFile) -> Result<StoredImage, MediaError> {
        check_format(file)?;

        let timestamp = now_unix().to_string();
        let signature = sign(
            &[
                ("folder", self.cfg.folder.as_str()),
                ("timestamp", timestamp.as_str()),
            ],
            &self.cfg.api_secret,
        );

        let mut part = Part::bytes(file.data.clone()).file_name(file.file_name.clone());
        if let Some(ct) = &file.content_type {
            part = part
                .mime_str(ct.as_ref())
                .map_err(|e| MediaError::Request(e.to_string()))?;
        }

        let form = Form::new()
            .text("api_key", self.cfg.api_key.clone())
            .text("folder", self.cfg.folder.clone())
            .text("timestamp", timestamp)
            .text("signature", signature)
            .text("signature_algorithm", "sha256")
            .part("file", part);

        let resp = self
            .client
            .post(self.upload_url())
            .multipart(form)
            .send()
            .map_err(|e| MediaError::Request(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_else(|_| "(no body)".to_string());
            return Err(MediaError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let uploaded: UploadResponse = resp
            .json()
            .map_err(|e| MediaError::Decode(e.to_string()))?;

        tracing::info!(filename = %uploaded.public_id, "image uploaded");

        Ok(StoredImage {
            url: uploaded.secure_url,
            filename: uploaded.public_id,
        })
    }
}
