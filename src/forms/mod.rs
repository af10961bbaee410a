// src/forms/mod.rs
//! Request body and query string decoding for HTML forms.
use crate::errors::ServerError;
use astra::Request;
use std::collections::HashMap;
use std::io::Read;

mod multipart;

pub use multipart::parse_multipart;

/// Flat text fields of a submitted form. Repeated keys: last one wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    fields: HashMap<String, String>,
}

impl FormData {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn from_urlencoded(raw: &[u8]) -> Self {
        let mut form = Self::default();
        for (k, v) in url::form_urlencoded::parse(raw) {
            form.insert(k.into_owned(), v.into_owned());
        }
        form
    }
}

/// A file part pulled out of a multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub field: String,
    pub file_name: String,
    pub content_type: Option<mime::Mime>,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct ParsedForm {
    pub fields: FormData,
    pub files: Vec<UploadedFile>,
}

impl ParsedForm {
    /// Removes and returns the file submitted under `field`, if any.
    pub fn take_file(&mut self, field: &str) -> Option<UploadedFile> {
        let idx = self.files.iter().position(|f| f.field == field)?;
        Some(self.files.remove(idx))
    }
}

pub fn parse_query(req: &Request) -> FormData {
    req.uri()
        .query()
        .map(|q| FormData::from_urlencoded(q.as_bytes()))
        .unwrap_or_default()
}

/// Reads the whole body, refusing anything above `limit` bytes.
pub fn read_body(req: &mut Request, limit: usize) -> Result<Vec<u8>, ServerError> {
    let mut buf = Vec::new();
    req.body_mut()
        .reader()
        .take(limit as u64 + 1)
        .read_to_end(&mut buf)
        .map_err(|e| ServerError::BadRequest(format!("Failed to read body: {e}")))?;

    if buf.len() > limit {
        return Err(ServerError::PayloadTooLarge(format!(
            "request body exceeds {limit} bytes"
        )));
    }
    Ok(buf)
}

fn content_type(req: &Request) -> Option<mime::Mime> {
    req.headers()
        .get("Content-Type")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<mime::Mime>().ok())
}

/// Decodes a urlencoded or multipart body. Other content types yield an empty form.
pub fn parse_form(req: &mut Request, limit: usize) -> Result<ParsedForm, ServerError> {
    let ct = content_type(req);
    let body = read_body(req, limit)?;

    match ct {
        Some(ct) if ct.type_() == mime::MULTIPART && ct.subtype() == mime::FORM_DATA => {
            let boundary = ct
                .get_param(mime::BOUNDARY)
                .ok_or_else(|| ServerError::BadRequest("multipart body without boundary".into()))?;
            parse_multipart(body, boundary.as_str())
        }
        Some(ct) if ct.essence_str() == mime::APPLICATION_WWW_FORM_URLENCODED.essence_str() => {
            Ok(ParsedForm {
                fields: FormData::from_urlencoded(&body),
                files: Vec::new(),
            })
        }
        _ => Ok(ParsedForm::default()),
    }
}
