// src/forms/multipart.rs
use bytes::Bytes;
use futures::executor::block_on;
use futures::stream;

use crate::errors::ServerError;
use crate::forms::{ParsedForm, UploadedFile};

fn bad(e: multer::Error) -> ServerError {
    ServerError::BadRequest(format!("Malformed multipart body: {e}"))
}

/// Splits an already-buffered `multipart/form-data` body into text fields and files.
///
/// The body is fully in memory, so the future never actually waits; `block_on`
/// just drives multer's parser on the worker thread.
pub fn parse_multipart(body: Vec<u8>, boundary: &str) -> Result<ParsedForm, ServerError> {
    let stream = stream::once(async move { Ok::<Bytes, std::io::Error>(Bytes::from(body)) });
    let mut multipart = multer::Multipart::new(stream, boundary.to_string());

    block_on(async move {
        let mut form = ParsedForm::default();

        while let Some(field) = multipart.next_field().await.map_err(bad)? {
            let name = field.name().unwrap_or_default().to_string();

            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let content_type = field.content_type().cloned();
                    let data = field.bytes().await.map_err(bad)?;

                    // Browsers send an empty part when no file was chosen.
                    if file_name.is_empty() && data.is_empty() {
                        continue;
                    }

                    form.files.push(UploadedFile {
                        field: name,
                        file_name,
                        content_type,
                        data: data.to_vec(),
                    });
                }
                None => {
                    let text = field.text().await.map_err(bad)?;
                    form.fields.insert(name, text);
                }
            }
        }

        Ok(form)
    })
}
