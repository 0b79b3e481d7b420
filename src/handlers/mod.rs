//! # HTTP handlers
//!
//! Thin translation layer: extract, call the service, serialize. All
//! business rules live in [`crate::services`].

pub mod admins;
pub mod auth;
pub mod carousel;
pub mod categories;
pub mod countries;
pub mod currency;
pub mod dashboard;
pub mod products;
pub mod subcategories;
pub mod units;

use std::collections::HashMap;

use axum::extract::Multipart;

use crate::error::{ApiError, Result};
use crate::storage::UploadFile;

/// A parsed multipart body: text fields plus at most one file part.
pub(crate) struct MultipartForm {
    pub fields: HashMap<String, String>,
    pub file: Option<UploadFile>,
}

impl MultipartForm {
    /// Take the file part, rejecting the request when it is missing.
    pub fn require_file(self, part: &str) -> Result<UploadFile> {
        self.file
            .ok_or_else(|| ApiError::bad_request(format!("file part '{part}' is required")))
    }
}

pub(crate) async fn read_multipart(mut multipart: Multipart) -> Result<MultipartForm> {
    let mut fields = HashMap::new();
    let mut file = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if let Some(filename) = field.file_name() {
            let filename = filename.to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::bad_request(format!("failed to read file part: {e}")))?;
            file = Some(UploadFile {
                filename,
                content_type,
                data,
            });
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| ApiError::bad_request(format!("failed to read field '{name}': {e}")))?;
            fields.insert(name, value);
        }
    }

    Ok(MultipartForm { fields, file })
}

pub(crate) fn require_field(fields: &HashMap<String, String>, name: &str) -> Result<String> {
    fields
        .get(name)
        .cloned()
        .ok_or_else(|| ApiError::bad_request(format!("field '{name}' is required")))
}
