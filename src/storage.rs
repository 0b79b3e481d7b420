//! # Object storage gateway
//!
//! Binary blobs live in an external storage service; the database only
//! keeps their public URLs. `HttpStorage` talks to an HTTP storage gateway
//! (PUT/DELETE with an access-key header); `MemoryStorage` is an in-memory
//! substitute for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use uuid::Uuid;

use crate::config::StorageConfig;
use crate::error::{ApiError, Result};

/// A file received from a multipart upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub filename: String,
    pub content_type: String,
    pub data: Bytes,
}

#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Upload a blob under the given folder; returns its public URL.
    async fn upload(&self, folder: &str, file: &UploadFile) -> Result<String>;

    /// Delete the blob behind a previously returned public URL.
    async fn delete(&self, url: &str) -> Result<()>;
}

/// HTTP storage gateway client.
pub struct HttpStorage {
    client: reqwest::Client,
    endpoint: String,
    access_key: String,
    public_url: String,
}

impl HttpStorage {
    #[must_use]
    pub fn new(client: reqwest::Client, config: &StorageConfig) -> Self {
        Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            access_key: config.access_key.clone(),
            public_url: config.public_url.trim_end_matches('/').to_string(),
        }
    }

    /// Object key: `{folder}/{uuid}-{original filename}`.
    fn object_key(folder: &str, filename: &str) -> String {
        format!("{folder}/{}-{filename}", Uuid::new_v4())
    }

    fn key_from_url<'a>(&self, url: &'a str) -> &'a str {
        url.strip_prefix(&self.public_url)
            .map_or(url, |rest| rest.trim_start_matches('/'))
    }
}

#[async_trait]
impl ObjectStorage for HttpStorage {
    async fn upload(&self, folder: &str, file: &UploadFile) -> Result<String> {
        let key = Self::object_key(folder, &file.filename);

        let response = self
            .client
            .put(format!("{}/{key}", self.endpoint))
            .header("AccessKey", &self.access_key)
            .header(CONTENT_TYPE, &file.content_type)
            .body(file.data.clone())
            .send()
            .await
            .map_err(|e| ApiError::Storage(format!("upload failed: {e}")))?;

        if !response.status().is_success() {
            return Err(ApiError::Storage(format!(
                "upload failed with status {}",
                response.status()
            )));
        }

        Ok(format!("{}/{key}", self.public_url))
    }

    async fn delete(&self, url: &str) -> Result<()> {
        let key = self.key_from_url(url);

        let response = self
            .client
            .delete(format!("{}/{key}", self.endpoint))
            .header("AccessKey", &self.access_key)
            .send()
            .await
            .map_err(|e| ApiError::Storage(format!("delete failed: {e}")))?;

        if !response.status().is_success() {
            return Err(ApiError::Storage(format!(
                "delete failed with status {}",
                response.status()
            )));
        }
        Ok(())
    }
}

/// In-memory storage used by tests; tracks uploaded keys so deletions can
/// be asserted against.
#[derive(Default)]
pub struct MemoryStorage {
    objects: Mutex<HashMap<String, Bytes>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.lock().expect("storage lock").len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn contains(&self, url: &str) -> bool {
        self.objects.lock().expect("storage lock").contains_key(url)
    }
}

#[async_trait]
impl ObjectStorage for MemoryStorage {
    async fn upload(&self, folder: &str, file: &UploadFile) -> Result<String> {
        let url = format!(
            "memory://{folder}/{}-{}",
            Uuid::new_v4(),
            file.filename
        );
        self.objects
            .lock()
            .expect("storage lock")
            .insert(url.clone(), file.data.clone());
        Ok(url)
    }

    async fn delete(&self, url: &str) -> Result<()> {
        self.objects.lock().expect("storage lock").remove(url);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_strips_public_prefix() {
        let storage = HttpStorage::new(
            reqwest::Client::new(),
            &StorageConfig {
                endpoint: "https://gw.example.com/bucket/".to_string(),
                access_key: "key".to_string(),
                public_url: "https://cdn.example.com".to_string(),
            },
        );
        assert_eq!(
            storage.key_from_url("https://cdn.example.com/products/abc-f.png"),
            "products/abc-f.png"
        );
        // Foreign URLs are passed through untouched.
        assert_eq!(
            storage.key_from_url("https://elsewhere.example.com/x.png"),
            "https://elsewhere.example.com/x.png"
        );
    }

    #[test]
    fn object_keys_embed_folder_and_filename() {
        let key = HttpStorage::object_key("carousel", "banner.jpg");
        assert!(key.starts_with("carousel/"));
        assert!(key.ends_with("-banner.jpg"));
    }
}
