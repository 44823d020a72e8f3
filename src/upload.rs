use reqwest::blocking::Client;
use reqwest::blocking::multipart::{Form, Part};
use serde::Deserialize;

use crate::errors::{AlbumError, Result};
use crate::store::PhotoStore;
use crate::store::models::PhotoRecord;

const USER_AGENT: &str = concat!("albumsync/", env!("CARGO_PKG_VERSION"));

/// Response contract of the remote upload service. Anything that fails to
/// parse is treated as an empty object and therefore a rejection.
#[derive(Debug, Default, Deserialize)]
struct UploadResponse {
    #[serde(default)]
    ok: bool,
    url: Option<String>,
    error: Option<String>,
}

/// Sends image bytes to the remote upload service and registers the returned
/// URL in the local photo index.
///
/// Each call is one-shot: no retries, no deduplication, and no mutual
/// exclusion between overlapping calls. Callers that care about interleaving
/// serialize uploads themselves.
pub struct Uploader {
    endpoint: String,
    user_key: String,
    client: Client,
}

impl Uploader {
    pub fn new(endpoint: impl Into<String>, user_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(AlbumError::NetworkFailed)?;
        Ok(Self {
            endpoint: endpoint.into(),
            user_key: user_key.into(),
            client,
        })
    }

    /// POSTs `bytes` as the `photo` multipart field and returns the URL the
    /// service assigned.
    pub fn upload(&self, bytes: Vec<u8>, filename: &str) -> Result<String> {
        let part = Part::bytes(bytes).file_name(filename.to_string());
        let form = Form::new()
            .part("photo", part)
            .text("user_key", self.user_key.clone());

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .map_err(AlbumError::NetworkFailed)?;

        let status = response.status();
        let body: UploadResponse = response.json().unwrap_or_default();

        if !status.is_success() || !body.ok {
            return Err(AlbumError::UploadRejected(
                body.error
                    .unwrap_or_else(|| "upload service rejected the photo".to_string()),
            ));
        }
        body.url.ok_or_else(|| {
            AlbumError::UploadRejected("upload service returned no url".to_string())
        })
    }

    /// Uploads, then records the resulting URL in `store`. The two steps are
    /// independently failable: if the insert fails the photo already exists
    /// remotely, and that error comes back as `RecordPersistFailed`.
    pub fn upload_and_record(
        &self,
        store: &dyn PhotoStore,
        bytes: Vec<u8>,
        filename: &str,
    ) -> Result<PhotoRecord> {
        let url = self.upload(bytes, filename)?;
        store
            .add_photo(&url)
            .map_err(|e| AlbumError::RecordPersistFailed(Box::new(e)))
    }
}
