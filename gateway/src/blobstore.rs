//! Blob publisher/aggregator collaborator.
//!
//! The publisher stores opaque (client-encrypted) bytes for a number of
//! storage epochs and returns a blob id; the aggregator serves the bytes
//! back by id. Encryption itself is out of scope here: content arrives
//! already sealed.

use serde::Deserialize;

use crate::error::GatewayError;

#[derive(Debug, Clone, Deserialize)]
pub struct StoredBlob {
    pub blob_id: String,
}

pub struct PublisherClient {
    http: reqwest::Client,
    publisher_url: String,
    aggregator_url: String,
}

impl PublisherClient {
    pub fn new(publisher_url: String, aggregator_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            publisher_url,
            aggregator_url,
        }
    }

    /// Store a blob for `epochs` storage epochs.
    pub async fn put_blob(&self, bytes: Vec<u8>, epochs: u64) -> Result<StoredBlob, GatewayError> {
        let url = format!("{}/v1/blobs?epochs={}", self.publisher_url, epochs);
        let resp = self
            .http
            .put(&url)
            .body(bytes)
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GatewayError::BlobStore(format!("{status}: {body}")));
        }
        resp.json()
            .await
            .map_err(|e| GatewayError::BlobStore(format!("malformed response: {e}")))
    }

    /// Aggregator read URL for a stored blob.
    pub fn blob_url(&self, blob_id: &str) -> String {
        format!("{}/v1/blobs/{}", self.aggregator_url, blob_id)
    }
}
