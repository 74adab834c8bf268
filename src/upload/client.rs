use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

use super::{
    errors::UploadError,
    types::{IngestBatch, IngestReceipt},
};
use crate::shared::GameId;

/// Port to the bulk ingestion endpoint.
#[async_trait]
pub trait EventIngestion: Send + Sync {
    async fn submit(&self, batch: &IngestBatch) -> Result<IngestReceipt, UploadError>;
}

// Thin wrapper around reqwest for the ingestion call.
// A `{game_id}` in the url is replaced with the batch's game id.
#[derive(Clone)]
pub struct HttpIngestionClient {
    http: Client,
    pub url: String,
}

impl HttpIngestionClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }

    pub fn url_for(&self, game_id: GameId) -> String {
        self.url.replace("{game_id}", &game_id.to_string())
    }
}

#[async_trait]
impl EventIngestion for HttpIngestionClient {
    async fn submit(&self, batch: &IngestBatch) -> Result<IngestReceipt, UploadError> {
        let url = self.url_for(batch.game_id);
        debug!(
            %url,
            game_id = batch.game_id,
            events = batch.events.len(),
            "Posting event batch"
        );

        let res = self
            .http
            .post(url)
            .json(batch)
            .send()
            .await
            .map_err(UploadError::Transport)?;
        let status = res.status();
        let body = res.text().await.map_err(UploadError::Transport)?;

        // Non-2xx bodies go back to the operator untouched.
        if !status.is_success() {
            warn!(status = status.as_u16(), game_id = batch.game_id, "Batch rejected");
            return Err(UploadError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let value: serde_json::Value = serde_json::from_str(&body).map_err(|err| {
            UploadError::Decode(format!("{err}; body: {}", truncate(&body, 500)))
        })?;
        Ok(IngestReceipt::from_body(&value))
    }
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}
