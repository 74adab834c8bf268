use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::shared::{BackendId, GameId, SeasonId};

/// One event in the ingestion vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestEvent {
    pub player_id: BackendId,
    pub season_id: SeasonId,
    pub action: String,
    pub x: f64,
    pub y: f64,
}

/// Request body for the bulk ingestion endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestBatch {
    pub game_id: GameId,
    pub events: Vec<IngestEvent>,
}

/// What the ingestion endpoint reported back on success.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngestReceipt {
    pub created: Option<usize>,
    pub message: Option<String>,
}

impl IngestReceipt {
    /// Reads a success body. The endpoint either reports a count, echoes the
    /// stored records, or only sends a message.
    pub fn from_body(body: &Value) -> Self {
        match body {
            Value::Array(records) => Self {
                created: Some(records.len()),
                message: None,
            },
            Value::Object(fields) => {
                let count = ["created", "created_count", "count"]
                    .iter()
                    .find_map(|key| fields.get(*key).and_then(Value::as_u64))
                    .map(|count| count as usize);
                let echoed = ["events", "records"]
                    .iter()
                    .find_map(|key| fields.get(*key).and_then(Value::as_array))
                    .map(Vec::len);

                Self {
                    created: count.or(echoed),
                    message: fields
                        .get("message")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                }
            }
            _ => Self::default(),
        }
    }
}

/// Result of a successful end-of-game upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadSummary {
    pub game_id: GameId,
    pub events_sent: usize,
    pub created: Option<usize>,
    pub message: Option<String>,
}
