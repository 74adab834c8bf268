use thiserror::Error;

use crate::event::EventId;

/// Something in the log cannot be expressed in the ingestion schema.
/// Always raised before any network call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LookupError {
    #[error("Player {display_name} has no directory id")]
    UnresolvedPlayer { display_name: String },

    #[error("Player {0} is not on the roster")]
    UnknownPlayer(String),

    #[error("No season selected and no default season configured")]
    MissingSeason,

    #[error("Event {event_id}: custom action \"{label}\" has no ingestion name")]
    UnmappedAction { event_id: EventId, label: String },
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error("Ingestion transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Ingestion rejected batch ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("Ingestion response decode error: {0}")]
    Decode(String),

    #[error("Upload interrupted: {0}")]
    Interrupted(String),
}
