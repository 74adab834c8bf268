// Bulk persistence of a finished game's event log
//
// The adapter turns the log into the ingestion vocabulary and sends it as
// one batch; the client is the HTTP side of that call.

// Public API - what other modules can use
pub use adapter::{external_action_name, BulkUploadAdapter, CustomActionPolicy};
pub use client::{EventIngestion, HttpIngestionClient};
pub use errors::{LookupError, UploadError};
pub use types::{IngestBatch, IngestEvent, IngestReceipt, UploadSummary};

// Internal modules
mod adapter;
mod client;
mod errors;
mod types;
