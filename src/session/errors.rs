use thiserror::Error;

use super::{directory::DirectoryError, models::SessionState};
use crate::court::MappingError;
use crate::event::RecordError;
use crate::upload::{LookupError, UploadError};

/// Everything that can go wrong while capturing a live game.
///
/// Validation and mapping failures are the operator's to fix and leave the
/// session untouched. Lookup and upload failures on `end_session` keep the
/// session `Active` with its log intact.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Upload(UploadError),

    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error("Cannot {operation} while the session is {state}")]
    InvalidState {
        operation: &'static str,
        state: SessionState,
    },
}

impl From<UploadError> for SessionError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::Lookup(lookup) => SessionError::Lookup(lookup),
            other => SessionError::Upload(other),
        }
    }
}

impl From<RecordError> for SessionError {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::UnresolvedPlayer { display_name } => {
                SessionError::Lookup(LookupError::UnresolvedPlayer { display_name })
            }
            other => SessionError::Validation(other.to_string()),
        }
    }
}
