use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::error;

use crate::session::{LiveGameService, SessionError};

/// Directory id of a player.
pub type BackendId = i64;
/// Directory id of a game; doubles as the session id.
pub type GameId = i64;
pub type SeasonId = i64;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<LiveGameService>,
}

impl AppState {
    pub fn new(service: Arc<LiveGameService>) -> Self {
        Self { service }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unprocessable: {0}")]
    UnprocessableEntity(String),

    #[error("Upstream error: {0}")]
    BadGateway(String),
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        let message = err.to_string();
        match err {
            SessionError::Validation(_) | SessionError::Mapping(_) => AppError::BadRequest(message),
            SessionError::InvalidState { .. } => AppError::Conflict(message),
            SessionError::Lookup(_) => AppError::UnprocessableEntity(message),
            SessionError::Upload(_) | SessionError::Directory(_) => AppError::BadGateway(message),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppError::BadGateway(msg) => {
                error!(error = %msg, "Upstream call failed");
                (StatusCode::BAD_GATEWAY, msg)
            }
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}
