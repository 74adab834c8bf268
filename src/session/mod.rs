// Game session lifecycle
//
// The state machine owns the single live game; the service puts it behind
// a mutex and wires in the directory, the uploader and the live bus. The
// handlers are the HTTP surface of the service.

use axum::{
    routing::{get, post},
    Router,
};

use crate::shared::AppState;

// Public API - what other modules can use
pub use directory::{
    CreateGameRequest, CreatedGame, DirectoryError, DirectoryPlayer, DirectorySeason,
    GameDirectory, HttpDirectoryClient,
};
pub use errors::SessionError;
pub use machine::GameSessionStateMachine;
pub use models::{GameSession, NewGame, Roster, SessionState};
pub use service::LiveGameService;
pub use types::{
    ActionRequest, PointerButton, RosterResponse, SessionView, ShotRequest, StatsResponse,
};

// Internal modules
mod directory;
mod errors;
mod handlers;
mod machine;
pub mod models;
mod service;
mod types;

/// Session capture routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/roster", get(handlers::roster))
        .route(
            "/session",
            get(handlers::get_session).post(handlers::create_session),
        )
        .route("/session/shots", post(handlers::record_shot))
        .route("/session/actions", post(handlers::record_action))
        .route("/session/stats", get(handlers::live_stats))
        .route("/session/end", post(handlers::end_session))
        .route("/session/reset", post(handlers::reset_session))
}
