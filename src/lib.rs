// Library crate for the courtside live capture server
// This file exposes the public API for integration tests

pub mod config;
pub mod court;
pub mod event;
pub mod live;
pub mod session;
pub mod shared;
pub mod stats;
pub mod upload;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

// Re-export commonly used types for easier access in tests
pub use config::AppConfig;
pub use court::{CoordinateMapper, CourtPoint, SurfaceBounds, COURT_BOUNDS};
pub use event::{ActionKind, EventLog, GameEvent, LiveEventBus, LiveUpdate, PlayerRef};
pub use session::{GameDirectory, GameSessionStateMachine, LiveGameService, SessionState};
pub use shared::{AppError, AppState};
pub use stats::StatsAggregator;
pub use upload::{BulkUploadAdapter, CustomActionPolicy, EventIngestion};

/// Full HTTP surface of the server.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "Courtside live capture" }))
        .route("/session/live", get(live::live_socket))
        .merge(session::routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
