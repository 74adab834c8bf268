use axum::{extract::State, http::StatusCode, Json};
use tracing::{info, instrument};

use super::{
    models::NewGame,
    types::{ActionRequest, RosterResponse, SessionView, ShotRequest, StatsResponse},
};
use crate::event::GameEvent;
use crate::shared::{AppError, AppState};
use crate::upload::UploadSummary;

/// GET /roster
#[instrument(name = "roster", skip(state))]
pub async fn roster(State(state): State<AppState>) -> Result<Json<RosterResponse>, AppError> {
    Ok(Json(state.service.roster().await?))
}

/// HTTP handler for starting a game
///
/// POST /session
/// Creates the game in the directory and opens recording
#[instrument(name = "create_session", skip(state))]
pub async fn create_session(
    State(state): State<AppState>,
    Json(game): Json<NewGame>,
) -> Result<(StatusCode, Json<SessionView>), AppError> {
    let view = state.service.create_session(game).await?;
    info!(game_id = ?view.game_id, "Session created");
    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /session
pub async fn get_session(State(state): State<AppState>) -> Json<SessionView> {
    Json(state.service.view().await)
}

/// POST /session/shots
#[instrument(name = "record_shot", skip(state))]
pub async fn record_shot(
    State(state): State<AppState>,
    Json(request): Json<ShotRequest>,
) -> Result<(StatusCode, Json<GameEvent>), AppError> {
    let event = state.service.record_shot(request).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// POST /session/actions
#[instrument(name = "record_action", skip(state))]
pub async fn record_action(
    State(state): State<AppState>,
    Json(request): Json<ActionRequest>,
) -> Result<(StatusCode, Json<GameEvent>), AppError> {
    let event = state.service.record_action(request).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// GET /session/stats
pub async fn live_stats(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.service.live_stats().await)
}

/// POST /session/end
///
/// Uploads the whole log; on failure the session stays active for a retry
#[instrument(name = "end_session", skip(state))]
pub async fn end_session(State(state): State<AppState>) -> Result<Json<UploadSummary>, AppError> {
    let summary = state.service.end_session().await?;
    info!(
        game_id = summary.game_id,
        events_sent = summary.events_sent,
        "Session ended"
    );
    Ok(Json(summary))
}

/// POST /session/reset
#[instrument(name = "reset_session", skip(state))]
pub async fn reset_session(State(state): State<AppState>) -> Result<Json<SessionView>, AppError> {
    Ok(Json(state.service.reset_session().await?))
}
