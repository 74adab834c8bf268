use axum::{
    extract::{ws::WebSocket, State, WebSocketUpgrade},
    response::Response,
};
use serde_json::json;
use tracing::{info, warn};

use super::socket::LiveConnection;
use crate::shared::AppState;

/// WebSocket endpoint for display clients
/// GET /session/live
pub async fn live_socket(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    info!("Live display connection requested");
    ws.on_upgrade(move |socket| handle_live_connection(socket, state))
}

async fn handle_live_connection(socket: WebSocket, state: AppState) {
    // Subscribe before the snapshot so nothing falls between the two.
    let updates = state.service.subscribe();
    let mut connection = LiveConnection::new(Box::new(socket), updates);

    let snapshot = json!({ "type": "snapshot", "session": state.service.view().await });
    if let Err(e) = connection.send_json(&snapshot).await {
        warn!(error = ?e, "Could not send initial snapshot");
        return;
    }

    info!("Live display connected");
    if let Err(e) = connection.run().await {
        warn!(error = ?e, "Live display connection ended with error");
    }
    info!("Live display disconnected");
}
