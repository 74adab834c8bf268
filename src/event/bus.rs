use serde::Serialize;
use tokio::sync::broadcast;
use tracing::debug;

use super::events::GameEvent;
use crate::shared::GameId;
use crate::stats::PlayerStatLine;
use crate::upload::UploadSummary;

/// Updates pushed to anyone watching the live game.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LiveUpdate {
    SessionStarted {
        game_id: GameId,
        opponent: String,
    },
    EventRecorded {
        event: GameEvent,
        stats: Vec<PlayerStatLine>,
    },
    UploadStarted {
        game_id: GameId,
        events: usize,
    },
    SessionEnded {
        summary: UploadSummary,
    },
    UploadFailed {
        game_id: GameId,
        reason: String,
    },
    SessionReset,
}

/// Fan-out channel for live updates. Cheap to clone.
#[derive(Debug, Clone)]
pub struct LiveEventBus {
    sender: broadcast::Sender<LiveUpdate>,
}

impl LiveEventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Emits to all current subscribers. Nobody listening is not an error.
    pub fn emit(&self, update: LiveUpdate) {
        match self.sender.send(update) {
            Ok(receivers) => debug!(receivers, "Live update emitted"),
            Err(_) => debug!("Live update emitted with no receivers"),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LiveUpdate> {
        self.sender.subscribe()
    }
}

impl Default for LiveEventBus {
    fn default() -> Self {
        Self::new(256)
    }
}
