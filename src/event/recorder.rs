use thiserror::Error;
use tracing::debug;

use super::events::{ActionKind, EventLog, GameEvent, PlayerRef};
use crate::court::CourtPoint;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("Please select a player first")]
    NoPlayerSelected,

    #[error("Please enter an action")]
    BlankAction,

    #[error("Player {display_name} has no directory id")]
    UnresolvedPlayer { display_name: String },
}

/// Validates operator input and appends events to a session log.
///
/// Whether the session accepts events at all is decided by the state
/// machine, which is the only holder of a mutable log.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventRecorder;

impl EventRecorder {
    pub fn new() -> Self {
        Self
    }

    pub fn record_shot(
        &self,
        log: &mut EventLog,
        player: Option<&PlayerRef>,
        point: CourtPoint,
        made: bool,
    ) -> Result<GameEvent, RecordError> {
        self.append(log, player, ActionKind::shot(made), point)
    }

    /// Records any action. Free-text labels naming a fixed action are
    /// normalized first, so "steal" typed by hand counts as a steal.
    pub fn record_action(
        &self,
        log: &mut EventLog,
        player: Option<&PlayerRef>,
        action: ActionKind,
        point: CourtPoint,
    ) -> Result<GameEvent, RecordError> {
        let action = match action {
            ActionKind::Custom(label) => {
                ActionKind::from_label(&label).ok_or(RecordError::BlankAction)?
            }
            fixed => fixed,
        };
        self.append(log, player, action, point)
    }

    fn append(
        &self,
        log: &mut EventLog,
        player: Option<&PlayerRef>,
        action: ActionKind,
        point: CourtPoint,
    ) -> Result<GameEvent, RecordError> {
        let player = player.ok_or(RecordError::NoPlayerSelected)?;
        if !player.is_resolved() {
            return Err(RecordError::UnresolvedPlayer {
                display_name: player.display_name.clone(),
            });
        }

        let event = log.append(player.clone(), action, point).clone();
        debug!(
            session_id = event.session_id,
            event_id = event.id,
            player = %event.player.display_name,
            action = %event.action,
            x = event.point.x(),
            y = event.point.y(),
            "Event recorded"
        );
        Ok(event)
    }
}
