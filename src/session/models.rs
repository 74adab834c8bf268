use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::event::{EventLog, GameEvent, PlayerRef};
use crate::shared::{GameId, SeasonId};

/// Lifecycle of a live game.
///
/// `Uploading` sits between `Active` and `Ended` while the log is being
/// persisted; nothing can be recorded until it settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SessionState {
    Setup,
    Active,
    Uploading,
    Ended,
}

/// Operator input for starting a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewGame {
    pub opponent: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub season_ref: Option<SeasonId>,
}

/// Players that can be recorded against in this session, resolved from the
/// directory before the session opened.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    players: Vec<PlayerRef>,
}

impl Roster {
    pub fn new(players: Vec<PlayerRef>) -> Self {
        Self { players }
    }

    pub fn players(&self) -> &[PlayerRef] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Finds a player by external id, then by display name (ignoring case),
    /// then by directory id.
    pub fn resolve(&self, key: &str) -> Option<&PlayerRef> {
        let key = key.trim();
        self.players
            .iter()
            .find(|p| p.external_id == key)
            .or_else(|| {
                self.players
                    .iter()
                    .find(|p| p.display_name.eq_ignore_ascii_case(key))
            })
            .or_else(|| {
                let id = key.parse::<i64>().ok()?;
                self.players.iter().find(|p| p.backend_id == Some(id))
            })
    }
}

/// One tracked game. Owns its event log exclusively.
#[derive(Debug, Clone, Serialize)]
pub struct GameSession {
    pub id: GameId,
    pub opponent: String,
    pub date: NaiveDate,
    pub season_ref: Option<SeasonId>,
    pub roster: Roster,
    pub started_at: DateTime<Utc>,
    state: SessionState,
    event_log: EventLog,
}

impl GameSession {
    pub(crate) fn open(id: GameId, game: NewGame, roster: Roster) -> Self {
        Self {
            id,
            opponent: game.opponent,
            date: game.date,
            season_ref: game.season_ref,
            roster,
            started_at: Utc::now(),
            state: SessionState::Active,
            event_log: EventLog::new(id),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn log(&self) -> &EventLog {
        &self.event_log
    }

    pub fn events(&self) -> &[GameEvent] {
        self.event_log.events()
    }

    pub(crate) fn set_state(&mut self, state: SessionState) {
        self.state = state;
    }

    pub(crate) fn log_mut(&mut self) -> &mut EventLog {
        &mut self.event_log
    }
}
