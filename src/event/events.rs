use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::EnumString;

use crate::court::CourtPoint;
use crate::shared::{BackendId, GameId};

/// Points credited for a made field goal. Three-point detection is not done.
pub const MADE_SHOT_POINTS: u32 = 2;

pub type EventId = u64;

/// A player as the live screen knows them.
///
/// `backend_id` is the directory's id and must be resolved before the player
/// can be recorded against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerRef {
    pub display_name: String,
    pub external_id: String,
    pub backend_id: Option<BackendId>,
}

impl PlayerRef {
    pub fn unresolved(display_name: impl Into<String>) -> Self {
        let display_name = display_name.into();
        let external_id = Self::external_id_for(&display_name);
        Self {
            display_name,
            external_id,
            backend_id: None,
        }
    }

    pub fn resolved(
        display_name: impl Into<String>,
        external_id: impl Into<String>,
        backend_id: BackendId,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            external_id: external_id.into(),
            backend_id: Some(backend_id),
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.backend_id.is_some()
    }

    /// Directory convention for players created from the dashboard:
    /// lowercase name with whitespace runs replaced by `_`.
    pub fn external_id_for(display_name: &str) -> String {
        display_name
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join("_")
    }
}

/// Everything the operator can record on the court.
///
/// Parsing is case-insensitive and accepts both the display names and the
/// ingestion vocabulary; anything else becomes `Custom`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString)]
#[serde(tag = "kind", content = "label", rename_all = "snake_case")]
#[strum(ascii_case_insensitive)]
pub enum ActionKind {
    #[strum(serialize = "made_shot", serialize = "made shot")]
    MadeShot,
    #[strum(serialize = "missed_shot", serialize = "missed shot")]
    MissedShot,
    #[strum(serialize = "block")]
    Block,
    #[strum(serialize = "assist")]
    Assist,
    #[strum(serialize = "steal")]
    Steal,
    #[strum(serialize = "turnover")]
    Turnover,
    #[strum(
        serialize = "off_reb",
        serialize = "off reb",
        serialize = "offensive_rebound",
        serialize = "offensive rebound"
    )]
    OffensiveRebound,
    #[strum(
        serialize = "def_reb",
        serialize = "def reb",
        serialize = "defensive_rebound",
        serialize = "defensive rebound"
    )]
    DefensiveRebound,
    #[strum(default)]
    Custom(String),
}

impl ActionKind {
    /// Normalizes operator-typed text. Returns `None` for blank input.
    pub fn from_label(label: &str) -> Option<ActionKind> {
        let label = label.trim();
        if label.is_empty() {
            return None;
        }

        Some(
            label
                .parse::<ActionKind>()
                .unwrap_or_else(|_| ActionKind::Custom(label.to_string())),
        )
    }

    pub fn shot(made: bool) -> ActionKind {
        if made {
            ActionKind::MadeShot
        } else {
            ActionKind::MissedShot
        }
    }

    pub fn point_value(&self) -> u32 {
        match self {
            ActionKind::MadeShot => MADE_SHOT_POINTS,
            _ => 0,
        }
    }

    pub fn is_shot(&self) -> bool {
        matches!(self, ActionKind::MadeShot | ActionKind::MissedShot)
    }

    pub fn is_rebound(&self) -> bool {
        matches!(
            self,
            ActionKind::OffensiveRebound | ActionKind::DefensiveRebound
        )
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, ActionKind::Custom(_))
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActionKind::MadeShot => "Made Shot",
            ActionKind::MissedShot => "Missed Shot",
            ActionKind::Block => "Block",
            ActionKind::Assist => "Assist",
            ActionKind::Steal => "Steal",
            ActionKind::Turnover => "Turnover",
            ActionKind::OffensiveRebound => "Offensive Rebound",
            ActionKind::DefensiveRebound => "Defensive Rebound",
            ActionKind::Custom(label) => label.as_str(),
        };
        f.write_str(name)
    }
}

/// A recorded action. Never changes once appended to a log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    pub id: EventId,
    pub session_id: GameId,
    pub player: PlayerRef,
    pub action: ActionKind,
    pub point: CourtPoint,
    pub timestamp: DateTime<Utc>,
}

/// Append-only, ordered event log owned by one session.
#[derive(Debug, Clone, Serialize)]
pub struct EventLog {
    session_id: GameId,
    events: Vec<GameEvent>,
    #[serde(skip)]
    next_id: EventId,
}

impl EventLog {
    pub fn new(session_id: GameId) -> Self {
        Self {
            session_id,
            events: Vec::new(),
            next_id: 1,
        }
    }

    pub fn session_id(&self) -> GameId {
        self.session_id
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub(crate) fn append(
        &mut self,
        player: PlayerRef,
        action: ActionKind,
        point: CourtPoint,
    ) -> &GameEvent {
        let event = GameEvent {
            id: self.next_id,
            session_id: self.session_id,
            player,
            action,
            point,
            timestamp: Utc::now(),
        };
        self.next_id += 1;
        self.events.push(event);
        &self.events[self.events.len() - 1]
    }
}
