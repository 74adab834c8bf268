use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::directory::DirectorySeason;
use super::models::{GameSession, SessionState};
use crate::court::{CourtPoint, PointerPosition, SurfaceBounds};
use crate::event::{GameEvent, PlayerRef};
use crate::shared::{GameId, SeasonId};
use crate::stats::{PlayerAggregate, PlayerStatLine};

/// Which pointer button placed a shot. Primary records a make.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
}

impl PointerButton {
    pub fn is_make(self) -> bool {
        matches!(self, PointerButton::Primary)
    }
}

/// Request body for POST /session/shots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotRequest {
    #[serde(default)]
    pub player: Option<String>,
    pub pointer: PointerPosition,
    #[serde(default)]
    pub surface: Option<SurfaceBounds>,
    #[serde(default)]
    pub button: PointerButton,
}

/// Request body for POST /session/actions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRequest {
    #[serde(default)]
    pub player: Option<String>,
    pub action: String,
    /// Quick actions land at the default point when omitted.
    #[serde(default)]
    pub point: Option<CourtPoint>,
}

/// Response for GET /roster: what the setup screen offers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterResponse {
    pub players: Vec<PlayerRef>,
    pub seasons: Vec<DirectorySeason>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsResponse {
    pub players: Vec<PlayerStatLine>,
    pub team: PlayerAggregate,
}

/// Snapshot of the session for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionView {
    pub state: SessionState,
    pub game_id: Option<GameId>,
    pub opponent: Option<String>,
    pub date: Option<NaiveDate>,
    pub season_ref: Option<SeasonId>,
    pub roster: Vec<PlayerRef>,
    pub events: Vec<GameEvent>,
    pub stats: StatsResponse,
}

impl SessionView {
    pub fn setup() -> Self {
        Self {
            state: SessionState::Setup,
            game_id: None,
            opponent: None,
            date: None,
            season_ref: None,
            roster: Vec::new(),
            events: Vec::new(),
            stats: StatsResponse {
                players: Vec::new(),
                team: PlayerAggregate::default(),
            },
        }
    }

    pub fn of(session: &GameSession, stats: StatsResponse) -> Self {
        Self {
            state: session.state(),
            game_id: Some(session.id),
            opponent: Some(session.opponent.clone()),
            date: Some(session.date),
            season_ref: session.season_ref,
            roster: session.roster.players().to_vec(),
            events: session.events().to_vec(),
            stats,
        }
    }
}
