use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::{
    directory::{CreateGameRequest, GameDirectory},
    errors::SessionError,
    models::{GameSession, NewGame, Roster, SessionState},
};
use crate::court::CourtPoint;
use crate::event::{ActionKind, EventRecorder, GameEvent, PlayerRef};
use crate::stats::{PlayerAggregate, PlayerStatLine, StatsAggregator};
use crate::upload::{BulkUploadAdapter, LookupError, UploadError, UploadSummary};

/// Owns the current game and every transition of its lifecycle.
///
/// `Setup` is represented by having no session at all. Every operation
/// attempted from the wrong state fails with `InvalidState` and changes
/// nothing.
#[derive(Debug, Default)]
pub struct GameSessionStateMachine {
    session: Option<GameSession>,
    recorder: EventRecorder,
    aggregator: StatsAggregator,
}

impl GameSessionStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.session
            .as_ref()
            .map(GameSession::state)
            .unwrap_or(SessionState::Setup)
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    /// Setup -> Active. The roster is loaded before the game is created so a
    /// directory outage leaves nothing behind on the remote side.
    #[instrument(skip(self, directory))]
    pub async fn create_session(
        &mut self,
        directory: &dyn GameDirectory,
        game: NewGame,
    ) -> Result<&GameSession, SessionError> {
        self.ensure_state(SessionState::Setup, "create a session")?;

        let opponent = game.opponent.trim().to_string();
        if opponent.is_empty() {
            return Err(SessionError::Validation(
                "Please enter an opponent".to_string(),
            ));
        }

        let players = directory.list_players().await.inspect_err(|err| {
            warn!(%err, "Could not load roster; staying in setup");
        })?;
        let roster = Roster::new(players.into_iter().map(PlayerRef::from).collect());

        let request = CreateGameRequest {
            opponent: opponent.clone(),
            date: game.date,
            external_id: Uuid::new_v4().to_string(),
        };
        let created = directory.create_game(&request).await.inspect_err(|err| {
            warn!(%err, "Could not create game; staying in setup");
        })?;

        info!(
            game_id = created.id,
            roster_size = roster.len(),
            "Session opened"
        );

        let session = self.session.insert(GameSession::open(
            created.id,
            NewGame { opponent, ..game },
            roster,
        ));
        Ok(session)
    }

    pub fn ensure_recording(&self, operation: &'static str) -> Result<(), SessionError> {
        self.ensure_state(SessionState::Active, operation)
    }

    /// Looks a player up on the session roster. A blank key means nobody
    /// was selected, which the recorder reports.
    pub fn resolve_player(&self, key: Option<&str>) -> Result<Option<PlayerRef>, SessionError> {
        let Some(key) = key.map(str::trim).filter(|key| !key.is_empty()) else {
            return Ok(None);
        };

        let session = self.session.as_ref().ok_or(SessionError::InvalidState {
            operation: "select a player",
            state: SessionState::Setup,
        })?;

        session
            .roster
            .resolve(key)
            .cloned()
            .map(Some)
            .ok_or_else(|| LookupError::UnknownPlayer(key.to_string()).into())
    }

    pub fn record_shot(
        &mut self,
        player: Option<&PlayerRef>,
        point: CourtPoint,
        made: bool,
    ) -> Result<GameEvent, SessionError> {
        let recorder = self.recorder;
        let session = self.session_in(SessionState::Active, "record a shot")?;
        Ok(recorder.record_shot(session.log_mut(), player, point, made)?)
    }

    pub fn record_action(
        &mut self,
        player: Option<&PlayerRef>,
        action: ActionKind,
        point: CourtPoint,
    ) -> Result<GameEvent, SessionError> {
        let recorder = self.recorder;
        let session = self.session_in(SessionState::Active, "record an action")?;
        Ok(recorder.record_action(session.log_mut(), player, action, point)?)
    }

    pub fn live_stats(&self) -> Vec<PlayerStatLine> {
        self.aggregator.stat_lines(self.events())
    }

    pub fn team_totals(&self) -> PlayerAggregate {
        self.aggregator.team_totals(self.events())
    }

    /// Active -> Uploading. Returns the snapshot to upload; recordings are
    /// refused until `finish_upload` settles the state.
    pub fn begin_upload(&mut self) -> Result<GameSession, SessionError> {
        let session = self.session_in(SessionState::Active, "end the session")?;
        if session.log().is_empty() {
            return Err(SessionError::Validation("No events to upload".to_string()));
        }

        session.set_state(SessionState::Uploading);
        info!(
            game_id = session.id,
            events = session.log().len(),
            "Uploading event log"
        );
        Ok(session.clone())
    }

    /// Uploading -> Ended on success, back to Active on failure so the
    /// operator can retry with the log intact.
    pub fn finish_upload(
        &mut self,
        outcome: Result<UploadSummary, UploadError>,
    ) -> Result<UploadSummary, SessionError> {
        let session = self.session_in(SessionState::Uploading, "finish an upload")?;

        match outcome {
            Ok(summary) => {
                session.set_state(SessionState::Ended);
                info!(
                    game_id = session.id,
                    events_sent = summary.events_sent,
                    "Session ended"
                );
                Ok(summary)
            }
            Err(err) => {
                session.set_state(SessionState::Active);
                warn!(game_id = session.id, %err, "Upload failed; session stays active");
                Err(err.into())
            }
        }
    }

    /// Active -> Ended through a single upload call.
    pub async fn end_session(
        &mut self,
        uploader: &BulkUploadAdapter,
    ) -> Result<UploadSummary, SessionError> {
        let snapshot = self.begin_upload()?;
        let outcome = uploader.upload(&snapshot).await;
        self.finish_upload(outcome)
    }

    /// Ended -> Setup, discarding the finished game. A no-op in Setup.
    pub fn reset_session(&mut self) -> Result<(), SessionError> {
        match self.state() {
            SessionState::Setup => Ok(()),
            SessionState::Ended => {
                if let Some(session) = self.session.take() {
                    info!(game_id = session.id, "Session reset");
                }
                Ok(())
            }
            state => Err(SessionError::InvalidState {
                operation: "reset the session",
                state,
            }),
        }
    }

    fn events(&self) -> &[GameEvent] {
        self.session
            .as_ref()
            .map(GameSession::events)
            .unwrap_or(&[])
    }

    fn ensure_state(
        &self,
        expected: SessionState,
        operation: &'static str,
    ) -> Result<(), SessionError> {
        let state = self.state();
        if state == expected {
            Ok(())
        } else {
            Err(SessionError::InvalidState { operation, state })
        }
    }

    fn session_in(
        &mut self,
        expected: SessionState,
        operation: &'static str,
    ) -> Result<&mut GameSession, SessionError> {
        let state = self.state();
        match self.session.as_mut() {
            Some(session) if session.state() == expected => Ok(session),
            _ => Err(SessionError::InvalidState { operation, state }),
        }
    }
}
