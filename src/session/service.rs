use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};
use tracing::{error, info, instrument, warn};

use super::{
    directory::GameDirectory,
    errors::SessionError,
    machine::GameSessionStateMachine,
    models::{GameSession, NewGame},
    types::{ActionRequest, RosterResponse, SessionView, ShotRequest, StatsResponse},
};
use crate::court::{CoordinateMapper, DEFAULT_ACTION_POINT};
use crate::event::{ActionKind, GameEvent, LiveEventBus, LiveUpdate, PlayerRef};
use crate::upload::{BulkUploadAdapter, UploadError, UploadSummary};

/// Service for running one live game at a time.
///
/// All operations go through the state machine behind an async mutex. The
/// upload itself runs with the lock released; the `Uploading` state keeps
/// recordings out until it settles.
pub struct LiveGameService {
    machine: Arc<Mutex<GameSessionStateMachine>>,
    directory: Arc<dyn GameDirectory>,
    uploader: BulkUploadAdapter,
    mapper: CoordinateMapper,
    bus: LiveEventBus,
}

impl LiveGameService {
    pub fn new(
        directory: Arc<dyn GameDirectory>,
        uploader: BulkUploadAdapter,
        bus: LiveEventBus,
    ) -> Self {
        Self {
            machine: Arc::new(Mutex::new(GameSessionStateMachine::new())),
            directory,
            uploader,
            mapper: CoordinateMapper::new(),
            bus,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LiveUpdate> {
        self.bus.subscribe()
    }

    /// Players and seasons straight from the directory.
    #[instrument(skip(self))]
    pub async fn roster(&self) -> Result<RosterResponse, SessionError> {
        let players = self.directory.list_players().await?;
        let seasons = self.directory.list_seasons().await?;

        Ok(RosterResponse {
            players: players.into_iter().map(PlayerRef::from).collect(),
            seasons,
        })
    }

    #[instrument(skip(self))]
    pub async fn create_session(&self, game: NewGame) -> Result<SessionView, SessionError> {
        let mut machine = self.machine.lock().await;
        let session = machine
            .create_session(self.directory.as_ref(), game)
            .await?;

        self.bus.emit(LiveUpdate::SessionStarted {
            game_id: session.id,
            opponent: session.opponent.clone(),
        });
        Ok(Self::view_of(&machine))
    }

    pub async fn view(&self) -> SessionView {
        Self::view_of(&*self.machine.lock().await)
    }

    pub async fn live_stats(&self) -> StatsResponse {
        let machine = self.machine.lock().await;
        StatsResponse {
            players: machine.live_stats(),
            team: machine.team_totals(),
        }
    }

    /// Maps the pointer onto the court and records a make or miss.
    #[instrument(skip(self, request), fields(player = ?request.player))]
    pub async fn record_shot(&self, request: ShotRequest) -> Result<GameEvent, SessionError> {
        let mut machine = self.machine.lock().await;
        machine.ensure_recording("record a shot")?;

        let player = machine.resolve_player(request.player.as_deref())?;
        let point = self
            .mapper
            .to_court_space(request.pointer, request.surface.as_ref())?;
        let event = machine.record_shot(player.as_ref(), point, request.button.is_make())?;

        self.bus.emit(LiveUpdate::EventRecorded {
            event: event.clone(),
            stats: machine.live_stats(),
        });
        Ok(event)
    }

    /// Records a quick or free-text action.
    #[instrument(skip(self, request), fields(player = ?request.player, action = %request.action))]
    pub async fn record_action(&self, request: ActionRequest) -> Result<GameEvent, SessionError> {
        let mut machine = self.machine.lock().await;
        machine.ensure_recording("record an action")?;

        let player = machine.resolve_player(request.player.as_deref())?;
        let point = request.point.unwrap_or(DEFAULT_ACTION_POINT);
        let event = machine.record_action(
            player.as_ref(),
            ActionKind::Custom(request.action),
            point,
        )?;

        self.bus.emit(LiveUpdate::EventRecorded {
            event: event.clone(),
            stats: machine.live_stats(),
        });
        Ok(event)
    }

    /// Uploads the log and ends the game. On failure the session is back to
    /// `Active` with its log untouched and this can simply be called again.
    ///
    /// The upload runs on its own task, so the session leaves `Uploading`
    /// even when the caller stops waiting.
    #[instrument(skip(self))]
    pub async fn end_session(&self) -> Result<UploadSummary, SessionError> {
        let snapshot = self.machine.lock().await.begin_upload()?;
        let game_id = snapshot.id;

        let upload = tokio::spawn(Self::settle_upload(
            self.machine.clone(),
            self.uploader.clone(),
            self.bus.clone(),
            snapshot,
        ));

        match upload.await {
            Ok(result) => result,
            Err(join_err) => {
                error!(game_id, %join_err, "Upload task did not finish");
                let err = UploadError::Interrupted(join_err.to_string());
                let reason = err.to_string();
                let result = self.machine.lock().await.finish_upload(Err(err));
                self.bus.emit(LiveUpdate::UploadFailed { game_id, reason });
                result
            }
        }
    }

    /// Maps and sends the snapshot, then moves the machine out of
    /// `Uploading`. `UploadStarted` only goes out once the batch is built.
    async fn settle_upload(
        machine: Arc<Mutex<GameSessionStateMachine>>,
        uploader: BulkUploadAdapter,
        bus: LiveEventBus,
        snapshot: GameSession,
    ) -> Result<UploadSummary, SessionError> {
        let outcome = match uploader.build_batch(&snapshot) {
            Ok(batch) => {
                bus.emit(LiveUpdate::UploadStarted {
                    game_id: batch.game_id,
                    events: batch.events.len(),
                });
                uploader.send(batch).await
            }
            Err(err) => Err(err.into()),
        };
        let reason = outcome.as_ref().err().map(ToString::to_string);
        let result = machine.lock().await.finish_upload(outcome);

        match (&result, reason) {
            (Ok(summary), _) => {
                info!(game_id = summary.game_id, "Game uploaded");
                bus.emit(LiveUpdate::SessionEnded {
                    summary: summary.clone(),
                });
            }
            (Err(err), reason) => {
                warn!(game_id = snapshot.id, %err, "Game upload failed");
                bus.emit(LiveUpdate::UploadFailed {
                    game_id: snapshot.id,
                    reason: reason.unwrap_or_else(|| err.to_string()),
                });
            }
        }
        result
    }

    #[instrument(skip(self))]
    pub async fn reset_session(&self) -> Result<SessionView, SessionError> {
        let mut machine = self.machine.lock().await;
        machine.reset_session()?;
        self.bus.emit(LiveUpdate::SessionReset);
        Ok(Self::view_of(&machine))
    }

    fn view_of(machine: &GameSessionStateMachine) -> SessionView {
        match machine.session() {
            Some(session) => SessionView::of(
                session,
                StatsResponse {
                    players: machine.live_stats(),
                    team: machine.team_totals(),
                },
            ),
            None => SessionView::setup(),
        }
    }
}
