use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::{
    client::EventIngestion,
    errors::{LookupError, UploadError},
    types::{IngestBatch, IngestEvent, UploadSummary},
};
use crate::event::{ActionKind, GameEvent};
use crate::session::models::GameSession;
use crate::shared::SeasonId;

/// The one translation table from recorded actions to ingestion names.
/// `Custom` has no name of its own.
pub fn external_action_name(action: &ActionKind) -> Option<&'static str> {
    match action {
        ActionKind::MadeShot => Some("made_shot"),
        ActionKind::MissedShot => Some("missed_shot"),
        ActionKind::OffensiveRebound => Some("off_reb"),
        ActionKind::DefensiveRebound => Some("def_reb"),
        ActionKind::Steal => Some("steal"),
        ActionKind::Assist => Some("assist"),
        ActionKind::Block => Some("block"),
        ActionKind::Turnover => Some("turnover"),
        ActionKind::Custom(_) => None,
    }
}

/// What to upload for a custom label that names no fixed action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CustomActionPolicy {
    /// Fail the upload before anything is sent.
    #[default]
    Reject,
    /// Upload as this fixed action.
    MapTo(ActionKind),
}

impl CustomActionPolicy {
    /// Only fixed actions are valid targets.
    pub fn map_to(action: ActionKind) -> Option<Self> {
        if action.is_custom() {
            None
        } else {
            Some(CustomActionPolicy::MapTo(action))
        }
    }
}

/// Packages a session's log for the ingestion endpoint and sends it.
#[derive(Clone)]
pub struct BulkUploadAdapter {
    ingestion: Arc<dyn EventIngestion>,
    default_season_id: Option<SeasonId>,
    custom_policy: CustomActionPolicy,
}

impl BulkUploadAdapter {
    pub fn new(ingestion: Arc<dyn EventIngestion>) -> Self {
        Self {
            ingestion,
            default_season_id: None,
            custom_policy: CustomActionPolicy::default(),
        }
    }

    pub fn with_default_season(mut self, season_id: Option<SeasonId>) -> Self {
        self.default_season_id = season_id;
        self
    }

    pub fn with_custom_policy(mut self, policy: CustomActionPolicy) -> Self {
        self.custom_policy = policy;
        self
    }

    /// Maps the whole log, failing on the first event that cannot be sent.
    pub fn build_batch(&self, session: &GameSession) -> Result<IngestBatch, LookupError> {
        let season_id = session
            .season_ref
            .or(self.default_season_id)
            .ok_or(LookupError::MissingSeason)?;

        let events = session
            .events()
            .iter()
            .map(|event| {
                let player_id =
                    event
                        .player
                        .backend_id
                        .ok_or_else(|| LookupError::UnresolvedPlayer {
                            display_name: event.player.display_name.clone(),
                        })?;

                Ok(IngestEvent {
                    player_id,
                    season_id,
                    action: self.ingestion_action(event)?.to_string(),
                    x: event.point.x(),
                    y: event.point.y(),
                })
            })
            .collect::<Result<Vec<_>, LookupError>>()?;

        Ok(IngestBatch {
            game_id: session.id,
            events,
        })
    }

    /// Sends the log as a single batch. Either the whole batch is accepted
    /// or the call fails; nothing is sent when mapping fails.
    #[instrument(skip(self, session), fields(game_id = session.id, events = session.events().len()))]
    pub async fn upload(&self, session: &GameSession) -> Result<UploadSummary, UploadError> {
        let batch = self.build_batch(session).inspect_err(|err| {
            warn!(%err, "Event log cannot be mapped for ingestion");
        })?;
        self.send(batch).await
    }

    /// Submits an already mapped batch.
    pub async fn send(&self, batch: IngestBatch) -> Result<UploadSummary, UploadError> {
        let receipt = self.ingestion.submit(&batch).await?;

        info!(
            game_id = batch.game_id,
            created = ?receipt.created,
            "Event batch accepted"
        );

        Ok(UploadSummary {
            game_id: batch.game_id,
            events_sent: batch.events.len(),
            created: receipt.created,
            message: receipt.message,
        })
    }

    fn ingestion_action(&self, event: &GameEvent) -> Result<&'static str, LookupError> {
        let unmapped = |label: &str| LookupError::UnmappedAction {
            event_id: event.id,
            label: label.to_string(),
        };

        match &event.action {
            ActionKind::Custom(label) => {
                let closest = ActionKind::from_label(label).filter(|action| !action.is_custom());
                let chosen = closest.or_else(|| match &self.custom_policy {
                    CustomActionPolicy::Reject => None,
                    CustomActionPolicy::MapTo(action) => Some(action.clone()),
                });
                chosen
                    .as_ref()
                    .and_then(external_action_name)
                    .ok_or_else(|| unmapped(label))
            }
            fixed => external_action_name(fixed).ok_or_else(|| unmapped(&fixed.to_string())),
        }
    }
}
