use axum::Router;
use std::sync::Arc;

use courtside::{
    AppState, BulkUploadAdapter, CustomActionPolicy, LiveEventBus, LiveGameService,
};

use super::mocks::{MockDirectory, MockIngestion};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub app: Router,
    pub state: AppState,
    pub directory: Arc<MockDirectory>,
    pub ingestion: Arc<MockIngestion>,
}

pub struct TestSetupBuilder {
    players: Vec<String>,
    default_season: Option<i64>,
    custom_policy: CustomActionPolicy,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            players: vec![],
            default_season: Some(7),
            custom_policy: CustomActionPolicy::Reject,
        }
    }

    pub fn with_players(mut self, players: Vec<&str>) -> Self {
        self.players = players.into_iter().map(|s| s.to_string()).collect();
        self
    }

    /// Players "A" and "B".
    pub fn with_two_players(self) -> Self {
        self.with_players(vec!["A", "B"])
    }

    pub fn without_default_season(mut self) -> Self {
        self.default_season = None;
        self
    }

    pub fn with_custom_policy(mut self, policy: CustomActionPolicy) -> Self {
        self.custom_policy = policy;
        self
    }

    pub fn build(self) -> TestSetup {
        let directory = Arc::new(MockDirectory::new(&self.players));
        let ingestion = Arc::new(MockIngestion::new());

        let uploader = BulkUploadAdapter::new(ingestion.clone())
            .with_default_season(self.default_season)
            .with_custom_policy(self.custom_policy);
        let service = LiveGameService::new(directory.clone(), uploader, LiveEventBus::new(64));
        let state = AppState::new(Arc::new(service));

        TestSetup {
            app: courtside::app(state.clone()),
            state,
            directory,
            ingestion,
        }
    }
}
