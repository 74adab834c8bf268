use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use tokio::sync::RwLock;

use courtside::{
    session::{
        CreateGameRequest, CreatedGame, DirectoryError, DirectoryPlayer, DirectorySeason,
        GameDirectory,
    },
    upload::{EventIngestion, IngestBatch, IngestReceipt, UploadError},
};

// ============================================================================
// Mock Infrastructure
// ============================================================================

pub struct MockDirectory {
    players: Vec<DirectoryPlayer>,
    unavailable: AtomicBool,
    next_game_id: AtomicI64,
    created_games: RwLock<Vec<CreateGameRequest>>,
}

impl MockDirectory {
    /// Players get directory ids 101, 102, ... in the given order.
    pub fn new(names: &[String]) -> Self {
        Self {
            players: names
                .iter()
                .enumerate()
                .map(|(i, name)| DirectoryPlayer {
                    id: 101 + i as i64,
                    name: name.clone(),
                    external_id: Some(name.to_lowercase()),
                })
                .collect(),
            unavailable: AtomicBool::new(false),
            next_game_id: AtomicI64::new(500),
            created_games: RwLock::new(Vec::new()),
        }
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn player_id(&self, name: &str) -> i64 {
        self.players
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.id)
            .unwrap_or_else(|| panic!("{name} is not in the mock directory"))
    }

    pub async fn created_games(&self) -> Vec<CreateGameRequest> {
        self.created_games.read().await.clone()
    }

    fn check(&self) -> Result<(), DirectoryError> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(DirectoryError::Upstream {
                status: 503,
                body: "Service Unavailable".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl GameDirectory for MockDirectory {
    async fn list_players(&self) -> Result<Vec<DirectoryPlayer>, DirectoryError> {
        self.check()?;
        Ok(self.players.clone())
    }

    async fn list_seasons(&self) -> Result<Vec<DirectorySeason>, DirectoryError> {
        self.check()?;
        Ok(vec![DirectorySeason {
            id: 7,
            name: "2024-25".to_string(),
            start_date: None,
            end_date: None,
        }])
    }

    async fn create_game(&self, request: &CreateGameRequest) -> Result<CreatedGame, DirectoryError> {
        self.check()?;
        self.created_games.write().await.push(request.clone());
        Ok(CreatedGame {
            id: self.next_game_id.fetch_add(1, Ordering::SeqCst),
        })
    }
}

/// Records every batch; fails the next `n` submissions when asked to.
pub struct MockIngestion {
    failures_left: AtomicUsize,
    batches: RwLock<Vec<IngestBatch>>,
}

impl MockIngestion {
    pub fn new() -> Self {
        Self {
            failures_left: AtomicUsize::new(0),
            batches: RwLock::new(Vec::new()),
        }
    }

    pub fn fail_next(&self, n: usize) {
        self.failures_left.store(n, Ordering::SeqCst);
    }

    pub async fn batches(&self) -> Vec<IngestBatch> {
        self.batches.read().await.clone()
    }
}

#[async_trait]
impl EventIngestion for MockIngestion {
    async fn submit(&self, batch: &IngestBatch) -> Result<IngestReceipt, UploadError> {
        self.batches.write().await.push(batch.clone());

        let failing = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(UploadError::Rejected {
                status: 503,
                body: r#"{"detail":"ingestion temporarily unavailable"}"#.to_string(),
            });
        }

        Ok(IngestReceipt {
            created: Some(batch.events.len()),
            message: Some("ok".to_string()),
        })
    }
}
