use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::event::PlayerRef;
use crate::shared::{BackendId, GameId, SeasonId};

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("Directory transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Directory returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Directory response decode error: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Player as listed by the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryPlayer {
    pub id: BackendId,
    pub name: String,
    #[serde(default)]
    pub external_id: Option<String>,
}

impl From<DirectoryPlayer> for PlayerRef {
    fn from(player: DirectoryPlayer) -> Self {
        let external_id = player
            .external_id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| PlayerRef::external_id_for(&player.name));
        PlayerRef::resolved(player.name, external_id, player.id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectorySeason {
    pub id: SeasonId,
    pub name: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateGameRequest {
    pub opponent: String,
    pub date: NaiveDate,
    pub external_id: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatedGame {
    pub id: GameId,
}

/// Port to the player/season/game directory.
#[async_trait]
pub trait GameDirectory: Send + Sync {
    async fn list_players(&self) -> Result<Vec<DirectoryPlayer>, DirectoryError>;
    async fn list_seasons(&self) -> Result<Vec<DirectorySeason>, DirectoryError>;
    async fn create_game(&self, request: &CreateGameRequest) -> Result<CreatedGame, DirectoryError>;
}

// Thin wrapper around reqwest for directory calls.
#[derive(Clone)]
pub struct HttpDirectoryClient {
    http: Client,
    pub base_url: String,
}

impl HttpDirectoryClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn read<T: DeserializeOwned>(res: reqwest::Response) -> Result<T, DirectoryError> {
        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(DirectoryError::Upstream {
                status: status.as_u16(),
                body,
            });
        }
        res.json::<T>().await.map_err(DirectoryError::Decode)
    }
}

#[async_trait]
impl GameDirectory for HttpDirectoryClient {
    async fn list_players(&self) -> Result<Vec<DirectoryPlayer>, DirectoryError> {
        let url = format!("{}/players/", self.base_url);
        debug!(%url, "Fetching players");
        let res = self
            .http
            .get(url)
            .send()
            .await
            .map_err(DirectoryError::Transport)?;
        Self::read(res).await
    }

    async fn list_seasons(&self) -> Result<Vec<DirectorySeason>, DirectoryError> {
        let url = format!("{}/seasons/", self.base_url);
        debug!(%url, "Fetching seasons");
        let res = self
            .http
            .get(url)
            .send()
            .await
            .map_err(DirectoryError::Transport)?;
        Self::read(res).await
    }

    async fn create_game(&self, request: &CreateGameRequest) -> Result<CreatedGame, DirectoryError> {
        let url = format!("{}/games/create/", self.base_url);
        debug!(%url, opponent = %request.opponent, "Creating game");
        let res = self
            .http
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(DirectoryError::Transport)?;
        Self::read(res).await
    }
}
