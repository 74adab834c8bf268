use std::{env, time::Duration};
use thiserror::Error;

use crate::event::ActionKind;
use crate::shared::SeasonId;
use crate::upload::CustomActionPolicy;

// Runtime settings, all read from the environment.

pub const LIVE_BROADCAST_CAPACITY: usize = 256;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_API_URL: &str = "http://localhost:8000/games";
const DEFAULT_HTTP_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },

    #[error("CUSTOM_ACTION_FALLBACK must name a fixed action, got {0}")]
    CustomFallback(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub port: u16,
    pub api_url: String,
    pub ingestion_url: String,
    pub default_season_id: Option<SeasonId>,
    pub custom_action_policy: CustomActionPolicy,
    pub http_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any variable source. Unset and blank
    /// variables take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let port = parse_or(var("COURTSIDE_PORT"), "COURTSIDE_PORT", DEFAULT_PORT)?;
        let api_url = var("STATS_API_URL")
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        // `{game_id}` is filled in per upload.
        let ingestion_url =
            var("INGESTION_URL").unwrap_or_else(|| format!("{api_url}/events/{{game_id}}/"));
        let default_season_id = var("DEFAULT_SEASON_ID")
            .map(|value| parse(&value, "DEFAULT_SEASON_ID"))
            .transpose()?;
        let millis = parse_or(
            var("HTTP_TIMEOUT_MS"),
            "HTTP_TIMEOUT_MS",
            DEFAULT_HTTP_TIMEOUT_MS,
        )?;

        let custom_action_policy = match var("CUSTOM_ACTION_FALLBACK") {
            None => CustomActionPolicy::Reject,
            Some(label) => ActionKind::from_label(&label)
                .and_then(CustomActionPolicy::map_to)
                .ok_or(ConfigError::CustomFallback(label))?,
        };

        Ok(Self {
            port,
            api_url,
            ingestion_url,
            default_season_id,
            custom_action_policy,
            http_timeout: Duration::from_millis(millis),
        })
    }
}

fn parse<T: std::str::FromStr>(value: &str, name: &'static str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        name,
        value: value.to_string(),
    })
}

fn parse_or<T: std::str::FromStr>(
    value: Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    value.map_or(Ok(default), |value| parse(&value, name))
}
