// Sleeper REST client.
//
// Thin wrapper over the public Sleeper API. The provider surface is a
// trait so the orchestration layer and tests can substitute a stub
// without any network access.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::league::{FetchError, League, PlayerMeta, RawTradedPick, Roster, User};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const SLEEPER_API_URL: &str = "https://api.sleeper.app/v1";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// ---------------------------------------------------------------------------
// Provider trait
// ---------------------------------------------------------------------------

/// Remote league data source. Every operation fails with a [`FetchError`]
/// naming the operation, so callers can report which fetch went wrong.
#[async_trait]
pub trait LeagueDataProvider: Send + Sync {
    async fn get_user(&self, username: &str) -> Result<User, FetchError>;
    async fn get_leagues(&self, user_id: &str, season: &str) -> Result<Vec<League>, FetchError>;
    async fn get_rosters(&self, league_id: &str) -> Result<Vec<Roster>, FetchError>;
    async fn get_traded_picks(&self, league_id: &str) -> Result<Vec<RawTradedPick>, FetchError>;
    async fn get_player_meta(&self) -> Result<HashMap<String, PlayerMeta>, FetchError>;
}

// ---------------------------------------------------------------------------
// SleeperClient
// ---------------------------------------------------------------------------

pub struct SleeperClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl SleeperClient {
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Self {
        SleeperClient {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: if timeout_secs == 0 {
                DEFAULT_TIMEOUT
            } else {
                Duration::from_secs(timeout_secs)
            },
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        path: &str,
    ) -> Result<T, FetchError> {
        let url = format!("{}/{}", self.base_url, path);
        debug!(%url, operation, "league data request");

        let response = self
            .http
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| FetchError::Http {
                operation,
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                operation,
                status: status.as_u16(),
            });
        }

        response.json().await.map_err(|e| FetchError::Decode {
            operation,
            source: e,
        })
    }
}

#[async_trait]
impl LeagueDataProvider for SleeperClient {
    async fn get_user(&self, username: &str) -> Result<User, FetchError> {
        self.get_json("user", &format!("user/{}", username.trim())).await
    }

    async fn get_leagues(&self, user_id: &str, season: &str) -> Result<Vec<League>, FetchError> {
        self.get_json("leagues", &format!("user/{user_id}/leagues/nfl/{season}"))
            .await
    }

    async fn get_rosters(&self, league_id: &str) -> Result<Vec<Roster>, FetchError> {
        self.get_json("rosters", &format!("league/{league_id}/rosters")).await
    }

    async fn get_traded_picks(&self, league_id: &str) -> Result<Vec<RawTradedPick>, FetchError> {
        self.get_json("traded picks", &format!("league/{league_id}/traded_picks"))
            .await
    }

    async fn get_player_meta(&self) -> Result<HashMap<String, PlayerMeta>, FetchError> {
        // The players dump is large (~5 MB); callers should fetch it once
        // per refresh, not per lookup.
        self.get_json("players", "players/nfl").await
    }
}
