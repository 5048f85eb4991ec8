use log::info;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use urlencoding::encode;

use crate::config::settings::ApiSettings;
use crate::domain::models::{
    CoachPointsResponse, Match, Meta, PredictionEntry, PredictionsResponse, Round, Scoreboard,
    SyncSummary, Team,
};
use crate::domain::odds::OddsUpdate;
use crate::errors::ApiError;
use crate::http::ApiClient;

/// Typed client for the fantasy backend's REST endpoints.
pub struct FantasyClient {
    client: ApiClient,
}

impl FantasyClient {
    pub fn new(settings: &ApiSettings) -> Result<Self, ApiError> {
        let client = ApiClient::new(&settings.base_url, settings.user_agent)?;
        Ok(Self { client })
    }

    pub async fn fetch_teams(&self) -> Result<Vec<Team>, ApiError> {
        let path = "/api/teams";
        decode(path, self.client.get(path).await?)
    }

    pub async fn fetch_meta(&self) -> Result<Meta, ApiError> {
        let path = "/api/meta";
        decode(path, self.client.get(path).await?)
    }

    pub async fn fetch_rounds(&self) -> Result<Vec<Round>, ApiError> {
        let path = "/api/rounds";
        decode(path, self.client.get(path).await?)
    }

    pub async fn create_round(&self, matchday: u32, season: Option<i64>) -> Result<Round, ApiError> {
        let path = format!("/api/rounds/{}", matchday);
        let query = season_query(season);
        let body = self.client.fetch(Method::POST, &path, &query, None).await?;
        decode(&path, body)
    }

    /// Ask the backend to pull fixtures and results for a matchday.
    pub async fn sync_round(&self, matchday: u32, season: Option<i64>) -> Result<SyncSummary, ApiError> {
        let path = format!("/api/rounds/{}/sync", matchday);
        info!("Syncing matchday {}…", matchday);
        let query = season_query(season);
        let body = self.client.fetch(Method::POST, &path, &query, None).await?;
        decode(&path, body)
    }

    pub async fn fetch_matches(&self, matchday: u32) -> Result<Vec<Match>, ApiError> {
        let path = format!("/api/rounds/{}/matches", matchday);
        decode(&path, self.client.get(&path).await?)
    }

    pub async fn update_odds(&self, match_id: i64, update: &OddsUpdate) -> Result<(), ApiError> {
        let path = format!("/api/matches/{}/odds", match_id);
        info!("Saving odds for match {}…", match_id);
        self.client
            .fetch(Method::PUT, &path, &update.query_pairs(), None)
            .await?;
        Ok(())
    }

    pub async fn fetch_coach_points(&self, matchday: u32) -> Result<CoachPointsResponse, ApiError> {
        let path = format!("/api/rounds/{}/coach", matchday);
        decode(&path, self.client.get(&path).await?)
    }

    pub async fn update_coach_points(&self, matchday: u32, team: &str, points: u32) -> Result<(), ApiError> {
        let path = format!("/api/rounds/{}/coach/{}", matchday, encode(team));
        info!("Saving coach points for {}…", team);
        let query = [("points", points.to_string())];
        self.client.fetch(Method::PUT, &path, &query, None).await?;
        Ok(())
    }

    pub async fn fetch_predictions(&self, matchday: u32) -> Result<PredictionsResponse, ApiError> {
        let path = format!("/api/rounds/{}/predictions", matchday);
        decode(&path, self.client.get(&path).await?)
    }

    /// Replace a team's picks for the matchday.
    pub async fn submit_predictions(
        &self,
        matchday: u32,
        team: &str,
        picks: &[PredictionEntry],
    ) -> Result<(), ApiError> {
        let path = format!("/api/rounds/{}/predictions/{}", matchday, encode(team));
        info!("Saving predictions for {} (matchday {})…", team, matchday);
        let body = serde_json::to_value(picks).map_err(|e| ApiError::Decode {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        self.client.fetch(Method::POST, &path, &[], Some(&body)).await?;
        Ok(())
    }

    pub async fn fetch_scoreboard(&self, matchday: u32) -> Result<Scoreboard, ApiError> {
        let path = format!("/api/rounds/{}/scoreboard", matchday);
        info!("Fetching scoreboard matchday {}…", matchday);
        decode(&path, self.client.get(&path).await?)
    }

    pub async fn fetch_standings(&self) -> Result<Scoreboard, ApiError> {
        let path = "/api/season/standings";
        decode(path, self.client.get(path).await?)
    }
}

fn season_query(season: Option<i64>) -> Vec<(&'static str, String)> {
    season
        .map(|s| vec![("season", s.to_string())])
        .unwrap_or_default()
}

fn decode<T: DeserializeOwned>(path: &str, body: Option<Value>) -> Result<T, ApiError> {
    let value = body.ok_or_else(|| ApiError::Decode {
        path: path.to_string(),
        reason: "empty or non-JSON body".to_string(),
    })?;
    serde_json::from_value(value).map_err(|e| ApiError::Decode {
        path: path.to_string(),
        reason: e.to_string(),
    })
}
