use crate::api::FantasyClient;
use crate::config::settings::ApiSettings;
use crate::domain::models::Scoreboard;
use crate::errors::{ApiError, ConsoleResult};

/// Read-only standings views; no admin session needed.
pub struct ScoreboardService {
    client: FantasyClient,
}

impl ScoreboardService {
    pub fn new(settings: &ApiSettings) -> ConsoleResult<Self> {
        Ok(Self {
            client: FantasyClient::new(settings)?,
        })
    }

    pub async fn season_standings(&self) -> ConsoleResult<Scoreboard> {
        let standings = self.client.fetch_standings().await?;
        Ok(reject_marked(standings)?)
    }

    pub async fn matchday_scoreboard(&self, matchday: u32) -> ConsoleResult<Scoreboard> {
        let mut scoreboard = self.client.fetch_scoreboard(matchday).await?;
        scoreboard.matchday.get_or_insert(matchday);
        Ok(reject_marked(scoreboard)?)
    }
}

fn reject_marked(scoreboard: Scoreboard) -> Result<Scoreboard, ApiError> {
    match scoreboard.error_marker() {
        Some(message) => Err(ApiError::Reported(message)),
        None => Ok(scoreboard),
    }
}
