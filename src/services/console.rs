use log::{debug, info};

use crate::api::FantasyClient;
use crate::config::settings::ApiSettings;
use crate::domain::console::ConsoleModel;
use crate::domain::models::{Match, Meta, PredictionEntry, Round, ScoreboardRow, SyncSummary, Team};
use crate::domain::odds::{OddsEdits, OddsForm, OddsUpdate};
use crate::domain::predictions::PredictionForm;
use crate::domain::coach::parse_coach_points;
use crate::errors::{ConsoleError, ConsoleResult};

/// Admin data-entry workflows: each method is one operator action.
pub struct AdminConsoleService {
    client: FantasyClient,
}

impl AdminConsoleService {
    pub fn new(settings: &ApiSettings) -> ConsoleResult<Self> {
        Ok(Self {
            client: FantasyClient::new(settings)?,
        })
    }

    pub async fn teams(&self) -> ConsoleResult<Vec<Team>> {
        info!("Loading teams…");
        Ok(self.client.fetch_teams().await?)
    }

    pub async fn meta(&self) -> ConsoleResult<Meta> {
        Ok(self.client.fetch_meta().await?)
    }

    pub async fn rounds(&self) -> ConsoleResult<Vec<Round>> {
        Ok(self.client.fetch_rounds().await?)
    }

    pub async fn create_round(&self, matchday: u32, season: Option<i64>) -> ConsoleResult<Round> {
        Ok(self.client.create_round(matchday, season).await?)
    }

    pub async fn matches(&self, matchday: u32) -> ConsoleResult<Vec<Match>> {
        info!("Loading matches…");
        Ok(self.client.fetch_matches(matchday).await?)
    }

    /// Sync the matchday from the upstream feed, then reload its matches.
    pub async fn sync(&self, matchday: u32, season: Option<i64>) -> ConsoleResult<(SyncSummary, Vec<Match>)> {
        let summary = self.client.sync_round(matchday, season).await?;
        let matches = self.matches(matchday).await?;
        Ok((summary, matches))
    }

    /// Build the full console model: teams, matches and whatever coach
    /// points and predictions are already stored.
    pub async fn load(&self, matchday: u32) -> ConsoleResult<ConsoleModel> {
        let teams = self.teams().await?;
        let mut model = ConsoleModel::new(matchday, &teams);
        model.set_matches(self.matches(matchday).await?);

        // Rounds without stored values yet are not an error for the console.
        match self.client.fetch_coach_points(matchday).await {
            Ok(stored) => model.apply_coach_points(&stored.coach_points),
            Err(e) => debug!("No stored coach points for matchday {matchday}: {e}"),
        }
        match self.client.fetch_predictions(matchday).await {
            Ok(stored) => model.apply_predictions(&stored.predictions),
            Err(e) => debug!("No stored predictions for matchday {matchday}: {e}"),
        }

        Ok(model)
    }

    /// Seed the match's odds form from stored values, apply the edits and
    /// send whatever fields remain.
    pub async fn save_odds(&self, matchday: u32, match_id: i64, edits: OddsEdits) -> ConsoleResult<OddsUpdate> {
        let matches = self.matches(matchday).await?;
        let fixture = matches
            .iter()
            .find(|m| m.id == match_id)
            .ok_or(ConsoleError::UnknownMatch { match_id, matchday })?;

        let mut form = OddsForm::from_match(fixture);
        form.apply(edits);
        let update = form.to_update();

        self.client.update_odds(match_id, &update).await?;
        Ok(update)
    }

    /// Validate a team's picks and replace its stored set. Nothing is sent
    /// unless exactly five distinct matches are chosen.
    pub async fn save_predictions(
        &self,
        matchday: u32,
        team: &str,
        picks: &[PredictionEntry],
    ) -> ConsoleResult<Vec<PredictionEntry>> {
        let form = PredictionForm::from_picks(team, picks)?;
        self.submit_form(matchday, team, &form).await
    }

    pub async fn submit_form(
        &self,
        matchday: u32,
        team: &str,
        form: &PredictionForm,
    ) -> ConsoleResult<Vec<PredictionEntry>> {
        let chosen = form.validate(team)?;
        self.client.submit_predictions(matchday, team, &chosen).await?;
        Ok(chosen)
    }

    pub async fn save_coach(&self, matchday: u32, team: &str, input: &str) -> ConsoleResult<u32> {
        let points = parse_coach_points(team, input)?;
        self.client.update_coach_points(matchday, team, points).await?;
        Ok(points)
    }

    /// Save every team's coach points in order, stopping at the first failed
    /// call. Teams saved before the failure stay saved.
    pub async fn save_all_coach(&self, model: &ConsoleModel) -> ConsoleResult<usize> {
        let matchday = model.matchday();
        let entries = model.coach_points()?;
        let total = entries.len();
        info!("Saving all coach points (matchday {})…", matchday);

        for (saved, (team, points)) in entries.iter().enumerate() {
            if let Err(source) = self.client.update_coach_points(matchday, team, *points).await {
                return Err(ConsoleError::BatchAborted {
                    team: team.clone(),
                    saved,
                    total,
                    source,
                });
            }
        }

        Ok(total)
    }

    /// Load the matchday, apply `TEAM=POINTS` overrides and save every team.
    pub async fn save_all_coach_with(&self, matchday: u32, overrides: &[(String, u32)]) -> ConsoleResult<usize> {
        let mut model = self.load(matchday).await?;
        for (team, points) in overrides {
            model.set_coach_input(team, points.to_string())?;
        }
        self.save_all_coach(&model).await
    }

    /// Top row of the matchday scoreboard, if any.
    pub async fn leader(&self, matchday: u32) -> ConsoleResult<Option<ScoreboardRow>> {
        let scoreboard = self.client.fetch_scoreboard(matchday).await?;
        Ok(scoreboard.leader().cloned())
    }
}
