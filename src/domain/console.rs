use std::collections::HashMap;

use crate::errors::{ConsoleError, ConsoleResult, ValidationError};

use super::coach::parse_coach_points;
use super::models::{Match, PredictionEntry, Team};
use super::predictions::PredictionForm;

/// Editable state kept for one team.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamForm {
    pub team: String,
    pub predictions: PredictionForm,
    pub coach_input: String,
}

impl TeamForm {
    fn new(team: &str) -> Self {
        Self {
            team: team.to_string(),
            predictions: PredictionForm::new(),
            coach_input: "0".to_string(),
        }
    }
}

/// Everything the console holds for one matchday. Rebuilt on every load.
#[derive(Debug, Clone)]
pub struct ConsoleModel {
    matchday: u32,
    matches: Vec<Match>,
    forms: Vec<TeamForm>,
    index: HashMap<String, usize>,
}

impl ConsoleModel {
    pub fn new(matchday: u32, teams: &[Team]) -> Self {
        let forms: Vec<TeamForm> = teams.iter().map(|t| TeamForm::new(&t.name)).collect();
        let index = forms
            .iter()
            .enumerate()
            .map(|(i, form)| (form.team.clone(), i))
            .collect();

        Self {
            matchday,
            matches: Vec::new(),
            forms,
            index,
        }
    }

    pub fn matchday(&self) -> u32 {
        self.matchday
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn forms(&self) -> &[TeamForm] {
        &self.forms
    }

    pub fn set_matches(&mut self, matches: Vec<Match>) {
        self.matches = matches;
    }

    pub fn find_match(&self, match_id: i64) -> Option<&Match> {
        self.matches.iter().find(|m| m.id == match_id)
    }

    pub fn match_label(&self, match_id: i64) -> String {
        match self.find_match(match_id) {
            Some(fixture) => format!("#{} {}", fixture.id, fixture.label()),
            None => format!("#{}", match_id),
        }
    }

    pub fn form(&self, team: &str) -> Option<&TeamForm> {
        self.index.get(team).map(|&i| &self.forms[i])
    }

    pub fn form_mut(&mut self, team: &str) -> ConsoleResult<&mut TeamForm> {
        match self.index.get(team) {
            Some(&i) => Ok(&mut self.forms[i]),
            None => Err(ConsoleError::UnknownTeam(team.to_string())),
        }
    }

    /// Pre-fill coach inputs; teams without a stored value show 0.
    pub fn apply_coach_points(&mut self, stored: &HashMap<String, i64>) {
        for form in &mut self.forms {
            form.coach_input = stored.get(&form.team).copied().unwrap_or(0).to_string();
        }
    }

    /// Pre-fill prediction slots; teams without stored picks are reset.
    pub fn apply_predictions(&mut self, stored: &HashMap<String, Vec<PredictionEntry>>) {
        for form in &mut self.forms {
            match stored.get(&form.team) {
                Some(entries) => form.predictions.fill(entries),
                None => form.predictions.clear(),
            }
        }
    }

    pub fn set_coach_input(&mut self, team: &str, input: impl Into<String>) -> ConsoleResult<()> {
        self.form_mut(team)?.coach_input = input.into();
        Ok(())
    }

    /// Parsed coach points for every team in display order.
    pub fn coach_points(&self) -> Result<Vec<(String, u32)>, ValidationError> {
        self.forms
            .iter()
            .map(|form| {
                parse_coach_points(&form.team, &form.coach_input).map(|p| (form.team.clone(), p))
            })
            .collect()
    }
}
