use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ValidationError;

/// Team participating in the competition; `name` is the key used in API paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
}

/// Fixture of one matchday as stored by the backend, odds joined in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: i64,
    #[serde(default)]
    pub home: Option<String>,
    #[serde(default)]
    pub away: Option<String>,
    #[serde(default)]
    pub utc_date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub score_home: Option<i64>,
    #[serde(default)]
    pub score_away: Option<i64>,
    #[serde(default)]
    pub odd_1: Option<f64>,
    #[serde(default)]
    pub odd_x: Option<f64>,
    #[serde(default)]
    pub odd_2: Option<f64>,
}

impl Match {
    pub fn label(&self) -> String {
        format!(
            "{} vs {}",
            self.home.as_deref().unwrap_or("TBD"),
            self.away.as_deref().unwrap_or("TBD")
        )
    }

    pub fn outcome(&self) -> Option<Pick> {
        outcome(self.score_home, self.score_away)
    }

    /// Outcome symbol, empty while either score is missing.
    pub fn outcome_symbol(&self) -> &'static str {
        self.outcome().map(Pick::as_str).unwrap_or("")
    }

    pub fn score_line(&self) -> String {
        format!(
            "{} - {}",
            self.score_home.map(|s| s.to_string()).unwrap_or_default(),
            self.score_away.map(|s| s.to_string()).unwrap_or_default()
        )
    }

    pub fn kickoff(&self) -> String {
        format_kickoff(self.utc_date.as_deref())
    }
}

/// Result symbol derived from a final score.
pub fn outcome(score_home: Option<i64>, score_away: Option<i64>) -> Option<Pick> {
    let (home, away) = (score_home?, score_away?);
    Some(match home.cmp(&away) {
        std::cmp::Ordering::Greater => Pick::Home,
        std::cmp::Ordering::Less => Pick::Away,
        std::cmp::Ordering::Equal => Pick::Draw,
    })
}

/// Kick-off time in the operator's local timezone; unparseable input is echoed.
pub fn format_kickoff(utc: Option<&str>) -> String {
    let Some(raw) = utc.filter(|s| !s.is_empty()) else {
        return String::new();
    };
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => raw.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Pick {
    #[default]
    #[serde(rename = "1")]
    Home,
    #[serde(rename = "X")]
    Draw,
    #[serde(rename = "2")]
    Away,
}

impl Pick {
    pub fn as_str(self) -> &'static str {
        match self {
            Pick::Home => "1",
            Pick::Draw => "X",
            Pick::Away => "2",
        }
    }
}

impl fmt::Display for Pick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Pick {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Pick::Home),
            "X" | "x" => Ok(Pick::Draw),
            "2" => Ok(Pick::Away),
            other => Err(ValidationError::InvalidPick(other.to_string())),
        }
    }
}

/// One of a team's five predictions for a matchday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionEntry {
    pub match_id: i64,
    pub pick: Pick,
}

// --- API Response Structures ---

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SyncSummary {
    #[serde(default)]
    pub inserted: u64,
    #[serde(default)]
    pub updated: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Round {
    pub id: i64,
    pub matchday: u32,
    #[serde(default)]
    pub season: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Meta {
    pub league_name: String,
    #[serde(default)]
    pub teams: Vec<Team>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoachPointsResponse {
    #[serde(default)]
    pub coach_points: HashMap<String, i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictionsResponse {
    #[serde(default)]
    pub predictions: HashMap<String, Vec<PredictionEntry>>,
}

/// Aggregated totals for one team; the season and matchday endpoints name
/// the coach and total columns differently.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScoreboardRow {
    pub team: String,
    #[serde(default)]
    pub points_1x2: f64,
    #[serde(default)]
    pub bonus: f64,
    #[serde(default, alias = "coach_points")]
    pub coach: f64,
    #[serde(default, alias = "total_round")]
    pub total: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Scoreboard {
    #[serde(default)]
    pub matchday: Option<u32>,
    #[serde(default)]
    pub rows: Vec<ScoreboardRow>,
    #[serde(default)]
    pub error: Option<Value>,
}

impl Scoreboard {
    /// Error marker carried in an otherwise successful body.
    pub fn error_marker(&self) -> Option<String> {
        match self.error.as_ref()? {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    pub fn leader(&self) -> Option<&ScoreboardRow> {
        self.rows.first()
    }
}

/// Render a number the way the backend's JSON writes it (`2`, `1.5`).
pub fn format_number(value: f64) -> String {
    format!("{}", value)
}
