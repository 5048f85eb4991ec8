use log::debug;

use super::models::{format_number, Match};

/// Text of the three odds fields of one match row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OddsForm {
    pub odd_1: String,
    pub odd_x: String,
    pub odd_2: String,
}

/// Replacement texts for an odds form; `None` keeps the seeded value.
#[derive(Debug, Clone, Default)]
pub struct OddsEdits {
    pub odd_1: Option<String>,
    pub odd_x: Option<String>,
    pub odd_2: Option<String>,
}

/// Odds actually sent to the backend; absent fields are left out of the query.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OddsUpdate {
    pub odd_1: Option<f64>,
    pub odd_x: Option<f64>,
    pub odd_2: Option<f64>,
}

impl OddsForm {
    pub fn new(odd_1: &str, odd_x: &str, odd_2: &str) -> Self {
        Self {
            odd_1: odd_1.to_string(),
            odd_x: odd_x.to_string(),
            odd_2: odd_2.to_string(),
        }
    }

    /// Seed from the stored odds; missing values become empty fields.
    pub fn from_match(fixture: &Match) -> Self {
        let text = |odd: Option<f64>| odd.map(format_number).unwrap_or_default();
        Self {
            odd_1: text(fixture.odd_1),
            odd_x: text(fixture.odd_x),
            odd_2: text(fixture.odd_2),
        }
    }

    pub fn apply(&mut self, edits: OddsEdits) {
        if let Some(value) = edits.odd_1 {
            self.odd_1 = value;
        }
        if let Some(value) = edits.odd_x {
            self.odd_x = value;
        }
        if let Some(value) = edits.odd_2 {
            self.odd_2 = value;
        }
    }

    /// Each field is parsed on its own. Empty fields are omitted and so are
    /// fields that do not parse as a finite number.
    pub fn to_update(&self) -> OddsUpdate {
        OddsUpdate {
            odd_1: parse_odd("odd_1", &self.odd_1),
            odd_x: parse_odd("odd_x", &self.odd_x),
            odd_2: parse_odd("odd_2", &self.odd_2),
        }
    }
}

fn parse_odd(field: &str, input: &str) -> Option<f64> {
    let value = input.trim();
    if value.is_empty() {
        return None;
    }
    match value.parse::<f64>() {
        Ok(num) if num.is_finite() => Some(num),
        _ => {
            debug!("Skipping {field}: \"{value}\" is not a number");
            None
        }
    }
}

impl OddsUpdate {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        [("odd_1", self.odd_1), ("odd_x", self.odd_x), ("odd_2", self.odd_2)]
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| (key, format_number(v))))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.odd_1.is_none() && self.odd_x.is_none() && self.odd_2.is_none()
    }
}
