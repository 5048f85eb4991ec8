use colored::Colorize;

use crate::domain::console::ConsoleModel;
use crate::domain::models::{format_number, Match, Round, Scoreboard, Team};

/// Plain left-aligned text table.
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self) -> String {
        let widths = self.column_widths();
        let mut out = String::new();

        let header = pad_row(&self.headers, &widths);
        out.push_str(&header.bold().to_string());
        out.push('\n');
        out.push_str(&widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("  "));
        out.push('\n');

        for row in &self.rows {
            out.push_str(&pad_row(row, &widths));
            out.push('\n');
        }
        out
    }

    fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(width) = widths.get_mut(i) {
                    *width = (*width).max(cell.chars().count());
                }
            }
        }
        widths
    }
}

fn pad_row(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

pub fn render_teams(teams: &[Team]) -> String {
    let mut table = Table::new(&["#", "Team"]);
    for (i, team) in teams.iter().enumerate() {
        table.push(vec![(i + 1).to_string(), team.name.clone()]);
    }
    table.render()
}

pub fn render_rounds(rounds: &[Round]) -> String {
    let mut table = Table::new(&["Matchday", "Season", "Id"]);
    for round in rounds {
        table.push(vec![
            round.matchday.to_string(),
            round.season.map(|s| s.to_string()).unwrap_or_default(),
            round.id.to_string(),
        ]);
    }
    table.render()
}

pub fn render_matches(matches: &[Match]) -> String {
    if matches.is_empty() {
        return "No matches for this matchday. Sync it first.\n".to_string();
    }

    let odd = |value: Option<f64>| value.map(format_number).unwrap_or_default();
    let mut table = Table::new(&["Id", "Match", "Kick-off", "Status", "Score", "1", "X", "2"]);
    for fixture in matches {
        table.push(vec![
            fixture.id.to_string(),
            fixture.label(),
            fixture.kickoff(),
            fixture.status.clone().unwrap_or_default(),
            format!("{} {}", fixture.score_line(), fixture.outcome_symbol())
                .trim_end()
                .to_string(),
            odd(fixture.odd_1),
            odd(fixture.odd_x),
            odd(fixture.odd_2),
        ]);
    }
    table.render()
}

pub fn render_scoreboard(scoreboard: &Scoreboard) -> String {
    let title = match scoreboard.matchday {
        Some(matchday) => format!("Scoreboard matchday {}", matchday),
        None => "Season standings".to_string(),
    };

    let mut table = Table::new(&["#", "Team", "1X2", "Bonus", "Coach", "Total"]);
    for (i, row) in scoreboard.rows.iter().enumerate() {
        table.push(vec![
            (i + 1).to_string(),
            row.team.clone(),
            format_number(row.points_1x2),
            format_number(row.bonus),
            format_number(row.coach),
            format_number(row.total),
        ]);
    }

    if table.is_empty() {
        return format!("{}\nNo scoreboard data.\n", title.bold());
    }
    format!("{}\n{}", title.bold(), table.render())
}

pub fn render_predictions(model: &ConsoleModel) -> String {
    let mut out = String::new();
    for form in model.forms() {
        out.push_str(&format!("{}\n", form.team.bold()));
        for (i, slot) in form.predictions.slots().iter().enumerate() {
            let line = match slot.match_id {
                Some(match_id) => format!("{} -> {}", model.match_label(match_id), slot.pick),
                None => "(no match chosen)".to_string(),
            };
            out.push_str(&format!("  {}. {}\n", i + 1, line));
        }
        let chosen = form.predictions.chosen().len();
        if chosen != 5 {
            out.push_str(&format!("  {}/5 matches chosen\n", chosen));
        }
    }
    out
}

pub fn render_coach(model: &ConsoleModel) -> String {
    let mut table = Table::new(&["Team", "Coach points"]);
    for form in model.forms() {
        table.push(vec![form.team.clone(), form.coach_input.clone()]);
    }
    table.render()
}
