pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod http;
pub mod render;
pub mod services;

use std::future::Future;
use std::io::{self, BufRead};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;

use crate::auth::{AdminGate, LocalStorage, LoginOutcome, SessionStatus};
use crate::config::settings::AppConfig;
use crate::domain::coach::parse_coach_override;
use crate::domain::odds::OddsEdits;
use crate::domain::predictions::parse_pick_arg;
use crate::render::{print_block, print_ok};
use crate::services::{AdminConsoleService, ScoreboardService};

pub fn interpret() -> Cli {
    Cli::parse()
}

pub fn build_config(cli: &Cli) -> AppConfig {
    AppConfig::new()
        .with_api_base(cli.api_base.clone())
        .with_state_dir(cli.state_dir.clone())
}

fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    Ok(runtime.block_on(future))
}

fn open_gate(config: &AppConfig) -> Result<AdminGate> {
    let storage = LocalStorage::new(&config.storage.state_dir)?;
    Ok(AdminGate::new(storage, config.gate.clone()))
}

fn require_admin(config: &AppConfig) -> Result<()> {
    open_gate(config)?.require(Utc::now())?;
    Ok(())
}

fn admin_console(config: &AppConfig) -> Result<AdminConsoleService> {
    require_admin(config)?;
    Ok(AdminConsoleService::new(&config.api)?)
}

// --- Admin gate ---

pub fn handle_login(config: &AppConfig, password: Option<String>, return_to: Option<String>) -> Result<()> {
    let gate = open_gate(config)?;
    let now = Utc::now();

    // An active session never needs the password.
    let password = match password {
        Some(password) => password,
        None if gate.is_authenticated(now)? => String::new(),
        None => read_password()?,
    };

    let outcome = gate.login(&password, return_to.as_deref(), now)?;
    let status = match outcome {
        LoginOutcome::AlreadyAuthenticated { .. } => "Already logged in.",
        LoginOutcome::LoggedIn { .. } => "Logged in.",
    };
    print_ok(&format!("{} Continue at ./{}", status, outcome.return_to()));
    Ok(())
}

fn read_password() -> Result<String> {
    eprint!("Password: ");
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read password from stdin")?;
    Ok(line)
}

pub fn handle_logout(config: &AppConfig) -> Result<()> {
    open_gate(config)?.logout()?;
    print_ok("Logged out.");
    Ok(())
}

pub fn handle_whoami(config: &AppConfig) -> Result<()> {
    match open_gate(config)?.status(Utc::now())? {
        SessionStatus::Active { expires_at: Some(expiry) } => {
            let local = expiry.with_timezone(&chrono::Local);
            print_ok(&format!("Admin session active until {}", local.format("%Y-%m-%d %H:%M")));
        }
        SessionStatus::Active { expires_at: None } => print_ok("Admin session active."),
        SessionStatus::Missing => println!("Not logged in."),
    }
    Ok(())
}

// --- Admin console ---

pub fn handle_teams(config: &AppConfig) -> Result<()> {
    let service = admin_console(config)?;
    let teams = block_on(service.teams())??;
    print_block(&render::render_teams(&teams));
    Ok(())
}

pub fn handle_meta(config: &AppConfig) -> Result<()> {
    let service = admin_console(config)?;
    let meta = block_on(service.meta())??;
    println!("{} ({} teams) at {}", meta.league_name, meta.teams.len(), config.api.base_url);
    Ok(())
}

pub fn handle_rounds_list(config: &AppConfig) -> Result<()> {
    let service = admin_console(config)?;
    let rounds = block_on(service.rounds())??;
    print_block(&render::render_rounds(&rounds));
    Ok(())
}

pub fn handle_rounds_create(config: &AppConfig, matchday: u32, season: Option<i64>) -> Result<()> {
    let service = admin_console(config)?;
    let round = block_on(service.create_round(matchday, season))??;
    print_ok(&format!("Round for matchday {} ready (id {}).", round.matchday, round.id));
    Ok(())
}

pub fn handle_sync(config: &AppConfig, matchday: u32, season: Option<i64>) -> Result<()> {
    let service = admin_console(config)?;
    let (summary, matches) = block_on(service.sync(matchday, season))??;
    print_ok(&format!(
        "Synced matchday {} (inserted: {}, updated: {})",
        matchday, summary.inserted, summary.updated
    ));
    print_block(&render::render_matches(&matches));
    Ok(())
}

pub fn handle_matches(config: &AppConfig, matchday: u32) -> Result<()> {
    let service = admin_console(config)?;
    let matches = block_on(service.matches(matchday))??;
    print_block(&render::render_matches(&matches));
    Ok(())
}

pub fn handle_odds(config: &AppConfig, matchday: u32, match_id: i64, edits: OddsEdits) -> Result<()> {
    let service = admin_console(config)?;
    let update = block_on(service.save_odds(matchday, match_id, edits))??;
    if update.is_empty() {
        print_ok(&format!("Odds cleared for match {}", match_id));
        return Ok(());
    }
    let sent: Vec<String> = update
        .query_pairs()
        .into_iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect();
    print_ok(&format!("Odds saved for match {} [{}]", match_id, sent.join(", ")));
    Ok(())
}

pub fn handle_predictions_show(config: &AppConfig, matchday: u32) -> Result<()> {
    let service = admin_console(config)?;
    let model = block_on(service.load(matchday))??;
    print_block(&render::render_predictions(&model));
    Ok(())
}

pub fn handle_predictions_save(config: &AppConfig, matchday: u32, team: &str, picks: &[String]) -> Result<()> {
    let picks = picks
        .iter()
        .map(|arg| parse_pick_arg(arg))
        .collect::<Result<Vec<_>, _>>()?;
    let service = admin_console(config)?;
    block_on(service.save_predictions(matchday, team, &picks))??;
    print_ok(&format!("Predictions saved: {}", team));
    Ok(())
}

pub fn handle_coach_show(config: &AppConfig, matchday: u32) -> Result<()> {
    let service = admin_console(config)?;
    let model = block_on(service.load(matchday))??;
    print_block(&render::render_coach(&model));
    Ok(())
}

pub fn handle_coach_set(config: &AppConfig, matchday: u32, team: &str, points: &str) -> Result<()> {
    let service = admin_console(config)?;
    block_on(service.save_coach(matchday, team, points))??;
    print_ok(&format!("Coach points saved: {}", team));
    Ok(())
}

pub fn handle_coach_save_all(config: &AppConfig, matchday: u32, overrides: &[String]) -> Result<()> {
    let overrides = overrides
        .iter()
        .map(|arg| parse_coach_override(arg))
        .collect::<Result<Vec<_>, _>>()?;
    let service = admin_console(config)?;

    block_on(service.save_all_coach_with(matchday, &overrides))??;

    print_ok("All coach points saved.");
    Ok(())
}

pub fn handle_leader(config: &AppConfig, matchday: u32) -> Result<()> {
    let service = admin_console(config)?;
    match block_on(service.leader(matchday))?? {
        Some(top) => print_ok(&format!("Top: {} ({})", top.team, domain::format_number(top.total))),
        None => println!("No scoreboard data."),
    }
    Ok(())
}

// --- Public scoreboard ---

pub fn handle_standings(config: &AppConfig) -> Result<()> {
    let service = ScoreboardService::new(&config.api)?;
    let standings = block_on(service.season_standings())??;
    print_block(&render::render_scoreboard(&standings));
    Ok(())
}

pub fn handle_scoreboard(config: &AppConfig, matchday: u32) -> Result<()> {
    let service = ScoreboardService::new(&config.api)?;
    let scoreboard = block_on(service.matchday_scoreboard(matchday))??;
    print_block(&render::render_scoreboard(&scoreboard));
    Ok(())
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut io::stdout());
    Ok(())
}
