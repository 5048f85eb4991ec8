use anyhow::Result;
use colored::Colorize;

use fantasy_console::cli::{CoachCommand, Command, PredictionsCommand, RoundsCommand};
use fantasy_console::config::AppConfig;
use fantasy_console::domain::OddsEdits;
use fantasy_console::*;

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("{} {e:#}", "Error:".red().bold());
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let cli = interpret();
    let config = build_config(&cli);
    execute_command(&config, cli.command)
}

fn execute_command(config: &AppConfig, command: Command) -> Result<()> {
    match command {
        Command::Login { password, return_to } => handle_login(config, password, return_to),
        Command::Logout => handle_logout(config),
        Command::Whoami => handle_whoami(config),
        Command::Teams => handle_teams(config),
        Command::Meta => handle_meta(config),
        Command::Rounds { action } => match action {
            RoundsCommand::List => handle_rounds_list(config),
            RoundsCommand::Create { matchday, season } => {
                handle_rounds_create(config, matchday.matchday, season)
            }
        },
        Command::Sync { matchday, season } => handle_sync(config, matchday.matchday, season),
        Command::Matches { matchday } => handle_matches(config, matchday.matchday),
        Command::Odds { matchday, match_id, odd_1, odd_x, odd_2 } => {
            let edits = OddsEdits { odd_1, odd_x, odd_2 };
            handle_odds(config, matchday.matchday, match_id, edits)
        }
        Command::Predictions { action } => match action {
            PredictionsCommand::Show { matchday } => handle_predictions_show(config, matchday.matchday),
            PredictionsCommand::Save { matchday, team, picks } => {
                handle_predictions_save(config, matchday.matchday, &team, &picks)
            }
        },
        Command::Coach { action } => match action {
            CoachCommand::Show { matchday } => handle_coach_show(config, matchday.matchday),
            CoachCommand::Set { matchday, team, points } => {
                handle_coach_set(config, matchday.matchday, &team, &points)
            }
            CoachCommand::SaveAll { matchday, overrides } => {
                handle_coach_save_all(config, matchday.matchday, &overrides)
            }
        },
        Command::Leader { matchday } => handle_leader(config, matchday.matchday),
        Command::Standings => handle_standings(config),
        Command::Scoreboard { matchday } => handle_scoreboard(config, matchday.matchday),
        Command::Completions { shell } => handle_completions(shell),
    }
}
