use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(author, version, about = "fantasy-football admin console and scoreboard viewer")]
pub struct Cli {
    /// Backend base URL (overrides FANTASY_API_BASE)
    #[arg(long, global = true)]
    pub api_base: Option<String>,

    /// Directory holding the local session store (overrides FANTASY_STATE_DIR)
    #[arg(long, global = true)]
    pub state_dir: Option<PathBuf>,

    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(clap::Args, Debug, Clone, Copy, PartialEq)]
pub struct MatchdayArg {
    /// Matchday number
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub matchday: u32,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "kebab-case")]
pub enum Command {
    /// Start an admin session
    Login {
        /// Admin password (read from stdin when omitted)
        #[arg(short, long)]
        password: Option<String>,
        /// Page to continue at after login
        #[arg(long = "return")]
        return_to: Option<String>,
    },
    /// End the admin session
    Logout,
    /// Show whether an admin session is active
    Whoami,
    /// List teams
    Teams,
    /// Show league name and team count
    Meta,
    /// List or create rounds
    Rounds {
        #[clap(subcommand)]
        action: RoundsCommand,
    },
    /// Pull fixtures and results for a matchday from the upstream feed
    Sync {
        #[command(flatten)]
        matchday: MatchdayArg,
        /// Season (defaults to the current one upstream)
        #[arg(long)]
        season: Option<i64>,
    },
    /// Show a matchday's matches with scores and odds
    Matches {
        #[command(flatten)]
        matchday: MatchdayArg,
    },
    /// Edit the odds of one match
    Odds {
        #[command(flatten)]
        matchday: MatchdayArg,
        #[arg(long)]
        match_id: i64,
        /// Home win odd; an empty value clears it
        #[arg(long = "odd-1")]
        odd_1: Option<String>,
        /// Draw odd; an empty value clears it
        #[arg(long = "odd-x")]
        odd_x: Option<String>,
        /// Away win odd; an empty value clears it
        #[arg(long = "odd-2")]
        odd_2: Option<String>,
    },
    /// Show or save team predictions
    Predictions {
        #[clap(subcommand)]
        action: PredictionsCommand,
    },
    /// Show or save coach points
    Coach {
        #[clap(subcommand)]
        action: CoachCommand,
    },
    /// Show the leader of a matchday scoreboard
    Leader {
        #[command(flatten)]
        matchday: MatchdayArg,
    },
    /// Season-wide standings (public)
    Standings,
    /// Scoreboard of one matchday (public)
    Scoreboard {
        #[command(flatten)]
        matchday: MatchdayArg,
    },
    /// Print a shell completion script
    Completions {
        shell: Shell,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "kebab-case")]
pub enum RoundsCommand {
    List,
    Create {
        #[command(flatten)]
        matchday: MatchdayArg,
        #[arg(long)]
        season: Option<i64>,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "kebab-case")]
pub enum PredictionsCommand {
    /// Show stored predictions per team
    Show {
        #[command(flatten)]
        matchday: MatchdayArg,
    },
    /// Replace one team's five predictions
    Save {
        #[command(flatten)]
        matchday: MatchdayArg,
        #[arg(short, long)]
        team: String,
        /// MATCH_ID:PICK, repeated once per slot (PICK is 1, X or 2)
        #[arg(short, long = "pick")]
        picks: Vec<String>,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "kebab-case")]
pub enum CoachCommand {
    /// Show coach points per team
    Show {
        #[command(flatten)]
        matchday: MatchdayArg,
    },
    /// Save one team's coach points
    Set {
        #[command(flatten)]
        matchday: MatchdayArg,
        #[arg(short, long)]
        team: String,
        #[arg(short, long, allow_hyphen_values = true)]
        points: String,
    },
    /// Save coach points for every team, in order
    SaveAll {
        #[command(flatten)]
        matchday: MatchdayArg,
        /// TEAM=POINTS overrides applied before saving
        #[arg(short, long = "points")]
        overrides: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_matchday_defaults_to_one() {
        let cli = Cli::parse_from(["fantasy-console", "matches"]);
        assert_eq!(
            cli.command,
            Command::Matches { matchday: MatchdayArg { matchday: 1 } }
        );
    }

    #[test]
    fn test_matchday_must_be_positive() {
        assert!(Cli::try_parse_from(["fantasy-console", "matches", "--matchday", "0"]).is_err());
    }

    #[test]
    fn test_repeated_picks_and_global_flags() {
        let cli = Cli::parse_from([
            "fantasy-console",
            "predictions",
            "save",
            "-m",
            "4",
            "--team",
            "Alpha",
            "--pick",
            "1:1",
            "--pick",
            "2:X",
            "--api-base",
            "http://localhost:9000",
        ]);

        assert_eq!(cli.api_base.as_deref(), Some("http://localhost:9000"));
        match cli.command {
            Command::Predictions { action: PredictionsCommand::Save { matchday, team, picks } } => {
                assert_eq!(matchday.matchday, 4);
                assert_eq!(team, "Alpha");
                assert_eq!(picks, vec!["1:1", "2:X"]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_empty_odds_value_is_kept() {
        let cli = Cli::parse_from(["fantasy-console", "odds", "--match-id", "9", "--odd-1", ""]);
        match cli.command {
            Command::Odds { odd_1, odd_x, .. } => {
                assert_eq!(odd_1.as_deref(), Some(""));
                assert_eq!(odd_x, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
