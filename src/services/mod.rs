pub mod console;
pub mod scoreboard;

pub use console::AdminConsoleService;
pub use scoreboard::ScoreboardService;
