pub mod tables;

use colored::Colorize;

pub use tables::{
    render_coach, render_matches, render_predictions, render_rounds, render_scoreboard,
    render_teams, Table,
};

pub fn print_ok(message: &str) {
    println!("{}", message.green());
}

pub fn print_block(block: &str) {
    print!("{}", block);
}
