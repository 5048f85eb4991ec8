pub mod fantasy_client;

pub use fantasy_client::FantasyClient;
