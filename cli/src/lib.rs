//! NBA player metadata tools: player IDs, headshots and birthdates.

pub mod balldontlie;
pub mod birthdate;
pub mod config;
pub mod headshot;
pub mod http;
pub mod matcher;
pub mod output;
pub mod player_csv;
pub mod stats;
pub mod types;

#[cfg(test)]
mod test_server;

pub use balldontlie::BallDontLieClient;
pub use config::Config;
pub use stats::StatsClient;
pub use types::{BdlPlayer, BirthdateMap, HeadshotRow, NbaPlayer, Player};
