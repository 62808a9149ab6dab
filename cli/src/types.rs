use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A player as listed by the NBA stats `commonallplayers` endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub person_id: String,
    /// "City Name", or empty when the player has no team
    pub team: String,
}

/// One row of the player ID CSV, as read back by the headshot downloader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadshotRow {
    pub name: String,
    pub person_id: String,
}

/// A player from the BallDontLie `players/active` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct BdlPlayer {
    pub id: Option<u64>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl BdlPlayer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Deserialize)]
pub struct BdlMeta {
    #[serde(default)]
    pub next_cursor: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct BdlPage {
    #[serde(default)]
    pub data: Vec<BdlPlayer>,
    pub meta: Option<BdlMeta>,
}

/// A player known to NBA.com, keyed by stats person ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NbaPlayer {
    pub id: u64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

/// BallDontLie ID -> `YYYY-MM-DD`, ordered by ID.
pub type BirthdateMap = BTreeMap<u64, String>;
