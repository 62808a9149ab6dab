use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::types::BirthdateMap;

const CONSTANTS_HEADER: &str = concat!(
    "/**\n",
    " * Player Birthdates Constants\n",
    " * \n",
    " * This file contains birthdates for NBA players keyed by their API ID.\n",
    " * Generated by fetch-player-birthdates.py using nba_api\n",
    " * \n",
    " * Format: YYYY-MM-DD (ISO date string)\n",
    " */\n",
    "\n",
    "export const PLAYER_BIRTHDATES: Record<number, string> = {\n",
);
const CONSTANTS_FOOTER: &str = "};\n";

/// Render birthdates as a typed constants table, one entry per ID in
/// ascending order.
pub fn render_constants(birthdates: &BirthdateMap) -> String {
    let mut out = String::from(CONSTANTS_HEADER);
    for (api_id, birthdate) in birthdates {
        let _ = writeln!(out, "  {}: '{}',", api_id, birthdate);
    }
    out.push_str(CONSTANTS_FOOTER);
    out
}

pub fn write_constants_file(birthdates: &BirthdateMap, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, render_constants(birthdates))
        .with_context(|| format!("Failed to write {}", path.display()))
}

pub fn write_json_file(birthdates: &BirthdateMap, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(birthdates)?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}
