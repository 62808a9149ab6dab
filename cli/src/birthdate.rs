use std::time::Duration;

use chrono::NaiveDate;
use tokio::time::sleep;
use tracing::{debug, info};

use crate::matcher::find_nba_player_id;
use crate::types::{BdlPlayer, BirthdateMap, NbaPlayer};

/// Formats tried in order; the first that parses wins.
pub const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%m/%d/%Y", "%m-%d-%Y", "%Y/%m/%d"];

/// Parse a birthdate in any known format and normalize it to `YYYY-MM-DD`.
///
/// The stats API reports midnight timestamps (`1984-12-30T00:00:00`); the
/// time part is dropped before parsing.
pub fn parse_birthdate(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let date_part = raw.split_once('T').map_or(raw, |(date, _)| date);

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
        .map(|date| date.format("%Y-%m-%d").to_string())
}

/// Where birthdates come from, keyed by NBA stats ID.
#[allow(async_fn_in_trait)]
pub trait BirthdateLookup {
    async fn lookup_birthdate(&self, nba_id: u64) -> Option<String>;
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BirthdateReport {
    pub matched: usize,
    pub found: usize,
    pub not_found: usize,
}

/// Match every BallDontLie player against the NBA.com list and look up the
/// birthdate of each match. Players without an ID are ignored.
pub async fn collect_birthdates<L: BirthdateLookup>(
    players: &[BdlPlayer],
    nba_players: &[NbaPlayer],
    lookup: &L,
    player_delay: Duration,
) -> (BirthdateMap, BirthdateReport) {
    let mut birthdates = BirthdateMap::new();
    let mut report = BirthdateReport::default();
    let total = players.len();

    for (i, player) in players.iter().enumerate() {
        let Some(api_id) = player.id else {
            continue;
        };
        let prefix = format!("  [{}/{}] {} (ID: {})...", i + 1, total, player.full_name(), api_id);

        let Some(found) = find_nba_player_id(player, nba_players) else {
            report.not_found += 1;
            println!("{} ❌ No match found in NBA API", prefix);
            continue;
        };
        report.matched += 1;
        debug!("{} -> NBA ID {} via {:?}", player.full_name(), found.nba_id, found.rule);

        match lookup.lookup_birthdate(found.nba_id).await {
            Some(birthdate) => {
                println!("{} Matched (NBA ID: {})... ✅ {}", prefix, found.nba_id, birthdate);
                birthdates.insert(api_id, birthdate);
                report.found += 1;
            }
            None => {
                println!("{} Matched (NBA ID: {})... ❌ Birthdate not found", prefix, found.nba_id);
                report.not_found += 1;
            }
        }

        sleep(player_delay).await;
    }

    info!(
        "birthdate run: {} matched, {} found, {} not found",
        report.matched, report.found, report.not_found
    );
    (birthdates, report)
}
