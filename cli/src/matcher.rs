//! Matching BallDontLie players to NBA.com stats IDs by name.
//!
//! The two sources spell names differently ("Lebron" vs "LeBron",
//! "Nic" vs "Nicolas"), so names are normalized and compared with a fixed
//! ladder of rules. The first rule that finds a candidate wins.
//!
//! Each rule scans the whole list before the next rule runs. This differs
//! from checking two rules per candidate in one pass: for "Karl-Anthony
//! Towns" against `[Karl / Anthony Towns, Karl Anthony / Towns]` the
//! exact first/last rule picks the second entry, not the first.
//!
//! The prefix rules can pick the wrong player when two players share a
//! surname and a three letter prefix. Ties are not detected.

use crate::types::{BdlPlayer, NbaPlayer};

const PREFIX_LEN: usize = 3;

/// Which rule produced a match, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    ExactFirstLast,
    ExactFullName,
    FirstPrefixLastExact,
    FirstExactLastPrefix,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerMatch {
    pub nba_id: u64,
    pub rule: MatchRule,
}

/// Lowercase, drop apostrophes and periods, turn hyphens into spaces, trim.
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase()
        .replace('\'', "")
        .replace('-', " ")
        .replace('.', "")
        .trim()
        .to_string()
}

fn prefix(name: &str) -> String {
    name.chars().take(PREFIX_LEN).collect()
}

struct Normalized {
    id: u64,
    first: String,
    last: String,
    full: String,
}

impl Normalized {
    fn new(id: u64, first: &str, last: &str) -> Self {
        Self {
            id,
            first: normalize_name(first),
            last: normalize_name(last),
            full: normalize_name(&format!("{} {}", first, last)),
        }
    }
}

/// Find the NBA.com ID for a BallDontLie player, or `None` when no rule
/// matches.
pub fn find_nba_player_id(player: &BdlPlayer, nba_players: &[NbaPlayer]) -> Option<PlayerMatch> {
    find_by_name(player.first_name.trim(), player.last_name.trim(), nba_players)
}

pub fn find_by_name(first_name: &str, last_name: &str, nba_players: &[NbaPlayer]) -> Option<PlayerMatch> {
    let target = Normalized::new(0, first_name, last_name);
    let first_prefix = prefix(&target.first);
    let last_prefix = prefix(&target.last);

    let candidates: Vec<Normalized> = nba_players
        .iter()
        .map(|p| Normalized::new(p.id, &p.first_name, &p.last_name))
        .collect();

    const RULES: [MatchRule; 4] = [
        MatchRule::ExactFirstLast,
        MatchRule::ExactFullName,
        MatchRule::FirstPrefixLastExact,
        MatchRule::FirstExactLastPrefix,
    ];

    RULES.into_iter().find_map(|rule| {
        candidates
            .iter()
            .find(|c| rule.matches(c, &target, &first_prefix, &last_prefix))
            .map(|c| PlayerMatch { nba_id: c.id, rule })
    })
}

impl MatchRule {
    fn matches(self, candidate: &Normalized, target: &Normalized, first_prefix: &str, last_prefix: &str) -> bool {
        match self {
            MatchRule::ExactFirstLast => candidate.first == target.first && candidate.last == target.last,
            MatchRule::ExactFullName => candidate.full == target.full,
            MatchRule::FirstPrefixLastExact => {
                candidate.first.starts_with(first_prefix) && candidate.last == target.last
            }
            MatchRule::FirstExactLastPrefix => {
                candidate.first == target.first && candidate.last.starts_with(last_prefix)
            }
        }
    }
}
