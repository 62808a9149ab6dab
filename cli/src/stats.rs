//! Client for NBA.com's stats API.
//!
//! Every endpoint answers with the same envelope: a list of named result
//! sets, each a header row plus positional rows. Columns are always located
//! by header name, never by position.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::birthdate::{parse_birthdate, BirthdateLookup};
use crate::config::Config;
use crate::types::{NbaPlayer, Player};

const LEAGUE_ID: &str = "00";
const PLAYER_INFO_SET: &str = "CommonPlayerInfo";

#[derive(Debug, Default, Deserialize)]
pub struct StatsResponse {
    #[serde(rename = "resultSets", default)]
    pub result_sets: Vec<ResultSet>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResultSet {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub headers: Vec<String>,
    #[serde(rename = "rowSet", default)]
    pub row_set: Vec<Vec<Value>>,
}

impl ResultSet {
    pub fn column(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    fn required_column(&self, header: &str) -> Result<usize> {
        self.column(header)
            .ok_or_else(|| anyhow!("column {} missing from result set '{}'", header, self.name))
    }
}

/// Text of a cell; numbers are rendered verbatim, null and empty become `None`.
fn cell_text(row: &[Value], idx: usize) -> Option<String> {
    let text = match row.get(idx)? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

/// Extract players from a `commonallplayers` response.
pub fn parse_player_ids(response: &StatsResponse) -> Result<Vec<Player>> {
    let set = response
        .result_sets
        .first()
        .ok_or_else(|| anyhow!("No data returned from API"))?;

    let idx_person_id = set.required_column("PERSON_ID")?;
    let idx_name = set.required_column("DISPLAY_FIRST_LAST")?;
    let team_columns = set.column("TEAM_CITY").zip(set.column("TEAM_NAME"));

    let mut players = Vec::with_capacity(set.row_set.len());
    for row in &set.row_set {
        let Some(person_id) = cell_text(row, idx_person_id) else {
            debug!("Skipping row without PERSON_ID: {:?}", row);
            continue;
        };

        let team = match team_columns {
            Some((city, name)) => match (cell_text(row, city), cell_text(row, name)) {
                (Some(city), Some(name)) => format!("{} {}", city, name),
                _ => String::new(),
            },
            None => String::new(),
        };

        players.push(Player {
            name: cell_text(row, idx_name).unwrap_or_default(),
            person_id,
            team,
        });
    }

    Ok(players)
}

/// Split "Last, First" into `(first, last)`. Single names land in `last`.
fn split_last_comma_first(display: &str) -> (String, String) {
    match display.split_once(',') {
        Some((last, first)) => (first.trim().to_string(), last.trim().to_string()),
        None => (String::new(), display.trim().to_string()),
    }
}

fn split_first_last(display: &str) -> (String, String) {
    match display.trim().split_once(char::is_whitespace) {
        Some((first, last)) => (first.to_string(), last.trim().to_string()),
        None => (String::new(), display.trim().to_string()),
    }
}

/// Extract the full NBA.com player list (used as the matching source) from a
/// `commonallplayers` response.
pub fn parse_nba_players(response: &StatsResponse) -> Result<Vec<NbaPlayer>> {
    let set = response
        .result_sets
        .first()
        .ok_or_else(|| anyhow!("No data returned from API"))?;

    let idx_person_id = set.required_column("PERSON_ID")?;
    let idx_last_comma_first = set.column("DISPLAY_LAST_COMMA_FIRST");
    let idx_first_last = set.column("DISPLAY_FIRST_LAST");

    if idx_last_comma_first.is_none() && idx_first_last.is_none() {
        return Err(anyhow!("no player name column in result set '{}'", set.name));
    }

    let mut players = Vec::with_capacity(set.row_set.len());
    for row in &set.row_set {
        let Some(id) = cell_text(row, idx_person_id).and_then(|id| id.parse::<u64>().ok()) else {
            continue;
        };

        let (first_name, last_name) = match (
            idx_last_comma_first.and_then(|i| cell_text(row, i)),
            idx_first_last.and_then(|i| cell_text(row, i)),
        ) {
            (Some(display), _) => split_last_comma_first(&display),
            (None, Some(display)) => split_first_last(&display),
            (None, None) => continue,
        };

        players.push(NbaPlayer { id, first_name, last_name });
    }

    Ok(players)
}

/// Raw birthdate text from a `commonplayerinfo` response, if present.
pub fn extract_raw_birthdate(response: &StatsResponse) -> Option<String> {
    response
        .result_sets
        .iter()
        .filter(|set| set.name == PLAYER_INFO_SET)
        .find_map(|set| {
            let idx = set.column("BIRTHDATE")?;
            cell_text(set.row_set.first()?, idx)
        })
}

/// Birthdate from a `commonplayerinfo` response, normalized to `YYYY-MM-DD`.
pub fn extract_birthdate(response: &StatsResponse) -> Option<String> {
    extract_raw_birthdate(response).and_then(|raw| parse_birthdate(&raw))
}

/// NBA stats API client
pub struct StatsClient {
    client: Client,
    base_url: String,
    miss_delay: Duration,
}

impl StatsClient {
    pub fn new(client: Client, config: &Config) -> Self {
        Self {
            client,
            base_url: config.stats_base.trim_end_matches('/').to_string(),
            miss_delay: config.rate_limits.miss_delay,
        }
    }

    async fn get(&self, endpoint: &str, params: &[(&str, String)]) -> Result<StatsResponse> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .with_context(|| format!("Failed to fetch {}", endpoint))?;

        if !response.status().is_success() {
            anyhow::bail!("HTTP {} for {}", response.status(), endpoint);
        }

        response
            .json::<StatsResponse>()
            .await
            .with_context(|| format!("Failed to parse {} response", endpoint))
    }

    fn all_players_params(season: &str, only_current: bool) -> Vec<(&'static str, String)> {
        vec![
            ("LeagueID", LEAGUE_ID.to_string()),
            ("Season", season.to_string()),
            ("IsOnlyCurrentSeason", if only_current { "1" } else { "0" }.to_string()),
        ]
    }

    pub async fn try_fetch_player_ids(&self, season: &str, only_current: bool) -> Result<Vec<Player>> {
        let response = self
            .get("commonallplayers", &Self::all_players_params(season, only_current))
            .await?;
        parse_player_ids(&response)
    }

    /// Fetch the player list for a season. Failures are logged and give an
    /// empty list.
    pub async fn fetch_player_ids(&self, season: &str, only_current: bool) -> Vec<Player> {
        println!(
            "📡 Fetching player data for season {} (current-only: {})...",
            season, only_current
        );

        match self.try_fetch_player_ids(season, only_current).await {
            Ok(players) => {
                println!("✅ Fetched {} players", players.len());
                players
            }
            Err(e) => {
                println!("❌ Error fetching player data: {:#}", e);
                warn!("player ID fetch failed for season {}: {:#}", season, e);
                Vec::new()
            }
        }
    }

    /// Every player NBA.com has on record, current and historical
    pub async fn fetch_all_players(&self, season: &str) -> Result<Vec<NbaPlayer>> {
        let response = self
            .get("commonallplayers", &Self::all_players_params(season, false))
            .await?;
        parse_nba_players(&response)
    }

    /// Look up a player's birthdate. Any failure, including an unparseable
    /// date, is reported as `None`.
    pub async fn fetch_birthdate(&self, nba_id: u64) -> Option<String> {
        let params = [
            ("PlayerID", nba_id.to_string()),
            ("LeagueID", LEAGUE_ID.to_string()),
        ];

        let birthdate = match self.get("commonplayerinfo", &params).await {
            Ok(response) => extract_birthdate(&response),
            Err(e) => {
                debug!("commonplayerinfo failed for {}: {:#}", nba_id, e);
                None
            }
        };

        if birthdate.is_none() {
            sleep(self.miss_delay).await;
        }
        birthdate
    }
}

impl BirthdateLookup for StatsClient {
    async fn lookup_birthdate(&self, nba_id: u64) -> Option<String> {
        self.fetch_birthdate(nba_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(body: Value) -> StatsResponse {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn parses_players_with_teams() {
        let resp = response(json!({
            "resultSets": [{
                "name": "CommonAllPlayers",
                "headers": ["PERSON_ID", "DISPLAY_LAST_COMMA_FIRST", "DISPLAY_FIRST_LAST", "TEAM_CITY", "TEAM_NAME"],
                "rowSet": [
                    [2544, "James, LeBron", "LeBron James", "Los Angeles", "Lakers"],
                    [1630173, "Achiuwa, Precious", "Precious Achiuwa", "", ""],
                    [null, "Nobody, No", "No Nobody", "X", "Y"]
                ]
            }]
        }));

        let players = parse_player_ids(&resp).unwrap();
        assert_eq!(players.len(), 2);
        assert_eq!(
            players[0],
            Player {
                name: "LeBron James".to_string(),
                person_id: "2544".to_string(),
                team: "Los Angeles Lakers".to_string(),
            }
        );
        assert_eq!(players[1].team, "");
    }

    #[test]
    fn missing_team_columns_give_empty_team() {
        let resp = response(json!({
            "resultSets": [{
                "name": "CommonAllPlayers",
                "headers": ["PERSON_ID", "DISPLAY_FIRST_LAST", "TEAM_CITY"],
                "rowSet": [[201939, "Stephen Curry", "Golden State"]]
            }]
        }));

        let players = parse_player_ids(&resp).unwrap();
        assert_eq!(players[0].person_id, "201939");
        assert_eq!(players[0].team, "");
    }

    #[test]
    fn malformed_responses_are_errors() {
        assert!(parse_player_ids(&response(json!({ "resultSets": [] }))).is_err());

        let no_id = response(json!({
            "resultSets": [{ "name": "x", "headers": ["DISPLAY_FIRST_LAST"], "rowSet": [] }]
        }));
        assert!(parse_player_ids(&no_id).is_err());
    }

    #[test]
    fn splits_matching_names() {
        let resp = response(json!({
            "resultSets": [{
                "name": "CommonAllPlayers",
                "headers": ["PERSON_ID", "DISPLAY_LAST_COMMA_FIRST", "DISPLAY_FIRST_LAST", "ROSTERSTATUS"],
                "rowSet": [
                    [203999, "Jokic, Nikola", "Nikola Jokic", 1],
                    [1630178, "Gilgeous-Alexander, Shai", "Shai Gilgeous-Alexander", 1],
                    [76003, "Nene", "Nene", 0]
                ]
            }]
        }));

        let players = parse_nba_players(&resp).unwrap();
        assert_eq!(players.len(), 3);
        assert_eq!(players[0].first_name, "Nikola");
        assert_eq!(players[0].last_name, "Jokic");
        assert_eq!(players[1].last_name, "Gilgeous-Alexander");
        assert_eq!(players[2].first_name, "");
        assert_eq!(players[2].last_name, "Nene");
    }

    #[test]
    fn falls_back_to_first_last_display() {
        let resp = response(json!({
            "resultSets": [{
                "name": "CommonAllPlayers",
                "headers": ["PERSON_ID", "DISPLAY_FIRST_LAST"],
                "rowSet": [["201142", "Kevin Durant"]]
            }]
        }));

        let players = parse_nba_players(&resp).unwrap();
        assert_eq!(players[0].id, 201142);
        assert_eq!(players[0].first_name, "Kevin");
        assert_eq!(players[0].last_name, "Durant");
    }

    #[test]
    fn extracts_birthdate_from_player_info() {
        let resp = response(json!({
            "resultSets": [
                { "name": "PlayerHeadlineStats", "headers": ["BIRTHDATE"], "rowSet": [["bogus"]] },
                {
                    "name": "CommonPlayerInfo",
                    "headers": ["PERSON_ID", "BIRTHDATE"],
                    "rowSet": [[2544, "1984-12-30T00:00:00"]]
                }
            ]
        }));

        assert_eq!(extract_birthdate(&resp).as_deref(), Some("1984-12-30"));
    }

    #[test]
    fn missing_birthdate_is_none() {
        let no_rows = response(json!({
            "resultSets": [{ "name": "CommonPlayerInfo", "headers": ["BIRTHDATE"], "rowSet": [] }]
        }));
        assert_eq!(extract_birthdate(&no_rows), None);

        let no_column = response(json!({
            "resultSets": [{ "name": "CommonPlayerInfo", "headers": ["PERSON_ID"], "rowSet": [[1]] }]
        }));
        assert_eq!(extract_birthdate(&no_column), None);

        let unparseable = response(json!({
            "resultSets": [{ "name": "CommonPlayerInfo", "headers": ["BIRTHDATE"], "rowSet": [["Dec 30 1984"]] }]
        }));
        assert_eq!(extract_raw_birthdate(&unparseable).as_deref(), Some("Dec 30 1984"));
        assert_eq!(extract_birthdate(&unparseable), None);
    }

    mod client {
        use std::time::Duration;

        use reqwest::Client;

        use crate::config::Config;
        use crate::stats::StatsClient;
        use crate::test_server::TestServer;

        fn local_client(base_url: &str) -> StatsClient {
            let mut config = Config { stats_base: base_url.to_string(), ..Config::default() };
            config.rate_limits.miss_delay = Duration::ZERO;
            let client = Client::builder().timeout(Duration::from_secs(2)).build().unwrap();
            StatsClient::new(client, &config)
        }

        const ALL_PLAYERS: &str = r#"{
            "resultSets": [{
                "name": "CommonAllPlayers",
                "headers": ["PERSON_ID", "DISPLAY_LAST_COMMA_FIRST", "DISPLAY_FIRST_LAST", "TEAM_CITY", "TEAM_NAME"],
                "rowSet": [[2544, "James, LeBron", "LeBron James", "Los Angeles", "Lakers"]]
            }]
        }"#;

        #[tokio::test]
        async fn player_ids_request_carries_season_filters() {
            let server = TestServer::start(|_| (200, ALL_PLAYERS.to_string())).await;
            let stats = local_client(&server.base_url);

            let players = stats.fetch_player_ids("2024-25", true).await;
            assert_eq!(players.len(), 1);
            assert_eq!(players[0].team, "Los Angeles Lakers");

            let nba_players = stats.fetch_all_players("2024-25").await.unwrap();
            assert_eq!(nba_players[0].first_name, "LeBron");

            assert_eq!(
                server.requests(),
                vec![
                    "/commonallplayers?LeagueID=00&Season=2024-25&IsOnlyCurrentSeason=1",
                    "/commonallplayers?LeagueID=00&Season=2024-25&IsOnlyCurrentSeason=0",
                ]
            );
        }

        #[tokio::test]
        async fn error_status_is_reported() {
            let server = TestServer::start(|_| (503, String::new())).await;
            let stats = local_client(&server.base_url);

            let err = stats.try_fetch_player_ids("2024-25", true).await.unwrap_err();
            assert!(err.to_string().contains("503"), "unexpected error: {err}");
            assert!(stats.fetch_player_ids("2024-25", true).await.is_empty());
        }

        #[tokio::test]
        async fn birthdate_lookup() {
            let server = TestServer::start(|target| {
                if target.starts_with("/commonplayerinfo?PlayerID=2544&") {
                    let body = r#"{ "resultSets": [{ "name": "CommonPlayerInfo", "headers": ["BIRTHDATE"], "rowSet": [["1984-12-30T00:00:00"]] }] }"#;
                    (200, body.to_string())
                } else {
                    (404, String::new())
                }
            })
            .await;
            let stats = local_client(&server.base_url);

            assert_eq!(stats.fetch_birthdate(2544).await.as_deref(), Some("1984-12-30"));
            assert_eq!(stats.fetch_birthdate(1).await, None);
            assert_eq!(
                server.requests()[1],
                "/commonplayerinfo?PlayerID=1&LeagueID=00"
            );
        }
    }
}
