use std::path::Path;

use anyhow::{Context, Result};

use crate::headshot::headshot_url;
use crate::types::{HeadshotRow, Player};

pub const CSV_HEADER: [&str; 4] = ["Name", "PersonID", "Team", "HeadshotURL"];

/// Write players to `path`, replacing any existing file.
pub fn write_players_csv(players: &[Player], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    writer.write_record(CSV_HEADER)?;
    for player in players {
        let url = headshot_url(&player.person_id);
        writer.write_record([
            player.name.as_str(),
            player.person_id.as_str(),
            player.team.as_str(),
            url.as_str(),
        ])?;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Where the name and ID live in a player CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub name: usize,
    pub person_id: usize,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self { name: 0, person_id: 1 }
    }
}

impl ColumnLayout {
    /// Locate columns by header name. Returns `None` when the record holds
    /// none of the known header names.
    pub fn from_header(header: &csv::StringRecord) -> Option<Self> {
        let find = |names: &[&str]| header.iter().position(|h| names.contains(&h.trim()));

        let person_id = find(&["PersonID", "personId"]);
        let name = find(&["Name"]);
        if person_id.is_none() && name.is_none() {
            return None;
        }

        let fallback = Self::default();
        Some(Self {
            name: name.unwrap_or(fallback.name),
            person_id: person_id.unwrap_or(fallback.person_id),
        })
    }

    fn row(&self, record: &csv::StringRecord) -> Option<HeadshotRow> {
        if record.len() < 2 {
            return None;
        }

        let person_id = record.get(self.person_id)?.trim().to_string();
        if person_id.is_empty() {
            return None;
        }

        let name = record
            .get(self.name)
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(&person_id)
            .to_string();

        Some(HeadshotRow { name, person_id })
    }
}

fn looks_numeric(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

/// Read the rows to download from a player CSV. The header row is optional;
/// without one the name is column 0 and the ID column 1.
pub fn read_headshot_rows(path: impl AsRef<Path>) -> Result<Vec<HeadshotRow>> {
    let path = path.as_ref();
    let reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    read_rows(reader)
}

fn read_rows<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<HeadshotRow>> {
    let mut records = reader.records();
    let mut rows = Vec::new();

    let Some(first) = records.next().transpose()? else {
        return Ok(rows);
    };

    let layout = match ColumnLayout::from_header(&first) {
        Some(layout) => layout,
        None => {
            let layout = ColumnLayout::default();
            // Unrecognised header: keep it only if it is really a data row.
            if first.get(layout.person_id).is_some_and(looks_numeric) {
                rows.extend(layout.row(&first));
            }
            layout
        }
    };

    for record in records {
        let record = record?;
        rows.extend(layout.row(&record));
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_str(data: &str) -> Vec<HeadshotRow> {
        let reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(data.as_bytes());
        read_rows(reader).unwrap()
    }

    #[test]
    fn writes_header_and_one_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ids.csv");
        let players = vec![Player {
            name: "A".to_string(),
            person_id: "1".to_string(),
            team: String::new(),
        }];

        write_players_csv(&players, &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "Name,PersonID,Team,HeadshotURL");
        assert_eq!(
            lines[1],
            "A,1,,https://cdn.nba.com/headshots/nba/latest/1040x760/1.png"
        );
    }

    #[test]
    fn overwrites_and_quotes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ids.csv");
        std::fs::write(&path, "stale contents\nmore\nand more\n").unwrap();

        let players = vec![Player {
            name: "Smith, Jr.".to_string(),
            person_id: "203".to_string(),
            team: "Los Angeles Lakers".to_string(),
        }];
        write_players_csv(&players, &path).unwrap();

        let rows = read_headshot_rows(&path).unwrap();
        assert_eq!(
            rows,
            vec![HeadshotRow { name: "Smith, Jr.".to_string(), person_id: "203".to_string() }]
        );
    }

    #[test]
    fn locates_columns_by_header() {
        let rows = read_str("Team,personId,Name\nLakers,2544,LeBron James\n");
        assert_eq!(
            rows,
            vec![HeadshotRow { name: "LeBron James".to_string(), person_id: "2544".to_string() }]
        );
    }

    #[test]
    fn headerless_file_uses_fixed_positions() {
        let rows = read_str("LeBron James,2544\nStephen Curry,201939\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].person_id, "2544");
        assert_eq!(rows[1].name, "Stephen Curry");
    }

    #[test]
    fn unknown_header_is_skipped() {
        let rows = read_str("Player,Id\nLeBron James,2544\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "LeBron James");
    }

    #[test]
    fn short_and_empty_rows_are_skipped() {
        let rows = read_str("Name,PersonID\nlonely\nNo Id,\n,77\n");
        assert_eq!(
            rows,
            vec![HeadshotRow { name: "77".to_string(), person_id: "77".to_string() }]
        );
    }
}
