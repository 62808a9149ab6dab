use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use reqwest::{Client, StatusCode};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::config::DEFAULT_HEADSHOT_BASE;
use crate::player_csv::read_headshot_rows;
use crate::types::HeadshotRow;

/// Image sizes served by the NBA.com headshot CDN
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum HeadshotSize {
    #[default]
    #[value(name = "1040x760")]
    Large,
    #[value(name = "260x190")]
    Small,
}

impl HeadshotSize {
    pub fn as_str(self) -> &'static str {
        match self {
            HeadshotSize::Large => "1040x760",
            HeadshotSize::Small => "260x190",
        }
    }
}

#[derive(Debug, Clone)]
pub struct HeadshotSource {
    pub base_url: String,
    pub size: HeadshotSize,
}

impl Default for HeadshotSource {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_HEADSHOT_BASE.to_string(),
            size: HeadshotSize::default(),
        }
    }
}

impl HeadshotSource {
    pub fn url_for(&self, person_id: &str) -> String {
        format!(
            "{}/{}/{}.png",
            self.base_url.trim_end_matches('/'),
            self.size.as_str(),
            person_id
        )
    }
}

/// Default CDN URL for a player's headshot.
pub fn headshot_url(person_id: &str) -> String {
    HeadshotSource::default().url_for(person_id)
}

/// Target file for a player's headshot: spaces become underscores.
pub fn image_path(output_dir: &Path, player_name: &str) -> PathBuf {
    output_dir.join(format!("{}.jpg", player_name.replace(' ', "_")))
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DownloadSummary {
    pub downloaded: usize,
    pub skipped: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DownloadOutcome {
    Saved,
    Status(StatusCode),
}

async fn stream_to_file(mut response: reqwest::Response, path: &Path) -> Result<()> {
    let mut file = fs::File::create(path)
        .await
        .with_context(|| format!("Failed to create {}", path.display()))?;

    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk).await?;
    }
    file.flush().await?;
    Ok(())
}

async fn download_one(client: &Client, url: &str, path: &Path) -> Result<DownloadOutcome> {
    let response = client.get(url).send().await?;
    if response.status() != StatusCode::OK {
        return Ok(DownloadOutcome::Status(response.status()));
    }

    if let Err(e) = stream_to_file(response, path).await {
        // A truncated image would be skipped forever on the next run.
        let _ = fs::remove_file(path).await;
        return Err(e);
    }
    Ok(DownloadOutcome::Saved)
}

/// Download every row's headshot into `output_dir`, skipping images that
/// already exist. Per-row failures are counted, never fatal.
pub async fn download_rows(
    client: &Client,
    rows: &[HeadshotRow],
    output_dir: &Path,
    source: &HeadshotSource,
) -> Result<DownloadSummary> {
    fs::create_dir_all(output_dir)
        .await
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let mut summary = DownloadSummary::default();

    for row in rows {
        let path = image_path(output_dir, &row.name);
        if fs::try_exists(&path).await.unwrap_or(false) {
            println!("⏭️  Skipping {} (already exists)", row.name);
            summary.skipped += 1;
            continue;
        }

        let url = source.url_for(&row.person_id);
        debug!("GET {}", url);

        match download_one(client, &url, &path).await {
            Ok(DownloadOutcome::Saved) => {
                println!("✅ Downloaded: {}", row.name);
                summary.downloaded += 1;
            }
            Ok(DownloadOutcome::Status(status)) => {
                println!("❌ Failed to download {} (Status: {})", row.name, status.as_u16());
                summary.failed += 1;
            }
            Err(e) => {
                println!("❌ Error downloading {}: {:#}", row.name, e);
                warn!("headshot download failed for {} ({}): {:#}", row.name, row.person_id, e);
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}

/// Read a player CSV and download each player's headshot.
pub async fn download_headshots(
    client: &Client,
    csv_path: &Path,
    output_dir: &Path,
    source: &HeadshotSource,
) -> Result<DownloadSummary> {
    if !fs::try_exists(csv_path).await.unwrap_or(false) {
        anyhow::bail!("CSV file '{}' not found", csv_path.display());
    }

    let rows = read_headshot_rows(csv_path)?;
    download_rows(client, &rows, output_dir, source).await
}
