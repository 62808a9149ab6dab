use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::Client;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::config::Config;
use crate::types::{BdlPage, BdlPlayer};

const PER_PAGE: u32 = 100;

/// Client for the BallDontLie players API
pub struct BallDontLieClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    page_delay: Duration,
}

impl BallDontLieClient {
    pub fn new(client: Client, config: &Config) -> Self {
        Self {
            client,
            base_url: config.balldontlie_base.clone(),
            api_key: config.balldontlie_key.clone(),
            page_delay: config.rate_limits.page_delay,
        }
    }

    fn page_params(cursor: Option<u64>) -> Vec<(&'static str, String)> {
        let mut params = vec![("per_page", PER_PAGE.to_string())];
        if let Some(cursor) = cursor {
            params.push(("cursor", cursor.to_string()));
        }
        params
    }

    async fn fetch_page(&self, cursor: Option<u64>) -> Result<BdlPage> {
        let url = format!("{}/players/active", self.base_url);

        let mut request = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .query(&Self::page_params(cursor));
        if let Some(key) = &self.api_key {
            request = request.header(AUTHORIZATION, key);
        }

        let response = request
            .send()
            .await
            .context("Failed to fetch BallDontLie players")?;

        if !response.status().is_success() {
            anyhow::bail!("HTTP {} for {}", response.status(), url);
        }

        response
            .json::<BdlPage>()
            .await
            .context("Failed to parse BallDontLie players page")
    }

    /// Fetch every active player, following the cursor until the last page.
    /// A failing page ends pagination; whatever was collected is returned.
    pub async fn fetch_active_players(&self) -> Vec<BdlPlayer> {
        println!("📡 Fetching players from BallDontLie API...");

        let mut players = Vec::new();
        let mut cursor = None;
        let mut page = 1;

        loop {
            let result = match self.fetch_page(cursor).await {
                Ok(result) => result,
                Err(e) => {
                    println!("❌ Error fetching players: {:#}", e);
                    warn!("BallDontLie page {} failed: {:#}", page, e);
                    break;
                }
            };

            let count = result.data.len();
            players.extend(result.data);
            println!("  📄 Page {}: {} players (total: {})", page, count, players.len());

            cursor = result.meta.and_then(|meta| meta.next_cursor);
            if cursor.is_none() {
                break;
            }

            page += 1;
            sleep(self.page_delay).await;
        }

        info!("fetched {} BallDontLie players over {} pages", players.len(), page);
        println!("✅ Fetched {} players from API\n", players.len());
        players
    }
}
