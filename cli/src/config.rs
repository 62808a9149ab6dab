use std::time::Duration;

use tracing::warn;

pub const DEFAULT_STATS_BASE: &str = "https://stats.nba.com/stats";
pub const DEFAULT_BALLDONTLIE_BASE: &str = "https://api.balldontlie.io/v1";
pub const DEFAULT_HEADSHOT_BASE: &str = "https://cdn.nba.com/headshots/nba/latest";

/// Runtime configuration shared by the binaries
#[derive(Debug, Clone)]
pub struct Config {
    /// NBA stats API base URL
    pub stats_base: String,

    /// BallDontLie API base URL (`BALLDONTLIE_BASE`)
    pub balldontlie_base: String,

    /// BallDontLie API key (`BALLDONTLIE_KEY`)
    pub balldontlie_key: Option<String>,

    /// Per-request timeout
    pub request_timeout: Duration,

    /// Fixed delays that keep us under third-party rate limits
    pub rate_limits: RateLimits,
}

#[derive(Debug, Clone)]
pub struct RateLimits {
    /// Between BallDontLie pages
    pub page_delay: Duration,

    /// After each per-player detail lookup
    pub player_delay: Duration,

    /// Extra pause when a detail lookup comes back empty
    pub miss_delay: Duration,

    /// After the one-shot stats listing call
    pub listing_delay: Duration,
}

impl Default for RateLimits {
    fn default() -> Self {
        Self {
            page_delay: Duration::from_millis(300),
            player_delay: Duration::from_millis(800),
            miss_delay: Duration::from_millis(600),
            listing_delay: Duration::from_secs(1),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stats_base: DEFAULT_STATS_BASE.to_string(),
            balldontlie_base: DEFAULT_BALLDONTLIE_BASE.to_string(),
            balldontlie_key: None,
            request_timeout: Duration::from_secs(10),
            rate_limits: RateLimits::default(),
        }
    }
}

impl Config {
    /// Load configuration from `.env` and the process environment
    pub fn from_env() -> Self {
        // A missing .env file is the common case.
        let _ = dotenv::dotenv();

        let base = std::env::var("BALLDONTLIE_BASE").ok();
        let key = std::env::var("BALLDONTLIE_KEY").ok();
        Self::from_vars(base, key)
    }

    fn from_vars(base: Option<String>, key: Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(base) = base.filter(|b| !b.trim().is_empty()) {
            config.balldontlie_base = base.trim_end_matches('/').to_string();
        }

        config.balldontlie_key = key.filter(|k| !k.trim().is_empty());
        if config.balldontlie_key.is_none() {
            warn!("⚠️  BALLDONTLIE_KEY not set - API requests may fail");
        }

        config
    }
}
