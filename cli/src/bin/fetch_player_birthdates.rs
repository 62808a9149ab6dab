use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use nba_player_db::birthdate::collect_birthdates;
use nba_player_db::http::build_client;
use nba_player_db::output::{write_constants_file, write_json_file};
use nba_player_db::{BallDontLieClient, Config, NbaPlayer, StatsClient};
use tracing::info;

#[derive(Parser)]
#[command(name = "fetch-player-birthdates")]
#[command(about = "Look up birthdates for active BallDontLie players via NBA.com")]
struct Cli {
    /// Generated constants file
    #[arg(default_value = "player-birthdates-output.ts")]
    constants_output: PathBuf,

    /// JSON mirror of the same mapping
    #[arg(default_value = "player-birthdates.json")]
    json_output: PathBuf,

    /// Season used to list NBA.com players for matching
    #[arg(long, default_value = "2024-25")]
    season: String,

    /// Match against a local JSON player list instead of the stats API
    #[arg(long)]
    nba_players: Option<PathBuf>,

    /// Delay after each player lookup in milliseconds
    #[arg(short, long, default_value = "800")]
    delay: u64,
}

fn load_nba_players(path: &Path) -> Result<Vec<NbaPlayer>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    let mut config = Config::from_env();
    config.rate_limits.player_delay = Duration::from_millis(cli.delay);

    println!("🏀 NBA Player Birthdate Fetcher");
    println!("{}\n", "=".repeat(50));

    let client = build_client(config.request_timeout)?;
    let balldontlie = BallDontLieClient::new(client.clone(), &config);
    let stats = StatsClient::new(client, &config);

    let players = balldontlie.fetch_active_players().await;
    if players.is_empty() {
        println!("❌ No players fetched. Exiting.");
        std::process::exit(1);
    }

    println!("🔍 Loading NBA players...");
    let loaded = match &cli.nba_players {
        Some(path) => load_nba_players(path),
        None => stats.fetch_all_players(&cli.season).await,
    };
    let nba_players = match loaded {
        Ok(list) => {
            println!("  ✅ Loaded {} players from NBA API\n", list.len());
            list
        }
        Err(e) => {
            println!("  ❌ Error loading NBA players: {:#}", e);
            std::process::exit(1);
        }
    };

    println!("🔍 Matching players and fetching birthdates from NBA API...");
    println!("   (This may take a while due to rate limiting)\n");

    let (birthdates, report) =
        collect_birthdates(&players, &nba_players, &stats, config.rate_limits.player_delay).await;

    println!("\n✅ Matched {} players", report.matched);
    println!("✅ Found {} birthdates", report.found);
    println!("❌ Not found: {} birthdates\n", report.not_found);

    if birthdates.is_empty() {
        println!("❌ No birthdates found. Exiting.");
        std::process::exit(1);
    }

    println!("📝 Writing output to {}...", cli.constants_output.display());
    write_constants_file(&birthdates, &cli.constants_output)?;
    println!("✅ Output written to {}\n", cli.constants_output.display());

    write_json_file(&birthdates, &cli.json_output)?;
    println!("📄 Also saved JSON format to {}", cli.json_output.display());
    info!("wrote {} birthdates", birthdates.len());

    println!("\n✨ Done!");
    Ok(())
}
