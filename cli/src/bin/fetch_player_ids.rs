use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use nba_player_db::http::build_client;
use nba_player_db::player_csv::write_players_csv;
use nba_player_db::{Config, StatsClient};
use tokio::time::sleep;

#[derive(Parser)]
#[command(name = "fetch-player-ids")]
#[command(about = "Fetch NBA player IDs from the NBA stats API and save them to CSV")]
struct Cli {
    /// NBA season, e.g. 2024-25
    #[arg(default_value = "2024-25")]
    season: String,

    /// Output CSV path
    #[arg(default_value = "nba_player_ids.csv")]
    output: PathBuf,

    /// Include every player on record instead of only the current season
    #[arg(long)]
    all_players: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    let config = Config::default();

    println!("🏀 NBA Player ID Fetcher");
    println!("{}", "=".repeat(50));

    let client = build_client(config.request_timeout)?;
    let stats = StatsClient::new(client, &config);

    let players = stats.fetch_player_ids(&cli.season, !cli.all_players).await;
    if players.is_empty() {
        println!("\n❌ Failed to fetch player data");
        std::process::exit(1);
    }

    println!("📝 Writing {} players to {}...", players.len(), cli.output.display());
    write_players_csv(&players, &cli.output)?;
    println!("✅ Successfully wrote {} players to {}", players.len(), cli.output.display());
    println!("\n✅ Complete! Player IDs saved to {}", cli.output.display());

    // Be kind to the API between back-to-back runs
    sleep(config.rate_limits.listing_delay).await;

    Ok(())
}
