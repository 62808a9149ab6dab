use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use nba_player_db::headshot::{download_headshots, HeadshotSize, HeadshotSource};
use nba_player_db::http::build_client;
use nba_player_db::Config;

#[derive(Parser)]
#[command(name = "download-headshots")]
#[command(about = "Download NBA player headshots listed in a player ID CSV")]
struct Cli {
    /// CSV with Name and PersonID columns
    #[arg(default_value = "nba_player_ids.csv")]
    csv: PathBuf,

    /// Directory the images are saved to
    #[arg(default_value = "playerHeadshots")]
    output_dir: PathBuf,

    /// Headshot size served by the CDN
    #[arg(long, value_enum, default_value_t = HeadshotSize::Large)]
    size: HeadshotSize,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    let config = Config::default();

    println!("📥 Starting headshot download...");
    println!("   CSV file: {}", cli.csv.display());
    println!("   Output directory: {}\n", cli.output_dir.display());

    let client = build_client(config.request_timeout)?;
    let source = HeadshotSource { size: cli.size, ..HeadshotSource::default() };

    let summary = match download_headshots(&client, &cli.csv, &cli.output_dir, &source).await {
        Ok(summary) => summary,
        Err(e) => {
            println!("❌ Error: {:#}", e);
            std::process::exit(1);
        }
    };

    println!("\n📊 Summary:");
    println!("   ✅ Downloaded: {}", summary.downloaded);
    println!("   ⏭️  Skipped: {}", summary.skipped);
    println!("   ❌ Failed: {}", summary.failed);
    println!("   📁 Output directory: {}", cli.output_dir.display());

    Ok(())
}
