use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use std::path::PathBuf;
use tracing::info;

use bbref_shooting_scraper::{
    config::ScraperConfig,
    net::PageFetcher,
    player_index::{index_letters, read_names, write_names, NameHarvester},
    shooting_scraper::ShootingHarvester,
};

/// Scrapes player shooting tables from basketball-reference.com.
///
/// Without a subcommand both stages run: names first, then shooting tables.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Player name list
    #[arg(long, global = true)]
    players: Option<PathBuf>,

    /// Accumulated raw shooting table
    #[arg(long, global = true)]
    shooting: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Harvest player names from the per-letter index pages
    Names {
        /// Only these index letters, e.g. "abc"
        #[arg(short, long)]
        letters: Option<String>,
    },
    /// Harvest shooting tables for every name in the player list
    Shooting,
}

fn harvest_names(fetcher: &PageFetcher, config: &ScraperConfig, letters: &[char]) -> Result<()> {
    let names = NameHarvester::new(fetcher, &config.site.base_url).harvest(letters);
    write_names(&config.files.players, &names)
}

fn harvest_shooting(fetcher: &PageFetcher, config: &ScraperConfig) -> Result<()> {
    let names = read_names(&config.files.players)?;
    info!("Loaded {} player names from {:?}", names.len(), config.files.players);

    let (data, summary) = ShootingHarvester::new(fetcher, &config.site.base_url).harvest(&names);
    data.write_to_path(&config.files.shooting)?;
    info!(
        "Wrote {} rows from {} players to {:?} ({} failed)",
        data.len(),
        summary.successes,
        config.files.shooting,
        summary.failures
    );
    Ok(())
}

fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let mut config = ScraperConfig::from_env();
    if let Some(players) = cli.players {
        config.files.players = players;
    }
    if let Some(shooting) = cli.shooting {
        config.files.shooting = shooting;
    }

    let fetcher = PageFetcher::new(&config)?;

    match cli.command {
        Some(Commands::Names { letters }) => {
            let letters = match letters {
                Some(letters) => letters.to_lowercase().chars().filter(char::is_ascii_lowercase).collect(),
                None => index_letters(),
            };
            harvest_names(&fetcher, &config, &letters)?;
        }
        Some(Commands::Shooting) => harvest_shooting(&fetcher, &config)?,
        None => {
            harvest_names(&fetcher, &config, &index_letters())?;
            harvest_shooting(&fetcher, &config)?;
        }
    }

    Ok(())
}
