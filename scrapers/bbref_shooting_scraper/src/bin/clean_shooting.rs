use anyhow::Result;
use bbref_shooting_scraper::{cleaner::clean_shooting, config::ScraperConfig};
use clap::Parser;
use dotenv::dotenv;
use std::path::PathBuf;

/// Cleans the raw shooting table into a fixed schema.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Raw shooting table written by the scraper
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Where to write the cleaned table
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let files = ScraperConfig::from_env().files;
    let input = cli.input.unwrap_or(files.shooting);
    let output = cli.output.unwrap_or(files.shooting_clean);

    clean_shooting(&input, &output)?;
    Ok(())
}
