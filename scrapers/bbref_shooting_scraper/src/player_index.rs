use anyhow::{Context, Result};
use scraper::{Html, Selector};
use std::path::Path;
use tracing::{error, info};

use crate::{
    net::PageFetcher,
    utils::{is_permitted_name, player_index_url},
};

/// Every index letter the site publishes. There is no page for `x`.
pub fn index_letters() -> Vec<char> {
    ('a'..='z').filter(|c| *c != 'x').collect()
}

/// Player names listed on one index page, in page order.
///
/// The first `<tr>` is the table header. Each remaining row names the player in the
/// first anchor of its first `<th>`.
pub fn parse_player_index(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let row_selector = Selector::parse("tr").unwrap();
    let header_cell_selector = Selector::parse("th").unwrap();
    let link_selector = Selector::parse("a").unwrap();

    document
        .select(&row_selector)
        .skip(1)
        .filter_map(|row| {
            let cell = row.select(&header_cell_selector).next()?;
            let link = cell.select(&link_selector).next()?;
            Some(link.text().collect::<String>())
        })
        .filter(|name| is_permitted_name(name))
        .collect()
}

pub struct NameHarvester<'a> {
    fetcher: &'a PageFetcher,
    base_url: String,
}

impl<'a> NameHarvester<'a> {
    pub fn new(fetcher: &'a PageFetcher, base_url: &str) -> Self {
        Self {
            fetcher,
            base_url: base_url.to_string(),
        }
    }

    /// Walks the index pages of `letters`. A page that fails to load is logged and skipped.
    pub fn harvest(&self, letters: &[char]) -> Vec<String> {
        let mut players = Vec::new();

        for &letter in letters {
            let url = player_index_url(&self.base_url, letter);
            let html = match self.fetcher.fetch(&url) {
                Ok(html) => html,
                Err(e) => {
                    error!("Letter -> {} | Load -> Failure ({})", letter, e);
                    continue;
                }
            };

            players.extend(parse_player_index(&html));
            info!("Letter -> {} | Load -> Success", letter);
        }

        info!("Harvested {} player names", players.len());
        players
    }
}

pub fn write_names(path: &Path, names: &[String]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {:?}", path))?;
    wtr.write_record(["", "name"])?;
    for (i, name) in names.iter().enumerate() {
        wtr.write_record([i.to_string().as_str(), name.as_str()])?;
    }
    wtr.flush()?;
    info!("Wrote {} names to {:?}", names.len(), path);
    Ok(())
}

pub fn read_names(path: &Path) -> Result<Vec<String>> {
    let mut rdr = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open {:?}", path))?;
    let headers = rdr.headers()?.clone();
    let name_idx = headers
        .iter()
        .position(|h| h.trim() == "name")
        .ok_or_else(|| anyhow::anyhow!("Column name not found in {:?}", path))?;

    let mut names = Vec::new();
    for result in rdr.records() {
        let record = result?;
        if let Some(name) = record.get(name_idx) {
            names.push(name.to_string());
        }
    }
    Ok(names)
}
