use tracing::{error, info};

use crate::{
    error::ScrapeError,
    net::PageFetcher,
    shooting_table::{PlayerTable, ShootingTable, SHOOTING_COLUMNS, SHOOTING_TABLE_ID},
    types::HarvestSummary,
    utils::profile_url,
};

pub struct ShootingHarvester<'a> {
    fetcher: &'a PageFetcher,
    base_url: String,
}

impl<'a> ShootingHarvester<'a> {
    pub fn new(fetcher: &'a PageFetcher, base_url: &str) -> Self {
        Self {
            fetcher,
            base_url: base_url.to_string(),
        }
    }

    /// Season rows of one player, without the career aggregate.
    pub fn player_table(&self, name: &str) -> Result<PlayerTable, ScrapeError> {
        let url = profile_url(&self.base_url, name)
            .ok_or_else(|| ScrapeError::UnusableName(name.to_string()))?;
        let html = self.fetcher.fetch(&url)?;

        let mut table = PlayerTable::from_profile_page(&html, SHOOTING_TABLE_ID).ok_or_else(|| {
            ScrapeError::MissingTable {
                url: url.clone(),
                table_id: SHOOTING_TABLE_ID.to_string(),
            }
        })?;
        table.trim_career_rows();
        Ok(table)
    }

    /// Collects the shooting tables of `names`. A player is either fully included or
    /// skipped; skipped players only show up in the failure count.
    pub fn harvest(&self, names: &[String]) -> (ShootingTable, HarvestSummary) {
        let mut data = ShootingTable::with_columns(SHOOTING_COLUMNS);
        let mut summary = HarvestSummary::default();

        for name in names {
            match self.player_table(name) {
                Ok(table) => {
                    data.append(table);
                    summary.successes += 1;
                    info!("Player -> {} | Load -> Success", name);
                }
                Err(e) => {
                    summary.failures += 1;
                    let tag = if e.is_fetch_failure() {
                        "Error (404 Not Found)"
                    } else {
                        "Error (Shooting Missing)"
                    };
                    error!("Player -> {} | Load -> {} ({})", name, tag, e);
                }
            }
        }

        info!("Number of Successful Loads: {}", summary.successes);
        info!("Number of Failed Loads: {}", summary.failures);
        (data, summary)
    }
}
