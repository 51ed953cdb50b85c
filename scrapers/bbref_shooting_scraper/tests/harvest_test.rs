use anyhow::Result;
use mockito::{Mock, Server, ServerGuard};
use pretty_assertions::assert_eq;
use tempfile::tempdir;
use test_log::test;

use bbref_shooting_scraper::{
    cleaner::clean_shooting,
    config::ScraperConfig,
    net::PageFetcher,
    player_index::{read_names, write_names, NameHarvester},
    shooting_scraper::ShootingHarvester,
    shooting_table::{PlayerTable, SHOOTING_COLUMNS, SHOOTING_TABLE_ID},
    types::{CleanedShootingRecord, HarvestSummary},
};

const INDEX_PAGE_J: &str = include_str!("fixtures/players_j.html");
const PROFILE_JAMES: &str = include_str!("fixtures/player_jamesle01.html");
const PROFILE_HORFORD: &str = include_str!("fixtures/player_horfoal01.html");

fn html_mock(server: &mut ServerGuard, path: &str, body: &str) -> Mock {
    server
        .mock("GET", path)
        .with_status(200)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body(body)
        .create()
}

fn fetcher_for(server: &ServerGuard) -> Result<(PageFetcher, ScraperConfig)> {
    let config = ScraperConfig::default().with_base_url(&server.url());
    let fetcher = PageFetcher::new(&config)?;
    Ok((fetcher, config))
}

fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[test]
fn test_harvest_names_skips_failed_letters() -> Result<()> {
    let mut server = Server::new();
    let _j = html_mock(&mut server, "/players/j/", INDEX_PAGE_J);
    let _k = server.mock("GET", "/players/k/").with_status(500).create();

    let (fetcher, config) = fetcher_for(&server)?;
    let harvested = NameHarvester::new(&fetcher, &config.site.base_url).harvest(&['j', 'k']);

    assert_eq!(
        harvested,
        names(&["Phil Jackson", "LeBron James", "Mike James", "Magic Johnson"])
    );
    for name in &harvested {
        assert!(name.chars().all(|c| c.is_ascii_alphabetic() || c == ' '));
    }
    Ok(())
}

#[test]
fn test_harvest_shooting_counts_failures() -> Result<()> {
    let mut server = Server::new();
    let _james = html_mock(&mut server, "/players/j/jamesle01.html", PROFILE_JAMES);
    let _horford = html_mock(&mut server, "/players/h/horfoal01.html", PROFILE_HORFORD);
    let _li = server.mock("GET", "/players/l/liyi01.html").with_status(404).create();

    let (fetcher, config) = fetcher_for(&server)?;
    let harvester = ShootingHarvester::new(&fetcher, &config.site.base_url);
    let (data, summary) =
        harvester.harvest(&names(&["LeBron James", "Yi Li", "Al Horford", "Nene"]));

    assert_eq!(summary, HarvestSummary { successes: 1, failures: 3 });
    assert_eq!(data.len(), 4);
    let seasons: Vec<&str> = (0..data.len())
        .map(|i| data.value(i, "Unnamed: 0_level_1/Season").unwrap_or(""))
        .collect();
    assert_eq!(seasons, vec!["2003-04", "2004-05", "2005-06", "2006-07"]);
    assert_eq!(data.columns().count(), SHOOTING_COLUMNS.len());
    Ok(())
}

#[test]
fn test_profile_fixture_has_site_header() {
    let table = PlayerTable::from_profile_page(PROFILE_JAMES, SHOOTING_TABLE_ID).unwrap();
    assert_eq!(table.columns, names(&SHOOTING_COLUMNS));
    assert!(table.rows.iter().all(|row| row.len() == 29));
}

#[test]
fn test_failed_player_contributes_no_rows() -> Result<()> {
    let mut server = Server::new();
    let _li = server.mock("GET", "/players/l/liyi01.html").with_status(404).create();

    let (fetcher, config) = fetcher_for(&server)?;
    let (data, summary) =
        ShootingHarvester::new(&fetcher, &config.site.base_url).harvest(&names(&["Yi Li"]));

    assert_eq!(summary, HarvestSummary { successes: 0, failures: 1 });
    assert!(data.is_empty());
    assert_eq!(data.columns().count(), SHOOTING_COLUMNS.len());
    Ok(())
}

#[test]
fn test_empty_harvest_cleans_to_header_only() -> Result<()> {
    let mut server = Server::new();
    let _li = server.mock("GET", "/players/l/liyi01.html").with_status(404).create();

    let dir = tempdir()?;
    let raw = dir.path().join("shooting.csv");
    let cleaned = dir.path().join("shooting_clean.csv");

    let (fetcher, config) = fetcher_for(&server)?;
    let (data, _) =
        ShootingHarvester::new(&fetcher, &config.site.base_url).harvest(&names(&["Yi Li", "Nene"]));
    data.write_to_path(&raw)?;

    let clean = clean_shooting(&raw, &cleaned)?;
    assert_eq!((clean.rows_read, clean.rows_written), (0, 0));

    let mut rdr = csv::Reader::from_path(&cleaned)?;
    assert_eq!(rdr.headers()?.len(), 16);
    assert_eq!(rdr.records().count(), 0);
    Ok(())
}

#[test]
fn test_missing_table_is_reported() -> Result<()> {
    let mut server = Server::new();
    let _horford = html_mock(&mut server, "/players/h/horfoal01.html", PROFILE_HORFORD);

    let (fetcher, config) = fetcher_for(&server)?;
    let err = ShootingHarvester::new(&fetcher, &config.site.base_url)
        .player_table("Al Horford")
        .unwrap_err();
    assert!(!err.is_fetch_failure());
    assert!(err.to_string().contains("#shooting"));
    Ok(())
}

#[test]
fn test_scrape_then_clean() -> Result<()> {
    let mut server = Server::new();
    let _j = html_mock(&mut server, "/players/j/", INDEX_PAGE_J);
    let _james = html_mock(&mut server, "/players/j/jamesle01.html", PROFILE_JAMES);

    let dir = tempdir()?;
    let mut config = ScraperConfig::default().with_base_url(&server.url());
    config.files.players = dir.path().join("players.csv");
    config.files.shooting = dir.path().join("shooting.csv");
    config.files.shooting_clean = dir.path().join("shooting_clean.csv");
    let fetcher = PageFetcher::new(&config)?;

    let harvested = NameHarvester::new(&fetcher, &config.site.base_url).harvest(&['j']);
    write_names(&config.files.players, &harvested)?;
    let players = read_names(&config.files.players)?;
    assert_eq!(players, harvested);

    // Only LeBron James has a profile page on the mock server.
    let (data, summary) = ShootingHarvester::new(&fetcher, &config.site.base_url).harvest(&players);
    assert_eq!(summary, HarvestSummary { successes: 1, failures: 3 });
    data.write_to_path(&config.files.shooting)?;

    let mut raw = csv::Reader::from_path(&config.files.shooting)?;
    let mut expected_header = names(&SHOOTING_COLUMNS);
    expected_header.sort();
    expected_header.insert(0, String::new());
    assert_eq!(raw.headers()?.iter().map(String::from).collect::<Vec<_>>(), expected_header);

    let clean = clean_shooting(&config.files.shooting, &config.files.shooting_clean)?;
    assert_eq!(clean.rows_read, 4);
    assert_eq!(clean.rows_written, 2);

    let mut rdr = csv::Reader::from_path(&config.files.shooting_clean)?;
    let records: Vec<CleanedShootingRecord> = rdr.deserialize().collect::<Result<_, _>>()?;
    assert_eq!(records.len(), 2);

    // 2005-06 has a 3P% of 1.5; 2006-07 averaged 9 minutes.
    assert_eq!((records[0].index, records[0].season, records[0].pos), (0, 4, 2));
    assert_eq!((records[1].index, records[1].season, records[1].pos), (1, 5, 3));
    assert_eq!(records[0].pct_fga_3p, Some(0.193));
    assert_eq!(records[1].fg_pct_0_3, Some(0.645));
    assert!((records[0].mpg - 3122.0 / 79.0).abs() < 1e-9);

    for record in &records {
        assert!(record.mpg >= 12.0);
        for pct in record.percentages().into_iter().flatten() {
            assert!((0.0..=1.0).contains(&pct));
        }
    }
    Ok(())
}
