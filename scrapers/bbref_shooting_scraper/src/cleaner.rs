//! Reshapes the raw `shooting.csv` into the fixed schema of `shooting_clean.csv`.
//!
//! Raw columns are matched by position, not by name. The harvester writes labels in
//! sorted order, so the layout below only holds while the site's shooting table keeps
//! the same set of columns. Header text that disagrees with the expected label is
//! logged as a warning; a different column count is an error.

use anyhow::{bail, Context, Result};
use std::{
    collections::HashMap,
    io::{Read, Write},
    path::Path,
};
use tracing::{debug, info, warn};

use crate::{
    types::{CleanedShootingRecord, Position},
    utils::{parse_optional_f64, season_year},
};

pub const MIN_MINUTES_PER_GAME: f64 = 12.0;

/// Raw label written by the harvester, and the name it is known by here. These are the
/// labels of [`crate::shooting_table::SHOOTING_COLUMNS`], sorted.
pub const RAW_LAYOUT: [(&str, &str); 29] = [
    ("% of FGA by Distance/0-3", "%0-3A"),
    ("% of FGA by Distance/10-16", "%10-16A"),
    ("% of FGA by Distance/16-3pt", "%16-3ptA"),
    ("% of FGA by Distance/2P", "%2PA"),
    ("% of FGA by Distance/3-10", "%3-10A"),
    ("% of FGA by Distance/3P", "%3PA"),
    ("Corner/%3PA", "Corner1"),
    ("Corner/3P%", "Corner2"),
    ("Dunks/%FGA", "Dunk1"),
    ("Dunks/Md.", "Dunk2"),
    ("FG% by Distance/0-3", "0-3%"),
    ("FG% by Distance/10-16", "10-16%"),
    ("FG% by Distance/16-3pt", "16-3pt%"),
    ("FG% by Distance/2P", "2P%"),
    ("FG% by Distance/3-10", "3-10%"),
    ("FG% by Distance/3P", "3P%"),
    ("Heaves/Att.", "Heaves1"),
    ("Heaves/Md.", "Heaves2"),
    ("Unnamed: 0_level_1/Season", "Season"),
    ("Unnamed: 1_level_1/Age", "Age"),
    ("Unnamed: 21_level_1/%Ast'd", "Ast1"),
    ("Unnamed: 24_level_1/%Ast'd", "Ast2"),
    ("Unnamed: 2_level_1/Tm", "Tm"),
    ("Unnamed: 3_level_1/Lg", "Lg"),
    ("Unnamed: 4_level_1/Pos", "Pos"),
    ("Unnamed: 5_level_1/G", "G"),
    ("Unnamed: 6_level_1/MP", "MP"),
    ("Unnamed: 7_level_1/FG%", "FG%"),
    ("Unnamed: 8_level_1/Dist.", "Dist"),
];

/// Frequency and percentage columns, in output order. Each must lie in [0, 1].
pub const PERCENTAGE_COLUMNS: [&str; 12] = [
    "%2PA", "%0-3A", "%3-10A", "%10-16A", "%16-3ptA", "%3PA", "2P%", "0-3%", "3-10%", "10-16%",
    "16-3pt%", "3P%",
];

const OUTPUT_HEADER: [&str; 16] = [
    "", "Season", "Pos", "%2PA", "%0-3A", "%3-10A", "%10-16A", "%16-3ptA", "%3PA", "2P%", "0-3%",
    "3-10%", "10-16%", "16-3pt%", "3P%", "MPG",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanSummary {
    pub rows_read: usize,
    pub rows_written: usize,
}

/// Column positions in a raw record, keyed by canonical name.
struct ColumnMap(HashMap<&'static str, usize>);

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        // The first column is the row index.
        if headers.len() != RAW_LAYOUT.len() + 1 {
            bail!(
                "Expected {} raw shooting columns plus the index, found {}",
                RAW_LAYOUT.len(),
                headers.len().saturating_sub(1)
            );
        }

        let mut positions = HashMap::new();
        for (i, (expected, canonical)) in RAW_LAYOUT.iter().enumerate() {
            let found = &headers[i + 1];
            if found != *expected {
                warn!(
                    "Column {} is {:?} but {:?} was expected there; treating it as {}",
                    i + 1,
                    found,
                    expected,
                    canonical
                );
            }
            positions.insert(*canonical, i + 1);
        }
        Ok(Self(positions))
    }

    fn get<'r>(&self, record: &'r csv::StringRecord, canonical: &str) -> &'r str {
        self.0
            .get(canonical)
            .and_then(|&i| record.get(i))
            .unwrap_or("")
    }
}

/// Applies the renaming, derivation and filters to one raw row. `None` means the row
/// is dropped.
fn clean_row(
    index: usize,
    record: &csv::StringRecord,
    columns: &ColumnMap,
) -> Option<CleanedShootingRecord> {
    let minutes = parse_optional_f64(columns.get(record, "MP")).ok()??;
    let games = parse_optional_f64(columns.get(record, "G")).ok()??;
    if games == 0.0 {
        debug!("Row {}: no games played", index);
        return None;
    }
    let mpg = minutes / games;
    if mpg < MIN_MINUTES_PER_GAME {
        debug!("Row {}: {:.1} minutes per game", index, mpg);
        return None;
    }

    let season = match season_year(columns.get(record, "Season")) {
        Ok(season) => season,
        Err(e) => {
            debug!("Row {}: {}", index, e);
            return None;
        }
    };
    let pos = match Position::from_label(columns.get(record, "Pos").trim()) {
        Some(pos) => pos.code(),
        None => {
            debug!("Row {}: unknown position {:?}", index, columns.get(record, "Pos"));
            return None;
        }
    };

    let mut pcts = [None; 12];
    for (slot, column) in pcts.iter_mut().zip(PERCENTAGE_COLUMNS) {
        let value = match parse_optional_f64(columns.get(record, column)) {
            Ok(value) => value,
            Err(e) => {
                debug!("Row {}: {}: {}", index, column, e);
                return None;
            }
        };
        if let Some(v) = value {
            if !(0.0..=1.0).contains(&v) {
                debug!("Row {}: {} = {} out of range", index, column, v);
                return None;
            }
        }
        *slot = value;
    }

    Some(CleanedShootingRecord {
        index,
        season,
        pos,
        pct_fga_2p: pcts[0],
        pct_fga_0_3: pcts[1],
        pct_fga_3_10: pcts[2],
        pct_fga_10_16: pcts[3],
        pct_fga_16_3pt: pcts[4],
        pct_fga_3p: pcts[5],
        fg_pct_2p: pcts[6],
        fg_pct_0_3: pcts[7],
        fg_pct_3_10: pcts[8],
        fg_pct_10_16: pcts[9],
        fg_pct_16_3pt: pcts[10],
        fg_pct_3p: pcts[11],
        mpg,
    })
}

/// Reads a raw shooting table and returns the rows that survive cleaning, together with
/// the number of rows read.
pub fn clean_records<R: Read>(reader: R) -> Result<(Vec<CleanedShootingRecord>, usize)> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = rdr.headers().context("Failed to read shooting header")?.clone();
    let columns = ColumnMap::from_headers(&headers)?;

    let mut cleaned = Vec::new();
    let mut rows_read = 0;
    for result in rdr.records() {
        let record = result?;
        let index = record
            .get(0)
            .unwrap_or("")
            .trim()
            .parse::<usize>()
            .with_context(|| format!("Invalid row index on line {}", rows_read + 2))?;
        rows_read += 1;

        if let Some(row) = clean_row(index, &record, &columns) {
            cleaned.push(row);
        }
    }

    Ok((cleaned, rows_read))
}

pub fn write_records<W: Write>(writer: W, records: &[CleanedShootingRecord]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(OUTPUT_HEADER)?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn clean_shooting(input: &Path, output: &Path) -> Result<CleanSummary> {
    let file = std::fs::File::open(input).with_context(|| format!("Failed to open {:?}", input))?;
    let (records, rows_read) = clean_records(file)?;

    let out = std::fs::File::create(output)
        .with_context(|| format!("Failed to create {:?}", output))?;
    write_records(out, &records)?;

    let summary = CleanSummary {
        rows_read,
        rows_written: records.len(),
    };
    info!(
        "Cleaned {:?}: kept {} of {} rows, wrote {:?}",
        input, summary.rows_written, summary.rows_read, output
    );
    Ok(summary)
}
