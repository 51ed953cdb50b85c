//! The per-season shooting table of a player profile page, and the table that
//! accumulates them across players.
//!
//! The site ships most secondary tables inside HTML comments and unhides them with
//! JavaScript, so the table has to be dug out of the comment text before it can be
//! parsed.

use anyhow::{Context, Result};
use scraper::{ElementRef, Html, Selector};
use std::{
    collections::{BTreeMap, BTreeSet},
    io::Write,
    path::Path,
};

pub const SHOOTING_TABLE_ID: &str = "shooting";
pub const CAREER_ROW_LABEL: &str = "Career";

/// Flattened labels of the site's shooting table, left to right.
pub const SHOOTING_COLUMNS: [&str; 29] = [
    "Unnamed: 0_level_1/Season",
    "Unnamed: 1_level_1/Age",
    "Unnamed: 2_level_1/Tm",
    "Unnamed: 3_level_1/Lg",
    "Unnamed: 4_level_1/Pos",
    "Unnamed: 5_level_1/G",
    "Unnamed: 6_level_1/MP",
    "Unnamed: 7_level_1/FG%",
    "Unnamed: 8_level_1/Dist.",
    "% of FGA by Distance/2P",
    "% of FGA by Distance/0-3",
    "% of FGA by Distance/3-10",
    "% of FGA by Distance/10-16",
    "% of FGA by Distance/16-3pt",
    "% of FGA by Distance/3P",
    "FG% by Distance/2P",
    "FG% by Distance/0-3",
    "FG% by Distance/3-10",
    "FG% by Distance/10-16",
    "FG% by Distance/16-3pt",
    "FG% by Distance/3P",
    "Unnamed: 21_level_1/%Ast'd",
    "Dunks/%FGA",
    "Dunks/Md.",
    "Unnamed: 24_level_1/%Ast'd",
    "Corner/%3PA",
    "Corner/3P%",
    "Heaves/Att.",
    "Heaves/Md.",
];

/// Concatenated text of every comment on the page that contains a table.
pub fn commented_tables(html: &str) -> String {
    let document = Html::parse_document(html);
    document
        .tree
        .nodes()
        .filter_map(|node| node.value().as_comment())
        .filter(|comment| comment.contains("<table"))
        .fold(String::new(), |mut tables, comment| {
            tables.push_str(comment);
            tables
        })
}

/// One parsed table with its header flattened to a single row of labels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl PlayerTable {
    /// Finds `table#<table_id>` among the commented-out tables of a profile page.
    pub fn from_profile_page(html: &str, table_id: &str) -> Option<Self> {
        let tables = commented_tables(html);
        if tables.is_empty() {
            return None;
        }
        Self::from_fragment(&tables, table_id)
    }

    pub fn from_fragment(fragment: &str, table_id: &str) -> Option<Self> {
        let document = Html::parse_fragment(fragment);
        let table_selector = Selector::parse(&format!("table#{}", table_id)).ok()?;
        let table = document.select(&table_selector).next()?;
        Some(Self::from_table(table))
    }

    fn from_table(table: ElementRef) -> Self {
        let head_selector = Selector::parse("thead tr").unwrap();
        let body_selector = Selector::parse("tbody tr, tfoot tr").unwrap();

        let mut header: Vec<Vec<String>> = table.select(&head_selector).map(row_cells).collect();
        let mut body: Vec<Vec<String>> = table
            .select(&body_selector)
            .filter(|row| !is_repeated_header(row))
            .map(row_cells)
            .collect();

        // Tables without a <thead> carry their header in the first row.
        if header.is_empty() && !body.is_empty() {
            header.push(body.remove(0));
        }

        let columns = flatten_header(&header);
        let width = columns.len();
        for row in &mut body {
            row.resize(width, String::new());
        }

        Self { columns, rows: body }
    }

    /// Drops the career aggregate row and everything after it.
    pub fn trim_career_rows(&mut self) {
        if let Some(career) = self
            .rows
            .iter()
            .position(|row| row.first().map(String::as_str) == Some(CAREER_ROW_LABEL))
        {
            self.rows.truncate(career);
        }
    }
}

fn is_repeated_header(row: &ElementRef) -> bool {
    row.value()
        .attr("class")
        .map(|class| class.split_whitespace().any(|c| c == "thead"))
        .unwrap_or(false)
}

fn row_cells(row: ElementRef) -> Vec<String> {
    let mut cells = Vec::new();
    for cell in row.children().filter_map(ElementRef::wrap) {
        let name = cell.value().name();
        if name != "th" && name != "td" {
            continue;
        }
        let span = cell
            .value()
            .attr("colspan")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .unwrap_or(1)
            .max(1);
        let text = cell.text().collect::<String>().trim().to_string();
        cells.extend(std::iter::repeat(text).take(span));
    }
    cells
}

/// Joins the two lowest header levels into `upper/lower` labels.
///
/// Blank header cells are named `Unnamed: <column>_level_<level>`, so a column with no
/// group heading reads e.g. `Unnamed: 0_level_1/Season`. The labels depend on the exact
/// layout of the site's header rows; the cleaner relies on their sorted order.
pub fn flatten_header(levels: &[Vec<String>]) -> Vec<String> {
    let width = levels.iter().map(Vec::len).max().unwrap_or(0);
    let label = |level: usize, column: usize| -> String {
        match levels[level].get(column) {
            Some(text) if !text.is_empty() => text.clone(),
            _ => format!("Unnamed: {}_level_{}", column, level),
        }
    };

    let n = levels.len();
    (0..width)
        .map(|column| {
            if n == 1 {
                label(0, column)
            } else {
                format!("{}/{}", label(n - 2, column), label(n - 1, column))
            }
        })
        .collect()
}

/// Player tables stacked on top of each other, aligned by column label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShootingTable {
    columns: BTreeSet<String>,
    rows: Vec<BTreeMap<String, String>>,
}

impl ShootingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty table that already has `columns`, so even a harvest that loads nobody
    /// writes the full header.
    pub fn with_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn append(&mut self, table: PlayerTable) {
        self.columns.extend(table.columns.iter().cloned());
        for row in table.rows {
            self.rows
                .push(table.columns.iter().cloned().zip(row).collect());
        }
    }

    /// Column labels in output order (byte-wise sorted).
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn value(&self, row: usize, column: &str) -> Option<&str> {
        self.rows.get(row)?.get(column).map(String::as_str)
    }

    /// Writes the table with a leading, unnamed row-index column.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);

        let mut header = vec![""];
        header.extend(self.columns());
        wtr.write_record(&header)?;

        for (i, row) in self.rows.iter().enumerate() {
            let mut record = vec![i.to_string()];
            record.extend(
                self.columns
                    .iter()
                    .map(|column| row.get(column).cloned().unwrap_or_default()),
            );
            wtr.write_record(&record)?;
        }

        wtr.flush()?;
        Ok(())
    }

    pub fn write_to_path(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create {:?}", path))?;
        self.write_csv(file)
    }
}
