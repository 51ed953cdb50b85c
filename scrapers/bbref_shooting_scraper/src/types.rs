use serde::{Deserialize, Serialize};

/// One player-season after cleaning. Field order is the column order of `shooting_clean.csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanedShootingRecord {
    /// Row index carried over from the raw table.
    #[serde(rename = "")]
    pub index: usize,
    #[serde(rename = "Season")]
    pub season: i32,
    #[serde(rename = "Pos")]
    pub pos: u8,
    #[serde(rename = "%2PA")]
    pub pct_fga_2p: Option<f64>,
    #[serde(rename = "%0-3A")]
    pub pct_fga_0_3: Option<f64>,
    #[serde(rename = "%3-10A")]
    pub pct_fga_3_10: Option<f64>,
    #[serde(rename = "%10-16A")]
    pub pct_fga_10_16: Option<f64>,
    #[serde(rename = "%16-3ptA")]
    pub pct_fga_16_3pt: Option<f64>,
    #[serde(rename = "%3PA")]
    pub pct_fga_3p: Option<f64>,
    #[serde(rename = "2P%")]
    pub fg_pct_2p: Option<f64>,
    #[serde(rename = "0-3%")]
    pub fg_pct_0_3: Option<f64>,
    #[serde(rename = "3-10%")]
    pub fg_pct_3_10: Option<f64>,
    #[serde(rename = "10-16%")]
    pub fg_pct_10_16: Option<f64>,
    #[serde(rename = "16-3pt%")]
    pub fg_pct_16_3pt: Option<f64>,
    #[serde(rename = "3P%")]
    pub fg_pct_3p: Option<f64>,
    #[serde(rename = "MPG")]
    pub mpg: f64,
}

impl CleanedShootingRecord {
    pub fn percentages(&self) -> [Option<f64>; 12] {
        [
            self.pct_fga_2p,
            self.pct_fga_0_3,
            self.pct_fga_3_10,
            self.pct_fga_10_16,
            self.pct_fga_16_3pt,
            self.pct_fga_3p,
            self.fg_pct_2p,
            self.fg_pct_0_3,
            self.fg_pct_3_10,
            self.fg_pct_10_16,
            self.fg_pct_16_3pt,
            self.fg_pct_3p,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    PointGuard = 1,
    ShootingGuard = 2,
    SmallForward = 3,
    PowerForward = 4,
    Center = 5,
}

impl Position {
    const GUARDS_AND_FORWARDS: [(&'static str, Position); 4] = [
        ("PG", Position::PointGuard),
        ("SG", Position::ShootingGuard),
        ("SF", Position::SmallForward),
        ("PF", Position::PowerForward),
    ];

    /// Labels like "C", "C-PF" or "PG-backup". Only the leading position counts.
    pub fn from_label(label: &str) -> Option<Self> {
        if label.starts_with('C') {
            return Some(Position::Center);
        }
        let prefix = label.get(0..2)?;
        Self::GUARDS_AND_FORWARDS
            .iter()
            .find(|(code, _)| *code == prefix)
            .map(|(_, pos)| *pos)
    }

    pub fn code(self) -> u8 {
        self as u8
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HarvestSummary {
    pub successes: usize,
    pub failures: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_from_label() {
        assert_eq!(Position::from_label("PG-backup").map(Position::code), Some(1));
        assert_eq!(Position::from_label("SG").map(Position::code), Some(2));
        assert_eq!(Position::from_label("SF").map(Position::code), Some(3));
        assert_eq!(Position::from_label("PF-C").map(Position::code), Some(4));
        assert_eq!(Position::from_label("C").map(Position::code), Some(5));
        assert_eq!(Position::from_label("C-PF").map(Position::code), Some(5));
    }

    #[test]
    fn test_position_unknown_label() {
        assert_eq!(Position::from_label("G"), None);
        assert_eq!(Position::from_label(""), None);
        assert_eq!(Position::from_label("FC"), None);
    }
}
