use anyhow::{Context, Result};

const MAX_FIRST_NAME_CHARS: usize = 2;
const MAX_LAST_NAME_CHARS: usize = 5;
const PROFILE_SUFFIX: &str = "01";

/// ASCII letters and spaces only. Rules out diacritics, periods and hyphens.
pub fn is_permitted_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphabetic() || c == ' ')
}

/// Guesses the profile page of a player: `/players/j/jamesle01.html` for "LeBron James".
///
/// The site numbers players sharing a prefix (`01`, `02`, ...), so this always picks the
/// first one. Two players with the same truncated names collide.
pub fn profile_url(base_url: &str, name: &str) -> Option<String> {
    let mut tokens = name.split_whitespace();
    let first = tokens.next()?.to_lowercase();
    let last = tokens.next()?.to_lowercase();

    let first: String = first.chars().take(MAX_FIRST_NAME_CHARS).collect();
    let last: String = last.chars().take(MAX_LAST_NAME_CHARS).collect();
    let initial = last.chars().next()?;

    Some(format!(
        "{}/players/{}/{}{}{}.html",
        base_url, initial, last, first, PROFILE_SUFFIX
    ))
}

pub fn player_index_url(base_url: &str, letter: char) -> String {
    format!("{}/players/{}/", base_url, letter)
}

/// "2015-16" -> 16
pub fn season_year(label: &str) -> Result<i32> {
    let label = label.trim();
    let start = label
        .char_indices()
        .rev()
        .nth(1)
        .map(|(i, _)| i)
        .with_context(|| format!("Season label too short: {:?}", label))?;
    label[start..]
        .parse::<i32>()
        .with_context(|| format!("Invalid season label: {:?}", label))
}

/// Empty cells carry no value; anything else must be a number.
pub fn parse_optional_f64(cell: &str) -> Result<Option<f64>> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Ok(None);
    }
    cell.parse::<f64>()
        .map(Some)
        .with_context(|| format!("Invalid number: {:?}", cell))
}
