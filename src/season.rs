//! Season keys: `"<Name> <Year>"`, e.g. "Spring 2024".
//!
//! The club runs two leagues a year. February through July is the Spring
//! season; August through December is Winter; January games still belong to
//! the previous year's Winter season.

use chrono::{Datelike, Local, NaiveDate};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonDetails {
    pub name: String,
    pub year: i32,
    pub key: String,
}

impl SeasonDetails {
    fn new(name: &str, year: i32) -> Self {
        Self {
            name: name.to_string(),
            year,
            key: format!("{name} {year}"),
        }
    }
}

/// Season bucket for a calendar date.
pub fn season_for(date: NaiveDate) -> SeasonDetails {
    let year = date.year();
    match date.month() {
        2..=7 => SeasonDetails::new("Spring", year),
        8..=12 => SeasonDetails::new("Winter", year),
        _ => SeasonDetails::new("Winter", year - 1),
    }
}

pub fn current_season() -> SeasonDetails {
    season_for(Local::now().date_naive())
}

/// Distinct season keys, most recent league first.
///
/// Blank keys and the "Unknown Season" sentinel are skipped; `ensure` (the
/// current season, typically) is included even when no match carries it yet.
/// May return an empty list — callers fall back to unfiltered data.
pub fn selectable_seasons<'a, I>(keys: I, ensure: Option<&str>) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut out: Vec<String> = Vec::new();
    if let Some(key) = ensure {
        collect_key(&mut out, key);
    }
    for key in keys {
        collect_key(&mut out, key);
    }

    // Stable sort: ties on (year, priority) keep insertion order.
    out.sort_by(|a, b| {
        let (a_name, a_year) = split_key(a);
        let (b_name, b_year) = split_key(b);
        b_year
            .cmp(&a_year)
            .then_with(|| name_priority(&b_name).cmp(&name_priority(&a_name)))
    });
    out
}

fn collect_key(out: &mut Vec<String>, key: &str) {
    let key = key.trim();
    if key.is_empty() || key.eq_ignore_ascii_case("unknown season") {
        return;
    }
    if !out.iter().any(|k| k == key) {
        out.push(key.to_string());
    }
}

/// Within one year, Winter ranks above the 3v3 summer league, which ranks
/// above Spring. Unrecognized names sort last.
fn name_priority(name: &str) -> u8 {
    match name.trim() {
        "Winter" => 3,
        "3v3 Live" => 2,
        "Spring" => 1,
        _ => 0,
    }
}

/// Splits a season key into (name, year) by locating the four-digit year
/// token. Keys without a recognizable year sort as year 0.
fn split_key(key: &str) -> (String, i32) {
    let parts: Vec<&str> = key.split(' ').collect();
    let year_idx = parts
        .iter()
        .position(|p| p.len() == 4 && p.chars().all(|c| c.is_ascii_digit()));

    if let Some(idx) = year_idx {
        let year = parts[idx].parse().unwrap_or(0);
        let name = parts[..idx].join(" ");
        if name.is_empty() {
            return (key.to_string(), year);
        }
        return (name, year);
    }

    // No clean four-digit token; accept a plausible trailing year anyway.
    if let Some(last) = parts.last() {
        if let Ok(year) = last.parse::<i32>() {
            if year > 2000 && year < 2100 {
                return (parts[..parts.len() - 1].join(" "), year);
            }
        }
    }
    (key.to_string(), 0)
}
