//! Spreadsheet fetch adapter and the query surface the site reads from.
//!
//! Network access sits behind [`SheetSource`] so the decode/aggregate
//! pipeline stays pure and testable offline.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use once_cell::sync::OnceCell;
use reqwest::StatusCode;
use reqwest::blocking::Client;

use crate::config::ClubConfig;
use crate::csv;
use crate::fixtures::{self, Match};
use crate::game_stats::{self, PlayerWithStats};
use crate::roster::{self, Player};

const REQUEST_TIMEOUT_SECS: u64 = 10;

static CLIENT: OnceCell<Client> = OnceCell::new();

fn sheet_client() -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("failed to build http client")
    })
}

/// One named tab of the club spreadsheet, as raw CSV text.
pub trait SheetSource {
    fn fetch_sheet(&self, name: &str) -> Result<String>;
}

/// Google Sheets gviz CSV export. The sheet must be shared as "anyone with
/// the link can view".
pub struct GvizSheetSource {
    sheet_id: String,
}

impl GvizSheetSource {
    pub fn new(sheet_id: impl Into<String>) -> Self {
        Self {
            sheet_id: sheet_id.into(),
        }
    }

    pub fn from_config(config: &ClubConfig) -> Result<Self> {
        if config.sheet_id.is_empty() {
            bail!("no spreadsheet id configured; set CLUB_SHEET_ID");
        }
        Ok(Self::new(config.sheet_id.clone()))
    }
}

impl SheetSource for GvizSheetSource {
    fn fetch_sheet(&self, name: &str) -> Result<String> {
        let client = sheet_client()?;
        let url = format!(
            "https://docs.google.com/spreadsheets/d/{}/gviz/tq?tqx=out:csv&sheet={}",
            self.sheet_id,
            name.replace(' ', "%20")
        );

        let resp = client
            .get(&url)
            .send()
            .with_context(|| format!("sheet \"{name}\" request failed"))?;
        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            bail!(
                "sheet \"{name}\" returned 404: wrong spreadsheet id, wrong tab name, \
                 or the sheet is not shared for CSV export"
            );
        }
        if !status.is_success() {
            bail!("sheet \"{name}\" returned {status}");
        }

        let body = resp
            .text()
            .with_context(|| format!("sheet \"{name}\" body read failed"))?;
        if body.trim().is_empty() {
            eprintln!("[WARN] Sheet \"{name}\" fetched but empty");
        }
        Ok(body)
    }
}

/// Published roster: decoded, placeholder rows dropped.
pub fn fetch_players(source: &dyn SheetSource, config: &ClubConfig) -> Result<Vec<Player>> {
    let text = source.fetch_sheet(&config.players_tab)?;
    Ok(roster::decode_players(&csv::parse(&text)))
}

/// Published fixture list: decoded, id-0 rows dropped, sorted upcoming-first.
pub fn fetch_matches(source: &dyn SheetSource, config: &ClubConfig) -> Result<Vec<Match>> {
    let text = source.fetch_sheet(&config.games_tab)?;
    Ok(fixtures::decode_matches(&csv::parse(&text), config))
}

/// Roster joined with aggregated overall and per-season stats.
pub fn fetch_players_with_stats(
    source: &dyn SheetSource,
    config: &ClubConfig,
) -> Result<Vec<PlayerWithStats>> {
    let players = fetch_players(source, config)?;
    let text = source.fetch_sheet(&config.game_stats_tab)?;
    let entries = game_stats::decode_game_stats(&csv::parse(&text));
    Ok(game_stats::aggregate(&players, &entries))
}
