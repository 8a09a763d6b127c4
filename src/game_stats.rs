//! Per-game stat lines from the "GameStats" sheet and their aggregation
//! into overall and per-season player totals.

use std::collections::HashMap;

use serde::Serialize;

use crate::csv::RawRow;
use crate::roster::Player;
use crate::season;

/// One player's line for one game. Ephemeral input to [`aggregate`].
#[derive(Debug, Clone, PartialEq)]
pub struct GameStatEntry {
    pub player_id: u32,
    pub game_id: Option<u32>,
    pub season_key: String,
    pub goals: u32,
    pub assists: u32,
    pub shots: u32,
    pub plus_minus: i32,
    pub fouls: u32,
    pub saves: u32,
    /// 0 or 1; the sheet uses "TRUE"/"1" for awarded.
    pub man_of_the_match: u32,
}

/// Cumulative totals for one player, overall or within one season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub appearances: u32,
    pub goals: u32,
    pub assists: u32,
    pub shots: u32,
    pub plus_minus: i32,
    pub fouls: u32,
    pub man_of_the_match: u32,
    /// `None` means "not applicable": a zero total is nulled out for anyone
    /// who is not a goalkeeper, while a goalkeeper keeps an explicit 0. The
    /// field disappears from the serialized form entirely in that case.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saves: Option<u32>,
}

impl PlayerStats {
    pub fn empty() -> Self {
        Self {
            appearances: 0,
            goals: 0,
            assists: 0,
            shots: 0,
            plus_minus: 0,
            fouls: 0,
            man_of_the_match: 0,
            saves: Some(0),
        }
    }

    fn absorb(&mut self, entry: &GameStatEntry) {
        self.appearances += 1;
        self.goals += entry.goals;
        self.assists += entry.assists;
        self.shots += entry.shots;
        self.plus_minus += entry.plus_minus;
        self.fouls += entry.fouls;
        self.man_of_the_match += entry.man_of_the_match;
        self.saves = Some(self.saves.unwrap_or(0) + entry.saves);
    }
}

/// A roster player joined with their aggregated stats. The serialized form
/// flattens player and overall totals into one object, the shape the stats
/// page reads.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerWithStats {
    #[serde(flatten)]
    pub player: Player,
    #[serde(flatten)]
    pub overall: PlayerStats,
    #[serde(rename = "statsBySeason")]
    pub by_season: HashMap<String, PlayerStats>,
    /// Season keys the player has data in, newest league first.
    #[serde(rename = "availableSeasonsForStats")]
    pub available_seasons: Vec<String>,
}

/// Decodes one GameStats row. Rows without a usable positive player id are
/// dropped rather than defaulted — a stat line that cannot be attributed is
/// worthless.
pub fn decode_game_stat(row: &RawRow) -> Option<GameStatEntry> {
    let player_id: u32 = row
        .first_of(&["Player ID", "PlayerId"])?
        .trim()
        .parse()
        .ok()?;
    if player_id == 0 {
        return None;
    }

    Some(GameStatEntry {
        player_id,
        game_id: row.text("GameId").and_then(|s| s.trim().parse().ok()),
        season_key: row.text("Season").unwrap_or("Unknown Season").trim().to_string(),
        goals: counter(row, "Goals"),
        assists: counter(row, "Assists"),
        shots: counter(row, "Shots"),
        plus_minus: row
            .text("+/-")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(0),
        fouls: counter(row, "Fouls"),
        saves: counter(row, "Saves"),
        man_of_the_match: match row.get("MotM") {
            Some("TRUE") | Some("1") => 1,
            _ => 0,
        },
    })
}

pub fn decode_game_stats(rows: &[RawRow]) -> Vec<GameStatEntry> {
    rows.iter().filter_map(decode_game_stat).collect()
}

/// Folds stat lines into per-player totals, overall and per season.
///
/// Every input player appears exactly once in the output, in input order,
/// with zeroed stats when they have no surviving stat rows.
pub fn aggregate(players: &[Player], entries: &[GameStatEntry]) -> Vec<PlayerWithStats> {
    let mut overall: HashMap<u32, PlayerStats> = HashMap::new();
    let mut seasonal: HashMap<u32, HashMap<String, PlayerStats>> = HashMap::new();

    for entry in entries {
        if entry.player_id == 0 || entry.season_key.trim().is_empty() {
            continue;
        }
        overall
            .entry(entry.player_id)
            .or_insert_with(PlayerStats::empty)
            .absorb(entry);
        seasonal
            .entry(entry.player_id)
            .or_default()
            .entry(entry.season_key.clone())
            .or_insert_with(PlayerStats::empty)
            .absorb(entry);
    }

    players
        .iter()
        .map(|player| {
            let mut totals = overall
                .get(&player.id)
                .cloned()
                .unwrap_or_else(PlayerStats::empty);
            let mut by_season = seasonal.get(&player.id).cloned().unwrap_or_default();

            null_out_saves(&mut totals, player);
            for stats in by_season.values_mut() {
                null_out_saves(stats, player);
            }

            let available_seasons =
                season::selectable_seasons(by_season.keys().map(String::as_str), None);

            PlayerWithStats {
                player: player.clone(),
                overall: totals,
                by_season,
                available_seasons,
            }
        })
        .collect()
}

/// A zero saves total only means something for a goalkeeper; for everyone
/// else it becomes "not applicable".
fn null_out_saves(stats: &mut PlayerStats, player: &Player) {
    if stats.saves == Some(0) && !player.is_goalkeeper() {
        stats.saves = None;
    }
}

fn counter(row: &RawRow, column: &str) -> u32 {
    row.text(column)
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0)
}
