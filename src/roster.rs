//! Player rows from the "Players" sheet.

use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;

use crate::csv::RawRow;

/// Serializes to the camelCase shape the site's view layer consumes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: u32,
    pub name: String,
    pub first_name: String,
    pub last_name: String,
    pub position: String,
    pub image_url: String,
    pub bio: String,
    /// Absent is not the same as zero: blank or non-numeric cells stay `None`.
    pub jersey_number: Option<i32>,
    pub nationality: String,
    pub status: String,

    pub nickname: Option<String>,
    pub joined_club_date: Option<String>,
    pub player_quote: Option<String>,
    pub social_link: Option<String>,
    pub dob: Option<String>,
    pub age: Option<u32>,
    pub height: Option<String>,
    pub birthplace: Option<String>,

    // Skill ratings. Zero is a valid rating, so blanks must stay absent
    // rather than defaulting to 0.
    pub finishing: Option<i32>,
    pub short_pass: Option<i32>,
    pub tackling: Option<i32>,
    pub sprint_speed: Option<i32>,
    pub reactions: Option<i32>,
    pub gk_reflexes: Option<i32>,
    pub ball_skills: Option<i32>,
    pub passing: Option<i32>,
    pub shooting: Option<i32>,
    pub defence: Option<i32>,
    pub goalkeeper_rating: Option<i32>,
    pub physical: Option<i32>,
    pub mental: Option<i32>,
}

impl Player {
    pub fn is_goalkeeper(&self) -> bool {
        self.position == "Goalkeeper"
    }
}

/// Total decoder: any row shape yields a `Player`. Rows that decode to id 0
/// or the placeholder name are dropped later by [`decode_players`].
pub fn decode_player(row: &RawRow) -> Player {
    let first_name = row.text("First").unwrap_or("Player").to_string();
    let last_name = row.text("Last").unwrap_or("").to_string();
    let name = format!("{first_name} {last_name}").trim().to_string();

    let dob = row.text("DoB").map(str::to_string);
    let age_from_sheet = row
        .text("Age")
        .and_then(parse_int)
        .and_then(|v| u32::try_from(v).ok());
    let age = age_from_sheet.or_else(|| dob.as_deref().and_then(age_from_dob));

    Player {
        id: row
            .text("PlayerId")
            .and_then(parse_int)
            .and_then(|v| u32::try_from(v).ok())
            .unwrap_or(0),
        name,
        first_name,
        last_name,
        position: row.text("Position(s)").unwrap_or("Unknown").to_string(),
        image_url: row
            .first_of(&["ImageUrl", "Image URL"])
            .unwrap_or("")
            .to_string(),
        bio: row.text("Bio").unwrap_or("No bio available.").to_string(),
        jersey_number: row.text("Number").and_then(parse_int),
        nationality: row.text("Nationality").unwrap_or("US").to_uppercase(),
        status: row.text("Status").unwrap_or("Unknown").trim().to_string(),
        nickname: row.text("Nickname").map(str::to_string),
        joined_club_date: row
            .first_of(&["JoinedClubDate", "JoinedDate"])
            .map(str::to_string),
        player_quote: row.text("PlayerQuote").map(str::to_string),
        social_link: row.text("SocialLink").map(str::to_string),
        dob,
        age,
        height: row.text("Height").map(str::to_string),
        birthplace: row.text("Birthplace").map(str::to_string),
        finishing: skill(row, "Finishing"),
        short_pass: skill(row, "Short Pass"),
        tackling: skill(row, "Tackling"),
        sprint_speed: skill(row, "Sprint Speed"),
        reactions: skill(row, "Reactions"),
        gk_reflexes: skill(row, "GK Reflexes"),
        ball_skills: skill(row, "Ball Skills"),
        passing: skill(row, "Passing"),
        shooting: skill(row, "Shooting"),
        defence: skill(row, "Defence"),
        goalkeeper_rating: skill(row, "GoalkeeperRating"),
        physical: skill(row, "Physical"),
        mental: skill(row, "Mental"),
    }
}

/// Decodes and publishes the roster: rows with id 0 or a name that degraded
/// to the bare "Player" placeholder are excluded.
pub fn decode_players(rows: &[RawRow]) -> Vec<Player> {
    rows.iter()
        .map(decode_player)
        .filter(|p| p.id != 0 && !p.name.eq_ignore_ascii_case("player"))
        .collect()
}

fn skill(row: &RawRow, column: &str) -> Option<i32> {
    row.text(column).and_then(parse_int)
}

fn parse_int(raw: &str) -> Option<i32> {
    raw.trim().parse().ok()
}

/// Age in whole years from a DoB cell, used when the sheet's Age column is
/// blank. Accepts the two date shapes seen in the sheet.
fn age_from_dob(dob: &str) -> Option<u32> {
    let dob = dob.trim();
    let parsed = NaiveDate::parse_from_str(dob, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(dob, "%Y/%m/%d"))
        .ok()?;
    let today = Local::now().date_naive();
    if parsed.year() <= 1900 {
        return None;
    }
    today.years_since(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv;

    #[test]
    fn blank_row_decodes_to_placeholder() {
        let rows = csv::parse("PlayerId,First,Last\n,,");
        let p = decode_player(&rows[0]);
        assert_eq!(p.id, 0);
        assert_eq!(p.name, "Player");
        assert!(decode_players(&rows).is_empty());
    }

    #[test]
    fn jersey_number_absent_is_not_zero() {
        let rows = csv::parse("PlayerId,First,Number\n7,Ana,\n8,Bea,0\n9,Cy,abc");
        let players: Vec<_> = rows.iter().map(decode_player).collect();
        assert_eq!(players[0].jersey_number, None);
        assert_eq!(players[1].jersey_number, Some(0));
        assert_eq!(players[2].jersey_number, None);
    }

    #[test]
    fn skill_zero_is_kept_but_blank_is_absent() {
        let rows = csv::parse("PlayerId,First,Finishing,Passing\n7,Ana,0,");
        let p = decode_player(&rows[0]);
        assert_eq!(p.finishing, Some(0));
        assert_eq!(p.passing, None);
    }

    #[test]
    fn nationality_defaults_and_uppercases() {
        let rows = csv::parse("PlayerId,First,Nationality\n7,Ana,\n8,Bea,br");
        assert_eq!(decode_player(&rows[0]).nationality, "US");
        assert_eq!(decode_player(&rows[1]).nationality, "BR");
    }

    #[test]
    fn sheet_age_beats_dob() {
        let rows = csv::parse("PlayerId,First,Age,DoB\n7,Ana,23,1990-06-15");
        assert_eq!(decode_player(&rows[0]).age, Some(23));
    }

    #[test]
    fn age_falls_back_to_dob() {
        let rows = csv::parse("PlayerId,First,DoB\n7,Ana,1990-06-15");
        let age = decode_player(&rows[0]).age.expect("computable age");
        assert!(age >= 30, "age {age} should be at least 30");
    }

    #[test]
    fn placeholder_name_is_case_insensitive() {
        let rows = csv::parse("PlayerId,First,Last\n7,player,\n8,Real,Name");
        let published = decode_players(&rows);
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].name, "Real Name");
    }
}
