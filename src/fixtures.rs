//! Match rows from the "Games" sheet: decoding, status derivation, and the
//! published fixture ordering.

use std::cmp::Ordering;
use std::fmt;

use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::config::ClubConfig;
use crate::csv::RawRow;
use crate::season;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchStatus {
    Upcoming,
    Live,
    Played,
    Win,
    Draw,
    Loss,
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MatchStatus::Upcoming => "Upcoming",
            MatchStatus::Live => "Live",
            MatchStatus::Played => "Played",
            MatchStatus::Win => "Win",
            MatchStatus::Draw => "Draw",
            MatchStatus::Loss => "Loss",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamSide {
    pub name: String,
    pub logo: Option<String>,
    pub score: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: u32,
    pub game_number: Option<String>,
    /// Normalized `YYYY-MM-DD`.
    pub date: String,
    /// `HH:MM` text; midnight when the sheet leaves it blank.
    pub time: String,
    #[serde(rename = "homeTeam")]
    pub home: TeamSide,
    #[serde(rename = "awayTeam")]
    pub away: TeamSide,
    pub venue: String,
    pub season: String,
    pub youtube_link: Option<String>,
    pub status: MatchStatus,
    pub is_upcoming: bool,
}

/// Decodes one Games row against the live clock.
pub fn decode_match(row: &RawRow, club: &ClubConfig) -> Match {
    decode_match_at(row, club, Local::now().naive_local())
}

/// Total decoder: bad cells degrade to defaults, never errors. Exactly one
/// side is the club's own team; the `Home//Away` column says which.
pub fn decode_match_at(row: &RawRow, club: &ClubConfig, now: NaiveDateTime) -> Match {
    let id = row
        .text("GameId")
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0);
    let date = normalize_date(row.text("GameDate"), now.date());
    let time = row.text("GameTime").unwrap_or("00:00").to_string();

    let club_is_home = row
        .text("Home//Away")
        .is_some_and(|s| s.trim().eq_ignore_ascii_case("home"));
    let opponent = row.text("Opponent").unwrap_or("Opponent TBA").to_string();
    let club_score = parse_score(row.get("Goals"));
    let opponent_score = parse_score(row.get("GoalsAgainst"));

    let club_side = TeamSide {
        name: club.team_name.clone(),
        logo: club.team_logo_url.clone(),
        score: club_score,
    };
    let (home, away) = if club_is_home {
        let away = TeamSide {
            name: opponent,
            logo: row.text("Away Logo").map(str::to_string),
            score: opponent_score,
        };
        (club_side, away)
    } else {
        let home = TeamSide {
            name: opponent,
            logo: row.text("Home Logo").map(str::to_string),
            score: opponent_score,
        };
        (home, club_side)
    };

    let (status, is_upcoming) = derive_status(
        row.text("W-D-L"),
        kickoff(&date, &time),
        now,
        home.score.is_some() || away.score.is_some(),
    );

    Match {
        id,
        game_number: row.text("Game#").map(str::to_string),
        date,
        time,
        home,
        away,
        venue: row
            .text("Venue")
            .unwrap_or(&club.default_venue)
            .to_string(),
        season: row.text("Season").unwrap_or("Unknown Season").trim().to_string(),
        youtube_link: row.text("YouTubeLink").map(str::to_string),
        status,
        is_upcoming,
    }
}

/// Decodes, drops id-0 rows, and applies the published ordering.
pub fn decode_matches(rows: &[RawRow], club: &ClubConfig) -> Vec<Match> {
    let now = Local::now().naive_local();
    let mut matches: Vec<Match> = rows
        .iter()
        .map(|row| decode_match_at(row, club, now))
        .filter(|m| m.id != 0)
        .collect();
    sort_matches(&mut matches);
    matches
}

/// Published ordering: upcoming fixtures first (soonest kickoff leading),
/// then finished ones most-recent-first. Unparseable kickoffs pin to the
/// front of their group instead of erroring.
pub fn sort_matches(matches: &mut [Match]) {
    matches.sort_by(|a, b| match (a.is_upcoming, b.is_upcoming) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (true, true) => sort_stamp(a).cmp(&sort_stamp(b)),
        (false, false) => sort_stamp(b).cmp(&sort_stamp(a)),
    });
}

/// Distinct season keys across the fixture list, newest league first. The
/// current season's key can be forced in via `ensure` so the selector offers
/// it before the first game is on the sheet.
pub fn selectable_seasons(matches: &[Match], ensure: Option<&str>) -> Vec<String> {
    season::selectable_seasons(matches.iter().map(|m| m.season.as_str()), ensure)
}

/// An explicit outcome letter wins; otherwise a kickoff in the past (or an
/// unreadable kickoff with any score on the sheet) means the game was played.
fn derive_status(
    wdl: Option<&str>,
    kickoff: Option<NaiveDateTime>,
    now: NaiveDateTime,
    has_score: bool,
) -> (MatchStatus, bool) {
    match wdl.map(|s| s.trim().to_ascii_uppercase()).as_deref() {
        Some("W") => (MatchStatus::Win, false),
        Some("D") => (MatchStatus::Draw, false),
        Some("L") => (MatchStatus::Loss, false),
        _ => {
            let in_past = kickoff.is_some_and(|k| k < now);
            if in_past || (kickoff.is_none() && has_score) {
                (MatchStatus::Played, false)
            } else {
                (MatchStatus::Upcoming, true)
            }
        }
    }
}

/// Normalizes a GameDate cell to `YYYY-MM-DD`. Slash dates get their slashes
/// swapped; other shapes go through a tolerant format list; anything else
/// falls back to today.
fn normalize_date(raw: Option<&str>, today: NaiveDate) -> String {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return today.format("%Y-%m-%d").to_string();
    };

    if is_slash_date(raw) {
        return raw.replace('/', "-");
    }

    const FORMATS: [&str; 4] = ["%Y-%m-%d", "%m/%d/%Y", "%b %d, %Y", "%B %d, %Y"];
    for fmt in FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(raw, fmt) {
            return parsed.format("%Y-%m-%d").to_string();
        }
    }
    today.format("%Y-%m-%d").to_string()
}

/// `YYYY/MM/DD` shape check, digits and slash positions only.
fn is_slash_date(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 10
        && b[4] == b'/'
        && b[7] == b'/'
        && b.iter()
            .enumerate()
            .all(|(i, c)| i == 4 || i == 7 || c.is_ascii_digit())
}

fn kickoff(date: &str, time: &str) -> Option<NaiveDateTime> {
    let time = if time.trim().is_empty() { "00:00" } else { time.trim() };
    let stamp = format!("{date} {time}");
    const FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %I:%M %p"];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&stamp, fmt).ok())
}

fn parse_score(raw: Option<&str>) -> Option<i32> {
    raw.and_then(|s| s.trim().parse().ok())
}

/// Seconds-precision sort key; unparseable kickoffs sort as the soonest
/// upcoming fixture or the most recent result.
fn sort_stamp(m: &Match) -> i64 {
    kickoff(&m.date, &m.time)
        .map(|k| k.and_utc().timestamp())
        .unwrap_or(if m.is_upcoming { i64::MIN } else { i64::MAX })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv;
    use chrono::Duration;

    fn club() -> ClubConfig {
        ClubConfig {
            team_name: "Toasty FC".to_string(),
            ..ClubConfig::default()
        }
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn row(csv_line: &str) -> RawRow {
        let header = "GameId,GameDate,GameTime,Home//Away,Opponent,Goals,GoalsAgainst,W-D-L,Venue,Season";
        csv::parse(&format!("{header}\n{csv_line}")).remove(0)
    }

    #[test]
    fn slash_date_is_normalized() {
        let m = decode_match_at(&row("1,2024/06/01,19:00,Home,Rivals,,,,,"), &club(), now());
        assert_eq!(m.date, "2024-06-01");
    }

    #[test]
    fn garbage_date_falls_back_to_today() {
        let m = decode_match_at(&row("1,soonish,19:00,Home,Rivals,,,,,"), &club(), now());
        assert_eq!(m.date, "2024-06-15");
    }

    #[test]
    fn home_row_puts_club_at_home() {
        let m = decode_match_at(&row("1,2024/06/01,19:00,Home,Rivals,3,1,,,"), &club(), now());
        assert_eq!(m.home.name, "Toasty FC");
        assert_eq!(m.home.score, Some(3));
        assert_eq!(m.away.name, "Rivals");
        assert_eq!(m.away.score, Some(1));
    }

    #[test]
    fn away_row_reverses_sides() {
        let m = decode_match_at(&row("1,2024/06/01,19:00,Away,Rivals,3,1,,,"), &club(), now());
        assert_eq!(m.home.name, "Rivals");
        assert_eq!(m.home.score, Some(1));
        assert_eq!(m.away.name, "Toasty FC");
        assert_eq!(m.away.score, Some(3));
    }

    #[test]
    fn missing_opponent_defaults_to_tba() {
        let m = decode_match_at(&row("1,2024/06/01,19:00,Home,,,,,,"), &club(), now());
        assert_eq!(m.away.name, "Opponent TBA");
    }

    #[test]
    fn wdl_letter_wins_regardless_of_date() {
        let future = now() + Duration::days(10);
        let line = format!("1,{},19:00,Home,Rivals,3,1,W,,", future.format("%Y/%m/%d"));
        let m = decode_match_at(&row(&line), &club(), now());
        assert_eq!(m.status, MatchStatus::Win);
        assert!(!m.is_upcoming);
    }

    #[test]
    fn past_game_without_wdl_is_played() {
        let past = now() - Duration::days(10);
        let line = format!("1,{},19:00,Home,Rivals,2,2,,,", past.format("%Y/%m/%d"));
        let m = decode_match_at(&row(&line), &club(), now());
        assert_eq!(m.status, MatchStatus::Played);
        assert!(!m.is_upcoming);
    }

    #[test]
    fn future_game_without_scores_is_upcoming() {
        let future = now() + Duration::days(10);
        let line = format!("1,{},19:00,Home,Rivals,,,,,", future.format("%Y/%m/%d"));
        let m = decode_match_at(&row(&line), &club(), now());
        assert_eq!(m.status, MatchStatus::Upcoming);
        assert!(m.is_upcoming);
    }

    #[test]
    fn unreadable_kickoff_with_scores_is_played() {
        // A mangled time cell breaks the kickoff parse; recorded scores
        // still mark the game as played.
        let m = decode_match_at(&row("1,2024/06/20,evening,Home,Rivals,1,0,,,"), &club(), now());
        assert_eq!(m.status, MatchStatus::Played);
    }

    #[test]
    fn upcoming_sorts_before_past_and_by_proximity() {
        let mk = |days: i64, upcoming: bool| {
            let date = (now() + Duration::days(days)).format("%Y-%m-%d").to_string();
            Match {
                id: 1,
                game_number: None,
                date,
                time: "19:00".to_string(),
                home: TeamSide { name: "A".into(), logo: None, score: None },
                away: TeamSide { name: "B".into(), logo: None, score: None },
                venue: String::new(),
                season: "Spring 2024".to_string(),
                youtube_link: None,
                status: if upcoming { MatchStatus::Upcoming } else { MatchStatus::Played },
                is_upcoming: upcoming,
            }
        };
        let mut matches = vec![mk(-14, false), mk(7, true), mk(-7, false)];
        sort_matches(&mut matches);
        assert!(matches[0].is_upcoming);
        assert_eq!(matches[1].date, (now() - Duration::days(7)).format("%Y-%m-%d").to_string());
        assert_eq!(matches[2].date, (now() - Duration::days(14)).format("%Y-%m-%d").to_string());
    }

    #[test]
    fn venue_and_season_defaults() {
        let m = decode_match_at(&row("1,2024/06/01,19:00,Home,Rivals,,,,,"), &club(), now());
        assert_eq!(m.venue, "F.O. Moxley Community Center");
        assert_eq!(m.season, "Unknown Season");
    }
}
