//! Win/draw/loss record for a named team over a fixture list.

use serde::Serialize;

use crate::fixtures::Match;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TeamRecord {
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub played: u32,
}

/// Counts only completed matches with both scores on the sheet that name
/// `team_name` on one side; everything else is skipped, never an error.
pub fn team_record(matches: &[Match], team_name: &str) -> TeamRecord {
    let mut record = TeamRecord::default();

    for m in matches {
        if m.is_upcoming {
            continue;
        }
        let (Some(home_score), Some(away_score)) = (m.home.score, m.away.score) else {
            continue;
        };
        if m.home.name != team_name && m.away.name != team_name {
            continue;
        }

        record.played += 1;
        if home_score == away_score {
            record.draws += 1;
        } else if m.home.name == team_name {
            if home_score > away_score {
                record.wins += 1;
            } else {
                record.losses += 1;
            }
        } else if away_score > home_score {
            record.wins += 1;
        } else {
            record.losses += 1;
        }
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{MatchStatus, TeamSide};

    fn played(home: &str, home_score: i32, away: &str, away_score: i32) -> Match {
        Match {
            id: 1,
            game_number: None,
            date: "2024-03-01".to_string(),
            time: "19:00".to_string(),
            home: TeamSide {
                name: home.to_string(),
                logo: None,
                score: Some(home_score),
            },
            away: TeamSide {
                name: away.to_string(),
                logo: None,
                score: Some(away_score),
            },
            venue: String::new(),
            season: "Spring 2024".to_string(),
            youtube_link: None,
            status: MatchStatus::Played,
            is_upcoming: false,
        }
    }

    #[test]
    fn counts_wins_draws_losses_from_either_side() {
        let matches = vec![
            played("TeamX", 3, "Opponent", 1),
            played("Opponent", 2, "TeamX", 2),
        ];
        let r = team_record(&matches, "TeamX");
        assert_eq!(
            r,
            TeamRecord {
                wins: 1,
                draws: 1,
                losses: 0,
                played: 2
            }
        );
    }

    #[test]
    fn away_loss_is_counted() {
        let matches = vec![played("Opponent", 4, "TeamX", 0)];
        let r = team_record(&matches, "TeamX");
        assert_eq!(r.losses, 1);
        assert_eq!(r.played, 1);
    }

    #[test]
    fn upcoming_and_scoreless_matches_are_skipped() {
        let mut upcoming = played("TeamX", 0, "Opponent", 0);
        upcoming.is_upcoming = true;
        upcoming.status = MatchStatus::Upcoming;
        let mut scoreless = played("TeamX", 0, "Opponent", 0);
        scoreless.home.score = None;

        let r = team_record(&[upcoming, scoreless], "TeamX");
        assert_eq!(r, TeamRecord::default());
    }

    #[test]
    fn unrelated_matches_are_skipped() {
        let r = team_record(&[played("A", 1, "B", 0)], "TeamX");
        assert_eq!(r, TeamRecord::default());
    }
}
