use std::env;

/// Club identity and spreadsheet layout, passed explicitly into the pipeline
/// instead of living in module-level globals.
#[derive(Debug, Clone)]
pub struct ClubConfig {
    pub team_name: String,
    pub team_logo_url: Option<String>,
    pub default_venue: String,
    pub sheet_id: String,
    pub players_tab: String,
    pub games_tab: String,
    pub game_stats_tab: String,
}

impl Default for ClubConfig {
    fn default() -> Self {
        Self {
            team_name: "Toasty FC".to_string(),
            team_logo_url: None,
            default_venue: "F.O. Moxley Community Center".to_string(),
            sheet_id: String::new(),
            players_tab: "Players".to_string(),
            games_tab: "Games".to_string(),
            game_stats_tab: "GameStats".to_string(),
        }
    }
}

impl ClubConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            team_name: env::var("CLUB_TEAM_NAME").unwrap_or(defaults.team_name),
            team_logo_url: env::var("CLUB_TEAM_LOGO_URL").ok().filter(|v| !v.is_empty()),
            default_venue: env::var("CLUB_DEFAULT_VENUE").unwrap_or(defaults.default_venue),
            sheet_id: env::var("CLUB_SHEET_ID").unwrap_or(defaults.sheet_id),
            players_tab: env::var("CLUB_PLAYERS_TAB").unwrap_or(defaults.players_tab),
            games_tab: env::var("CLUB_GAMES_TAB").unwrap_or(defaults.games_tab),
            game_stats_tab: env::var("CLUB_GAME_STATS_TAB").unwrap_or(defaults.game_stats_tab),
        }
    }
}
