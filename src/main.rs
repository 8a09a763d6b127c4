use std::env;
use std::io::{self, BufRead, Write};

use anyhow::Result;

use matchday::chat::{ChatBackend, ChatSession, GeminiChat};
use matchday::config::ClubConfig;
use matchday::fixtures::{self, Match};
use matchday::record;
use matchday::season;
use matchday::sheets::{self, GvizSheetSource};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = ClubConfig::from_env();

    let args: Vec<String> = env::args().skip(1).collect();
    let command = args.first().map(String::as_str).unwrap_or_default();
    let json = args.iter().any(|a| a == "--json");
    let season_arg = args
        .iter()
        .skip(1)
        .find(|a| !a.starts_with("--"))
        .map(String::as_str);

    match command {
        "roster" => roster_cmd(&config, json),
        "fixtures" => fixtures_cmd(&config, json),
        "stats" => stats_cmd(&config, season_arg, json),
        "record" => record_cmd(&config, json),
        "seasons" => seasons_cmd(&config),
        "chat" => chat_cmd(&config),
        _ => {
            usage();
            Ok(())
        }
    }
}

fn usage() {
    eprintln!(
        "usage: matchday <command> [--json]\n\
         \n\
         commands:\n\
         \x20 roster            print the published player list\n\
         \x20 fixtures          print fixtures and results, upcoming first\n\
         \x20 stats [SEASON]    print the stat leaderboard, optionally for one season\n\
         \x20 record            print the club's win/draw/loss record\n\
         \x20 seasons           print the selectable season keys\n\
         \x20 chat              talk to the club mascot\n\
         \n\
         configuration comes from the environment (or a .env file):\n\
         \x20 CLUB_SHEET_ID, CLUB_TEAM_NAME, CLUB_DEFAULT_VENUE, GEMINI_API_KEY"
    );
}

fn roster_cmd(config: &ClubConfig, json: bool) -> Result<()> {
    let source = GvizSheetSource::from_config(config)?;
    let players = sheets::fetch_players(&source, config)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&players)?);
        return Ok(());
    }
    println!("{:<4} {:<24} {:<16} {:>3}  {}", "ID", "Name", "Position", "#", "Status");
    for p in &players {
        let number = p
            .jersey_number
            .map(|n| n.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<4} {:<24} {:<16} {:>3}  {}",
            p.id, p.name, p.position, number, p.status
        );
    }
    Ok(())
}

fn fixtures_cmd(config: &ClubConfig, json: bool) -> Result<()> {
    let source = GvizSheetSource::from_config(config)?;
    let matches = sheets::fetch_matches(&source, config)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
        return Ok(());
    }
    for m in &matches {
        println!("{}", fixture_line(m));
    }
    Ok(())
}

fn fixture_line(m: &Match) -> String {
    let score = match (m.home.score, m.away.score) {
        (Some(h), Some(a)) => format!("{h}-{a}"),
        _ => "vs".to_string(),
    };
    format!(
        "{} {}  {:<24} {:^5} {:<24} [{}]  {}",
        m.date, m.time, m.home.name, score, m.away.name, m.status, m.season
    )
}

fn stats_cmd(config: &ClubConfig, season_key: Option<&str>, json: bool) -> Result<()> {
    let source = GvizSheetSource::from_config(config)?;
    let players = sheets::fetch_players_with_stats(&source, config)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&players)?);
        return Ok(());
    }

    println!(
        "{:<24} {:>3} {:>3} {:>3} {:>4} {:>3} {:>4} {:>4} {:>5}",
        "Name", "App", "G", "A", "Sh", "F", "+/-", "MotM", "Saves"
    );
    for pws in &players {
        let stats = match season_key {
            Some(key) => match pws.by_season.get(key) {
                Some(stats) => stats,
                None => continue,
            },
            None => &pws.overall,
        };
        if stats.appearances == 0 && season_key.is_none() {
            continue;
        }
        let saves = stats
            .saves
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<24} {:>3} {:>3} {:>3} {:>4} {:>3} {:>4} {:>4} {:>5}",
            pws.player.name,
            stats.appearances,
            stats.goals,
            stats.assists,
            stats.shots,
            stats.fouls,
            stats.plus_minus,
            stats.man_of_the_match,
            saves
        );
    }
    Ok(())
}

fn record_cmd(config: &ClubConfig, json: bool) -> Result<()> {
    let source = GvizSheetSource::from_config(config)?;
    let matches = sheets::fetch_matches(&source, config)?;
    let r = record::team_record(&matches, &config.team_name);
    if json {
        println!("{}", serde_json::to_string_pretty(&r)?);
        return Ok(());
    }
    println!(
        "{}: {}W {}D {}L over {} played",
        config.team_name, r.wins, r.draws, r.losses, r.played
    );
    Ok(())
}

fn seasons_cmd(config: &ClubConfig) -> Result<()> {
    let source = GvizSheetSource::from_config(config)?;
    let matches = sheets::fetch_matches(&source, config)?;
    let current = season::current_season();
    let keys = fixtures::selectable_seasons(&matches, Some(&current.key));
    if keys.is_empty() {
        println!("(no seasons on the sheet yet)");
        return Ok(());
    }
    for key in keys {
        if key == current.key {
            println!("{key} (current)");
        } else {
            println!("{key}");
        }
    }
    Ok(())
}

fn chat_cmd(config: &ClubConfig) -> Result<()> {
    let backend = GeminiChat::from_env(config)?;
    let mut session = ChatSession::new();
    let stdin = io::stdin();

    println!(
        "Chatting with the {} mascot. Empty line quits.",
        config.team_name
    );
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = stdin.lock().lines().next() else {
            break;
        };
        let line = line?;
        if line.trim().is_empty() {
            break;
        }
        match backend.send(&mut session, line.trim()) {
            Ok(reply) => println!("{reply}"),
            Err(err) => eprintln!("[WARN] Chat error: {err}"),
        }
    }
    Ok(())
}
