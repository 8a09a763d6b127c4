//! Data backend for an amateur club's promotional site: pulls the club
//! spreadsheet's CSV export, decodes it into typed records, and aggregates
//! per-game stat lines into roster, fixture, and leaderboard views.

pub mod chat;
pub mod config;
pub mod csv;
pub mod fixtures;
pub mod game_stats;
pub mod record;
pub mod roster;
pub mod season;
pub mod sheets;
