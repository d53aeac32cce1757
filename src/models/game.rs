use chrono::{DateTime, Duration, Utc};

/// Broadcast length is not published anywhere on the source page, so every
/// game gets the same fixed block on the calendar.
pub const GAME_DURATION_HOURS: i64 = 3;

/// One free game broadcast, built fresh from the scraped page on every
/// request and discarded after the response is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub summary: String,
    pub start: DateTime<Utc>,
    pub away_team: String,
    pub home_team: String,
}

impl GameRecord {
    pub fn new(away_team: String, home_team: String, start: DateTime<Utc>) -> Self {
        Self {
            summary: format!("MLB Free Game: {} vs. {}", away_team, home_team),
            start,
            away_team,
            home_team,
        }
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.start + Duration::hours(GAME_DURATION_HOURS)
    }

    /// Stable across requests so calendar clients can dedupe a refreshed
    /// feed: date plus both team names, whitespace stripped.
    pub fn uid(&self) -> String {
        format!(
            "{}-{}vs{}@mlb-free-games",
            self.start.format("%Y%m%d"),
            strip_spaces(&self.away_team),
            strip_spaces(&self.home_team),
        )
    }
}

fn strip_spaces(name: &str) -> String {
    name.split_whitespace().collect()
}
