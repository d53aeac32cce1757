use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::America::New_York;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::warn;

use crate::models::game::GameRecord;

/// The two article sections the schedule lives under, identified by their
/// `data-slug` attribute. Everything outside these regions is ignored.
const SCHEDULE_REGION_SELECTOR: &str = concat!(
    r#"div[data-slug="mlb-free-games-first-half"], "#,
    r#"div[data-slug="mlb-free-games-second-half"]"#,
);

/// Date labels are bolded inside their own paragraph,
/// e.g. `<p><strong>October 1</strong></p>`. No year is printed.
const DATE_LABEL_SELECTOR: &str = "p > strong";

/// Scrape every free game listed on the page, in document order.
///
/// The page's markup is not contractually stable, so nothing here is fatal:
/// a region, date label, or game block that does not match the expected
/// shape is logged and skipped, and whatever did match is returned.
pub fn extract_games(html: &str) -> Vec<GameRecord> {
    let Ok(region_selector) = Selector::parse(SCHEDULE_REGION_SELECTOR) else {
        return Vec::new();
    };
    let Ok(label_selector) = Selector::parse(DATE_LABEL_SELECTOR) else {
        return Vec::new();
    };

    let document = Html::parse_document(html);
    let year = current_schedule_year();
    let mut games = Vec::new();
    for region in document.select(&region_selector) {
        for label_el in region.select(&label_selector) {
            let label = flatten_text(&label_el);
            let label = label.trim_end_matches(':').trim();
            if label.is_empty() {
                continue;
            }
            if let Some(game) = game_for_label(label_el, label, year) {
                games.push(game);
            }
        }
    }
    games
}

fn game_for_label(label_el: ElementRef, label: &str, year: i32) -> Option<GameRecord> {
    let paragraph = label_el.parent().and_then(ElementRef::wrap)?;
    let Some(block) = next_element_sibling(paragraph) else {
        warn!("No game block follows date label {:?}", label);
        return None;
    };
    let text = flatten_text(&block);

    let Some((away, home)) = extract_matchup(&text) else {
        warn!("No matchup found for {:?} in {:?}", label, text);
        return None;
    };
    let Some(time) = extract_start_time(&text) else {
        warn!("No start time found for {:?} in {:?}", label, text);
        return None;
    };
    let Some(start) = resolve_start_instant(label, time, year) else {
        warn!("Could not resolve {:?} {} as an Eastern time", label, time);
        return None;
    };
    Some(GameRecord::new(away, home, start))
}

/// The matchup is free text of the form `Orioles vs. Rays` with one or two
/// words per team name.
pub(crate) fn extract_matchup(text: &str) -> Option<(String, String)> {
    let pattern = Regex::new(r"(\w+(?: \w+)?) vs\. (\w+(?: \w+)?)").ok()?;
    let caps = pattern.captures(text)?;
    Some((caps[1].to_string(), caps[2].to_string()))
}

/// Start times look like `7:35 p.m.` or `1:10pm`, always 12-hour clock with
/// an explicit meridiem.
pub(crate) fn extract_start_time(text: &str) -> Option<NaiveTime> {
    let pattern = Regex::new(r"(?i)\b(\d{1,2}):(\d{2})\s*([ap])\.?m\.?").ok()?;
    let caps = pattern.captures(text)?;
    let hour: u32 = caps[1].parse().ok()?;
    let minute: u32 = caps[2].parse().ok()?;
    if hour == 0 || hour > 12 {
        return None;
    }
    let hour24 = hour % 12 + if caps[3].eq_ignore_ascii_case("p") { 12 } else { 0 };
    NaiveTime::from_hms_opt(hour24, minute, 0)
}

/// Interpret a `Month Day` label plus a clock time as Eastern wall-clock
/// time in the given year. Invalid dates and times the Eastern clock skips
/// or repeats around DST transitions resolve to `None`.
pub(crate) fn resolve_start_instant(
    label: &str,
    time: NaiveTime,
    year: i32,
) -> Option<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(&format!("{} {}", label, year), "%B %e %Y").ok()?;
    New_York
        .from_local_datetime(&date.and_time(time))
        .single()
        .map(|dt| dt.with_timezone(&Utc))
}

// The page never prints a year. Assume the current Eastern calendar year;
// a December listing fetched in January would land a year off.
fn current_schedule_year() -> i32 {
    Utc::now().with_timezone(&New_York).year()
}

fn next_element_sibling(element: ElementRef) -> Option<ElementRef> {
    let mut node = element.next_sibling();
    while let Some(current) = node {
        if let Some(found) = ElementRef::wrap(current) {
            return Some(found);
        }
        node = current.next_sibling();
    }
    None
}

fn flatten_text(element: &ElementRef) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matchup_single_word_teams() {
        let found = extract_matchup("Orioles vs. Rays, 7:35 p.m. ET");
        assert_eq!(found, Some(("Orioles".to_string(), "Rays".to_string())));
    }

    #[test]
    fn matchup_two_word_teams() {
        let found = extract_matchup("White Sox vs. Red Sox, 1:10 p.m.");
        assert_eq!(found, Some(("White Sox".to_string(), "Red Sox".to_string())));
    }

    #[test]
    fn matchup_requires_vs_token() {
        assert_eq!(extract_matchup("Yankees at Dodgers, 4:05 p.m."), None);
    }

    #[test]
    fn start_time_accepts_meridiem_variants() {
        let expected = NaiveTime::from_hms_opt(19, 35, 0);
        assert_eq!(extract_start_time("7:35 p.m."), expected);
        assert_eq!(extract_start_time("7:35 pm"), expected);
        assert_eq!(extract_start_time("7:35PM"), expected);
        assert_eq!(
            extract_start_time("11:05 a.m."),
            NaiveTime::from_hms_opt(11, 5, 0)
        );
    }

    #[test]
    fn start_time_noon_and_midnight_hours() {
        assert_eq!(
            extract_start_time("12:10 p.m."),
            NaiveTime::from_hms_opt(12, 10, 0)
        );
        assert_eq!(
            extract_start_time("12:10 a.m."),
            NaiveTime::from_hms_opt(0, 10, 0)
        );
    }

    #[test]
    fn start_time_rejects_out_of_range_fields() {
        assert_eq!(extract_start_time("13:05 p.m."), None);
        assert_eq!(extract_start_time("7:75 p.m."), None);
        assert_eq!(extract_start_time("first pitch TBD"), None);
    }

    #[test]
    fn resolve_uses_daylight_offset_in_october() {
        let time = NaiveTime::from_hms_opt(19, 35, 0).unwrap();
        let start = resolve_start_instant("October 1", time, 2025).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2025, 10, 1, 23, 35, 0).unwrap());
    }

    #[test]
    fn resolve_uses_standard_offset_in_january() {
        let time = NaiveTime::from_hms_opt(19, 35, 0).unwrap();
        let start = resolve_start_instant("January 15", time, 2025).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2025, 1, 16, 0, 35, 0).unwrap());
    }

    #[test]
    fn resolve_rejects_invalid_dates() {
        let time = NaiveTime::from_hms_opt(19, 35, 0).unwrap();
        assert_eq!(resolve_start_instant("February 30", time, 2025), None);
        assert_eq!(resolve_start_instant("Opening Day", time, 2025), None);
    }

    #[test]
    fn resolve_rejects_times_skipped_by_dst() {
        // 2:30 a.m. does not exist on the spring-forward night.
        let time = NaiveTime::from_hms_opt(2, 30, 0).unwrap();
        assert_eq!(resolve_start_instant("March 9", time, 2025), None);
    }

    #[test]
    fn extract_ignores_content_outside_schedule_regions() {
        let html = r#"
            <html><body>
            <div data-slug="unrelated-article">
              <p><strong>April 2</strong></p>
              <p>Mets vs. Marlins, 6:40 p.m. ET</p>
            </div>
            <div data-slug="mlb-free-games-first-half">
              <p><strong>April 10</strong></p>
              <p>Orioles vs. Rays, 7:35 p.m. ET</p>
            </div>
            </body></html>
        "#;
        let games = extract_games(html);
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].summary, "MLB Free Game: Orioles vs. Rays");
    }

    #[test]
    fn extract_skips_unparseable_blocks_without_dropping_siblings() {
        let html = r#"
            <html><body>
            <div data-slug="mlb-free-games-first-half">
              <p><strong>April 10</strong></p>
              <p>Orioles vs. Rays, 7:35 p.m. ET</p>
              <p><strong>April 11</strong></p>
              <p>Cubs vs. Cardinals, first pitch TBD</p>
              <p><strong>April 12</strong></p>
              <p>Yankees at Dodgers, 4:05 p.m. ET</p>
              <p><strong>April 13</strong></p>
              <p>White Sox vs. Red Sox, 1:10 p.m. ET</p>
            </div>
            </body></html>
        "#;
        let games = extract_games(html);
        let summaries: Vec<&str> = games.iter().map(|g| g.summary.as_str()).collect();
        assert_eq!(
            summaries,
            vec![
                "MLB Free Game: Orioles vs. Rays",
                "MLB Free Game: White Sox vs. Red Sox",
            ]
        );
    }

    #[test]
    fn extract_preserves_document_order_across_regions() {
        let html = r#"
            <html><body>
            <div data-slug="mlb-free-games-first-half">
              <p><strong>April 10</strong></p>
              <p>Orioles vs. Rays, 7:35 p.m. ET</p>
            </div>
            <div data-slug="mlb-free-games-second-half">
              <p><strong>August 20</strong></p>
              <p>Guardians vs. Tigers, 6:10 p.m. ET</p>
              <p><strong>October 1</strong></p>
              <p>Brewers vs. Pirates, 12:35 p.m. ET</p>
            </div>
            </body></html>
        "#;
        let games = extract_games(html);
        assert_eq!(games.len(), 3);
        assert_eq!(games[0].away_team, "Orioles");
        assert_eq!(games[1].away_team, "Guardians");
        assert_eq!(games[2].away_team, "Brewers");
    }

    #[test]
    fn extract_returns_empty_for_markup_with_no_regions() {
        assert!(extract_games("<html><body><p>rain delay</p></body></html>").is_empty());
        assert!(extract_games("").is_empty());
    }
}
