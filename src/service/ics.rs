use chrono::Utc;
use icalendar::{Calendar, Component, Event, EventLike, Property};

use crate::models::game::GameRecord;

pub const CALENDAR_NAME: &str = "MLB Free Games";

/// Fixed note attached to every event.
const SCHEDULE_NOTE: &str =
    "Broadcast schedule is subject to change. Check MLB.com for the latest listings.";

/// Render the scraped schedule as an iCalendar document. All start and end
/// instants are written in absolute UTC form; the emitter takes care of the
/// CRLF line convention.
pub fn serialize_feed(games: &[GameRecord]) -> String {
    let mut calendar = Calendar::new();
    calendar.name(CALENDAR_NAME);
    calendar.timezone("UTC");
    calendar.append_property(Property::new("METHOD", "PUBLISH"));

    let stamp = Utc::now();
    for game in games {
        let mut event = Event::new();
        event.timestamp(stamp);
        event.uid(&game.uid());
        event.summary(&game.summary);
        event.description(SCHEDULE_NOTE);
        event.starts(game.start);
        event.ends(game.end());
        calendar.push(event.done());
    }

    calendar.done().to_string()
}
