use std::sync::Arc;

use tracing::{info, warn};
use warp::Filter;
use warp::http::StatusCode;

use crate::clients::mlb_page::SchedulePageClient;
use crate::service::extractor::extract_games;
use crate::service::ics::serialize_feed;

pub const FEED_PATH: &str = "mlb-free-games.ics";
pub const ATTACHMENT_NAME: &str = "mlb-schedule.ics";

const UNAVAILABLE_BODY: &str =
    "The MLB free game schedule could not be determined right now. Try again later.\n";

const INDEX_PAGE: &str = concat!(
    "<html><body>",
    "<h1>MLB Free Games</h1>",
    "<p>Subscribe to <a href=\"/mlb-free-games.ics\">/mlb-free-games.ics</a> ",
    "in your calendar app to see upcoming free game broadcasts.</p>",
    "</body></html>",
);

pub fn routes(
    client: Arc<dyn SchedulePageClient>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let feed = warp::path(FEED_PATH)
        .and(warp::path::end())
        .and(warp::get())
        .and(with_client(client))
        .and_then(serve_feed);
    let index = warp::path::end()
        .and(warp::get())
        .map(|| warp::reply::html(INDEX_PAGE));
    feed.or(index)
}

fn with_client(
    client: Arc<dyn SchedulePageClient>,
) -> impl Filter<Extract = (Arc<dyn SchedulePageClient>,), Error = std::convert::Infallible> + Clone
{
    warp::any().map(move || client.clone())
}

/// Fetch, scrape and serialize on every request. A failed fetch is treated
/// as an empty schedule; an empty schedule is reported as 503 so callers can
/// tell "cannot determine the schedule" apart from a well-formed feed.
async fn serve_feed(
    client: Arc<dyn SchedulePageClient>,
) -> Result<Box<dyn warp::Reply>, warp::Rejection> {
    let page = match client.fetch_page().await {
        Ok(body) => body,
        Err(err) => {
            warn!("{}", err);
            String::new()
        }
    };

    let games = extract_games(&page);
    if games.is_empty() {
        return Ok(Box::new(warp::reply::with_status(
            UNAVAILABLE_BODY,
            StatusCode::SERVICE_UNAVAILABLE,
        )));
    }

    info!("Serving {} free games", games.len());
    let document = serialize_feed(&games);
    let reply = warp::reply::with_header(document, "Content-Type", "text/calendar");
    let reply = warp::reply::with_header(
        reply,
        "Content-Disposition",
        format!("attachment; filename={}", ATTACHMENT_NAME),
    );
    Ok(Box::new(reply))
}
