use async_trait::async_trait;
use tracing::info;

/// The article MLB.com keeps the season's free game schedule on.
pub const SCHEDULE_URL: &str = "https://www.mlb.com/news/mlb-free-game-of-the-day";

const USER_AGENT: &str = "mlb-free-games-feed/0.1 (calendar feed generator)";

#[async_trait]
pub trait SchedulePageClient: Send + Sync {
    async fn fetch_page(&self) -> Result<String, String>;
}

pub struct MlbScheduleClient {
    client: reqwest::Client,
}

impl MlbScheduleClient {
    pub fn new() -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| format!("Failed to build HTTP client: {}", e))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl SchedulePageClient for MlbScheduleClient {
    async fn fetch_page(&self) -> Result<String, String> {
        let response = self
            .client
            .get(SCHEDULE_URL)
            .send()
            .await
            .map_err(|e| format!("Failed to fetch schedule page: {}", e))?;
        if !response.status().is_success() {
            return Err(format!("Schedule page returned {}", response.status()));
        }
        let body = response
            .text()
            .await
            .map_err(|e| format!("Failed to read schedule page body: {}", e))?;
        info!("Fetched schedule page ({} bytes)", body.len());
        Ok(body)
    }
}
