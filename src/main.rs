#![allow(non_snake_case)]

use std::env;

use tracing::Level;

use mlbFreeGames::config::{self, AppConfig};
use mlbFreeGames::runtime;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = match env::var("CONFIG_FILE") {
        Ok(path) => AppConfig::from_file(&path).unwrap_or_default(),
        Err(_) => AppConfig::default(),
    };

    let get_prop = |key: &str| -> Option<String> {
        config.get(key).or_else(|| env::var(key).ok())
    };

    let port = config::port_from(get_prop("PORT"));
    runtime::run_api(port).await;
}
