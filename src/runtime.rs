use std::sync::Arc;

use tracing::{error, info};

use crate::clients::mlb_page::{MlbScheduleClient, SchedulePageClient};
use crate::handlers;

pub async fn run_api(port: u16) {
    let client: Arc<dyn SchedulePageClient> = match MlbScheduleClient::new() {
        Ok(client) => Arc::new(client),
        Err(err) => {
            error!("{}", err);
            return;
        }
    };

    let routes = handlers::feed::routes(client);
    info!("Serving MLB free games feed on 0.0.0.0:{}", port);
    warp::serve(routes).run(([0, 0, 0, 0], port)).await;
}
