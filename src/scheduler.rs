use std::sync::Arc;
use std::time::Duration;

use actix_web::rt::time;
use chrono::Utc;
use tracing::{error, info};

use crate::db::database_service::DatabaseService;

/// Runs the tender expiry sweep every `every` until the runtime stops.
pub fn spawn_expiry_sweep(db: Arc<DatabaseService>, every: Duration) {
    info!("tender expiry sweep every {}s", every.as_secs());
    actix_web::rt::spawn(async move {
        let mut ticker = time::interval(every);
        loop {
            ticker.tick().await;
            match db.expire_tenders(Utc::now()).await {
                Ok(res) if res.updated > 0 => info!("sweep moved {} tender(s) to awarding", res.updated),
                Ok(_) => {}
                Err(e) => error!("expiry sweep failed: {e}"),
            }
        }
    });
}
