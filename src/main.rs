use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use tawreed::config::{EnvConfig, CONFIG};
use tawreed::db::database_service::DatabaseService;
use tawreed::routes::configure_routes;
use tawreed::scheduler::spawn_expiry_sweep;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();
    let config = CONFIG.get_or_init(EnvConfig::from_env);
    let addr = format!("0.0.0.0:{}", config.port);

    let database_service = Arc::new(
        DatabaseService::new(&config.db_url)
            .await
            .expect("Failed to initialize DatabaseService"),
    );

    if config.expiry_sweep_secs > 0 {
        spawn_expiry_sweep(
            Arc::clone(&database_service),
            Duration::from_secs(config.expiry_sweep_secs),
        );
    }

    info!("Starting server on {}", addr);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(Arc::clone(&database_service)))
            .configure(configure_routes)
    })
    .bind(addr)?
    .run()
    .await
}
