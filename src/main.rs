// src/main.rs

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use antiquarium::config::Config;
use antiquarium::storage::{InMemoryStore, InventoryStore, PgInventoryStore};

// Entry point of the inventory service.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = Config::from_env();

    // Logging first, so every later step is visible
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Pick the storage collaborator: PostgreSQL when configured, memory otherwise
    let store: Arc<dyn InventoryStore> = match &config.database_url {
        Some(url) => {
            let store = PgInventoryStore::connect(url, config.max_connections)
                .await
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
            // Tables are created on the first start
            store
                .ensure_schema()
                .await
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
            Arc::new(store)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, inventory is kept in memory and lost on exit");
            Arc::new(InMemoryStore::new())
        }
    };

    let app_state = web::Data::new(antiquarium::build_state(store));

    let addr = config.addr();
    tracing::info!(%addr, "starting inventory service");

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            // .clone() because the closure runs once per worker
            .app_data(app_state.clone())
            .configure(antiquarium::configure)
    })
    .bind(&addr)?
    .run()
    .await
}
