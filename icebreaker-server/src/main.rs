use actix_web::{middleware::Logger, web, App, HttpServer};
use clap::{Arg, Command};
use icebreaker_server::config::{AppConfig, StorageBackend};
use icebreaker_server::error::AppResult;
use icebreaker_server::handlers::AppState;
use icebreaker_server::routes;
use icebreaker_server::storage::{MemoryStore, QuestionStore, SqliteStore};
use std::path::Path;
use std::sync::Arc;
use std::time::SystemTime;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[actix_web::main]
async fn main() -> AppResult<()> {
    // Parse command line arguments
    let matches = Command::new("icebreaker-server")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Icebreaker question service - random prompts and ratings for team sessions")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Path to configuration file")
                .value_name("FILE"),
        )
        .get_matches();

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("icebreaker_server=info".parse().unwrap()))
        .init();

    tracing::info!("Starting icebreaker server");

    // Load configuration
    let config = match matches.get_one::<String>("config") {
        Some(path) => AppConfig::load_from_file(Path::new(path))?,
        None => AppConfig::load()?,
    };

    // Construct the configured storage backend and inject it into the
    // handler state; nothing else in the server knows which one is active.
    let store: Arc<dyn QuestionStore> = match config.storage.backend {
        StorageBackend::Memory => {
            tracing::info!("Using in-memory storage (volatile)");
            Arc::new(MemoryStore::new())
        }
        StorageBackend::Sqlite => {
            tracing::info!("Using sqlite storage at {:?}", config.storage.path);
            Arc::new(SqliteStore::new(&config.storage.path)?)
        }
    };

    let seeded = store.seed_if_empty()?;
    if seeded > 0 {
        tracing::info!("Seeded {} sample questions", seeded);
    }

    let app_state = web::Data::new(AppState {
        store,
        start_time: SystemTime::now(),
    });

    // Start HTTP server
    let server_addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Starting HTTP server on {}", server_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(Logger::default())
            .configure(routes::configure_routes)
    })
    .bind(&server_addr)?
    .run()
    .await?;

    Ok(())
}
