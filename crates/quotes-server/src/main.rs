//! Quote Server
//!
//! Serves the quote catalogue over a JSON API, optionally next to the built
//! client. Data lives in memory and is seeded on startup.

mod config;
mod error;
mod handlers;
mod remote;

use anyhow::{Context, Result};
use axum::{routing::get, Router};
use quotes_core::seed::{seed_store, SeedOptions};
use quotes_core::{MemStorage, QuoteStore};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use config::ServerConfig;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn QuoteStore>,
    pub max_page_size: u32,
}

#[tokio::main]
async fn main() {
    // Set up panic hook to log crashes
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()));
        let payload = if let Some(s) = info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        eprintln!("[PANIC] at {:?}: {}", location, payload);
        tracing::error!("PANIC at {:?}: {}", location, payload);
    }));

    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("[FATAL] Failed to load configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    // Initialize tracing, RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    if let Err(e) = tracing_subscriber::fmt().with_env_filter(filter).try_init() {
        eprintln!("[FATAL] Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!("Starting Quote Server v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run_server(config).await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server(config: ServerConfig) -> Result<()> {
    info!(
        "Config loaded: bind={}, max_page_size={}",
        config.bind_address, config.max_page_size
    );

    let store = MemStorage::new();

    if config.seed.enabled {
        let mut rng = match config.seed.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let remote_quotes = if config.seed.fetch_remote {
            remote::fetch_quotes().await
        } else {
            Vec::new()
        };
        let options = SeedOptions {
            target_quotes: config.seed.target_quotes,
            remote_quotes,
        };
        let status = seed_store(&store, &options, &mut rng)
            .await
            .context("Failed to seed quote store")?;
        info!(
            "Quote store ready: {} quotes, {} authors, {} categories, {} tags",
            status.total, status.authors, status.categories, status.tags
        );
    } else {
        info!("Seeding disabled, starting with an empty store");
    }

    let state = AppState {
        store: Arc::new(store),
        max_page_size: config.max_page_size,
    };

    if let Some(dir) = &config.static_dir {
        info!("Static files directory: {}", dir.display());
    }
    let app = app(state, config.static_dir.as_deref());

    let addr: SocketAddr = config
        .bind_address
        .parse()
        .context("Failed to parse bind address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!("Server listening on {}", addr);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn app(state: AppState, static_dir: Option<&Path>) -> Router {
    let mut router = Router::new()
        .route("/health", get(handlers::health))
        .nest("/api", api_routes());

    // SPA fallback, unknown paths serve index.html
    if let Some(dir) = static_dir {
        router = router.fallback_service(
            ServeDir::new(dir).not_found_service(ServeFile::new(dir.join("index.html"))),
        );
    }

    router
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/quotes", get(handlers::quotes::list))
        .route("/quotes/featured", get(handlers::quotes::featured))
        .route("/quotes/random", get(handlers::quotes::random))
        .route("/quotes/:id", get(handlers::quotes::get))
        .route("/search", get(handlers::search::search))
        .route("/status", get(handlers::status::status))
        .route("/categories", get(handlers::categories::list))
        .route("/categories/:slug", get(handlers::categories::get))
        .route("/tags", get(handlers::tags::list))
        .route("/tags/:slug", get(handlers::tags::get))
        .route("/authors", get(handlers::authors::list))
        .route("/authors/popular", get(handlers::authors::popular))
        .route("/authors/:id", get(handlers::authors::get))
}
