mod config;
mod errors;
mod game;
mod models;
mod routes;
mod search;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::game::session::SessionStore;
use crate::routes::build_router;
use crate::search::matcher::matcher_from_config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            // tracing targets use the underscored crate name
            let crate_target = env!("CARGO_PKG_NAME").replace('-', "_");
            EnvFilter::new(format!("{crate_target}={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting HireFusion core API v{}", env!("CARGO_PKG_VERSION"));

    // Select the search backend (whole-text by default; swap via FUZZY_TOKENIZED)
    let matcher = matcher_from_config(config.fuzzy_tokenized);
    info!("Fuzzy matcher initialized (backend: {})", matcher.backend());

    info!(
        "Negotiation config: offers {}..={}, {} rounds, {}s limit",
        config.game.min_offer, config.game.max_offer, config.game.rounds,
        config.game.time_limit_secs
    );

    // Build app state
    let state = AppState {
        config: config.clone(),
        matcher,
        sessions: SessionStore::new(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
