use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use handlers::health_check;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use translation_handler::{
    count_handler, find_handler, index_handler, normalize_handler, where_handler,
};

use crate::config::ServerConfig;
use crate::translator::{N1qlTranslator, TranslatorOptions};

pub mod handlers;
pub mod models;
mod translation_handler;

#[derive(Clone)]
pub struct AppState {
    pub translator: N1qlTranslator,
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            translator: N1qlTranslator::new(TranslatorOptions::from(&config)),
            config,
        }
    }
}

/// Build the HTTP router for a configuration
pub fn build_router(config: ServerConfig) -> Router {
    let max_body_bytes = config.max_body_bytes;

    Router::new()
        .route("/health", get(health_check))
        .route("/translate/find", post(find_handler))
        .route("/translate/count", post(count_handler))
        .route("/translate/where", post(where_handler))
        .route("/translate/index", post(index_handler))
        .route("/normalize", post(normalize_handler))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(CatchPanicLayer::new())
        .with_state(Arc::new(AppState::new(config)))
}

pub async fn run_with_config(config: ServerConfig) -> std::io::Result<()> {
    log::info!(
        "Server configuration: http={}:{}, compat={}, max_selector_depth={}",
        config.http_host,
        config.http_port,
        config.compat,
        config.max_selector_depth
    );

    let http_bind_address = format!("{}:{}", config.http_host, config.http_port);
    let app = build_router(config);

    let http_listener = match TcpListener::bind(&http_bind_address).await {
        Ok(listener) => {
            log::info!("Successfully bound HTTP listener to {}", http_bind_address);
            listener
        }
        Err(e) => {
            log::error!(
                "Failed to bind HTTP listener to {}: {}",
                http_bind_address,
                e
            );
            return Err(e);
        }
    };

    println!("mango-n1ql server is running");
    println!("  HTTP API: http://{}", http_bind_address);

    axum::serve(http_listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => log::info!("Received Ctrl+C, shutting down"),
        Err(e) => log::error!("Failed to listen for Ctrl+C: {}", e),
    }
}
