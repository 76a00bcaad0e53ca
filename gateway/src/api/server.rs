use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use super::handlers;
use crate::config::GatewayConfig;
use crate::manager::AppManager;

pub async fn start_server(addr: &str) -> anyhow::Result<()> {
    let manager = Arc::new(AppManager::new(GatewayConfig::from_env()));

    // Configure CORS based on environment
    // Set ALLOWED_ORIGINS="https://your-app.example.com" for production
    // If not set, allows any origin (development mode)
    let cors = match std::env::var("ALLOWED_ORIGINS") {
        Ok(origins) if !origins.is_empty() => {
            log::info!("CORS configured for origins: {}", origins);
            let origin_list: Vec<_> = origins
                .split(',')
                .map(|s| s.trim().parse().expect("Invalid CORS origin"))
                .collect();
            CorsLayer::new()
                .allow_origin(origin_list)
                .allow_methods(Any)
                .allow_headers(Any)
        }
        _ => {
            log::warn!("CORS: Allowing all origins (development mode). Set ALLOWED_ORIGINS env var for production.");
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    };

    let app = Router::new()
        // Session routes
        .route("/api/session", get(handlers::session_handler))
        .route("/api/session/connect", post(handlers::connect_handler))
        .route(
            "/api/session/disconnect",
            post(handlers::disconnect_handler),
        )
        // Page rendering (the navigable-path surface)
        .route("/api/pages", get(handlers::render_root_handler))
        .route("/api/pages/*path", get(handlers::render_page_handler))
        // Allowlist operations
        .route("/api/allowlist", post(handlers::create_allowlist_handler))
        .route(
            "/api/allowlist/:id/members",
            post(handlers::add_member_handler),
        )
        .route(
            "/api/allowlist/:id/members/:address",
            delete(handlers::remove_member_handler),
        )
        // Subscription operations
        .route("/api/service", post(handlers::create_service_handler))
        .route(
            "/api/service/:id/subscribe",
            post(handlers::subscribe_handler),
        )
        // Upload (family picks the hand-off slot)
        .route("/api/upload/:family", post(handlers::upload_handler))
        .layer(cors)
        .with_state(manager);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Handle graceful shutdown signals (Ctrl+C, SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            log::info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            log::info!("Received SIGTERM signal");
        },
    }

    log::info!("Shutdown signal received, exiting gracefully...");
}
