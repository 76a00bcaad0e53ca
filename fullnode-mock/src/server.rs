/// Axum HTTP server setup and routing

use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::*;
use crate::state::Ledger;

pub fn create_router(ledger: Arc<Ledger>) -> Router {
    // Allow the gateway and tests to call from anywhere
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Object queries
        .route("/objects/:id", get(get_object))
        .route("/owned/:address/caps", get(get_owned_caps))
        .route("/owned/:address/objects", get(get_owned_objects))
        .route(
            "/owned/:address/subscriptions",
            get(get_owned_subscriptions),
        )
        // Transaction endpoints
        .route("/tx/create-allowlist", post(create_allowlist))
        .route("/tx/create-service", post(create_service))
        .route("/tx/add-member", post(add_member))
        .route("/tx/remove-member", post(remove_member))
        .route("/tx/attach-blob", post(attach_blob))
        .route("/tx/subscribe", post(subscribe))
        // Blob store (publisher + aggregator)
        .route("/v1/blobs", put(put_blob))
        .route("/v1/blobs/:id", get(get_blob))
        // Test helper endpoints
        .route("/debug/requests", get(request_count))
        // Shared state
        .with_state(ledger)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn run_server(ledger: Arc<Ledger>, host: String, port: u16) -> anyhow::Result<()> {
    let app = create_router(ledger);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    log::info!("Mock full node listening on http://{}", addr);
    log::info!("Request counter: GET /debug/requests");

    axum::serve(listener, app).await?;

    Ok(())
}
