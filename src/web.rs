use anyhow::{Context, Result};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;

use crate::api::{self, ApiState};
use crate::config::ServerConfig;

pub fn app(state: ApiState, server: &ServerConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", api::router(state))
        .layer(RequestBodyLimitLayer::new(server.max_body_bytes))
        .layer(cors)
}

pub async fn run(state: ApiState, server: &ServerConfig) -> Result<()> {
    let addr = format!("{}:{}", server.host, server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Web server running at http://localhost:{}", server.port);
    axum::serve(listener, app(state, server))
        .await
        .context("Web server stopped unexpectedly")?;
    Ok(())
}
