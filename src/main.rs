use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use YTAnalytics::api::{self, AppState};
use YTAnalytics::config::Config;
use YTAnalytics::telemetry;
use YTAnalytics::yt::YtClient;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();
    telemetry::init_tracing(&config.rust_log, config.log_json)?;

    let api_key = config.resolve_api_key()?;
    let client = YtClient::with_base_url(&api_key, &config.upstream_base_url);
    let state = AppState::new(Arc::new(client), config.status_policy());

    let app = api::router(state)
        .layer(api::cors_layer(&config.cors_origin)?)
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        upstream = %config.upstream_base_url,
        policy = ?config.status_policy(),
        "listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("received ctrl-c, shutting down");
}
