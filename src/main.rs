use std::time::Duration;

use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use filmshelf::config::Config;
use filmshelf::{AppState, app};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,filmshelf=debug".to_string()),
        )
        .init();

    let config = Config::from_env()?;

    let http = reqwest::Client::builder()
        .user_agent("filmshelf/0.1")
        .timeout(Duration::from_secs(30))
        .build()?;

    let state = AppState::new(config, http);
    let addr = state.config.addr;
    let data_file = state.config.data_file.clone();

    let app = app(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, data_file = %data_file.display(), "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
