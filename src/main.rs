use anyhow::Context;
use folio::{api, config::ServiceConfig};
use tokio::net::TcpListener;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = ServiceConfig::from_env().context("invalid service configuration")?;
    tracing::info!(
        max_input_chars = config.max_input_chars,
        timeout_ms = config.process_timeout.as_millis() as u64,
        words_per_page = config.default_words_per_page,
        "starting folio"
    );

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    tracing::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, api::router(config)).await?;

    Ok(())
}
