use anyhow::Context;
use fxledger::{api, config::Config, ExchangeApi, HttpExchangeApi};
use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    let config = Config::from_env().context("Configuration error")?;
    let port = config.port;

    let exchange: Arc<dyn ExchangeApi> = Arc::new(
        HttpExchangeApi::new(config.api_base_url.clone(), config.upstream_timeout)
            .context("Failed to create upstream client")?,
    );

    let app = api::create_router(api::AppState::new(config, exchange));

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
