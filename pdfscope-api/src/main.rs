use anyhow::Context;
use clap::Parser;
use pdfscope_api::{app, AppState, ServerConfig};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pdfscope=info,pdfscope_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::parse();
    info!(
        "Scan engine: {} {:?}",
        config.engine.display(),
        config.engine_args
    );

    let app = app(AppState::from_config(&config));

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;

    info!("pdfscope API listening on http://{}", config.bind);

    axum::serve(listener, app).await?;
    Ok(())
}
