use tracing_subscriber::EnvFilter;

use chatbridge::config::AppConfig;
use chatbridge::error::RelayError;
use chatbridge::server::{AppState, router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "chatbridge failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), RelayError> {
    let config = AppConfig::from_env()?;
    let app = router(AppState::new(&config));

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "chatbridge listening");
    axum::serve(listener, app).await?;

    Ok(())
}
