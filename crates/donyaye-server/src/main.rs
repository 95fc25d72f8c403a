use std::net::SocketAddr;
use std::sync::Arc;

use donyaye_core::Config;
use donyaye_server::{AppState, router};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let config = Arc::new(Config::from_env());

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let port = config.port;
    let app = router(AppState::new(config)?);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Add-on repository URL: http://127.0.0.1:{}/manifest.json", port);

    axum::serve(listener, app).await?;
    Ok(())
}
