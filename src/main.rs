use mse_signals::config::Config;
use mse_signals::services::storage;
use mse_signals::{app, AppState};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mse_signals=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env();
    info!(
        "Starting MSE signals server on {} ({} store)",
        config.bind_address(),
        config.store_backend
    );

    let store = storage::from_config(&config).await?;
    let addr = config.bind_address();
    let app = app(AppState::new(config, store));

    // Start the server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("MSE signals server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
