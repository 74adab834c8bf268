use courtside::{
    config::{AppConfig, LIVE_BROADCAST_CAPACITY},
    session::HttpDirectoryClient,
    upload::HttpIngestionClient,
    AppState, BulkUploadAdapter, LiveEventBus, LiveGameService,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "courtside=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    info!(
        api_url = %config.api_url,
        ingestion_url = %config.ingestion_url,
        default_season_id = ?config.default_season_id,
        "Starting courtside capture server"
    );

    let directory = Arc::new(HttpDirectoryClient::new(
        config.api_url.clone(),
        config.http_timeout,
    )?);
    let ingestion = Arc::new(HttpIngestionClient::new(
        config.ingestion_url.clone(),
        config.http_timeout,
    )?);
    let uploader = BulkUploadAdapter::new(ingestion)
        .with_default_season(config.default_season_id)
        .with_custom_policy(config.custom_action_policy.clone());

    let service = LiveGameService::new(
        directory,
        uploader,
        LiveEventBus::new(LIVE_BROADCAST_CAPACITY),
    );
    let app = courtside::app(AppState::new(Arc::new(service)));

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server running on http://localhost:{}", config.port);
    axum::serve(listener, app).await?;
    Ok(())
}
