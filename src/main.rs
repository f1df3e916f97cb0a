use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use compensation_engine::api::{AppState, create_router};
use compensation_engine::backend::{OpenAiClient, TextGenerator};
use compensation_engine::config::ConfigLoader;

const DEFAULT_CONFIG_DIR: &str = "./config/standard";
const DEFAULT_PORT: u16 = 8080;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is not an error
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("compensation_engine=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting Compensation Recommendation Engine v{}",
        env!("CARGO_PKG_VERSION")
    );

    let config_dir =
        std::env::var("COMPENSATION_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let config = ConfigLoader::load(&config_dir)?;
    info!(
        config_dir = %config_dir,
        bands = config.bands().len(),
        "Configuration loaded"
    );

    let api_key = config.api_key()?;
    let client = OpenAiClient::new(api_key, &config.settings().backend)?;
    info!(
        endpoint = %client.endpoint(),
        model = %config.settings().backend.model,
        "Backend client initialized"
    );
    let generator: Arc<dyn TextGenerator> = Arc::new(client);

    let state = AppState::new(config, generator);
    let shutdown = state.shutdown_token().clone();
    let app = create_router(state);

    let port = match std::env::var("PORT") {
        Ok(value) => value.parse()?,
        Err(_) => DEFAULT_PORT,
    };
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Shutdown signal received, cancelling in-flight batches");
            }
            shutdown.cancel();
        })
        .await?;

    Ok(())
}
