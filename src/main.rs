use std::env;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use runtime_accrual::api::{AppState, create_router};
use runtime_accrual::config::ConfigLoader;

const DEFAULT_CONFIG_DIR: &str = "./config/default";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "runtime_accrual=info".into()),
        )
        .with(fmt::layer())
        .init();

    let config_dir = env::var("RUNTIME_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.into());
    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.into());

    let config = ConfigLoader::load(&config_dir)
        .with_context(|| format!("failed to load configuration from {}", config_dir))?;
    tracing::info!(
        name = %config.settings().name,
        calendars = config.calendars().len(),
        "Configuration loaded"
    );

    let app = create_router(AppState::new(config));

    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!(addr = %bind_addr, "Listening");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
