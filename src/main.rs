use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mbotc::config::Config;
use mbotc::server::{self, mattermost::MattermostApi, notification::NotificationClient};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,mbotc=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("config.toml"));

    info!("Loading configuration from: {}", config_path.display());
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    let site_url = config
        .host
        .site_url
        .clone()
        .context("host.site_url is required to reach the host API")?;

    info!("Configuration loaded successfully");
    info!("  Plugin: {}", config.plugin.id);
    info!("  Site URL: {}", site_url);
    info!("  Notification service: {}", config.service.api_url);

    let state = Arc::new(server::ServerState {
        host: Arc::new(MattermostApi::new(
            &site_url,
            &config.host.bot_token,
            &config.host.bot_user_id,
        )),
        notifications: NotificationClient::new(&config.service.api_url),
        client_url: config.plugin.client_url.clone(),
        offset: config.service.offset()?,
    });

    let app = server::plugin_router(&config.plugin.id, state);
    let listener = tokio::net::TcpListener::bind(&config.server.listen_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.server.listen_addr))?;

    info!("Plugin API listening on {}", config.server.listen_addr);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
