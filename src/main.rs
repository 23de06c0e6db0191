use std::{net::SocketAddr, sync::Arc};

use quickship::{
    Config, Orchestrator, PlatformClient,
    api::{self, AppState},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing with env filter, defaulting to debug levels if RUST_LOG is unset.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("debug,axum=info,reqwest=info,hyper_util=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .init();

    let config = Config::load()?;
    let settings = config.deploy_settings();
    let Config {
        platform_url,
        platform_token,
        platform_team_id,
        bind_addr,
        ..
    } = config;

    let client = PlatformClient::new(&platform_url, platform_token, platform_team_id)?;
    match client.masked_token() {
        Some(token) => tracing::info!(%platform_url, %token, "platform credential loaded"),
        None => tracing::warn!(%platform_url, "PLATFORM_TOKEN is not set, deploys will be rejected"),
    }

    let state = AppState {
        orchestrator: Arc::new(Orchestrator::new(client, settings)),
    };
    let app = api::router(state);

    let addr: SocketAddr = bind_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
