use anyhow::Context;

use pocketledger::{app, config::AppConfig, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Also loads the matching .env file, so it runs before logging init.
    let config = AppConfig::from_env()?;

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "pocketledger=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    tracing::info!(
        env = %config.env,
        database_client = %config.database_client,
        port = config.port,
        "starting pocketledger"
    );

    let port = config.port;
    let state = AppState::init(config).await?;
    state
        .store
        .migrate()
        .await
        .context("run database migrations")?;

    let app = app::build_app(state);
    app::serve(app, port).await
}
