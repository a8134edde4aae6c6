use anyhow::Context;
use roster_server::{Config, Server, ServerState, init_logger_with_file};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (.env) and logging
    dotenv::dotenv().ok();
    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty());
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    tracing::info!("Roster server starting...");

    // 2. Configuration
    let config = Config::from_env().context("Failed to load configuration")?;

    // 3. Database, migrations, bootstrap administrator
    let state = ServerState::initialize(&config)
        .await
        .context("Failed to initialize server state")?;

    // 4. HTTP
    Server::with_state(config, state)
        .run()
        .await
        .context("Server error")?;

    Ok(())
}
