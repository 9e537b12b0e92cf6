use shop_server::{Server, ServerState, print_banner, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (dotenv, config, logger)
    let config = setup_environment()?;

    print_banner();

    tracing::info!(
        environment = %config.environment,
        timezone = %config.timezone,
        "Shop server starting..."
    );

    // 2. Backend client and session store
    let state = ServerState::initialize(&config)?;

    // 3. HTTP server
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
