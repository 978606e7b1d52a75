use banking_agent_orchestrator::agents::trip::start_server;
use banking_agent_orchestrator::config::AgentConfig;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    // Load environment variables
    dotenv::dotenv().ok();

    let config = AgentConfig::trip_from_env()?;

    info!("Trip Planner Agent - A2A Service");
    info!("Port: {}", config.port);

    start_server(config.port).await?;

    Ok(())
}
