use banking_agent_orchestrator::{
    api::start_server, config::OrchestratorConfig, handlers::create_default_registry,
};
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    // Load environment variables
    dotenv::dotenv().ok();

    let config = OrchestratorConfig::from_env()?;

    info!("Banking Orchestrator - API Server");
    info!("Port: {}", config.port);
    info!("Spending agent: {}", config.spending_agent_url);
    info!("Trip agent: {}", config.trip_agent_url);

    if config.model_api_key.is_none() {
        warn!("GOOGLE_API_KEY not set; continuing without a model provider");
    }

    let registry = Arc::new(create_default_registry(&config)?);

    info!("Handler registry initialized");

    start_server(registry, config.port).await?;

    Ok(())
}
