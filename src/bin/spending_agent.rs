use banking_agent_orchestrator::agents::spending::{start_server, TransactionLedger};
use banking_agent_orchestrator::config::AgentConfig;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    // Load environment variables
    dotenv::dotenv().ok();

    let config = AgentConfig::spending_from_env()?;

    info!("Spending Agent - A2A Service");
    info!("Port: {}", config.port);

    let ledger = Arc::new(TransactionLedger::demo());

    start_server(ledger, config.port).await?;

    Ok(())
}
