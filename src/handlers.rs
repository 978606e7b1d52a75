//! Route handlers and registry
//!
//! Each route resolves to one handler. Remote handlers relay the query to
//! a downstream agent over A2A; a downstream failure becomes an inline
//! error string in an otherwise successful chat response, never an
//! orchestrator failure.

use crate::a2a::A2aClient;
use crate::advisor;
use crate::config::OrchestratorConfig;
use crate::error::AgentError;
use crate::router::{QueryRouter, Route};
use crate::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Trait for a single route handler
#[async_trait::async_trait]
pub trait RouteHandler: Send + Sync {
    fn name(&self) -> &'static str;
    async fn handle(&self, query: &str) -> Result<String>;
}

/// Registry mapping routes to handlers
pub struct HandlerRegistry {
    handlers: HashMap<Route, Arc<dyn RouteHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    pub fn register(&mut self, route: Route, handler: Arc<dyn RouteHandler>) {
        self.handlers.insert(route, handler);
    }

    pub fn get(&self, route: Route) -> Option<Arc<dyn RouteHandler>> {
        self.handlers.get(&route).cloned()
    }

    /// Classify the query and run the matching handler.
    pub async fn dispatch(&self, query: &str) -> Result<String> {
        let route = QueryRouter::classify(query);

        let handler = self.get(route).ok_or_else(|| {
            AgentError::RoutingError(format!("No handler registered for {:?}", route))
        })?;

        debug!(route = ?route, handler = handler.name(), "Dispatching query");
        handler.handle(query).await
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Relays the query verbatim to a downstream agent.
pub struct RemoteAgentHandler {
    handler_name: &'static str,
    label: &'static str,
    client: A2aClient,
}

impl RemoteAgentHandler {
    pub fn new(handler_name: &'static str, label: &'static str, client: A2aClient) -> Self {
        Self {
            handler_name,
            label,
            client,
        }
    }
}

#[async_trait::async_trait]
impl RouteHandler for RemoteAgentHandler {
    fn name(&self) -> &'static str {
        self.handler_name
    }

    async fn handle(&self, query: &str) -> Result<String> {
        match self.client.send_text(query).await {
            Ok(reply) => Ok(reply
                .first_text()
                .map(str::to_string)
                .unwrap_or_else(|| format!("No response from {} agent", self.label))),
            Err(e) => {
                warn!(agent = self.label, error = %e, "Downstream agent call failed");
                Ok(format!("Error calling {} agent: {}", self.label, e))
            }
        }
    }
}

/// Local investment advice, no downstream call.
pub struct InvestmentHandler;

#[async_trait::async_trait]
impl RouteHandler for InvestmentHandler {
    fn name(&self) -> &'static str {
        "investment_advisor"
    }

    async fn handle(&self, query: &str) -> Result<String> {
        let risk = advisor::extract_risk(query);
        let amount = advisor::extract_amount(query);

        match (risk, amount) {
            (Some(tier), Some(amount)) => {
                let advice = advisor::advise(tier, amount);
                Ok(serde_json::to_string_pretty(&advice)?)
            }
            _ => Ok(
                "Please specify risk level (low/medium/high) and amount to invest.".to_string(),
            ),
        }
    }
}

/// Fixed capability listing for everything that matches no route.
pub struct HelpHandler;

pub const HELP_TEXT: &str = "Banking Orchestrator ready! I can help with:\n\
- Spending Analysis (e.g., \"Show my spending for user_123\")\n\
- Trip Planning (e.g., \"Plan 3-day trip to Goa\")\n\
- Investment Advice (e.g., \"Invest 50000 with medium risk\")\n\
What would you like to do?";

#[async_trait::async_trait]
impl RouteHandler for HelpHandler {
    fn name(&self) -> &'static str {
        "help"
    }

    async fn handle(&self, _query: &str) -> Result<String> {
        Ok(HELP_TEXT.to_string())
    }
}

/// Wire the default registry: two remote agents, two local handlers.
pub fn create_default_registry(config: &OrchestratorConfig) -> Result<HandlerRegistry> {
    let mut registry = HandlerRegistry::new();

    registry.register(
        Route::Spending,
        Arc::new(RemoteAgentHandler::new(
            "spending_agent",
            "spending",
            A2aClient::new(&config.spending_agent_url)?,
        )),
    );
    registry.register(
        Route::Trip,
        Arc::new(RemoteAgentHandler::new(
            "trip_planner_agent",
            "trip",
            A2aClient::new(&config.trip_agent_url)?,
        )),
    );
    registry.register(Route::Investment, Arc::new(InvestmentHandler));
    registry.register(Route::Help, Arc::new(HelpHandler));

    Ok(registry)
}
