//! Environment-based configuration
//!
//! Only port numbers, downstream agent URLs, and the (unused) model
//! provider key placeholder. No config files.

use crate::error::AgentError;
use crate::Result;
use std::env;

pub const DEFAULT_ORCHESTRATOR_PORT: u16 = 8100;
pub const DEFAULT_SPENDING_AGENT_PORT: u16 = 8101;
pub const DEFAULT_TRIP_AGENT_PORT: u16 = 8102;

fn port_from_env(var: &str, default: u16) -> Result<u16> {
    match env::var(var) {
        Ok(value) => value
            .parse::<u16>()
            .map_err(|_| AgentError::ConfigError(format!("{} is not a valid port: {}", var, value))),
        Err(_) => Ok(default),
    }
}

#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    pub port: u16,
    pub spending_agent_url: String,
    pub trip_agent_url: String,
    /// Kept for parity with the hosted-model deployment; routing never
    /// reads it.
    pub model_api_key: Option<String>,
}

impl OrchestratorConfig {
    pub fn from_env() -> Result<Self> {
        let port = match env::var("PORT") {
            Ok(value) => value.parse::<u16>().map_err(|_| {
                AgentError::ConfigError(format!("PORT is not a valid port: {}", value))
            })?,
            Err(_) => port_from_env("ORCHESTRATOR_PORT", DEFAULT_ORCHESTRATOR_PORT)?,
        };

        let spending_agent_url = env::var("SPENDING_AGENT_URL")
            .unwrap_or_else(|_| format!("http://127.0.0.1:{}", DEFAULT_SPENDING_AGENT_PORT));
        let trip_agent_url = env::var("TRIP_AGENT_URL")
            .unwrap_or_else(|_| format!("http://127.0.0.1:{}", DEFAULT_TRIP_AGENT_PORT));

        let model_api_key = env::var("GOOGLE_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        Ok(Self {
            port,
            spending_agent_url,
            trip_agent_url,
            model_api_key,
        })
    }
}

#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub port: u16,
}

impl AgentConfig {
    pub fn spending_from_env() -> Result<Self> {
        Ok(Self {
            port: port_from_env("SPENDING_AGENT_PORT", DEFAULT_SPENDING_AGENT_PORT)?,
        })
    }

    pub fn trip_from_env() -> Result<Self> {
        Ok(Self {
            port: port_from_env("TRIP_AGENT_PORT", DEFAULT_TRIP_AGENT_PORT)?,
        })
    }
}
