//! A2A wire contract and client
//!
//! Agent-to-agent here means: POST a JSON message list, get back a JSON
//! reply with a text field. One shot, no retries.

use crate::error::AgentError;
use crate::Result;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const MESSAGES_PATH: &str = "/a2a/messages";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct A2aMessage {
    pub role: String,
    pub content: String,
}

impl A2aMessage {
    pub fn user(content: &str) -> Self {
        Self {
            role: "user".to_string(),
            content: content.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct A2aRequest {
    pub messages: Vec<A2aMessage>,
}

impl A2aRequest {
    /// Last user-authored message, if any.
    pub fn last_user_message(&self) -> Option<&A2aMessage> {
        self.messages.iter().rev().find(|m| m.role == "user")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct A2aTextPart {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct A2aReply {
    pub content: Vec<A2aTextPart>,
}

impl A2aReply {
    pub fn text(text: String) -> Self {
        Self {
            content: vec![A2aTextPart { text }],
        }
    }

    pub fn first_text(&self) -> Option<&str> {
        self.content.first().map(|part| part.text.as_str())
    }
}

/// Connection-pooled client for one downstream agent.
#[derive(Clone)]
pub struct A2aClient {
    client: Client,
    base_url: String,
}

impl A2aClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(60))
            .pool_max_idle_per_host(8)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Send one user message, await one reply.
    pub async fn send_text(&self, content: &str) -> Result<A2aReply> {
        let url = format!("{}{}", self.base_url, MESSAGES_PATH);
        let request = A2aRequest {
            messages: vec![A2aMessage::user(content)],
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| AgentError::AgentUnreachable(format!("{}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AgentError::AgentUnreachable(format!(
                "{} returned {}",
                url, status
            )));
        }

        response
            .json::<A2aReply>()
            .await
            .map_err(|e| AgentError::MalformedReply(e.to_string()))
    }
}
