//! Spending analysis agent
//!
//! Leaf service: answers A2A messages with a per-user spending summary
//! computed from a read-only transaction table. The table is injected at
//! construction and never written after process start.

use crate::a2a::{A2aReply, A2aRequest, MESSAGES_PATH};
use crate::models::{SpendingSummary, Transaction};
use crate::Result;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub const SERVICE_NAME: &str = "SpendingAgent";

/// Read-only per-user transaction table.
pub struct TransactionLedger {
    by_user: HashMap<String, Vec<Transaction>>,
}

impl TransactionLedger {
    pub fn new(by_user: HashMap<String, Vec<Transaction>>) -> Self {
        Self { by_user }
    }

    /// Demo data, fixed at process start.
    pub fn demo() -> Self {
        let mut by_user = HashMap::new();

        by_user.insert(
            "user_123".to_string(),
            vec![
                Transaction::new("Food", 2500),
                Transaction::new("Travel", 1000),
                Transaction::new("Shopping", 5000),
            ],
        );
        by_user.insert(
            "user_456".to_string(),
            vec![
                Transaction::new("Food", 1800),
                Transaction::new("Rent", 15000),
                Transaction::new("Shopping", 3200),
            ],
        );
        by_user.insert(
            "user_789".to_string(),
            vec![
                Transaction::new("Gym", 500),
                Transaction::new("Food", 3000),
                Transaction::new("Transport", 2000),
            ],
        );

        Self::new(by_user)
    }

    /// Known user ids, sorted for deterministic prompts.
    pub fn known_users(&self) -> Vec<&str> {
        let mut users: Vec<&str> = self.by_user.keys().map(String::as_str).collect();
        users.sort_unstable();
        users
    }

    /// Spending summary for a user. Unknown ids get an empty summary
    /// with total 0, not an error.
    pub fn summarize(&self, user_id: &str) -> SpendingSummary {
        let transactions = self.by_user.get(user_id).cloned().unwrap_or_default();

        let total = transactions.iter().map(|t| t.amount).sum();

        let mut by_category = BTreeMap::new();
        for t in &transactions {
            *by_category.entry(t.category.clone()).or_insert(0) += t.amount;
        }

        SpendingSummary {
            user_id: user_id.to_string(),
            total,
            by_category,
            transactions,
        }
    }
}

lazy_static! {
    static ref USER_ID_RE: Regex =
        Regex::new(r"\buser_[A-Za-z0-9]+").expect("valid user id pattern");
}

/// First `user_…` token in the message text.
pub fn extract_user_id(text: &str) -> Option<&str> {
    USER_ID_RE.find(text).map(|m| m.as_str())
}

/// Render the reply text for one incoming message.
pub fn render_reply(ledger: &TransactionLedger, content: &str) -> Result<String> {
    match extract_user_id(content) {
        Some(user_id) => {
            let summary = ledger.summarize(user_id);
            Ok(serde_json::to_string_pretty(&summary)?)
        }
        None => Ok(format!(
            "Please provide a user_id. Available users: {}",
            ledger.known_users().join(", ")
        )),
    }
}

/// =============================
/// HTTP Surface
/// =============================

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": SERVICE_NAME,
    }))
}

async fn a2a_messages(
    State(ledger): State<Arc<TransactionLedger>>,
    Json(request): Json<A2aRequest>,
) -> Response {
    let Some(message) = request.last_user_message() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "No user message found"})),
        )
            .into_response();
    };

    match render_reply(&ledger, &message.content) {
        Ok(text) => Json(A2aReply::text(text)).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({"error": e.to_string()})),
        )
            .into_response(),
    }
}

pub fn create_router(ledger: Arc<TransactionLedger>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(MESSAGES_PATH, post(a2a_messages))
        .with_state(ledger)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

pub async fn start_server(ledger: Arc<TransactionLedger>, port: u16) -> Result<()> {
    let router = create_router(ledger);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!("Spending agent listening on http://0.0.0.0:{}", port);

    axum::serve(listener, router).await?;

    Ok(())
}
