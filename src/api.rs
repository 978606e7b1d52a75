//! REST API server for the banking orchestrator
//!
//! Exposes `/chat` and `/health` and serves the static dashboard.
//! The chat endpoint accepts the query either form-encoded (what the
//! dashboard sends) or as JSON.

use axum::extract::{FromRequest, Request, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;
use uuid::Uuid;

use crate::handlers::HandlerRegistry;
use crate::Result;

pub const SERVICE_NAME: &str = "BankingOrchestrator";

/// =============================
/// Request / Response Models
/// =============================

#[derive(Debug, Deserialize)]
struct ChatParams {
    query: String,
}

/// Extracts `{query}` from a form-encoded or JSON request body.
pub struct ChatQuery(pub String);

#[async_trait::async_trait]
impl<S> FromRequest<S> for ChatQuery
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> std::result::Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.starts_with("application/json"))
            .unwrap_or(false);

        let params = if is_json {
            Json::<ChatParams>::from_request(req, state)
                .await
                .map(|Json(params)| params)
                .map_err(|e| error_response(StatusCode::BAD_REQUEST, e.to_string()))?
        } else {
            Form::<ChatParams>::from_request(req, state)
                .await
                .map(|Form(params)| params)
                .map_err(|e| error_response(StatusCode::BAD_REQUEST, e.to_string()))?
        };

        Ok(ChatQuery(params.query))
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub result: String,
    pub status: String,
    pub query: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatErrorBody {
    pub error: String,
    pub status: String,
}

fn error_response(code: StatusCode, error: String) -> Response {
    (
        code,
        Json(ChatErrorBody {
            error,
            status: "error".to_string(),
        }),
    )
        .into_response()
}

/// =============================
/// API State
/// =============================

#[derive(Clone)]
pub struct ApiState {
    pub registry: Arc<HandlerRegistry>,
}

/// =============================
/// Endpoints
/// =============================

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": SERVICE_NAME,
    }))
}

async fn chat(State(state): State<ApiState>, ChatQuery(query): ChatQuery) -> Response {
    if query.trim().is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            crate::error::AgentError::EmptyQuery.to_string(),
        );
    }

    let request_id = Uuid::new_v4();
    info!(%request_id, query = %query, "Chat request received");

    match state.registry.dispatch(&query).await {
        Ok(result) => {
            let result = if result.is_empty() {
                "No response".to_string()
            } else {
                result
            };

            (
                StatusCode::OK,
                Json(ChatResponse {
                    result,
                    status: "success".to_string(),
                    query,
                }),
            )
                .into_response()
        }
        Err(e) => error_response(StatusCode::BAD_REQUEST, e.to_string()),
    }
}

/// =============================
/// Router
/// =============================

pub fn create_router(registry: Arc<HandlerRegistry>) -> Router {
    let state = ApiState { registry };

    Router::new()
        .route("/health", get(health))
        .route("/chat", post(chat))
        .fallback_service(ServeDir::new("dashboard"))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// =============================
/// Server Startup
/// =============================

pub async fn start_server(registry: Arc<HandlerRegistry>, port: u16) -> Result<()> {
    let router = create_router(registry);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!("Orchestrator listening on http://0.0.0.0:{}", port);
    info!("Chat endpoint: POST http://127.0.0.1:{}/chat", port);
    info!("Health check: GET http://127.0.0.1:{}/health", port);

    axum::serve(listener, router).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::{HelpHandler, InvestmentHandler, RemoteAgentHandler};
    use crate::router::Route;
    use axum::body::Body;
    use tower::ServiceExt;

    fn test_router() -> Router {
        let mut registry = HandlerRegistry::new();
        registry.register(Route::Investment, Arc::new(InvestmentHandler));
        registry.register(Route::Help, Arc::new(HelpHandler));
        registry.register(
            Route::Spending,
            Arc::new(RemoteAgentHandler::new(
                "spending_agent",
                "spending",
                crate::a2a::A2aClient::new("http://127.0.0.1:9").unwrap(),
            )),
        );
        create_router(Arc::new(registry))
    }

    fn form_chat_request(body: &str) -> axum::http::Request<Body> {
        axum::http::Request::builder()
            .method("POST")
            .uri("/chat")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    #[tokio::test]
    async fn test_health_shape() {
        let response = test_router()
            .oneshot(
                axum::http::Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let value: serde_json::Value =
            serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"status": "ok", "service": "BankingOrchestrator"})
        );
    }

    #[tokio::test]
    async fn test_empty_query_is_rejected() {
        for body in ["query=", "query=%20%20"] {
            let response = test_router().oneshot(form_chat_request(body)).await.unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let error: ChatErrorBody =
                serde_json::from_slice(&body_bytes(response).await).unwrap();
            assert_eq!(error.status, "error");
            assert_eq!(error.error, "Query cannot be empty");
        }
    }

    #[tokio::test]
    async fn test_missing_query_field_is_rejected() {
        let response = test_router()
            .oneshot(form_chat_request("message=hello"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ChatErrorBody = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(error.status, "error");
    }

    #[tokio::test]
    async fn test_investment_chat_via_json_body() {
        let request = axum::http::Request::builder()
            .method("POST")
            .uri("/chat")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"query": "Invest 100000 medium risk"}"#))
            .unwrap();

        let response = test_router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let chat: ChatResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(chat.status, "success");
        assert_eq!(chat.query, "Invest 100000 medium risk");

        let advice: serde_json::Value = serde_json::from_str(&chat.result).unwrap();
        assert_eq!(advice["advice"], "50% MF, 30% bonds, 20% stocks");
        assert_eq!(
            advice["allocation"],
            serde_json::json!({"MF": 0.5, "bonds": 0.3, "stocks": 0.2})
        );
        assert_eq!(advice["amount"], 100_000);
        assert_eq!(advice["risk"], "medium");
    }

    #[tokio::test]
    async fn test_help_chat_via_form_body() {
        let response = test_router()
            .oneshot(form_chat_request("query=hello"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let chat: ChatResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(chat.status, "success");
        assert!(chat.result.contains("Banking Orchestrator ready!"));
    }

    #[tokio::test]
    async fn test_downstream_failure_stays_a_success_response() {
        let response = test_router()
            .oneshot(form_chat_request("query=show+my+spending"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let chat: ChatResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(chat.status, "success");
        assert!(chat.result.starts_with("Error calling spending agent:"));
    }

    #[tokio::test]
    async fn test_identical_requests_are_byte_identical() {
        let first = body_bytes(
            test_router()
                .oneshot(form_chat_request("query=Invest+50000+low+risk"))
                .await
                .unwrap(),
        )
        .await;
        let second = body_bytes(
            test_router()
                .oneshot(form_chat_request("query=Invest+50000+low+risk"))
                .await
                .unwrap(),
        )
        .await;

        assert_eq!(first, second);
    }
}
