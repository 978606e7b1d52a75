//! Trip planning agent
//!
//! Leaf service: answers A2A messages with a templated trip plan. All
//! computation is parameter extraction plus string formatting.

use crate::a2a::{A2aReply, A2aRequest, MESSAGES_PATH};
use crate::models::{TravelStyle, TripPlan};
use crate::Result;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use lazy_static::lazy_static;
use regex::Regex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub const SERVICE_NAME: &str = "TripPlannerAgent";

pub const DEFAULT_TRIP_DAYS: u32 = 3;

lazy_static! {
    // Destination and origin are taken as the first capitalized word after
    // the preposition, so "to plan a trip" does not read "plan" as a place.
    static ref DESTINATION_RE: Regex =
        Regex::new(r"\b(?:[Tt]o|[Ii]n)\s+([A-Z][A-Za-z]+)").expect("valid destination pattern");
    static ref ORIGIN_RE: Regex =
        Regex::new(r"\b[Ff]rom\s+([A-Z][A-Za-z]+)").expect("valid origin pattern");
    static ref DAYS_RE: Regex =
        Regex::new(r"(?i)\b(\d+)\s*-?\s*day").expect("valid day count pattern");
}

pub fn extract_destination(text: &str) -> Option<String> {
    DESTINATION_RE
        .captures(text)
        .map(|caps| caps[1].to_string())
}

pub fn extract_origin(text: &str) -> Option<String> {
    ORIGIN_RE.captures(text).map(|caps| caps[1].to_string())
}

pub fn extract_days(text: &str) -> Option<u32> {
    DAYS_RE
        .captures(text)
        .and_then(|caps| caps[1].parse::<u32>().ok())
}

pub fn extract_style(text: &str) -> TravelStyle {
    let text = text.to_lowercase();

    if text.contains("cheap") || text.contains("budget") {
        TravelStyle::Cheap
    } else if text.contains("premium") || text.contains("luxury") {
        TravelStyle::Premium
    } else {
        TravelStyle::Balanced
    }
}

fn hotel_for(style: TravelStyle) -> &'static str {
    match style {
        TravelStyle::Cheap => "Budget hotel / hostel near city center (₹500-800/night)",
        TravelStyle::Balanced => "3-star hotel with breakfast included (₹1500-2500/night)",
        TravelStyle::Premium => "5-star resort with ocean/city view (₹5000+/night)",
    }
}

/// Deterministic templated plan.
pub fn plan_trip(
    origin: Option<&str>,
    destination: &str,
    days: u32,
    style: TravelStyle,
) -> TripPlan {
    TripPlan {
        trip: format!("{} → {}", origin.unwrap_or("your city"), destination),
        days,
        hotel: hotel_for(style).to_string(),
        suggestion: format!("Plan a {}-day trip to {}!", days, destination),
    }
}

/// Render the reply text for one incoming message.
pub fn render_reply(content: &str) -> Result<String> {
    match extract_destination(content) {
        Some(destination) => {
            let plan = plan_trip(
                extract_origin(content).as_deref(),
                &destination,
                extract_days(content).unwrap_or(DEFAULT_TRIP_DAYS),
                extract_style(content),
            );
            Ok(serde_json::to_string_pretty(&plan)?)
        }
        None => Ok(
            "Please tell me where you want to go (e.g., \"Plan 3-day trip to Goa\").".to_string(),
        ),
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

async fn a2a_messages(Json(request): Json<A2aRequest>) -> Response {
    let Some(message) = request.last_user_message() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "No user message found"})),
        )
            .into_response();
    };

    match render_reply(&message.content) {
        Ok(text) => Json(A2aReply::text(text)).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({"error": e.to_string()})),
        )
            .into_response(),
    }
}

pub fn create_router() -> Router {
    Router::new()
        .route("/health", get(health))
        .route(MESSAGES_PATH, post(a2a_messages))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

pub async fn start_server(port: u16) -> Result<()> {
    let router = create_router();

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!("Trip planner agent listening on http://0.0.0.0:{}", port);

    axum::serve(listener, router).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::a2a::A2aMessage;
    use axum::body::Body;
    use axum::http::header;
    use tower::ServiceExt;

    #[test]
    fn test_parameter_extraction() {
        let query = "Plan a 5-day trip from Mumbai to Goa on a budget";

        assert_eq!(extract_destination(query), Some("Goa".to_string()));
        assert_eq!(extract_origin(query), Some("Mumbai".to_string()));
        assert_eq!(extract_days(query), Some(5));
        assert_eq!(extract_style(query), TravelStyle::Cheap);
    }

    #[test]
    fn test_lowercase_words_are_not_places() {
        assert_eq!(extract_destination("I want to plan a vacation"), None);
        assert_eq!(extract_destination("a trip to Paris"), Some("Paris".to_string()));
    }

    #[test]
    fn test_plan_formatting() {
        let plan = plan_trip(Some("Mumbai"), "Goa", 5, TravelStyle::Balanced);

        assert_eq!(plan.trip, "Mumbai → Goa");
        assert_eq!(plan.days, 5);
        assert_eq!(plan.suggestion, "Plan a 5-day trip to Goa!");
    }

    #[test]
    fn test_defaults_when_only_destination_given() {
        let reply = render_reply("vacation in Goa please").unwrap();
        let plan: TripPlan = serde_json::from_str(&reply).unwrap();

        assert_eq!(plan.trip, "your city → Goa");
        assert_eq!(plan.days, DEFAULT_TRIP_DAYS);
        assert!(plan.hotel.contains("3-star"));
    }

    #[test]
    fn test_missing_destination_prompts() {
        let reply = render_reply("plan me a trip").unwrap();
        assert!(reply.starts_with("Please tell me where you want to go"));
    }

    #[tokio::test]
    async fn test_a2a_messages_endpoint() {
        let request_body = serde_json::to_string(&A2aRequest {
            messages: vec![A2aMessage::user("Plan 3-day trip to Goa")],
        })
        .unwrap();

        let response = create_router()
            .oneshot(
                axum::http::Request::builder()
                    .method("POST")
                    .uri(MESSAGES_PATH)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(request_body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let reply: A2aReply = serde_json::from_slice(&bytes).unwrap();

        let plan: TripPlan = serde_json::from_str(reply.first_text().unwrap()).unwrap();
        assert_eq!(plan.days, 3);
        assert_eq!(plan.suggestion, "Plan a 3-day trip to Goa!");
    }
}
