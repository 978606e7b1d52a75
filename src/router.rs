//! Query router
//!
//! Classifies user queries with an ordered table of keyword rules,
//! first match wins. The table makes routing priority testable in
//! isolation from the handlers.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    Spending,
    Trip,
    Investment,
    Help,
}

struct RouteRule {
    route: Route,
    keywords: &'static [&'static str],
}

/// Ordered, case-insensitive substring rules. Spending outranks trip,
/// trip outranks investment; anything unmatched falls through to help.
const ROUTE_TABLE: &[RouteRule] = &[
    RouteRule {
        route: Route::Spending,
        keywords: &["spending", "expenses", "transactions", "money spent", "analysis"],
    },
    RouteRule {
        route: Route::Trip,
        keywords: &["travel", "trip", "vacation", "hotel", "plan", "journey"],
    },
    RouteRule {
        route: Route::Investment,
        keywords: &["invest", "investment", "portfolio", "risk", "money allocation"],
    },
];

/// Query router
pub struct QueryRouter;

impl QueryRouter {
    /// Pick the route for a query
    pub fn classify(query: &str) -> Route {
        let query = query.to_lowercase();

        ROUTE_TABLE
            .iter()
            .find(|rule| rule.keywords.iter().any(|kw| query.contains(kw)))
            .map(|rule| rule.route)
            .unwrap_or(Route::Help)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spending_routes() {
        let cases = vec![
            "Show my spending for user_123",
            "what are my EXPENSES?",
            "list transactions",
            "how much money spent this month",
            "run an analysis",
        ];

        for c in cases {
            assert_eq!(QueryRouter::classify(c), Route::Spending, "query: {c}");
        }
    }

    #[test]
    fn test_trip_routes() {
        let cases = vec![
            "Plan 3-day trip to Goa",
            "book a vacation",
            "find me a hotel",
            "a long journey south",
        ];

        for c in cases {
            assert_eq!(QueryRouter::classify(c), Route::Trip, "query: {c}");
        }
    }

    #[test]
    fn test_investment_routes() {
        let cases = vec![
            "Invest 100000 medium risk",
            "rebalance my portfolio",
            "money allocation for retirement",
        ];

        for c in cases {
            assert_eq!(QueryRouter::classify(c), Route::Investment, "query: {c}");
        }
    }

    #[test]
    fn test_priority_order() {
        // Spending keywords win over lower-priority matches.
        assert_eq!(
            QueryRouter::classify("spending analysis for my trip to Goa"),
            Route::Spending
        );
        assert_eq!(
            QueryRouter::classify("SPENDING on my investment portfolio"),
            Route::Spending
        );
        // Trip wins over investment.
        assert_eq!(
            QueryRouter::classify("plan an investment trip"),
            Route::Trip
        );
    }

    #[test]
    fn test_default_is_help() {
        assert_eq!(QueryRouter::classify("hello there"), Route::Help);
        assert_eq!(QueryRouter::classify("what can you do?"), Route::Help);
    }
}
