//! Core data models for the banking assistant

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

//
// ================= Enums =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    /// Case-insensitive parse; `None` for anything outside low/medium/high.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(RiskTier::Low),
            "medium" => Some(RiskTier::Medium),
            "high" => Some(RiskTier::High),
            _ => None,
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskTier::Low => "low",
            RiskTier::Medium => "medium",
            RiskTier::High => "high",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TravelStyle {
    Cheap,
    Balanced,
    Premium,
}

//
// ================= Investment =================
//

/// Fixed advice + allocation table entry for a risk tier.
/// Fractions per profile sum to 1.0.
#[derive(Debug, Clone, Copy)]
pub struct RiskProfile {
    pub advice: &'static str,
    pub allocation: &'static [(&'static str, f64)],
}

/// Investment answer: a risk profile merged with the requested amount.
///
/// Allocation is a `BTreeMap` so serialization order is deterministic and
/// repeated requests produce byte-identical output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationAdvice {
    pub advice: String,
    pub allocation: BTreeMap<String, f64>,
    pub amount: u64,
    pub risk: RiskTier,
}

//
// ================= Spending =================
//

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transaction {
    pub category: String,
    pub amount: i64,
}

impl Transaction {
    pub fn new(category: &str, amount: i64) -> Self {
        Self {
            category: category.to_string(),
            amount,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpendingSummary {
    pub user_id: String,
    pub total: i64,
    pub by_category: BTreeMap<String, i64>,
    pub transactions: Vec<Transaction>,
}

//
// ================= Trip =================
//

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripPlan {
    pub trip: String,
    pub days: u32,
    pub hotel: String,
    pub suggestion: String,
}
