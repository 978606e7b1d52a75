//! Investment advisor
//!
//! Maps a risk tier to a fixed asset-allocation table and extracts the
//! risk tier / amount parameters from free-text queries. Pure functions,
//! no I/O.

use crate::models::{AllocationAdvice, RiskProfile, RiskTier};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{json, Value};
use std::collections::BTreeMap;

const LOW_RISK: RiskProfile = RiskProfile {
    advice: "80% FD, 20% bonds",
    allocation: &[("FD", 0.8), ("bonds", 0.2)],
};

const MEDIUM_RISK: RiskProfile = RiskProfile {
    advice: "50% MF, 30% bonds, 20% stocks",
    allocation: &[("MF", 0.5), ("bonds", 0.3), ("stocks", 0.2)],
};

const HIGH_RISK: RiskProfile = RiskProfile {
    advice: "80% stocks, 20% crypto",
    allocation: &[("stocks", 0.8), ("crypto", 0.2)],
};

/// Fixed allocation profile for a risk tier.
pub fn profile(tier: RiskTier) -> RiskProfile {
    match tier {
        RiskTier::Low => LOW_RISK,
        RiskTier::Medium => MEDIUM_RISK,
        RiskTier::High => HIGH_RISK,
    }
}

/// Build the investment answer for a known tier.
pub fn advise(tier: RiskTier, amount: u64) -> AllocationAdvice {
    let p = profile(tier);

    AllocationAdvice {
        advice: p.advice.to_string(),
        allocation: p
            .allocation
            .iter()
            .map(|(asset, fraction)| (asset.to_string(), *fraction))
            .collect::<BTreeMap<_, _>>(),
        amount,
        risk: tier,
    }
}

/// Advice for a caller-supplied risk string. Unknown tiers produce an
/// `{error}` value rather than an error return.
pub fn advise_for(risk: &str, amount: u64) -> Value {
    match RiskTier::parse(risk) {
        Some(tier) => json!(advise(tier, amount)),
        None => json!({
            "error": "Unknown risk category. Use: low, medium, or high"
        }),
    }
}

lazy_static! {
    static ref RISK_RE: Regex =
        Regex::new(r"(?i)\b(low|medium|high)\s*risk\b").expect("valid risk pattern");
    // Accepts a rupee sign, "Rs"/"Rs." or a bare comma-grouped number. The
    // original's pattern only matched a mis-encoded currency symbol and
    // silently failed on plain input.
    static ref AMOUNT_RE: Regex =
        Regex::new(r"(?i)(?:₹|rs\.?\s*)?(\d+(?:,\d+)*)").expect("valid amount pattern");
}

/// Extract a risk tier via the `(low|medium|high) risk` pattern.
pub fn extract_risk(query: &str) -> Option<RiskTier> {
    RISK_RE
        .captures(query)
        .and_then(|caps| RiskTier::parse(&caps[1]))
}

/// Extract the first currency-like number, tolerating comma grouping.
pub fn extract_amount(query: &str) -> Option<u64> {
    AMOUNT_RE
        .captures(query)
        .and_then(|caps| caps[1].replace(',', "").parse::<u64>().ok())
}
