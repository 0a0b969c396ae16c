//! RECOMMENDATION ENGINE
//!
//! Compares the two pathway results and emits a three-way verdict. Pure,
//! deterministic and idempotent: identical inputs always produce the
//! identical recommendation. No internal state, no I/O, no validation (it
//! trusts well-formed results from the calculators).

use crate::pathways::ProductionResult;
use serde::{Deserialize, Serialize};

/// Recommended production strategy.
///
/// Closed enum so downstream matches are exhaustiveness-checked; the
/// dataset label column uses [`Strategy::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Sugar,
    Ethanol,
    Mixed,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Sugar => "sugar",
            Strategy::Ethanol => "ethanol",
            Strategy::Mixed => "mixed",
        }
    }
}

/// Tuning constants for the verdict
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecisionParams {
    /// Profit gap ($/hectare) a pathway must exceed to win outright.
    /// Comparison is strict: a gap exactly equal to the threshold stays
    /// Mixed.
    pub decision_threshold: f64,
    /// Profit gap ($/hectare) at which confidence saturates to 1.0.
    /// Must be positive.
    pub confidence_scale: f64,
}

impl Default for DecisionParams {
    fn default() -> Self {
        Self {
            decision_threshold: 500.0,
            confidence_scale: 2000.0,
        }
    }
}

/// Verdict of the sugar-vs-ethanol comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub strategy: Strategy,
    /// Sugar pathway profit, $/hectare
    pub sugar_profit: f64,
    /// Ethanol pathway profit, $/hectare
    pub ethanol_profit: f64,
    /// Signed gap: sugar profit - ethanol profit
    pub profit_difference: f64,
    /// min(|gap| / confidence_scale, 1.0)
    pub confidence: f64,
    /// Human-readable explanation of the verdict
    pub reasoning: String,
}

/// Compare the two pathway results and recommend a strategy.
///
/// diff = sugar profit - ethanol profit. diff > threshold recommends sugar,
/// -diff > threshold recommends ethanol, anything else (including exact
/// equality with the threshold) stays mixed. Confidence grows linearly with
/// |diff| and clamps at exactly 1.0 once |diff| >= confidence_scale.
pub fn recommend(
    sugar: &ProductionResult,
    ethanol: &ProductionResult,
    params: &DecisionParams,
) -> Recommendation {
    let sugar_profit = sugar.profit_per_hectare;
    let ethanol_profit = ethanol.profit_per_hectare;
    let diff = sugar_profit - ethanol_profit;

    let strategy = if diff > params.decision_threshold {
        Strategy::Sugar
    } else if -diff > params.decision_threshold {
        Strategy::Ethanol
    } else {
        Strategy::Mixed
    };

    let confidence = (diff.abs() / params.confidence_scale).min(1.0);

    let mut reasoning = match strategy {
        Strategy::Sugar => format!(
            "Sugar production is favored by ${:.2}/hectare (sugar ${:.2} vs ethanol ${:.2})",
            diff, sugar_profit, ethanol_profit
        ),
        Strategy::Ethanol => format!(
            "Ethanol production is favored by ${:.2}/hectare (ethanol ${:.2} vs sugar ${:.2})",
            -diff, ethanol_profit, sugar_profit
        ),
        Strategy::Mixed => format!(
            "Profits are within ${:.0}/hectare of each other (sugar ${:.2} vs ethanol ${:.2}); \
             splitting production across both pathways hedges the margin",
            params.decision_threshold, sugar_profit, ethanol_profit
        ),
    };
    if sugar_profit < 0.0 && ethanol_profit < 0.0 {
        reasoning.push_str("; note: both pathways are unprofitable under these conditions");
    }

    Recommendation {
        strategy,
        sugar_profit,
        ethanol_profit,
        profit_difference: diff,
        confidence,
        reasoning,
    }
}
