//! Conversion pathway calculators
//!
//! One module per pathway, each exposing a `calculate_*` function that turns
//! a plantation condition plus market parameters into a [`ProductionResult`].
//! Both pathways consume the same physical harvest, so they share the
//! conversion constants in [`ProcessParams`] and charge the same weather
//! penalty for the same condition.

pub mod ethanol;
pub mod sugar;

// Re-export pathway functions
pub use ethanol::{calculate_ethanol, EthanolMarket};
pub use sugar::{calculate_sugar, SugarMarket};

use crate::condition::PlantationCondition;
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Conversion pathway tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pathway {
    Sugar,
    Ethanol,
}

impl Pathway {
    pub fn as_str(&self) -> &'static str {
        match self {
            Pathway::Sugar => "sugar",
            Pathway::Ethanol => "ethanol",
        }
    }
}

/// Sellable residue kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ByproductKind {
    /// Fibrous cane residue after juice extraction, sold as fuel
    Bagasse,
    /// Syrup byproduct of sugar crystallization, sold as feed
    Molasses,
}

/// One byproduct line item: quantity and the revenue it contributes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Byproduct {
    pub kind: ByproductKind,
    pub tons: f64,
    pub revenue: f64,
}

/// Result of one pathway computation.
///
/// Always recomputed from its inputs; never cached or mutated after
/// construction. Profit may be negative and is never clamped.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductionResult {
    pub pathway: Pathway,
    /// Primary product quantity: tons of crystal sugar, or liters of ethanol
    pub primary_quantity: f64,
    /// Byproduct line items (sugar: bagasse + molasses, ethanol: bagasse)
    pub byproducts: SmallVec<[Byproduct; 2]>,
    /// Total revenue, $/hectare
    pub revenue: f64,
    /// Total cost including the weather penalty, $/hectare
    pub cost: f64,
    /// revenue - cost, $/hectare
    pub profit_per_hectare: f64,
}

impl ProductionResult {
    pub fn byproduct_tons(&self, kind: ByproductKind) -> f64 {
        self.byproducts
            .iter()
            .find(|b| b.kind == kind)
            .map_or(0.0, |b| b.tons)
    }
}

/// Physical conversion constants shared by both pathways
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProcessParams {
    /// Fraction of cane mass recovered as bagasse
    pub bagasse_fraction: f64,
    /// Fraction of cane mass recovered as molasses (sugar pathway only)
    pub molasses_fraction: f64,
    /// Liters of ethanol per ton of fermentable sugar equivalent
    pub liters_per_ton_sugar: f64,
}

impl Default for ProcessParams {
    fn default() -> Self {
        Self {
            bagasse_fraction: 0.28,
            molasses_fraction: 0.04,
            liters_per_ton_sugar: 650.0,
        }
    }
}

/// Shared condition checks: both calculators reject a malformed harvest
/// before touching revenue or cost.
pub(crate) fn validate_condition(condition: &PlantationCondition) -> Result<(), ValidationError> {
    if !(condition.cane_yield_t_ha > 0.0) {
        return Err(ValidationError::NonPositiveYield(condition.cane_yield_t_ha));
    }
    if !(0.0..=100.0).contains(&condition.sugar_content_brix) {
        return Err(ValidationError::OutOfRange {
            field: "sugar_content_brix",
            value: condition.sugar_content_brix,
            min: 0.0,
            max: 100.0,
        });
    }
    Ok(())
}

pub(crate) fn ensure_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value < 0.0 || !value.is_finite() {
        return Err(ValidationError::NegativeValue { field, value });
    }
    Ok(())
}

pub(crate) fn ensure_fraction(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ValidationError::OutOfRange {
            field,
            value,
            min: 0.0,
            max: 1.0,
        });
    }
    Ok(())
}
