//! SUGAR PATHWAY: crystal sugar production
//!
//! Converts the harvest into crystal sugar plus bagasse and molasses
//! byproducts:
//!
//!   sugar tons   = yield x (brix / 100) x extraction_efficiency
//!   bagasse tons = yield x bagasse_fraction
//!   molasses tons= yield x molasses_fraction
//!   revenue      = sugar x sugar_price + bagasse x bagasse_price
//!                  + molasses x molasses_price
//!   cost         = yield x processing_cost + plantation_cost
//!                  + weather penalty
//!
//! All inputs are validated before any revenue/cost arithmetic; a malformed
//! input fails this computation only and never contaminates the ethanol
//! pathway's result.

use crate::condition::PlantationCondition;
use crate::error::ValidationError;
use crate::pathways::{
    ensure_fraction, ensure_non_negative, validate_condition, Byproduct, ByproductKind, Pathway,
    ProcessParams, ProductionResult,
};
use crate::weather::WeatherModel;
use serde::{Deserialize, Serialize};
use smallvec::smallvec;

/// Market parameters for the sugar pathway
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SugarMarket {
    /// Crystal sugar price, $/ton
    pub sugar_price_per_ton: f64,
    /// Milling and crystallization cost, $/ton of cane
    pub processing_cost_per_ton: f64,
    /// Bagasse price, $/ton
    pub bagasse_price_per_ton: f64,
    /// Molasses price, $/ton
    pub molasses_price_per_ton: f64,
    /// Fraction of available sugar recovered as crystal sugar (0-1)
    pub extraction_efficiency: f64,
    /// Fixed growing cost, $/hectare
    pub plantation_cost_per_hectare: f64,
}

impl Default for SugarMarket {
    fn default() -> Self {
        Self {
            sugar_price_per_ton: 600.0,
            processing_cost_per_ton: 45.0,
            bagasse_price_per_ton: 25.0,
            molasses_price_per_ton: 100.0,
            extraction_efficiency: 0.85,
            plantation_cost_per_hectare: 2000.0,
        }
    }
}

impl SugarMarket {
    pub fn validate(&self) -> Result<(), ValidationError> {
        ensure_non_negative("sugar_price_per_ton", self.sugar_price_per_ton)?;
        ensure_non_negative("sugar_processing_cost_per_ton", self.processing_cost_per_ton)?;
        ensure_non_negative("bagasse_price_per_ton", self.bagasse_price_per_ton)?;
        ensure_non_negative("molasses_price_per_ton", self.molasses_price_per_ton)?;
        ensure_fraction("extraction_efficiency", self.extraction_efficiency)?;
        ensure_non_negative("plantation_cost_per_hectare", self.plantation_cost_per_hectare)?;
        Ok(())
    }
}

/// Compute the sugar pathway result for one scenario.
///
/// `condition` must be the identical instance handed to the ethanol
/// calculator within the same scenario.
pub fn calculate_sugar(
    condition: &PlantationCondition,
    market: &SugarMarket,
    process: &ProcessParams,
    weather: &WeatherModel,
) -> Result<ProductionResult, ValidationError> {
    validate_condition(condition)?;
    market.validate()?;

    let yield_t = condition.cane_yield_t_ha;

    // Primary product
    let sugar_tons = yield_t * (condition.sugar_content_brix / 100.0) * market.extraction_efficiency;

    // Byproducts
    let bagasse_tons = yield_t * process.bagasse_fraction;
    let molasses_tons = yield_t * process.molasses_fraction;
    let bagasse = Byproduct {
        kind: ByproductKind::Bagasse,
        tons: bagasse_tons,
        revenue: bagasse_tons * market.bagasse_price_per_ton,
    };
    let molasses = Byproduct {
        kind: ByproductKind::Molasses,
        tons: molasses_tons,
        revenue: molasses_tons * market.molasses_price_per_ton,
    };

    let revenue = sugar_tons * market.sugar_price_per_ton + bagasse.revenue + molasses.revenue;
    let cost = yield_t * market.processing_cost_per_ton
        + market.plantation_cost_per_hectare
        + weather.penalty(condition);

    Ok(ProductionResult {
        pathway: Pathway::Sugar,
        primary_quantity: sugar_tons,
        byproducts: smallvec![bagasse, molasses],
        revenue,
        cost,
        profit_per_hectare: revenue - cost,
    })
}
