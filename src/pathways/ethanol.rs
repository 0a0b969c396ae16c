//! ETHANOL PATHWAY: fuel ethanol production
//!
//! Ferments the harvest's sugar content into ethanol; bagasse is the only
//! byproduct on this path (the fermentable fraction that would become
//! molasses goes into the wash):
//!
//!   ethanol liters = yield x (brix / 100) x fermentation_efficiency
//!                    x liters_per_ton_sugar
//!   bagasse tons   = yield x bagasse_fraction
//!   revenue        = ethanol x ethanol_price + bagasse x bagasse_price
//!   cost           = yield x processing_cost + plantation_cost
//!                    + weather penalty
//!
//! The reference crude-oil price rides along for dataset realism only; it
//! never enters the profit formula.

use crate::condition::PlantationCondition;
use crate::error::ValidationError;
use crate::pathways::{
    ensure_fraction, ensure_non_negative, validate_condition, Byproduct, ByproductKind, Pathway,
    ProcessParams, ProductionResult,
};
use crate::weather::WeatherModel;
use serde::{Deserialize, Serialize};
use smallvec::smallvec;

/// Market parameters for the ethanol pathway
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EthanolMarket {
    /// Fuel ethanol price, $/liter
    pub ethanol_price_per_liter: f64,
    /// Fermentation and distillation cost, $/ton of cane
    pub processing_cost_per_ton: f64,
    /// Bagasse price, $/ton
    pub bagasse_price_per_ton: f64,
    /// Fraction of available sugar converted to ethanol (0-1)
    pub fermentation_efficiency: f64,
    /// Fixed growing cost, $/hectare
    pub plantation_cost_per_hectare: f64,
    /// Reference crude-oil price, $/barrel. Dataset realism only; not used
    /// in the profit formula.
    pub crude_oil_price: f64,
}

impl Default for EthanolMarket {
    fn default() -> Self {
        Self {
            ethanol_price_per_liter: 0.60,
            processing_cost_per_ton: 65.0,
            bagasse_price_per_ton: 25.0,
            fermentation_efficiency: 0.90,
            plantation_cost_per_hectare: 2000.0,
            crude_oil_price: 80.0,
        }
    }
}

impl EthanolMarket {
    pub fn validate(&self) -> Result<(), ValidationError> {
        ensure_non_negative("ethanol_price_per_liter", self.ethanol_price_per_liter)?;
        ensure_non_negative("ethanol_processing_cost_per_ton", self.processing_cost_per_ton)?;
        ensure_non_negative("bagasse_price_per_ton", self.bagasse_price_per_ton)?;
        ensure_fraction("fermentation_efficiency", self.fermentation_efficiency)?;
        ensure_non_negative("plantation_cost_per_hectare", self.plantation_cost_per_hectare)?;
        ensure_non_negative("crude_oil_price", self.crude_oil_price)?;
        Ok(())
    }
}

/// Compute the ethanol pathway result for one scenario.
///
/// `condition` must be the identical instance handed to the sugar
/// calculator within the same scenario.
pub fn calculate_ethanol(
    condition: &PlantationCondition,
    market: &EthanolMarket,
    process: &ProcessParams,
    weather: &WeatherModel,
) -> Result<ProductionResult, ValidationError> {
    validate_condition(condition)?;
    market.validate()?;

    let yield_t = condition.cane_yield_t_ha;

    // Primary product
    let ethanol_liters = yield_t
        * (condition.sugar_content_brix / 100.0)
        * market.fermentation_efficiency
        * process.liters_per_ton_sugar;

    // Bagasse is the only byproduct on this path
    let bagasse_tons = yield_t * process.bagasse_fraction;
    let bagasse = Byproduct {
        kind: ByproductKind::Bagasse,
        tons: bagasse_tons,
        revenue: bagasse_tons * market.bagasse_price_per_ton,
    };

    let revenue = ethanol_liters * market.ethanol_price_per_liter + bagasse.revenue;
    let cost = yield_t * market.processing_cost_per_ton
        + market.plantation_cost_per_hectare
        + weather.penalty(condition);

    Ok(ProductionResult {
        pathway: Pathway::Ethanol,
        primary_quantity: ethanol_liters,
        byproducts: smallvec![bagasse],
        revenue,
        cost,
        profit_per_hectare: revenue - cost,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn reference_condition() -> PlantationCondition {
        PlantationCondition::new(80.0, 14.0, 11.5, 26.0, 1200.0, 7).unwrap()
    }

    #[test]
    fn test_reference_quantities() {
        let result = calculate_ethanol(
            &reference_condition(),
            &EthanolMarket::default(),
            &ProcessParams::default(),
            &WeatherModel::default(),
        )
        .unwrap();

        // 80 x 0.14 x 0.90 x 650 = 6552 liters
        assert_relative_eq!(result.primary_quantity, 6552.0, epsilon = 1e-9);
        assert_relative_eq!(result.byproduct_tons(ByproductKind::Bagasse), 22.4, epsilon = 1e-9);
        // No molasses on the ethanol path
        assert_relative_eq!(result.byproduct_tons(ByproductKind::Molasses), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_reference_profit() {
        let result = calculate_ethanol(
            &reference_condition(),
            &EthanolMarket::default(),
            &ProcessParams::default(),
            &WeatherModel::default(),
        )
        .unwrap();

        // revenue = 6552 x 0.60 + 22.4 x 25 = 4491.20
        // cost    = 80 x 65 + 2000 + 0 = 7200
        assert_relative_eq!(result.revenue, 4491.2, epsilon = 1e-9);
        assert_relative_eq!(result.cost, 7200.0, epsilon = 1e-9);
        assert_relative_eq!(result.profit_per_hectare, -2708.8, epsilon = 1e-9);
    }

    #[test]
    fn test_crude_oil_price_never_enters_profit() {
        let condition = reference_condition();
        let process = ProcessParams::default();
        let weather = WeatherModel::default();

        let low = calculate_ethanol(
            &condition,
            &EthanolMarket { crude_oil_price: 40.0, ..EthanolMarket::default() },
            &process,
            &weather,
        )
        .unwrap();
        let high = calculate_ethanol(
            &condition,
            &EthanolMarket { crude_oil_price: 160.0, ..EthanolMarket::default() },
            &process,
            &weather,
        )
        .unwrap();

        assert_eq!(low.revenue, high.revenue);
        assert_eq!(low.cost, high.cost);
        assert_eq!(low.profit_per_hectare, high.profit_per_hectare);
    }

    #[test]
    fn test_negative_cost_rejected() {
        let market = EthanolMarket {
            processing_cost_per_ton: -5.0,
            ..EthanolMarket::default()
        };
        let err = calculate_ethanol(
            &reference_condition(),
            &market,
            &ProcessParams::default(),
            &WeatherModel::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ValidationError::NegativeValue {
                field: "ethanol_processing_cost_per_ton",
                value: -5.0,
            }
        );
    }
}
