//! Decision Engine - Main coordinator for the sugar-vs-ethanol comparison
//!
//! Holds the shared weather model, conversion constants and decision tuning,
//! and fans one plantation condition out to both pathway calculators before
//! handing the results to the recommendation engine. This single `evaluate`
//! call is the entire contract the interactive dashboard needs.

use crate::condition::PlantationCondition;
use crate::error::EngineError;
use crate::pathways::{
    calculate_ethanol, calculate_sugar, EthanolMarket, ProcessParams, ProductionResult,
    SugarMarket,
};
use crate::recommend::{recommend, DecisionParams, Recommendation};
use crate::weather::WeatherModel;
use serde::{Deserialize, Serialize};

/// Full outcome of one scenario evaluation
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    /// The shared condition both pathways consumed
    pub condition: PlantationCondition,
    pub sugar: ProductionResult,
    pub ethanol: ProductionResult,
    pub recommendation: Recommendation,
}

/// Unified production decision engine.
///
/// The weather model and conversion constants live here so that both
/// pathway computations within a scenario are guaranteed to use the same
/// penalty function and the same physical constants.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DecisionEngine {
    pub weather: WeatherModel,
    pub process: ProcessParams,
    pub params: DecisionParams,
}

impl DecisionEngine {
    pub fn new(weather: WeatherModel, process: ProcessParams, params: DecisionParams) -> Self {
        Self {
            weather,
            process,
            params,
        }
    }

    /// Evaluate one scenario: both pathways against the identical condition,
    /// then the recommendation.
    ///
    /// A malformed market fails its own pathway's computation and the whole
    /// evaluation; it can never silently contaminate the other pathway.
    pub fn evaluate(
        &self,
        condition: PlantationCondition,
        sugar_market: &SugarMarket,
        ethanol_market: &EthanolMarket,
    ) -> Result<Decision, EngineError> {
        let sugar = calculate_sugar(&condition, sugar_market, &self.process, &self.weather)?;
        let ethanol = calculate_ethanol(&condition, ethanol_market, &self.process, &self.weather)?;
        let recommendation = recommend(&sugar, &ethanol, &self.params);

        Ok(Decision {
            condition,
            sugar,
            ethanol,
            recommendation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommend::Strategy;
    use approx::assert_relative_eq;

    #[test]
    fn test_reference_scenario_recommends_sugar() {
        let engine = DecisionEngine::default();
        let condition = PlantationCondition::new(80.0, 14.0, 11.5, 26.0, 1200.0, 7).unwrap();

        let decision = engine
            .evaluate(condition, &SugarMarket::default(), &EthanolMarket::default())
            .unwrap();

        assert_relative_eq!(decision.sugar.profit_per_hectare, 992.0, epsilon = 1e-9);
        assert_relative_eq!(decision.ethanol.profit_per_hectare, -2708.8, epsilon = 1e-9);
        assert_relative_eq!(
            decision.recommendation.profit_difference,
            3700.8,
            epsilon = 1e-9
        );
        assert_eq!(decision.recommendation.strategy, Strategy::Sugar);
        assert_eq!(decision.recommendation.confidence, 1.0);
    }

    #[test]
    fn test_both_pathways_charged_identical_penalty() {
        let engine = DecisionEngine::default();
        // Off-optimum weather so the penalty is non-zero; zero out the
        // pathway-specific cost terms so each cost is exactly the penalty
        let condition = PlantationCondition::new(80.0, 14.0, 11.5, 30.0, 900.0, 5).unwrap();
        let sugar_market = SugarMarket {
            processing_cost_per_ton: 0.0,
            plantation_cost_per_hectare: 0.0,
            ..SugarMarket::default()
        };
        let ethanol_market = EthanolMarket {
            processing_cost_per_ton: 0.0,
            plantation_cost_per_hectare: 0.0,
            ..EthanolMarket::default()
        };

        let decision = engine
            .evaluate(condition, &sugar_market, &ethanol_market)
            .unwrap();

        let penalty = engine.weather.penalty(&condition);
        assert!(penalty > 0.0);
        assert_eq!(decision.sugar.cost.to_bits(), decision.ethanol.cost.to_bits());
        assert_eq!(decision.sugar.cost.to_bits(), penalty.to_bits());
    }

    #[test]
    fn test_bad_market_fails_whole_evaluation() {
        let engine = DecisionEngine::default();
        let condition = PlantationCondition::new(80.0, 14.0, 11.5, 26.0, 1200.0, 7).unwrap();
        let bad_ethanol = EthanolMarket {
            ethanol_price_per_liter: -0.1,
            ..EthanolMarket::default()
        };

        assert!(engine
            .evaluate(condition, &SugarMarket::default(), &bad_ethanol)
            .is_err());
    }
}
