//! WEATHER PENALTY MODEL
//!
//! Deterministic cost penalty for growing conditions that deviate from the
//! crop optimum. The penalty is a pure function of the plantation condition
//! and knows nothing about conversion pathways: both calculators charge the
//! same penalty for the same condition, which keeps the sugar/ethanol
//! comparison symmetric.

use crate::condition::PlantationCondition;
use serde::{Deserialize, Serialize};

/// Reference optimum and scaling for the weather penalty.
///
/// penalty = cost_scale * ((dt / temp_scale)^2 + (dr / rainfall_scale)^2)
///
/// where dt and dr are the deviations from the optimal temperature and
/// rainfall. Zero at the optimum, non-negative everywhere, and strictly
/// monotone in the magnitude of either deviation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherModel {
    /// Optimal average temperature for cane growth, deg C
    pub optimal_temp_c: f64,
    /// Optimal seasonal rainfall, mm
    pub optimal_rainfall_mm: f64,
    /// Temperature deviation that counts as one normalized unit, deg C
    pub temp_scale_c: f64,
    /// Rainfall deviation that counts as one normalized unit, mm
    pub rainfall_scale_mm: f64,
    /// Cost of one squared normalized unit of deviation, $/hectare
    pub cost_scale: f64,
}

impl Default for WeatherModel {
    fn default() -> Self {
        Self {
            optimal_temp_c: 26.0,
            optimal_rainfall_mm: 1200.0,
            temp_scale_c: 6.0,
            rainfall_scale_mm: 800.0,
            cost_scale: 150.0,
        }
    }
}

impl WeatherModel {
    /// Penalty cost in $/hectare for the given condition.
    ///
    /// Called with the identical condition instance by both pathway
    /// calculators within a scenario.
    pub fn penalty(&self, condition: &PlantationCondition) -> f64 {
        let temp_dev = (condition.avg_temp_c - self.optimal_temp_c) / self.temp_scale_c;
        let rain_dev = (condition.rainfall_mm - self.optimal_rainfall_mm) / self.rainfall_scale_mm;
        self.cost_scale * (temp_dev * temp_dev + rain_dev * rain_dev)
    }
}
