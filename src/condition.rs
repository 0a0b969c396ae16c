//! PLANTATION CONDITION MODEL AND SAMPLER
//!
//! The shared raw-material state for one harvest scenario. Both conversion
//! pathways are evaluated against the same `PlantationCondition` value, so
//! the sugar/ethanol comparison stays apples-to-apples.
//!
//! Sampling draws every attribute independently from an explicitly passed
//! RNG handle. There is no hidden global stream: callers that need
//! reproducibility seed their own generator, and parallel callers derive one
//! independent stream per record.

use crate::error::{ConfigError, ValidationError};
use anyhow::{Context, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Immutable raw-material state of one sugar-cane harvest scenario.
///
/// Created once per scenario (sampled or user-supplied), then shared by
/// value into both pathway calculators. Never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlantationCondition {
    /// Cane yield in tons per hectare (> 0)
    pub cane_yield_t_ha: f64,
    /// Sugar content of cane juice, Brix % (0-100)
    pub sugar_content_brix: f64,
    /// Commercial cane sugar quality index, CCS % (0-100)
    pub ccs_quality: f64,
    /// Average plantation temperature, deg C
    pub avg_temp_c: f64,
    /// Rainfall over the growing season, mm
    pub rainfall_mm: f64,
    /// Harvest month, 1-12 (categorical)
    pub harvest_month: u8,
}

impl PlantationCondition {
    /// Construct a validated condition (the user-supplied dashboard path).
    ///
    /// Every documented field constraint is checked exactly once here, so
    /// downstream calculators can trust a constructed value.
    pub fn new(
        cane_yield_t_ha: f64,
        sugar_content_brix: f64,
        ccs_quality: f64,
        avg_temp_c: f64,
        rainfall_mm: f64,
        harvest_month: u8,
    ) -> Result<Self, ValidationError> {
        if !(cane_yield_t_ha > 0.0) {
            return Err(ValidationError::NonPositiveYield(cane_yield_t_ha));
        }
        if !(0.0..=100.0).contains(&sugar_content_brix) {
            return Err(ValidationError::OutOfRange {
                field: "sugar_content_brix",
                value: sugar_content_brix,
                min: 0.0,
                max: 100.0,
            });
        }
        if !(0.0..=100.0).contains(&ccs_quality) {
            return Err(ValidationError::OutOfRange {
                field: "ccs_quality",
                value: ccs_quality,
                min: 0.0,
                max: 100.0,
            });
        }
        if rainfall_mm < 0.0 {
            return Err(ValidationError::NegativeValue {
                field: "rainfall_mm",
                value: rainfall_mm,
            });
        }
        if !(1..=12).contains(&harvest_month) {
            return Err(ValidationError::InvalidMonth(harvest_month));
        }

        Ok(Self {
            cane_yield_t_ha,
            sugar_content_brix,
            ccs_quality,
            avg_temp_c,
            rainfall_mm,
            harvest_month,
        })
    }
}

/// Distribution kind for one sampled attribute.
///
/// Closed enum: an unrecognized kind in a config file fails at
/// deserialization and is surfaced as [`ConfigError::UnknownDistribution`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Distribution {
    /// Uniform over the closed range
    #[default]
    Uniform,
    /// Normal draw clamped into the closed range
    TruncatedNormal { mean: f64, std_dev: f64 },
}

/// Closed numeric range with a sampling distribution for one attribute
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
    #[serde(default)]
    pub distribution: Distribution,
}

impl ValueRange {
    pub fn uniform(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            distribution: Distribution::Uniform,
        }
    }

    pub fn truncated_normal(min: f64, max: f64, mean: f64, std_dev: f64) -> Self {
        Self {
            min,
            max,
            distribution: Distribution::TruncatedNormal { mean, std_dev },
        }
    }

    /// Check bounds before any sampling occurs
    pub fn validate(&self, attribute: &'static str) -> Result<(), ConfigError> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(ConfigError::NonFiniteBound { attribute });
        }
        if self.min > self.max {
            return Err(ConfigError::InvalidRange {
                attribute,
                min: self.min,
                max: self.max,
            });
        }
        if let Distribution::TruncatedNormal { std_dev, .. } = self.distribution {
            if !(std_dev > 0.0) {
                return Err(ConfigError::UnknownDistribution {
                    attribute,
                    detail: format!("truncated_normal requires std_dev > 0, got {}", std_dev),
                });
            }
        }
        Ok(())
    }

    /// Draw one value from this range using the supplied RNG
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self.distribution {
            Distribution::Uniform => {
                if self.min == self.max {
                    self.min
                } else {
                    rng.gen_range(self.min..=self.max)
                }
            }
            Distribution::TruncatedNormal { mean, std_dev } => {
                // Box-Muller transform; the pack carries no distribution
                // crate, so the normal draw is derived from two uniforms.
                let u1: f64 = rng.gen_range(f64::EPSILON..1.0);
                let u2: f64 = rng.gen_range(0.0..1.0);
                let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
                (mean + std_dev * z).clamp(self.min, self.max)
            }
        }
    }
}

/// Per-attribute sampling ranges for plantation conditions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplerConfig {
    pub cane_yield_t_ha: ValueRange,
    pub sugar_content_brix: ValueRange,
    pub ccs_quality: ValueRange,
    pub avg_temp_c: ValueRange,
    pub rainfall_mm: ValueRange,
}

impl Default for SamplerConfig {
    /// Documented agronomic defaults: yield 40-120 t/ha, Brix 10-18 %,
    /// CCS 9-14 % (clipped-normal around the commercial midpoint),
    /// temperature 20-32 deg C, rainfall 600-2000 mm.
    fn default() -> Self {
        Self {
            cane_yield_t_ha: ValueRange::uniform(40.0, 120.0),
            sugar_content_brix: ValueRange::uniform(10.0, 18.0),
            ccs_quality: ValueRange::truncated_normal(9.0, 14.0, 11.5, 1.0),
            avg_temp_c: ValueRange::truncated_normal(20.0, 32.0, 26.0, 2.0),
            rainfall_mm: ValueRange::truncated_normal(600.0, 2000.0, 1200.0, 250.0),
        }
    }
}

impl SamplerConfig {
    /// Validate every range before any sampling occurs
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.cane_yield_t_ha.validate("cane_yield_t_ha")?;
        self.sugar_content_brix.validate("sugar_content_brix")?;
        self.ccs_quality.validate("ccs_quality")?;
        self.avg_temp_c.validate("avg_temp_c")?;
        self.rainfall_mm.validate("rainfall_mm")?;
        Ok(())
    }

    /// Load a sampler config from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read sampler config: {:?}", path))?;
        let config: SamplerConfig = serde_json::from_str(&contents)
            .with_context(|| "Failed to parse sampler config JSON")?;
        config.validate()?;
        Ok(config)
    }
}

/// Sample one plantation condition from the configured ranges.
///
/// Each attribute is drawn independently; harvest month is uniform over
/// 1-12. The config is validated up front so a malformed range fails before
/// the RNG is touched.
pub fn sample_condition<R: Rng + ?Sized>(
    config: &SamplerConfig,
    rng: &mut R,
) -> Result<PlantationCondition, ConfigError> {
    config.validate()?;

    Ok(PlantationCondition {
        cane_yield_t_ha: config.cane_yield_t_ha.sample(rng),
        sugar_content_brix: config.sugar_content_brix.sample(rng),
        ccs_quality: config.ccs_quality.sample(rng),
        avg_temp_c: config.avg_temp_c.sample(rng),
        rainfall_mm: config.rainfall_mm.sample(rng),
        harvest_month: rng.gen_range(1..=12u8),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_condition_validation() {
        assert!(PlantationCondition::new(80.0, 14.0, 11.5, 26.0, 1200.0, 7).is_ok());

        assert_eq!(
            PlantationCondition::new(0.0, 14.0, 11.5, 26.0, 1200.0, 7),
            Err(ValidationError::NonPositiveYield(0.0))
        );
        assert!(matches!(
            PlantationCondition::new(80.0, 101.0, 11.5, 26.0, 1200.0, 7),
            Err(ValidationError::OutOfRange { field: "sugar_content_brix", .. })
        ));
        assert_eq!(
            PlantationCondition::new(80.0, 14.0, 11.5, 26.0, 1200.0, 13),
            Err(ValidationError::InvalidMonth(13))
        );
    }

    #[test]
    fn test_inverted_range_rejected_before_sampling() {
        let mut config = SamplerConfig::default();
        config.cane_yield_t_ha = ValueRange::uniform(120.0, 40.0);

        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let err = sample_condition(&config, &mut rng).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidRange {
                attribute: "cane_yield_t_ha",
                min: 120.0,
                max: 40.0,
            }
        );
    }

    #[test]
    fn test_zero_std_dev_rejected() {
        let mut config = SamplerConfig::default();
        config.ccs_quality = ValueRange::truncated_normal(9.0, 14.0, 11.5, 0.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnknownDistribution { attribute: "ccs_quality", .. })
        ));
    }

    #[test]
    fn test_sampled_values_within_bounds() {
        let config = SamplerConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        for _ in 0..500 {
            let c = sample_condition(&config, &mut rng).unwrap();
            assert!(c.cane_yield_t_ha >= 40.0 && c.cane_yield_t_ha <= 120.0);
            assert!(c.sugar_content_brix >= 10.0 && c.sugar_content_brix <= 18.0);
            assert!(c.ccs_quality >= 9.0 && c.ccs_quality <= 14.0);
            assert!(c.avg_temp_c >= 20.0 && c.avg_temp_c <= 32.0);
            assert!(c.rainfall_mm >= 600.0 && c.rainfall_mm <= 2000.0);
            assert!((1..=12).contains(&c.harvest_month));
        }
    }

    #[test]
    fn test_same_seed_same_condition() {
        let config = SamplerConfig::default();

        let mut a = ChaCha8Rng::seed_from_u64(7);
        let mut b = ChaCha8Rng::seed_from_u64(7);
        let ca = sample_condition(&config, &mut a).unwrap();
        let cb = sample_condition(&config, &mut b).unwrap();
        assert_eq!(ca, cb);
    }

    #[test]
    fn test_distribution_config_roundtrip() {
        let json = r#"{
            "min": 9.0, "max": 14.0,
            "distribution": {"kind": "truncated_normal", "mean": 11.5, "std_dev": 1.0}
        }"#;
        let range: ValueRange = serde_json::from_str(json).unwrap();
        assert_eq!(range, ValueRange::truncated_normal(9.0, 14.0, 11.5, 1.0));

        // Unknown kinds are rejected at the serde boundary
        let bad = r#"{"min": 0.0, "max": 1.0, "distribution": {"kind": "pareto"}}"#;
        assert!(serde_json::from_str::<ValueRange>(bad).is_err());
    }
}
