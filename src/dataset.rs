//! DATASET GENERATOR
//!
//! Produces labeled training corpora for the external regression trainer.
//! Each record runs the full pipeline: sample one plantation condition,
//! sample one market-parameter pair, compute both pathway results against
//! the identical condition, and optionally attach the recommendation as the
//! label column.
//!
//! Determinism: record i is always generated from its own RNG stream
//! (`ChaCha8Rng` seeded with the batch seed, stream = i), so sequential and
//! parallel generation emit identical output for the same seed and configs,
//! and record i does not change when the batch size does.

use crate::condition::{sample_condition, PlantationCondition, SamplerConfig, ValueRange};
use crate::engine::DecisionEngine;
use crate::error::{ConfigError, EngineError};
use crate::pathways::{EthanolMarket, ProductionResult, SugarMarket};
use crate::recommend::Recommendation;
use anyhow::Context;
use polars::df;
use polars::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

/// Sampling ranges for both pathways' market parameters.
///
/// The plantation cost is drawn once per record and written into both
/// market structs, keeping generated corpora symmetric across pathways.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketRanges {
    pub sugar_price_per_ton: ValueRange,
    pub sugar_processing_cost_per_ton: ValueRange,
    pub bagasse_price_per_ton: ValueRange,
    pub molasses_price_per_ton: ValueRange,
    pub extraction_efficiency: ValueRange,
    pub ethanol_price_per_liter: ValueRange,
    pub ethanol_processing_cost_per_ton: ValueRange,
    pub fermentation_efficiency: ValueRange,
    pub crude_oil_price: ValueRange,
    pub plantation_cost_per_hectare: ValueRange,
}

impl Default for MarketRanges {
    fn default() -> Self {
        Self {
            sugar_price_per_ton: ValueRange::uniform(450.0, 750.0),
            sugar_processing_cost_per_ton: ValueRange::uniform(35.0, 55.0),
            bagasse_price_per_ton: ValueRange::uniform(15.0, 30.0),
            molasses_price_per_ton: ValueRange::uniform(80.0, 120.0),
            extraction_efficiency: ValueRange::uniform(0.80, 0.90),
            ethanol_price_per_liter: ValueRange::uniform(0.40, 0.80),
            ethanol_processing_cost_per_ton: ValueRange::uniform(55.0, 75.0),
            fermentation_efficiency: ValueRange::uniform(0.85, 0.95),
            crude_oil_price: ValueRange::uniform(60.0, 100.0),
            plantation_cost_per_hectare: ValueRange::uniform(1800.0, 2200.0),
        }
    }
}

impl MarketRanges {
    /// Check every range before any sampling occurs
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.sugar_price_per_ton.validate("sugar_price_per_ton")?;
        self.sugar_processing_cost_per_ton
            .validate("sugar_processing_cost_per_ton")?;
        self.bagasse_price_per_ton.validate("bagasse_price_per_ton")?;
        self.molasses_price_per_ton.validate("molasses_price_per_ton")?;
        self.extraction_efficiency.validate("extraction_efficiency")?;
        self.ethanol_price_per_liter.validate("ethanol_price_per_liter")?;
        self.ethanol_processing_cost_per_ton
            .validate("ethanol_processing_cost_per_ton")?;
        self.fermentation_efficiency.validate("fermentation_efficiency")?;
        self.crude_oil_price.validate("crude_oil_price")?;
        self.plantation_cost_per_hectare
            .validate("plantation_cost_per_hectare")?;
        Ok(())
    }

    /// Draw one market-parameter pair for a record
    fn sample_markets<R: Rng + ?Sized>(&self, rng: &mut R) -> (SugarMarket, EthanolMarket) {
        let bagasse_price = self.bagasse_price_per_ton.sample(rng);
        let plantation_cost = self.plantation_cost_per_hectare.sample(rng);

        let sugar = SugarMarket {
            sugar_price_per_ton: self.sugar_price_per_ton.sample(rng),
            processing_cost_per_ton: self.sugar_processing_cost_per_ton.sample(rng),
            bagasse_price_per_ton: bagasse_price,
            molasses_price_per_ton: self.molasses_price_per_ton.sample(rng),
            extraction_efficiency: self.extraction_efficiency.sample(rng),
            plantation_cost_per_hectare: plantation_cost,
        };
        let ethanol = EthanolMarket {
            ethanol_price_per_liter: self.ethanol_price_per_liter.sample(rng),
            processing_cost_per_ton: self.ethanol_processing_cost_per_ton.sample(rng),
            bagasse_price_per_ton: bagasse_price,
            fermentation_efficiency: self.fermentation_efficiency.sample(rng),
            plantation_cost_per_hectare: plantation_cost,
            crude_oil_price: self.crude_oil_price.sample(rng),
        };

        (sugar, ethanol)
    }
}

/// Full configuration for one batch generation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Batch seed; record i derives its own stream from this
    pub seed: u64,
    pub sampler: SamplerConfig,
    pub markets: MarketRanges,
    /// Attach the recommendation as a label column
    pub label: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            sampler: SamplerConfig::default(),
            markets: MarketRanges::default(),
            label: true,
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.sampler.validate()?;
        self.markets.validate()?;
        Ok(())
    }

    /// Load a generator config from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read generator config: {:?}", path))?;
        let config: GeneratorConfig = serde_json::from_str(&contents)
            .with_context(|| "Failed to parse generator config JSON")?;
        config.validate()?;
        Ok(config)
    }
}

/// One labeled training record
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetRecord {
    pub condition: PlantationCondition,
    pub sugar_market: SugarMarket,
    pub ethanol_market: EthanolMarket,
    /// Weather penalty charged to both pathways, $/hectare
    pub weather_penalty: f64,
    pub sugar: ProductionResult,
    pub ethanol: ProductionResult,
    /// Present when the batch was configured with `label: true`
    pub recommendation: Option<Recommendation>,
}

/// Independent RNG stream for record `index` within a batch
fn record_rng(seed: u64, index: u64) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(index);
    rng
}

fn generate_record(
    config: &GeneratorConfig,
    engine: &DecisionEngine,
    index: u64,
) -> Result<DatasetRecord, EngineError> {
    let mut rng = record_rng(config.seed, index);

    let condition = sample_condition(&config.sampler, &mut rng)?;
    let (sugar_market, ethanol_market) = config.markets.sample_markets(&mut rng);

    // Both calculators consume the identical condition value
    let decision = engine.evaluate(condition, &sugar_market, &ethanol_market)?;

    Ok(DatasetRecord {
        condition,
        sugar_market,
        ethanol_market,
        weather_penalty: engine.weather.penalty(&condition),
        sugar: decision.sugar,
        ethanol: decision.ethanol,
        recommendation: config.label.then_some(decision.recommendation),
    })
}

/// Generate `n` records sequentially.
///
/// Configs are validated before any sampling; a malformed range fails the
/// whole batch up front with `ConfigError`.
pub fn generate(
    n: usize,
    config: &GeneratorConfig,
    engine: &DecisionEngine,
) -> Result<Vec<DatasetRecord>, EngineError> {
    config.validate()?;

    (0..n)
        .map(|i| generate_record(config, engine, i as u64))
        .collect()
}

/// Generate `n` records across the Rayon thread pool.
///
/// Each record owns its derived RNG stream, so output is identical to the
/// sequential path for the same seed and configs, in index order.
///
/// The cancel flag is checked before each record starts. A cancelled run
/// returns the contiguous prefix of fully-completed records; a record is
/// either fully present or absent, never partial.
pub fn generate_parallel(
    n: usize,
    config: &GeneratorConfig,
    engine: &DecisionEngine,
    cancel: &AtomicBool,
) -> Result<Vec<DatasetRecord>, EngineError> {
    config.validate()?;

    let outcomes: Vec<Option<Result<DatasetRecord, EngineError>>> = (0..n)
        .into_par_iter()
        .map(|i| {
            if cancel.load(Ordering::Relaxed) {
                return None;
            }
            Some(generate_record(config, engine, i as u64))
        })
        .collect();

    let mut records = Vec::with_capacity(n);
    for outcome in outcomes {
        match outcome {
            Some(Ok(record)) => records.push(record),
            Some(Err(e)) => return Err(e),
            // First cancelled index: everything before it is complete
            None => break,
        }
    }
    Ok(records)
}

/// Class balance of the `optimal_strategy` label.
///
/// A corpus whose labels collapse onto one class is useless to the trainer,
/// so the pipeline binary prints this summary after every batch.
pub fn label_counts(records: &[DatasetRecord]) -> FxHashMap<&'static str, usize> {
    let mut counts: FxHashMap<&'static str, usize> = FxHashMap::default();
    for record in records {
        if let Some(rec) = &record.recommendation {
            *counts.entry(rec.strategy.as_str()).or_insert(0) += 1;
        }
    }
    counts
}

/// Build the trainer handoff table.
///
/// Column set and units are stable across generator versions (any change
/// requires a migration note). Condition attributes, both pathways' market
/// parameters and revenue/cost/profit, the shared weather penalty, and -
/// when the batch is labeled - `optimal_strategy` plus `confidence`.
///
/// Units: tons and liters per hectare, $ per ton / liter / hectare,
/// temperature in deg C, rainfall in mm.
pub fn records_to_dataframe(records: &[DatasetRecord]) -> PolarsResult<DataFrame> {
    let mut df = df!(
        "cane_yield_tons_per_hectare" =>
            records.iter().map(|r| r.condition.cane_yield_t_ha).collect::<Vec<_>>(),
        "sugar_content_brix" =>
            records.iter().map(|r| r.condition.sugar_content_brix).collect::<Vec<_>>(),
        "ccs_quality" =>
            records.iter().map(|r| r.condition.ccs_quality).collect::<Vec<_>>(),
        "avg_temp_plantation" =>
            records.iter().map(|r| r.condition.avg_temp_c).collect::<Vec<_>>(),
        "rainfall_mm" =>
            records.iter().map(|r| r.condition.rainfall_mm).collect::<Vec<_>>(),
        "harvest_month" =>
            records.iter().map(|r| r.condition.harvest_month as u32).collect::<Vec<_>>(),
        "sugar_price_per_ton" =>
            records.iter().map(|r| r.sugar_market.sugar_price_per_ton).collect::<Vec<_>>(),
        "sugar_processing_cost_per_ton" =>
            records.iter().map(|r| r.sugar_market.processing_cost_per_ton).collect::<Vec<_>>(),
        "bagasse_value_per_ton" =>
            records.iter().map(|r| r.sugar_market.bagasse_price_per_ton).collect::<Vec<_>>(),
        "molasses_value_per_ton" =>
            records.iter().map(|r| r.sugar_market.molasses_price_per_ton).collect::<Vec<_>>(),
        "extraction_efficiency" =>
            records.iter().map(|r| r.sugar_market.extraction_efficiency).collect::<Vec<_>>(),
        "ethanol_price_per_liter" =>
            records.iter().map(|r| r.ethanol_market.ethanol_price_per_liter).collect::<Vec<_>>(),
        "ethanol_processing_cost_per_ton" =>
            records.iter().map(|r| r.ethanol_market.processing_cost_per_ton).collect::<Vec<_>>(),
        "fermentation_efficiency" =>
            records.iter().map(|r| r.ethanol_market.fermentation_efficiency).collect::<Vec<_>>(),
        "crude_oil_price" =>
            records.iter().map(|r| r.ethanol_market.crude_oil_price).collect::<Vec<_>>(),
        "plantation_cost_per_hectare" =>
            records.iter().map(|r| r.sugar_market.plantation_cost_per_hectare).collect::<Vec<_>>(),
        "weather_penalty" =>
            records.iter().map(|r| r.weather_penalty).collect::<Vec<_>>(),
        "sugar_tons_per_hectare" =>
            records.iter().map(|r| r.sugar.primary_quantity).collect::<Vec<_>>(),
        "sugar_revenue_per_hectare" =>
            records.iter().map(|r| r.sugar.revenue).collect::<Vec<_>>(),
        "sugar_cost_per_hectare" =>
            records.iter().map(|r| r.sugar.cost).collect::<Vec<_>>(),
        "sugar_profit_per_hectare" =>
            records.iter().map(|r| r.sugar.profit_per_hectare).collect::<Vec<_>>(),
        "ethanol_liters_per_hectare" =>
            records.iter().map(|r| r.ethanol.primary_quantity).collect::<Vec<_>>(),
        "ethanol_revenue_per_hectare" =>
            records.iter().map(|r| r.ethanol.revenue).collect::<Vec<_>>(),
        "ethanol_cost_per_hectare" =>
            records.iter().map(|r| r.ethanol.cost).collect::<Vec<_>>(),
        "ethanol_profit_per_hectare" =>
            records.iter().map(|r| r.ethanol.profit_per_hectare).collect::<Vec<_>>(),
        "profit_difference" =>
            records.iter().map(|r| r.sugar.profit_per_hectare - r.ethanol.profit_per_hectare).collect::<Vec<_>>(),
    )?;

    let labeled = !records.is_empty() && records.iter().all(|r| r.recommendation.is_some());
    if labeled {
        let strategies: Vec<&str> = records
            .iter()
            .map(|r| r.recommendation.as_ref().unwrap().strategy.as_str())
            .collect();
        let confidences: Vec<f64> = records
            .iter()
            .map(|r| r.recommendation.as_ref().unwrap().confidence)
            .collect();
        df.with_column(Series::new("optimal_strategy".into(), strategies))?;
        df.with_column(Series::new("confidence".into(), confidences))?;
    }

    Ok(df)
}
