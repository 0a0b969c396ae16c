//! Unified Production Decision Engine
//!
//! Given one sugar-cane harvest, should the grower convert it to sugar, to
//! ethanol, or hedge across both? Both conversion paths consume the same
//! physical harvest, so the engine guarantees the two pathways are evaluated
//! against an identical, immutable raw-material state:
//! - `condition`: the shared plantation-condition model and its sampler
//! - `weather`: the pathway-agnostic weather penalty
//! - `pathways`: the sugar and ethanol conversion calculators
//! - `recommend`: the three-way verdict with confidence
//! - `engine`: the single-call coordinator used by interactive consumers
//! - `dataset`: batch generation of labeled training corpora
//!
//! All core operations are pure functions over explicit inputs; randomness
//! always flows through a caller-supplied seedable RNG handle.

pub mod condition;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod pathways;
pub mod recommend;
pub mod weather;

// Re-export commonly used types
pub use condition::{sample_condition, Distribution, PlantationCondition, SamplerConfig, ValueRange};
pub use dataset::{
    generate, generate_parallel, label_counts, records_to_dataframe, DatasetRecord,
    GeneratorConfig, MarketRanges,
};
pub use engine::{Decision, DecisionEngine};
pub use error::{ConfigError, EngineError, ValidationError};
pub use pathways::{
    calculate_ethanol, calculate_sugar, Byproduct, ByproductKind, EthanolMarket, Pathway,
    ProcessParams, ProductionResult, SugarMarket,
};
pub use recommend::{recommend, DecisionParams, Recommendation, Strategy};
pub use weather::WeatherModel;
