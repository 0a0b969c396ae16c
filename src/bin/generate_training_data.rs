//! Training Data Generation Pipeline
//!
//! Generates a labeled sugar-vs-ethanol decision corpus for the external
//! regression trainer and writes it as CSV and ZSTD-compressed Parquet.
//!
//! Usage:
//!   cargo run --release --bin generate_training_data [N] [SEED] [CONFIG.json]
//!
//! Defaults: N = 5000, SEED = 42, built-in sampling ranges.

use anyhow::{Context, Result};
use cane_decision_rust::{
    generate_parallel, label_counts, records_to_dataframe, DecisionEngine, GeneratorConfig,
};
use polars::prelude::*;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::time::Instant;

const CSV_PATH: &str = "output/cane_decision_training.csv";
const PARQUET_PATH: &str = "output/cane_decision_training.parquet";

fn main() -> Result<()> {
    println!("\n{}", "=".repeat(70));
    println!("UNIFIED PRODUCTION DECISION - TRAINING DATA PIPELINE");
    println!("{}", "=".repeat(70));

    let args: Vec<String> = std::env::args().collect();
    let n: usize = args
        .get(1)
        .map(|s| s.parse().context("N must be an integer"))
        .transpose()?
        .unwrap_or(5000);

    let mut config = match args.get(3) {
        Some(path) => {
            println!("\nLoading generator config: {}", path);
            GeneratorConfig::load(Path::new(path))?
        }
        None => GeneratorConfig::default(),
    };
    if let Some(seed) = args.get(2) {
        config.seed = seed.parse().context("SEED must be an integer")?;
    }

    println!("\nGenerator configuration:");
    println!("  Records: {}", n);
    println!("  Seed:    {}", config.seed);
    println!("  Labeled: {}", config.label);

    let engine = DecisionEngine::default();

    // Generate across the thread pool; each record owns its derived stream
    let generate_start = Instant::now();
    let cancel = AtomicBool::new(false);
    let records = generate_parallel(n, &config, &engine, &cancel)?;
    println!(
        "\nGenerated {} records in {:.2}s",
        records.len(),
        generate_start.elapsed().as_secs_f64()
    );

    // Class balance of the label column
    let counts = label_counts(&records);
    if !counts.is_empty() {
        println!("\nLabel distribution:");
        for strategy in ["sugar", "ethanol", "mixed"] {
            let count = counts.get(strategy).copied().unwrap_or(0);
            println!(
                "  {:<8} {:>8}  ({:.1}%)",
                strategy,
                count,
                100.0 * count as f64 / records.len() as f64
            );
        }
    }

    // Build the trainer handoff table
    let mut df = records_to_dataframe(&records)?;
    println!(
        "\nTrainer table: {} rows x {} columns",
        df.height(),
        df.width()
    );

    std::fs::create_dir_all("output").context("Failed to create output directory")?;

    // CSV for inspection
    let write_start = Instant::now();
    let csv_file = std::fs::File::create(CSV_PATH)
        .with_context(|| format!("Failed to create {}", CSV_PATH))?;
    CsvWriter::new(csv_file).finish(&mut df)?;
    println!(
        "\n✓ Saved: {} ({:.3}s)",
        CSV_PATH,
        write_start.elapsed().as_secs_f64()
    );

    // Parquet with ZSTD compression for the trainer
    let write_start = Instant::now();
    let parquet_file = std::fs::File::create(PARQUET_PATH)
        .with_context(|| format!("Failed to create {}", PARQUET_PATH))?;
    ParquetWriter::new(parquet_file)
        .with_compression(ParquetCompression::Zstd(None))
        .finish(&mut df)?;
    println!(
        "✓ Saved: {} ({:.3}s)",
        PARQUET_PATH,
        write_start.elapsed().as_secs_f64()
    );

    let csv_size = std::fs::metadata(CSV_PATH)?.len() as f64 / (1024.0 * 1024.0);
    let parquet_size = std::fs::metadata(PARQUET_PATH)?.len() as f64 / (1024.0 * 1024.0);
    println!("\n  CSV size:     {:.2} MB", csv_size);
    println!("  Parquet size: {:.2} MB", parquet_size);

    println!("\n{}", "=".repeat(70));
    println!("Dataset ready for trainer handoff.");
    println!("{}", "=".repeat(70));
    println!();

    Ok(())
}
