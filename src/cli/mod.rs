//! Sensor transformation CLI
//!
//! Command-line interface for running the transformation stage, applying a
//! persisted transformer object to new data and inspecting persisted arrays.

use clap::{Args, Parser, Subcommand};
use colored::*;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::constants::{ARTIFACT_DIR, DEFAULT_K_NEIGHBORS, DEFAULT_RANDOM_STATE, SCHEMA_FILE_PATH};
use crate::entity::{DataIngestionArtifact, DataValidationArtifact};
use crate::export::{load_array, save_array};
use crate::pipeline::{disassemble_array, DataTransformation, PipelineConfig};
use crate::preprocessing::TransformerObject;
use crate::synthetic::{NeighborPolicy, ResamplerConfig, TomekStrategy};
use crate::utils::{DataLoader, DataSaver};

// ─── Styling helpers ───────────────────────────────────────────────────────────

fn dim(s: &str) -> ColoredString   { s.truecolor(100, 100, 100) }
fn accent(s: &str) -> ColoredString { s.truecolor(120, 170, 255) }
fn muted(s: &str) -> ColoredString  { s.truecolor(140, 140, 140) }
fn ok(s: &str) -> ColoredString     { s.truecolor(100, 210, 120) }

fn step_run(msg: &str) {
    print!("  {} {}... ", accent("›"), msg);
}

fn step_done(detail: &str) {
    println!("{} {}", ok("done"), dim(detail));
}

fn section(title: &str) {
    println!();
    println!("  {}", title.white().bold());
    println!("  {}", dim(&"─".repeat(56)));
}

fn row(key: &str, val: impl std::fmt::Display) {
    println!("  {:<14} {}", muted(key), val);
}

// ─── CLI definition ────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "sensor-transform")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Turns validated sensor splits into balanced, model-ready arrays")]
#[command(long_about = None)]
pub struct Cli {
    /// Also write logs to a timestamped file in this directory
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the transformation stage on a train/test pair
    Run(RunArgs),

    /// Apply a persisted transformer object to a new CSV file
    Transform {
        /// Transformer object written by `run`
        #[arg(long)]
        object: PathBuf,

        /// Input data file (CSV)
        #[arg(short, long)]
        data: PathBuf,

        /// Output file; `.csv` writes a table, anything else a binary array
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Show the shape and class balance of a persisted array
    Inspect {
        /// Array written by `run`
        #[arg(short, long)]
        array: PathBuf,
    },
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Train split (CSV)
    #[arg(long)]
    pub train: PathBuf,

    /// Test split (CSV)
    #[arg(long)]
    pub test: PathBuf,

    /// Schema document (YAML)
    #[arg(long, default_value = SCHEMA_FILE_PATH)]
    pub schema: PathBuf,

    /// Root directory for timestamped run outputs
    #[arg(long, default_value = ARTIFACT_DIR)]
    pub artifact_dir: PathBuf,

    /// Validation result (JSON); treated as passed when omitted
    #[arg(long)]
    pub validation: Option<PathBuf>,

    /// Neighbours used for synthetic minority rows
    #[arg(long, default_value_t = DEFAULT_K_NEIGHBORS)]
    pub k_neighbors: usize,

    /// Seed for synthetic minority rows
    #[arg(long, default_value_t = DEFAULT_RANDOM_STATE)]
    pub seed: u64,

    /// Use fewer neighbours instead of failing on a small minority class
    #[arg(long)]
    pub shrink_neighbors: bool,

    /// Remove both rows of every Tomek link, not just the majority one
    #[arg(long)]
    pub tomek_all: bool,

    /// Leave the test split's class distribution untouched
    #[arg(long)]
    pub keep_test_distribution: bool,
}

impl RunArgs {
    fn resampler_config(&self) -> ResamplerConfig {
        let mut config = ResamplerConfig::new()
            .with_k_neighbors(self.k_neighbors)
            .with_random_state(self.seed);
        if self.shrink_neighbors {
            config = config.with_neighbor_policy(NeighborPolicy::Shrink);
        }
        if self.tomek_all {
            config = config.with_tomek_strategy(TomekStrategy::All);
        }
        config
    }
}

// ─── Commands ──────────────────────────────────────────────────────────────────

pub fn cmd_run(args: &RunArgs) -> anyhow::Result<()> {
    section("Data transformation");

    let validation = match &args.validation {
        Some(path) => DataValidationArtifact::from_json_file(path)?,
        None => DataValidationArtifact::passed(),
    };

    let config = PipelineConfig::from_schema_file(&args.schema, &args.artifact_dir)?
        .with_resampler(args.resampler_config())
        .with_resample_test(!args.keep_test_distribution);

    let stage = DataTransformation::new(
        DataIngestionArtifact::new(&args.train, &args.test),
        validation,
        config,
    );

    step_run("Transforming splits");
    let start = Instant::now();
    let artifact = stage.initiate_data_transformation()?;
    step_done(&format!("{:?}", start.elapsed()));

    println!();
    row("Object", artifact.transformed_object_file_path().display());
    row("Train", artifact.transformed_train_file_path().display());
    row("Test", artifact.transformed_test_file_path().display());
    println!();
    Ok(())
}

pub fn cmd_transform(object_path: &Path, data_path: &Path, output_path: &Path) -> anyhow::Result<()> {
    section("Transform");

    step_run("Loading transformer object");
    let object = TransformerObject::load(object_path)?;
    step_done(&format!("{} features", object.feature_names().len()));

    step_run("Loading data");
    let df = DataLoader::new().load_csv(data_path)?;
    step_done(&format!("{} rows × {} cols", df.height(), df.width()));

    step_run("Transforming");
    let x = object.transform_frame(&df)?;
    step_done(&format!("{} rows × {} cols", x.nrows(), x.ncols()));

    step_run(&format!("Saving → {}", output_path.display()));
    let is_csv = output_path.extension().and_then(|e| e.to_str()) == Some("csv");
    if is_csv {
        let columns: Vec<Column> = object
            .feature_names()
            .iter()
            .zip(x.columns())
            .map(|(name, values)| Column::new(name.as_str().into(), values.to_vec()))
            .collect();
        let mut out = DataFrame::new(columns)?;
        DataSaver::save_csv(&mut out, output_path)?;
    } else {
        save_array(output_path, &x)?;
    }
    step_done(if is_csv { "csv" } else { "binary array" });

    println!();
    Ok(())
}

pub fn cmd_inspect(array_path: &Path) -> anyhow::Result<()> {
    section("Array");

    let array = load_array(array_path)?;
    let data = disassemble_array(&array)?;

    row("File", array_path.display());
    row("Rows", data.n_rows());
    row("Features", data.n_features());
    row("Missing", data.x().iter().filter(|v| v.is_nan()).count());
    println!();

    println!("  {:<14} {:>8} {:>8}", muted("Class"), muted("Rows"), muted("Share"));
    println!("  {}", dim(&"─".repeat(32)));
    for (class, count) in data.class_counts() {
        let share = count as f64 / data.n_rows().max(1) as f64;
        println!("  {:<14} {:>8} {:>7.1}%", class, count, share * 100.0);
    }

    println!();
    Ok(())
}
