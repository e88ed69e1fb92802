//! Batch scoring driver for the risk engine.
//!
//! One-shot runs over a JSON records file: score a cohort, roll the
//! results up per cluster, or inspect the loaded model's coefficients.

use anyhow::Context;
use clap::{Parser, Subcommand};

use edushield_core::cluster::CentroidSet;
use edushield_core::model::{ModelArtifact, RiskModel};
use edushield_core::{EngineConfig, RiskEngine, StudentRecord};

#[derive(Parser)]
#[command(name = "edushield-score")]
#[command(about = "Dropout risk scoring over a student records file", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score every record and print one outcome per record
    Score {
        #[arg(long)]
        model: String,
        #[arg(long)]
        centroids: String,
        #[arg(long)]
        config: Option<String>,
        #[arg(long)]
        records: String,
        #[arg(long, default_value_t = false)]
        pretty: bool,
    },
    /// Score every record, then print per-cluster dashboard totals
    Overview {
        #[arg(long)]
        model: String,
        #[arg(long)]
        centroids: String,
        #[arg(long)]
        config: Option<String>,
        #[arg(long)]
        records: String,
        #[arg(long, default_value_t = false)]
        pretty: bool,
    },
    /// Rank the model's coefficients by absolute weight
    Importance {
        #[arg(long)]
        model: String,
        #[arg(long, default_value_t = false)]
        pretty: bool,
    },
}

fn build_engine(
    model_path: &str,
    centroids_path: &str,
    config_path: Option<&str>,
) -> anyhow::Result<RiskEngine> {
    let config = match config_path {
        Some(path) => EngineConfig::from_json_file(path)?,
        None => EngineConfig::default(),
    };
    let artifact = ModelArtifact::from_json_file(model_path)?;
    let model = RiskModel::new(artifact, model_path);
    let centroids = CentroidSet::from_json_file(centroids_path)?;
    Ok(RiskEngine::new(config, model, centroids)?)
}

fn load_records(path: &str) -> anyhow::Result<Vec<StudentRecord>> {
    let bytes = std::fs::read(path).with_context(|| format!("failed to read {path}"))?;
    let records: Vec<StudentRecord> = serde_json::from_slice(&bytes)
        .with_context(|| format!("{path} is not a JSON array of student records"))?;
    Ok(records)
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Score {
            model,
            centroids,
            config,
            records,
            pretty,
        } => {
            let engine = build_engine(&model, &centroids, config.as_deref())?;
            let cohort = load_records(&records)?;
            let outcomes = engine.analyze_batch(&cohort);
            let scored = outcomes.iter().filter(|o| o.is_scored()).count();
            log::info!("Scored {scored}/{} records", outcomes.len());
            print_json(&outcomes, pretty)?;
        }
        Commands::Overview {
            model,
            centroids,
            config,
            records,
            pretty,
        } => {
            let engine = build_engine(&model, &centroids, config.as_deref())?;
            let cohort = load_records(&records)?;
            let outcomes = engine.analyze_batch(&cohort);
            let scored = outcomes.iter().filter(|o| o.is_scored()).count();
            log::info!("Scored {scored}/{} records", outcomes.len());
            print_json(&engine.cluster_overview(), pretty)?;
        }
        Commands::Importance { model, pretty } => {
            let artifact = ModelArtifact::from_json_file(&model)?;
            let model = RiskModel::new(artifact, &model);
            print_json(&model.feature_importance(), pretty)?;
        }
    }

    Ok(())
}
