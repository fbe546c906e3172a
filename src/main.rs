//! Rustcast CLI - prediction orchestration over time-series market data.
//!
//! # Usage
//! ```sh
//! rustcast predict --symbol AAPL --algorithm SINGLE_LSTM
//! rustcast cloud --symbol AAPL
//! rustcast detect --symbol AAPL
//! rustcast algorithms
//! ```
//!
//! Configuration is read from the environment (see `Config::from_env`);
//! a `.env` file is honored when present.

use anyhow::Result;
use clap::{Parser, Subcommand};
use rustcast::application::orchestrator::PredictionOrchestrator;
use rustcast::config::Config;
use rustcast::domain::catalog;
use rustcast::infrastructure::persistence::database::Database;
use rustcast::infrastructure::persistence::repositories::SqlitePredictionResultRepository;
use serde_json::Value;
use std::sync::Arc;
use tracing::{Level, info};
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[command(author, version, about = "Prediction orchestration over time-series market data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the local model and persist the canonical record
    Predict {
        /// Symbol to predict
        #[arg(short, long)]
        symbol: String,

        /// Algorithm identifier (see `algorithms`)
        #[arg(short, long, default_value = "SINGLE_LSTM")]
        algorithm: String,

        /// Feature for single-feature algorithms (defaults to DEFAULT_FEATURE)
        #[arg(long)]
        feature: Option<String>,
    },
    /// Run a prediction against the cloud endpoint (not persisted)
    Cloud {
        /// Symbol to predict
        #[arg(short, long)]
        symbol: String,

        /// Algorithm identifier
        #[arg(short, long, default_value = "SINGLE_LSTM")]
        algorithm: String,

        /// Label attached to the returned payload
        #[arg(long, default_value = "price_prediction")]
        prediction_type: String,
    },
    /// Run anomaly detection for a symbol (not persisted)
    Detect {
        /// Symbol to inspect
        #[arg(short, long)]
        symbol: String,

        /// Algorithm identifier
        #[arg(short, long, default_value = "SINGLE_LSTM")]
        algorithm: String,
    },
    /// List available algorithms with their metadata
    Algorithms,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false).pretty();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .init();

    let cli = Cli::parse();

    if let Commands::Algorithms = cli.command {
        // Catalog listing needs neither config nor database.
        let listing: Vec<_> = catalog::algorithms()
            .into_iter()
            .filter_map(catalog::describe)
            .collect();
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    let config = Arc::new(Config::from_env()?);
    info!("Rustcast {} starting", env!("CARGO_PKG_VERSION"));

    let database = Database::new(&config.database_url).await?;
    let repository = Arc::new(SqlitePredictionResultRepository::new(database.pool.clone()));
    let orchestrator = PredictionOrchestrator::new(config.clone(), repository);

    let payload = match cli.command {
        Commands::Predict {
            symbol,
            algorithm,
            feature,
        } => {
            orchestrator
                .run_local_prediction(&symbol, &algorithm, feature.as_deref())
                .await?
        }
        Commands::Cloud {
            symbol,
            algorithm,
            prediction_type,
        } => {
            orchestrator
                .run_cloud_prediction(&symbol, &algorithm, &prediction_type)
                .await?
        }
        Commands::Detect { symbol, algorithm } => {
            orchestrator.run_anomaly_detection(&symbol, &algorithm).await?
        }
        Commands::Algorithms => return Ok(()),
    };

    println!("{}", serde_json::to_string_pretty(&Value::Object(payload))?);
    Ok(())
}
