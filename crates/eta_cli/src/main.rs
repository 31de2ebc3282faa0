mod cli;
mod render;

use std::process::ExitCode;

use clap::Parser;
use eta_core::{EstimateOutcome, EtaError, EtaEstimator, HourMultiplierTable};

use cli::{today, Cli, Commands, OutputFormat};

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            log::error!("eta failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode, EtaError> {
    let config = cli.estimator_config()?;

    match &cli.command {
        Commands::Multipliers { category } => {
            let table = HourMultiplierTable::from_kind(&config.hour_multipliers)?;
            print!("{}", render::multipliers_text(&table, category.map(Into::into)));
            Ok(ExitCode::SUCCESS)
        }
        Commands::Match { text, day } => {
            let estimator = EtaEstimator::from_config(&config)?;
            let result = estimator.match_text(text, day.unwrap_or_else(today));
            println!("{}", to_json(&result)?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Factor { trip } => {
            let estimator = EtaEstimator::from_config(&config)?;
            let breakdown = estimator.factor(&trip.request())?;
            println!("{}", to_json(&breakdown)?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Estimate { trip, format } => {
            let estimator = EtaEstimator::from_config(&config)?;
            let outcome = estimator.estimate(&trip.request());
            match format {
                OutputFormat::Text => print!("{}", render::outcome_text(&outcome)),
                OutputFormat::Json => println!("{}", to_json(&outcome)?),
            }
            Ok(match outcome {
                EstimateOutcome::Failed { .. } => ExitCode::from(2),
                _ => ExitCode::SUCCESS,
            })
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, EtaError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| EtaError::Config(format!("failed to serialize output: {e}")))
}
