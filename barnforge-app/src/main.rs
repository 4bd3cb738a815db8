use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

mod config;
mod plotting;
mod tuning;
mod workflow;

#[derive(Parser)]
#[command(name = "barnforge", version, about = "Livestock house climate simulation and growth projection")]
struct Cli {
    /// Directory of scenario YAML files
    #[arg(long, default_value = "./data/scenarios")]
    scenarios: String,

    /// Root directory for run outputs
    #[arg(long, default_value = "./data/runs")]
    output: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Simulate the scenario's current weather and project flock growth
    Simulate {
        #[arg(long)]
        scenario: String,
    },
    /// Simulate the scenario over an hourly weather series
    Forecast {
        #[arg(long)]
        scenario: String,
        /// CSV with hour,outside_temp,outside_humidity,wind_speed columns
        #[arg(long)]
        weather: PathBuf,
    },
    /// Adjust equipment settings until the climate is on target
    Tune {
        #[arg(long)]
        scenario: String,
    },
    /// Simulate every scenario and print a summary table
    Batch,
}

fn main() -> Result<()> {
    println!("--- Barnforge ---");
    let cli = Cli::parse();

    let library = config::ScenarioLibrary::load(&cli.scenarios)?;

    match &cli.command {
        Command::Simulate { scenario } => {
            let scenario = library.get(scenario)?;
            let output_dir = create_run_dir(&cli.output, &scenario.scenario_id)?;
            workflow::run_simulation(scenario, &output_dir)?;
            println!("\nResults are in '{}'", output_dir);
        }
        Command::Forecast { scenario, weather } => {
            let scenario = library.get(scenario)?;
            let series = config::load_weather_series(weather)?;
            let output_dir = create_run_dir(&cli.output, &scenario.scenario_id)?;
            // Copy the weather series to the output directory for traceability
            fs::copy(weather, PathBuf::from(&output_dir).join("weather.csv"))
                .with_context(|| format!("Failed to copy weather series {:?}", weather))?;
            workflow::run_forecast(scenario, &series, &output_dir)?;
            println!("\nResults are in '{}'", output_dir);
        }
        Command::Tune { scenario } => {
            let scenario = library.get(scenario)?;
            let output_dir = create_run_dir(&cli.output, &scenario.scenario_id)?;
            workflow::run_tuning(scenario, &output_dir)?;
            println!("\nResults are in '{}'", output_dir);
        }
        Command::Batch => workflow::run_batch(&library)?,
    }

    Ok(())
}

fn create_run_dir(root: &str, scenario_id: &str) -> Result<String> {
    let output_dir = format!(
        "{}/{}_{}",
        root,
        scenario_id,
        chrono::Utc::now().format("%Y%m%d_%H%M%S")
    );
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create output directory: {}", output_dir))?;
    Ok(output_dir)
}
