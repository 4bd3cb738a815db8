use crate::config::{ScenarioLibrary, WeatherReading};
use crate::plotting;
use crate::tuning::{self, TuningOutcome};
use anyhow::{Context, Result};
use barnforge_core::{
    analysis::{self, ClimateSummary, FlockHealth},
    constants::target_band,
    project_growth,
    simulation::{builder::SimulationBuilder, state::ClimateState},
};
use barnforge_schemas::{
    environment::WeatherSnapshot,
    file_formats::Scenario,
    report::{GrowthProjection, SimulationResult},
};
use std::{fs, path::Path};

/// Simulates a scenario's current weather, projects growth and writes both as JSON.
pub fn run_simulation(scenario: &Scenario, output_dir: &str) -> Result<(SimulationResult, GrowthProjection)> {
    println!("\n--- [Workflow] Simulating '{}' ---", scenario.scenario_name);

    let simulator = SimulationBuilder::new().with_scenario(scenario).build()?;
    let result = simulator.simulate();
    let state = simulator.trace();
    let projection = project_growth(&scenario.flock, &result);

    let report = serde_json::json!({
        "scenarioId": scenario.scenario_id,
        "climate": result,
        "growth": projection,
    });
    fs::write(
        Path::new(output_dir).join("simulation.json"),
        serde_json::to_string_pretty(&report)?,
    )?;

    print_simulation_report(
        scenario,
        &result,
        &state,
        &projection,
        &analysis::flock_health(&scenario.flock),
    );
    Ok((result, projection))
}

/// Simulates a scenario over an hourly weather series, logging, summarizing and plotting it.
pub fn run_forecast(scenario: &Scenario, series: &[WeatherReading], output_dir: &str) -> Result<ClimateSummary> {
    println!(
        "\n--- [Workflow] Forecasting '{}' over {} reading(s) ---",
        scenario.scenario_name,
        series.len()
    );

    let log_path = Path::new(output_dir).join("climate_timeseries.csv");
    let log_path = log_path
        .to_str()
        .context("Output directory is not valid UTF-8")?
        .to_string();

    let mut simulator = SimulationBuilder::new()
        .with_scenario(scenario)
        .with_timeseries_logging_to_file(&log_path)
        .build()?;

    let weather: Vec<WeatherSnapshot> = series.iter().map(WeatherReading::snapshot).collect();
    simulator.run_series(&weather)?;

    let summary = analysis::summarize_log(&log_path)?;
    plotting::generate_all_plots(output_dir, &log_path, &target_band(scenario.flock.current_age))?;

    print_forecast_summary(scenario, &summary);
    Ok(summary)
}

/// Applies the advisories to the scenario's equipment and writes the tuned inventory as YAML.
pub fn run_tuning(scenario: &Scenario, output_dir: &str) -> Result<TuningOutcome> {
    println!("\n--- [Workflow] Tuning equipment for '{}' ---", scenario.scenario_name);

    // Validates the starting inventory before touching it.
    SimulationBuilder::new().with_scenario(scenario).build()?;

    let outcome = tuning::apply_suggestions(scenario);

    let mut tuned = scenario.clone();
    tuned.equipment = outcome.equipment.clone();
    fs::write(
        Path::new(output_dir).join("tuned_scenario.yaml"),
        serde_yaml::to_string(&tuned)?,
    )?;

    println!("Iterations: {}", outcome.iterations);
    for adjustment in &outcome.adjustments {
        println!(
            "  [{}] {:<12} {:>5.1}% -> {:>5.1}% ({})",
            adjustment.iteration,
            adjustment.equipment_id,
            adjustment.from_setting,
            adjustment.to_setting,
            if adjustment.is_active { "on" } else { "off" }
        );
    }
    if outcome.reached_target() {
        println!("Target band reached at {:.1}°C.", outcome.result.inside_temp);
    } else {
        println!(
            "Target band not reachable with the installed equipment; best effort {:.1}°C.",
            outcome.result.inside_temp
        );
    }

    Ok(outcome)
}

/// Simulates every scenario in the library and prints one line per scenario.
pub fn run_batch(library: &ScenarioLibrary) -> Result<()> {
    println!("\n--- [Workflow] Batch run over {} scenario(s) ---", library.scenarios.len());
    println!(
        "{:<16} | {:>7} | {:>7} | {:<16} | {:>8} | {:>8} | {:>5}",
        "Scenario", "Temp", "RH", "Verdict", "W+7d", "W+14d", "FCR"
    );
    println!("{}", "-".repeat(88));

    for scenario in library.sorted() {
        let simulator = SimulationBuilder::new()
            .with_scenario(scenario)
            .build()
            .with_context(|| format!("Scenario '{}' is invalid", scenario.scenario_id))?;
        let result = simulator.simulate();
        let projection = project_growth(&scenario.flock, &result);
        let verdict = result
            .temperature_verdict()
            .map_or("-", |action| action.code());

        println!(
            "{:<16} | {:>5.1}°C | {:>6.1}% | {:<16} | {:>7.0}g | {:>7.0}g | {:>5.2}",
            scenario.scenario_id,
            result.inside_temp,
            result.inside_humidity,
            verdict,
            projection.projected_weight_7d,
            projection.projected_weight_14d,
            projection.fcr
        );
    }
    Ok(())
}

fn print_simulation_report(
    scenario: &Scenario,
    result: &SimulationResult,
    state: &ClimateState,
    projection: &GrowthProjection,
    health: &FlockHealth,
) {
    println!("\n\n--- [Climate Report] ---");
    println!("========================================");
    println!("Scenario: {} ({})", scenario.scenario_name, scenario.scenario_id);
    println!(
        "House: {:.1} m³, {:.1} m² surface",
        result.volume, result.surface_area
    );
    println!(
        "Outside: {:.1}°C, {:.0}% RH, wind {:.1}",
        scenario.weather.outside_temp, scenario.weather.outside_humidity, scenario.weather.wind_speed
    );
    println!("----------------------------------------");

    println!("\nClimate:");
    println!("  - Inside Temperature:       {:.1} °C", result.inside_temp);
    println!("  - Inside Humidity:          {:.1} %", result.inside_humidity);
    println!("  - Heating Output:           {:.2} kW", result.total_heating);
    println!("  - Fan Cooling Capacity:     {:.1}", result.total_cooling);
    println!("  - Heating Rise:             {:.2} °C", state.heating_rise);
    println!("  - Fan Cooling:              {:.2} °C", state.cooling_effect);
    println!("  - Ventilation Effect:       {:.1} °C", result.ventilation_effect);

    println!("\nRecommendations:");
    for advisory in &result.recommendations {
        println!("  - [{:?}] {}: {}", advisory.kind, advisory.title, advisory.message);
    }

    println!("\nFlock (day {}):", scenario.flock.current_age);
    println!("  - Average Weight:           {:.0} g", scenario.flock.average_weight);
    println!("  - Survival:                 {:.2} % ({} lost)", health.survival_rate, health.mortality_count);
    println!("  - Projected Weight +7d:     {:.0} g", projection.projected_weight_7d);
    println!("  - Projected Weight +14d:    {:.0} g", projection.projected_weight_14d);
    println!("  - vs Standard Curve:        {:+.1} %", projection.growth_rate_vs_standard);
    println!("  - Feed Conversion Ratio:    {:.2}", projection.fcr);
    println!("  - Environmental Factor:     {:.2}", projection.environmental_factor);

    println!("========================================");
}

fn print_forecast_summary(scenario: &Scenario, summary: &ClimateSummary) {
    let band = target_band(scenario.flock.current_age);

    println!("\n\n--- [Forecast Summary] ---");
    println!("========================================");
    println!(
        "Target band for day {}: {:.0}-{:.0}°C, {:.0}% RH",
        scenario.flock.current_age, band.temp_min, band.temp_max, band.humidity
    );
    println!("  - Readings:                 {}", summary.readings);
    println!(
        "  - Inside Temperature:       min {:.1} / mean {:.1} / max {:.1} °C",
        summary.min_inside_temp, summary.mean_inside_temp, summary.max_inside_temp
    );
    println!("  - Mean Inside Humidity:     {:.1} %", summary.mean_inside_humidity);
    println!("  - Time in Band:             {:.1} %", summary.time_in_band_percent());

    let mut counts: Vec<_> = summary.advisory_counts.iter().collect();
    counts.sort_by_key(|(action, _)| action.code());
    println!("  - Advisories:");
    for (action, count) in counts {
        println!("    - {}: {}", action, count);
    }
    println!("========================================");
}
