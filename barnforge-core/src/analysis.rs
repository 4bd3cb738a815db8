use crate::{error::BarnforgeError, logger::LogEntry, round_to};
use barnforge_schemas::{advisory::AdvisoryAction, flock::Flock, report::SimulationResult};
use std::collections::HashMap;

/// Aggregate view over a series of simulated readings.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ClimateSummary {
    pub readings: u64,
    pub min_inside_temp: f64,
    pub max_inside_temp: f64,
    pub mean_inside_temp: f64,
    pub mean_inside_humidity: f64,
    /// Readings that produced `temperature_good`.
    pub readings_in_band: u64,
    /// Readings that produced any warning-class temperature verdict.
    pub readings_out_of_band: u64,
    pub advisory_counts: HashMap<AdvisoryAction, u64>,
}

impl ClimateSummary {
    /// Share of readings on target, in percent.
    pub fn time_in_band_percent(&self) -> f64 {
        if self.readings == 0 {
            return 0.0;
        }
        round_to(self.readings_in_band as f64 / self.readings as f64 * 100.0, 1)
    }

    pub fn count(&self, action: AdvisoryAction) -> u64 {
        self.advisory_counts.get(&action).copied().unwrap_or(0)
    }

    fn push(&mut self, inside_temp: f64, inside_humidity: f64, actions: &[AdvisoryAction]) {
        if self.readings == 0 {
            self.min_inside_temp = inside_temp;
            self.max_inside_temp = inside_temp;
        } else {
            self.min_inside_temp = self.min_inside_temp.min(inside_temp);
            self.max_inside_temp = self.max_inside_temp.max(inside_temp);
        }
        // Running sums; divided in `finish`.
        self.mean_inside_temp += inside_temp;
        self.mean_inside_humidity += inside_humidity;
        self.readings += 1;

        for action in actions {
            match action {
                AdvisoryAction::TemperatureGood => self.readings_in_band += 1,
                AdvisoryAction::TemperatureLow | AdvisoryAction::TemperatureHigh => {
                    self.readings_out_of_band += 1
                }
                _ => {}
            }
            *self.advisory_counts.entry(*action).or_insert(0) += 1;
        }
    }

    fn finish(mut self) -> Self {
        if self.readings > 0 {
            let n = self.readings as f64;
            self.mean_inside_temp = round_to(self.mean_inside_temp / n, 1);
            self.mean_inside_humidity = round_to(self.mean_inside_humidity / n, 1);
        }
        self
    }
}

pub fn summarize_results(results: &[SimulationResult]) -> ClimateSummary {
    let mut summary = ClimateSummary::default();
    for result in results {
        let actions: Vec<AdvisoryAction> = result.recommendations.iter().map(|a| a.action).collect();
        summary.push(result.inside_temp, result.inside_humidity, &actions);
    }
    summary.finish()
}

/// Reads a time-series log written by `TimeSeriesLogger` and summarizes it.
pub fn summarize_log(log_path: &str) -> Result<ClimateSummary, BarnforgeError> {
    let mut reader = csv::Reader::from_path(log_path)
        .map_err(|e| BarnforgeError::CsvError(log_path.to_string(), e))?;
    let mut summary = ClimateSummary::default();

    for record in reader.deserialize() {
        let entry: LogEntry = record.map_err(|e| BarnforgeError::CsvError(log_path.to_string(), e))?;
        let actions = entry.advisories()?;
        summary.push(entry.inside_temp, entry.inside_humidity, &actions);
    }

    Ok(summary.finish())
}

/// Survival and mortality of a flock since placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlockHealth {
    pub survival_rate: f64,
    pub mortality_count: u32,
    pub mortality_rate: f64,
}

/// Derives survival from the current and placed bird counts.
///
/// A flock with no recorded placement counts as fully alive.
pub fn flock_health(flock: &Flock) -> FlockHealth {
    if flock.initial_chick_count == 0 {
        return FlockHealth {
            survival_rate: 100.0,
            mortality_count: 0,
            mortality_rate: 0.0,
        };
    }
    let placed = flock.initial_chick_count as f64;
    let mortality_count = flock.initial_chick_count.saturating_sub(flock.chick_count);
    let survival_rate = round_to(flock.chick_count.min(flock.initial_chick_count) as f64 / placed * 100.0, 2);
    FlockHealth {
        survival_rate,
        mortality_count,
        mortality_rate: round_to(mortality_count as f64 / placed * 100.0, 2),
    }
}
