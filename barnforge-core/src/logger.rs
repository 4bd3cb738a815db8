use crate::simulation::state::ClimateState;
use barnforge_schemas::{
    advisory::AdvisoryAction, environment::WeatherSnapshot, report::SimulationResult,
};
use csv::Writer;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

/// One row of the climate time-series log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub reading: u64,
    pub outside_temp: f64,
    pub outside_humidity: f64,
    pub wind_speed: f64,
    pub inside_temp: f64,
    pub inside_humidity: f64,
    pub total_heating: f64,
    pub total_cooling: f64,
    /// °C added by heaters, unrounded.
    pub heating_rise: f64,
    /// °C removed by fans, unrounded.
    pub cooling_effect: f64,
    pub ventilation_effect: f64,
    /// Advisory action codes, as a JSON array.
    pub advisories_json: String,
}

impl LogEntry {
    pub fn advisories(&self) -> Result<Vec<AdvisoryAction>, serde_json::Error> {
        serde_json::from_str(&self.advisories_json)
    }
}

pub struct TimeSeriesLogger {
    writer: Writer<fs::File>,
}

impl TimeSeriesLogger {
    pub fn new(path: &str) -> Result<Self, io::Error> {
        let writer = Writer::from_path(path)?;
        Ok(Self { writer })
    }

    pub fn log_result(
        &mut self,
        reading: u64,
        weather: &WeatherSnapshot,
        state: &ClimateState,
        result: &SimulationResult,
    ) -> Result<(), anyhow::Error> {
        let actions: Vec<AdvisoryAction> = result.recommendations.iter().map(|a| a.action).collect();

        let entry = LogEntry {
            reading,
            outside_temp: weather.outside_temp,
            outside_humidity: weather.outside_humidity,
            wind_speed: weather.wind_speed,
            inside_temp: result.inside_temp,
            inside_humidity: result.inside_humidity,
            total_heating: result.total_heating,
            total_cooling: result.total_cooling,
            heating_rise: state.heating_rise,
            cooling_effect: state.cooling_effect,
            ventilation_effect: result.ventilation_effect,
            advisories_json: serde_json::to_string(&actions)?,
        };

        self.writer.serialize(entry)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::engine::{simulate, trace};
    use barnforge_schemas::{environment::Enclosure, equipment::Equipment};

    #[test]
    fn test_log_records_step_trace() {
        let path = std::env::temp_dir().join(format!("barnforge_trace_{}.csv", std::process::id()));
        let path = path.to_str().unwrap().to_string();

        let house = Enclosure::new(24.0, 12.0, 3.5);
        let equipment = [
            Equipment::heater("HTR-01", 40.0, 100.0),
            Equipment::fan("FAN-01", 120.0, 100.0),
        ];
        let weather = WeatherSnapshot::new(10.0, 70.0, 0.0);
        let state = trace(&house, &equipment, &weather);
        let result = simulate(&house, &equipment, &weather, Some(14));

        let mut logger = TimeSeriesLogger::new(&path).unwrap();
        logger.log_result(1, &weather, &state, &result).unwrap();
        drop(logger);

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert!(headers.iter().any(|h| h == "heating_rise"));
        assert!(headers.iter().any(|h| h == "cooling_effect"));

        let entry: LogEntry = reader.deserialize().next().unwrap().unwrap();
        assert_eq!(entry.heating_rise, state.heating_rise);
        assert_eq!(entry.cooling_effect, state.cooling_effect);
        assert!(entry.cooling_effect > 0.0);
        assert_eq!(entry.advisories().unwrap().len(), result.recommendations.len());

        std::fs::remove_file(&path).ok();
    }
}
