use crate::{error::BarnforgeError, logger::TimeSeriesLogger, simulation::engine::ClimateSimulator};
use barnforge_schemas::{
    environment::{Enclosure, WeatherSnapshot},
    equipment::Equipment,
    file_formats::Scenario,
};

/// A fluent builder for constructing a `ClimateSimulator`.
///
/// Unlike the bare `compute_climate` entry point, the builder validates its inputs: enclosure
/// dimensions must be strictly positive and every equipment setting must lie within `[0, 100]`.
#[derive(Default)]
pub struct SimulationBuilder {
    enclosure: Option<Enclosure>,
    equipment: Vec<Equipment>,
    weather: Option<WeatherSnapshot>,
    flock_age: Option<u32>,
    log_path: Option<String>,
}

impl SimulationBuilder {
    /// Creates a new, empty `SimulationBuilder`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes enclosure, equipment, weather and flock age from a loaded scenario.
    pub fn with_scenario(self, scenario: &Scenario) -> Self {
        self.with_enclosure(scenario.enclosure)
            .with_equipment(scenario.equipment.clone())
            .with_weather(scenario.weather)
            .with_flock_age(scenario.flock.current_age)
    }

    pub fn with_enclosure(mut self, enclosure: Enclosure) -> Self {
        self.enclosure = Some(enclosure);
        self
    }

    /// Sets the equipment inventory installed in the enclosure.
    pub fn with_equipment(mut self, equipment: Vec<Equipment>) -> Self {
        self.equipment = equipment;
        self
    }

    /// Sets the weather used by the first run. Series runs replace it per reading.
    pub fn with_weather(mut self, weather: WeatherSnapshot) -> Self {
        self.weather = Some(weather);
        self
    }

    pub fn with_flock_age(mut self, age_days: u32) -> Self {
        self.flock_age = Some(age_days);
        self
    }

    /// Configures the simulator to write every run to the specified CSV file.
    pub fn with_timeseries_logging_to_file(mut self, path: &str) -> Self {
        self.log_path = Some(path.to_string());
        self
    }

    /// Consumes the builder and returns a fully configured `ClimateSimulator`.
    ///
    /// # Errors
    ///
    /// Returns a `BarnforgeError` if the enclosure or weather is missing, a dimension is not
    /// strictly positive, a setting is out of range, or the log file cannot be created.
    pub fn build(self) -> Result<ClimateSimulator, BarnforgeError> {
        let enclosure = self.enclosure.ok_or(BarnforgeError::EnclosureNotDefined)?;
        validate_enclosure(&enclosure)?;

        for item in &self.equipment {
            if !(0.0..=100.0).contains(&item.current_setting) {
                return Err(BarnforgeError::InvalidSetting(
                    item.equipment_id.clone(),
                    item.current_setting,
                ));
            }
        }

        let weather = self.weather.ok_or(BarnforgeError::WeatherNotDefined)?;

        let logger = match self.log_path {
            Some(path) => Some(
                TimeSeriesLogger::new(&path).map_err(|e| BarnforgeError::FileIO(path.clone(), e))?,
            ),
            None => None,
        };

        Ok(ClimateSimulator {
            enclosure,
            equipment: self.equipment,
            weather,
            flock_age: self.flock_age,
            logger,
            readings: 0,
        })
    }
}

fn validate_enclosure(enclosure: &Enclosure) -> Result<(), BarnforgeError> {
    let dimensions = [
        ("length", enclosure.length),
        ("width", enclosure.width),
        ("height", enclosure.height),
    ];
    for (name, value) in dimensions {
        if !value.is_finite() || value <= 0.0 {
            return Err(BarnforgeError::InvalidEnclosure(format!(
                "{} must be a positive number of meters, got {}",
                name, value
            )));
        }
    }
    Ok(())
}
