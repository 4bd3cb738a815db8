use super::state::ClimateState;
use crate::{
    aggregator::{aggregate, ventilation_effect},
    constants::{
        DEFAULT_FLOCK_AGE_DAYS, FAN_COOLING_COEFFICIENT, HEATER_EFFICIENCY_FACTOR, KELVIN_OFFSET,
        MAX_INSIDE_HUMIDITY, MIN_INSIDE_HUMIDITY, TEMPERATURE_RISE_FACTOR,
    },
    error::BarnforgeError,
    logger::TimeSeriesLogger,
    recommendation::recommend,
    round_to,
};
use barnforge_schemas::{
    environment::{Enclosure, WeatherSnapshot},
    equipment::Equipment,
    report::SimulationResult,
};

/// Runs the climate model step by step and returns every intermediate value.
///
/// Steps run in a fixed order and each works on the running inside temperature:
/// heating, fan cooling, inlet ventilation, then the humidity correction.
/// A zero-volume enclosure is not guarded against.
pub fn trace(enclosure: &Enclosure, equipment: &[Equipment], weather: &WeatherSnapshot) -> ClimateState {
    let volume = enclosure.volume();
    let totals = aggregate(equipment);
    let outside_temp = weather.outside_temp;
    let mut inside_temp = outside_temp;

    let heating_rise =
        totals.total_heating * HEATER_EFFICIENCY_FACTOR * TEMPERATURE_RISE_FACTOR / (volume / 100.0);
    inside_temp += heating_rise;

    // Fans can only remove heat the heaters added; they never cool below outside air.
    let excess = inside_temp - outside_temp;
    let cooling_effect = (totals.total_cooling * FAN_COOLING_COEFFICIENT * excess.max(0.0) / volume).min(excess);
    inside_temp -= cooling_effect;

    let ventilation = ventilation_effect(equipment, weather.wind_speed);
    inside_temp -= ventilation;

    let inside_humidity = if inside_temp > outside_temp {
        (weather.outside_humidity * (outside_temp + KELVIN_OFFSET) / (inside_temp + KELVIN_OFFSET))
            .clamp(MIN_INSIDE_HUMIDITY, MAX_INSIDE_HUMIDITY)
    } else {
        weather.outside_humidity
    };

    ClimateState {
        outside_temp,
        outside_humidity: weather.outside_humidity,
        totals,
        heating_rise,
        cooling_effect,
        ventilation_effect: ventilation,
        inside_temp,
        inside_humidity,
    }
}

/// Simulates the inside climate and attaches the advisories for a flock of the given age.
///
/// Rules see the unrounded climate. Temperature and ventilation effect are rounded to one
/// decimal in the result; humidity is rounded only when it was corrected for heating and is
/// otherwise the outside humidity as given. `flock_age` defaults to 18 days.
pub fn simulate(
    enclosure: &Enclosure,
    equipment: &[Equipment],
    weather: &WeatherSnapshot,
    flock_age: Option<u32>,
) -> SimulationResult {
    let state = trace(enclosure, equipment, weather);
    report(enclosure, equipment, &state, flock_age)
}

fn report(
    enclosure: &Enclosure,
    equipment: &[Equipment],
    state: &ClimateState,
    flock_age: Option<u32>,
) -> SimulationResult {
    let recommendations = recommend(
        state.inside_temp,
        state.inside_humidity,
        flock_age.unwrap_or(DEFAULT_FLOCK_AGE_DAYS),
        state.totals.total_heating,
        equipment,
    );

    let inside_humidity = if state.is_heated() {
        round_to(state.inside_humidity, 1)
    } else {
        state.inside_humidity
    };

    SimulationResult {
        inside_temp: round_to(state.inside_temp, 1),
        inside_humidity,
        total_heating: state.totals.total_heating,
        total_cooling: state.totals.total_cooling,
        ventilation_effect: round_to(state.ventilation_effect, 1),
        recommendations,
        volume: enclosure.volume(),
        surface_area: enclosure.surface_area(),
    }
}

/// A validated enclosure setup that can be simulated against one or many weather readings.
///
/// Built with [`super::builder::SimulationBuilder`].
pub struct ClimateSimulator {
    pub(super) enclosure: Enclosure,
    pub(super) equipment: Vec<Equipment>,
    pub(super) weather: WeatherSnapshot,
    pub(super) flock_age: Option<u32>,
    pub(super) logger: Option<TimeSeriesLogger>,
    pub(super) readings: u64,
}

impl ClimateSimulator {
    /// Simulates the current weather without recording anything.
    pub fn simulate(&self) -> SimulationResult {
        simulate(&self.enclosure, &self.equipment, &self.weather, self.flock_age)
    }

    pub fn trace(&self) -> ClimateState {
        trace(&self.enclosure, &self.equipment, &self.weather)
    }

    /// Simulates the current weather and appends the result, with its step trace, to the
    /// time-series log, if any.
    pub fn run(&mut self) -> Result<SimulationResult, BarnforgeError> {
        let state = self.trace();
        let result = report(&self.enclosure, &self.equipment, &state, self.flock_age);
        self.readings += 1;
        if let Some(logger) = &mut self.logger {
            logger.log_result(self.readings, &self.weather, &state, &result)?;
        }
        Ok(result)
    }

    /// Runs the simulation once per weather reading, in order.
    pub fn run_series(&mut self, series: &[WeatherSnapshot]) -> Result<Vec<SimulationResult>, BarnforgeError> {
        let mut results = Vec::with_capacity(series.len());
        for weather in series {
            self.weather = *weather;
            results.push(self.run()?);
        }
        Ok(results)
    }

    pub fn get_readings(&self) -> u64 {
        self.readings
    }

    pub fn get_equipment(&self) -> &[Equipment] {
        &self.equipment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use barnforge_schemas::advisory::AdvisoryAction;

    fn house() -> Enclosure {
        Enclosure::new(24.0, 12.0, 3.5)
    }

    #[test]
    fn test_heater_warms_a_cold_house() {
        let equipment = [Equipment::heater("HTR-01", 15.0, 45.0)];
        let weather = WeatherSnapshot::new(22.0, 45.0, 12.0);
        let state = trace(&house(), &equipment, &weather);

        // 6.75 kW * 0.8 * 0.5 / 10.08
        assert!((state.heating_rise - 2.7 / 10.08).abs() < 1e-9);
        assert_eq!(state.cooling_effect, 0.0);
        assert_eq!(state.ventilation_effect, 0.0);
        assert!(state.is_heated());
        assert!(state.inside_humidity < 45.0);

        let result = simulate(&house(), &equipment, &weather, Some(18));
        assert_eq!(result.inside_temp, 22.3);
        assert_eq!(result.inside_humidity, 45.0);
        assert!(result.has_advisory(AdvisoryAction::TemperatureLow));
    }

    #[test]
    fn test_fans_never_cool_below_outside() {
        let equipment = [
            Equipment::heater("HTR-01", 40.0, 100.0),
            Equipment::fan("FAN-01", 10_000_000.0, 100.0),
        ];
        let state = trace(&house(), &equipment, &WeatherSnapshot::new(10.0, 70.0, 0.0));
        assert!((state.cooling_effect - state.heating_rise).abs() < 1e-12);
        assert!((state.inside_temp - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_fans_remove_part_of_the_heating() {
        let equipment = [
            Equipment::heater("HTR-01", 40.0, 100.0),
            Equipment::fan("FAN-01", 120.0, 100.0),
            Equipment::fan("FAN-02", 120.0, 100.0),
        ];
        let state = trace(&house(), &equipment, &WeatherSnapshot::new(10.0, 70.0, 0.0));
        assert!(state.cooling_effect > 0.0);
        assert!(state.cooling_effect < state.heating_rise);
        assert!(state.inside_temp > 10.0);
    }

    #[test]
    fn test_ventilation_cools_below_outside_and_keeps_humidity() {
        let equipment = [Equipment::inlet("IN-01", 2.0, 50.0)];
        let result = simulate(&house(), &equipment, &WeatherSnapshot::new(35.0, 40.0, 12.0), None);
        assert_eq!(result.ventilation_effect, 0.3);
        assert_eq!(result.inside_temp, 34.7);
        assert_eq!(result.inside_humidity, 40.0);
    }

    #[test]
    fn test_humidity_clamped_when_heated() {
        let equipment = [Equipment::heater("HTR-01", 500.0, 100.0)];
        let result = simulate(&house(), &equipment, &WeatherSnapshot::new(0.0, 20.0, 0.0), Some(0));
        assert_eq!(result.inside_humidity, 30.0);
    }

    #[test]
    fn test_humidity_passes_through_unrounded_when_not_heated() {
        let result = simulate(&house(), &[], &WeatherSnapshot::new(20.0, 45.67, 0.0), None);
        assert_eq!(result.inside_temp, 20.0);
        assert_eq!(result.inside_humidity, 45.67);

        let equipment = [Equipment::inlet("IN-01", 2.0, 50.0)];
        let result = simulate(&house(), &equipment, &WeatherSnapshot::new(35.0, 40.123, 12.0), None);
        assert_eq!(result.inside_humidity, 40.123);
    }

    #[test]
    fn test_corrected_humidity_is_rounded() {
        let equipment = [Equipment::heater("HTR-01", 40.0, 100.0)];
        let result = simulate(&house(), &equipment, &WeatherSnapshot::new(10.0, 70.37, 0.0), None);
        assert_eq!(result.inside_humidity, round_to(result.inside_humidity, 1));
        assert!(result.inside_humidity < 70.37);
    }

    #[test]
    fn test_geometry_is_reported() {
        let result = simulate(&house(), &[], &WeatherSnapshot::new(20.0, 60.0, 5.0), None);
        assert_eq!(result.volume, 1008.0);
        assert_eq!(result.surface_area, 828.0);
        assert_eq!(result.inside_temp, 20.0);
        assert!(!result.recommendations.is_empty());
    }
}
