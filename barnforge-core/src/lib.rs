//! Climate simulation, advisory rules and growth projection for livestock enclosures.
//!
//! The two entry points, [`compute_climate`] and [`project_growth`], are pure functions over
//! already-resolved inputs. Everything that touches the filesystem lives in [`logger`],
//! [`analysis`] and the validating [`simulation::builder::SimulationBuilder`].

pub mod aggregator;
pub mod analysis;
pub mod constants;
pub mod error;
pub mod growth;
pub mod logger;
pub mod recommendation;
pub mod simulation;

use barnforge_schemas::{
    environment::{Enclosure, WeatherSnapshot},
    equipment::Equipment,
    flock::Flock,
    report::{GrowthProjection, SimulationResult},
};

/// Simulates the inside climate of an enclosure and generates advisories for it.
///
/// Inputs are not validated: settings outside `[0, 100]` are used as given and a zero-volume
/// enclosure yields non-finite temperatures. A NaN inside temperature is neither below nor above
/// the target band, so it gets the `temperature_good` verdict and [`project_growth`] treats it
/// as on target.
pub fn compute_climate(
    enclosure: &Enclosure,
    equipment: &[Equipment],
    outside_temp: f64,
    outside_humidity: f64,
    wind_speed: f64,
    flock_age: Option<u32>,
) -> SimulationResult {
    let weather = WeatherSnapshot::new(outside_temp, outside_humidity, wind_speed);
    simulation::engine::simulate(enclosure, equipment, &weather, flock_age)
}

/// Projects flock growth and feed conversion under a simulated climate.
pub fn project_growth(flock: &Flock, result: &SimulationResult) -> GrowthProjection {
    growth::project(flock, result)
}

/// Rounds half away from zero to the given number of decimals.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}
