//! Fixed factors of the climate model and the age-keyed target climate table.

/// Fan airflow per cm of diameter at full setting.
pub const FAN_AIRFLOW_FACTOR: f64 = 0.85;
/// Scales fan capacity into degrees of cooling per m³ of excess heat.
pub const FAN_COOLING_COEFFICIENT: f64 = 0.001;

/// Air velocity through a fully open inlet, applied per percent of opening.
pub const INLET_VELOCITY_FACTOR: f64 = 2.5;
pub const INLET_COOLING_FACTOR: f64 = 0.1;
pub const WIND_COOLING_FACTOR: f64 = 0.1;

pub const HEATER_EFFICIENCY_FACTOR: f64 = 0.8;
pub const TEMPERATURE_RISE_FACTOR: f64 = 0.5;

/// Offset between °C and K used by the humidity correction.
pub const KELVIN_OFFSET: f64 = 273.15;
pub const MIN_INSIDE_HUMIDITY: f64 = 30.0;
pub const MAX_INSIDE_HUMIDITY: f64 = 100.0;

/// Age used for band selection when the caller does not know the flock age.
pub const DEFAULT_FLOCK_AGE_DAYS: u32 = 18;
pub const AGE_BUCKET_DAYS: u32 = 7;

/// Humidity tolerance below and above the band target, in percentage points.
pub const HUMIDITY_LOW_MARGIN: f64 = 10.0;
pub const HUMIDITY_HIGH_MARGIN: f64 = 15.0;
/// Heating output (kW) above which an overheated house is flagged as wasting energy.
pub const ENERGY_WASTE_HEATING_KW: f64 = 10.0;
/// Degrees below the band minimum at which an unheated house needs heating switched on.
pub const HEATING_ACTIVATION_MARGIN: f64 = 2.0;

pub const BASE_GROWTH_RATE: f64 = 50.0;
pub const GROWTH_DECLINE_PER_DAY: f64 = 0.8;
pub const MIN_GROWTH_RATE: f64 = 10.0;
pub const OPTIMAL_ENVIRONMENT_FACTOR: f64 = 1.0;
pub const STRESSED_ENVIRONMENT_FACTOR: f64 = 0.85;

pub const BASE_FCR: f64 = 1.2;
pub const FCR_INCREASE_PER_DAY: f64 = 0.01;
pub const FCR_STRESS_PENALTY: f64 = 0.2;

/// Acceptable climate for one age bucket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetBand {
    pub temp_min: f64,
    pub temp_max: f64,
    /// Target relative humidity in %.
    pub humidity: f64,
}

/// Target bands keyed by the first day of each age bucket, ascending.
pub const TARGET_BANDS: [(u32, TargetBand); 6] = [
    (0, TargetBand { temp_min: 32.0, temp_max: 35.0, humidity: 65.0 }),
    (7, TargetBand { temp_min: 29.0, temp_max: 32.0, humidity: 65.0 }),
    (14, TargetBand { temp_min: 27.0, temp_max: 30.0, humidity: 60.0 }),
    (21, TargetBand { temp_min: 24.0, temp_max: 27.0, humidity: 60.0 }),
    (28, TargetBand { temp_min: 21.0, temp_max: 24.0, humidity: 60.0 }),
    (35, TargetBand { temp_min: 19.0, temp_max: 22.0, humidity: 60.0 }),
];

/// Looks up the target band for a flock age in days.
///
/// Ages past the last breakpoint keep the 35-day band.
pub fn target_band(age_days: u32) -> TargetBand {
    let bucket = age_days / AGE_BUCKET_DAYS * AGE_BUCKET_DAYS;
    TARGET_BANDS
        .iter()
        .rev()
        .find(|(start, _)| *start <= bucket)
        .map_or(TARGET_BANDS[0].1, |(_, band)| *band)
}
