use crate::{
    constants::{
        BASE_FCR, BASE_GROWTH_RATE, FCR_INCREASE_PER_DAY, FCR_STRESS_PENALTY, GROWTH_DECLINE_PER_DAY,
        MIN_GROWTH_RATE, OPTIMAL_ENVIRONMENT_FACTOR, STRESSED_ENVIRONMENT_FACTOR,
    },
    round_to,
};
use barnforge_schemas::{
    advisory::AdvisoryAction,
    flock::Flock,
    report::{GrowthProjection, SimulationResult},
};

/// Expected daily gain in grams for a bird of the given age.
pub fn base_growth_rate(age_days: u32) -> f64 {
    (BASE_GROWTH_RATE - age_days as f64 * GROWTH_DECLINE_PER_DAY).max(MIN_GROWTH_RATE)
}

/// Reference live weight in grams on the standard growth curve.
pub fn standard_weight(age_days: u32) -> f64 {
    let age = age_days as f64;
    40.0 + age * 20.0 + age.powf(1.5) * 2.0
}

/// 1.0 when the climate is on target, 0.85 otherwise.
pub fn environmental_factor(result: &SimulationResult) -> f64 {
    if result.has_advisory(AdvisoryAction::TemperatureGood) {
        OPTIMAL_ENVIRONMENT_FACTOR
    } else {
        STRESSED_ENVIRONMENT_FACTOR
    }
}

pub fn feed_conversion_ratio(age_days: u32, climate_on_target: bool) -> f64 {
    let penalty = if climate_on_target { 0.0 } else { FCR_STRESS_PENALTY };
    round_to(BASE_FCR + age_days as f64 * FCR_INCREASE_PER_DAY + penalty, 2)
}

/// Projects flock weight 7 and 14 days ahead and its feed efficiency under the simulated climate.
pub fn project(flock: &Flock, result: &SimulationResult) -> GrowthProjection {
    let age = flock.current_age;
    let on_target = result.has_advisory(AdvisoryAction::TemperatureGood);
    let factor = environmental_factor(result);
    let daily_gain = base_growth_rate(age) * factor;
    let projected_weight = |days: f64| flock.average_weight + daily_gain * days;

    GrowthProjection {
        projected_weight_7d: projected_weight(7.0),
        projected_weight_14d: projected_weight(14.0),
        growth_rate_vs_standard: round_to((flock.average_weight / standard_weight(age) - 1.0) * 100.0, 1),
        fcr: feed_conversion_ratio(age, on_target),
        environmental_factor: factor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use barnforge_schemas::advisory::{Advisory, AdvisoryKind};

    fn result_with(action: AdvisoryAction) -> SimulationResult {
        SimulationResult {
            inside_temp: 28.0,
            inside_humidity: 60.0,
            total_heating: 0.0,
            total_cooling: 0.0,
            ventilation_effect: 0.0,
            recommendations: vec![Advisory::new(AdvisoryKind::Info, "t", String::new(), action)],
            volume: 1008.0,
            surface_area: 828.0,
        }
    }

    #[test]
    fn test_growth_rate_has_a_floor() {
        assert_eq!(base_growth_rate(0), 50.0);
        assert!((base_growth_rate(25) - 30.0).abs() < 1e-9);
        assert_eq!(base_growth_rate(60), 10.0);
        assert_eq!(base_growth_rate(200), 10.0);
    }

    #[test]
    fn test_day_old_chick_matches_standard() {
        let flock = Flock::new(0, 40.0);
        let projection = project(&flock, &result_with(AdvisoryAction::TemperatureGood));
        assert_eq!(standard_weight(0), 40.0);
        assert_eq!(projection.growth_rate_vs_standard, 0.0);
        assert_eq!(projection.environmental_factor, 1.0);
        assert!((projection.projected_weight_7d - 390.0).abs() < 1e-9);
        assert!((projection.projected_weight_14d - 740.0).abs() < 1e-9);
        assert_eq!(projection.fcr, 1.2);
    }

    #[test]
    fn test_stressed_flock_at_six_weeks() {
        let flock = Flock::new(42, 485.0);
        let projection = project(&flock, &result_with(AdvisoryAction::TemperatureHigh));
        assert_eq!(projection.fcr, 1.82);
        assert_eq!(projection.environmental_factor, 0.85);
        // 16.4 g/day * 0.85
        assert!((projection.projected_weight_7d - (485.0 + 13.94 * 7.0)).abs() < 1e-9);
        assert!(projection.growth_rate_vs_standard < 0.0);
    }

    #[test]
    fn test_heavier_than_standard_is_positive() {
        let flock = Flock::new(7, 300.0);
        // standard(7) = 40 + 140 + 2 * 7^1.5 = 217.04
        let projection = project(&flock, &result_with(AdvisoryAction::TemperatureGood));
        assert_eq!(projection.growth_rate_vs_standard, 38.2);
    }
}
