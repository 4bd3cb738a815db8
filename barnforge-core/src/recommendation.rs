use crate::constants::{
    target_band, TargetBand, ENERGY_WASTE_HEATING_KW, HEATING_ACTIVATION_MARGIN,
    HUMIDITY_HIGH_MARGIN, HUMIDITY_LOW_MARGIN,
};
use barnforge_schemas::{
    advisory::{Advisory, AdvisoryAction, AdvisoryKind},
    equipment::{Equipment, EquipmentSpec},
};

/// Number of switched-on fans and heaters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivityCounts {
    pub active_fans: usize,
    pub active_heaters: usize,
}

impl ActivityCounts {
    pub fn from_equipment(equipment: &[Equipment]) -> Self {
        let mut counts = Self::default();
        for item in equipment.iter().filter(|e| e.is_active) {
            match item.specification {
                EquipmentSpec::Fan { .. } => counts.active_fans += 1,
                EquipmentSpec::Heater { .. } => counts.active_heaters += 1,
                EquipmentSpec::Inlet { .. } => {}
            }
        }
        counts
    }
}

/// Everything the rules look at: the simulated climate, the band for the flock age,
/// and how much equipment is running.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClimateReading {
    pub inside_temp: f64,
    pub inside_humidity: f64,
    pub total_heating: f64,
    pub band: TargetBand,
    pub activity: ActivityCounts,
}

impl ClimateReading {
    pub fn within_band(&self) -> bool {
        self.band.temp_min <= self.inside_temp && self.inside_temp <= self.band.temp_max
    }
}

/// One threshold rule of the advisory generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClimateRule {
    TemperatureLow,
    TemperatureHigh,
    TemperatureGood,
    HumidityLow,
    HumidityHigh,
    OptimizeEnergy,
    OptimizeFans,
    ActivateHeating,
}

/// Evaluation order. Advisories come out in this order.
pub const RULE_ORDER: [ClimateRule; 8] = [
    ClimateRule::TemperatureLow,
    ClimateRule::TemperatureHigh,
    ClimateRule::TemperatureGood,
    ClimateRule::HumidityLow,
    ClimateRule::HumidityHigh,
    ClimateRule::OptimizeEnergy,
    ClimateRule::OptimizeFans,
    ClimateRule::ActivateHeating,
];

impl ClimateRule {
    pub fn applies(&self, reading: &ClimateReading) -> bool {
        let band = &reading.band;
        match self {
            ClimateRule::TemperatureLow => reading.inside_temp < band.temp_min,
            ClimateRule::TemperatureHigh => reading.inside_temp > band.temp_max,
            // Complement of the two above, so exactly one verdict fires even for NaN input.
            ClimateRule::TemperatureGood => {
                !ClimateRule::TemperatureLow.applies(reading)
                    && !ClimateRule::TemperatureHigh.applies(reading)
            }
            ClimateRule::HumidityLow => reading.inside_humidity < band.humidity - HUMIDITY_LOW_MARGIN,
            ClimateRule::HumidityHigh => reading.inside_humidity > band.humidity + HUMIDITY_HIGH_MARGIN,
            ClimateRule::OptimizeEnergy => {
                reading.total_heating > ENERGY_WASTE_HEATING_KW && reading.inside_temp > band.temp_max
            }
            ClimateRule::OptimizeFans => reading.activity.active_fans > 1 && reading.within_band(),
            ClimateRule::ActivateHeating => {
                reading.activity.active_heaters == 0
                    && reading.inside_temp < band.temp_min - HEATING_ACTIVATION_MARGIN
            }
        }
    }

    pub fn action(&self) -> AdvisoryAction {
        match self {
            ClimateRule::TemperatureLow => AdvisoryAction::TemperatureLow,
            ClimateRule::TemperatureHigh => AdvisoryAction::TemperatureHigh,
            ClimateRule::TemperatureGood => AdvisoryAction::TemperatureGood,
            ClimateRule::HumidityLow => AdvisoryAction::HumidityLow,
            ClimateRule::HumidityHigh => AdvisoryAction::HumidityHigh,
            ClimateRule::OptimizeEnergy => AdvisoryAction::OptimizeEnergy,
            ClimateRule::OptimizeFans => AdvisoryAction::OptimizeFans,
            ClimateRule::ActivateHeating => AdvisoryAction::ActivateHeating,
        }
    }

    pub fn advisory(&self, reading: &ClimateReading) -> Advisory {
        let band = &reading.band;
        let (kind, title, message) = match self {
            ClimateRule::TemperatureLow => (
                AdvisoryKind::Warning,
                "Temperature too low",
                format!(
                    "Inside temperature is {:.1}°C below target. Keep it between {:.0}°C and {:.0}°C.",
                    band.temp_min - reading.inside_temp,
                    band.temp_min,
                    band.temp_max
                ),
            ),
            ClimateRule::TemperatureHigh => (
                AdvisoryKind::Warning,
                "Temperature too high",
                format!(
                    "Inside temperature is {:.1}°C above target. Keep it between {:.0}°C and {:.0}°C.",
                    reading.inside_temp - band.temp_max,
                    band.temp_min,
                    band.temp_max
                ),
            ),
            ClimateRule::TemperatureGood => (
                AdvisoryKind::Success,
                "Temperature optimal",
                format!(
                    "Inside temperature of {:.1}°C is within the {:.0}-{:.0}°C target.",
                    reading.inside_temp, band.temp_min, band.temp_max
                ),
            ),
            ClimateRule::HumidityLow => (
                AdvisoryKind::Info,
                "Humidity too low",
                format!(
                    "Inside humidity is {:.1}% against a target of {:.0}%. Reduce inlet openings or add misting.",
                    reading.inside_humidity, band.humidity
                ),
            ),
            ClimateRule::HumidityHigh => (
                AdvisoryKind::Info,
                "Humidity too high",
                format!(
                    "Inside humidity is {:.1}% against a target of {:.0}%. Increase ventilation to remove moisture.",
                    reading.inside_humidity, band.humidity
                ),
            ),
            ClimateRule::OptimizeEnergy => (
                AdvisoryKind::Info,
                "Reduce heating output",
                format!(
                    "Heaters deliver {:.1} kW while the house is above target. Lower heater settings to save energy.",
                    reading.total_heating
                ),
            ),
            ClimateRule::OptimizeFans => (
                AdvisoryKind::Info,
                "Fan usage can be reduced",
                format!(
                    "{} fans are running while the temperature is on target. Consider switching some off.",
                    reading.activity.active_fans
                ),
            ),
            ClimateRule::ActivateHeating => (
                AdvisoryKind::Warning,
                "Activate heating",
                format!(
                    "No heater is running and the house is more than {:.0}°C below target. Switch on heating.",
                    HEATING_ACTIVATION_MARGIN
                ),
            ),
        };
        Advisory::new(kind, title, message, self.action())
    }
}

/// Classifies a simulated climate into an ordered list of advisories.
///
/// Exactly one of `temperature_low`, `temperature_high` and `temperature_good` is always
/// present, so the list is never empty. Equipment is only counted, never changed.
pub fn recommend(
    inside_temp: f64,
    inside_humidity: f64,
    age_days: u32,
    total_heating: f64,
    equipment: &[Equipment],
) -> Vec<Advisory> {
    let reading = ClimateReading {
        inside_temp,
        inside_humidity,
        total_heating,
        band: target_band(age_days),
        activity: ActivityCounts::from_equipment(equipment),
    };

    RULE_ORDER
        .iter()
        .filter(|rule| rule.applies(&reading))
        .map(|rule| rule.advisory(&reading))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn actions(advisories: &[Advisory]) -> Vec<AdvisoryAction> {
        advisories.iter().map(|a| a.action).collect()
    }

    #[test]
    fn test_cold_house_with_heater_running() {
        let equipment = [Equipment::heater("HTR-01", 15.0, 45.0)];
        let advisories = recommend(22.3, 45.0, 18, 6.75, &equipment);
        assert_eq!(
            actions(&advisories),
            vec![AdvisoryAction::TemperatureLow, AdvisoryAction::HumidityLow]
        );
        assert_eq!(advisories[0].kind, AdvisoryKind::Warning);
        assert!(advisories[0].message.contains("4.7°C below"));
        assert!(advisories[0].message.contains("27°C and 30°C"));
    }

    #[test]
    fn test_cold_house_without_heater_requests_heating() {
        let advisories = recommend(20.0, 60.0, 14, 0.0, &[]);
        assert_eq!(
            actions(&advisories),
            vec![AdvisoryAction::TemperatureLow, AdvisoryAction::ActivateHeating]
        );
    }

    #[test]
    fn test_heating_not_requested_within_margin() {
        // 25.5 is below 27 but within the 2 degree margin
        let advisories = recommend(25.5, 60.0, 14, 0.0, &[]);
        assert_eq!(actions(&advisories), vec![AdvisoryAction::TemperatureLow]);
    }

    #[test]
    fn test_overheated_house_with_strong_heating() {
        let equipment = [Equipment::heater("HTR-01", 30.0, 50.0)];
        let advisories = recommend(33.0, 60.0, 21, 15.0, &equipment);
        assert_eq!(
            actions(&advisories),
            vec![AdvisoryAction::TemperatureHigh, AdvisoryAction::OptimizeEnergy]
        );
        assert!(advisories[0].message.contains("6.0°C above"));
    }

    #[test]
    fn test_on_target_with_several_fans() {
        let equipment = [
            Equipment::fan("FAN-01", 120.0, 100.0),
            Equipment::fan("FAN-02", 120.0, 100.0),
            Equipment::fan("FAN-03", 120.0, 100.0).switched_off(),
        ];
        let advisories = recommend(28.0, 60.0, 14, 0.0, &equipment);
        assert_eq!(
            actions(&advisories),
            vec![AdvisoryAction::TemperatureGood, AdvisoryAction::OptimizeFans]
        );
        assert_eq!(advisories[0].kind, AdvisoryKind::Success);
        assert!(advisories[1].message.starts_with("2 fans"));
    }

    #[test]
    fn test_band_edges_are_on_target() {
        assert_eq!(recommend(27.0, 60.0, 14, 0.0, &[])[0].action, AdvisoryAction::TemperatureGood);
        assert_eq!(recommend(30.0, 60.0, 14, 0.0, &[])[0].action, AdvisoryAction::TemperatureGood);
    }

    #[test]
    fn test_humidity_thresholds() {
        // target 60: low below 50, high above 75
        assert!(!actions(&recommend(28.0, 50.0, 14, 0.0, &[])).contains(&AdvisoryAction::HumidityLow));
        assert!(actions(&recommend(28.0, 49.9, 14, 0.0, &[])).contains(&AdvisoryAction::HumidityLow));
        assert!(!actions(&recommend(28.0, 75.0, 14, 0.0, &[])).contains(&AdvisoryAction::HumidityHigh));
        assert!(actions(&recommend(28.0, 75.1, 14, 0.0, &[])).contains(&AdvisoryAction::HumidityHigh));
    }

    #[test]
    fn test_nan_temperature_still_gets_a_verdict() {
        let advisories = recommend(f64::NAN, 60.0, 14, 0.0, &[]);
        assert_eq!(actions(&advisories), vec![AdvisoryAction::TemperatureGood]);
    }

    #[test]
    fn test_activity_counts() {
        let equipment = [
            Equipment::fan("FAN-01", 90.0, 10.0),
            Equipment::heater("HTR-01", 10.0, 10.0).switched_off(),
            Equipment::heater("HTR-02", 10.0, 10.0),
            Equipment::inlet("IN-01", 1.0, 10.0),
        ];
        assert_eq!(
            ActivityCounts::from_equipment(&equipment),
            ActivityCounts { active_fans: 1, active_heaters: 1 }
        );
    }

    proptest! {
        #[test]
        fn exactly_one_temperature_verdict(
            temp in -30.0f64..60.0,
            humidity in 0.0f64..100.0,
            age in 0u32..120,
            heating in 0.0f64..40.0,
        ) {
            let advisories = recommend(temp, humidity, age, heating, &[]);
            let verdicts = advisories.iter().filter(|a| a.action.is_temperature_verdict()).count();
            prop_assert_eq!(verdicts, 1);
            prop_assert!(advisories[0].action.is_temperature_verdict());
        }
    }
}
