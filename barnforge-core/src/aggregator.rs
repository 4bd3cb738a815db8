use crate::constants::{
    FAN_AIRFLOW_FACTOR, INLET_COOLING_FACTOR, INLET_VELOCITY_FACTOR, WIND_COOLING_FACTOR,
};
use barnforge_schemas::equipment::{Equipment, EquipmentSpec};

/// Heating and cooling capacity of the active equipment in an enclosure.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EquipmentTotals {
    /// kW delivered by active heaters at their current settings.
    pub total_heating: f64,
    /// Cooling capacity of active fans at their current settings.
    pub total_cooling: f64,
}

/// Reduces an equipment inventory to its heating and cooling totals.
///
/// Inactive equipment contributes nothing. Inlets are accounted for by
/// [`ventilation_effect`] instead.
pub fn aggregate(equipment: &[Equipment]) -> EquipmentTotals {
    let mut totals = EquipmentTotals::default();
    for item in equipment.iter().filter(|e| e.is_active) {
        match item.specification {
            EquipmentSpec::Heater { power } => {
                totals.total_heating += power * item.setting_fraction();
            }
            EquipmentSpec::Fan { diameter } => {
                totals.total_cooling += diameter * FAN_AIRFLOW_FACTOR * item.setting_fraction();
            }
            EquipmentSpec::Inlet { .. } => {}
        }
    }
    totals
}

/// Degrees of cooling contributed by inlet ventilation at the given wind speed.
///
/// Inlets are passive openings, so they count whether or not they are flagged active;
/// `current_setting` is the opening in percent.
pub fn ventilation_effect(equipment: &[Equipment], wind_speed: f64) -> f64 {
    let inlet_airflow: f64 = equipment
        .iter()
        .map(|item| match item.specification {
            EquipmentSpec::Inlet { surface } => {
                surface * INLET_VELOCITY_FACTOR / 100.0 * item.current_setting
            }
            EquipmentSpec::Fan { .. } | EquipmentSpec::Heater { .. } => 0.0,
        })
        .sum();
    inlet_airflow * INLET_COOLING_FACTOR * wind_speed * WIND_COOLING_FACTOR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heating_scales_with_setting() {
        let totals = aggregate(&[Equipment::heater("HTR-01", 15.0, 45.0)]);
        assert!((totals.total_heating - 6.75).abs() < 1e-9);
        assert_eq!(totals.total_cooling, 0.0);
    }

    #[test]
    fn test_fan_cooling_uses_diameter() {
        let totals = aggregate(&[
            Equipment::fan("FAN-01", 120.0, 100.0),
            Equipment::fan("FAN-02", 120.0, 50.0),
        ]);
        assert!((totals.total_cooling - (102.0 + 51.0)).abs() < 1e-9);
    }

    #[test]
    fn test_inactive_equipment_is_ignored() {
        let totals = aggregate(&[
            Equipment::heater("HTR-01", 20.0, 100.0).switched_off(),
            Equipment::fan("FAN-01", 90.0, 100.0).switched_off(),
        ]);
        assert_eq!(totals, EquipmentTotals::default());
    }

    #[test]
    fn test_inlets_count_even_when_inactive() {
        let inlets = [
            Equipment::inlet("IN-01", 2.0, 50.0),
            Equipment::inlet("IN-02", 2.0, 50.0).switched_off(),
        ];
        // 2 * 2.5 / 100 * 50 = 2.5 per inlet
        let effect = ventilation_effect(&inlets, 12.0);
        assert!((effect - 0.6).abs() < 1e-9);
        assert_eq!(aggregate(&inlets), EquipmentTotals::default());
    }

    #[test]
    fn test_no_wind_no_ventilation() {
        let inlets = [Equipment::inlet("IN-01", 4.0, 100.0)];
        assert_eq!(ventilation_effect(&inlets, 0.0), 0.0);
    }
}
