//! Applies the generated advisories back onto equipment settings.
//!
//! The advisory generator only classifies a climate. This module closes the loop: it nudges
//! heater, fan and inlet settings in fixed steps in the direction the temperature verdict asks
//! for, re-simulates, and repeats until the climate is on target or nothing more can change.

use barnforge_core::compute_climate;
use barnforge_schemas::{
    advisory::AdvisoryAction,
    equipment::{Equipment, EquipmentSpec},
    file_formats::Scenario,
    report::SimulationResult,
};

pub const SETTING_STEP: f64 = 10.0;
pub const MAX_ITERATIONS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Warmer,
    Cooler,
}

/// A single setting change made while tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct Adjustment {
    pub iteration: usize,
    pub equipment_id: String,
    pub from_setting: f64,
    pub to_setting: f64,
    pub is_active: bool,
}

#[derive(Debug, Clone)]
pub struct TuningOutcome {
    pub equipment: Vec<Equipment>,
    pub result: SimulationResult,
    pub adjustments: Vec<Adjustment>,
    pub iterations: usize,
}

impl TuningOutcome {
    pub fn reached_target(&self) -> bool {
        self.result.has_advisory(AdvisoryAction::TemperatureGood)
    }
}

/// Tunes the scenario's equipment towards the target band for its flock age.
pub fn apply_suggestions(scenario: &Scenario) -> TuningOutcome {
    let mut equipment = scenario.equipment.clone();
    let mut adjustments = Vec::new();
    let mut iterations = 0;

    let simulate = |equipment: &[Equipment]| {
        compute_climate(
            &scenario.enclosure,
            equipment,
            scenario.weather.outside_temp,
            scenario.weather.outside_humidity,
            scenario.weather.wind_speed,
            Some(scenario.flock.current_age),
        )
    };

    let mut result = simulate(equipment.as_slice());
    while iterations < MAX_ITERATIONS {
        let direction = match result.temperature_verdict() {
            Some(AdvisoryAction::TemperatureLow) => Direction::Warmer,
            Some(AdvisoryAction::TemperatureHigh) => Direction::Cooler,
            _ => break,
        };

        iterations += 1;
        let mut changed = false;
        for item in equipment.iter_mut() {
            let from_setting = item.current_setting;
            if nudge(item, direction) {
                changed = true;
                adjustments.push(Adjustment {
                    iteration: iterations,
                    equipment_id: item.equipment_id.clone(),
                    from_setting,
                    to_setting: item.current_setting,
                    is_active: item.is_active,
                });
            }
        }
        if !changed {
            break;
        }
        result = simulate(equipment.as_slice());
    }

    TuningOutcome {
        equipment,
        result,
        adjustments,
        iterations,
    }
}

/// Moves one item a step in the given direction. Returns whether anything changed.
fn nudge(item: &mut Equipment, direction: Direction) -> bool {
    let raise = match (item.specification, direction) {
        (EquipmentSpec::Heater { .. }, Direction::Warmer) => true,
        (EquipmentSpec::Heater { .. }, Direction::Cooler) => false,
        (EquipmentSpec::Fan { .. } | EquipmentSpec::Inlet { .. }, Direction::Warmer) => false,
        (EquipmentSpec::Fan { .. } | EquipmentSpec::Inlet { .. }, Direction::Cooler) => true,
    };
    let before = (item.is_active, item.current_setting);
    // Inlets are passive, their active flag is left alone.
    let switchable = !item.is_inlet();

    if raise {
        if switchable && !item.is_active {
            item.is_active = true;
            if item.current_setting <= 0.0 {
                item.current_setting = SETTING_STEP;
            }
        } else {
            item.current_setting = (item.current_setting + SETTING_STEP).min(100.0);
        }
    } else if !switchable || item.is_active {
        item.current_setting = (item.current_setting - SETTING_STEP).max(0.0);
        if switchable && item.current_setting <= 0.0 {
            item.is_active = false;
        }
    }

    before != (item.is_active, item.current_setting)
}
