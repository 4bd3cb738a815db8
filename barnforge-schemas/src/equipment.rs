use serde::{Deserialize, Serialize};

/// Variant-specific rating of a piece of climate-control equipment.
///
/// Each variant carries only the field relevant to it. Absent fields deserialize to `0.0`
/// so a sparse inventory record never fails to load.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EquipmentSpec {
    /// An extraction fan; `diameter` in cm.
    Fan {
        #[serde(default)]
        diameter: f64,
    },
    /// A space heater; `power` is the kW rating at full setting.
    Heater {
        #[serde(default)]
        power: f64,
    },
    /// An air inlet flap; `surface` is the opening area in m² when fully open.
    Inlet {
        #[serde(default)]
        surface: f64,
    },
}

/// A single piece of climate-control equipment installed in an enclosure.
///
/// This is the inventory record handed over by the equipment store. The simulation reads
/// it but never changes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    /// A unique, machine-readable identifier (e.g., "FAN-NORTH-01").
    pub equipment_id: String,
    /// A human-readable name for display purposes.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Whether the equipment is switched on. Inlets contribute regardless of this flag.
    #[serde(default)]
    pub is_active: bool,
    /// Current setting in percent, expected within `[0, 100]`. For inlets this is the opening.
    #[serde(default)]
    pub current_setting: f64,
    pub specification: EquipmentSpec,
}

impl Equipment {
    pub fn new(equipment_id: &str, specification: EquipmentSpec, is_active: bool, current_setting: f64) -> Self {
        Self {
            equipment_id: equipment_id.to_string(),
            display_name: None,
            is_active,
            current_setting,
            specification,
        }
    }

    pub fn fan(equipment_id: &str, diameter: f64, current_setting: f64) -> Self {
        Self::new(equipment_id, EquipmentSpec::Fan { diameter }, true, current_setting)
    }

    pub fn heater(equipment_id: &str, power: f64, current_setting: f64) -> Self {
        Self::new(equipment_id, EquipmentSpec::Heater { power }, true, current_setting)
    }

    pub fn inlet(equipment_id: &str, surface: f64, current_setting: f64) -> Self {
        Self::new(equipment_id, EquipmentSpec::Inlet { surface }, true, current_setting)
    }

    /// Returns a copy of this record with `is_active` cleared.
    pub fn switched_off(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// The setting as a fraction of full output.
    pub fn setting_fraction(&self) -> f64 {
        self.current_setting / 100.0
    }

    pub fn is_heater(&self) -> bool {
        matches!(self.specification, EquipmentSpec::Heater { .. })
    }

    pub fn is_inlet(&self) -> bool {
        matches!(self.specification, EquipmentSpec::Inlet { .. })
    }
}
