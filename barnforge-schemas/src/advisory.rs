use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity class of an advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdvisoryKind {
    Warning,
    Info,
    Success,
}

/// Machine-readable action code attached to every advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisoryAction {
    TemperatureLow,
    TemperatureHigh,
    TemperatureGood,
    HumidityLow,
    HumidityHigh,
    OptimizeEnergy,
    OptimizeFans,
    ActivateHeating,
}

impl AdvisoryAction {
    pub fn code(&self) -> &'static str {
        match self {
            AdvisoryAction::TemperatureLow => "temperature_low",
            AdvisoryAction::TemperatureHigh => "temperature_high",
            AdvisoryAction::TemperatureGood => "temperature_good",
            AdvisoryAction::HumidityLow => "humidity_low",
            AdvisoryAction::HumidityHigh => "humidity_high",
            AdvisoryAction::OptimizeEnergy => "optimize_energy",
            AdvisoryAction::OptimizeFans => "optimize_fans",
            AdvisoryAction::ActivateHeating => "activate_heating",
        }
    }

    /// True for the three mutually exclusive temperature verdicts.
    pub fn is_temperature_verdict(&self) -> bool {
        matches!(
            self,
            AdvisoryAction::TemperatureLow | AdvisoryAction::TemperatureHigh | AdvisoryAction::TemperatureGood
        )
    }
}

impl fmt::Display for AdvisoryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A single generated climate recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advisory {
    #[serde(rename = "type")]
    pub kind: AdvisoryKind,
    pub title: String,
    pub message: String,
    pub action: AdvisoryAction,
}

impl Advisory {
    pub fn new(kind: AdvisoryKind, title: &str, message: String, action: AdvisoryAction) -> Self {
        Self {
            kind,
            title: title.to_string(),
            message,
            action,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advisory_serializes_flat() {
        let advisory = Advisory::new(
            AdvisoryKind::Warning,
            "Heating required",
            "No heater is running".to_string(),
            AdvisoryAction::ActivateHeating,
        );
        let value = serde_json::to_value(&advisory).unwrap();
        assert_eq!(value["type"], "warning");
        assert_eq!(value["action"], "activate_heating");
        assert_eq!(value["title"], "Heating required");
    }

    #[test]
    fn test_code_matches_serde_name() {
        let action = AdvisoryAction::OptimizeFans;
        let serialized = serde_json::to_string(&action).unwrap();
        assert_eq!(serialized, format!("\"{}\"", action.code()));
        assert!(!action.is_temperature_verdict());
        assert!(AdvisoryAction::TemperatureGood.is_temperature_verdict());
    }
}
