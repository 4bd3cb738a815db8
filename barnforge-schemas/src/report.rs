use crate::advisory::{Advisory, AdvisoryAction};
use serde::{Deserialize, Serialize};

/// Output of one climate simulation. Computed fresh on every call, never stored by the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    /// °C, one decimal.
    pub inside_temp: f64,
    /// Relative humidity in %, one decimal.
    pub inside_humidity: f64,
    /// kW delivered by active heaters.
    pub total_heating: f64,
    /// Fan cooling capacity units.
    pub total_cooling: f64,
    /// °C removed by inlet ventilation, one decimal.
    pub ventilation_effect: f64,
    pub recommendations: Vec<Advisory>,
    pub volume: f64,
    pub surface_area: f64,
}

impl SimulationResult {
    pub fn has_advisory(&self, action: AdvisoryAction) -> bool {
        self.recommendations.iter().any(|a| a.action == action)
    }

    /// The temperature verdict among the recommendations.
    pub fn temperature_verdict(&self) -> Option<AdvisoryAction> {
        self.recommendations
            .iter()
            .map(|a| a.action)
            .find(AdvisoryAction::is_temperature_verdict)
    }
}

/// Weight and feed-efficiency projection for a flock.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthProjection {
    /// Grams, 7 days from now.
    pub projected_weight_7d: f64,
    /// Grams, 14 days from now.
    pub projected_weight_14d: f64,
    /// Percent above (+) or below (-) the reference growth curve.
    pub growth_rate_vs_standard: f64,
    /// Feed conversion ratio.
    pub fcr: f64,
    pub environmental_factor: f64,
}
