use crate::aggregator::EquipmentTotals;

/// Unrounded intermediate values of one climate simulation, step by step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClimateState {
    pub outside_temp: f64,
    pub outside_humidity: f64,
    pub totals: EquipmentTotals,
    /// °C added by heaters.
    pub heating_rise: f64,
    /// °C removed by fans. Never more than the heating rise.
    pub cooling_effect: f64,
    /// °C removed by inlet ventilation.
    pub ventilation_effect: f64,
    pub inside_temp: f64,
    pub inside_humidity: f64,
}

impl ClimateState {
    /// Whether the house ended up warmer than outside, which is when humidity is corrected.
    pub fn is_heated(&self) -> bool {
        self.inside_temp > self.outside_temp
    }
}
