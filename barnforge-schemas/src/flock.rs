use serde::{Deserialize, Serialize};

/// Current state of the flock housed in an enclosure, as kept by the record-keeping side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flock {
    /// Age in days since placement.
    pub current_age: u32,
    /// Average live weight in grams.
    pub average_weight: f64,
    /// Birds currently alive.
    #[serde(default)]
    pub chick_count: u32,
    /// Birds placed at day 0.
    #[serde(default)]
    pub initial_chick_count: u32,
}

impl Flock {
    pub fn new(current_age: u32, average_weight: f64) -> Self {
        Self {
            current_age,
            average_weight,
            chick_count: 0,
            initial_chick_count: 0,
        }
    }

    pub fn with_counts(mut self, chick_count: u32, initial_chick_count: u32) -> Self {
        self.chick_count = chick_count;
        self.initial_chick_count = initial_chick_count;
        self
    }
}
