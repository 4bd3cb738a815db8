use crate::{
    environment::{Enclosure, WeatherSnapshot},
    equipment::Equipment,
    flock::Flock,
};
use serde::{Deserialize, Serialize};

/// One enclosure together with its equipment inventory, current weather and flock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub scenario_id: String,
    pub scenario_name: String,
    pub enclosure: Enclosure,
    #[serde(default)]
    pub equipment: Vec<Equipment>,
    pub weather: WeatherSnapshot,
    pub flock: Flock,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioFile {
    pub schema_version: String,
    pub scenarios: Vec<Scenario>,
}
