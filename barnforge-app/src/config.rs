use anyhow::{Context, Result};
use barnforge_core::error::BarnforgeError;
use barnforge_schemas::{
    environment::WeatherSnapshot,
    file_formats::{Scenario, ScenarioFile},
};
use serde::Deserialize;
use std::{collections::HashMap, fs, path::Path};

/// Every scenario found in a directory of YAML scenario files, keyed by scenario id.
pub struct ScenarioLibrary {
    pub scenarios: HashMap<String, Scenario>,
}

impl ScenarioLibrary {
    /// Loads all scenario files from the specified directory.
    pub fn load(base_path: &str) -> Result<Self> {
        println!("Loading scenarios from '{}'...", base_path);

        let scenarios = load_yaml_files_into_map(
            Path::new(base_path),
            |file: ScenarioFile| file.scenarios,
            |item: &Scenario| item.scenario_id.clone(),
        )?;

        println!("Loaded {} scenario(s).", scenarios.len());
        Ok(Self { scenarios })
    }

    pub fn get(&self, scenario_id: &str) -> Result<&Scenario, BarnforgeError> {
        self.scenarios
            .get(scenario_id)
            .ok_or_else(|| BarnforgeError::ScenarioNotFound(scenario_id.to_string()))
    }

    /// Scenarios ordered by id, for stable reports.
    pub fn sorted(&self) -> Vec<&Scenario> {
        let mut scenarios: Vec<&Scenario> = self.scenarios.values().collect();
        scenarios.sort_by(|a, b| a.scenario_id.cmp(&b.scenario_id));
        scenarios
    }
}

/// One row of a weather series CSV.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct WeatherReading {
    pub hour: u32,
    pub outside_temp: f64,
    pub outside_humidity: f64,
    #[serde(default)]
    pub wind_speed: f64,
}

impl WeatherReading {
    pub fn snapshot(&self) -> WeatherSnapshot {
        WeatherSnapshot::new(self.outside_temp, self.outside_humidity, self.wind_speed)
    }
}

/// Reads an hourly weather series, ordered by hour.
pub fn load_weather_series<P: AsRef<Path>>(path: P) -> Result<Vec<WeatherReading>> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open weather series {:?}", path))?;

    let mut readings = Vec::new();
    for record in reader.deserialize() {
        let reading: WeatherReading =
            record.with_context(|| format!("Failed to parse weather series {:?}", path))?;
        readings.push(reading);
    }
    readings.sort_by_key(|r| r.hour);
    Ok(readings)
}

/// Generic helper to load all YAML files in a directory into a HashMap.
fn load_yaml_files_into_map<P, F, E, T, K>(
    dir_path: P,
    extract_vec: E,
    get_key: K,
) -> Result<HashMap<String, T>>
where
    P: AsRef<Path>,
    F: for<'de> serde::Deserialize<'de>, // The file wrapper struct (e.g., ScenarioFile)
    E: Fn(F) -> Vec<T>,                  // A closure to extract the Vec<T> from the wrapper
    K: Fn(&T) -> String,                 // A closure to get the key for the map from an item T
{
    let mut map = HashMap::new();
    for entry in fs::read_dir(dir_path.as_ref())
        .with_context(|| format!("Failed to read directory: {:?}", dir_path.as_ref()))?
    {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && path.extension().map_or(false, |s| s == "yaml" || s == "yml") {
            let file_name = path.display().to_string();
            let content = fs::read_to_string(&path)
                .map_err(|e| BarnforgeError::FileIO(file_name.clone(), e))?;
            let file_wrapper: F = serde_yaml::from_str(&content)
                .map_err(|e| BarnforgeError::YamlParsing(file_name, e))?;

            for item in extract_vec(file_wrapper) {
                map.insert(get_key(&item), item);
            }
        }
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use barnforge_schemas::equipment::EquipmentSpec;

    fn scratch_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("barnforge_{}_{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_scenarios_from_directory() {
        let dir = scratch_dir("scenarios");
        fs::write(
            dir.join("houses.yaml"),
            r#"
schemaVersion: "1.0"
scenarios:
  - scenarioId: house-2
    scenarioName: North house
    enclosure: { length: 24, width: 12, height: 3.5 }
    equipment:
      - equipmentId: HTR-01
        isActive: true
        currentSetting: 45
        specification: { type: heater, power: 15 }
      - equipmentId: IN-01
        currentSetting: 20
        specification: { type: inlet }
    weather: { outsideTemp: 22, outsideHumidity: 45, windSpeed: 12 }
    flock: { currentAge: 18, averageWeight: 620, chickCount: 9800, initialChickCount: 10000 }
"#,
        )
        .unwrap();
        fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let library = ScenarioLibrary::load(dir.to_str().unwrap()).unwrap();
        let scenario = library.get("house-2").unwrap();
        assert_eq!(scenario.equipment.len(), 2);
        assert_eq!(scenario.equipment[1].specification, EquipmentSpec::Inlet { surface: 0.0 });
        assert_eq!(scenario.flock.current_age, 18);
        assert!(matches!(library.get("house-9"), Err(BarnforgeError::ScenarioNotFound(_))));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_malformed_scenario_file_is_a_yaml_error() {
        let dir = scratch_dir("malformed");
        fs::write(dir.join("broken.yaml"), "schemaVersion: \"1.0\"\nscenarios: [ {scenarioId: ").unwrap();

        let err = match ScenarioLibrary::load(dir.to_str().unwrap()) {
            Err(err) => err,
            Ok(_) => panic!("Expected a YAML parsing error"),
        };
        match err.downcast_ref::<BarnforgeError>() {
            Some(BarnforgeError::YamlParsing(file, _)) => assert!(file.ends_with("broken.yaml")),
            other => panic!("Expected YamlParsing, got {:?}", other),
        }

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_weather_series_sorted_by_hour() {
        let dir = scratch_dir("weather");
        let path = dir.join("day.csv");
        fs::write(
            &path,
            "hour,outside_temp,outside_humidity,wind_speed\n2,24.0,50,3\n0,18.5,70,1\n1,21.0,60,2\n",
        )
        .unwrap();

        let series = load_weather_series(&path).unwrap();
        assert_eq!(series.iter().map(|r| r.hour).collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(series[0].snapshot(), WeatherSnapshot::new(18.5, 70.0, 1.0));

        fs::remove_dir_all(&dir).ok();
    }
}
