use thiserror::Error;

#[derive(Debug, Error)]
pub enum BarnforgeError {
    #[error("Enclosure geometry is missing")]
    EnclosureNotDefined,

    #[error("Weather snapshot is missing")]
    WeatherNotDefined,

    #[error("Invalid enclosure: {0}")]
    InvalidEnclosure(String),

    #[error("Equipment '{0}' has setting {1}%, expected a value between 0 and 100")]
    InvalidSetting(String, f64),

    #[error("Scenario '{0}' not found")]
    ScenarioNotFound(String),

    #[error("I/O error for file '{0}': {1}")]
    FileIO(String, #[source] std::io::Error),

    #[error("Failed to parse YAML from '{0}': {1}")]
    YamlParsing(String, #[source] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParsing(#[from] serde_json::Error),

    #[error("Failed to process CSV file '{0}': {1}")]
    CsvError(String, #[source] csv::Error),

    #[error("An error occurred during logging: {0}")]
    LoggingError(#[from] anyhow::Error),
}
