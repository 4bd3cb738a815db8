use serde::{Deserialize, Serialize};

/// The static geometry of a livestock enclosure, in meters.
///
/// Dimensions are expected to be strictly positive. The computational core does not
/// validate them; callers that accept user input should go through the simulation builder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enclosure {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

impl Enclosure {
    pub fn new(length: f64, width: f64, height: f64) -> Self {
        Self { length, width, height }
    }

    /// Air volume of the enclosure in m³.
    pub fn volume(&self) -> f64 {
        self.length * self.width * self.height
    }

    /// Total surface of floor, ceiling and walls in m².
    pub fn surface_area(&self) -> f64 {
        2.0 * (self.length * self.width + self.length * self.height + self.width * self.height)
    }
}

/// Outside conditions at the time of a simulation.
///
/// `wind_speed` is taken as supplied by the weather provider; the simulator only scales it
/// by fixed factors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSnapshot {
    pub outside_temp: f64,
    pub outside_humidity: f64,
    #[serde(default)]
    pub wind_speed: f64,
}

impl WeatherSnapshot {
    pub fn new(outside_temp: f64, outside_humidity: f64, wind_speed: f64) -> Self {
        Self {
            outside_temp,
            outside_humidity,
            wind_speed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enclosure_geometry() {
        let house = Enclosure::new(24.0, 12.0, 3.5);
        assert!((house.volume() - 1008.0).abs() < 1e-9);
        assert!((house.surface_area() - 828.0).abs() < 1e-9);
    }

    #[test]
    fn test_weather_wind_defaults_to_zero() {
        let weather: WeatherSnapshot =
            serde_json::from_str(r#"{"outsideTemp": 18.5, "outsideHumidity": 70}"#).unwrap();
        assert_eq!(weather.wind_speed, 0.0);
        assert_eq!(weather.outside_temp, 18.5);
    }
}
