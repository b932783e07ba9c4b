//! Current weather conditions as reported by a weather provider

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherReport {
    /// City name as resolved by the provider
    pub city: String,
    /// Country code (ISO 3166-1 alpha-2)
    pub country: Option<String>,
    /// Temperature in Celsius
    pub temperature: f64,
    /// Human-readable description of weather conditions
    pub description: String,
}

impl WeatherReport {
    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{:.1}°C", self.temperature)
    }

    /// One-line annotation attached to every day of an itinerary
    #[must_use]
    pub fn summary(&self) -> String {
        format!("{}, {}", self.format_temperature(), self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary() {
        let report = WeatherReport {
            city: "Lisbon".to_string(),
            country: Some("PT".to_string()),
            temperature: 21.0,
            description: "clear sky".to_string(),
        };
        assert_eq!(report.summary(), "21.0°C, clear sky");
    }
}
