//! Providers that answer without any upstream service

use async_trait::async_trait;

use super::{FlightProvider, WeatherProvider};
use crate::Result;
use crate::models::{FlightOffer, WeatherReport};

/// Reports the same conditions for every city
#[derive(Debug, Clone)]
pub struct FixedWeather {
    pub temperature: f64,
    pub description: String,
}

impl FixedWeather {
    #[must_use]
    pub fn new(temperature: f64, description: impl Into<String>) -> Self {
        Self {
            temperature,
            description: description.into(),
        }
    }
}

#[async_trait]
impl WeatherProvider for FixedWeather {
    async fn current(&self, city: &str) -> Result<WeatherReport> {
        Ok(WeatherReport {
            city: city.to_string(),
            country: None,
            temperature: self.temperature,
            description: self.description.clone(),
        })
    }
}

/// Flight provider used when no flight search is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFlights;

#[async_trait]
impl FlightProvider for NoFlights {
    async fn cheapest(&self, _origin: &str, _destination: &str, _date: &str) -> Result<Option<FlightOffer>> {
        Ok(None)
    }
}
