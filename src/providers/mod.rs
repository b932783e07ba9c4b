//! Upstream data providers
//!
//! The assistant talks to flight, weather and points-of-interest services only
//! through these traits. Failures are reported as
//! [`AssistantError::Provider`](crate::AssistantError::Provider) so callers can
//! name the failing service.

pub mod catalog;
pub mod fixed;

use async_trait::async_trait;

use crate::Result;
use crate::models::{FlightOffer, PointOfInterest, WeatherReport};

pub use catalog::PlaceCatalog;
pub use fixed::{FixedWeather, NoFlights};

/// Source of points of interest around a city centre
#[async_trait]
pub trait PoiProvider: Send + Sync {
    /// Up to `limit` points of interest, possibly none
    async fn top_pois(&self, city: &str, limit: usize) -> Result<Vec<PointOfInterest>>;
}

/// Source of current weather conditions
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current(&self, city: &str) -> Result<WeatherReport>;
}

/// Source of flight offers
#[async_trait]
pub trait FlightProvider: Send + Sync {
    /// Cheapest offer for the route on `date` (DD/MM/YYYY), `None` when nothing flies
    async fn cheapest(&self, origin: &str, destination: &str, date: &str) -> Result<Option<FlightOffer>>;
}
