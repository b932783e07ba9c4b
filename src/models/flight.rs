//! Flight offer returned by a flight provider

use serde::{Deserialize, Serialize};

/// Cheapest offer found for a route and date
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FlightOffer {
    /// Price in USD
    pub price: f64,
    pub origin_city: String,
    /// IATA code
    pub origin_airport: String,
    pub dest_city: String,
    /// IATA code
    pub dest_airport: String,
    /// Local departure time as reported by the provider
    pub departure: Option<String>,
    pub airline: Option<String>,
}
