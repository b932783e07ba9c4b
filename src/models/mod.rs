//! Data models for the travel assistant
//!
//! This module contains the core domain models organized by concern:
//! - Location: Geographic coordinates for city centres and places
//! - Poi: Points of interest consumed by the itinerary planner
//! - Itinerary: Day plans produced by the planner
//! - Weather: Current conditions reported by a weather provider
//! - Flight: Cheapest-offer records from a flight provider
//! - Session: Per-user conversation state

pub mod flight;
pub mod itinerary;
pub mod location;
pub mod poi;
pub mod session;
pub mod weather;

// Re-export all public types for convenient access
pub use flight::FlightOffer;
pub use itinerary::DayPlan;
pub use location::Location;
pub use poi::PointOfInterest;
pub use session::{Exchange, Session};
pub use weather::WeatherReport;
