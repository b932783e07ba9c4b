//! Travel assistant - itinerary planning and travel query handling
//!
//! This library groups points of interest into day-by-day itineraries,
//! classifies free-text travel queries, and answers them through pluggable
//! flight, weather and points-of-interest providers with per-user sessions.

pub mod api;
pub mod assistant;
pub mod cli;
pub mod config;
pub mod error;
pub mod intent;
pub mod itinerary;
pub mod models;
pub mod providers;
pub mod recommender;
pub mod session;
pub mod web;

// Re-export core types for public API
pub use assistant::{AssistantResponse, Providers, TravelAssistant};
pub use config::AppConfig;
pub use error::AssistantError;
pub use intent::{IntentClassifier, RuleClassifier, TravelRequest};
pub use itinerary::{ItineraryPlanner, ItineraryService, plan};
pub use models::{DayPlan, PointOfInterest, Session, WeatherReport};
pub use session::SessionRepository;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, AssistantError>;
