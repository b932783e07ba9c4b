//! Point-of-interest model consumed by the itinerary planner

use serde::{Deserialize, Serialize};

/// A named place with category, distance and rating attributes.
///
/// Records come from an external provider and are never mutated by the planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    pub name: String,
    /// Comma separated kinds as reported by the provider
    #[serde(default, alias = "categories", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Metres from the reference coordinate
    pub distance: f64,
    #[serde(default)]
    pub rating: f64,
}

impl PointOfInterest {
    #[must_use]
    pub fn new(name: impl Into<String>, category: Option<&str>, distance: f64, rating: f64) -> Self {
        Self {
            name: name.into(),
            category: category.map(str::to_string),
            distance,
            rating,
        }
    }

    /// Render as an itinerary activity, e.g. `"Tower (historic)"`
    #[must_use]
    pub fn activity_label(&self) -> String {
        format!("{} ({})", self.name, self.category.as_deref().unwrap_or("N/A"))
    }
}
