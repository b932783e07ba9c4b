//! Day plan model produced by the itinerary planner

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Activity text used for a day that received no points of interest
pub const NO_ACTIVITIES: &str = "No activities available";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    /// 1-based day number
    pub day_index: u32,
    pub activities: Vec<String>,
    pub weather_summary: String,
}

impl DayPlan {
    /// A day with nothing scheduled
    #[must_use]
    pub fn empty(day_index: u32, weather_summary: &str) -> Self {
        Self {
            day_index,
            activities: vec![NO_ACTIVITIES.to_string()],
            weather_summary: weather_summary.to_string(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.activities.len() == 1 && self.activities[0] == NO_ACTIVITIES
    }
}

impl Display for DayPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Day {} ({})", self.day_index, self.weather_summary)?;
        for activity in &self.activities {
            writeln!(f, "   - {activity}")?;
        }
        Ok(())
    }
}
