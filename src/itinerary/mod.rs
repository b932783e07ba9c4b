//! Itinerary planning
//!
//! Points of interest are split into day buckets by 1-D k-means on their
//! distance from the city centre, ranked by rating inside each bucket, and
//! the top few become that day's activities.

pub mod kmeans;
pub mod service;

use tracing::{debug, instrument};

use crate::config::{MAX_ACTIVITIES_PER_DAY, PlannerConfig};
use crate::models::{DayPlan, PointOfInterest};
use crate::{AssistantError, Result};
use kmeans::KMeansParams;

pub use service::ItineraryService;

#[derive(Debug, Clone, Default)]
pub struct ItineraryPlanner {
    settings: PlannerConfig,
}

impl ItineraryPlanner {
    #[must_use]
    pub fn new(settings: PlannerConfig) -> Self {
        Self { settings }
    }

    #[must_use]
    pub fn settings(&self) -> &PlannerConfig {
        &self.settings
    }

    /// Build one [`DayPlan`] per day.
    ///
    /// Cluster `i` becomes day `i + 1`, nearest cluster first. When there are
    /// fewer clusters than days the trailing days have no activities.
    ///
    /// # Errors
    /// Returns a validation error when `days` is zero or above `max_days`.
    #[instrument(level = "debug", skip(self, points, weather_summary), fields(points = points.len()))]
    pub fn plan(
        &self,
        points: &[PointOfInterest],
        days: u32,
        weather_summary: &str,
    ) -> Result<Vec<DayPlan>> {
        self.check_days(days)?;

        if points.is_empty() {
            debug!("No points of interest, returning empty days");
            return Ok((1..=days)
                .map(|day| DayPlan::empty(day, weather_summary))
                .collect());
        }

        let day_count = days as usize;
        let distances: Vec<f64> = points.iter().map(|p| p.distance).collect();
        let clustering = kmeans::fit(
            &distances,
            &KMeansParams {
                clusters: day_count.min(points.len()),
                seed: self.settings.seed,
                restarts: self.settings.restarts,
                max_iterations: self.settings.max_iterations,
                tolerance: self.settings.tolerance,
            },
        );
        debug!(
            clusters = clustering.cluster_count(),
            inertia = clustering.inertia,
            "Clustered points of interest"
        );

        let mut buckets: Vec<Vec<&PointOfInterest>> = vec![Vec::new(); day_count];
        for (point, &label) in points.iter().zip(&clustering.labels) {
            buckets[label].push(point);
        }

        let plans = buckets
            .into_iter()
            .zip(1..=days)
            .map(|(bucket, day)| self.day_plan(day, bucket, weather_summary))
            .collect();

        Ok(plans)
    }

    /// Reject trip lengths outside `1..=max_days`
    pub fn check_days(&self, days: u32) -> Result<()> {
        if days == 0 {
            return Err(AssistantError::validation(
                "Trip length must be at least one day",
            ));
        }
        if days > self.settings.max_days {
            return Err(AssistantError::validation(format!(
                "Trip length cannot exceed {} days",
                self.settings.max_days
            )));
        }
        Ok(())
    }

    fn day_plan(&self, day: u32, mut bucket: Vec<&PointOfInterest>, weather_summary: &str) -> DayPlan {
        if bucket.is_empty() {
            return DayPlan::empty(day, weather_summary);
        }

        // stable: equal ratings keep their input order
        bucket.sort_by(|a, b| b.rating.total_cmp(&a.rating));

        DayPlan {
            day_index: day,
            activities: bucket
                .iter()
                .take(self.settings.max_activities_per_day.min(MAX_ACTIVITIES_PER_DAY))
                .map(|p| p.activity_label())
                .collect(),
            weather_summary: weather_summary.to_string(),
        }
    }
}

/// Plan with the default planner settings.
///
/// # Errors
/// Returns a validation error when `days` is zero.
pub fn plan(points: &[PointOfInterest], days: u32, weather_summary: &str) -> Result<Vec<DayPlan>> {
    ItineraryPlanner::default().plan(points, days, weather_summary)
}
