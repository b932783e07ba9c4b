//! Fetch-then-plan orchestration for a city itinerary

use std::sync::Arc;

use tracing::{info, instrument};

use super::ItineraryPlanner;
use crate::models::DayPlan;
use crate::providers::{PoiProvider, WeatherProvider};
use crate::Result;

/// Fetches weather and points of interest for a city and plans the days
pub struct ItineraryService {
    planner: ItineraryPlanner,
    pois: Arc<dyn PoiProvider>,
    weather: Arc<dyn WeatherProvider>,
}

impl ItineraryService {
    pub fn new(planner: ItineraryPlanner, pois: Arc<dyn PoiProvider>, weather: Arc<dyn WeatherProvider>) -> Self {
        Self {
            planner,
            pois,
            weather,
        }
    }

    /// Weather is fetched once for the whole trip; `days * pois_per_day`
    /// points are requested so every day has something to choose from.
    ///
    /// # Errors
    /// Validation error for `days` outside `1..=max_days`, provider errors from either lookup.
    #[instrument(skip(self))]
    pub async fn generate(&self, city: &str, days: u32) -> Result<Vec<DayPlan>> {
        self.planner.check_days(days)?;

        let limit = days as usize * self.planner.settings().pois_per_day;
        let (report, pois) = futures::try_join!(
            self.weather.current(city),
            self.pois.top_pois(city, limit)
        )?;

        info!(
            "Planning {} days in {} from {} points of interest",
            days,
            city,
            pois.len()
        );
        self.planner.plan(&pois, days, &report.summary())
    }
}
