//! Offline points-of-interest provider backed by a JSON place catalog
//!
//! The catalog lists cities with their centre coordinates and the places
//! around them. Distances are computed from the city centre, so the records
//! handed to the planner look exactly like those of a radius search.

use std::path::Path;

use anyhow::{Context, Result as AnyResult};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

use super::PoiProvider;
use crate::models::{Location, PointOfInterest};
use crate::{AssistantError, Result};

const DEFAULT_RADIUS_M: f64 = 5000.0;

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogCity {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub places: Vec<CatalogPlace>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogPlace {
    pub name: String,
    #[serde(default, alias = "kinds")]
    pub category: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub rating: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaceCatalog {
    #[serde(default)]
    cities: Vec<CatalogCity>,
    /// Search radius around the city centre in metres
    #[serde(default = "default_radius")]
    radius_m: f64,
}

fn default_radius() -> f64 {
    DEFAULT_RADIUS_M
}

impl Default for PlaceCatalog {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl PlaceCatalog {
    #[must_use]
    pub fn new(cities: Vec<CatalogCity>) -> Self {
        Self {
            cities,
            radius_m: DEFAULT_RADIUS_M,
        }
    }

    #[must_use]
    pub fn with_radius(mut self, radius_m: f64) -> Self {
        self.radius_m = radius_m;
        self
    }

    /// Load a catalog from a JSON file
    pub fn load(path: impl AsRef<Path>) -> AnyResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read place catalog: {}", path.display()))?;
        let catalog = Self::from_json(&raw)
            .with_context(|| format!("Failed to parse place catalog: {}", path.display()))?;
        info!(
            "Loaded {} cities from place catalog {}",
            catalog.cities.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn from_json(raw: &str) -> AnyResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    fn find_city(&self, name: &str) -> Option<&CatalogCity> {
        let wanted = name.trim();
        self.cities
            .iter()
            .find(|city| city.name.eq_ignore_ascii_case(wanted))
    }

    /// Places within the search radius, nearest first
    fn places_near(&self, city: &CatalogCity) -> Vec<PointOfInterest> {
        let center = Location::new(city.latitude, city.longitude, city.name.clone());
        debug!(
            "Searching {:.0} m around {} ({})",
            self.radius_m,
            center.name,
            center.format_coordinates()
        );

        let mut nearby: Vec<PointOfInterest> = city
            .places
            .iter()
            .map(|place| {
                let location = Location::new(place.latitude, place.longitude, place.name.clone());
                PointOfInterest {
                    name: place.name.clone(),
                    category: place.category.clone(),
                    distance: center.distance_meters(&location),
                    rating: place.rating,
                }
            })
            .filter(|poi| poi.distance <= self.radius_m)
            .collect();

        nearby.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        nearby
    }
}

#[async_trait]
impl PoiProvider for PlaceCatalog {
    async fn top_pois(&self, city: &str, limit: usize) -> Result<Vec<PointOfInterest>> {
        let entry = self
            .find_city(city)
            .ok_or_else(|| AssistantError::provider("Tourism", format!("City '{city}' not found.")))?;

        let mut pois = self.places_near(entry);
        pois.truncate(limit);
        debug!("Found {} points of interest around {}", pois.len(), entry.name);
        Ok(pois)
    }
}
