//! Destination recommendations by travel style

use rand::RngExt;
use serde::Serialize;
use tracing::debug;

use crate::{AssistantError, Result};

struct TravelStyle {
    name: &'static str,
    keywords: &'static [&'static str],
    destinations: &'static [&'static str],
}

const STYLES: &[TravelStyle] = &[
    TravelStyle {
        name: "beach",
        keywords: &["beach", "sea", "sun", "ocean", "island", "swim", "surf", "tropical", "coast"],
        destinations: &["Maldives", "Hawaii", "Cancun", "Bali", "Ibiza"],
    },
    TravelStyle {
        name: "adventure",
        keywords: &["adventure", "hik", "trek", "climb", "mountain", "extreme", "explor", "raft"],
        destinations: &["Patagonia", "Swiss Alps", "Peru", "Nepal", "New Zealand"],
    },
    TravelStyle {
        name: "culture",
        keywords: &["cultur", "histor", "museum", "art", "architecture", "food", "cuisine", "temple"],
        destinations: &["Rome", "Kyoto", "Paris", "Cairo", "Istanbul"],
    },
    TravelStyle {
        name: "nature",
        keywords: &["nature", "natural", "wildlife", "forest", "park", "animal", "safari", "outdoor", "lake"],
        destinations: &["Amazon Rainforest", "Yosemite", "Banff National Park", "Kruger National Park"],
    },
    TravelStyle {
        name: "luxury",
        keywords: &["luxur", "resort", "spa", "fancy", "exclusive", "yacht", "honeymoon", "five-star"],
        destinations: &["Dubai", "Monaco", "Santorini", "Bora Bora", "Singapore"],
    },
    TravelStyle {
        name: "budget",
        keywords: &["budget", "cheap", "affordable", "inexpensive", "low-cost", "hostel", "backpack"],
        destinations: &["Thailand", "Vietnam", "Mexico", "Portugal", "Poland"],
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub category: String,
    pub destination: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Recommender;

impl Recommender {
    /// Travel styles a preference can map to
    #[must_use]
    pub fn available_categories(&self) -> Vec<&'static str> {
        STYLES.iter().map(|s| s.name).collect()
    }

    /// Style whose keywords best match the preference. Ties go to the style
    /// listed first.
    ///
    /// # Errors
    /// Validation error when no keyword matches.
    pub fn best_category(&self, preference: &str) -> Result<&'static str> {
        let preference = preference.to_lowercase();
        let tokens: Vec<&str> = preference
            .split(|c: char| !(c.is_alphanumeric() || c == '-'))
            .filter(|t| !t.is_empty())
            .collect();

        let mut best: Option<(&TravelStyle, usize)> = None;
        for style in STYLES {
            let score = tokens
                .iter()
                .filter(|token| style.keywords.iter().any(|k| token.starts_with(k)))
                .count();
            debug!(style = style.name, score, "Scored travel style");
            if score > 0 && best.is_none_or(|(_, top)| score > top) {
                best = Some((style, score));
            }
        }

        best.map(|(style, _)| style.name).ok_or_else(|| {
            AssistantError::validation(format!(
                "No travel style matches '{preference}'. Try one of: {}",
                self.available_categories().join(", ")
            ))
        })
    }

    /// Pick a destination for the preference.
    ///
    /// # Errors
    /// Validation error when the preference matches no travel style.
    pub fn recommend_destination<R: RngExt>(&self, preference: &str, rng: &mut R) -> Result<Recommendation> {
        let category = self.best_category(preference)?;
        let destinations = STYLES
            .iter()
            .find(|s| s.name == category)
            .map(|s| s.destinations)
            .unwrap_or_default();
        let destination = destinations
            .get(rng.random_range(0..destinations.len().max(1)))
            .ok_or_else(|| AssistantError::general(format!("No destinations for '{category}'")))?;

        Ok(Recommendation {
            category: category.to_string(),
            destination: (*destination).to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rstest::rstest;

    #[rstest]
    #[case("relaxing on a tropical beach", "beach")]
    #[case("Hiking and climbing mountains", "adventure")]
    #[case("museums, history and local cuisine", "culture")]
    #[case("wildlife safari", "nature")]
    #[case("a luxurious honeymoon resort", "luxury")]
    #[case("cheap hostels please", "budget")]
    fn test_best_category(#[case] preference: &str, #[case] expected: &str) {
        assert_eq!(Recommender.best_category(preference).unwrap(), expected);
    }

    #[test]
    fn test_tie_goes_to_first_listed_style() {
        // one beach keyword, one budget keyword
        assert_eq!(Recommender.best_category("cheap island").unwrap(), "beach");
    }

    #[test]
    fn test_no_match_lists_categories() {
        let err = Recommender.best_category("something").unwrap_err();
        assert!(err.to_string().contains("beach, adventure, culture, nature, luxury, budget"));
    }

    #[test]
    fn test_recommend_destination_from_category() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let pick = Recommender
                .recommend_destination("sunny beach holiday", &mut rng)
                .unwrap();
            assert_eq!(pick.category, "beach");
            assert!(["Maldives", "Hawaii", "Cancun", "Bali", "Ibiza"].contains(&pick.destination.as_str()));
        }
    }

    #[test]
    fn test_available_categories() {
        assert_eq!(Recommender.available_categories().len(), 6);
    }
}
