//! Query intent classification
//!
//! A free-text query is normalized and mapped onto a [`TravelRequest`]. The
//! shipped [`RuleClassifier`] is a pure keyword/pattern matcher; anything
//! smarter plugs in behind [`IntentClassifier`].

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Replacement text for a blank query
pub const EMPTY_QUERY: &str = "User provided an empty query.";

/// Trip length assumed when an itinerary request names none
pub const DEFAULT_TRIP_DAYS: u32 = 3;

const MAX_PLACE_WORDS: usize = 4;
const CLAUSE_PUNCTUATION: &[char] = &['?', '!', '.', ',', ';', ':'];

/// Words that end a place name
const STOP_WORDS: &[&str] = &[
    "for", "on", "from", "to", "in", "at", "today", "tomorrow", "tonight", "now", "please", "this",
    "next", "with", "and", "during", "like", "right", "over", "by",
];

/// Leading words that mean the phrase is not a place
const NOT_PLACES: &[&str] = &[
    "a", "an", "me", "my", "us", "our", "it", "you", "do", "see", "go", "there", "here", "that",
    "what", "some", "fly", "travel", "find", "book", "get", "know",
];

static DAYS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,2})[\s-]*days?\b").expect("valid days pattern"));

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d{1,2}/\d{1,2}/\d{4}|\d{4}-\d{2}-\d{2})\b").expect("valid date pattern")
});

/// A trimmed, lowercased, whitespace-collapsed query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedQuery(String);

impl NormalizedQuery {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[must_use]
pub fn normalize_query(raw: &str) -> NormalizedQuery {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        NormalizedQuery(EMPTY_QUERY.to_string())
    } else {
        NormalizedQuery(collapsed.to_lowercase())
    }
}

/// What the user asked for. Missing cities are filled from the session later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum TravelRequest {
    Flights {
        origin: Option<String>,
        destination: Option<String>,
        /// DD/MM/YYYY
        date: Option<String>,
    },
    Weather {
        city: Option<String>,
    },
    Tourism {
        city: Option<String>,
    },
    Recommendation {
        preference: String,
    },
    Itinerary {
        city: Option<String>,
        days: u32,
    },
    Unknown,
}

pub trait IntentClassifier: Send + Sync {
    fn classify(&self, query: &NormalizedQuery) -> TravelRequest;
}

/// Keyword classifier. Checked in order: itinerary, flights, weather,
/// recommendation, tourism, then a bare trip length ("3 days in rome").
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleClassifier;

impl IntentClassifier for RuleClassifier {
    fn classify(&self, query: &NormalizedQuery) -> TravelRequest {
        let text = query.as_str();
        let words: Vec<&str> = text.split_whitespace().collect();
        let mentions = |stems: &[&str]| {
            words.iter().any(|w| {
                let w = w.trim_matches(CLAUSE_PUNCTUATION);
                stems.iter().any(|s| w.starts_with(s))
            })
        };
        let has_word = |candidates: &[&str]| {
            words
                .iter()
                .any(|w| candidates.contains(&w.trim_matches(CLAUSE_PUNCTUATION)))
        };
        let says = |phrases: &[&str]| phrases.iter().any(|p| text.contains(p));

        let place = || extract_place(&words, &["in", "to", "for", "at", "around", "visit", "visiting"]);

        if has_word(&["itinerary", "itineraries", "schedule", "plan", "planning"]) {
            return TravelRequest::Itinerary {
                city: place(),
                days: trip_length(text).unwrap_or(DEFAULT_TRIP_DAYS),
            };
        }

        if mentions(&["flight", "fly", "flying", "airfare", "plane"]) {
            return TravelRequest::Flights {
                origin: extract_place(&words, &["from"]),
                destination: extract_place(&words, &["to"]),
                date: extract_date(text),
            };
        }

        if mentions(&["weather", "temperature", "forecast"]) {
            return TravelRequest::Weather { city: place() };
        }

        if mentions(&["recommend", "suggest", "destination"])
            || says(&["where should i go", "where to go", "where can i go"])
        {
            return TravelRequest::Recommendation {
                preference: text.to_string(),
            };
        }

        if mentions(&["attraction", "sight", "museum", "landmark", "visit"])
            || says(&["things to do", "points of interest", "what to see", "places to"])
        {
            return TravelRequest::Tourism { city: place() };
        }

        if let Some(days) = trip_length(text) {
            return TravelRequest::Itinerary {
                city: place(),
                days,
            };
        }

        TravelRequest::Unknown
    }
}

/// "3 days", "4-day", "a week", "weekend"
fn trip_length(text: &str) -> Option<u32> {
    if let Some(caps) = DAYS_RE.captures(text) {
        return caps[1].parse().ok();
    }
    if text.contains("weekend") {
        Some(2)
    } else if text.contains("week") {
        Some(7)
    } else {
        None
    }
}

/// First date in the text, normalized to DD/MM/YYYY
fn extract_date(text: &str) -> Option<String> {
    let raw = DATE_RE.captures(text)?.get(1)?.as_str();
    let date = NaiveDate::parse_from_str(raw, "%d/%m/%Y")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .ok()?;
    Some(date.format("%d/%m/%Y").to_string())
}

/// Place name following the first of `markers` that introduces one
fn extract_place(words: &[&str], markers: &[&str]) -> Option<String> {
    words.iter().enumerate().find_map(|(i, word)| {
        if !markers.contains(&word.trim_matches(CLAUSE_PUNCTUATION)) {
            return None;
        }
        let phrase = phrase_after(&words[i + 1..])?;
        let first = phrase.split(' ').next().unwrap_or_default();
        (!NOT_PLACES.contains(&first)).then_some(phrase)
    })
}

fn phrase_after(words: &[&str]) -> Option<String> {
    let mut parts = Vec::new();
    for raw in words {
        let word = raw.trim_end_matches(CLAUSE_PUNCTUATION);
        if word.is_empty()
            || STOP_WORDS.contains(&word)
            || word.chars().any(|c| c.is_ascii_digit())
        {
            break;
        }
        parts.push(word);
        if word.len() != raw.len() || parts.len() == MAX_PLACE_WORDS {
            break;
        }
    }
    (!parts.is_empty()).then(|| parts.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn classify(raw: &str) -> TravelRequest {
        RuleClassifier.classify(&normalize_query(raw))
    }

    fn city(name: &str) -> Option<String> {
        Some(name.to_string())
    }

    #[test]
    fn test_normalize_query() {
        assert_eq!(normalize_query("  Weather IN   Paris ").as_str(), "weather in paris");
        assert_eq!(normalize_query("   ").as_str(), EMPTY_QUERY);
        assert_eq!(classify(""), TravelRequest::Unknown);
    }

    #[rstest]
    #[case("What's the weather like in Paris?", city("paris"))]
    #[case("weather in new york today", city("new york"))]
    #[case("Temperature in Buenos Aires", city("buenos aires"))]
    #[case("how is the weather there?", None)]
    fn test_weather(#[case] query: &str, #[case] expected: Option<String>) {
        assert_eq!(classify(query), TravelRequest::Weather { city: expected });
    }

    #[test]
    fn test_flights() {
        assert_eq!(
            classify("Find me flights from New York to London on 12/06/2025"),
            TravelRequest::Flights {
                origin: city("new york"),
                destination: city("london"),
                date: Some("12/06/2025".to_string()),
            }
        );
        assert_eq!(
            classify("I want to fly to Tokyo on 2025-03-09"),
            TravelRequest::Flights {
                origin: None,
                destination: city("tokyo"),
                date: Some("09/03/2025".to_string()),
            }
        );
    }

    #[test]
    fn test_flights_invalid_date_is_dropped() {
        let request = classify("flight from berlin to rome on 31/02/2025");
        assert!(matches!(request, TravelRequest::Flights { date: None, .. }));
    }

    #[rstest]
    #[case("Plan a 3-day trip to Rome", city("rome"), 3)]
    #[case("itinerary for 5 days in kyoto", city("kyoto"), 5)]
    #[case("plan my weekend in lisbon", city("lisbon"), 2)]
    #[case("make me an itinerary for barcelona", city("barcelona"), DEFAULT_TRIP_DAYS)]
    #[case("4 days in prague", city("prague"), 4)]
    #[case("plan a week there", None, 7)]
    fn test_itinerary(#[case] query: &str, #[case] expected_city: Option<String>, #[case] days: u32) {
        assert_eq!(
            classify(query),
            TravelRequest::Itinerary {
                city: expected_city,
                days
            }
        );
    }

    #[rstest]
    #[case("What are the top attractions in Vienna?", city("vienna"))]
    #[case("things to do in mexico city", city("mexico city"))]
    #[case("which museums should I see in Madrid", city("madrid"))]
    fn test_tourism(#[case] query: &str, #[case] expected: Option<String>) {
        assert_eq!(classify(query), TravelRequest::Tourism { city: expected });
    }

    #[test]
    fn test_recommendation_keeps_whole_preference() {
        assert_eq!(
            classify("Can you recommend a destination for a beach holiday?"),
            TravelRequest::Recommendation {
                preference: "can you recommend a destination for a beach holiday?".to_string()
            }
        );
        assert!(matches!(
            classify("where should I go for some adventure"),
            TravelRequest::Recommendation { .. }
        ));
    }

    #[test]
    fn test_unknown() {
        assert_eq!(classify("tell me a joke"), TravelRequest::Unknown);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(TravelRequest::Weather { city: city("oslo") }).unwrap();
        assert_eq!(json, serde_json::json!({"intent": "weather", "city": "oslo"}));
    }
}
