//! Query handling: classify, dispatch to a provider, remember the conversation

use std::fmt::Display;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::Arc;

use anyhow::Result;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use crate::AssistantError;
use crate::config::AppConfig;
use crate::intent::{IntentClassifier, RuleClassifier, TravelRequest, normalize_query};
use crate::itinerary::{ItineraryPlanner, ItineraryService};
use crate::models::{DayPlan, FlightOffer, PointOfInterest, WeatherReport};
use crate::providers::{FlightProvider, PoiProvider, WeatherProvider};
use crate::recommender::Recommender;
use crate::session::SessionRepository;

/// Per-user lock stripes guarding the session read-modify-write
const SESSION_LOCK_STRIPES: usize = 64;

const HELP_TEXT: &str = "I can look up flights, current weather, points of interest, \
destination ideas and day-by-day itineraries. Try \"weather in Lisbon\" or \"plan 3 days in Rome\".";

/// Reply to a single query
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AssistantResponse {
    Flight {
        origin: String,
        destination: String,
        offer: FlightOffer,
    },
    Weather {
        report: WeatherReport,
    },
    Tourism {
        city: String,
        points_of_interest: Vec<PointOfInterest>,
    },
    Recommendation {
        category: String,
        destination: String,
    },
    Itinerary {
        city: String,
        days: Vec<DayPlan>,
    },
    /// Informational reply, e.g. nothing found or a follow-up question
    Message {
        text: String,
    },
    /// A provider failed
    Error {
        text: String,
    },
}

impl AssistantResponse {
    fn message(text: impl Into<String>) -> Self {
        Self::Message { text: text.into() }
    }

    /// City the conversation moved to, if this reply names one
    #[must_use]
    pub fn city(&self) -> Option<&str> {
        match self {
            Self::Flight { destination, .. } => Some(destination),
            Self::Weather { report } => Some(&report.city),
            Self::Tourism { city, .. } | Self::Itinerary { city, .. } => Some(city),
            _ => None,
        }
    }
}

impl Display for AssistantResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Flight {
                origin,
                destination,
                offer,
            } => {
                write!(
                    f,
                    "Cheapest flight {origin} -> {destination}: ${:.2}",
                    offer.price
                )?;
                if let Some(airline) = &offer.airline {
                    write!(f, " with {airline}")?;
                }
                if let Some(departure) = &offer.departure {
                    write!(f, ", departing {departure}")?;
                }
                Ok(())
            }
            Self::Weather { report } => write!(f, "{}: {}", report.city, report.summary()),
            Self::Tourism {
                city,
                points_of_interest,
            } => {
                writeln!(f, "Points of interest in {city}:")?;
                for poi in points_of_interest {
                    writeln!(f, "   - {} ({:.0} m)", poi.activity_label(), poi.distance)?;
                }
                Ok(())
            }
            Self::Recommendation {
                category,
                destination,
            } => write!(f, "For a {category} trip, try {destination}."),
            Self::Itinerary { city, days } => {
                writeln!(f, "Itinerary for {city}:")?;
                for day in days {
                    write!(f, "{day}")?;
                }
                Ok(())
            }
            Self::Message { text } | Self::Error { text } => write!(f, "{text}"),
        }
    }
}

/// Upstream services the assistant dispatches to
#[derive(Clone)]
pub struct Providers {
    pub flights: Arc<dyn FlightProvider>,
    pub weather: Arc<dyn WeatherProvider>,
    pub pois: Arc<dyn PoiProvider>,
}

pub struct TravelAssistant {
    classifier: Box<dyn IntentClassifier>,
    providers: Providers,
    itineraries: ItineraryService,
    recommender: Recommender,
    sessions: Arc<dyn SessionRepository>,
    session_locks: Vec<Mutex<()>>,
    config: AppConfig,
}

impl TravelAssistant {
    pub fn new(providers: Providers, sessions: Arc<dyn SessionRepository>, config: AppConfig) -> Self {
        let itineraries = ItineraryService::new(
            ItineraryPlanner::new(config.planner.clone()),
            providers.pois.clone(),
            providers.weather.clone(),
        );
        Self {
            classifier: Box::new(RuleClassifier),
            providers,
            itineraries,
            recommender: Recommender,
            sessions,
            session_locks: (0..SESSION_LOCK_STRIPES).map(|_| Mutex::new(())).collect(),
            config,
        }
    }

    /// Replace the rule-based classifier
    #[must_use]
    pub fn with_classifier(mut self, classifier: Box<dyn IntentClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    /// Answer a query and record it in the user's session.
    ///
    /// Provider failures come back as [`AssistantResponse::Error`]; only
    /// session store failures are returned as `Err`. Concurrent queries for
    /// the same user run one after another so no exchange is lost.
    #[instrument(skip(self, query))]
    pub async fn handle_query(&self, user_id: &str, query: &str) -> Result<AssistantResponse> {
        let _guard = self.session_lock(user_id).lock().await;
        let mut session = self.sessions.get(user_id).await?;

        let normalized = normalize_query(query);
        let request = self.classifier.classify(&normalized);
        debug!(?request, "Classified query");

        let response = self.dispatch(request, session.last_city.as_deref()).await;
        info!(kind = response_kind(&response), "Answered query");

        if let Some(city) = response.city() {
            session.last_city = Some(city.to_string());
        }
        session.record(query, response.to_string(), self.config.session.max_history);
        self.sessions
            .put(user_id, &session, self.config.session.ttl())
            .await?;

        Ok(response)
    }

    fn session_lock(&self, user_id: &str) -> &Mutex<()> {
        let mut hasher = DefaultHasher::new();
        user_id.hash(&mut hasher);
        &self.session_locks[hasher.finish() as usize % self.session_locks.len()]
    }

    async fn dispatch(&self, request: TravelRequest, last_city: Option<&str>) -> AssistantResponse {
        let resolve = |city: Option<String>| city.or_else(|| last_city.map(str::to_string));

        match request {
            TravelRequest::Flights {
                origin,
                destination,
                date,
            } => {
                let Some(origin) = origin else {
                    return AssistantResponse::message("Where would you like to fly from?");
                };
                let Some(destination) = resolve(destination) else {
                    return AssistantResponse::message("Where would you like to fly to?");
                };
                let Some(date) = date else {
                    return AssistantResponse::message(
                        "Which date would you like to travel? Please use DD/MM/YYYY.",
                    );
                };
                self.flights(origin, destination, date).await
            }
            TravelRequest::Weather { city } => match resolve(city) {
                Some(city) => self.weather(&city).await,
                None => AssistantResponse::message("Which city would you like the weather for?"),
            },
            TravelRequest::Tourism { city } => match resolve(city) {
                Some(city) => self.tourism(city).await,
                None => AssistantResponse::message("Which city are you visiting?"),
            },
            TravelRequest::Recommendation { preference } => self.recommend(&preference),
            TravelRequest::Itinerary { city, days } => match resolve(city) {
                Some(city) => self.itinerary(city, days).await,
                None => AssistantResponse::message("Which city should I plan the trip for?"),
            },
            TravelRequest::Unknown => AssistantResponse::message(HELP_TEXT),
        }
    }

    async fn flights(&self, origin: String, destination: String, date: String) -> AssistantResponse {
        match self
            .providers
            .flights
            .cheapest(&origin, &destination, &date)
            .await
        {
            Ok(Some(offer)) => AssistantResponse::Flight {
                origin,
                destination,
                offer,
            },
            Ok(None) => AssistantResponse::message(format!(
                "No flights found from {origin} to {destination} on {date}."
            )),
            Err(e) => failure("Flight", &e),
        }
    }

    async fn weather(&self, city: &str) -> AssistantResponse {
        match self.providers.weather.current(city).await {
            Ok(report) => AssistantResponse::Weather { report },
            Err(e) => failure("Weather", &e),
        }
    }

    async fn tourism(&self, city: String) -> AssistantResponse {
        let limit = self.config.planner.tourism_limit;
        match self.providers.pois.top_pois(&city, limit).await {
            Ok(pois) if pois.is_empty() => {
                AssistantResponse::message(format!("No points of interest found in {city}."))
            }
            Ok(points_of_interest) => AssistantResponse::Tourism {
                city,
                points_of_interest,
            },
            Err(e) => failure("Tourism", &e),
        }
    }

    fn recommend(&self, preference: &str) -> AssistantResponse {
        match self
            .recommender
            .recommend_destination(preference, &mut rand::rng())
        {
            Ok(pick) => AssistantResponse::Recommendation {
                category: pick.category,
                destination: pick.destination,
            },
            Err(e) => AssistantResponse::message(e.user_message()),
        }
    }

    async fn itinerary(&self, city: String, days: u32) -> AssistantResponse {
        match self.itineraries.generate(&city, days).await {
            Ok(days) => AssistantResponse::Itinerary { city, days },
            Err(e @ AssistantError::Validation { .. }) => AssistantResponse::message(e.user_message()),
            Err(e) => failure("Itinerary", &e),
        }
    }
}

/// "[Weather error] ..." naming the provider that actually failed
fn failure(fallback: &str, err: &AssistantError) -> AssistantResponse {
    let text = match err {
        AssistantError::Provider { provider, message } => format!("[{provider} error] {message}"),
        other => format!("[{fallback} error] {other}"),
    };
    AssistantResponse::Error { text }
}

fn response_kind(response: &AssistantResponse) -> &'static str {
    match response {
        AssistantResponse::Flight { .. } => "flight",
        AssistantResponse::Weather { .. } => "weather",
        AssistantResponse::Tourism { .. } => "tourism",
        AssistantResponse::Recommendation { .. } => "recommendation",
        AssistantResponse::Itinerary { .. } => "itinerary",
        AssistantResponse::Message { .. } => "message",
        AssistantResponse::Error { .. } => "error",
    }
}
