//! Integration tests for the travel assistant
//!
//! These tests drive the public library API and the CLI binary end to end.

use std::collections::{HashMap, HashSet};
use std::io::Write;
use std::sync::Arc;

use assert_cmd::Command;
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use rstest::rstest;
use tempfile::{NamedTempFile, TempDir};

use travel_assistant::config::{AppConfig, SessionConfig};
use travel_assistant::models::itinerary::NO_ACTIVITIES;
use travel_assistant::providers::{FixedWeather, NoFlights, PlaceCatalog};
use travel_assistant::session::{self, FjallSessionStore, SessionRepository};
use travel_assistant::{AssistantResponse, PointOfInterest, Providers, TravelAssistant, plan};

const WEATHER: &str = "Sunny";

fn random_points(seed: u64, count: usize) -> Vec<PointOfInterest> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            PointOfInterest::new(
                format!("Place {i}"),
                Some("sight"),
                rng.random_range(0.0..10_000.0),
                rng.random_range(0.0..5.0),
            )
        })
        .collect()
}

// =============================================================================
// Itinerary planning
// =============================================================================

#[test]
fn test_two_points_two_days() {
    let points = vec![
        PointOfInterest::new("A", Some("museum"), 100.0, 4.5),
        PointOfInterest::new("B", None, 5000.0, 4.0),
    ];
    let days = plan(&points, 2, WEATHER).unwrap();

    assert_eq!(days.len(), 2);
    assert_eq!(days[0].activities, vec!["A (museum)".to_string()]);
    assert_eq!(days[1].activities, vec!["B (N/A)".to_string()]);
    assert!(days.iter().all(|d| d.weather_summary == WEATHER));
}

#[test]
fn test_no_points_three_days() {
    let days = plan(&[], 3, WEATHER).unwrap();

    assert_eq!(days.len(), 3);
    for (i, day) in days.iter().enumerate() {
        assert_eq!(day.day_index as usize, i + 1);
        assert_eq!(day.activities, vec![NO_ACTIVITIES.to_string()]);
    }
}

#[test]
fn test_five_days_two_points() {
    let points = vec![
        PointOfInterest::new("Near", Some("park"), 10.0, 3.0),
        PointOfInterest::new("Far", Some("museum"), 9000.0, 5.0),
    ];
    let days = plan(&points, 5, WEATHER).unwrap();

    assert_eq!(days.len(), 5);
    assert_eq!(days[0].activities, vec!["Near (park)".to_string()]);
    assert_eq!(days[1].activities, vec!["Far (museum)".to_string()]);
    assert!(days[2..].iter().all(|d| d.activities == vec![NO_ACTIVITIES.to_string()]));
}

#[rstest]
#[case(1, 1, 7)]
#[case(2, 3, 12)]
#[case(3, 5, 30)]
#[case(4, 7, 4)]
#[case(5, 2, 1)]
fn test_plan_properties(#[case] seed: u64, #[case] day_count: u32, #[case] point_count: usize) {
    let points = random_points(seed, point_count);
    let days = plan(&points, day_count, WEATHER).unwrap();

    let rating_of: HashMap<String, f64> = points.iter().map(|p| (p.activity_label(), p.rating)).collect();

    assert_eq!(days.len(), day_count as usize);
    let mut seen = HashSet::new();
    for (i, day) in days.iter().enumerate() {
        assert_eq!(day.day_index as usize, i + 1);
        assert_eq!(day.weather_summary, WEATHER);
        assert!(!day.activities.is_empty() && day.activities.len() <= 3);
        if day.is_empty() {
            continue;
        }

        for activity in &day.activities {
            assert!(seen.insert(activity.clone()), "{activity} scheduled twice");
        }
        let ratings: Vec<f64> = day.activities.iter().map(|a| rating_of[a]).collect();
        assert!(
            ratings.windows(2).all(|w| w[0] >= w[1]),
            "day {} ratings increase: {ratings:?}",
            day.day_index
        );
    }
}

#[test]
fn test_plan_is_deterministic() {
    let points = random_points(99, 40);
    assert_eq!(plan(&points, 4, WEATHER).unwrap(), plan(&points, 4, WEATHER).unwrap());
}

#[test]
fn test_zero_days_is_an_error() {
    assert!(plan(&random_points(1, 3), 0, WEATHER).is_err());
}

// =============================================================================
// Assistant with a persistent session store
// =============================================================================

const CATALOG: &str = r#"{
    "cities": [{
        "name": "Rome",
        "latitude": 41.9028,
        "longitude": 12.4964,
        "places": [
            {"name": "Colosseum", "kinds": "historic", "latitude": 41.8902, "longitude": 12.4922, "rating": 4.8},
            {"name": "Pantheon", "kinds": "architecture", "latitude": 41.8986, "longitude": 12.4769, "rating": 4.7},
            {"name": "Trevi Fountain", "kinds": "fountains", "latitude": 41.9009, "longitude": 12.4833, "rating": 4.6},
            {"name": "Villa Borghese", "kinds": "gardens", "latitude": 41.9142, "longitude": 12.4923, "rating": 4.5}
        ]
    }]
}"#;

fn rome_assistant(sessions: Arc<dyn SessionRepository>) -> TravelAssistant {
    let providers = Providers {
        flights: Arc::new(NoFlights),
        weather: Arc::new(FixedWeather::new(24.0, "sunny")),
        pois: Arc::new(PlaceCatalog::from_json(CATALOG).unwrap()),
    };
    TravelAssistant::new(providers, sessions, AppConfig::default())
}

#[tokio::test]
async fn test_session_shared_between_assistants() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = Arc::new(FjallSessionStore::open(temp_dir.path()).unwrap());

    let first = rome_assistant(store.clone());
    let response = first.handle_query("alice", "weather in rome").await.unwrap();
    assert!(matches!(response, AssistantResponse::Weather { .. }));

    let assistant = rome_assistant(store.clone());
    let response = assistant.handle_query("alice", "plan 2 days there").await.unwrap();

    let AssistantResponse::Itinerary { city, days } = response else {
        panic!("expected an itinerary");
    };
    assert_eq!(city, "rome");
    assert_eq!(days.len(), 2);
    assert!(days.iter().all(|d| d.weather_summary == "24.0°C, sunny"));

    let session = store.get("alice").await.unwrap();
    assert_eq!(session.history.len(), 2);
    assert!(store.get("bob").await.unwrap().history.is_empty());
}

#[tokio::test]
async fn test_open_memory_backend() {
    let config = SessionConfig {
        backend: "memory".to_string(),
        ..SessionConfig::default()
    };
    let assistant = rome_assistant(session::open(&config).unwrap());
    let response = assistant.handle_query("carol", "top attractions in rome").await.unwrap();

    let AssistantResponse::Tourism { points_of_interest, .. } = response else {
        panic!("expected tourism response");
    };
    assert_eq!(points_of_interest.len(), 4);
    assert!(points_of_interest.windows(2).all(|w| w[0].distance <= w[1].distance));
}

// =============================================================================
// CLI
// =============================================================================

fn cli() -> Command {
    let mut cmd = Command::cargo_bin("travel-assistant").expect("binary is built");
    cmd.env("TRAVEL_ASSISTANT_SESSION__BACKEND", "memory")
        .env("RUST_LOG", "error");
    cmd
}

#[test]
fn test_cli_plan_json() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[{{"name": "A", "category": "museum", "distance": 100.0, "rating": 4.5}},
            {{"name": "B", "distance": 5000.0, "rating": 4.0}}]"#
    )
    .unwrap();

    let output = cli()
        .args(["plan", "--days", "2", "--weather", "Sunny", "--json", "--pois"])
        .arg(file.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let days: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(days[0]["activities"][0], "A (museum)");
    assert_eq!(days[1]["activities"][0], "B (N/A)");
}

#[test]
fn test_cli_plan_rejects_zero_days() {
    let file = NamedTempFile::new().unwrap();
    std::fs::write(file.path(), "[]").unwrap();

    let output = cli()
        .args(["plan", "--days", "0", "--pois"])
        .arg(file.path())
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("at least one day"));
}

#[test]
fn test_cli_classify() {
    let output = cli().args(["classify", "Weather in Paris?"]).output().unwrap();

    assert!(output.status.success());
    let request: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(request["intent"], "weather");
    assert_eq!(request["city"], "paris");
}

#[test]
fn test_cli_ask_with_catalog() {
    let mut catalog = NamedTempFile::new().unwrap();
    catalog.write_all(CATALOG.as_bytes()).unwrap();

    let output = cli()
        .args(["ask", "--catalog"])
        .arg(catalog.path())
        .arg("what are the top attractions in Rome?")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Points of interest in rome:"));
    assert!(stdout.contains("Trevi Fountain (fountains)"));
}

#[test]
fn test_cli_help_lists_subcommands() {
    let output = cli().arg("--help").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for subcommand in ["plan", "classify", "recommend", "ask", "serve"] {
        assert!(stdout.contains(subcommand), "help is missing {subcommand}");
    }
}
