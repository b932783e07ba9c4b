//! Travel assistant command line entry point

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use travel_assistant::api::ApiState;
use travel_assistant::assistant::{Providers, TravelAssistant};
use travel_assistant::cli::{Cli, Command};
use travel_assistant::config::{AppConfig, LoggingConfig};
use travel_assistant::intent::{IntentClassifier, RuleClassifier, normalize_query};
use travel_assistant::itinerary::ItineraryPlanner;
use travel_assistant::models::PointOfInterest;
use travel_assistant::providers::{FixedWeather, NoFlights, PlaceCatalog};
use travel_assistant::recommender::Recommender;
use travel_assistant::{session, web};

const SERVE_TEMPERATURE: f64 = 20.0;
const SERVE_CONDITIONS: &str = "clear sky";

fn init_tracing(logging: &LoggingConfig, verbose: bool) {
    let level = if verbose { "debug" } else { logging.level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_from_path(cli.config.clone()).context("Failed to load configuration")?;
    init_tracing(&config.logging, cli.verbose);

    debug!(command = ?cli.command, "Dispatching command");
    match cli.command {
        Some(Command::Plan {
            pois,
            days,
            weather,
            json,
        }) => cmd_plan(&config, &pois, days, &weather, json),
        Some(Command::Classify { query }) => cmd_classify(&query),
        Some(Command::Recommend { preference }) => cmd_recommend(&preference),
        Some(Command::Ask {
            user,
            catalog,
            temperature,
            conditions,
            query,
        }) => {
            let weather = FixedWeather::new(temperature, conditions);
            let assistant = build_assistant(&config, catalog.as_deref(), weather)?;
            let response = assistant.handle_query(&user, &query).await?;
            println!("{response}");
            Ok(())
        }
        Some(Command::Serve { port, catalog }) => cmd_serve(config, port, catalog).await,
        None => {
            Cli::command().print_help()?;
            println!();
            Ok(())
        }
    }
}

fn cmd_plan(config: &AppConfig, path: &Path, days: u32, weather: &str, json: bool) -> Result<()> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read points of interest: {}", path.display()))?;
    let points: Vec<PointOfInterest> =
        serde_json::from_str(&raw).with_context(|| format!("Invalid points of interest JSON: {}", path.display()))?;

    let planner = ItineraryPlanner::new(config.planner.clone());
    let plan = planner.plan(&points, days, weather)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        for day in &plan {
            print!("{day}");
        }
    }
    Ok(())
}

fn cmd_classify(query: &str) -> Result<()> {
    let request = RuleClassifier.classify(&normalize_query(query));
    println!("{}", serde_json::to_string_pretty(&request)?);
    Ok(())
}

fn cmd_recommend(preference: &str) -> Result<()> {
    let pick = Recommender.recommend_destination(preference, &mut rand::rng())?;
    println!("For a {} trip, try {}.", pick.category, pick.destination);
    Ok(())
}

async fn cmd_serve(mut config: AppConfig, port: Option<u16>, catalog: Option<PathBuf>) -> Result<()> {
    if let Some(port) = port {
        config.server.port = port;
    }
    let weather = FixedWeather::new(SERVE_TEMPERATURE, SERVE_CONDITIONS);
    let assistant = build_assistant(&config, catalog.as_deref(), weather)?;
    let state = ApiState::new(ItineraryPlanner::new(config.planner.clone()), assistant);

    info!(host = %config.server.host, port = config.server.port, "Starting API server");
    web::run(state, &config.server).await
}

fn build_assistant(config: &AppConfig, catalog: Option<&Path>, weather: FixedWeather) -> Result<TravelAssistant> {
    let pois = match catalog {
        Some(path) => PlaceCatalog::load(path)?,
        None => PlaceCatalog::default(),
    };
    let providers = Providers {
        flights: Arc::new(NoFlights),
        weather: Arc::new(weather),
        pois: Arc::new(pois),
    };
    let sessions = session::open(&config.session)?;
    Ok(TravelAssistant::new(providers, sessions, config.clone()))
}
