//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Travel assistant: itineraries, intents and destination ideas
#[derive(Parser)]
#[command(
    name = "travel-assistant",
    about = "Plan day-by-day itineraries and answer travel queries",
    version
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Group points of interest from a JSON file into days
    Plan {
        /// JSON array of points of interest
        #[arg(short, long, value_name = "FILE")]
        pois: PathBuf,

        /// Number of days
        #[arg(short, long)]
        days: u32,

        /// Weather summary shown on every day
        #[arg(short, long, default_value = "Weather unavailable")]
        weather: String,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show how a query is classified
    Classify {
        /// Free-text query
        query: String,
    },

    /// Recommend a destination for a travel preference
    Recommend {
        /// e.g. "quiet beach holiday"
        preference: String,
    },

    /// Answer a query using the offline providers
    Ask {
        /// Conversation owner
        #[arg(short, long, default_value = "cli")]
        user: String,

        /// JSON place catalog used for points of interest
        #[arg(long, value_name = "FILE")]
        catalog: Option<PathBuf>,

        /// Temperature reported by the fixed weather provider
        #[arg(long, default_value_t = 20.0)]
        temperature: f64,

        /// Conditions reported by the fixed weather provider
        #[arg(long, default_value = "clear sky")]
        conditions: String,

        /// Free-text query
        query: String,
    },

    /// Run the HTTP API
    Serve {
        /// Port to listen on, overrides the config
        #[arg(short, long)]
        port: Option<u16>,

        /// JSON place catalog used for points of interest
        #[arg(long, value_name = "FILE")]
        catalog: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_plan() {
        let cli = Cli::parse_from(["travel-assistant", "plan", "--pois", "pois.json", "--days", "3", "--json"]);
        match cli.command {
            Some(Command::Plan { pois, days, json, weather }) => {
                assert_eq!(pois, PathBuf::from("pois.json"));
                assert_eq!(days, 3);
                assert!(json);
                assert_eq!(weather, "Weather unavailable");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["travel-assistant", "classify", "weather in rome", "-v", "--config", "c.toml"]);
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("c.toml")));
    }
}
