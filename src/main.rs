use std::{path::PathBuf, process::ExitCode, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::error;

use officemap::{
    Coordinate, DistanceCard, GraphHopperClient, OfficeMapConfig, RingSet, RouteLeg,
    RouteProvider, RouteRequest, TravelMode, api::AppState, error::user_message_for,
    generate_locations, logging, web,
};

/// Commute planning around an office
#[derive(Parser)]
#[command(author, version, about, long_about = None, propagate_version = true)]
struct Cli {
    /// Configuration file, defaults to the user config directory
    #[clap(long, env = "OFFICEMAP_CONFIG")]
    config: Option<PathBuf>,

    /// Log at debug level
    #[clap(long, short)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the JSON API and the frontend.
    Serve {
        #[clap(long)]
        port: Option<u16>,
    },

    /// Scatter markers around a center and print them as JSON.
    Sample {
        #[clap(long, allow_hyphen_values = true)]
        lat: f64,

        #[clap(long, allow_hyphen_values = true)]
        lng: f64,

        /// Seed for reproducible markers.
        #[clap(long)]
        seed: Option<u64>,
    },

    /// Estimate travel time for a measured leg.
    Estimate {
        /// Leg distance in meters.
        #[clap(long)]
        distance: Option<f64>,

        /// Leg duration in seconds.
        #[clap(long)]
        duration: Option<f64>,

        /// car, bike, bicycle or onfoot.
        #[clap(long, default_value = "car")]
        mode: String,
    },

    /// Print the distance rings around an office as JSON.
    Rings {
        #[clap(long, allow_hyphen_values = true)]
        lat: f64,

        #[clap(long, allow_hyphen_values = true)]
        lng: f64,

        /// Include the fourth, very far ring.
        #[clap(long)]
        extended: bool,
    },

    /// Ask the routing service for a driving route and estimate it.
    Route {
        #[clap(long, allow_hyphen_values = true)]
        from_lat: f64,

        #[clap(long, allow_hyphen_values = true)]
        from_lng: f64,

        #[clap(long, allow_hyphen_values = true)]
        to_lat: f64,

        #[clap(long, allow_hyphen_values = true)]
        to_lng: f64,

        #[clap(long, default_value = "car")]
        mode: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            eprintln!("Error: {}", user_message_for(&e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = OfficeMapConfig::load_from_path(cli.config)?;
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    logging::init(&config.logging)?;

    match cli.command {
        Command::Serve { port } => {
            let port = port.unwrap_or(config.server.port);
            let routes = GraphHopperClient::new(&config.routing)?;
            web::run(AppState::new(config, Arc::new(routes)), port).await?;
        }
        Command::Sample { lat, lng, seed } => {
            let center = Coordinate::checked(lat, lng)?;
            let locations = match seed {
                Some(seed) => generate_locations(center, &mut StdRng::seed_from_u64(seed)),
                None => generate_locations(center, &mut rand::rng()),
            };
            println!("{}", serde_json::to_string_pretty(&locations)?);
        }
        Command::Estimate {
            distance,
            duration,
            mode,
        } => {
            let leg = RouteLeg {
                distance: distance.map(officemap::Measure::new),
                duration: duration.map(officemap::Measure::new),
            };
            print_card(&leg, TravelMode::from_tag(&mode));
        }
        Command::Rings { lat, lng, extended } => {
            let office = Coordinate::checked(lat, lng)?;
            let rings = if extended {
                RingSet::extended()
            } else {
                RingSet::standard()
            };
            println!("{}", serde_json::to_string_pretty(&rings.overlays(office))?);
        }
        Command::Route {
            from_lat,
            from_lng,
            to_lat,
            to_lng,
            mode,
        } => {
            let request = RouteRequest::driving(
                Coordinate::checked(from_lat, from_lng)?,
                Coordinate::checked(to_lat, to_lng)?,
            );
            let routes = GraphHopperClient::new(&config.routing)?;
            let leg = routes
                .route(&request)
                .await
                .context("Failed to fetch route")?;
            match leg {
                Some(leg) => print_card(&leg, TravelMode::from_tag(&mode)),
                None => println!("No route found."),
            }
        }
    }

    Ok(())
}

fn print_card(leg: &RouteLeg, mode: TravelMode) {
    match DistanceCard::from_leg(leg, mode) {
        Some(card) => println!("{card}"),
        None => println!("Distance or duration missing, nothing to estimate."),
    }
}
