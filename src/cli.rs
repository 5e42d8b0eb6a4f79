use crate::{
    catalog::load_catalog,
    config::Config,
    countdown::{self, Answer, Outcome, TokioClock},
    gateways,
};
use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use placepicker_boundary as json;
use placepicker_core::{
    entities::{MapPoint, Place},
    selection::{SelectionOptions, SelectionStore},
    usecases::{load_available_places, AvailablePlaces},
};
use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    thread,
    time::Duration,
};
use tokio::sync::mpsc;

const PICKED_PLACES_FALLBACK_TEXT: &str = "Select the places you would like to visit below.";
const AVAILABLE_PLACES_FALLBACK_TEXT: &str = "Sorting places by distance...";
const PROGRESS_BAR_WIDTH: usize = 30;

#[derive(Parser)]
#[command(name = "placepicker", version, about = "Create your personal collection of places you would like to visit or you have visited.")]
struct Args {
    /// Configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List all available places sorted by distance to the current position
    Places {
        /// Latitude of the current position in degrees
        #[arg(long, requires = "lng", allow_negative_numbers = true)]
        lat: Option<f64>,
        /// Longitude of the current position in degrees
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lng: Option<f64>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List the places you would like to visit
    Picked {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Add a place to your collection
    Select { id: String },
    /// Remove a place from your collection
    Remove { id: String },
}

pub async fn run() -> Result<()> {
    let args = Args::parse();
    let cfg = Config::try_load_from_file_or_default(args.config.as_ref())?;
    log::debug!("{cfg:?}");

    let catalog = load_catalog(cfg.catalog.file.as_deref())?;
    let store = gateways::json_file_store(&cfg.storage)?;
    let options = SelectionOptions {
        key: cfg.storage.key.clone(),
        countdown: cfg.removal.countdown,
    };
    let mut selection = SelectionStore::load_with_options(&catalog, &store, TokioClock, options);

    match args.command {
        Command::Places { lat, lng, json } => {
            let cli_pos = match (lat, lng) {
                (Some(lat), Some(lng)) => Some(MapPoint::try_from_lat_lng_deg(lat, lng)?),
                _ => None,
            };
            let gateway = gateways::geolocation_gateway(cli_pos, &cfg.geolocation);
            let available = load_available_places(&gateway, &catalog);
            print_available_places(&available, json)?;
        }
        Command::Picked { json } => {
            print_places(selection.picked_places(), json, PICKED_PLACES_FALLBACK_TEXT)?;
        }
        Command::Select { id } => {
            if !catalog.contains(&id) {
                return Err(anyhow!("Unknown place '{id}'"));
            }
            if selection.select(&id)? {
                log::info!("Added '{id}' to your places");
            } else {
                log::info!("'{id}' is already one of your places");
            }
        }
        Command::Remove { id } => {
            if !selection.is_picked(&id) {
                log::warn!("'{id}' is not one of your places");
                return Ok(());
            }
            println!("Are you sure?");
            println!("Do you really want to remove this place? [y/n]");
            let mut answers = read_answers();
            let outcome = countdown::confirm_removal(
                &mut selection,
                &id,
                &mut answers,
                cfg.removal.progress_interval,
                |remaining, ratio| print_progress(remaining, ratio),
            )
            .await?;
            println!();
            match outcome {
                Outcome::Removed(id) | Outcome::AutoRemoved(id) => {
                    log::info!("Removed '{id}' from your places");
                }
                Outcome::Kept(id) => {
                    log::info!("Kept '{id}'");
                }
            }
        }
    }
    Ok(())
}

// Reading from stdin blocks, so it happens on a dedicated thread
// that does not keep the runtime from shutting down.
fn read_answers() -> mpsc::Receiver<Answer> {
    let (tx, rx) = mpsc::channel(1);
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else {
                break;
            };
            let Some(answer) = Answer::parse(&line) else {
                continue;
            };
            if tx.blocking_send(answer).is_err() {
                break;
            }
        }
    });
    rx
}

fn print_progress(remaining: Duration, ratio: f64) {
    let filled = (ratio * PROGRESS_BAR_WIDTH as f64).round() as usize;
    let bar = format!(
        "{}{}",
        "#".repeat(filled.min(PROGRESS_BAR_WIDTH)),
        ".".repeat(PROGRESS_BAR_WIDTH.saturating_sub(filled))
    );
    print!("\r[{bar}] {:.1}s ", remaining.as_secs_f64());
    let _ = io::stdout().flush();
}

fn print_available_places(available: &AvailablePlaces, json: bool) -> Result<()> {
    let AvailablePlaces::Sorted { pos, places } = available else {
        if json {
            println!("[]");
        } else {
            println!("{AVAILABLE_PLACES_FALLBACK_TEXT}");
        }
        return Ok(());
    };
    if json {
        let places = places
            .iter()
            .map(|place| json::PlaceWithDistance {
                distance: place.pos.planar_distance_to(*pos),
                place: place.clone().into(),
            })
            .collect::<Vec<_>>();
        println!("{}", serde_json::to_string_pretty(&places)?);
    } else {
        for place in places {
            println!(
                "{:>5}  {:<30} {:>8.2}°",
                place.id,
                place.title,
                place.pos.planar_distance_to(*pos)
            );
        }
    }
    Ok(())
}

fn print_places(places: &[Place], json: bool, fallback_text: &str) -> Result<()> {
    if json {
        let places = places
            .iter()
            .cloned()
            .map(json::Place::from)
            .collect::<Vec<_>>();
        println!("{}", serde_json::to_string_pretty(&places)?);
        return Ok(());
    }
    if places.is_empty() {
        println!("{fallback_text}");
    }
    for place in places {
        println!("{:>5}  {}", place.id, place.title);
    }
    Ok(())
}
