mod terminal;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use garden_trails::{
    sdk::config::{MapSettings, MapboxConfig},
    sdk::explorer::{hover_outline, HoverReadout, Legend, ZoneFeature},
    sdk::feature::{load_features, read_geojson_features, LonLat, PointFeature},
    sdk::routing::{nearest_station_with_distance, MapboxProvider},
    sdk::session::GardenSession,
    sdk::util::log::init_logging,
};
use std::path::{Path, PathBuf};
use terminal::TerminalPresenter;

/// Explore Scotland's gardens: directory, nearest railway station and directions
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Print layer and camera updates as well
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List gardens grouped by local authority
    Directory {
        /// GeoJSON snapshot of the garden layer
        #[arg(long)]
        gardens: PathBuf,
    },

    /// Find the railway station closest to a point
    Nearest {
        /// GeoJSON snapshot of the station layer
        #[arg(long)]
        stations: PathBuf,

        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
    },

    /// Select a garden and, with a start location, get directions to it
    Plan {
        #[arg(long)]
        gardens: PathBuf,

        #[arg(long)]
        stations: PathBuf,

        /// Garden title as listed in the directory
        #[arg(short, long)]
        garden: String,

        /// [Optional] Start location to geocode (e.g., "Perth")
        #[arg(short, long)]
        from: Option<String>,
    },

    /// Print the data-zone rank legend
    Legend,

    /// Show the readout for a data zone
    Hover {
        /// GeoJSON snapshot of the data-zone layer
        #[arg(long)]
        zones: PathBuf,

        /// [Optional] Zone name under the pointer; omit for none
        #[arg(long)]
        zone: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    dotenvy::dotenv().ok();

    let presenter = TerminalPresenter {
        verbose: cli.verbose,
    };

    match cli.command {
        Command::Directory { gardens } => {
            let gardens = load_layer(&gardens)?;
            let mut session = GardenSession::new(presenter, MapSettings::default());
            let groups = session.refresh_directory(&gardens);
            log::info!("{} gardens in {} groups", gardens.len(), groups.len());
        }
        Command::Nearest { stations, lon, lat } => {
            let stations = load_layer(&stations)?;
            let target = LonLat::new(lon, lat);
            match nearest_station_with_distance(target, &stations) {
                Some((station, km)) => println!(
                    "{} ({:.2} km)",
                    station
                        .property("name")
                        .or_else(|| station.property("Name"))
                        .unwrap_or("unnamed station"),
                    km
                ),
                None => println!("No stations with a position"),
            }
        }
        Command::Plan {
            gardens,
            stations,
            garden,
            from,
        } => plan(presenter, &gardens, &stations, &garden, from.as_deref())?,
        Command::Legend => {
            let legend = Legend::percentile_deciles()?;
            for key in legend.keys {
                let text = if key.light_text { "white" } else { "black" };
                println!("{:>4}  {}  ({} text)", key.label, key.background, text);
            }
        }
        Command::Hover { zones, zone } => {
            let zones: Vec<ZoneFeature> = read_geojson_features(&zones)
                .with_context(|| format!("Failed to load zones from {}", zones.display()))?
                .into_iter()
                .map(ZoneFeature::from)
                .collect();
            let hovered: Vec<ZoneFeature> = zone
                .map(|name| {
                    zones
                        .into_iter()
                        .filter(|z| z.name().as_deref() == Some(name.as_str()))
                        .collect()
                })
                .unwrap_or_default();
            println!("{}", HoverReadout::from_zones(&hovered).text());
            log::debug!("Outline has {} feature(s)", hover_outline(&hovered).features.len());
        }
    }

    Ok(())
}

fn plan(
    presenter: TerminalPresenter,
    gardens_path: &Path,
    stations_path: &Path,
    title: &str,
    from: Option<&str>,
) -> Result<()> {
    // --- 1. Layer snapshots ---
    let gardens = load_layer(gardens_path)?;
    let stations = load_layer(stations_path)?;

    let garden = gardens
        .iter()
        .find(|g| {
            g.title()
                .is_some_and(|t| t.trim().eq_ignore_ascii_case(title.trim()))
        })
        .with_context(|| format!("No garden titled \"{}\"", title))?;

    let mut session = GardenSession::new(presenter, MapSettings::default());

    // --- 2. Start location, if any ---
    let Some(query) = from else {
        session.begin_selection(garden, &stations);
        return Ok(());
    };

    let config = MapboxConfig::from_env()?;
    let provider = MapboxProvider::new(&config)?;
    if session.set_location(&provider, query).is_none() {
        bail!("Could not resolve start location \"{}\"", query);
    }

    // --- 3. Select and route ---
    session.select_garden(&provider, garden, &stations);
    if session.state().active_route().is_none() {
        log::warn!("No directions available to {}", title);
    }
    Ok(())
}

fn load_layer(path: &Path) -> Result<Vec<PointFeature>> {
    load_features(path).with_context(|| format!("Failed to load features from {}", path.display()))
}
