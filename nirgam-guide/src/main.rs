//! nirgam-guide - evacuation guidance from the command line
//!
//! Runs one routing cycle over a static corridor map and prints the
//! direction each guidance indicator should show.
//!
//! Usage:
//!   nirgam-guide --map maps/corridor.png --zone central_hall
//!   nirgam-guide --map maps/corridor.png --hazard 480,250,40 --json
//!   nirgam-guide --map maps/corridor.png --frame capture.jpg --output annotated.png
//!   nirgam-guide --map maps/corridor.png --scenario scenarios/two_fires.yaml --sensor hub.json

mod error;
mod output;
mod scenario;

use clap::Parser;
use log::info;
use std::path::PathBuf;

use nirgam_route::{Hazard, NirgamConfig, RoutingEngine, StaticMap};

use error::Result;
use output::CycleReport;
use scenario::{Scenario, load_sensor_report, parse_hazard, zone_hazards};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Static map image (dark = corridor, bright = wall)
    #[arg(short, long)]
    map: PathBuf,

    /// Configuration file (defaults to configs/nirgam.yaml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Hazard as x,y or x,y,radius in map pixels (repeatable)
    #[arg(long = "hazard", value_parser = parse_hazard)]
    hazards: Vec<Hazard>,

    /// Preset hazard zone from the configuration (repeatable)
    #[arg(long = "zone")]
    zones: Vec<String>,

    /// Scenario YAML with hazards, zones and an optional sensor report
    #[arg(short, long)]
    scenario: Option<PathBuf>,

    /// Camera still to extract hazards and exits from
    #[arg(short, long, conflicts_with_all = ["hazards", "zones", "scenario"])]
    frame: Option<PathBuf>,

    /// Live-sensor report (YAML or JSON) applied to the displayed directions
    #[arg(long)]
    sensor: Option<PathBuf>,

    /// Write the annotated scene to this image file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => NirgamConfig::load(path)?,
        None => NirgamConfig::load_default()?,
    };

    let map = StaticMap::load(&args.map, config.grid.wall_threshold)?;
    let mut engine = RoutingEngine::new(config.to_router_config(), map, &config.to_layout())?;

    let scenario = match &args.scenario {
        Some(path) => Scenario::load(path)?,
        None => Scenario::default(),
    };
    let sensor = match &args.sensor {
        Some(path) => Some(load_sensor_report(path)?),
        None => scenario.sensor.clone(),
    };

    let outcome = match &args.frame {
        Some(path) => {
            info!("Vision mode: {}", path.display());
            let frame = image::open(path)?.to_rgb8();
            engine.process_frame(&frame)
        }
        None => {
            let mut hazards = args.hazards.clone();
            hazards.extend(scenario.hazards.iter().copied());
            hazards.extend(zone_hazards(&config, &args.zones)?);
            hazards.extend(zone_hazards(&config, &scenario.zones)?);
            info!("Simulation mode: {} hazards", hazards.len());
            engine.process(&hazards)
        }
    };

    let report = CycleReport::new(&outcome, sensor.as_ref(), &config.sensor.nodes);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.to_text());
    }

    if let Some(path) = &args.output {
        engine.annotate(&outcome).save(path)?;
        info!("Annotated scene written to {}", path.display());
    }

    Ok(())
}
