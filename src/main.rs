use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Deserialize;
use tracing::{error, info};

use kinematics::api::formatting::{format_distance, format_elapsed, format_speed};
use kinematics::logging::{init_logging, Verbosity};
use kinematics::validation::validate_point;
use kinematics::{
    traffic_lights, ConfigurationManager, EngineConfig, KinematicsEngine, KinematicsError, PointOfInterest,
    ReplayProvider, Result,
};

/// Replay recorded position fixes through the kinematics engine
#[derive(Debug, Parser)]
#[command(name = "kinematics", version, about)]
struct Cli {
    /// Engine configuration file (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// More output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Errors only
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Summarize speed, distance and time of a recorded track
    Trip {
        /// Track file: {"fixes": [...]}
        track: PathBuf,
        /// Fixes delivered per provider batch
        #[arg(long, default_value_t = 1)]
        batch_size: usize,
    },
    /// Rank points of interest from the last fix of a track
    Nearest {
        track: PathBuf,
        /// Points file: {"points": [{"name": .., "longitude": .., "latitude": ..}]}
        #[arg(long)]
        points: Option<PathBuf>,
        /// Show at most this many points
        #[arg(long)]
        limit: Option<usize>,
    },
}

#[derive(Debug, Deserialize)]
struct PointsFile {
    points: Vec<PointOfInterest>,
}

fn load_config(path: Option<&PathBuf>) -> Result<EngineConfig> {
    match path {
        Some(path) => Ok(ConfigurationManager::from_file(path)?.get_config().clone()),
        None => Ok(EngineConfig::default()),
    }
}

fn load_points(path: Option<&PathBuf>) -> Result<Vec<PointOfInterest>> {
    let Some(path) = path else {
        return Ok(traffic_lights());
    };
    let content = std::fs::read_to_string(path).map_err(|source| KinematicsError::Read {
        path: path.clone(),
        source,
    })?;
    let file: PointsFile = serde_json::from_str(&content)?;
    for point in &file.points {
        validate_point(point)?;
    }
    Ok(file.points)
}

fn run_trip(config: EngineConfig, track: &Path, batch_size: usize) -> Result<()> {
    let mut provider = ReplayProvider::from_file(track)?
        .with_batch_size(batch_size)
        .with_interval(config.location_interval_ms);
    let mut engine = KinematicsEngine::new(config, Vec::new());
    engine.run(&mut provider)?;

    let trip = engine.trip();
    let readout = engine.readout();
    println!("Phase:      {:?}", engine.phase());
    println!("Fixes:      {}", engine.fixes_processed());
    println!("Speed:      {} km/h", readout.speed);
    println!("Distance:   {}", readout.distance);
    println!("Time:       {}", readout.time);
    println!("Max speed:  {} km/h", readout.max_speed);
    println!("Avg speed:  {} km/h", readout.avg_speed);
    info!(
        distance = %format_distance(trip.distance_meters),
        elapsed = %format_elapsed(trip.elapsed_millis),
        avg = %format_speed(trip.avg_speed_kmh),
        "trip summary"
    );
    Ok(())
}

fn run_nearest(config: EngineConfig, track: &Path, points: Option<&PathBuf>, limit: Option<usize>) -> Result<()> {
    let points = load_points(points)?;
    let mut provider = ReplayProvider::from_file(track)?;
    let mut engine = KinematicsEngine::new(config, points);
    engine.run(&mut provider)?;

    if engine.fixes_processed() == 0 {
        return Err(KinematicsError::provider("track contains no usable fixes"));
    }

    let rows = engine.ranking_readout();
    let shown = limit.unwrap_or(rows.len()).min(rows.len());
    for row in &rows[..shown] {
        println!("{:<32} {:>9} {}", row.name, row.distance, row.bearing);
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(Verbosity::from_flags(cli.verbose, cli.quiet));

    let result = load_config(cli.config.as_ref()).and_then(|config| match &cli.command {
        Command::Trip { track, batch_size } => run_trip(config, track, *batch_size),
        Command::Nearest { track, points, limit } => run_nearest(config, track, points.as_ref(), *limit),
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
