//! Racetrack entry point
//!
//! Usage: `racetrack <track.txt> [settings.json] [--json]`
//!
//! Plans a route on a text track, prints the moves and the replayed route.

use std::path::PathBuf;
use std::process::ExitCode;

use racetrack::planner::Replay;
use racetrack::{BfsDriver, Driver, Grid, Result, Settings};

struct Args {
    track: PathBuf,
    settings: Option<PathBuf>,
    json: bool,
}

impl Args {
    fn parse() -> Option<Self> {
        let mut paths = Vec::new();
        let mut json = false;
        for arg in std::env::args().skip(1) {
            match arg.as_str() {
                "--json" => json = true,
                _ => paths.push(PathBuf::from(arg)),
            }
        }
        let mut paths = paths.into_iter();
        let track = paths.next()?;
        let settings = paths.next();
        if paths.next().is_some() {
            return None;
        }
        Some(Self {
            track,
            settings,
            json,
        })
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let Some(args) = Args::parse() else {
        eprintln!("usage: racetrack <track.txt> [settings.json] [--json]");
        return ExitCode::from(2);
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let grid: Grid = std::fs::read_to_string(&args.track)?.parse()?;
    let (width, height) = grid.dimensions();
    log::info!("Loaded {}x{} track from {}", width, height, args.track.display());

    let settings = Settings::load_or_default(args.settings.as_deref())?;
    let mut driver = BfsDriver::initialize(grid, &settings)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(driver.solution())?);
        return Ok(());
    }

    println!(
        "{} driver: {} moves, {} generations, {} states explored",
        driver.name(),
        driver.solution().len(),
        driver.solution().generations,
        driver.solution().explored
    );

    let moves = driver.solution().moves.clone();
    let track = driver.track().clone();
    let mut replay = Replay::new(&track, &settings);
    replay.apply_all(&moves)?;

    let start = track.grid().tile_center(track.start());
    println!(
        "   0: start tile ({}, {}) px ({:.0}, {:.0})",
        track.start().x,
        track.start().y,
        start.x,
        start.y
    );
    for (turn, (mv, node)) in moves.iter().zip(&replay.nodes()[1..]).enumerate() {
        let accel = driver.next_move()?;
        let pixel = track.grid().tile_center(node.pos);
        println!(
            "{:>4}: accel ({:>2}, {:>2}) -> tile ({}, {}) vel ({}, {}) px ({:.0}, {:.0}){}",
            turn + 1,
            accel.x,
            accel.y,
            node.pos.x,
            node.pos.y,
            node.vel.x,
            node.vel.y,
            pixel.x,
            pixel.y,
            if mv.is_wait() { " [wait]" } else { "" }
        );
    }
    Ok(())
}
