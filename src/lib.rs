//! Racetrack - grid racing with a breadth-first route planner
//!
//! Core modules:
//! - `track`: Tile grid, start tile and checkpoint groups
//! - `planner`: Segment tracing, transitions and the generation-by-generation search
//! - `driver`: Turn-by-turn move interface over a planned route
//! - `settings`: Planner configuration

pub mod driver;
pub mod error;
pub mod planner;
pub mod settings;
pub mod track;

pub use driver::{BfsDriver, Driver};
pub use error::{RaceError, Result};
pub use planner::{Move, Solution, plan};
pub use settings::Settings;
pub use track::{Grid, TileKind, Track};

/// Racing rule constants
pub mod consts {
    use glam::IVec2;

    /// Forced-wait turns after a crash
    pub const DEFAULT_CRASH_LOCKOUT: u8 = 3;
    /// Generations between info-level progress lines
    pub const DEFAULT_PROGRESS_INTERVAL: u32 = 10;

    /// Pixel edge length of one tile
    pub const DEFAULT_TILE_SIZE: u32 = 32;

    /// Checkpoint groups tracked per trajectory (one bit each)
    pub const MAX_CHECKPOINTS: usize = 64;

    /// Acceleration choices of a free car, in expansion order
    pub const ACCELERATIONS: [IVec2; 9] = [
        IVec2::new(-1, -1),
        IVec2::new(-1, 0),
        IVec2::new(-1, 1),
        IVec2::new(0, -1),
        IVec2::new(0, 0),
        IVec2::new(0, 1),
        IVec2::new(1, -1),
        IVec2::new(1, 0),
        IVec2::new(1, 1),
    ];
}
