//! Track model
//!
//! The grid is consumed read-only; the checkpoint groups are computed once
//! when the track is assembled and live as long as the race attempt.

pub mod checkpoints;
pub mod grid;
pub mod tile;

pub use checkpoints::Checkpoints;
pub use grid::Grid;
pub use tile::TileKind;

use glam::IVec2;

use crate::consts::MAX_CHECKPOINTS;
use crate::error::{RaceError, Result};

/// A grid together with its start tile and checkpoint groups
#[derive(Debug, Clone)]
pub struct Track {
    grid: Grid,
    start: IVec2,
    checkpoints: Checkpoints,
}

impl Track {
    pub fn new(grid: Grid) -> Result<Self> {
        let start = grid.find_start().ok_or(RaceError::NoStartTile)?;
        let checkpoints = Checkpoints::from_grid(&grid);
        if checkpoints.len() > MAX_CHECKPOINTS {
            return Err(RaceError::TooManyCheckpoints {
                found: checkpoints.len(),
                max: MAX_CHECKPOINTS,
            });
        }
        Ok(Self {
            grid,
            start,
            checkpoints,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn start(&self) -> IVec2 {
        self.start
    }

    pub fn checkpoints(&self) -> &Checkpoints {
        &self.checkpoints
    }

    #[inline]
    pub fn tile_at(&self, cell: IVec2) -> Option<TileKind> {
        self.grid.tile_at(cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_start() {
        let grid: Grid = "..F".parse().unwrap();
        assert!(matches!(Track::new(grid), Err(RaceError::NoStartTile)));
    }

    #[test]
    fn test_too_many_checkpoints() {
        // 65 isolated checkpoint tiles on every other column
        let row: String = (0..130).map(|x| if x % 2 == 0 { 'C' } else { '.' }).collect();
        let grid: Grid = format!("S{}F", row).parse().unwrap();
        match Track::new(grid) {
            Err(RaceError::TooManyCheckpoints { found, max }) => {
                assert_eq!(found, 65);
                assert_eq!(max, MAX_CHECKPOINTS);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_assembles_start_and_checkpoints() {
        let grid: Grid = "S.C\n..C\n..F".parse().unwrap();
        let track = Track::new(grid).unwrap();
        assert_eq!(track.start(), IVec2::new(0, 0));
        assert_eq!(track.checkpoints().len(), 1);
        assert_eq!(track.tile_at(IVec2::new(2, 2)), Some(TileKind::Finish));
    }
}
