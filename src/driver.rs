//! Driver capability
//!
//! A driver hands the game loop one acceleration per tick. `BfsDriver` plans
//! the whole route up front and then replays it through a cursor.

use glam::IVec2;

use crate::error::{RaceError, Result};
use crate::planner::{Move, Solution, plan};
use crate::settings::Settings;
use crate::track::{Grid, Track};

/// Something that steers a car one tick at a time
pub trait Driver {
    /// Display name
    fn name(&self) -> &str;

    /// Acceleration for the next tick; `(0, 0)` also stands for a forced wait
    fn next_move(&mut self) -> Result<IVec2>;
}

/// Replays a breadth-first planned route
#[derive(Debug, Clone)]
pub struct BfsDriver {
    track: Track,
    solution: Solution,
    /// Index of the next entry to hand out
    cursor: usize,
}

impl BfsDriver {
    /// Locate the start, group checkpoints and run the search to completion
    pub fn initialize(grid: Grid, settings: &Settings) -> Result<Self> {
        let track = Track::new(grid)?;
        let solution = plan(&track, settings)?;
        log::info!(
            "Route planned: {} moves ({} steering) after {} generations",
            solution.len(),
            solution.steering_moves(),
            solution.generations
        );
        Ok(Self {
            track,
            solution,
            cursor: 0,
        })
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    pub fn solution(&self) -> &Solution {
        &self.solution
    }

    /// Entries not yet handed out
    pub fn remaining(&self) -> usize {
        self.solution.len() - self.cursor
    }
}

impl Driver for BfsDriver {
    fn name(&self) -> &str {
        "BFS"
    }

    fn next_move(&mut self) -> Result<IVec2> {
        let mv = self
            .solution
            .moves
            .get(self.cursor)
            .copied()
            .ok_or(RaceError::CursorOverrun {
                len: self.solution.len(),
            })?;
        self.cursor += 1;
        if let Move::Wait = mv {
            log::debug!("Tick {}: forced wait", self.cursor);
        }
        Ok(mv.acceleration())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driver(text: &str) -> BfsDriver {
        BfsDriver::initialize(text.parse().unwrap(), &Settings::default()).unwrap()
    }

    #[test]
    fn test_hands_out_moves_then_overruns() {
        let mut d = driver("S...F");
        assert_eq!(d.name(), "BFS");
        assert_eq!(d.remaining(), 3);

        let moves: Vec<IVec2> = (0..3).map(|_| d.next_move().unwrap()).collect();
        assert_eq!(moves[0], IVec2::X);
        assert_eq!(moves.iter().sum::<IVec2>().x, 2);
        assert_eq!(d.remaining(), 0);

        match d.next_move() {
            Err(RaceError::CursorOverrun { len }) => assert_eq!(len, 3),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_forced_wait_surfaces_as_zero() {
        let mut d = driver("#######\nS..ii.F\n#######");
        let waits = d.solution().moves.iter().filter(|mv| mv.is_wait()).count();
        assert!(waits > 0);

        let zeros = (0..d.solution().len())
            .map(|_| d.next_move().unwrap())
            .filter(|accel| *accel == IVec2::ZERO)
            .count();
        assert!(zeros >= waits);
    }

    #[test]
    fn test_missing_start_fails_initialization() {
        let result = BfsDriver::initialize("...F".parse().unwrap(), &Settings::default());
        assert!(matches!(result, Err(RaceError::NoStartTile)));
    }

    #[test]
    fn test_unsolvable_track_fails_initialization() {
        let result = BfsDriver::initialize("S#F".parse().unwrap(), &Settings::default());
        assert!(matches!(result, Err(RaceError::PlanningFailure { .. })));
    }

    #[test]
    fn test_driver_as_trait_object() {
        let mut drivers: Vec<Box<dyn Driver>> = vec![Box::new(driver("SF"))];
        assert_eq!(drivers[0].next_move().unwrap(), IVec2::X);
        assert!(drivers[0].next_move().is_err());
    }
}
