//! Replay of a recorded move sequence
//!
//! Drives a car from the start tile through the same transition rules the
//! search uses, without deduplication.

use super::state::{CheckpointSet, Move, Node};
use super::transition::TransitionEngine;
use crate::error::{RaceError, Result};
use crate::settings::Settings;
use crate::track::Track;

pub struct Replay<'a> {
    transitions: TransitionEngine<'a>,
    /// Every node so far, start first
    nodes: Vec<Node>,
    passed: CheckpointSet,
    finished: bool,
}

impl<'a> Replay<'a> {
    pub fn new(track: &'a Track, settings: &Settings) -> Self {
        Self {
            transitions: TransitionEngine::new(track, settings.crash_lockout_turns),
            nodes: vec![Node::at_rest(track.start())],
            passed: CheckpointSet::default(),
            finished: false,
        }
    }

    /// Apply the next move; fails if the car cannot take it
    pub fn apply(&mut self, mv: Move) -> Result<&Node> {
        let step = self.nodes.len() - 1;
        if self.finished {
            return Err(RaceError::ReplayMismatch { step });
        }
        let candidate = self
            .transitions
            .apply(self.node(), self.passed, mv)
            .ok_or(RaceError::ReplayMismatch { step })?;

        self.passed = candidate.passed;
        self.finished = candidate.finish;
        self.nodes.push(candidate.node);
        Ok(self.node())
    }

    pub fn apply_all(&mut self, moves: &[Move]) -> Result<()> {
        for &mv in moves {
            self.apply(mv)?;
        }
        Ok(())
    }

    /// Current car node
    pub fn node(&self) -> &Node {
        // Never empty: the start node is pushed on construction
        &self.nodes[self.nodes.len() - 1]
    }

    /// Every node so far, start first
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn passed(&self) -> CheckpointSet {
        self.passed
    }

    pub fn finished(&self) -> bool {
        self.finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::Grid;
    use glam::IVec2;

    fn track(text: &str) -> Track {
        Track::new(text.parse::<Grid>().unwrap()).unwrap()
    }

    #[test]
    fn test_replay_reaches_finish() {
        let t = track("S...F");
        let mut replay = Replay::new(&t, &Settings::default());
        replay
            .apply_all(&[
                Move::Accelerate(IVec2::X),
                Move::Accelerate(IVec2::ZERO),
                Move::Accelerate(IVec2::X),
            ])
            .unwrap();
        assert!(replay.finished());
        assert_eq!(replay.node().pos, IVec2::new(4, 0));
        assert_eq!(replay.node().vel, IVec2::ZERO);
        let xs: Vec<i32> = replay.nodes().iter().map(|n| n.pos.x).collect();
        assert_eq!(xs, vec![0, 1, 2, 4]);
    }

    #[test]
    fn test_replay_rejects_steering_during_lockout() {
        let t = track("S#.F");
        let mut replay = Replay::new(&t, &Settings::default());
        let crashed = replay.apply(Move::Accelerate(IVec2::X)).unwrap();
        assert_eq!(crashed.crash_lockout, 3);

        let err = replay.apply(Move::Accelerate(IVec2::X)).unwrap_err();
        assert!(matches!(err, RaceError::ReplayMismatch { step: 1 }));

        replay.apply(Move::Wait).unwrap();
        assert_eq!(replay.node().crash_lockout, 2);
    }

    #[test]
    fn test_replay_stops_after_finish() {
        let t = track("SF.");
        let mut replay = Replay::new(&t, &Settings::default());
        replay.apply(Move::Accelerate(IVec2::X)).unwrap();
        assert!(replay.finished());
        assert!(replay.apply(Move::Accelerate(IVec2::ZERO)).is_err());
    }

    #[test]
    fn test_replay_tracks_checkpoints() {
        let t = track("SC.F");
        let mut replay = Replay::new(&t, &Settings::default());
        replay.apply(Move::Accelerate(IVec2::X)).unwrap();
        assert!(replay.passed().contains(0));
        assert!(!replay.finished());
    }
}
