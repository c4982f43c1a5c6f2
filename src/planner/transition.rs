//! Transition engine
//!
//! Turns the last node of a trajectory into its successor candidates. The
//! node's flags are checked in priority order: water ends the trajectory, ice
//! forces a slide, a crash lockout forces a wait, and only a free car gets to
//! choose among the nine accelerations.

use glam::IVec2;

use super::state::{CheckpointSet, Move, Node};
use super::tracer::SegmentTracer;
use crate::consts::ACCELERATIONS;
use crate::track::Track;

/// A trajectory extended by one node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub node: Node,
    pub mv: Move,
    pub passed: CheckpointSet,
    /// Crossed the finish with all checkpoints passed
    pub finish: bool,
    /// Whether the candidate's canonical state goes through the visited set.
    /// Crash lockout waits and slides off ice entered from rest repeat the
    /// state they start from and skip it.
    pub deduplicate: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct TransitionEngine<'a> {
    tracer: SegmentTracer<'a>,
}

impl<'a> TransitionEngine<'a> {
    pub fn new(track: &'a Track, crash_lockout: u8) -> Self {
        Self {
            tracer: SegmentTracer::new(track, crash_lockout),
        }
    }

    /// All successors of a trajectory ending in `node`
    pub fn expand(&self, node: &Node, passed: CheckpointSet) -> Vec<Candidate> {
        if node.in_water {
            Vec::new()
        } else if node.on_ice {
            vec![self.slide(node, passed)]
        } else if node.crash_lockout > 0 {
            vec![Self::wait_out(node, passed)]
        } else {
            ACCELERATIONS
                .iter()
                .map(|&accel| self.traced(node, passed, Move::Accelerate(accel)))
                .collect()
        }
    }

    /// Successor for one specific move, or `None` if the node does not allow it
    pub fn apply(&self, node: &Node, passed: CheckpointSet, mv: Move) -> Option<Candidate> {
        if node.in_water {
            return None;
        }
        let forced = node.on_ice || node.crash_lockout > 0;
        match mv {
            Move::Wait if node.on_ice => Some(self.slide(node, passed)),
            Move::Wait if node.crash_lockout > 0 => Some(Self::wait_out(node, passed)),
            Move::Accelerate(accel) if !forced && ACCELERATIONS.contains(&accel) => {
                Some(self.traced(node, passed, mv))
            }
            _ => None,
        }
    }

    fn traced(&self, node: &Node, mut passed: CheckpointSet, mv: Move) -> Candidate {
        let outcome = self.tracer.trace(node, mv, &mut passed);
        Candidate {
            node: outcome.node(),
            mv,
            passed,
            finish: outcome.is_finish(),
            deduplicate: true,
        }
    }

    /// Forced ice turn; a car that entered the ice at rest slides in place
    fn slide(&self, node: &Node, passed: CheckpointSet) -> Candidate {
        let mut candidate = self.traced(node, passed, Move::Wait);
        candidate.deduplicate = node.vel != IVec2::ZERO;
        candidate
    }

    fn wait_out(node: &Node, passed: CheckpointSet) -> Candidate {
        Candidate {
            node: Node {
                crash_lockout: node.crash_lockout - 1,
                ..*node
            },
            mv: Move::Wait,
            passed,
            finish: false,
            deduplicate: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::Grid;

    fn track(text: &str) -> Track {
        Track::new(text.parse::<Grid>().unwrap()).unwrap()
    }

    #[test]
    fn test_free_car_gets_nine_moves_in_order() {
        let t = track(".....\n.....\n..S..\n.....\n.....");
        let engine = TransitionEngine::new(&t, 3);
        let candidates = engine.expand(&Node::at_rest(IVec2::new(2, 2)), CheckpointSet::default());
        assert_eq!(candidates.len(), 9);

        let moves: Vec<Move> = candidates.iter().map(|c| c.mv).collect();
        assert_eq!(moves[0], Move::Accelerate(IVec2::new(-1, -1)));
        assert_eq!(moves[1], Move::Accelerate(IVec2::new(-1, 0)));
        assert_eq!(moves[8], Move::Accelerate(IVec2::new(1, 1)));
        assert!(candidates.iter().all(|c| c.deduplicate && !c.finish));
        assert_eq!(candidates[4].node, Node::at_rest(IVec2::new(2, 2)));
    }

    #[test]
    fn test_water_is_a_dead_end() {
        let t = track("S~");
        let engine = TransitionEngine::new(&t, 3);
        let node = Node {
            in_water: true,
            ..Node::at_rest(IVec2::new(1, 0))
        };
        assert!(engine.expand(&node, CheckpointSet::default()).is_empty());
        assert!(engine.apply(&node, CheckpointSet::default(), Move::Wait).is_none());
    }

    #[test]
    fn test_wall_collision_forces_three_waits() {
        let t = track("S.#..\n.....");
        let engine = TransitionEngine::new(&t, 3);
        let passed = CheckpointSet::default();

        let crash = engine
            .apply(&Node::new(IVec2::ZERO, IVec2::new(1, 0)), passed, Move::Accelerate(IVec2::X))
            .unwrap();
        assert_eq!(crash.node.pos, IVec2::new(1, 0));
        assert_eq!(crash.node.vel, IVec2::ZERO);
        assert_eq!(crash.node.crash_lockout, 3);

        let mut node = crash.node;
        for remaining in (0..3).rev() {
            let next = engine.expand(&node, passed);
            assert_eq!(next.len(), 1);
            assert_eq!(next[0].mv, Move::Wait);
            assert!(!next[0].deduplicate);
            assert_eq!(next[0].node.pos, IVec2::new(1, 0));
            assert_eq!(next[0].node.crash_lockout, remaining);
            node = next[0].node;
        }
        assert_eq!(engine.expand(&node, passed).len(), 9);
    }

    #[test]
    fn test_ice_forces_one_slide() {
        let t = track("S.i...");
        let engine = TransitionEngine::new(&t, 3);
        let passed = CheckpointSet::default();

        let on_ice = engine
            .apply(&Node::new(IVec2::ZERO, IVec2::new(1, 0)), passed, Move::Accelerate(IVec2::X))
            .unwrap();
        assert!(on_ice.node.on_ice);
        assert_eq!(on_ice.node.vel, IVec2::new(1, 0));

        let slide = engine.expand(&on_ice.node, passed);
        assert_eq!(slide.len(), 1);
        assert_eq!(slide[0].mv, Move::Wait);
        assert!(slide[0].deduplicate);
        assert_eq!(slide[0].node, Node::new(IVec2::new(3, 0), IVec2::new(1, 0)));
        assert_eq!(engine.expand(&slide[0].node, passed).len(), 9);
    }

    #[test]
    fn test_ice_entered_from_rest_slides_in_place() {
        let t = track("Si.");
        let engine = TransitionEngine::new(&t, 3);
        let passed = CheckpointSet::default();

        let on_ice = engine
            .apply(&Node::at_rest(IVec2::ZERO), passed, Move::Accelerate(IVec2::X))
            .unwrap();
        assert!(on_ice.node.on_ice);
        assert_eq!(on_ice.node.vel, IVec2::ZERO);

        let slide = engine.expand(&on_ice.node, passed);
        assert_eq!(slide.len(), 1);
        assert_eq!(slide[0].node, Node::at_rest(IVec2::new(1, 0)));
        assert!(!slide[0].deduplicate);
        assert_eq!(engine.expand(&slide[0].node, passed).len(), 9);
    }

    #[test]
    fn test_apply_rejects_moves_the_node_does_not_allow() {
        let t = track("S....");
        let engine = TransitionEngine::new(&t, 3);
        let passed = CheckpointSet::default();
        let free = Node::at_rest(IVec2::ZERO);
        let crashed = Node {
            crash_lockout: 2,
            ..free
        };

        assert!(engine.apply(&free, passed, Move::Wait).is_none());
        assert!(engine.apply(&free, passed, Move::Accelerate(IVec2::new(2, 0))).is_none());
        assert!(engine.apply(&crashed, passed, Move::Accelerate(IVec2::X)).is_none());
        assert_eq!(
            engine.apply(&crashed, passed, Move::Wait).map(|c| c.node.crash_lockout),
            Some(1)
        );
    }

    #[test]
    fn test_finish_flag_propagates() {
        let t = track("S.F");
        let engine = TransitionEngine::new(&t, 3);
        let candidate = engine
            .apply(
                &Node::new(IVec2::ZERO, IVec2::new(1, 0)),
                CheckpointSet::default(),
                Move::Accelerate(IVec2::X),
            )
            .unwrap();
        assert!(candidate.finish);
        assert_eq!(candidate.node.pos, IVec2::new(2, 0));
    }
}
