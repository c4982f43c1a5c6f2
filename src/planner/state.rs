//! Planner state types
//!
//! A trajectory is stored as a chain of `Step`s in an arena: each step keeps
//! the index of its parent, so children share their history instead of
//! copying it.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// One drive command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    /// Change velocity by a delta in `{-1, 0, 1}²`
    Accelerate(IVec2),
    /// Forced turn (ice slide or crash lockout); no steering input
    Wait,
}

impl Move {
    /// Acceleration actually applied this turn
    #[inline]
    pub fn acceleration(&self) -> IVec2 {
        match self {
            Move::Accelerate(delta) => *delta,
            Move::Wait => IVec2::ZERO,
        }
    }

    pub fn is_wait(&self) -> bool {
        matches!(self, Move::Wait)
    }
}

/// Set of passed checkpoint indices (at most 64)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CheckpointSet {
    bits: u64,
}

impl CheckpointSet {
    #[inline]
    pub fn mark(&mut self, index: usize) {
        self.bits |= 1u64 << index;
    }

    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        self.bits & (1u64 << index) != 0
    }

    pub fn count(&self) -> u32 {
        self.bits.count_ones()
    }

    /// True when every index in `0..total` is marked
    #[inline]
    pub fn is_complete(&self, total: usize) -> bool {
        let mask = if total >= 64 {
            u64::MAX
        } else {
            (1u64 << total) - 1
        };
        self.bits & mask == mask
    }
}

/// One point along a trajectory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Node {
    pub pos: IVec2,
    pub vel: IVec2,
    /// Ended the last move on ice: next turn slides with the same velocity
    pub on_ice: bool,
    /// Ended in water: the race is over for this trajectory
    pub in_water: bool,
    /// Forced-wait turns left after a collision
    pub crash_lockout: u8,
}

impl Node {
    pub fn new(pos: IVec2, vel: IVec2) -> Self {
        Self {
            pos,
            vel,
            ..Default::default()
        }
    }

    pub fn at_rest(pos: IVec2) -> Self {
        Self::new(pos, IVec2::ZERO)
    }
}

/// Canonical search key: position, velocity and checkpoint progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrajectoryState {
    pub pos: IVec2,
    pub vel: IVec2,
    pub passed: CheckpointSet,
}

impl TrajectoryState {
    pub fn of(node: &Node, passed: CheckpointSet) -> Self {
        Self {
            pos: node.pos,
            vel: node.vel,
            passed,
        }
    }
}

/// Arena entry: the newest node of a trajectory and the move that produced it
#[derive(Debug, Clone)]
pub struct Step {
    pub parent: Option<usize>,
    pub node: Node,
    /// `None` only for the root (start) step
    pub mv: Option<Move>,
    pub passed: CheckpointSet,
}

/// Append-only storage for every trajectory created during one search
#[derive(Debug, Default)]
pub struct TrajectoryArena {
    steps: Vec<Step>,
}

impl TrajectoryArena {
    pub fn root(&mut self, node: Node) -> usize {
        self.push(Step {
            parent: None,
            node,
            mv: None,
            passed: CheckpointSet::default(),
        })
    }

    pub fn push(&mut self, step: Step) -> usize {
        self.steps.push(step);
        self.steps.len() - 1
    }

    #[inline]
    pub fn get(&self, id: usize) -> &Step {
        &self.steps[id]
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Full move history of the trajectory ending at `id`, oldest first
    pub fn moves(&self, id: usize) -> Vec<Move> {
        let mut moves = Vec::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let step = &self.steps[current];
            if let Some(mv) = step.mv {
                moves.push(mv);
            }
            cursor = step.parent;
        }
        moves.reverse();
        moves
    }
}
