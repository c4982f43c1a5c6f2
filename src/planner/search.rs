//! Breadth-first route search
//!
//! Expands every trajectory of the frontier once per generation. A canonical
//! state is only ever expanded by the first trajectory that reaches it, and
//! generations are expanded in order, so the first trajectory to reach the
//! finish uses the fewest generations. Forced waits count as generations.

use std::collections::HashSet;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::state::{Move, Node, Step, TrajectoryArena, TrajectoryState};
use super::transition::TransitionEngine;
use crate::error::{RaceError, Result};
use crate::settings::Settings;
use crate::track::Track;

/// Where the search stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Searching,
    /// Terminal trajectory found; `terminal` is its arena id
    Solved { terminal: usize },
}

/// The winning move sequence, extracted from the terminal trajectory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    pub moves: Vec<Move>,
    /// Finish tile the route ends on
    pub finish: IVec2,
    /// Generations expanded before the finish was reached
    pub generations: u32,
    /// Canonical states visited
    pub explored: usize,
}

impl Solution {
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Moves that carry a steering choice (forced waits excluded)
    pub fn steering_moves(&self) -> usize {
        self.moves.iter().filter(|mv| !mv.is_wait()).count()
    }
}

pub struct SearchEngine<'a> {
    transitions: TransitionEngine<'a>,
    settings: Settings,
    arena: TrajectoryArena,
    visited: HashSet<TrajectoryState>,
    frontier: Vec<usize>,
    generation: u32,
    phase: SearchPhase,
}

impl<'a> SearchEngine<'a> {
    /// Frontier holds the start trajectory, which is also the only visited state
    pub fn new(track: &'a Track, settings: &Settings) -> Self {
        let mut arena = TrajectoryArena::default();
        let root = arena.root(Node::at_rest(track.start()));
        let start = arena.get(root);
        let mut visited = HashSet::new();
        visited.insert(TrajectoryState::of(&start.node, start.passed));

        log::info!("Start: {} {}", track.start().x, track.start().y);
        log::info!("Checkpoints: {}", track.checkpoints().len());

        Self {
            transitions: TransitionEngine::new(track, settings.crash_lockout_turns),
            settings: settings.clone(),
            arena,
            visited,
            frontier: vec![root],
            generation: 0,
            phase: SearchPhase::Searching,
        }
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Last nodes of the trajectories waiting to be expanded
    pub fn frontier_nodes(&self) -> Vec<Node> {
        self.frontier.iter().map(|&id| self.arena.get(id).node).collect()
    }

    pub fn explored(&self) -> usize {
        self.visited.len()
    }

    /// Expand one generation
    ///
    /// Fails with `PlanningFailure` once the frontier is empty.
    pub fn advance(&mut self) -> Result<SearchPhase> {
        if let SearchPhase::Solved { .. } = self.phase {
            return Ok(self.phase);
        }
        if self.frontier.is_empty() {
            log::warn!(
                "Generation {}: no paths left, finish unreachable",
                self.generation
            );
            return Err(RaceError::PlanningFailure {
                generations: self.generation,
                explored: self.explored(),
            });
        }

        self.generation += 1;
        let frontier = std::mem::take(&mut self.frontier);
        let mut next = Vec::new();

        for parent in frontier {
            let (node, passed) = {
                let step = self.arena.get(parent);
                (step.node, step.passed)
            };
            for candidate in self.transitions.expand(&node, passed) {
                if candidate.deduplicate
                    && !self
                        .visited
                        .insert(TrajectoryState::of(&candidate.node, candidate.passed))
                {
                    continue;
                }
                let id = self.arena.push(Step {
                    parent: Some(parent),
                    node: candidate.node,
                    mv: Some(candidate.mv),
                    passed: candidate.passed,
                });
                if candidate.finish {
                    log::info!("Generation {}: Finish found!", self.generation);
                    self.phase = SearchPhase::Solved { terminal: id };
                    return Ok(self.phase);
                }
                next.push(id);
            }
        }

        if self.settings.reports_progress(self.generation) {
            log::info!(
                "Generation {}: {} paths, {} states explored",
                self.generation,
                next.len(),
                self.explored()
            );
        } else {
            log::debug!("Generation {}: {} paths", self.generation, next.len());
        }
        self.frontier = next;
        Ok(self.phase)
    }

    /// Run to completion
    pub fn run(mut self) -> Result<Solution> {
        loop {
            if let SearchPhase::Solved { terminal } = self.advance()? {
                return Ok(self.solution(terminal));
            }
        }
    }

    fn solution(&self, terminal: usize) -> Solution {
        Solution {
            moves: self.arena.moves(terminal),
            finish: self.arena.get(terminal).node.pos,
            generations: self.generation,
            explored: self.explored(),
        }
    }
}

/// Plan a route on `track`
pub fn plan(track: &Track, settings: &Settings) -> Result<Solution> {
    SearchEngine::new(track, settings).run()
}
