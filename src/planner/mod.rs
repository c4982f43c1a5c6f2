//! Route planning
//!
//! All planning logic is deterministic:
//! - Successors are generated in a fixed acceleration order
//! - Each canonical state is expanded at most once
//! - No randomness, no wall-clock dependencies

pub mod replay;
pub mod search;
pub mod state;
pub mod tracer;
pub mod transition;

pub use replay::Replay;
pub use search::{SearchEngine, SearchPhase, Solution, plan};
pub use state::{CheckpointSet, Move, Node, TrajectoryState};
pub use tracer::{Hit, SegmentCells, SegmentTracer, TraceOutcome};
pub use transition::{Candidate, TransitionEngine};
