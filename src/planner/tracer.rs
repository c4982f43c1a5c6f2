//! Segment tracing
//!
//! One move sweeps the car along the straight segment from its position to
//! `pos + vel + acceleration`. The segment is rasterized tile by tile and the
//! first tile with an effect decides where the car ends up.
//!
//! Rasterization:
//! - Horizontal, vertical and 45° segments step one tile at a time.
//! - Any other slope scans the bounding box, major axis outer, and keeps every
//!   tile whose centre lies within 0.5 of the ideal line `a·x + b·y + c = 0`
//!   (`a = -Δy`, `b = Δx`). No tile the segment touches is skipped.
//!
//! The origin tile is never reported; the target tile always is, last.

use glam::IVec2;

use super::state::{CheckpointSet, Move, Node};
use crate::track::{TileKind, Track};

/// Why tracing stopped early
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// Wall or grid edge
    Crash,
    Sand,
    Water,
    /// Ice on the final tile
    Ice,
    /// Finish crossed with every checkpoint passed
    Finish,
}

/// Result of tracing one move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceOutcome {
    /// Nothing stopped the car; it lands on the target
    Normal(Node),
    Special { node: Node, hit: Hit },
}

impl TraceOutcome {
    pub fn node(&self) -> Node {
        match self {
            TraceOutcome::Normal(node) => *node,
            TraceOutcome::Special { node, .. } => *node,
        }
    }

    pub fn hit(&self) -> Option<Hit> {
        match self {
            TraceOutcome::Normal(_) => None,
            TraceOutcome::Special { hit, .. } => Some(*hit),
        }
    }

    #[inline]
    pub fn is_finish(&self) -> bool {
        self.hit() == Some(Hit::Finish)
    }
}

/// Implicit line through two tile centres
#[derive(Debug, Clone, Copy)]
struct Line {
    a: i64,
    b: i64,
    c: i64,
    norm: f64,
}

impl Line {
    fn through(from: IVec2, to: IVec2) -> Self {
        let a = -i64::from(to.y - from.y);
        let b = i64::from(to.x - from.x);
        let c = -a * i64::from(from.x) - b * i64::from(from.y);
        Self {
            a,
            b,
            c,
            norm: ((a * a + b * b) as f64).sqrt(),
        }
    }

    #[inline]
    fn covers(&self, cell: IVec2) -> bool {
        let value = self.a * i64::from(cell.x) + self.b * i64::from(cell.y) + self.c;
        value.abs() as f64 / self.norm <= 0.5
    }
}

#[derive(Debug, Clone, Copy)]
enum Shape {
    /// Axis-aligned or 45°: one tile per step
    Stepped { steps: i32, taken: i32 },
    /// Bounding-box scan filtered by distance to the line
    Sloped {
        x_major: bool,
        line: Line,
        cursor: Option<IVec2>,
    },
}

/// Tiles crossed by the segment `origin -> target`, in travel order
#[derive(Debug, Clone)]
pub struct SegmentCells {
    origin: IVec2,
    target: IVec2,
    dir: IVec2,
    shape: Shape,
}

impl SegmentCells {
    pub fn new(origin: IVec2, target: IVec2) -> Self {
        let delta = target - origin;
        let span = delta.abs();
        let shape = if span.x == 0 || span.y == 0 || span.x == span.y {
            Shape::Stepped {
                steps: span.max_element(),
                taken: 0,
            }
        } else {
            Shape::Sloped {
                x_major: span.x > span.y,
                line: Line::through(origin, target),
                cursor: Some(origin),
            }
        };
        Self {
            origin,
            target,
            dir: delta.signum(),
            shape,
        }
    }

    /// Next box cell after `cell`, minor axis inner
    fn advance(&self, cell: IVec2, x_major: bool) -> Option<IVec2> {
        if x_major {
            if cell.y != self.target.y {
                Some(IVec2::new(cell.x, cell.y + self.dir.y))
            } else if cell.x != self.target.x {
                Some(IVec2::new(cell.x + self.dir.x, self.origin.y))
            } else {
                None
            }
        } else if cell.x != self.target.x {
            Some(IVec2::new(cell.x + self.dir.x, cell.y))
        } else if cell.y != self.target.y {
            Some(IVec2::new(self.origin.x, cell.y + self.dir.y))
        } else {
            None
        }
    }
}

impl Iterator for SegmentCells {
    type Item = IVec2;

    fn next(&mut self) -> Option<IVec2> {
        match self.shape {
            Shape::Stepped { steps, taken } => {
                if taken >= steps {
                    return None;
                }
                self.shape = Shape::Stepped {
                    steps,
                    taken: taken + 1,
                };
                Some(self.origin + self.dir * (taken + 1))
            }
            Shape::Sloped {
                x_major,
                line,
                mut cursor,
            } => {
                let mut found = None;
                while let Some(cell) = cursor {
                    cursor = self.advance(cell, x_major);
                    if cell != self.origin && line.covers(cell) {
                        found = Some(cell);
                        break;
                    }
                }
                self.shape = Shape::Sloped {
                    x_major,
                    line,
                    cursor,
                };
                found
            }
        }
    }
}

/// Applies one move to a node against the track's tiles
#[derive(Debug, Clone, Copy)]
pub struct SegmentTracer<'a> {
    track: &'a Track,
    crash_lockout: u8,
}

impl<'a> SegmentTracer<'a> {
    pub fn new(track: &'a Track, crash_lockout: u8) -> Self {
        Self {
            track,
            crash_lockout,
        }
    }

    /// Trace the move from `from`, marking crossed checkpoints in `passed`
    ///
    /// Checkpoints crossed before the car is stopped stay marked.
    pub fn trace(&self, from: &Node, mv: Move, passed: &mut CheckpointSet) -> TraceOutcome {
        let accel = mv.acceleration();
        let target = from.pos + from.vel + accel;
        let mut last = from.pos;

        for cell in SegmentCells::new(from.pos, target) {
            let Some(kind) = self.track.tile_at(cell) else {
                return self.crash(last);
            };
            match kind {
                TileKind::Wall => return self.crash(last),
                TileKind::Water => {
                    return TraceOutcome::Special {
                        node: Node {
                            in_water: true,
                            ..Node::at_rest(cell)
                        },
                        hit: Hit::Water,
                    };
                }
                TileKind::Sand => {
                    return TraceOutcome::Special {
                        node: Node::at_rest(cell),
                        hit: Hit::Sand,
                    };
                }
                TileKind::Ice if cell == target => {
                    // Slides on with the velocity it had before this move
                    return TraceOutcome::Special {
                        node: Node {
                            on_ice: true,
                            ..Node::new(cell, from.vel)
                        },
                        hit: Hit::Ice,
                    };
                }
                TileKind::Checkpoint => {
                    if let Some(index) = self.track.checkpoints().group_of(cell) {
                        passed.mark(index);
                    }
                }
                TileKind::Finish if passed.is_complete(self.track.checkpoints().len()) => {
                    return TraceOutcome::Special {
                        node: Node::at_rest(cell),
                        hit: Hit::Finish,
                    };
                }
                // Ice short of the target and finish with checkpoints missing
                // are driven over like road
                TileKind::Road
                | TileKind::Grass
                | TileKind::Start
                | TileKind::Ice
                | TileKind::Finish => {}
            }
            last = cell;
        }

        TraceOutcome::Normal(Node::new(target, from.vel + accel))
    }

    fn crash(&self, at: IVec2) -> TraceOutcome {
        TraceOutcome::Special {
            node: Node {
                crash_lockout: self.crash_lockout,
                ..Node::at_rest(at)
            },
            hit: Hit::Crash,
        }
    }
}
