//! Checkpoint grouping
//!
//! Adjacent CHECKPOINT tiles form one logical checkpoint. Grouping is a single
//! row-major pass: each tile joins the first existing group holding an
//! 8-adjacent tile, otherwise it opens a new group. Groups are never merged,
//! so a tile that bridges two earlier groups leaves them separate.

use std::collections::HashMap;

use glam::IVec2;

use super::grid::Grid;
use super::tile::TileKind;

/// Checkpoint groups in discovery order, plus a tile -> group lookup
#[derive(Debug, Clone, Default)]
pub struct Checkpoints {
    groups: Vec<Vec<IVec2>>,
    index: HashMap<IVec2, usize>,
}

impl Checkpoints {
    /// Group every CHECKPOINT tile of `grid`
    pub fn from_grid(grid: &Grid) -> Self {
        let mut checkpoints = Self::default();
        for (cell, kind) in grid.cells() {
            if kind == TileKind::Checkpoint {
                checkpoints.assign(cell);
            }
        }
        checkpoints
    }

    fn assign(&mut self, cell: IVec2) {
        let found = self
            .groups
            .iter()
            .position(|group| group.iter().any(|&tile| is_adjacent(tile, cell)));

        let group = match found {
            Some(group) => {
                self.groups[group].push(cell);
                group
            }
            None => {
                self.groups.push(vec![cell]);
                self.groups.len() - 1
            }
        };
        self.index.insert(cell, group);
    }

    /// Number of logical checkpoints
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Group index of a checkpoint tile
    pub fn group_of(&self, cell: IVec2) -> Option<usize> {
        self.index.get(&cell).copied()
    }

    pub fn groups(&self) -> &[Vec<IVec2>] {
        &self.groups
    }
}

/// 8-connectivity
#[inline]
fn is_adjacent(a: IVec2, b: IVec2) -> bool {
    let d = (a - b).abs();
    d.x <= 1 && d.y <= 1
}
