//! Immutable tile grid
//!
//! Coordinates are `(x, y)` with `x` the column and `y` the row, both starting
//! at the top-left corner. Anything outside `0..width` x `0..height` is out of
//! bounds, which lookups report as `None` rather than as a tile kind.

use std::fmt;
use std::str::FromStr;

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::tile::TileKind;
use crate::consts::DEFAULT_TILE_SIZE;
use crate::error::{RaceError, Result};

/// Rectangular grid of tile kinds, stored row-major
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct Grid {
    width: u32,
    height: u32,
    /// Pixels per tile edge (rendering metadata only)
    tile_size: u32,
    tiles: Vec<TileKind>,
}

/// Serialized form, validated through `Grid::new` on load
#[derive(Deserialize)]
struct RawGrid {
    width: u32,
    height: u32,
    #[serde(default = "default_tile_size")]
    tile_size: u32,
    tiles: Vec<TileKind>,
}

fn default_tile_size() -> u32 {
    DEFAULT_TILE_SIZE
}

impl TryFrom<RawGrid> for Grid {
    type Error = RaceError;

    fn try_from(raw: RawGrid) -> Result<Self> {
        Ok(Grid::new(raw.width, raw.height, raw.tiles)?.with_tile_size(raw.tile_size))
    }
}

impl Grid {
    pub fn new(width: u32, height: u32, tiles: Vec<TileKind>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(RaceError::InvalidGrid(format!(
                "dimensions must be non-zero, got {}x{}",
                width, height
            )));
        }
        if tiles.len() != width as usize * height as usize {
            return Err(RaceError::InvalidGrid(format!(
                "{} tiles do not fill a {}x{} grid",
                tiles.len(),
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            tile_size: DEFAULT_TILE_SIZE,
            tiles,
        })
    }

    /// Build from rows (outer index is `y`); all rows must be the same length
    pub fn from_rows(rows: Vec<Vec<TileKind>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if let Some((y, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(RaceError::InvalidGrid(format!(
                "row {} has {} tiles, expected {}",
                y,
                row.len(),
                width
            )));
        }
        Self::new(width as u32, height as u32, rows.into_iter().flatten().collect())
    }

    pub fn with_tile_size(mut self, tile_size: u32) -> Self {
        self.tile_size = tile_size;
        self
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    #[inline]
    pub fn in_bounds(&self, cell: IVec2) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as u32) < self.width && (cell.y as u32) < self.height
    }

    /// Tile at `cell`, or `None` when the cell is off the grid
    #[inline]
    pub fn tile_at(&self, cell: IVec2) -> Option<TileKind> {
        if !self.in_bounds(cell) {
            return None;
        }
        let index = cell.y as usize * self.width as usize + cell.x as usize;
        self.tiles.get(index).copied()
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (IVec2, TileKind)> + '_ {
        let width = self.width as usize;
        self.tiles
            .iter()
            .enumerate()
            .map(move |(i, &kind)| (IVec2::new((i % width) as i32, (i / width) as i32), kind))
    }

    /// First START tile in row-major order
    pub fn find_start(&self) -> Option<IVec2> {
        self.cells()
            .find(|&(_, kind)| kind == TileKind::Start)
            .map(|(cell, _)| cell)
    }

    /// Pixel position of a tile's centre
    pub fn tile_center(&self, cell: IVec2) -> Vec2 {
        (cell.as_vec2() + Vec2::splat(0.5)) * self.tile_size as f32
    }
}

impl FromStr for Grid {
    type Err = RaceError;

    /// One text row per grid row; blank lines and surrounding whitespace are ignored
    fn from_str(s: &str) -> Result<Self> {
        let mut rows = Vec::new();
        for (line_index, line) in s.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let row = line
                .chars()
                .enumerate()
                .map(|(column, ch)| {
                    TileKind::from_char(ch).ok_or(RaceError::UnknownTile {
                        ch,
                        line: line_index + 1,
                        column: column + 1,
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            rows.push(row);
        }
        Self::from_rows(rows)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.tiles.chunks(self.width as usize) {
            let line: String = row.iter().map(TileKind::as_char).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
