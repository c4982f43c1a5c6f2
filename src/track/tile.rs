//! Tile kinds and their one-character text form

use serde::{Deserialize, Serialize};

/// Semantic category of one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TileKind {
    #[default]
    Road,
    Grass,
    /// Stops the car dead on entry
    Sand,
    /// Stops the car and ends its race
    Water,
    /// Car slides through the next turn without steering
    Ice,
    /// Collision: car is put back and locked out for a few turns
    Wall,
    Start,
    Finish,
    Checkpoint,
}

impl TileKind {
    pub const ALL: [TileKind; 9] = [
        TileKind::Road,
        TileKind::Grass,
        TileKind::Sand,
        TileKind::Water,
        TileKind::Ice,
        TileKind::Wall,
        TileKind::Start,
        TileKind::Finish,
        TileKind::Checkpoint,
    ];

    pub fn as_char(&self) -> char {
        match self {
            TileKind::Road => '.',
            TileKind::Grass => 'g',
            TileKind::Sand => 's',
            TileKind::Water => '~',
            TileKind::Ice => 'i',
            TileKind::Wall => '#',
            TileKind::Start => 'S',
            TileKind::Finish => 'F',
            TileKind::Checkpoint => 'C',
        }
    }

    pub fn from_char(ch: char) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_char() == ch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_mapping_is_bijective() {
        for kind in TileKind::ALL {
            assert_eq!(TileKind::from_char(kind.as_char()), Some(kind));
        }
        assert_eq!(TileKind::from_char('x'), None);
    }
}
