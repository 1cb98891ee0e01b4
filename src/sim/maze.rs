//! The tile maze
//!
//! An immutable level template plus the mutable runtime grid the player eats
//! pellets out of. Both share the same fixed dimensions, so a runtime grid can
//! never drift out of shape.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tile codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Tile {
    #[default]
    Path = 0,
    Wall = 1,
    Pellet = 2,
    PowerPellet = 3,
    /// Ghosts only
    GhostHouse = 4,
}

impl Tile {
    pub fn is_pellet(self) -> bool {
        matches!(self, Tile::Pellet | Tile::PowerPellet)
    }
}

/// What was eaten when a pellet-bearing tile was cleared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PelletKind {
    Normal,
    Power,
}

impl PelletKind {
    /// Score awarded for eating this pellet
    pub fn points(self) -> u64 {
        match self {
            PelletKind::Normal => PELLET_POINTS,
            PelletKind::Power => POWER_PELLET_POINTS,
        }
    }
}

pub type Grid = [[Tile; MAZE_WIDTH]; MAZE_HEIGHT];

/// The built-in level, row-major. Rows 7, 9 and 11 open onto the side tunnels.
#[rustfmt::skip]
pub const TEMPLATE: Grid = {
    const I: Tile = Tile::Wall;
    #[allow(non_upper_case_globals)]
    const o: Tile = Tile::Pellet;
    const O: Tile = Tile::PowerPellet;
    #[allow(non_upper_case_globals)]
    const e: Tile = Tile::Path;
    #[allow(non_upper_case_globals)]
    const n: Tile = Tile::GhostHouse;
    [
    [I,I,I,I,I,I,I,I,I,I,I,I,I,I,I],
    [I,o,o,o,o,o,o,o,o,o,o,o,o,o,I],
    [I,o,I,I,o,I,I,I,I,I,o,I,I,o,I],
    [I,O,o,o,o,o,o,o,o,o,o,o,o,O,I],
    [I,o,I,I,o,I,o,I,I,I,o,I,I,o,I],
    [I,o,o,o,o,I,o,o,o,I,o,o,o,o,I],
    [I,I,I,I,o,I,I,e,I,I,o,I,I,I,I],
    [e,e,e,I,o,I,n,n,n,I,o,I,e,e,e],
    [I,I,I,I,o,I,n,n,n,I,o,I,I,I,I],
    [e,e,e,e,o,e,n,n,n,e,o,e,e,e,e],
    [I,I,I,I,o,I,I,I,I,I,o,I,I,I,I],
    [e,e,e,I,o,I,e,e,e,I,o,I,e,e,e],
    [I,I,I,I,o,I,I,I,I,I,o,I,I,I,I],
    [I,o,o,o,o,o,o,o,o,o,o,o,o,o,I],
    [I,o,I,I,o,I,I,I,I,I,o,I,I,o,I],
    [I,O,o,I,o,o,o,o,o,o,o,I,o,O,I],
    [I,I,o,I,o,I,o,I,I,I,o,I,o,I,I],
    [I,o,o,o,o,I,o,o,o,I,o,o,o,o,I],
    [I,o,I,I,I,I,I,I,I,I,I,I,I,o,I],
    [I,o,o,o,o,o,o,o,o,o,o,o,o,o,I],
    [I,I,I,I,I,I,I,I,I,I,I,I,I,I,I],
    ]
};

fn count_pellets(grid: &Grid) -> usize {
    grid.iter().flatten().filter(|tile| tile.is_pellet()).count()
}

/// Runtime maze state
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "MazeSnapshot")]
pub struct Maze {
    tiles: Grid,
    pellets: usize,
}

/// Loaded form of a maze. The stored pellet count is ignored and recounted
/// from the grid, so it can never disagree with the tiles.
#[derive(Deserialize)]
struct MazeSnapshot {
    tiles: Grid,
}

impl From<MazeSnapshot> for Maze {
    fn from(snapshot: MazeSnapshot) -> Self {
        Self {
            pellets: count_pellets(&snapshot.tiles),
            tiles: snapshot.tiles,
        }
    }
}

impl Default for Maze {
    fn default() -> Self {
        Self::new()
    }
}

impl Maze {
    pub fn new() -> Self {
        Self {
            tiles: TEMPLATE,
            pellets: count_pellets(&TEMPLATE),
        }
    }

    /// Tile at a tile coordinate. Anything off the grid reads as open path so
    /// the tunnel mouths stay walkable.
    pub fn tile_at(&self, tx: i32, ty: i32) -> Tile {
        if tx < 0 || ty < 0 {
            return Tile::Path;
        }
        self.tiles
            .get(ty as usize)
            .and_then(|row| row.get(tx as usize))
            .copied()
            .unwrap_or(Tile::Path)
    }

    /// Clear a pellet-bearing tile, returning what was eaten
    pub fn consume_pellet(&mut self, tx: i32, ty: i32) -> Option<PelletKind> {
        if tx < 0 || ty < 0 {
            return None;
        }
        let tile = self.tiles.get_mut(ty as usize)?.get_mut(tx as usize)?;
        let kind = match *tile {
            Tile::Pellet => PelletKind::Normal,
            Tile::PowerPellet => PelletKind::Power,
            _ => return None,
        };
        *tile = Tile::Path;
        self.pellets -= 1;
        Some(kind)
    }

    /// Pellets and power pellets still on the board
    pub fn remaining_pellets(&self) -> usize {
        self.pellets
    }

    /// Restore every pellet for a new level or a new game
    pub fn reset_to_template(&mut self) {
        self.tiles = TEMPLATE;
        self.pellets = count_pellets(&self.tiles);
    }

    pub fn tiles(&self) -> &Grid {
        &self.tiles
    }

    pub fn width_px(&self) -> f32 {
        MAZE_WIDTH as f32 * TILE_SIZE
    }

    pub fn height_px(&self) -> f32 {
        MAZE_HEIGHT as f32 * TILE_SIZE
    }
}
