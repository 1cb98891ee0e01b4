//! Plain-text renderer for terminals and tests

use std::fmt::Write;

use super::{FrameView, Renderer};
use crate::consts::*;
use crate::sim::{Direction, GhostRole, Tile};
use crate::tile_of;

/// Draws the board as one character per tile, agents over tiles
#[derive(Debug, Default)]
pub struct TextRenderer {
    frame: String,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently drawn frame
    pub fn frame(&self) -> &str {
        &self.frame
    }
}

fn tile_glyph(tile: Tile) -> char {
    match tile {
        Tile::Wall => '#',
        Tile::Pellet => '.',
        Tile::PowerPellet => 'o',
        Tile::GhostHouse => '-',
        Tile::Path => ' ',
    }
}

fn player_glyph(direction: Direction) -> char {
    match direction {
        Direction::Up => 'v',
        Direction::Right => '<',
        Direction::Down => '^',
        Direction::Left => '>',
    }
}

fn ghost_glyph(role: GhostRole, vulnerable: bool) -> char {
    if vulnerable {
        return 'w';
    }
    match role {
        GhostRole::Pursuer => 'B',
        GhostRole::Ambusher => 'P',
        GhostRole::Flanker => 'I',
        GhostRole::Hybrid => 'C',
    }
}

impl Renderer for TextRenderer {
    fn draw(&mut self, view: &FrameView) {
        let mut rows: Vec<Vec<char>> = view
            .grid
            .iter()
            .map(|row| row.iter().map(|t| tile_glyph(*t)).collect())
            .collect();

        let mut put = |pos: glam::Vec2, glyph: char| {
            let tile = tile_of(pos + glam::Vec2::splat(AGENT_SIZE / 2.0));
            if let Some(cell) = usize::try_from(tile.y)
                .ok()
                .and_then(|y| rows.get_mut(y))
                .zip(usize::try_from(tile.x).ok())
                .and_then(|(row, x)| row.get_mut(x))
            {
                *cell = glyph;
            }
        };
        for ghost in &view.ghosts {
            put(ghost.pos, ghost_glyph(ghost.role, ghost.vulnerable));
        }
        put(view.player.pos, player_glyph(view.player.direction));

        self.frame.clear();
        for row in rows {
            self.frame.extend(row);
            self.frame.push('\n');
        }
        let _ = write!(
            self.frame,
            "score {}  level {}  lives {}",
            view.score, view.level, view.lives
        );
        if view.game_over {
            self.frame.push_str("  GAME OVER");
        } else if view.paused {
            self.frame.push_str("  PAUSED");
        }
        self.frame.push('\n');
    }
}
