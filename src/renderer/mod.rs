//! Rendering module
//!
//! Renderers never read [`GameState`] directly. Each frame the shell captures
//! a [`FrameView`] and hands it to whichever [`Renderer`] is active.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod text;

use glam::Vec2;

use crate::sim::{Agent, Direction, GameState, GhostRole, Grid};

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use text::TextRenderer;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerView {
    pub pos: Vec2,
    pub direction: Direction,
    /// Mouth opening as a fraction of a half turn
    pub mouth: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GhostView {
    pub role: GhostRole,
    pub pos: Vec2,
    pub direction: Direction,
    pub vulnerable: bool,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone)]
pub struct FrameView {
    pub grid: Grid,
    pub player: PlayerView,
    pub ghosts: Vec<GhostView>,
    pub score: u64,
    pub level: u32,
    pub lives: u8,
    pub paused: bool,
    pub game_over: bool,
}

impl FrameView {
    pub fn capture(state: &GameState) -> Self {
        Self {
            grid: *state.maze.tiles(),
            player: PlayerView {
                pos: state.player.position(),
                direction: state.player.current_direction(),
                mouth: state.player.mouth,
            },
            ghosts: state
                .ghosts
                .iter()
                .map(|g| GhostView {
                    role: g.role,
                    pos: g.position(),
                    direction: g.current_direction(),
                    vulnerable: g.vulnerable,
                })
                .collect(),
            score: state.score,
            level: state.level,
            lives: state.lives,
            paused: state.is_paused(),
            game_over: state.is_game_over(),
        }
    }
}

/// A drawing backend
pub trait Renderer {
    fn draw(&mut self, view: &FrameView);
}
