//! Canvas 2D renderer for the browser

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::{FrameView, GhostView, PlayerView, Renderer};
use crate::consts::*;
use crate::sim::{Direction, GhostRole, Tile};

const WALL_COLOR: &str = "#2121ff";
const PELLET_COLOR: &str = "#ffb8ff";
const FRIGHTENED_COLOR: &str = "#2121ff";
const PLAYER_COLOR: &str = "yellow";

fn ghost_color(role: GhostRole) -> &'static str {
    match role {
        GhostRole::Pursuer => "#ff0000",
        GhostRole::Ambusher => "#ffb8ff",
        GhostRole::Flanker => "#00ffff",
        GhostRole::Hybrid => "#ffb851",
    }
}

/// Angle the mouth opens around, in canvas radians (y down)
fn facing_angle(direction: Direction) -> f64 {
    match direction {
        Direction::Right => 0.0,
        Direction::Down => 0.5 * PI,
        Direction::Left => PI,
        Direction::Up => 1.5 * PI,
    }
}

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasRenderer {
    pub fn new(ctx: CanvasRenderingContext2d, width: f64, height: f64) -> Self {
        Self { ctx, width, height }
    }

    fn draw_frame(&self, view: &FrameView) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.set_fill_style_str("black");
        ctx.fill_rect(0.0, 0.0, self.width, self.height);

        self.draw_maze(view)?;
        self.draw_player(&view.player)?;
        for ghost in &view.ghosts {
            self.draw_ghost(ghost)?;
        }
        self.draw_hud(view)?;

        if view.game_over {
            self.draw_game_over(view.score)?;
        } else if view.paused {
            self.draw_paused()?;
        }
        Ok(())
    }

    fn draw_maze(&self, view: &FrameView) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let tile = f64::from(TILE_SIZE);
        for (y, row) in view.grid.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let px = x as f64 * tile;
                let py = y as f64 * tile;
                let radius = match cell {
                    Tile::Wall => {
                        ctx.set_fill_style_str(WALL_COLOR);
                        ctx.fill_rect(px, py, tile, tile);
                        continue;
                    }
                    Tile::Pellet => 2.0,
                    Tile::PowerPellet => 6.0,
                    Tile::Path | Tile::GhostHouse => continue,
                };
                ctx.set_fill_style_str(PELLET_COLOR);
                ctx.begin_path();
                ctx.arc(px + tile / 2.0, py + tile / 2.0, radius, 0.0, 2.0 * PI)?;
                ctx.fill();
            }
        }
        Ok(())
    }

    fn draw_player(&self, player: &PlayerView) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let half = f64::from(AGENT_SIZE) / 2.0;
        let cx = f64::from(player.pos.x) + half;
        let cy = f64::from(player.pos.y) + half;
        let facing = facing_angle(player.direction);
        let mouth = f64::from(player.mouth) * PI;

        ctx.set_fill_style_str(PLAYER_COLOR);
        ctx.begin_path();
        ctx.arc(cx, cy, half, facing + mouth, facing + 2.0 * PI - mouth)?;
        ctx.line_to(cx, cy);
        ctx.fill();
        Ok(())
    }

    fn draw_ghost(&self, ghost: &GhostView) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let size = f64::from(AGENT_SIZE);
        let half = size / 2.0;
        let x = f64::from(ghost.pos.x);
        let y = f64::from(ghost.pos.y);

        let body = if ghost.vulnerable {
            FRIGHTENED_COLOR
        } else {
            ghost_color(ghost.role)
        };
        ctx.set_fill_style_str(body);
        ctx.begin_path();
        ctx.arc(x + half, y + half, half, PI, 0.0)?;
        let bottom = y + size;
        ctx.line_to(x + size, bottom);
        // Wavy skirt
        let waves = 4;
        let wave_width = size / f64::from(waves);
        for i in (0..=waves).rev() {
            let lift = if i % 2 == 0 { 0.0 } else { 5.0 };
            ctx.line_to(x + f64::from(i) * wave_width, bottom - lift);
        }
        ctx.fill();

        // Eyes look the way the ghost is heading
        let look = ghost_look(ghost.direction);
        for side in [-8.0, 8.0] {
            let ex = x + half + side;
            let ey = y + half - 5.0;
            ctx.set_fill_style_str("white");
            ctx.begin_path();
            ctx.arc(ex, ey, 4.0, 0.0, 2.0 * PI)?;
            ctx.fill();
            ctx.set_fill_style_str("black");
            ctx.begin_path();
            ctx.arc(ex + look.0, ey + look.1, 2.0, 0.0, 2.0 * PI)?;
            ctx.fill();
        }
        Ok(())
    }

    fn draw_hud(&self, view: &FrameView) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.set_fill_style_str("white");
        ctx.set_font("20px Arial");
        ctx.set_text_align("left");
        ctx.fill_text(&format!("Score: {}", view.score), 10.0, self.height - 10.0)?;
        ctx.set_text_align("right");
        ctx.fill_text(
            &format!("Level: {}", view.level),
            self.width - 10.0,
            self.height - 10.0,
        )?;

        ctx.set_fill_style_str(PLAYER_COLOR);
        for i in 0..view.lives {
            let cx = 30.0 + f64::from(i) * 25.0;
            ctx.begin_path();
            ctx.arc(cx, 30.0, 10.0, 0.2 * PI, 1.8 * PI)?;
            ctx.line_to(cx, 30.0);
            ctx.fill();
        }
        Ok(())
    }

    fn draw_paused(&self) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.set_fill_style_str("rgba(0, 0, 0, 0.5)");
        ctx.fill_rect(0.0, 0.0, self.width, self.height);
        ctx.set_fill_style_str("white");
        ctx.set_text_align("center");
        ctx.set_font("48px Arial");
        ctx.fill_text("PAUSED", self.width / 2.0, self.height / 2.0)?;
        ctx.set_font("24px Arial");
        ctx.fill_text("Press P to continue", self.width / 2.0, self.height / 2.0 + 40.0)?;
        Ok(())
    }

    fn draw_game_over(&self, score: u64) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.set_fill_style_str("rgba(0, 0, 0, 0.75)");
        ctx.fill_rect(0.0, 0.0, self.width, self.height);
        ctx.set_text_align("center");
        ctx.set_fill_style_str("red");
        ctx.set_font("48px Arial");
        ctx.fill_text("GAME OVER", self.width / 2.0, self.height / 2.0)?;
        ctx.set_fill_style_str("white");
        ctx.set_font("24px Arial");
        ctx.fill_text(
            &format!("Final Score: {score}"),
            self.width / 2.0,
            self.height / 2.0 + 40.0,
        )?;
        ctx.fill_text(
            "Press ENTER to play again",
            self.width / 2.0,
            self.height / 2.0 + 80.0,
        )?;
        Ok(())
    }
}

fn ghost_look(direction: Direction) -> (f64, f64) {
    match direction {
        Direction::Up => (0.0, -2.0),
        Direction::Right => (2.0, 0.0),
        Direction::Down => (0.0, 2.0),
        Direction::Left => (-2.0, 0.0),
    }
}

impl Renderer for CanvasRenderer {
    fn draw(&mut self, view: &FrameView) {
        if let Err(e) = self.draw_frame(view) {
            log::warn!("Render error: {:?}", e);
        }
    }
}
