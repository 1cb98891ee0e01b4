//! Movement validation against the maze
//!
//! Agents move in sub-tile pixel steps, so a move is judged by where the
//! agent's box would land: the four corners are sampled slightly inset so an
//! agent a pixel or two off the lane can still turn into a side corridor.

use glam::Vec2;

use super::direction::{Direction, DirectionSet};
use super::maze::{Maze, Tile};
use crate::consts::*;
use crate::tile_of;

/// Who is asking. The ghost house is off limits to the player only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorRole {
    Player,
    Ghost,
}

impl ActorRole {
    fn blocked_by(self, tile: Tile) -> bool {
        match tile {
            Tile::Wall => true,
            Tile::GhostHouse => self == ActorRole::Player,
            _ => false,
        }
    }
}

/// Can an agent at `pos` move `step` pixels toward `dir`?
pub fn is_legal(maze: &Maze, pos: Vec2, dir: Direction, role: ActorRole, step: f32) -> bool {
    let next = pos + dir.unit() * step;

    // Tunnel mouths: past the side edges everything is open
    if next.x < -TILE_SIZE || next.x > maze.width_px() {
        return true;
    }

    let near = CLEARANCE;
    let far = AGENT_SIZE - CLEARANCE;
    let corners = [
        next + Vec2::new(near, near),
        next + Vec2::new(far, near),
        next + Vec2::new(near, far),
        next + Vec2::new(far, far),
    ];

    !corners.iter().any(|corner| {
        let tile = tile_of(*corner);
        role.blocked_by(maze.tile_at(tile.x, tile.y))
    })
}

/// Every direction an agent could legally take from `pos`
pub fn legal_directions_from(maze: &Maze, pos: Vec2, role: ActorRole, lookahead: f32) -> DirectionSet {
    Direction::ALL
        .into_iter()
        .filter(|dir| is_legal(maze, pos, *dir, role, lookahead))
        .collect()
}

/// Carry an agent that walked off one side of the tunnel in from the other
pub fn wrap_tunnel(pos: &mut Vec2, maze: &Maze) {
    let width = maze.width_px();
    if pos.x < -TILE_SIZE {
        pos.x = width;
    } else if pos.x > width {
        pos.x = -TILE_SIZE;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn at(tx: f32, ty: f32) -> Vec2 {
        Vec2::new(tx * TILE_SIZE, ty * TILE_SIZE)
    }

    #[test]
    fn test_open_corridor() {
        let maze = Maze::new();
        // Top-left lane, row 1
        let pos = at(2.0, 1.0);
        assert!(is_legal(&maze, pos, Direction::Right, ActorRole::Player, 4.0));
        assert!(is_legal(&maze, pos, Direction::Left, ActorRole::Player, 4.0));
        assert!(!is_legal(&maze, pos, Direction::Up, ActorRole::Player, 4.0));
        assert!(!is_legal(&maze, pos, Direction::Down, ActorRole::Player, 4.0));
    }

    #[test]
    fn test_clearance_allows_slight_misalignment() {
        let maze = Maze::new();
        // Column 1 runs down from row 1; one pixel off still turns
        let pos = at(1.0, 1.0) + Vec2::new(1.0, 0.0);
        assert!(is_legal(&maze, pos, Direction::Down, ActorRole::Player, 4.0));
        // Three pixels off clips the wall at column 2
        let pos = at(1.0, 1.0) + Vec2::new(3.0, 0.0);
        assert!(!is_legal(&maze, pos, Direction::Down, ActorRole::Player, 4.0));
    }

    #[test]
    fn test_ghost_house_is_ghost_only() {
        let maze = Maze::new();
        // Standing in the doorway above the house
        let door = HOUSE_EXIT;
        assert!(!is_legal(&maze, door, Direction::Down, ActorRole::Player, 4.0));
        assert!(is_legal(&maze, door, Direction::Down, ActorRole::Ghost, 4.0));
    }

    #[test]
    fn test_tunnel_is_always_open() {
        let maze = Maze::new();
        let pos = Vec2::new(-TILE_SIZE + 1.0, 9.0 * TILE_SIZE + 50.0);
        // Projected past the left edge: legal even though the row below is wall
        assert!(is_legal(&maze, pos, Direction::Left, ActorRole::Player, 4.0));
        let pos = Vec2::new(maze.width_px() - 2.0, 0.0);
        assert!(is_legal(&maze, pos, Direction::Right, ActorRole::Player, 4.0));
    }

    #[test]
    fn test_legal_directions_at_junction() {
        let maze = Maze::new();
        // Row 3, column 4: open left, right and both ways along column 4
        let dirs = legal_directions_from(&maze, at(4.0, 3.0), ActorRole::Ghost, 4.0);
        assert_eq!(dirs.len(), 4);

        // Pocket corner top-left: only right and down
        let dirs = legal_directions_from(&maze, at(1.0, 1.0), ActorRole::Ghost, 4.0);
        assert!(dirs.contains(Direction::Right));
        assert!(dirs.contains(Direction::Down));
        assert!(!dirs.contains(Direction::Up));
        assert!(!dirs.contains(Direction::Left));
    }

    #[test]
    fn test_half_tile_lookahead_sees_further() {
        let maze = Maze::new();
        // Six pixels short of the wall at column 0
        let pos = at(1.0, 1.0) + Vec2::new(6.0, 0.0);
        let short = legal_directions_from(&maze, pos, ActorRole::Ghost, 4.0);
        let long = legal_directions_from(&maze, pos, ActorRole::Ghost, HALF_TILE);
        assert!(short.contains(Direction::Left));
        assert!(!long.contains(Direction::Left));
    }

    #[test]
    fn test_wrap_tunnel() {
        let maze = Maze::new();
        let mut pos = Vec2::new(-TILE_SIZE - 1.0, 270.0);
        wrap_tunnel(&mut pos, &maze);
        assert_eq!(pos.x, maze.width_px());

        let mut pos = Vec2::new(maze.width_px() + 1.0, 270.0);
        wrap_tunnel(&mut pos, &maze);
        assert_eq!(pos.x, -TILE_SIZE);

        let mut pos = Vec2::new(100.0, 270.0);
        wrap_tunnel(&mut pos, &maze);
        assert_eq!(pos.x, 100.0);
    }

    fn corner_tiles(maze: &Maze, pos: Vec2, dir: Direction, step: f32) -> Vec<Tile> {
        let next = pos + dir.unit() * step;
        [
            Vec2::new(CLEARANCE, CLEARANCE),
            Vec2::new(AGENT_SIZE - CLEARANCE, CLEARANCE),
            Vec2::new(CLEARANCE, AGENT_SIZE - CLEARANCE),
            Vec2::new(AGENT_SIZE - CLEARANCE, AGENT_SIZE - CLEARANCE),
        ]
        .iter()
        .map(|offset| {
            let tile = tile_of(next + *offset);
            maze.tile_at(tile.x, tile.y)
        })
        .collect()
    }

    fn any_direction() -> impl Strategy<Value = Direction> {
        prop::sample::select(Direction::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn prop_legal_iff_no_corner_blocked(
            x in 0.0f32..400.0,
            y in 0.0f32..600.0,
            dir in any_direction(),
            step in 1.0f32..15.0,
        ) {
            let maze = Maze::new();
            let pos = Vec2::new(x, y);
            let tiles = corner_tiles(&maze, pos, dir, step);

            let player_ok = tiles.iter().all(|t| !matches!(t, Tile::Wall | Tile::GhostHouse));
            let ghost_ok = tiles.iter().all(|t| *t != Tile::Wall);

            prop_assert_eq!(is_legal(&maze, pos, dir, ActorRole::Player, step), player_ok);
            prop_assert_eq!(is_legal(&maze, pos, dir, ActorRole::Ghost, step), ghost_ok);
        }
    }
}
