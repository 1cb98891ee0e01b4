//! Contact tests between agents and between the player and pellets

use glam::{IVec2, Vec2};

use crate::consts::PELLET_REACH;
use crate::tile_of;

/// Two agents touch when their top-left corners are closer than `radius`
#[inline]
pub fn agents_touch(a: Vec2, b: Vec2, radius: f32) -> bool {
    a.distance(b) < radius
}

/// Tiles checked for pellets around the player's centre, in priority order:
/// the centre tile, then right, left, below and above it
pub fn pellet_reach_tiles(center: Vec2) -> [IVec2; 5] {
    let here = tile_of(center);
    let reach = PELLET_REACH;
    [
        here,
        IVec2::new(tile_of(center + Vec2::new(reach, 0.0)).x, here.y),
        IVec2::new(tile_of(center - Vec2::new(reach, 0.0)).x, here.y),
        IVec2::new(here.x, tile_of(center + Vec2::new(0.0, reach)).y),
        IVec2::new(here.x, tile_of(center - Vec2::new(0.0, reach)).y),
    ]
}
