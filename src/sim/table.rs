//! Fixed table geometry
//!
//! The table is centered on the origin. Corner pockets sit slightly inside the
//! true corners, side pockets sit on the middle of the long edges.

use glam::Vec2;

use crate::consts::*;

const HALF_W: f32 = 0.5 * TABLE_WIDTH;
const HALF_H: f32 = 0.5 * TABLE_HEIGHT;

/// Pocket centers, bottom row left to right then top row left to right
pub const POCKETS: [Vec2; POCKET_COUNT] = [
    Vec2::new(-HALF_W + CORNER_POCKET_INSET, -HALF_H + CORNER_POCKET_INSET),
    Vec2::new(0.0, -HALF_H),
    Vec2::new(HALF_W - CORNER_POCKET_INSET, -HALF_H + CORNER_POCKET_INSET),
    Vec2::new(-HALF_W + CORNER_POCKET_INSET, HALF_H - CORNER_POCKET_INSET),
    Vec2::new(0.0, HALF_H),
    Vec2::new(HALF_W - CORNER_POCKET_INSET, HALF_H - CORNER_POCKET_INSET),
];

/// Starting layout: cue ball on the left, object balls racked on the right
pub const START_POSITIONS: [Vec2; BALL_COUNT] = [
    Vec2::new(-0.3 * TABLE_WIDTH, 0.0),
    Vec2::new(0.2 * TABLE_WIDTH, 0.0),
    Vec2::new(0.25 * TABLE_WIDTH, 0.05 * TABLE_HEIGHT),
    Vec2::new(0.25 * TABLE_WIDTH, -0.05 * TABLE_HEIGHT),
    Vec2::new(0.3 * TABLE_WIDTH, 0.1 * TABLE_HEIGHT),
    Vec2::new(0.3 * TABLE_WIDTH, 0.0),
    Vec2::new(0.3 * TABLE_WIDTH, -0.1 * TABLE_HEIGHT),
];

/// Half width/height of the playing surface
#[inline]
pub fn half_extents() -> Vec2 {
    Vec2::new(HALF_W, HALF_H)
}
