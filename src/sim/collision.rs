//! Collision detection and response
//!
//! Walls reflect, pockets swallow, and equal-mass balls trade the velocity
//! component along the line between their centers.

use glam::Vec2;

use super::state::{Ball, GameEvent, SimulationState};
use super::table::{POCKETS, half_extents};
use crate::consts::*;

/// Negate the velocity component of every wall the ball's edge is past.
///
/// This is an edge-crossing test, not a pre-impact test: a ball still past a
/// wall on the next frame is reflected again whatever its direction.
/// Returns true if any wall was hit.
pub fn reflect_walls(ball: &mut Ball) -> bool {
    let half = half_extents();
    let mut hit = false;

    if ball.pos.x + BALL_RADIUS > half.x {
        ball.vel.x = -ball.vel.x;
        hit = true;
    }
    if ball.pos.x < BALL_RADIUS - half.x {
        ball.vel.x = -ball.vel.x;
        hit = true;
    }
    if ball.pos.y + BALL_RADIUS > half.y {
        ball.vel.y = -ball.vel.y;
        hit = true;
    }
    if ball.pos.y < BALL_RADIUS - half.y {
        ball.vel.y = -ball.vel.y;
        hit = true;
    }

    hit
}

/// Index of the first pocket whose center is closer than the pocket radius
pub fn find_pocket(pos: Vec2) -> Option<usize> {
    POCKETS
        .iter()
        .position(|pocket| pocket.distance(pos) < POCKET_RADIUS)
}

/// Equal-mass elastic exchange along the line of centers.
///
/// Both velocities are rotated into the frame where the separation is the x
/// axis, the x components are swapped, and the result is rotated back.
/// Tangential components are untouched. Returns `None` when the centers
/// coincide and there is no normal to work with.
pub fn exchange_normal_velocities(
    pos_a: Vec2,
    vel_a: Vec2,
    pos_b: Vec2,
    vel_b: Vec2,
) -> Option<(Vec2, Vec2)> {
    let separation = pos_a - pos_b;
    let dist = separation.length();
    if dist < SEPARATION_EPSILON {
        return None;
    }

    // (cos, sin) of the collision normal; rotating by its conjugate maps the
    // normal onto +x
    let normal = separation / dist;
    let to_local = Vec2::new(normal.x, -normal.y);

    let local_a = to_local.rotate(vel_a);
    let local_b = to_local.rotate(vel_b);

    let swapped_a = Vec2::new(local_b.x, local_a.y);
    let swapped_b = Vec2::new(local_a.x, local_b.y);

    Some((normal.rotate(swapped_a), normal.rotate(swapped_b)))
}

/// Check one unordered pair and respond if they touch and the pair is ready.
///
/// The cooldown is bumped every time the pair is checked, touching or not.
/// Returns true if velocities were exchanged.
pub fn collide_pair(state: &mut SimulationState, i: usize, j: usize) -> bool {
    if i >= j || state.balls[i].scored || state.balls[j].scored {
        return false;
    }

    let cooldown = state.cooldown.bump(i, j);

    let (head, tail) = state.balls.split_at_mut(j);
    let a = &mut head[i];
    let b = &mut tail[0];

    if a.pos.distance(b.pos) > 2.0 * BALL_RADIUS {
        return false;
    }
    // Still interpenetrating after a recent bounce
    if cooldown < COOLDOWN_MIN_FRAMES {
        return false;
    }

    let Some((vel_a, vel_b)) = exchange_normal_velocities(a.pos, a.vel, b.pos, b.vel) else {
        log::warn!("Balls {} and {} share a center, skipping response", i, j);
        return false;
    };
    a.vel = vel_a;
    b.vel = vel_b;

    state.cooldown.clear(i, j);
    log::debug!("Balls {} and {} collided", i, j);
    state.record(GameEvent::BallsCollided { a: i, b: j });
    true
}

/// Run one frame of wall, pocket and ball-ball checks in ball index order
pub fn check_collisions(state: &mut SimulationState) {
    for i in 0..BALL_COUNT {
        if state.balls[i].scored {
            continue;
        }

        let before = state.balls[i].vel;
        // A resting ball past an edge still "reflects" its zero velocity
        if reflect_walls(&mut state.balls[i]) && state.balls[i].vel != before {
            log::trace!("Ball {} bounced off a wall", i);
            state.record(GameEvent::WallBounce { ball: i });
        }

        if let Some(pocket) = find_pocket(state.balls[i].pos) {
            if state.balls[i].pocket() {
                log::debug!("Ball {} dropped into pocket {}", i, pocket);
                state.record(GameEvent::BallPocketed { ball: i, pocket });
            }
        }

        for j in (i + 1)..BALL_COUNT {
            collide_pair(state, i, j);
        }
    }
}
