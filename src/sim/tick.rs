//! Per-frame simulation tick
//!
//! The pipeline order is part of the contract: terminal check, charge,
//! collisions, integration, friction. Reordering changes gameplay.

use glam::Vec2;

use super::collision::check_collisions;
use super::shot::advance_charge;
use super::state::{Ball, GameEvent, ResetReason, SimulationState};
use crate::consts::CUE_BALL;
use crate::settings::Settings;

/// What a tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Balls moved (or rested) as usual
    Advanced,
    /// The game ended and the rack was restored; nothing else ran
    Reset(ResetReason),
}

/// The game is over once the cue ball or every object ball is down.
/// The cue ball check comes first, so a fully cleared table with the cue ball
/// also pocketed counts as a loss.
pub fn terminal_condition(state: &SimulationState) -> Option<ResetReason> {
    if state.balls[CUE_BALL].scored {
        Some(ResetReason::CueBallPocketed)
    } else if state.balls_remaining() == 0 {
        Some(ResetReason::AllBallsPocketed)
    } else {
        None
    }
}

/// Move every ball still in play along its velocity
pub fn integrate(balls: &mut [Ball], dt: f32) {
    for ball in balls.iter_mut().filter(|b| !b.scored) {
        ball.pos += ball.vel * dt;
    }
}

/// Constant-magnitude felt friction, applied once per frame.
///
/// Speeds below the friction step snap to zero so balls never creep.
#[inline]
pub fn apply_friction(vel: Vec2, friction: f32) -> Vec2 {
    if vel.length() < friction {
        Vec2::ZERO
    } else {
        vel - vel.normalize_or_zero() * friction
    }
}

/// Advance the simulation by one frame of `dt` seconds
pub fn tick(state: &mut SimulationState, settings: &Settings, dt: f32) -> TickOutcome {
    if let Some(reason) = terminal_condition(state) {
        log::info!("Table reset: {:?}", reason);
        state.reset();
        state.record(GameEvent::TableReset { reason });
        return TickOutcome::Reset(reason);
    }

    advance_charge(&mut state.shot, dt, settings.charge_time);

    check_collisions(state);

    integrate(&mut state.balls, dt);

    for ball in &mut state.balls {
        ball.vel = apply_friction(ball.vel, settings.friction);
    }

    TickOutcome::Advanced
}
