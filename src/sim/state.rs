//! Simulation state and core types
//!
//! Everything the tick and the shot controller mutate lives in
//! [`SimulationState`], owned by a single [`crate::Game`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::table::START_POSITIONS;
use crate::consts::*;
use crate::scene::MeshHandle;

/// Why the table was put back to the starting layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResetReason {
    /// The cue ball went down - no more moves
    CueBallPocketed,
    /// Every ball went down - game won
    AllBallsPocketed,
    /// Host asked for a fresh rack
    Restart,
}

/// Things that happened during a tick or an input event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    BallPocketed { ball: usize, pocket: usize },
    BallsCollided { a: usize, b: usize },
    WallBounce { ball: usize },
    ShotFired { velocity: Vec2 },
    TableReset { reason: ResetReason },
}

/// A ball on the table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Pocketed balls take no further part in the game
    pub scored: bool,
    /// Live visual handle, released exactly once via [`Ball::take_mesh`]
    #[serde(skip)]
    pub mesh: Option<MeshHandle>,
}

impl Ball {
    /// Ball at rest at the given position
    pub fn at(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            scored: false,
            mesh: None,
        }
    }

    #[inline]
    pub fn is_moving(&self) -> bool {
        self.vel != Vec2::ZERO
    }

    /// Mark the ball as pocketed. Returns false if it already was.
    pub fn pocket(&mut self) -> bool {
        if self.scored {
            return false;
        }
        self.scored = true;
        self.vel = Vec2::ZERO;
        true
    }

    /// Hand over the visual handle; later calls return `None`
    pub fn take_mesh(&mut self) -> Option<MeshHandle> {
        self.mesh.take()
    }
}

/// Per-pair frame counters gating repeated collision responses.
///
/// Only entries `(i, j)` with `i < j` are used; lookups normalize the order so
/// callers may pass either.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionCooldown {
    frames: [[u8; BALL_COUNT]; BALL_COUNT],
}

impl Default for CollisionCooldown {
    fn default() -> Self {
        Self {
            frames: [[COOLDOWN_INITIAL; BALL_COUNT]; BALL_COUNT],
        }
    }
}

impl CollisionCooldown {
    #[inline]
    fn key(i: usize, j: usize) -> (usize, usize) {
        if i < j { (i, j) } else { (j, i) }
    }

    pub fn get(&self, i: usize, j: usize) -> u8 {
        let (a, b) = Self::key(i, j);
        self.frames[a][b]
    }

    /// Count one more checked frame for the pair (saturating at the cap)
    pub fn bump(&mut self, i: usize, j: usize) -> u8 {
        let (a, b) = Self::key(i, j);
        let slot = &mut self.frames[a][b];
        *slot = (*slot + 1).min(COOLDOWN_CAP);
        *slot
    }

    /// Restart the count after a collision response
    pub fn clear(&mut self, i: usize, j: usize) {
        let (a, b) = Self::key(i, j);
        self.frames[a][b] = 0;
    }

    /// Whether enough frames passed for the pair to respond again
    pub fn ready(&self, i: usize, j: usize) -> bool {
        self.get(i, j) >= COOLDOWN_MIN_FRAMES
    }
}

/// Charge-and-release shot state
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ShotState {
    pub charging: bool,
    /// Normalized hold time in [0, 1]
    pub charge_progress: f32,
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationState {
    /// Ball 0 is the cue ball
    pub balls: [Ball; BALL_COUNT],
    pub cooldown: CollisionCooldown,
    pub shot: ShotState,
    /// Events recorded since the host last drained them, newest last.
    /// Holds at most [`MAX_PENDING_EVENTS`].
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationState {
    /// Fresh rack at the starting layout
    pub fn new() -> Self {
        Self {
            balls: START_POSITIONS.map(Ball::at),
            cooldown: CollisionCooldown::default(),
            shot: ShotState::default(),
            events: Vec::new(),
        }
    }

    /// Put every ball back on its starting spot and clear all cooldowns.
    ///
    /// Visual handles stay with their balls; the owner re-creates the ones
    /// that were released when balls were pocketed. Shot state is untouched.
    pub fn reset(&mut self) {
        for (ball, start) in self.balls.iter_mut().zip(START_POSITIONS) {
            ball.pos = start;
            ball.vel = Vec2::ZERO;
            ball.scored = false;
        }
        self.cooldown = CollisionCooldown::default();
    }

    #[inline]
    pub fn cue_ball(&self) -> &Ball {
        &self.balls[CUE_BALL]
    }

    /// Any ball still rolling (shots are only taken on a still table)
    pub fn any_ball_moving(&self) -> bool {
        self.balls.iter().any(Ball::is_moving)
    }

    /// Object balls still on the table
    pub fn balls_remaining(&self) -> usize {
        self.balls.iter().skip(1).filter(|b| !b.scored).count()
    }

    pub(crate) fn record(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            self.events.remove(0);
        }
        self.events.push(event);
    }
}
