//! Demo player
//!
//! Waits for the table to settle, aims at a random object ball, holds the
//! button for a random time and lets go. Seeded, so a given seed always plays
//! the same game.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::input::InputEvent;
use crate::settings::Settings;
use crate::sim::{ShotPhase, SimulationState};
use crate::sim::table::half_extents;

/// Shortest hold, as a fraction of the full charge time
const MIN_HOLD: f32 = 0.3;
/// Aim jitter around the chosen ball (world units)
const AIM_JITTER: f32 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Plan {
    /// Waiting for a still table
    Idle,
    /// Button held; release at `target` once `hold_left` runs out
    Holding { target: Vec2, hold_left: f32 },
}

#[derive(Debug, Clone)]
pub struct AutoPlayer {
    rng: Pcg32,
    plan: Plan,
}

impl AutoPlayer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            plan: Plan::Idle,
        }
    }

    pub fn is_holding(&self) -> bool {
        matches!(self.plan, Plan::Holding { .. })
    }

    fn pick_target(&mut self, state: &SimulationState) -> Vec2 {
        let live: Vec<Vec2> = state
            .balls
            .iter()
            .skip(1)
            .filter(|b| !b.scored)
            .map(|b| b.pos)
            .collect();

        if live.is_empty() {
            let half = half_extents();
            return Vec2::new(
                self.rng.random_range(-half.x..half.x),
                self.rng.random_range(-half.y..half.y),
            );
        }

        let ball = live[self.rng.random_range(0..live.len())];
        let jitter = Vec2::new(
            self.rng.random_range(-AIM_JITTER..AIM_JITTER),
            self.rng.random_range(-AIM_JITTER..AIM_JITTER),
        );
        ball + jitter
    }

    /// Decide what to do this frame. Call before the game update that will
    /// consume the returned event.
    pub fn step(&mut self, state: &SimulationState, settings: &Settings, dt: f32) -> Option<InputEvent> {
        match self.plan {
            Plan::Idle => {
                if state.any_ball_moving() || state.shot.phase() == ShotPhase::Charging {
                    return None;
                }
                let target = self.pick_target(state);
                let hold = self.rng.random_range(MIN_HOLD..=1.0) * settings.charge_time;
                log::debug!("Autoplay aiming at {} for {:.2}s", target, hold);
                self.plan = Plan::Holding {
                    target,
                    hold_left: hold,
                };
                Some(InputEvent::PointerDown { pos: target })
            }
            Plan::Holding { target, hold_left } => {
                let hold_left = hold_left - dt;
                if hold_left > 0.0 {
                    self.plan = Plan::Holding { target, hold_left };
                    return None;
                }
                self.plan = Plan::Idle;
                Some(InputEvent::PointerUp { pos: target })
            }
        }
    }
}
