//! Charge-and-release shot controller
//!
//! Press starts charging, the tick grows the charge, release fires the cue
//! ball toward the pointer. Nothing happens while any ball is rolling.

use glam::Vec2;

use super::state::{GameEvent, ShotState, SimulationState};
use crate::consts::*;

/// Controller phase derived from [`ShotState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotPhase {
    Idle,
    Charging,
}

impl ShotState {
    pub fn phase(&self) -> ShotPhase {
        if self.charging {
            ShotPhase::Charging
        } else {
            ShotPhase::Idle
        }
    }
}

/// Grow the charge while the button is held. Charge time only caps progress,
/// it never releases the shot.
pub fn advance_charge(shot: &mut ShotState, dt: f32, charge_time: f32) {
    if shot.charging {
        shot.charge_progress = (shot.charge_progress + dt / charge_time).min(1.0);
    }
}

/// Pointer pressed. Returns true if charging started.
pub fn press(state: &mut SimulationState, _pointer: Vec2) -> bool {
    if state.any_ball_moving() {
        return false;
    }
    state.shot.charging = true;
    true
}

/// Pointer released at `pointer` (world space).
///
/// Returns the cue ball velocity if a shot was fired. A release on top of the
/// cue ball has no direction: the charge is spent and nothing moves.
pub fn release(state: &mut SimulationState, pointer: Vec2, shot_power: f32) -> Option<Vec2> {
    if state.any_ball_moving() || !state.shot.charging {
        return None;
    }

    let progress = state.shot.charge_progress;
    state.shot = ShotState::default();

    let aim = pointer - state.cue_ball().pos;
    if aim.length() < SHOT_EPSILON {
        log::warn!("Shot released on the cue ball, dropping it");
        return None;
    }

    let velocity = aim.normalize() * (progress * shot_power);
    state.balls[CUE_BALL].vel = velocity;
    log::info!("Shot fired at {:.0}% charge, velocity {}", progress * 100.0, velocity);
    state.record(GameEvent::ShotFired { velocity });
    Some(velocity)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn east_of_cue(state: &SimulationState) -> Vec2 {
        state.cue_ball().pos + Vec2::new(1.0, 0.0)
    }

    #[test]
    fn test_press_release_fires_cue_ball() {
        let mut state = SimulationState::new();
        assert_eq!(state.shot.phase(), ShotPhase::Idle);
        assert!(press(&mut state, Vec2::ZERO));
        assert_eq!(state.shot.phase(), ShotPhase::Charging);

        advance_charge(&mut state.shot, 0.5, CHARGE_TIME);
        assert_eq!(state.shot.charge_progress, 0.5);

        let target = east_of_cue(&state);
        let velocity = release(&mut state, target, SHOT_POWER).unwrap();
        assert_eq!(velocity, Vec2::new(3.0, 0.0));
        assert_eq!(state.balls[CUE_BALL].vel, Vec2::new(3.0, 0.0));
        assert_eq!(state.shot, ShotState::default());
        assert!(state.events.contains(&GameEvent::ShotFired { velocity }));
    }

    #[test]
    fn test_charge_caps_at_full() {
        let mut shot = ShotState { charging: true, charge_progress: 0.0 };
        for _ in 0..10 {
            advance_charge(&mut shot, 0.3, CHARGE_TIME);
        }
        assert_eq!(shot.charge_progress, 1.0);
        assert!(shot.charging);
    }

    #[test]
    fn test_charge_only_grows_while_charging() {
        let mut shot = ShotState::default();
        advance_charge(&mut shot, 0.5, CHARGE_TIME);
        assert_eq!(shot.charge_progress, 0.0);
    }

    #[test]
    fn test_input_ignored_while_balls_move() {
        let mut state = SimulationState::new();
        state.balls[3].vel = Vec2::new(0.2, 0.0);
        assert!(!press(&mut state, Vec2::ZERO));
        assert_eq!(state.shot, ShotState::default());

        state.shot = ShotState { charging: true, charge_progress: 0.7 };
        let target = east_of_cue(&state);
        assert!(release(&mut state, target, SHOT_POWER).is_none());
        assert_eq!(state.shot, ShotState { charging: true, charge_progress: 0.7 });
        assert_eq!(state.balls[CUE_BALL].vel, Vec2::ZERO);
        assert_eq!(state.balls[3].vel, Vec2::new(0.2, 0.0));
    }

    #[test]
    fn test_release_without_press_is_ignored() {
        let mut state = SimulationState::new();
        let target = east_of_cue(&state);
        assert!(release(&mut state, target, SHOT_POWER).is_none());
        assert!(!state.any_ball_moving());
    }

    #[test]
    fn test_release_on_cue_ball_spends_charge() {
        let mut state = SimulationState::new();
        press(&mut state, Vec2::ZERO);
        advance_charge(&mut state.shot, 0.4, CHARGE_TIME);
        let on_cue = state.cue_ball().pos;
        assert!(release(&mut state, on_cue, SHOT_POWER).is_none());
        assert_eq!(state.shot, ShotState::default());
        assert!(!state.any_ball_moving());
    }

    #[test]
    fn test_zero_charge_release_leaves_table_still() {
        let mut state = SimulationState::new();
        press(&mut state, Vec2::ZERO);
        let target = east_of_cue(&state);
        assert_eq!(release(&mut state, target, SHOT_POWER), Some(Vec2::ZERO));
        assert!(!state.any_ball_moving());
    }
}
