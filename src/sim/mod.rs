//! Table simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - No rendering or platform dependencies (scene handles are only carried)
//! - Stable iteration order (by ball index)
//! - Fixed per-frame pipeline: collisions, then integration, then friction

pub mod collision;
pub mod shot;
pub mod state;
pub mod table;
pub mod tick;

pub use collision::{check_collisions, collide_pair, exchange_normal_velocities, find_pocket, reflect_walls};
pub use shot::{ShotPhase, advance_charge, press, release};
pub use state::{Ball, CollisionCooldown, GameEvent, ResetReason, ShotState, SimulationState};
pub use table::{POCKETS, START_POSITIONS};
pub use tick::{TickOutcome, apply_friction, integrate, terminal_condition, tick};
