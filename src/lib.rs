//! Mini Billiard - a seven-ball table simulation
//!
//! Core modules:
//! - `sim`: Simulation core (ball state, collisions, friction, shots, tick)
//! - `game`: Controller that owns the simulation and talks to the scene
//! - `scene`: Visual representation boundary plus a headless implementation
//! - `input`: Pointer events and the per-tick input queue
//! - `clock`: Frame pacing for hosts
//! - `autoplay`: Seeded demo player
//! - `settings`: Data-driven tunables

pub mod autoplay;
pub mod clock;
pub mod game;
pub mod input;
pub mod scene;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use scene::{HeadlessScene, MeshHandle, MeshKind, Scene};
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Number of balls on the table (cue ball + six object balls)
    pub const BALL_COUNT: usize = 7;
    /// Index of the cue ball
    pub const CUE_BALL: usize = 0;
    /// Number of pockets
    pub const POCKET_COUNT: usize = 6;

    /// Table dimensions (world units, origin at table center)
    pub const TABLE_WIDTH: f32 = 15.0;
    pub const TABLE_HEIGHT: f32 = 8.0;
    pub const POCKET_RADIUS: f32 = 0.4;
    /// Corner pockets are pulled in so a ball can actually reach them
    pub const CORNER_POCKET_INSET: f32 = 0.1;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 0.3;
    /// Speed lost per frame (constant magnitude, not proportional drag)
    pub const FRICTION: f32 = 0.01;

    /// Seconds of holding the button to reach full power
    pub const CHARGE_TIME: f32 = 1.0;
    /// Cue ball speed at full charge
    pub const SHOT_POWER: f32 = 6.0;

    /// Collision cooldown: frames a pair must wait before responding again
    pub const COOLDOWN_MIN_FRAMES: u8 = 2;
    /// Cooldown counter saturates here
    pub const COOLDOWN_CAP: u8 = 10;
    /// Fresh tables start above the threshold so a first contact responds
    pub const COOLDOWN_INITIAL: u8 = 3;

    /// Separations shorter than this have no usable collision normal
    pub const SEPARATION_EPSILON: f32 = 1e-6;
    /// Shot directions shorter than this are dropped
    pub const SHOT_EPSILON: f32 = 1e-6;

    /// Undrained events kept before the oldest are dropped
    pub const MAX_PENDING_EVENTS: usize = 256;

    /// Frame pacing
    pub const TARGET_FPS: u32 = 60;
    pub const MIN_FPS: u32 = 5;
    pub const MAX_FPS: u32 = 200;
}
