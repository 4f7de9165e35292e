//! Saber Arena - a pendulum saber swung against bouncing balls
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, swept collisions, session state)
//! - `tuning`: Data-driven game balance

pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Nominal simulation timestep (60 Hz animation frames)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Downward gravity (pixels/s², screen y grows downward)
    pub const GRAVITY: f32 = 1000.0;

    /// Saber defaults
    pub const BLADE_LENGTH: f32 = 100.0;
    /// Angular damping of the free-swinging blade (1/s)
    pub const SABER_ANGULAR_DRAG: f32 = 1.0;
    /// Angular speed cap: a quarter turn per nominal step
    pub const SABER_MAX_ANGULAR_VEL: f32 = std::f32::consts::PI / (2.0 * SIM_DT);
    /// Hilt invulnerability window after being hit (seconds)
    pub const HURT_DURATION: f32 = 1.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    /// Quadratic drag coefficient (1/pixel)
    pub const BALL_DRAG: f32 = 0.0005;
    /// Drag multiplier while a ball is dying
    pub const DYING_DRAG_FACTOR: f32 = 10.0;
    /// Length of the dying window before respawn (seconds)
    pub const DYING_DURATION: f32 = 0.1;
    pub const BALL_MAX_HEALTH: u8 = 3;
    /// Upper bound of each respawn velocity component (pixels/s)
    pub const RESPAWN_SPEED: f32 = 300.0;

    /// Minimum relative normal speed at contact that deals damage (inclusive)
    pub const DAMAGE_THRESHOLD: f32 = 1000.0;

    /// Hard cap on ball slots
    pub const MAX_BALLS: usize = 8;
    pub const INITIAL_BALLS: usize = 1;
    /// Enable another ball every N points
    pub const BALL_UNLOCK_EVERY: u64 = 5;
    /// Restore a life every M points
    pub const LIFE_EVERY: u64 = 10;
    pub const START_LIVES: u8 = 3;
    pub const MAX_LIVES: u8 = 3;

    /// Below this length a swept segment has no usable normal
    pub const EPSILON: f32 = 1e-3;
}

/// Normalize angle to (-π, π]
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    while angle > PI {
        angle -= TAU;
    }
    while angle <= -PI {
        angle += TAU;
    }
    angle
}
