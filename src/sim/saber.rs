//! Saber kinematics
//!
//! The hilt snaps to the player's anchor every step. The blade is a rigid
//! pendulum hanging off the hilt: it swings under gravity and the hilt's
//! acceleration unless grabbed, in which case it is locked in place.
//!
//! Angles are measured so that the blade points straight up at 0 and hangs
//! down at π (screen y grows downward).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Quad, wind_quad};
use super::vector::VecExt;
use crate::consts::SABER_MAX_ANGULAR_VEL;
use crate::normalize_angle;
use crate::tuning::Tuning;

/// Region swept by the blade over one step
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Sweep {
    pub quad: Quad,
    /// Unit direction from the hilt's path midpoint to the tip's path midpoint
    pub axis: Vec2,
}

/// The player's weapon
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Saber {
    /// Hilt position
    pub pos: Vec2,
    /// Hilt velocity (finite difference of the anchor)
    pub vel: Vec2,
    /// Hilt acceleration over the last step
    pub accel: Vec2,
    pub length: f32,
    /// Blade angle, (-π, π]
    pub angle: f32,
    pub angular_vel: f32,
    /// Locked blade, no pendulum motion
    pub grabbed: bool,
    /// Seconds left in the post-hit cooldown
    pub hurt: Option<f32>,
    /// This step's swept region
    #[serde(skip)]
    pub sweep: Option<Sweep>,
}

impl Saber {
    /// New saber at `pos` with the blade hanging down
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            accel: Vec2::ZERO,
            length: tuning.blade_length,
            angle: std::f32::consts::PI,
            angular_vel: 0.0,
            grabbed: false,
            hurt: None,
            sweep: None,
        }
    }

    /// Unit vector from hilt to tip for a given blade angle
    #[inline]
    pub fn blade_dir(angle: f32) -> Vec2 {
        Vec2::new(-angle.sin(), -angle.cos())
    }

    /// Blade tip for a hilt position and angle
    #[inline]
    pub fn tip_at(&self, pos: Vec2, angle: f32) -> Vec2 {
        pos + Self::blade_dir(angle) * self.length
    }

    /// Current blade tip
    pub fn tip(&self) -> Vec2 {
        self.tip_at(self.pos, self.angle)
    }

    #[inline]
    pub fn is_hurt(&self) -> bool {
        self.hurt.is_some()
    }

    /// Start the post-hit cooldown
    pub fn hurt_for(&mut self, seconds: f32) {
        self.hurt = Some(seconds);
    }

    /// Update hilt velocity/acceleration toward `target` and integrate the
    /// blade's angular velocity. Position and angle are not moved yet.
    pub fn update(&mut self, target: Vec2, dt: f32, tuning: &Tuning) {
        let vel = (target - self.pos) / dt;
        self.accel = (vel - self.vel) / dt;
        self.vel = vel;

        if self.grabbed {
            self.angular_vel = 0.0;
        } else {
            let (sin, cos) = self.angle.sin_cos();
            let ang_acc = (self.accel.x * cos + (tuning.gravity - self.accel.y) * sin)
                / self.length
                - tuning.saber_angular_drag * self.angular_vel;
            self.angular_vel += dt * ang_acc;
        }
        self.angular_vel = self
            .angular_vel
            .clamp(-SABER_MAX_ANGULAR_VEL, SABER_MAX_ANGULAR_VEL);

        if let Some(remaining) = self.hurt {
            let remaining = remaining - dt;
            self.hurt = (remaining > 0.0).then_some(remaining);
        }
    }

    /// Compute and store the blade's swept quad for a move to `target`
    pub fn compute_sweep(&mut self, target: Vec2, dt: f32) -> Sweep {
        let tip_start = self.tip();
        let tip_end = self.tip_at(target, self.angle + dt * self.angular_vel);

        let quad = wind_quad(self.pos, target, tip_start, tip_end);
        let hilt_mid = (self.pos + target) * 0.5;
        let tip_mid = (tip_start + tip_end) * 0.5;
        let sweep = Sweep {
            quad,
            axis: (tip_mid - hilt_mid).unit(),
        };
        self.sweep = Some(sweep);
        sweep
    }

    /// Velocity of the blade point `dist` along the blade from the hilt
    pub fn contact_velocity(&self, dist: f32) -> Vec2 {
        let lever = Self::blade_dir(self.angle) * dist;
        self.vel + lever.orth() * self.angular_vel
    }

    /// Snap the hilt to `target` and advance the blade angle
    pub fn commit(&mut self, target: Vec2, dt: f32) {
        self.pos = target;
        self.angle = normalize_angle(self.angle + dt * self.angular_vel);
    }
}
