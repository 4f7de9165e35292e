//! Saber vs. ball collision response
//!
//! Detection is continuous: the blade's swept quad is tested against the
//! ball's swept segment inflated by its radius. Response uses the velocity
//! of the blade point at the contact distance.

use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::geometry::quad_segment_intersect;
use super::saber::{Saber, Sweep};
use super::vector::VecExt;
use crate::tuning::Tuning;

/// What happened to one ball this step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallContact {
    /// Swept regions overlapped
    pub hit: bool,
    /// Ball lost one health point
    pub damaged: bool,
    /// Ball health reached zero and it started dying
    pub killed: bool,
}

/// Detect and resolve contact between the blade and one ball.
///
/// Updates the ball's velocity, health and contact latch. Disabled and
/// dying balls are skipped.
pub fn resolve_ball(saber: &Saber, sweep: &Sweep, ball: &mut Ball, dt: f32, tuning: &Tuning) -> BallContact {
    let mut contact = BallContact::default();
    if !ball.is_live() {
        return contact;
    }

    contact.hit = quad_segment_intersect(&sweep.quad, &ball.sweep(dt), ball.radius);

    if contact.hit {
        let u = sweep.axis;
        let rel = ball.pos - saber.pos;
        let dist = rel.dot(u);
        let vp = saber.contact_velocity(dist);

        let mut n = u.orth();
        if n.dot(rel) < 0.0 {
            n = -n;
        }
        let vpn = n.dot(vp);
        let vbn = n.dot(ball.vel);

        if !ball.in_collision && (vpn - vbn).abs() >= tuning.damage_threshold {
            ball.health = ball.health.saturating_sub(1);
            contact.damaged = true;
            if ball.health == 0 {
                ball.kill();
                contact.killed = true;
            }
        }

        if vbn < vpn {
            ball.vel = u * ball.vel.dot(u) + n * vpn.max(-vbn);
        }
    }

    ball.in_collision = contact.hit;
    contact
}

/// Ball center within two radii of the hilt
#[inline]
pub fn touches_hilt(saber: &Saber, ball: &Ball) -> bool {
    ball.is_live() && ball.pos.distance(saber.pos) < 2.0 * ball.radius
}
