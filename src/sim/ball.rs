//! Ball kinematics
//!
//! Gravity plus quadratic drag, bumper and wall bounces, and the
//! alive -> dying -> respawn cycle. Disabled balls are inert slots.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::bumper::{Bumper, Obstacle};
use super::geometry::Segment;
use super::state::Arena;
use crate::tuning::Tuning;

/// Rejected spawn samples before falling back to the corner
const MAX_SPAWN_ATTEMPTS: u32 = 64;

/// A ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub pos: Vec2,
    /// Position before the last commit (trail rendering only)
    pub prev_pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub enabled: bool,
    pub health: u8,
    pub dying: bool,
    /// Seconds spent dying
    pub dying_timer: f32,
    /// Latched while the saber keeps touching the ball
    pub in_collision: bool,
}

impl Ball {
    /// Create a disabled ball slot
    pub fn new(id: u32, tuning: &Tuning) -> Self {
        Self {
            id,
            pos: Vec2::ZERO,
            prev_pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: tuning.ball_radius,
            enabled: false,
            health: tuning.ball_max_health,
            dying: false,
            dying_timer: 0.0,
            in_collision: false,
        }
    }

    /// Create an enabled ball at a random spawn point
    pub fn spawn<R: Rng + ?Sized>(id: u32, tuning: &Tuning, arena: &Arena, rng: &mut R) -> Self {
        let mut ball = Self::new(id, tuning);
        ball.enabled = true;
        ball.respawn(tuning, arena, rng);
        ball
    }

    /// True if the ball takes part in collisions this step
    #[inline]
    pub fn is_live(&self) -> bool {
        self.enabled && !self.dying
    }

    /// Fraction of the dying window elapsed (0 while alive)
    pub fn dying_progress(&self, tuning: &Tuning) -> f32 {
        if self.dying {
            (self.dying_timer / tuning.dying_duration).min(1.0)
        } else {
            0.0
        }
    }

    /// Reset health and state, then place the ball in the upper half of the
    /// arena away from the center with a fresh random velocity.
    pub fn respawn<R: Rng + ?Sized>(&mut self, tuning: &Tuning, arena: &Arena, rng: &mut R) {
        self.health = tuning.ball_max_health;
        self.dying = false;
        self.dying_timer = 0.0;
        self.in_collision = false;

        let r = self.radius;
        let center = arena.center();
        let keep_out = arena.width / 3.0;
        let x_max = (arena.width - r).max(r);
        let y_max = (arena.height * 0.5).max(r);

        let mut pos = None;
        for _ in 0..MAX_SPAWN_ATTEMPTS {
            let candidate = Vec2::new(
                rng.random_range(r..=x_max),
                rng.random_range(r..=y_max),
            );
            if candidate.distance(center) > keep_out {
                pos = Some(candidate);
                break;
            }
        }
        self.pos = pos.unwrap_or_else(|| {
            log::warn!("Ball {} spawn sampling exhausted, using corner", self.id);
            Vec2::new(r, r)
        });
        self.prev_pos = self.pos;

        let s = tuning.respawn_speed;
        self.vel = Vec2::new(rng.random_range(-s..=s), rng.random_range(-s..=0.0));
        log::debug!("Ball {} respawned at ({:.0}, {:.0})", self.id, self.pos.x, self.pos.y);
    }

    /// Mark the ball as dying (ignores the saber until respawn)
    pub fn kill(&mut self) {
        self.dying = true;
        self.dying_timer = 0.0;
        log::debug!("Ball {} dying", self.id);
    }

    /// Integrate velocity and resolve bumper and wall contacts.
    /// Position is only corrected here; the move is applied by `commit`.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        tuning: &Tuning,
        arena: &Arena,
        bumpers: &[Bumper],
        rng: &mut R,
    ) {
        if !self.enabled {
            return;
        }

        let mut drag_coeff = tuning.ball_drag;
        if self.dying {
            self.dying_timer += dt;
            if self.dying_timer > tuning.dying_duration {
                self.respawn(tuning, arena, rng);
                return;
            }
            drag_coeff *= tuning.dying_drag_factor;
        }

        let drag = self.vel * (self.vel.length() * drag_coeff);
        let accel = Vec2::new(0.0, tuning.gravity) - drag;
        self.vel += accel * dt;

        for bumper in bumpers {
            let d = bumper.penetration(self.pos, self.radius);
            if d > 0.0 {
                let n = bumper.normal();
                self.pos -= n * d;
                if self.vel.dot(n) > 0.0 {
                    self.vel = bumper.reflect(self.vel);
                }
                break;
            }
        }

        // Left, right and top walls reflect; the bottom is a drain
        if self.pos.x < self.radius && self.vel.x < 0.0 {
            self.vel.x = -self.vel.x;
        } else if self.pos.x > arena.width - self.radius && self.vel.x > 0.0 {
            self.vel.x = -self.vel.x;
        }
        if self.pos.y < self.radius && self.vel.y < 0.0 {
            self.vel.y = -self.vel.y;
        }

        if self.pos.y > arena.height + self.radius {
            self.respawn(tuning, arena, rng);
        }
    }

    /// Where the ball will be after `dt` at its current velocity
    #[inline]
    pub fn predicted_pos(&self, dt: f32) -> Vec2 {
        self.pos + self.vel * dt
    }

    /// Swept segment for this step
    #[inline]
    pub fn sweep(&self, dt: f32) -> Segment {
        Segment::new(self.pos, self.predicted_pos(dt))
    }

    /// Apply the step's motion
    pub fn commit(&mut self, dt: f32) {
        if !self.enabled {
            return;
        }
        self.prev_pos = self.pos;
        self.pos = self.predicted_pos(dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn arena() -> Arena {
        Arena::new(800.0, 600.0)
    }

    #[test]
    fn test_respawn_containment() {
        let tuning = Tuning::default();
        let arena = arena();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut ball = Ball::spawn(1, &tuning, &arena, &mut rng);
        for _ in 0..500 {
            ball.health = 0;
            ball.dying = true;
            ball.respawn(&tuning, &arena, &mut rng);
            assert!(ball.pos.x >= ball.radius && ball.pos.x <= arena.width - ball.radius);
            assert!(ball.pos.y >= ball.radius && ball.pos.y <= arena.height * 0.5);
            assert!(ball.pos.distance(arena.center()) > arena.width / 3.0);
            assert_eq!(ball.health, tuning.ball_max_health);
            assert!(!ball.dying);
        }
    }

    #[test]
    fn test_disabled_ball_is_inert() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut ball = Ball::new(1, &tuning);
        ball.pos = Vec2::new(100.0, 100.0);
        ball.update(SIM_DT, &tuning, &arena(), &[], &mut rng);
        ball.commit(SIM_DT);
        assert_eq!(ball.pos, Vec2::new(100.0, 100.0));
        assert_eq!(ball.vel, Vec2::ZERO);
    }

    #[test]
    fn test_speed_stays_bounded_under_drag() {
        let tuning = Tuning::default();
        let arena = Arena::new(800.0, 1.0e9);
        let mut rng = Pcg32::seed_from_u64(3);
        let mut ball = Ball::spawn(1, &tuning, &arena, &mut rng);
        ball.vel = Vec2::new(0.0, 5000.0);
        let terminal = (tuning.gravity / tuning.ball_drag).sqrt();
        let mut last = ball.vel.length();
        for _ in 0..2000 {
            ball.update(SIM_DT, &tuning, &arena, &[], &mut rng);
            ball.commit(SIM_DT);
            let speed = ball.vel.length();
            assert!(speed <= last.max(terminal) + 1.0);
            last = speed;
        }
        assert!((last - terminal).abs() < terminal * 0.05);
    }

    #[test]
    fn test_wall_reflection() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut ball = Ball::spawn(1, &tuning, &arena(), &mut rng);
        ball.pos = Vec2::new(5.0, 300.0);
        ball.vel = Vec2::new(-200.0, 0.0);
        ball.update(SIM_DT, &tuning, &arena(), &[], &mut rng);
        assert!(ball.vel.x > 0.0);

        ball.pos = Vec2::new(400.0, 5.0);
        ball.vel = Vec2::new(0.0, -200.0);
        ball.update(SIM_DT, &tuning, &arena(), &[], &mut rng);
        assert!(ball.vel.y > 0.0);
    }

    #[test]
    fn test_bottom_drain_respawns() {
        let tuning = Tuning::default();
        let arena = arena();
        let mut rng = Pcg32::seed_from_u64(11);
        let mut ball = Ball::spawn(1, &tuning, &arena, &mut rng);
        ball.health = 1;
        ball.pos = Vec2::new(400.0, arena.height + 50.0);
        ball.update(SIM_DT, &tuning, &arena, &[], &mut rng);
        assert!(ball.pos.y <= arena.height * 0.5);
        assert_eq!(ball.health, tuning.ball_max_health);
    }

    #[test]
    fn test_bumper_pushes_out_and_reflects() {
        let tuning = Tuning::default();
        let arena = arena();
        let mut rng = Pcg32::seed_from_u64(5);
        let floor = Bumper::from_polygon(vec![
            Vec2::new(0.0, 400.0),
            Vec2::new(800.0, 400.0),
            Vec2::new(400.0, 500.0),
        ]);
        let mut ball = Ball::spawn(1, &tuning, &arena, &mut rng);
        ball.pos = Vec2::new(400.0, 395.0);
        ball.vel = Vec2::new(50.0, 300.0);
        ball.update(SIM_DT, &tuning, &arena, std::slice::from_ref(&floor), &mut rng);
        assert!((ball.pos.y - (400.0 - ball.radius)).abs() < 1e-3);
        assert!(ball.vel.y < 0.0);
        assert!(ball.vel.x > 0.0);
    }

    #[test]
    fn test_only_first_bumper_resolved() {
        let tuning = Tuning::default();
        let arena = arena();
        let mut rng = Pcg32::seed_from_u64(5);
        let floor = Bumper::from_polygon(vec![
            Vec2::new(0.0, 400.0),
            Vec2::new(800.0, 400.0),
            Vec2::new(400.0, 500.0),
        ]);
        let wall = Bumper::from_polygon(vec![
            Vec2::new(400.0, 0.0),
            Vec2::new(400.0, 800.0),
            Vec2::new(500.0, 400.0),
        ]);
        let mut ball = Ball::spawn(1, &tuning, &arena, &mut rng);
        ball.pos = Vec2::new(395.0, 395.0);
        ball.vel = Vec2::new(100.0, 100.0);
        // Both overlap the ball by 5
        assert!(wall.penetration(ball.pos, ball.radius) > 0.0);
        ball.update(SIM_DT, &tuning, &arena, &[floor, wall], &mut rng);
        assert!((ball.pos.y - 390.0).abs() < 1e-3);
        assert_eq!(ball.pos.x, 395.0);
        assert!(ball.vel.y < 0.0);
        assert!(ball.vel.x > 0.0);
    }

    #[test]
    fn test_spawn_falls_back_to_corner() {
        // Every candidate lies within width/3 of the center
        let tuning = Tuning::default();
        let arena = Arena::new(60.0, 20.0);
        let mut rng = Pcg32::seed_from_u64(13);
        let ball = Ball::spawn(1, &tuning, &arena, &mut rng);
        assert_eq!(ball.pos, Vec2::new(ball.radius, ball.radius));
        assert_eq!(ball.prev_pos, ball.pos);
    }

    #[test]
    fn test_dying_ball_respawns_after_window() {
        let tuning = Tuning::default();
        let arena = arena();
        let mut rng = Pcg32::seed_from_u64(9);
        let mut ball = Ball::spawn(1, &tuning, &arena, &mut rng);
        ball.health = 0;
        ball.kill();
        let mut steps = 0;
        while ball.dying {
            ball.update(SIM_DT, &tuning, &arena, &[], &mut rng);
            ball.commit(SIM_DT);
            steps += 1;
            assert!(steps < 100);
        }
        // 0.1s at 60 Hz
        assert!(steps >= 6);
        assert_eq!(ball.health, tuning.ball_max_health);
    }
}
