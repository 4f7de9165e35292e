//! Game state and session types
//!
//! Everything the host needs to draw a frame or snapshot a run lives here.

use glam::Vec2;
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::bumper::Bumper;
use super::saber::Saber;
use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Saber can be swung, balls wait for the start signal
    Ready,
    /// Active gameplay
    Playing,
    /// Lives exhausted; ticks do nothing
    GameOver,
}

/// Playfield bounds, fixed for the session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }
}

/// Score and lives, read by the HUD
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub score: u64,
    pub lives: u8,
    /// No player damage
    pub freeplay: bool,
    pub phase: GamePhase,
}

impl Session {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            score: 0,
            lives: tuning.start_lives,
            freeplay: false,
            phase: GamePhase::Ready,
        }
    }

    #[inline]
    pub fn started(&self) -> bool {
        self.phase != GamePhase::Ready
    }

    #[inline]
    pub fn game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Seeded session generator. Snapshots store only the seed; restoring
/// starts the stream over from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "RngState", into = "RngState")]
pub struct SimRng {
    state: RngState,
    rng: Pcg32,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        RngState::new(seed).into()
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.state.seed
    }
}

impl From<RngState> for SimRng {
    fn from(state: RngState) -> Self {
        Self {
            rng: state.to_rng(),
            state,
        }
    }
}

impl From<SimRng> for RngState {
    fn from(rng: SimRng) -> Self {
        rng.state
    }
}

impl RngCore for SimRng {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        self.rng.fill_bytes(dst)
    }
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: SimRng,
    pub tuning: Tuning,
    pub arena: Arena,
    pub session: Session,
    pub saber: Saber,
    /// Fixed slots, index order is processing order
    pub balls: Vec<Ball>,
    pub bumpers: Vec<Bumper>,
}

impl GameState {
    /// Create a new game with the given seed.
    ///
    /// `tuning` is expected to pass `Tuning::validate`; zero score
    /// intervals would divide by zero in `award_kill`.
    pub fn new(seed: u64, arena: Arena, tuning: Tuning) -> Self {
        debug_assert!(tuning.validate().is_ok(), "invalid tuning: {:?}", tuning.validate());
        let mut rng = SimRng::new(seed);
        let balls = (0..tuning.max_balls)
            .map(|i| {
                let id = i as u32 + 1;
                if i < tuning.initial_balls {
                    Ball::spawn(id, &tuning, &arena, &mut rng)
                } else {
                    Ball::new(id, &tuning)
                }
            })
            .collect();

        Self {
            seed,
            rng,
            saber: Saber::new(arena.center(), &tuning),
            session: Session::new(&tuning),
            bumpers: Bumper::corner_wedges(&arena),
            balls,
            arena,
            tuning,
        }
    }

    /// Begin play
    pub fn start(&mut self) {
        if self.session.phase == GamePhase::Ready {
            self.session.phase = GamePhase::Playing;
            log::info!("Session started (seed {})", self.seed);
        }
    }

    /// Advance one step toward `target` (the anchor position)
    pub fn step(&mut self, target: Vec2, dt: f32) {
        super::tick::tick(self, target, dt);
    }

    pub fn set_grab(&mut self, grabbed: bool) {
        self.saber.grabbed = grabbed;
    }

    pub fn set_freeplay(&mut self, freeplay: bool) {
        self.session.freeplay = freeplay;
    }

    /// Number of enabled ball slots
    pub fn active_balls(&self) -> usize {
        self.balls.iter().filter(|b| b.enabled).count()
    }

    /// Enable or disable slots so that exactly `count` are active
    /// (clamped to the slot count). Lowest slots are enabled first.
    pub fn set_active_balls(&mut self, count: usize) {
        let count = count.min(self.balls.len());
        for (i, ball) in self.balls.iter_mut().enumerate() {
            let want = i < count;
            if want && !ball.enabled {
                ball.enabled = true;
                ball.respawn(&self.tuning, &self.arena, &mut self.rng);
            } else if !want {
                ball.enabled = false;
            }
        }
    }

    pub fn more_balls(&mut self) {
        self.set_active_balls(self.active_balls() + 1);
    }

    pub fn fewer_balls(&mut self) {
        self.set_active_balls(self.active_balls().saturating_sub(1));
    }

    /// Enable the first inert slot, if any. Returns true if one was enabled.
    pub fn unlock_ball(&mut self) -> bool {
        let Some(ball) = self.balls.iter_mut().find(|b| !b.enabled) else {
            return false;
        };
        ball.enabled = true;
        ball.respawn(&self.tuning, &self.arena, &mut self.rng);
        log::info!("Ball {} unlocked", ball.id);
        true
    }

    /// Award a point for a destroyed ball and apply score-driven unlocks
    pub fn award_kill(&mut self) {
        self.session.score += 1;
        let score = self.session.score;
        if score % self.tuning.ball_unlock_every == 0 {
            self.unlock_ball();
        }
        if score % self.tuning.life_every == 0 && self.session.lives < self.tuning.max_lives {
            self.session.lives += 1;
            log::info!("Extra life at score {} ({} lives)", score, self.session.lives);
        }
    }

    /// The hilt was struck: start the cooldown and take a life
    pub fn hurt_player(&mut self) {
        self.saber.hurt_for(self.tuning.hurt_duration);
        self.session.lives = self.session.lives.saturating_sub(1);
        log::info!("Hilt hit, {} lives left", self.session.lives);
        if self.session.lives == 0 {
            self.session.phase = GamePhase::GameOver;
            log::info!("Game over with score {}", self.session.score);
        }
    }
}
