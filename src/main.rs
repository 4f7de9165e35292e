//! Saber Arena headless driver
//!
//! Runs a scripted swing against the simulation and logs the outcome.
//! Usage: `saber-arena [tuning.json]`

use glam::Vec2;

use saber_arena::Tuning;
use saber_arena::consts::*;
use saber_arena::sim::{Arena, GameState};

/// Frames to simulate (about a minute at 50 fps)
const FRAMES: u32 = 3000;
/// Host frame time, deliberately off the simulation rate
const FRAME_DT: f32 = 1.0 / 50.0;

/// Fixed-step driver fed by a variable-rate clock
struct Driver {
    state: GameState,
    accumulator: f32,
    time: f32,
}

impl Driver {
    fn new(state: GameState) -> Self {
        Self {
            state,
            accumulator: 0.0,
            time: 0.0,
        }
    }

    /// Figure-eight around the arena center
    fn anchor(&self) -> Vec2 {
        let c = self.state.arena.center();
        let t = self.time;
        c + Vec2::new(220.0 * (1.3 * t).sin(), 120.0 * (2.6 * t).sin())
    }

    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.time += SIM_DT;
            let target = self.anchor();
            self.state.step(target, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
    }
}

fn load_tuning() -> Tuning {
    let Some(path) = std::env::args().nth(1) else {
        return Tuning::default();
    };
    let parsed = std::fs::read_to_string(&path)
        .map_err(|e| e.to_string())
        .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()));
    match parsed {
        Ok(tuning) => {
            log::info!("Loaded tuning from {}", path);
            tuning
        }
        Err(e) => {
            log::warn!("Ignoring tuning file {}: {}", path, e);
            Tuning::default()
        }
    }
}

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();
    log::info!("Saber Arena (headless) starting...");

    let tuning = load_tuning();
    let seed = 0x5eed_u64;
    let mut state = GameState::new(seed, Arena::new(800.0, 600.0), tuning);
    state.start();
    log::info!("Game initialized with seed: {}", seed);

    let mut driver = Driver::new(state);
    for frame in 0..FRAMES {
        driver.update(FRAME_DT);
        if frame % 500 == 0 {
            let s = &driver.state.session;
            log::info!(
                "t={:.1}s score={} lives={} balls={}",
                driver.time,
                s.score,
                s.lives,
                driver.state.active_balls()
            );
        }
        if driver.state.session.game_over() {
            break;
        }
    }

    let s = &driver.state.session;
    println!(
        "Finished after {:.1}s: score {}, lives {}, game over: {}",
        driver.time,
        s.score,
        s.lives,
        s.game_over()
    );
}
