//! Simulation step
//!
//! One call advances the whole game. Ordering is fixed:
//! saber velocity -> ball forces and bounces -> saber sweep ->
//! per-ball collision in slot order -> position commits.

use glam::Vec2;

use super::collision::{resolve_ball, touches_hilt};
use super::state::{GamePhase, GameState};

/// Advance the game state by one step with the anchor at `target`
pub fn tick(state: &mut GameState, target: Vec2, dt: f32) {
    if state.session.phase == GamePhase::GameOver {
        return;
    }

    state.saber.update(target, dt, &state.tuning);

    if state.session.phase == GamePhase::Ready {
        state.saber.compute_sweep(target, dt);
        state.saber.commit(target, dt);
        return;
    }

    for ball in &mut state.balls {
        ball.update(dt, &state.tuning, &state.arena, &state.bumpers, &mut state.rng);
    }

    let sweep = state.saber.compute_sweep(target, dt);

    for i in 0..state.balls.len() {
        let contact = resolve_ball(&state.saber, &sweep, &mut state.balls[i], dt, &state.tuning);
        if contact.killed {
            state.award_kill();
        }

        if !state.session.freeplay
            && !state.saber.is_hurt()
            && touches_hilt(&state.saber, &state.balls[i])
        {
            state.hurt_player();
            if state.session.game_over() {
                break;
            }
        }
    }

    state.saber.commit(target, dt);
    for ball in &mut state.balls {
        ball.commit(dt);
    }
}
