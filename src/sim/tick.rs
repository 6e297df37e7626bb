//! Fixed timestep simulation tick
//!
//! Core game loop: phase transitions on interact, then (while playing) avatar
//! physics, obstacle spawning, one scoring/collision/cull pass, ground check.

use super::state::{CrashCause, GameEvent, GamePhase, GameState};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Click/tap/space
    pub interact: bool,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f32) {
    state.events.clear();
    state.time_ticks += 1;

    // Backdrop scrolls in every phase
    let width = state.area.width;
    state.scroll.advance(width, &state.tuning);

    let mut interact = input.interact;
    if input.idle_mode {
        interact |= match state.phase {
            GamePhase::Menu => true,
            GamePhase::Playing => autopilot_wants_impulse(state),
            GamePhase::GameOver => false,
        };
    }

    match state.phase {
        GamePhase::Menu => {
            if interact {
                start_round(state);
            }
        }

        GamePhase::Playing => {
            if interact {
                state.avatar.apply_impulse();
                state.events.push(GameEvent::Impulse);
            }
            step_playing(state, dt_ms);
        }

        GamePhase::GameOver => {
            if interact {
                return_to_menu(state);
            }
        }
    }
}

fn start_round(state: &mut GameState) {
    state.reset_round();
    state.score.reset_current();
    state.phase = GamePhase::Playing;
    state.events.push(GameEvent::RoundStarted);
    log::info!("Round started (best so far: {})", state.score.best);
}

fn return_to_menu(state: &mut GameState) {
    state.score.reset_current();
    state.reset_round();
    state.phase = GamePhase::Menu;
    state.events.push(GameEvent::ReturnedToMenu);
}

/// Move to GameOver; no-op when already there
fn crash(state: &mut GameState, cause: CrashCause) {
    if state.phase == GamePhase::GameOver {
        return;
    }
    state.phase = GamePhase::GameOver;
    state.events.push(GameEvent::GameOver { cause });
    log::info!(
        "Game over ({:?}) - score {}, best {}",
        cause,
        state.score.current,
        state.score.best
    );
}

fn step_playing(state: &mut GameState, dt_ms: f32) {
    state.avatar.advance(dt_ms);

    // Spawn is held back so it is not evaluated until next tick
    state.spawn_elapsed_ms += dt_ms;
    let spawned = if state.spawn_elapsed_ms > state.spawn_interval_ms {
        Some(state.spawn_obstacle())
    } else {
        None
    };

    // Score before collision: passing and crashing into the same pipe still counts
    let mut hit: Option<u32> = None;
    let avatar = &state.avatar;
    let score = &mut state.score;
    let events = &mut state.events;
    state.obstacles.retain_mut(|obstacle| {
        obstacle.advance();

        if !obstacle.passed() && obstacle.check_passed(avatar) {
            let new_best = score.record_pass();
            events.push(GameEvent::Scored {
                score: score.current,
                new_best,
            });
        }

        if hit.is_none() && obstacle.collides_with(avatar) {
            hit = Some(obstacle.id);
        }

        !obstacle.is_off_screen()
    });

    if let Some(obstacle) = spawned {
        state.events.push(GameEvent::ObstacleSpawned { id: obstacle.id });
        state.obstacles.push(obstacle);
    }

    if let Some(id) = hit {
        crash(state, CrashCause::Obstacle { id });
    }

    if state.avatar.touches_ground(state.ground_y()) {
        crash(state, CrashCause::Ground);
    }
}

/// Simple demo pilot: flap when falling below the next gap's center
pub fn autopilot_wants_impulse(state: &GameState) -> bool {
    let avatar = &state.avatar;
    let left_edge = avatar.hitbox().left();
    let target = state
        .obstacles
        .iter()
        .filter(|o| o.x + o.width / 2.0 > left_edge)
        .min_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal))
        .map(|o| o.gap_center + o.gap_size / 6.0)
        .unwrap_or(state.area.height * 0.45);

    // A flap lifts by ~18px in one tick, so only flap once clearly below the target
    avatar.pos.y > target && avatar.vel >= 0.0
}
