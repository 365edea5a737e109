//! Simulation tick
//!
//! Advances one frame of gameplay. Step order matters: the camera follows the
//! integrated player, spawning reads the new camera, and the game-over check
//! runs last so a bounce in the same tick cannot undo a fall that already
//! happened.

use glam::Vec2;

use super::collision::lands_on;
use super::entity::{GameObject, Role};
use super::state::{GameEvent, GamePhase, GameState};
use crate::lerp;
use crate::tuning::PlayerTuning;

/// Input snapshot for a single tick, sampled once before it runs
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Accelerometer reading; positive x tilts the player left
    pub tilt: Vec2,
}

/// Advance the game state by `dt` seconds. Idle outside `Playing`.
///
/// Events pile up in `state` until the caller drains them.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    match state.phase {
        GamePhase::Start => return,
        GamePhase::GameOver => {
            state.update_score();
            return;
        }
        GamePhase::Playing => {}
    }

    let player_tuning = state.tuning.player;
    let gravity = state.tuning.gravity;
    let half_width = state.camera.scale.x / 2.0;

    move_player(state.player_mut(), input.tilt, &player_tuning, gravity, half_width, dt);

    // At most one bounce per tick; first platform in storage order wins
    let player = state.player();
    let previous_position = player.previous_position();
    let landed = state
        .platforms()
        .any(|platform| lands_on(player, previous_position, platform));
    if landed {
        state.jump();
    }

    animate_flip(state.player_mut(), player_tuning.max_rotation_time, dt);

    // Camera only ever scrolls up
    let player_y = state.player().position.y;
    state.camera.position.y = state.camera.position.y.max(player_y);

    state.despawn_platforms();
    state.spawn_platforms();
    state.wrap_background();

    state.update_score();
    let score = state.score as i32;
    state.push_event(GameEvent::Score(score));

    if state.player().position.y < state.camera.bottom() {
        state.phase = GamePhase::GameOver;
        state.push_event(GameEvent::GameOver(score));
        log::info!("Game over with score {score}");
    }
}

/// Integrate velocity and position, then wrap/clamp horizontally
fn move_player(
    player: &mut GameObject,
    tilt: Vec2,
    tuning: &PlayerTuning,
    gravity: f32,
    half_width: f32,
    dt: f32,
) {
    player.velocity.x += dt * -tilt.x * tuning.movement_acceleration;
    player.velocity.x = player
        .velocity
        .x
        .clamp(-tuning.max_movement_speed, tuning.max_movement_speed);
    player.velocity.y += dt * -gravity;

    player.position += dt * player.velocity;

    // Leaving one side re-enters from the other
    let bound = (half_width - player.scale.x / 2.0).max(0.0);
    if player.position.x <= -bound && player.velocity.x < 0.0 {
        player.position.x = bound;
    } else if player.position.x >= bound && player.velocity.x > 0.0 {
        player.position.x = -bound;
    }
    player.position.x = player.position.x.clamp(-bound, bound);
}

/// Record this tick's position and advance the post-jump somersault
fn animate_flip(player: &mut GameObject, max_rotation_time: f32, dt: f32) {
    let position = player.position;
    let going_left = player.velocity.x.is_sign_negative();

    let Role::Player {
        previous_position,
        rotation_timer,
    } = &mut player.role
    else {
        return;
    };
    *previous_position = position;

    *rotation_timer = (*rotation_timer - dt).max(0.0);
    player.rotation = if max_rotation_time > 0.0 {
        let start = if going_left { 360.0 } else { -360.0 };
        lerp(start, 0.0, 1.0 - *rotation_timer / max_rotation_time)
    } else {
        0.0
    };
}
