//! Sky Hop - tilt-controlled endless jumper core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, game state)
//! - `game`: Host-facing session driver (lifecycle, fixed timestep, event dispatch)
//! - `renderer`: Read-only frame snapshot for the render boundary
//! - `platform`: Collaborator traits implemented by the host
//! - `audio`: Sound cues routed to the host's audio output
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences

pub mod audio;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta fed into the accumulator
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Downward acceleration (world units/s²)
    pub const GRAVITY: f32 = 2000.0;
    /// Score gained per world unit climbed
    pub const SCORE_SCALE: f32 = 0.5;

    /// Player spawn point at the start of every session
    pub const PLAYER_SPAWN: [f32; 2] = [0.0, -280.0];
    pub const PLAYER_SIZE: [f32; 2] = [140.0, 140.0];
    /// Flip animation duration after a jump (seconds)
    pub const PLAYER_MAX_ROTATION_TIME: f32 = 0.5;
    /// Chance out of 100 that a jump arms the flip animation
    pub const PLAYER_ROTATION_CHANCE: u32 = 60;
    pub const PLAYER_MAX_MOVEMENT_SPEED: f32 = 2000.0;
    pub const PLAYER_MOVEMENT_ACCELERATION: f32 = 750.0;
    pub const PLAYER_JUMP_VELOCITY: f32 = 1750.0;

    pub const PLATFORM_SIZE: [f32; 2] = [200.0, 50.0];
    /// Vertical distance between procedurally spawned platforms
    pub const PLATFORM_SPACING: f32 = 150.0;
    /// First spawn height relative to the player spawn
    pub const PLATFORM_SPAWN_OFFSET: f32 = 400.0;
    pub const PLATFORM_COLOR: [f32; 4] = [0.1, 0.8, 0.9, 1.0];

    /// Asset names requested from the host
    pub const PLAYER_TEXTURE: &str = "android_robot.png";
    pub const PLATFORM_TEXTURE: &str = "platform.png";
    pub const BACKGROUND_TEXTURE: &str = "background.png";
    pub const MENU_MUSIC: &str = "menuBGM.mp3";
}

/// Linear interpolation from `start` to `end`.
///
/// `t` is not clamped: values outside [0, 1] extrapolate.
#[inline]
pub fn lerp(start: f32, end: f32, t: f32) -> f32 {
    start + (end - start) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp(360.0, 0.0, 0.0), 360.0);
        assert_eq!(lerp(360.0, 0.0, 1.0), 0.0);
        assert!((lerp(-360.0, 0.0, 0.25) - (-270.0)).abs() < 1e-4);
    }

    #[test]
    fn test_lerp_extrapolates() {
        assert!((lerp(0.0, 10.0, 1.5) - 15.0).abs() < 1e-4);
        assert!((lerp(0.0, 10.0, -0.5) - (-5.0)).abs() < 1e-4);
    }
}
