//! Platform abstraction layer
//!
//! The simulation never talks to a device directly. Whatever embeds it
//! (Android activity, desktop window, test harness) implements these traits:
//! - Texture loading (opaque handles, cached by name on the host side)
//! - Viewport size
//! - Tilt/accelerometer sampling
//! - Audio playback
//! - Score and game-over notifications

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Opaque handle to a texture owned by the host's renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureHandle(pub u32);

/// Loads image resources on the host's graphics context.
pub trait TextureLoader {
    /// Load (or fetch from cache) the texture with the given asset name.
    ///
    /// Must be idempotent per name. Returns `None` when the asset is missing
    /// or no graphics context is available; callers fall back to a
    /// placeholder visual.
    fn load_texture(&mut self, name: &str) -> Option<TextureHandle>;
}

/// Current device viewport in world units.
pub trait Display {
    fn viewport_size(&self) -> Vec2;
}

/// Latest sampled accelerometer value (zero when unavailable).
pub trait TiltSensor {
    fn tilt_input(&self) -> Vec2;
}

/// Background audio playback.
pub trait AudioOutput {
    fn play_sound(&mut self, name: &str, looping: bool);
    fn stop_sound(&mut self);
}

/// Fire-and-forget UI notifications. Implementations must not block.
pub trait HostNotifier {
    fn notify_score(&mut self, score: i32);
    fn notify_game_over(&mut self, score: i32);
}

/// Everything the per-frame driver needs from its host
pub trait Host: Display + TiltSensor + AudioOutput + HostNotifier {}

impl<T: Display + TiltSensor + AudioOutput + HostNotifier> Host for T {}
