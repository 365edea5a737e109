//! Player preferences
//!
//! Stored by the host as JSON alongside its own UI state.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Controls ===
    /// Multiplier applied to the raw accelerometer reading
    pub tilt_sensitivity: f32,
    /// Flip the horizontal tilt direction
    pub invert_tilt: bool,

    // === Visual Effects ===
    /// Somersault after jumps
    pub flip_animation: bool,

    // === Audio ===
    pub music_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tilt_sensitivity: 1.0,
            invert_tilt: false,
            flip_animation: true,
            music_enabled: true,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => {
                log::info!("Loaded settings");
                settings
            }
            Err(e) => {
                log::warn!("Ignoring invalid settings ({e}), using defaults");
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Scale and orient a raw tilt sample
    pub fn effective_tilt(&self, raw: glam::Vec2) -> glam::Vec2 {
        let sign = if self.invert_tilt { -1.0 } else { 1.0 };
        raw * self.tilt_sensitivity * sign
    }

    /// Tuning with preference overrides applied
    pub fn apply_to(&self, mut tuning: Tuning) -> Tuning {
        if !self.flip_animation {
            tuning.player.max_rotation_time = 0.0;
        }
        tuning
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_effective_tilt() {
        let settings = Settings {
            tilt_sensitivity: 2.0,
            invert_tilt: true,
            ..Default::default()
        };
        assert_eq!(settings.effective_tilt(Vec2::new(1.5, -1.0)), Vec2::new(-3.0, 2.0));
    }

    #[test]
    fn test_flip_animation_off_zeroes_flip_duration() {
        let settings = Settings {
            flip_animation: false,
            ..Default::default()
        };
        let tuning = settings.apply_to(Tuning::default());
        assert_eq!(tuning.player.max_rotation_time, 0.0);
    }

    #[test]
    fn test_missing_fields_default() {
        let settings = Settings::from_json(r#"{ "music_enabled": false }"#).expect("valid json");
        assert!(!settings.music_enabled);
        assert_eq!(settings.tilt_sensitivity, 1.0);
    }
}
