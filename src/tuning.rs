//! Data-driven game balance
//!
//! Defaults match the shipped game; hosts can override any subset from JSON.

use glam::{Vec2, Vec4};
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Player movement and animation constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub size: Vec2,
    pub spawn: Vec2,
    /// Flip animation duration (seconds)
    pub max_rotation_time: f32,
    /// Out of 100
    pub rotation_chance: u32,
    pub max_movement_speed: f32,
    pub movement_acceleration: f32,
    pub jump_velocity: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            size: Vec2::from(PLAYER_SIZE),
            spawn: Vec2::from(PLAYER_SPAWN),
            max_rotation_time: PLAYER_MAX_ROTATION_TIME,
            rotation_chance: PLAYER_ROTATION_CHANCE,
            max_movement_speed: PLAYER_MAX_MOVEMENT_SPEED,
            movement_acceleration: PLAYER_MOVEMENT_ACCELERATION,
            jump_velocity: PLAYER_JUMP_VELOCITY,
        }
    }
}

/// Procedural platform layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformTuning {
    pub size: Vec2,
    /// Vertical gap between spawned platforms
    pub spacing: f32,
    /// First spawn height above the player spawn
    pub spawn_offset: f32,
    pub color: Vec4,
}

impl Default for PlatformTuning {
    fn default() -> Self {
        Self {
            size: Vec2::from(PLATFORM_SIZE),
            spacing: PLATFORM_SPACING,
            spawn_offset: PLATFORM_SPAWN_OFFSET,
            color: Vec4::from(PLATFORM_COLOR),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration magnitude
    pub gravity: f32,
    /// Score per world unit climbed
    pub score_scale: f32,
    pub player: PlayerTuning,
    pub platform: PlatformTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            score_scale: SCORE_SCALE,
            player: PlayerTuning::default(),
            platform: PlatformTuning::default(),
        }
    }
}

impl Tuning {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse overrides, keeping the defaults if the JSON is malformed
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Ignoring invalid tuning ({e}), using defaults");
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
