//! Game objects
//!
//! Every entity shares the same transform/visual fields; what it *is* lives in
//! the `Role` tag. The simulation keeps all of them in one owned `Vec` and
//! remembers where the player and background sit, so no downcasting is needed.

use glam::{Vec2, Vec4};
use serde::{Deserialize, Serialize};

use crate::platform::TextureHandle;

/// What an entity is, plus the state only that kind carries
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Role {
    /// The single player character
    Player {
        /// Position at the start of the current tick (swept landing check)
        previous_position: Vec2,
        /// Flip animation countdown (seconds, 0 = idle)
        rotation_timer: f32,
    },
    /// Transient platform the player bounces on
    Platform,
    /// Persistent scrolling backdrop
    Background,
}

/// Draw layer, back to front
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Layer {
    Background,
    Platform,
    Player,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameObject {
    /// World-space center
    pub position: Vec2,
    /// Width/height, never negative
    pub scale: Vec2,
    /// Degrees, counter-clockwise
    pub rotation: f32,
    pub velocity: Vec2,
    /// RGBA tint, opaque white by default
    pub color: Vec4,
    /// `None` renders with the placeholder texture
    pub texture: Option<TextureHandle>,
    pub role: Role,
}

impl GameObject {
    fn new(position: Vec2, scale: Vec2, role: Role) -> Self {
        debug_assert!(scale.x >= 0.0 && scale.y >= 0.0, "negative scale {scale}");
        Self {
            position,
            scale,
            rotation: 0.0,
            velocity: Vec2::ZERO,
            color: Vec4::ONE,
            texture: None,
            role,
        }
    }

    pub fn player(position: Vec2, scale: Vec2) -> Self {
        Self::new(
            position,
            scale,
            Role::Player {
                previous_position: position,
                rotation_timer: 0.0,
            },
        )
    }

    pub fn platform(position: Vec2, scale: Vec2) -> Self {
        Self::new(position, scale, Role::Platform)
    }

    pub fn background(position: Vec2, scale: Vec2) -> Self {
        Self::new(position, scale, Role::Background)
    }

    pub fn with_color(mut self, color: Vec4) -> Self {
        self.color = color;
        self
    }

    pub fn with_texture(mut self, texture: Option<TextureHandle>) -> Self {
        self.texture = texture;
        self
    }

    pub fn is_player(&self) -> bool {
        matches!(self.role, Role::Player { .. })
    }

    pub fn is_platform(&self) -> bool {
        matches!(self.role, Role::Platform)
    }

    pub fn is_background(&self) -> bool {
        matches!(self.role, Role::Background)
    }

    pub fn layer(&self) -> Layer {
        match self.role {
            Role::Background => Layer::Background,
            Role::Platform => Layer::Platform,
            Role::Player { .. } => Layer::Player,
        }
    }

    /// Player position at the start of the tick (`position` for other roles)
    pub fn previous_position(&self) -> Vec2 {
        match self.role {
            Role::Player {
                previous_position, ..
            } => previous_position,
            _ => self.position,
        }
    }

    /// Remaining flip animation time (0 for non-players)
    pub fn rotation_timer(&self) -> f32 {
        match self.role {
            Role::Player { rotation_timer, .. } => rotation_timer,
            _ => 0.0,
        }
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        self.scale * 0.5
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.position - self.half_extents()
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.position + self.half_extents()
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.position.y + self.scale.y / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.position.y - self.scale.y / 2.0
    }
}
