//! Scrolling 2D camera

use glam::{Mat4, Vec2};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// World point at the viewport center
    pub position: Vec2,
    /// Viewport width/height in world units (owned by the render boundary)
    pub scale: Vec2,
}

impl Camera {
    pub fn new(scale: Vec2) -> Self {
        Self {
            position: Vec2::ZERO,
            scale,
        }
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        self.scale * 0.5
    }

    /// Lowest visible world Y
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.position.y - self.scale.y / 2.0
    }

    /// Highest visible world Y
    #[inline]
    pub fn top(&self) -> f32 {
        self.position.y + self.scale.y / 2.0
    }

    /// Orthographic projection spanning the viewport, near/far at [-1, 1]
    pub fn projection(&self) -> Mat4 {
        let half = self.half_extents();
        Mat4::orthographic_rh_gl(
            self.position.x - half.x,
            self.position.x + half.x,
            self.position.y - half.y,
            self.position.y + half.y,
            -1.0,
            1.0,
        )
    }
}
