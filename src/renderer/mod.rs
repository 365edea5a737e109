//! Render boundary
//!
//! The host's renderer never touches `GameState`. Each frame it takes a
//! `FrameSnapshot`: the camera's view-projection plus one `SpriteInstance` per
//! visible quad, already in draw order (background, platforms, player).

pub mod sprite;

pub use sprite::{PLACEHOLDER_TEXTURE, SpriteInstance, model_matrix};

use glam::Vec2;

use crate::sim::{GameObject, GameState};

/// Everything needed to draw one frame
#[derive(Debug, Clone, Default)]
pub struct FrameSnapshot {
    pub view_projection: [[f32; 4]; 4],
    pub sprites: Vec<SpriteInstance>,
}

impl FrameSnapshot {
    /// Capture the current state. Empty before the first session.
    pub fn capture(state: &GameState) -> Self {
        let view_projection = state.camera.projection().to_cols_array_2d();
        if !state.is_initialized() {
            return Self {
                view_projection,
                sprites: Vec::new(),
            };
        }

        let mut sprites = Vec::with_capacity(state.entities().len() + 1);

        // The backdrop is one viewport tall; a second copy above it covers the
        // gap until the next wrap
        let background = state.background();
        let mut above = background.clone();
        above.position += Vec2::new(0.0, background.scale.y);
        sprites.push(SpriteInstance::from_object(background));
        sprites.push(SpriteInstance::from_object(&above));

        let mut ordered: Vec<&GameObject> = state
            .entities()
            .iter()
            .filter(|e| !e.is_background())
            .collect();
        ordered.sort_by_key(|e| e.layer());
        sprites.extend(ordered.into_iter().map(SpriteInstance::from_object));

        Self {
            view_projection,
            sprites,
        }
    }

    /// Raw instance buffer for upload
    pub fn instance_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.sprites)
    }
}
