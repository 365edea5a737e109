//! GPU-ready sprite records

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};

use crate::sim::GameObject;

/// Texture slot meaning "bind the placeholder texture"
pub const PLACEHOLDER_TEXTURE: u32 = u32::MAX;

/// One textured quad (layout must match the host's shader)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    pub model: [[f32; 4]; 4], // offset 0
    pub color: [f32; 4],      // offset 64
    pub texture: u32,         // offset 80
    pub layer: u32,           // offset 84
    pub _pad: [u32; 2],       // pad to 96 bytes
}

impl SpriteInstance {
    pub fn from_object(object: &GameObject) -> Self {
        Self {
            model: model_matrix(object).to_cols_array_2d(),
            color: object.color.to_array(),
            texture: object.texture.map_or(PLACEHOLDER_TEXTURE, |t| t.0),
            layer: object.layer() as u32,
            _pad: [0; 2],
        }
    }

    pub fn uses_placeholder(&self) -> bool {
        self.texture == PLACEHOLDER_TEXTURE
    }
}

/// translate(position) * rotate_z(rotation degrees) * scale(scale)
pub fn model_matrix(object: &GameObject) -> Mat4 {
    Mat4::from_scale_rotation_translation(
        object.scale.extend(1.0),
        Quat::from_rotation_z(object.rotation.to_radians()),
        Vec3::new(object.position.x, object.position.y, 0.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::TextureHandle;
    use glam::Vec2;

    #[test]
    fn test_instance_size() {
        assert_eq!(std::mem::size_of::<SpriteInstance>(), 96);
    }

    #[test]
    fn test_model_matrix_maps_unit_quad() {
        let mut object = GameObject::platform(Vec2::new(10.0, 20.0), Vec2::new(200.0, 50.0));
        let corner = model_matrix(&object).transform_point3(Vec3::new(0.5, 0.5, 0.0));
        assert!((corner - Vec3::new(110.0, 45.0, 0.0)).length() < 1e-4);

        object.rotation = 90.0;
        let corner = model_matrix(&object).transform_point3(Vec3::new(0.5, 0.0, 0.0));
        assert!((corner - Vec3::new(10.0, 120.0, 0.0)).length() < 1e-3);
    }

    #[test]
    fn test_missing_texture_uses_placeholder() {
        let object = GameObject::player(Vec2::ZERO, Vec2::ONE);
        assert!(SpriteInstance::from_object(&object).uses_placeholder());

        let object = object.with_texture(Some(TextureHandle(4)));
        let sprite = SpriteInstance::from_object(&object);
        assert_eq!(sprite.texture, 4);
        assert_eq!(sprite.color, [1.0; 4]);
    }
}
