//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (entity storage order)
//! - No rendering or platform dependencies

pub mod camera;
pub mod collision;
pub mod entity;
pub mod state;
pub mod tick;

pub use camera::Camera;
pub use collision::{aabb_overlap, lands_on};
pub use entity::{GameObject, Layer, Role};
pub use state::{GameEvent, GamePhase, GameState, SpriteTextures};
pub use tick::{TickInput, tick};
