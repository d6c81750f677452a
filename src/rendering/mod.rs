//! Rendering and Visualization
//!
//! This module turns the projector's draw primitives into Bevy sprites:
//! - Camera management for the viewport
//! - Per-frame sprite rendering with tick interpolation

pub mod cameras;
pub mod projector_sprites;

// Re-export commonly used items
pub use cameras::{CameraPlugin, ProjectorCamera};
pub use projector_sprites::{ProjectorRenderingPlugin, ProjectorSprite};
