//! Glyph projector simulation
//!
//! This module contains the engine-independent part of the effect:
//! - The occupancy grid and toroidal coordinate helpers
//! - Glyph lifecycle (single glyphs and glyph matrices)
//! - Wandering cursors
//! - The projector host that ticks everything and emits draw primitives

pub mod cursor;
pub mod draw;
pub mod glyph;
pub mod grid;
pub mod host;
pub mod matrix;
pub mod settings;
pub mod single;

// Re-export commonly used items
pub use cursor::Cursor;
pub use draw::{DrawPrimitive, PrimitiveKind, CELL_PX};
pub use glyph::{Glyph, GlyphCore, GlyphId, GlyphTick, Retirement};
pub use grid::GlyphGrid;
pub use host::{Projection, Projector, ProjectorStats};
pub use matrix::GlyphMatrix;
pub use settings::ProjectorSettings;
pub use single::SingleGlyph;
