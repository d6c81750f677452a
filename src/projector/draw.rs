//! Drawable primitives handed to the host renderer
//!
//! Positions are bottom-left anchored, in screen pixels, already shifted by
//! the camera offset passed to [`Projector::render`](super::Projector::render).

use bevy::color::{Alpha, Color};
use bevy::math::Vec2;

/// Pixel size of one grid unit
pub const CELL_PX: f32 = 15.0;

/// Width of a single glyph sliver
pub const SLIVER_WIDTH: f32 = 2.0;

/// Thickness of the cursor crosshair bars
pub const BAR_THICKNESS: f32 = 2.0;

pub const SLIVER_COLOR: Color = Color::srgb(0.32, 0.78, 0.94);
pub const SELECTED_SLIVER_COLOR: Color = Color::srgb(1.0, 0.22, 0.18);
pub const CURSOR_BAR_COLOR: Color = Color::srgb(0.05, 0.1, 0.12);
pub const CURSOR_LABEL_COLOR: Color = Color::srgb(0.55, 0.95, 0.85);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// Rectangular glyph matrix block
    Block,
    /// Thin single glyph
    Sliver,
    /// Full-span cursor bar
    Bar,
    /// Glyph-styled cursor label
    Label,
}

impl PrimitiveKind {
    /// Draw order, lower is further back
    pub fn layer(self) -> f32 {
        match self {
            PrimitiveKind::Block => 0.0,
            PrimitiveKind::Sliver => 1.0,
            PrimitiveKind::Bar => 2.0,
            PrimitiveKind::Label => 3.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawPrimitive {
    pub kind: PrimitiveKind,
    pub position: Vec2,
    pub size: Vec2,
    pub color: Color,
    pub alpha: f32,
}

impl DrawPrimitive {
    pub fn center(&self) -> Vec2 {
        self.position + self.size * 0.5
    }

    /// Colour with the primitive's alpha applied
    pub fn tinted_color(&self) -> Color {
        self.color.with_alpha(self.alpha)
    }
}

/// Hue derived from a glyph's colour phase
pub fn phase_color(color_phase: f32) -> Color {
    Color::hsl(color_phase.rem_euclid(1.0) * 360.0, 0.7, 0.55)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_of_bottom_left_anchor() {
        let primitive = DrawPrimitive {
            kind: PrimitiveKind::Block,
            position: Vec2::new(10.0, 20.0),
            size: Vec2::new(30.0, 15.0),
            color: SLIVER_COLOR,
            alpha: 1.0,
        };
        assert_eq!(primitive.center(), Vec2::new(25.0, 27.5));
    }

    #[test]
    fn test_layers_stack_glyphs_below_cursors() {
        assert!(PrimitiveKind::Block.layer() < PrimitiveKind::Sliver.layer());
        assert!(PrimitiveKind::Sliver.layer() < PrimitiveKind::Bar.layer());
        assert!(PrimitiveKind::Bar.layer() < PrimitiveKind::Label.layer());
    }
}
