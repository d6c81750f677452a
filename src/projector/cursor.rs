//! Wandering crosshair cursors.
//!
//! A cursor chases the pixel projection of its grid target with a capped
//! step, while the target itself random-walks. Once the target wanders out
//! of the room the cursor is dropped by the projector.

use std::ops::Range;

use bevy::math::{IVec2, Vec2};
use rand::rngs::StdRng;
use rand::Rng;

use super::draw::{
    DrawPrimitive, PrimitiveKind, BAR_THICKNESS, CELL_PX, CURSOR_BAR_COLOR, CURSOR_LABEL_COLOR,
};

/// Maximum distance the cursor travels in one tick, in pixels
pub const MAX_STEP: f32 = 12.0;

/// Per-axis, per-tick chance that the target moves
pub const WANDER_CHANCE: f64 = 0.1;

pub const GLYPH_SIZE_RANGE: Range<i32> = 1..4;

#[derive(Debug, Clone)]
pub struct Cursor {
    grid_target: IVec2,
    position: Vec2,
    previous_position: Vec2,
    glyph_size: i32,
}

impl Cursor {
    /// `start` is the pixel projection of `grid_target`
    pub fn new(grid_target: IVec2, start: Vec2, rng: &mut StdRng) -> Self {
        Self {
            grid_target,
            position: start,
            previous_position: start,
            glyph_size: rng.gen_range(GLYPH_SIZE_RANGE),
        }
    }

    pub fn grid_target(&self) -> IVec2 {
        self.grid_target
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn previous_position(&self) -> Vec2 {
        self.previous_position
    }

    pub fn glyph_size(&self) -> i32 {
        self.glyph_size
    }

    /// One simulation step. `target_px` is the projection of the current
    /// grid target. Returns false once the target has left `room_size`.
    pub fn tick(&mut self, target_px: Vec2, rng: &mut StdRng, room_size: IVec2) -> bool {
        self.pursue(target_px);

        let mut step = IVec2::ZERO;
        if rng.gen_bool(WANDER_CHANCE) {
            step.x = rng.gen_range(-1..=1);
        }
        if rng.gen_bool(WANDER_CHANCE) {
            step.y = rng.gen_range(-1..=1);
        }
        self.wander(step);

        self.is_within(room_size)
    }

    /// Move toward `target_px`, at most [`MAX_STEP`] pixels
    pub fn pursue(&mut self, target_px: Vec2) {
        self.previous_position = self.position;
        self.position += (target_px - self.position).clamp_length_max(MAX_STEP);
    }

    pub fn wander(&mut self, step: IVec2) {
        self.grid_target += step;
    }

    pub fn is_within(&self, room_size: IVec2) -> bool {
        self.grid_target.cmpge(IVec2::ZERO).all() && self.grid_target.cmplt(room_size).all()
    }

    pub fn interpolated_position(&self, fraction: f32) -> Vec2 {
        self.previous_position.lerp(self.position, fraction)
    }

    /// Crosshair bars spanning `viewport`, plus the label block
    pub fn draw(
        &self,
        fraction: f32,
        camera_offset: Vec2,
        viewport: Vec2,
        out: &mut Vec<DrawPrimitive>,
    ) {
        let anchor = self.interpolated_position(fraction) - camera_offset;
        let extent = CELL_PX * self.glyph_size as f32;

        let bar = |position: Vec2, size: Vec2| DrawPrimitive {
            kind: PrimitiveKind::Bar,
            position,
            size,
            color: CURSOR_BAR_COLOR,
            alpha: 1.0,
        };
        let vertical = Vec2::new(BAR_THICKNESS, viewport.y);
        let horizontal = Vec2::new(viewport.x, BAR_THICKNESS);

        out.push(bar(Vec2::new(anchor.x, 0.0), vertical));
        out.push(bar(Vec2::new(anchor.x + extent, 0.0), vertical));
        out.push(bar(Vec2::new(0.0, anchor.y), horizontal));
        out.push(bar(Vec2::new(0.0, anchor.y + extent), horizontal));
        out.push(DrawPrimitive {
            kind: PrimitiveKind::Label,
            position: anchor,
            size: Vec2::splat(extent),
            color: CURSOR_LABEL_COLOR,
            alpha: 1.0,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_pursuit_step_is_capped() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut cursor = Cursor::new(IVec2::ZERO, Vec2::ZERO, &mut rng);
        cursor.pursue(Vec2::new(900.0, -400.0));
        assert!((cursor.position() - cursor.previous_position()).length() <= MAX_STEP + 1e-4);

        // Close targets are reached exactly
        let near = cursor.position() + Vec2::new(3.0, 4.0);
        cursor.pursue(near);
        assert_eq!(cursor.position(), near);
    }

    #[test]
    fn test_random_ticks_never_exceed_step() {
        let mut rng = StdRng::seed_from_u64(31);
        let mut cursor = Cursor::new(IVec2::splat(5), Vec2::ZERO, &mut rng);
        for i in 0..500 {
            let far = Vec2::new((i * 97 % 1300) as f32, (i * 31 % 700) as f32);
            cursor.tick(far, &mut rng, IVec2::splat(1_000));
            let moved = (cursor.position() - cursor.previous_position()).length();
            assert!(moved <= MAX_STEP + 1e-3, "moved {moved}");
        }
    }

    #[test]
    fn test_leaving_room_ends_cursor() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut cursor = Cursor::new(IVec2::ZERO, Vec2::ZERO, &mut rng);
        let room = IVec2::splat(20);
        assert!(cursor.is_within(room));
        cursor.wander(IVec2::new(-1, 0));
        assert!(!cursor.is_within(room));

        let mut edge = Cursor::new(IVec2::new(19, 19), Vec2::ZERO, &mut rng);
        edge.wander(IVec2::new(0, 1));
        assert!(!edge.is_within(room));
    }

    #[test]
    fn test_glyph_size_range() {
        let mut rng = StdRng::seed_from_u64(12);
        for _ in 0..200 {
            let cursor = Cursor::new(IVec2::ZERO, Vec2::ZERO, &mut rng);
            assert!(GLYPH_SIZE_RANGE.contains(&cursor.glyph_size()));
        }
    }

    #[test]
    fn test_draw_emits_crosshair_and_label() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut cursor = Cursor::new(IVec2::ZERO, Vec2::new(100.0, 50.0), &mut rng);
        cursor.glyph_size = 2;
        cursor.pursue(Vec2::new(110.0, 50.0));

        let mut out = Vec::new();
        cursor.draw(0.5, Vec2::new(5.0, 0.0), Vec2::new(1366.0, 768.0), &mut out);
        assert_eq!(out.len(), 5);
        assert_eq!(out[0].position, Vec2::new(100.0, 0.0));
        assert_eq!(out[1].position, Vec2::new(130.0, 0.0));
        assert_eq!(out[2].size, Vec2::new(1366.0, BAR_THICKNESS));
        assert_eq!(out[3].position, Vec2::new(0.0, 80.0));
        assert_eq!(out[4].size, Vec2::splat(30.0));
    }
}
