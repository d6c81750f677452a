//! Glyph matrices: rectangular blocks whose footprint drifts by one cell
//! at a time, bounded by a maximum size drawn at creation.

use bevy::math::{IVec2, Vec2};
use rand::rngs::StdRng;
use rand::Rng;

use super::draw::{phase_color, DrawPrimitive, PrimitiveKind, CELL_PX};
use super::glyph::{GlyphCore, GlyphTick, Retirement, GLYPH_LIFETIME};

/// Largest extent a matrix can reach on either axis at full effect amount
pub const MATRIX_MAX_EXTENT: f32 = 70.0;

/// Per-tick chance of a resize step
pub const RESIZE_CHANCE: f64 = 0.05;

#[derive(Debug, Clone)]
pub struct GlyphMatrix {
    pub(crate) core: GlyphCore,
    current_size: IVec2,
    max_size: IVec2,
}

impl GlyphMatrix {
    pub fn new(position: IVec2, effect_amount: f32, rng: &mut StdRng) -> Self {
        let core = GlyphCore::new(position, 0, rng);
        let max_size = IVec2::new(
            sample_max_extent(effect_amount, rng),
            sample_max_extent(effect_amount, rng),
        );
        let current_size = IVec2::new(
            sample_initial_extent(max_size.x, rng),
            sample_initial_extent(max_size.y, rng),
        );
        let lifetime = rng.gen_range(GLYPH_LIFETIME);
        Self {
            core: GlyphCore { lifetime, ..core },
            current_size,
            max_size,
        }
    }

    /// Build a matrix with explicit sizes. `current_size` is clamped into
    /// `[1, max_size]`.
    pub fn from_parts(core: GlyphCore, current_size: IVec2, max_size: IVec2) -> Self {
        let max_size = max_size.max(IVec2::ONE);
        Self {
            core,
            current_size: current_size.clamp(IVec2::ONE, max_size),
            max_size,
        }
    }

    pub fn core(&self) -> &GlyphCore {
        &self.core
    }

    pub fn current_size(&self) -> IVec2 {
        self.current_size
    }

    pub fn max_size(&self) -> IVec2 {
        self.max_size
    }

    pub fn tick(&mut self, rng: &mut StdRng) -> GlyphTick {
        let expired = self.core.advance();

        if rng.gen_bool(RESIZE_CHANCE) {
            let step = if rng.gen_bool(0.5) { 1 } else { -1 };
            let delta = if rng.gen_bool(0.5) {
                IVec2::new(step, 0)
            } else {
                IVec2::new(0, step)
            };
            self.resize(delta);
        }

        if expired {
            GlyphTick::Retire
        } else {
            GlyphTick::Continue
        }
    }

    /// Grow or shrink by `delta`, clamped to `[1, max_size]` per axis
    pub fn resize(&mut self, delta: IVec2) {
        self.current_size = (self.current_size + delta).clamp(IVec2::ONE, self.max_size);
    }

    pub fn on_retire(&self) -> Retirement {
        Retirement::Destroy
    }

    pub fn draw(&self, origin: Vec2) -> DrawPrimitive {
        let mut position = origin;
        // Odd extents would sit off the grid line by half a cell
        if self.current_size.x % 2 == 1 {
            position.x -= CELL_PX * 0.5;
        }
        if self.current_size.y % 2 == 1 {
            position.y -= CELL_PX * 0.5;
        }

        DrawPrimitive {
            kind: PrimitiveKind::Block,
            position,
            size: self.current_size.as_vec2() * CELL_PX,
            color: phase_color(self.core.color_phase),
            alpha: self.core.remaining_fraction(),
        }
    }
}

fn sample_max_extent(effect_amount: f32, rng: &mut StdRng) -> i32 {
    let t = rng.gen::<f32>() * effect_amount.clamp(0.0, 1.0);
    let extent = 1.0 + (MATRIX_MAX_EXTENT - 1.0) * t;
    (extent.round() as i32).max(1)
}

fn sample_initial_extent(max_extent: i32, rng: &mut StdRng) -> i32 {
    if max_extent > 1 {
        rng.gen_range(1..max_extent)
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn matrix(current: IVec2, max: IVec2) -> GlyphMatrix {
        let mut rng = StdRng::seed_from_u64(0);
        let core = GlyphCore::new(IVec2::new(4, 4), 10_000, &mut rng);
        GlyphMatrix::from_parts(core, current, max)
    }

    #[test]
    fn test_shrinking_stops_at_one() {
        let mut glyph = matrix(IVec2::ONE, IVec2::splat(10));
        for _ in 0..50 {
            glyph.resize(IVec2::new(-1, 0));
            glyph.resize(IVec2::new(0, -1));
        }
        assert_eq!(glyph.current_size(), IVec2::ONE);
    }

    #[test]
    fn test_growing_stops_at_max() {
        let mut glyph = matrix(IVec2::new(9, 3), IVec2::new(10, 4));
        for _ in 0..5 {
            glyph.resize(IVec2::ONE);
        }
        assert_eq!(glyph.current_size(), IVec2::new(10, 4));
    }

    #[test]
    fn test_random_ticks_keep_size_in_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut glyph = matrix(IVec2::new(3, 7), IVec2::new(6, 8));
        for _ in 0..5_000 {
            glyph.tick(&mut rng);
            let size = glyph.current_size();
            assert!(size.x >= 1 && size.x <= 6);
            assert!(size.y >= 1 && size.y <= 8);
        }
    }

    #[test]
    fn test_sampled_sizes_respect_effect_amount() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..500 {
            let glyph = GlyphMatrix::new(IVec2::ZERO, 1.0, &mut rng);
            let max = glyph.max_size();
            assert!(max.x >= 1 && max.x <= 70 && max.y >= 1 && max.y <= 70);
            assert!(glyph.current_size().cmpge(IVec2::ONE).all());
            assert!(glyph.current_size().cmple(max).all());
            assert!(GLYPH_LIFETIME.contains(&glyph.core().lifetime));
        }

        // No intensity, no growth
        let flat = GlyphMatrix::new(IVec2::ZERO, 0.0, &mut rng);
        assert_eq!(flat.max_size(), IVec2::ONE);
        assert_eq!(flat.current_size(), IVec2::ONE);
    }

    #[test]
    fn test_retires_by_destruction() {
        let mut rng = StdRng::seed_from_u64(1);
        let core = GlyphCore::new(IVec2::ZERO, 2, &mut rng);
        let mut glyph = GlyphMatrix::from_parts(core, IVec2::ONE, IVec2::ONE);
        assert_eq!(glyph.tick(&mut rng), GlyphTick::Continue);
        assert_eq!(glyph.tick(&mut rng), GlyphTick::Retire);
        assert_eq!(glyph.on_retire(), Retirement::Destroy);
    }

    #[test]
    fn test_odd_extents_shift_half_a_cell() {
        let glyph = matrix(IVec2::new(3, 2), IVec2::splat(10));
        let primitive = glyph.draw(Vec2::new(100.0, 100.0));
        assert_eq!(primitive.position, Vec2::new(92.5, 100.0));
        assert_eq!(primitive.size, Vec2::new(45.0, 30.0));
        assert_eq!(primitive.alpha, 1.0);
    }
}
