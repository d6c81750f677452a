//! Single glyphs: the self-propagating population of the projector.
//!
//! A single glyph may spawn one child into a vacant neighbouring cell during
//! its life. When it retires it is parked in the projector's pool and later
//! brought back through [`SingleGlyph::reset`].

use bevy::math::{IVec2, Vec2};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

use super::draw::{
    DrawPrimitive, PrimitiveKind, CELL_PX, SELECTED_SLIVER_COLOR, SLIVER_COLOR, SLIVER_WIDTH,
};
use super::glyph::{GlyphCore, GlyphTick, Retirement, TickContext, GLYPH_LIFETIME};
use super::grid::GlyphGrid;

/// Chance that a fresh glyph never procreates on schedule
pub const NO_PROCREATION_CHANCE: f64 = 0.5;

/// Chance that a fresh glyph is drawn highlighted
pub const SELECTED_CHANCE: f64 = 0.02;

/// Age at which an under-populated projector gets an extra procreation
pub const EARLY_PROCREATION_AGE: u32 = 10;

#[derive(Debug, Clone)]
pub struct SingleGlyph {
    pub(crate) core: GlyphCore,
    procreate_at: Option<u32>,
    selected: bool,
    inactive: bool,
}

impl SingleGlyph {
    pub fn new(position: IVec2, rng: &mut StdRng) -> Self {
        let mut glyph = Self {
            core: GlyphCore::new(position, 0, rng),
            procreate_at: None,
            selected: false,
            inactive: false,
        };
        glyph.reset(position, rng);
        glyph
    }

    /// Re-roll the schedule and bring the glyph back to life at `position`.
    /// The caller is responsible for occupying the grid cell.
    pub fn reset(&mut self, position: IVec2, rng: &mut StdRng) {
        let lifetime = rng.gen_range(GLYPH_LIFETIME);
        self.procreate_at = if rng.gen_bool(NO_PROCREATION_CHANCE) {
            None
        } else {
            Some(rng.gen_range(1..lifetime))
        };
        self.selected = rng.gen_bool(SELECTED_CHANCE);
        self.core.position = position;
        self.core.lifetime = lifetime;
        self.core.age = 0;
        self.inactive = false;
    }

    /// Override the random schedule, e.g. for scripted placements
    pub fn set_schedule(&mut self, lifetime: u32, procreate_at: Option<u32>) {
        self.core.lifetime = lifetime;
        self.procreate_at = procreate_at;
    }

    pub fn core(&self) -> &GlyphCore {
        &self.core
    }

    pub fn procreate_at(&self) -> Option<u32> {
        self.procreate_at
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_inactive(&self) -> bool {
        self.inactive
    }

    pub fn tick(&mut self, ctx: &mut TickContext) -> GlyphTick {
        if self.inactive {
            return GlyphTick::Continue;
        }
        let expired = self.core.advance();

        // A glyph retiring at the boost age still gets its boost draw
        let age = self.core.age;
        let scheduled = !expired && self.procreate_at == Some(age);
        let boosted = age == EARLY_PROCREATION_AGE
            && ctx.rng.gen::<f32>() > 1.0 / 3.0
            && ctx.roster_size < ctx.ideal_glyphs;

        let offspring = if scheduled || boosted {
            self.pick_offspring_cell(ctx.grid, ctx.rng)
        } else {
            None
        };

        match (expired, offspring) {
            (true, Some(cell)) => GlyphTick::RetireAndProcreate(cell),
            (true, None) => GlyphTick::Retire,
            (false, Some(cell)) => GlyphTick::Procreate(cell),
            (false, None) => GlyphTick::Continue,
        }
    }

    /// Uniform choice among the vacant N/E/S/W neighbours
    pub fn pick_offspring_cell(&self, grid: &GlyphGrid, rng: &mut StdRng) -> Option<IVec2> {
        grid.vacant_neighbors(self.core.position).choose(rng).copied()
    }

    pub fn on_retire(&self) -> Retirement {
        Retirement::Deactivate
    }

    /// Mark the glyph as pooled. Returns false if it already was, so the
    /// caller never enqueues it twice.
    pub fn deactivate(&mut self) -> bool {
        if self.inactive {
            return false;
        }
        self.inactive = true;
        true
    }

    pub fn draw(&self, origin: Vec2) -> Option<DrawPrimitive> {
        if self.inactive {
            return None;
        }
        Some(DrawPrimitive {
            kind: PrimitiveKind::Sliver,
            position: origin,
            size: Vec2::new(SLIVER_WIDTH, CELL_PX),
            color: if self.selected {
                SELECTED_SLIVER_COLOR
            } else {
                SLIVER_COLOR
            },
            alpha: 1.0,
        })
    }
}
