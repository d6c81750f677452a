//! Shared glyph lifecycle
//!
//! Every grid-resident glyph carries a [`GlyphCore`] that ages once per tick
//! and asks to be retired when its lifetime runs out. How a glyph retires
//! is decided by the variant through [`Glyph::on_retire`]: single glyphs
//! go back to the projector's pool, matrices are destroyed.

use std::ops::Range;

use bevy::math::{IVec2, Vec2};
use rand::rngs::StdRng;
use rand::Rng;

use super::draw::DrawPrimitive;
use super::grid::GlyphGrid;
use super::matrix::GlyphMatrix;
use super::single::SingleGlyph;

/// Lifetime range shared by both glyph variants, in ticks
pub const GLYPH_LIFETIME: Range<u32> = 10..600;

/// Stable handle to a glyph slot in the projector's roster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GlyphId(pub(crate) usize);

impl GlyphId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Position, colour and age bookkeeping common to every glyph
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphCore {
    pub position: IVec2,
    /// Fixed at creation, selects the render hue
    pub color_phase: f32,
    pub lifetime: u32,
    pub age: u32,
}

impl GlyphCore {
    pub fn new(position: IVec2, lifetime: u32, rng: &mut StdRng) -> Self {
        Self {
            position,
            color_phase: rng.gen(),
            lifetime,
            age: 0,
        }
    }

    /// Age by one tick. Returns true once the lifetime is used up.
    pub fn advance(&mut self) -> bool {
        self.age += 1;
        self.is_expired()
    }

    pub fn is_expired(&self) -> bool {
        self.age >= self.lifetime
    }

    /// Remaining life in [0, 1], 1 when fresh
    pub fn remaining_fraction(&self) -> f32 {
        if self.lifetime == 0 {
            return 0.0;
        }
        (1.0 - self.age as f32 / self.lifetime as f32).clamp(0.0, 1.0)
    }
}

/// Read-only view of the host that a glyph needs while ticking
pub struct TickContext<'a> {
    pub grid: &'a GlyphGrid,
    pub rng: &'a mut StdRng,
    /// Every glyph in the roster, pooled ones included
    pub roster_size: usize,
    pub ideal_glyphs: usize,
}

/// What the host must do after a glyph ticked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphTick {
    /// Nothing to do (also returned by pooled glyphs)
    Continue,
    /// Lifetime is over, apply the glyph's retirement
    Retire,
    /// Place a new single glyph at this vacant cell
    Procreate(IVec2),
    /// Retire, then place a new single glyph at this cell
    RetireAndProcreate(IVec2),
}

/// Retirement behaviour chosen by each variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retirement {
    /// Return to the projector's pool for later reuse
    Deactivate,
    /// Remove from the roster entirely
    Destroy,
}

#[derive(Debug, Clone)]
pub enum Glyph {
    Matrix(GlyphMatrix),
    Single(SingleGlyph),
}

impl Glyph {
    pub fn core(&self) -> &GlyphCore {
        match self {
            Glyph::Matrix(matrix) => &matrix.core,
            Glyph::Single(single) => &single.core,
        }
    }

    pub fn core_mut(&mut self) -> &mut GlyphCore {
        match self {
            Glyph::Matrix(matrix) => &mut matrix.core,
            Glyph::Single(single) => &mut single.core,
        }
    }

    pub fn position(&self) -> IVec2 {
        self.core().position
    }

    /// Pooled glyphs are neither on the grid nor ticked
    pub fn is_active(&self) -> bool {
        match self {
            Glyph::Matrix(_) => true,
            Glyph::Single(single) => !single.is_inactive(),
        }
    }

    pub fn tick(&mut self, ctx: &mut TickContext) -> GlyphTick {
        match self {
            Glyph::Matrix(matrix) => matrix.tick(ctx.rng),
            Glyph::Single(single) => single.tick(ctx),
        }
    }

    pub fn on_retire(&self) -> Retirement {
        match self {
            Glyph::Matrix(matrix) => matrix.on_retire(),
            Glyph::Single(single) => single.on_retire(),
        }
    }

    /// Primitive for this glyph drawn at `origin` (screen space)
    pub fn draw(&self, origin: Vec2) -> Option<DrawPrimitive> {
        match self {
            Glyph::Matrix(matrix) => Some(matrix.draw(origin)),
            Glyph::Single(single) => single.draw(origin),
        }
    }

    pub fn as_matrix(&self) -> Option<&GlyphMatrix> {
        match self {
            Glyph::Matrix(matrix) => Some(matrix),
            Glyph::Single(_) => None,
        }
    }

    pub fn as_matrix_mut(&mut self) -> Option<&mut GlyphMatrix> {
        match self {
            Glyph::Matrix(matrix) => Some(matrix),
            Glyph::Single(_) => None,
        }
    }

    pub fn as_single(&self) -> Option<&SingleGlyph> {
        match self {
            Glyph::Single(single) => Some(single),
            Glyph::Matrix(_) => None,
        }
    }

    pub fn as_single_mut(&mut self) -> Option<&mut SingleGlyph> {
        match self {
            Glyph::Single(single) => Some(single),
            Glyph::Matrix(_) => None,
        }
    }
}
