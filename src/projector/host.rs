//! The projector host: owns the grid, the glyph roster and pool, the cursor
//! roster and the random source, and drives one simulation tick at a time.
//!
//! Glyphs live in a slot arena addressed by [`GlyphId`]. A tick walks the
//! slots that existed when it started and places offspring as soon as they
//! are requested. A glyph born or reactivated during the walk is first
//! ticked on the next tick.

use std::collections::HashSet;

use bevy::math::{IVec2, Vec2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, trace, warn};

use super::cursor::Cursor;
use super::draw::{DrawPrimitive, CELL_PX};
use super::glyph::{Glyph, GlyphId, GlyphTick, Retirement, TickContext};
use super::grid::GlyphGrid;
use super::matrix::GlyphMatrix;
use super::settings::ProjectorSettings;
use super::single::SingleGlyph;

/// Grid-to-pixel mapping, including the interpolated jitter offset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub origin: Vec2,
    pub previous_offset: Vec2,
    pub offset: Vec2,
}

impl Projection {
    pub fn project(&self, coord: IVec2, fraction: f32) -> Vec2 {
        self.origin
            + coord.as_vec2() * CELL_PX
            + self.previous_offset.lerp(self.offset, fraction)
    }
}

/// Population snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ProjectorStats {
    pub tick: u64,
    pub live_glyphs: usize,
    pub single_glyphs: usize,
    pub glyph_matrices: usize,
    pub pooled_glyphs: usize,
    pub cursors: usize,
    pub occupied_cells: usize,
}

pub struct Projector {
    settings: ProjectorSettings,
    grid: GlyphGrid,
    slots: Vec<Option<Glyph>>,
    vacant_slots: Vec<usize>,
    pool: Vec<GlyphId>,
    cursors: Vec<Cursor>,
    rng: StdRng,
    offset: Vec2,
    previous_offset: Vec2,
    live_glyphs: usize,
    tick: u64,
}

impl Projector {
    pub fn new(settings: ProjectorSettings, rng: StdRng) -> Self {
        let settings = match settings.validate() {
            Ok(()) => settings,
            Err(problem) => {
                warn!("Adjusting projector settings: {}", problem);
                settings.sanitized()
            }
        };
        debug!(
            "Creating projector: grid {}x{}, effect {:.2}, ideal glyphs {}",
            settings.grid_size.x,
            settings.grid_size.y,
            settings.effect_amount,
            settings.ideal_glyph_count
        );
        Self {
            grid: GlyphGrid::new(settings.grid_size),
            settings,
            slots: Vec::new(),
            vacant_slots: Vec::new(),
            pool: Vec::new(),
            cursors: Vec::new(),
            rng,
            offset: Vec2::ZERO,
            previous_offset: Vec2::ZERO,
            live_glyphs: 0,
            tick: 0,
        }
    }

    pub fn from_seed(settings: ProjectorSettings, seed: u64) -> Self {
        Self::new(settings, StdRng::seed_from_u64(seed))
    }

    pub fn settings(&self) -> &ProjectorSettings {
        &self.settings
    }

    pub fn grid(&self) -> &GlyphGrid {
        &self.grid
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn is_visible(&self) -> bool {
        self.settings.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.settings.visible = visible;
    }

    /// Glyphs currently on the grid (pooled ones excluded)
    pub fn live_glyph_count(&self) -> usize {
        self.live_glyphs
    }

    pub fn pooled_glyph_count(&self) -> usize {
        self.pool.len()
    }

    /// Every glyph in the roster, live and pooled. This is the population
    /// measured against the ideal glyph count.
    pub fn roster_size(&self) -> usize {
        self.live_glyphs + self.pool.len()
    }

    pub fn glyph(&self, id: GlyphId) -> Option<&Glyph> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    pub fn glyph_mut(&mut self, id: GlyphId) -> Option<&mut Glyph> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    pub fn glyphs(&self) -> impl Iterator<Item = (GlyphId, &Glyph)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|glyph| (GlyphId(index), glyph)))
    }

    pub fn cursors(&self) -> &[Cursor] {
        &self.cursors
    }

    pub fn projection(&self) -> Projection {
        Projection {
            origin: self.settings.origin,
            previous_offset: self.previous_offset,
            offset: self.offset,
        }
    }

    /// Pixel position of a grid coordinate at the given time-stacking fraction
    pub fn project(&self, coord: IVec2, fraction: f32) -> Vec2 {
        self.projection().project(coord, fraction)
    }

    /// Place a single glyph, reactivating a pooled one when available.
    /// Returns `None` if `pos` is out of bounds or occupied.
    pub fn add_single_glyph_at(&mut self, pos: IVec2) -> Option<GlyphId> {
        if !self.grid.is_vacant(pos) {
            return None;
        }

        while let Some(id) = self.pool.pop() {
            let Some(Glyph::Single(glyph)) = self.slots.get_mut(id.0).and_then(Option::as_mut)
            else {
                continue;
            };
            glyph.reset(pos, &mut self.rng);
            self.grid.occupy(pos, id);
            self.live_glyphs += 1;
            trace!("Reactivated pooled glyph {:?} at {}", id, pos);
            return Some(id);
        }

        let glyph = SingleGlyph::new(pos, &mut self.rng);
        Some(self.insert_glyph(Glyph::Single(glyph)))
    }

    /// Place a glyph matrix. Returns `None` if `pos` is out of bounds or
    /// occupied.
    pub fn add_glyph_matrix_at(&mut self, pos: IVec2) -> Option<GlyphId> {
        if !self.grid.is_vacant(pos) {
            return None;
        }
        let glyph = GlyphMatrix::new(pos, self.settings.effect_amount, &mut self.rng);
        Some(self.insert_glyph(Glyph::Matrix(glyph)))
    }

    fn insert_glyph(&mut self, glyph: Glyph) -> GlyphId {
        let pos = glyph.position();
        let id = match self.vacant_slots.pop() {
            Some(index) => {
                self.slots[index] = Some(glyph);
                GlyphId(index)
            }
            None => {
                self.slots.push(Some(glyph));
                GlyphId(self.slots.len() - 1)
            }
        };
        self.grid.occupy(pos, id);
        self.live_glyphs += 1;
        id
    }

    pub fn add_cursor_at(&mut self, coord: IVec2) {
        let start = self.project(coord, 1.0);
        let cursor = Cursor::new(coord, start, &mut self.rng);
        debug!("Cursor spawned at {}", coord);
        self.cursors.push(cursor);
    }

    /// Shift a glyph by `delta`, wrapping around the grid edges. A move onto
    /// a cell held by another glyph is refused.
    pub fn move_glyph(&mut self, id: GlyphId, delta: IVec2) -> bool {
        let Some(glyph) = self.slots.get_mut(id.0).and_then(Option::as_mut) else {
            return false;
        };
        if !glyph.is_active() {
            return false;
        }

        let from = glyph.position();
        let to = self.grid.wrap(from + delta);
        if self.grid.get(to).is_some_and(|other| other != id) {
            return false;
        }

        self.grid.release(from, id);
        glyph.core_mut().position = to;
        self.grid.occupy(to, id);
        true
    }

    /// Remove a glyph from the grid and the roster (and from the pool if it
    /// was waiting there)
    pub fn destroy_glyph(&mut self, id: GlyphId) -> bool {
        let Some(glyph) = self.slots.get_mut(id.0).and_then(Option::take) else {
            return false;
        };
        if glyph.is_active() {
            self.grid.release(glyph.position(), id);
            self.live_glyphs -= 1;
        } else {
            self.pool.retain(|pooled| *pooled != id);
        }
        self.vacant_slots.push(id.0);
        true
    }

    /// Park a single glyph in the pool. Calling it again on a pooled glyph
    /// does nothing.
    pub fn deactivate_glyph(&mut self, id: GlyphId) -> bool {
        let Some(Glyph::Single(glyph)) = self.slots.get_mut(id.0).and_then(Option::as_mut) else {
            return false;
        };
        if !glyph.deactivate() {
            return false;
        }
        let pos = glyph.core().position;
        self.grid.release(pos, id);
        self.pool.push(id);
        self.live_glyphs -= 1;
        true
    }

    fn retire_glyph(&mut self, id: GlyphId) {
        let Some(retirement) = self.glyph(id).map(Glyph::on_retire) else {
            return;
        };
        match retirement {
            Retirement::Deactivate => {
                self.deactivate_glyph(id);
            }
            Retirement::Destroy => {
                self.destroy_glyph(id);
            }
        }
    }

    /// Advance the whole projector by one tick
    pub fn update(&mut self) {
        self.update_jitter();
        self.update_glyphs();
        self.update_cursors();
        self.spawn_ambient();
        self.tick += 1;

        #[cfg(debug_assertions)]
        if let Err(problem) = self.check_invariants() {
            debug_assert!(false, "occupancy invariant broken: {problem}");
        }
    }

    fn update_jitter(&mut self) {
        self.previous_offset = self.offset;
        if !self.rng.gen_bool(self.settings.jitter_chance) {
            return;
        }
        let amplitude = self.settings.jitter_amplitude * self.settings.effect_amount;
        self.offset = if amplitude > 0.0 {
            Vec2::new(
                self.rng.gen_range(-amplitude..=amplitude),
                self.rng.gen_range(-amplitude..=amplitude),
            )
        } else {
            Vec2::ZERO
        };
    }

    fn update_glyphs(&mut self) {
        let slot_count = self.slots.len();
        let mut born_this_tick = HashSet::new();

        for index in 0..slot_count {
            if born_this_tick.contains(&index) {
                continue;
            }
            let id = GlyphId(index);
            let roster_size = self.roster_size();
            let outcome = match self.slots[index].as_mut() {
                Some(glyph) => {
                    let mut ctx = TickContext {
                        grid: &self.grid,
                        rng: &mut self.rng,
                        roster_size,
                        ideal_glyphs: self.settings.ideal_glyph_count,
                    };
                    glyph.tick(&mut ctx)
                }
                None => continue,
            };

            let offspring = match outcome {
                GlyphTick::Continue => None,
                GlyphTick::Retire => {
                    self.retire_glyph(id);
                    None
                }
                GlyphTick::Procreate(cell) => Some(cell),
                GlyphTick::RetireAndProcreate(cell) => {
                    self.retire_glyph(id);
                    Some(cell)
                }
            };

            // The cell was vacant when picked and nothing has moved since
            if let Some(child) = offspring.and_then(|cell| self.add_single_glyph_at(cell)) {
                born_this_tick.insert(child.index());
            }
        }
    }

    fn update_cursors(&mut self) {
        let projection = self.projection();
        let room_size = self.settings.room_size;
        let rng = &mut self.rng;
        self.cursors.retain_mut(|cursor| {
            let target = projection.project(cursor.grid_target(), 1.0);
            let alive = cursor.tick(target, rng, room_size);
            if !alive {
                debug!("Cursor left the room at {}", cursor.grid_target());
            }
            alive
        });
    }

    fn spawn_ambient(&mut self) {
        if self.live_glyphs < self.settings.ideal_glyph_count
            && self.rng.gen_bool(self.settings.seed_chance)
        {
            if let Some(cell) = self.grid.random_empty_cell(&mut self.rng) {
                self.add_single_glyph_at(cell);
            }
        }

        if self.rng.gen_bool(self.settings.matrix_chance) {
            if let Some(cell) = self.grid.random_empty_cell(&mut self.rng) {
                self.add_glyph_matrix_at(cell);
            }
        }

        if self.cursors.len() < self.settings.max_cursors
            && self.rng.gen_bool(self.settings.cursor_chance)
        {
            let room = self.settings.room_size;
            let coord = IVec2::new(self.rng.gen_range(0..room.x), self.rng.gen_range(0..room.y));
            self.add_cursor_at(coord);
        }
    }

    /// Primitives for the current frame. `fraction` is the time-stacking
    /// value between the previous and the current tick.
    pub fn render(&self, fraction: f32, camera_offset: Vec2) -> Vec<DrawPrimitive> {
        if !self.settings.visible {
            return Vec::new();
        }

        let fraction = fraction.clamp(0.0, 1.0);
        let projection = self.projection();
        let mut primitives = Vec::with_capacity(self.live_glyphs + self.cursors.len() * 5);

        for glyph in self.slots.iter().flatten() {
            let origin = projection.project(glyph.position(), fraction) - camera_offset;
            primitives.extend(glyph.draw(origin));
        }
        for cursor in &self.cursors {
            cursor.draw(
                fraction,
                camera_offset,
                self.settings.viewport_size,
                &mut primitives,
            );
        }

        primitives.sort_by(|a, b| a.kind.layer().total_cmp(&b.kind.layer()));
        primitives
    }

    pub fn stats(&self) -> ProjectorStats {
        let mut stats = ProjectorStats {
            tick: self.tick,
            live_glyphs: self.live_glyphs,
            pooled_glyphs: self.pool.len(),
            cursors: self.cursors.len(),
            occupied_cells: self.grid.occupied_count(),
            ..Default::default()
        };
        for glyph in self.slots.iter().flatten().filter(|glyph| glyph.is_active()) {
            match glyph {
                Glyph::Matrix(_) => stats.glyph_matrices += 1,
                Glyph::Single(_) => stats.single_glyphs += 1,
            }
        }
        stats
    }

    /// Check that grid occupancy and glyph positions agree one-to-one
    pub fn check_invariants(&self) -> Result<(), String> {
        let pooled: HashSet<GlyphId> = self.pool.iter().copied().collect();
        if pooled.len() != self.pool.len() {
            return Err("a glyph is queued in the pool twice".to_string());
        }

        let mut active = 0;
        for (id, glyph) in self.glyphs() {
            let pos = glyph.position();
            if glyph.is_active() {
                active += 1;
                if self.grid.get(pos) != Some(id) {
                    return Err(format!("{id:?} at {pos} is not registered in its cell"));
                }
            } else if !pooled.contains(&id) {
                return Err(format!("inactive {id:?} is missing from the pool"));
            }
        }

        for (pos, id) in self.grid.occupied() {
            match self.glyph(id) {
                Some(glyph) if glyph.is_active() && glyph.position() == pos => {}
                _ => return Err(format!("cell {pos} references stale {id:?}")),
            }
        }

        if active != self.live_glyphs {
            return Err(format!(
                "live count {} disagrees with {} active glyphs",
                self.live_glyphs, active
            ));
        }
        Ok(())
    }
}
