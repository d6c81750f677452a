//! Occupancy grid for grid-resident glyphs
//!
//! Every cell holds at most one glyph id. Coordinates outside the grid are
//! ignored by the mutating calls, so a stale position can never corrupt a
//! neighbouring cell.

use bevy::math::IVec2;
use rand::Rng;

use super::glyph::GlyphId;

/// Axis-aligned neighbour offsets in N/E/S/W order (no diagonals)
pub const FOUR_DIRECTIONS: [IVec2; 4] = [
    IVec2::new(0, 1),
    IVec2::new(1, 0),
    IVec2::new(0, -1),
    IVec2::new(-1, 0),
];

/// Attempts made by [`GlyphGrid::random_empty_cell`] before giving up
const EMPTY_CELL_ATTEMPTS: usize = 8;

#[derive(Debug, Clone)]
pub struct GlyphGrid {
    size: IVec2,
    cells: Vec<Option<GlyphId>>,
}

impl GlyphGrid {
    /// Create an empty grid. Dimensions below one cell are raised to one.
    pub fn new(size: IVec2) -> Self {
        let size = size.max(IVec2::ONE);
        Self {
            size,
            cells: vec![None; (size.x * size.y) as usize],
        }
    }

    pub fn size(&self) -> IVec2 {
        self.size
    }

    pub fn contains(&self, pos: IVec2) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.size.x && pos.y < self.size.y
    }

    fn index(&self, pos: IVec2) -> Option<usize> {
        self.contains(pos)
            .then(|| (pos.y * self.size.x + pos.x) as usize)
    }

    /// The glyph occupying `pos`, if any
    pub fn get(&self, pos: IVec2) -> Option<GlyphId> {
        self.index(pos).and_then(|index| self.cells[index])
    }

    /// True only for in-bounds cells with no occupant
    pub fn is_vacant(&self, pos: IVec2) -> bool {
        self.index(pos).is_some_and(|index| self.cells[index].is_none())
    }

    /// Place `id` at `pos`. Returns false (and changes nothing) when the
    /// cell is out of bounds.
    pub fn occupy(&mut self, pos: IVec2, id: GlyphId) -> bool {
        let Some(index) = self.index(pos) else {
            return false;
        };
        debug_assert!(
            self.cells[index].is_none_or(|current| current == id),
            "cell {pos} already holds another glyph"
        );
        self.cells[index] = Some(id);
        true
    }

    /// Clear `pos`, but only if it still references `id`
    pub fn release(&mut self, pos: IVec2, id: GlyphId) {
        if let Some(index) = self.index(pos) {
            if self.cells[index] == Some(id) {
                self.cells[index] = None;
            }
        }
    }

    /// Wrap a coordinate toroidally onto the grid
    pub fn wrap(&self, pos: IVec2) -> IVec2 {
        IVec2::new(pos.x.rem_euclid(self.size.x), pos.y.rem_euclid(self.size.y))
    }

    /// In-bounds, unoccupied axis-aligned neighbours of `pos`
    pub fn vacant_neighbors(&self, pos: IVec2) -> Vec<IVec2> {
        FOUR_DIRECTIONS
            .iter()
            .map(|direction| pos + *direction)
            .filter(|neighbor| self.is_vacant(*neighbor))
            .collect()
    }

    /// Sample a few random cells and return the first empty one
    pub fn random_empty_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<IVec2> {
        (0..EMPTY_CELL_ATTEMPTS)
            .map(|_| IVec2::new(rng.gen_range(0..self.size.x), rng.gen_range(0..self.size.y)))
            .find(|cell| self.is_vacant(*cell))
    }

    pub fn occupied(&self) -> impl Iterator<Item = (IVec2, GlyphId)> + '_ {
        let width = self.size.x;
        self.cells.iter().enumerate().filter_map(move |(index, cell)| {
            cell.map(|id| {
                let index = index as i32;
                (IVec2::new(index % width, index / width), id)
            })
        })
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_wrap_is_toroidal() {
        let grid = GlyphGrid::new(IVec2::new(10, 8));
        assert_eq!(grid.wrap(IVec2::new(-1, 0)), IVec2::new(9, 0));
        assert_eq!(grid.wrap(IVec2::new(10, 8)), IVec2::new(0, 0));
        assert_eq!(grid.wrap(IVec2::new(-21, 17)), IVec2::new(9, 1));
    }

    #[test]
    fn test_out_of_bounds_is_silent() {
        let mut grid = GlyphGrid::new(IVec2::new(4, 4));
        assert!(!grid.occupy(IVec2::new(4, 0), GlyphId(0)));
        grid.release(IVec2::new(-1, 2), GlyphId(0));
        assert_eq!(grid.get(IVec2::new(-1, 2)), None);
        assert!(!grid.is_vacant(IVec2::new(0, 4)));
        assert_eq!(grid.occupied_count(), 0);
    }

    #[test]
    fn test_release_only_clears_matching_glyph() {
        let mut grid = GlyphGrid::new(IVec2::new(4, 4));
        let cell = IVec2::new(2, 3);
        grid.occupy(cell, GlyphId(7));
        grid.release(cell, GlyphId(3));
        assert_eq!(grid.get(cell), Some(GlyphId(7)));
        grid.release(cell, GlyphId(7));
        assert!(grid.is_vacant(cell));
    }

    #[test]
    fn test_vacant_neighbors_skip_edges_and_occupants() {
        let mut grid = GlyphGrid::new(IVec2::new(3, 3));
        grid.occupy(IVec2::new(1, 0), GlyphId(1));
        // Corner: only north and east exist, east is taken
        assert_eq!(grid.vacant_neighbors(IVec2::ZERO), vec![IVec2::new(0, 1)]);
    }

    #[test]
    fn test_occupied_reports_coordinates() {
        let mut grid = GlyphGrid::new(IVec2::new(5, 5));
        grid.occupy(IVec2::new(3, 4), GlyphId(2));
        let cells: Vec<_> = grid.occupied().collect();
        assert_eq!(cells, vec![(IVec2::new(3, 4), GlyphId(2))]);
    }

    #[test]
    fn test_random_empty_cell_on_full_grid() {
        let mut grid = GlyphGrid::new(IVec2::new(2, 1));
        grid.occupy(IVec2::new(0, 0), GlyphId(0));
        grid.occupy(IVec2::new(1, 0), GlyphId(1));
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(grid.random_empty_cell(&mut rng), None);
    }
}
