//! Perception grid ("brain") construction.
//!
//! Every mobile agent carries a [`Brain`]: a square window of side
//! `2 × vision_range` centred on the agent, cut into `side × side` cells. On
//! every tick the grid is rebuilt from scratch by asking the roster what
//! occupies each cell. The grid only stores category codes, never identities.
//!
//! ## Resolution
//!
//! `side = floor(2 × vision_range / min_entity_size)`, at least 1 and always
//! odd so the agent sits in the centre cell. Larger vision therefore means
//! more cells of roughly constant size. A vision range that is zero, negative
//! or non-finite collapses to a single cell of side `min_entity_size`.

pub use pasture_data::{Brain, CategoryCode, Offset, Position, Rect};
use pasture_data::Species;

use crate::config::SearchStrategy;
use crate::roster::Occupancy;
use crate::search;
use uuid::Uuid;

/// Upper bound on grid side length; caps refresh cost for very long sight.
pub const MAX_GRID_SIDE: usize = 129;

pub trait BrainLogic {
    /// Empty grid owned by `owner`; filled on the first refresh.
    fn for_owner(owner: Uuid) -> Self;

    /// Rebuilds every cell around `origin`.
    fn refresh<Q: Occupancy + ?Sized>(
        &mut self,
        origin: Position,
        vision_range: f64,
        min_entity_size: f64,
        roster: &Q,
    );

    fn cell(&self, row: usize, col: usize) -> Option<CategoryCode>;

    /// Index of the centre row/column (the owner's cell).
    fn center(&self) -> usize;

    fn find_nearest(&self, wanted: CategoryCode, strategy: SearchStrategy) -> Option<Offset>;

    /// Like [`find_nearest`](Self::find_nearest), but matches any code that
    /// includes `species`, so shared cells stay visible.
    fn find_nearest_species(&self, species: Species, strategy: SearchStrategy) -> Option<Offset>;

    /// One line of glyphs per row, for debug logging.
    fn render(&self) -> String;
}

/// Grid side length and cell size for a vision range.
#[must_use]
pub fn grid_resolution(vision_range: f64, min_entity_size: f64) -> (usize, f64) {
    if !(vision_range.is_finite() && vision_range > 0.0) {
        return (1, min_entity_size.max(0.0));
    }

    let raw = (2.0 * vision_range / min_entity_size).floor();
    let mut side = if raw.is_finite() && raw >= 1.0 {
        (raw as usize).min(MAX_GRID_SIDE)
    } else {
        1
    };
    if side % 2 == 0 {
        side += 1;
    }
    (side, 2.0 * vision_range / side as f64)
}

impl BrainLogic for Brain {
    fn for_owner(owner: Uuid) -> Self {
        Brain {
            owner,
            side: 0,
            cell_size: 0.0,
            cells: Vec::new(),
        }
    }

    fn refresh<Q: Occupancy + ?Sized>(
        &mut self,
        origin: Position,
        vision_range: f64,
        min_entity_size: f64,
        roster: &Q,
    ) {
        let (side, cell_size) = grid_resolution(vision_range, min_entity_size);
        self.side = side;
        self.cell_size = cell_size;
        self.cells.clear();
        self.cells.resize(side * side, CategoryCode::Empty);

        let half = cell_size * side as f64 / 2.0;
        let x0 = origin.x - half;
        let y0 = origin.y - half;

        for row in 0..side {
            let min_y = y0 + cell_size * row as f64;
            let max_y = y0 + cell_size * (row + 1) as f64;
            for col in 0..side {
                let rect = Rect::new(
                    x0 + cell_size * col as f64,
                    min_y,
                    x0 + cell_size * (col + 1) as f64,
                    max_y,
                );
                self.cells[row * side + col] = roster.occupancy(&rect, self.owner);
            }
        }
    }

    fn cell(&self, row: usize, col: usize) -> Option<CategoryCode> {
        if row >= self.side || col >= self.side {
            return None;
        }
        self.cells.get(row * self.side + col).copied()
    }

    fn center(&self) -> usize {
        self.side / 2
    }

    fn find_nearest(&self, wanted: CategoryCode, strategy: SearchStrategy) -> Option<Offset> {
        search::find_nearest(self, wanted, strategy)
    }

    fn find_nearest_species(&self, species: Species, strategy: SearchStrategy) -> Option<Offset> {
        search::find_nearest_species(self, species, strategy)
    }

    fn render(&self) -> String {
        let mut out = String::with_capacity(self.side * (self.side + 1));
        for row in self.cells.chunks(self.side.max(1)) {
            out.extend(row.iter().map(|c| c.glyph()));
            out.push('\n');
        }
        out
    }
}
