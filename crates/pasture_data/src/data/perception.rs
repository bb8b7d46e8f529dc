use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Compact summary of what occupies one perception cell.
///
/// Three-way co-occupancy is never represented; it collapses to the
/// highest-priority pair (see `pasture_core::classifier`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CategoryCode {
    #[default]
    Empty,
    GrowerOnly,
    GrazerOnly,
    HunterOnly,
    GrazerHunter,
    GrazerGrower,
    HunterGrower,
}

impl CategoryCode {
    /// Single-character glyph for debug dumps of a grid.
    #[must_use]
    pub fn glyph(self) -> char {
        match self {
            CategoryCode::Empty => '.',
            CategoryCode::GrowerOnly => 'p',
            CategoryCode::GrazerOnly => 's',
            CategoryCode::HunterOnly => 'f',
            CategoryCode::GrazerHunter => 'X',
            CategoryCode::GrazerGrower => 'S',
            CategoryCode::HunterGrower => 'F',
        }
    }
}

/// Axis-aligned rectangle, half-open on the max edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Rect {
    #[must_use]
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x < self.max_x && y >= self.min_y && y < self.max_y
    }
}

/// Per-agent perception grid.
///
/// `cells` is a `side × side` row-major matrix; rows follow the y axis and
/// columns the x axis. The grid remembers its owner by id only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brain {
    pub owner: Uuid,
    pub side: usize,
    pub cell_size: f64,
    pub cells: Vec<CategoryCode>,
}
