//! Nearest-target search over a built perception grid.
//!
//! Both strategies return the matched cell's centre as a signed world-space
//! offset from the grid owner: `((col - c) × cell_size, (row - c) × cell_size)`
//! where `c` is the centre index. They agree whenever exactly one cell matches.
//! With several matches:
//!
//! - [`SearchStrategy::Breadth`] visits the centre, then expands through the
//!   8-neighbourhood in the fixed order of [`NEIGHBOURS`]. The first match
//!   dequeued wins, so any cell of Chebyshev ring `n` beats every cell of ring
//!   `n + 1` regardless of Euclidean distance.
//! - [`SearchStrategy::Euclidean`] scans all cells and keeps the smallest
//!   squared distance from the centre; ties go to the first cell in row-major
//!   order.

use crate::classifier::contains;
use crate::config::SearchStrategy;
use pasture_data::{Brain, CategoryCode, Offset, Species};
use std::collections::VecDeque;

/// `(row, col)` deltas in breadth-first expansion order.
pub const NEIGHBOURS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

pub fn find_nearest(brain: &Brain, wanted: CategoryCode, strategy: SearchStrategy) -> Option<Offset> {
    nearest_cell(brain, wanted, strategy).map(|(row, col)| cell_offset(brain, row, col))
}

/// Nearest cell holding at least one agent of `species`, whatever else shares it.
pub fn find_nearest_species(
    brain: &Brain,
    species: Species,
    strategy: SearchStrategy,
) -> Option<Offset> {
    nearest_cell_by(brain, |code| contains(code, species), strategy)
        .map(|(row, col)| cell_offset(brain, row, col))
}

/// Grid coordinates of the nearest cell whose code is exactly `wanted`.
pub fn nearest_cell(
    brain: &Brain,
    wanted: CategoryCode,
    strategy: SearchStrategy,
) -> Option<(usize, usize)> {
    nearest_cell_by(brain, |code| code == wanted, strategy)
}

/// Grid coordinates of the nearest cell accepted by `matches`.
pub fn nearest_cell_by<F>(brain: &Brain, matches: F, strategy: SearchStrategy) -> Option<(usize, usize)>
where
    F: Fn(CategoryCode) -> bool,
{
    if brain.side == 0 || brain.cells.len() < brain.side * brain.side {
        return None;
    }
    match strategy {
        SearchStrategy::Breadth => breadth_first(brain, matches),
        SearchStrategy::Euclidean => euclidean_scan(brain, matches),
    }
}

#[must_use]
pub fn cell_offset(brain: &Brain, row: usize, col: usize) -> Offset {
    let c = (brain.side / 2) as f64;
    Offset {
        dx: (col as f64 - c) * brain.cell_size,
        dy: (row as f64 - c) * brain.cell_size,
    }
}

fn breadth_first<F: Fn(CategoryCode) -> bool>(brain: &Brain, matches: F) -> Option<(usize, usize)> {
    let side = brain.side;
    let c = side / 2;
    let mut visited = vec![false; side * side];
    let mut queue = VecDeque::with_capacity(side * side);
    visited[c * side + c] = true;
    queue.push_back((c, c));

    while let Some((row, col)) = queue.pop_front() {
        if matches(brain.cells[row * side + col]) {
            return Some((row, col));
        }
        for (dr, dc) in NEIGHBOURS {
            let (Some(nr), Some(nc)) = (row.checked_add_signed(dr), col.checked_add_signed(dc))
            else {
                continue;
            };
            if nr >= side || nc >= side {
                continue;
            }
            let idx = nr * side + nc;
            if !visited[idx] {
                visited[idx] = true;
                queue.push_back((nr, nc));
            }
        }
    }
    None
}

fn euclidean_scan<F: Fn(CategoryCode) -> bool>(brain: &Brain, matches: F) -> Option<(usize, usize)> {
    let side = brain.side;
    let c = (side / 2) as i64;
    let mut best: Option<((usize, usize), i64)> = None;

    for row in 0..side {
        for col in 0..side {
            if !matches(brain.cells[row * side + col]) {
                continue;
            }
            let dr = row as i64 - c;
            let dc = col as i64 - c;
            let dist_sq = dr * dr + dc * dc;
            if best.is_none_or(|(_, d)| dist_sq < d) {
                best = Some(((row, col), dist_sq));
            }
        }
    }
    best.map(|(cell, _)| cell)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn grid(side: usize, cell_size: f64, marks: &[(usize, usize, CategoryCode)]) -> Brain {
        let mut cells = vec![CategoryCode::Empty; side * side];
        for &(r, c, code) in marks {
            cells[r * side + c] = code;
        }
        Brain {
            owner: Uuid::nil(),
            side,
            cell_size,
            cells,
        }
    }

    const BOTH: [SearchStrategy; 2] = [SearchStrategy::Breadth, SearchStrategy::Euclidean];

    #[test]
    fn test_single_match_agrees() {
        let brain = grid(5, 10.0, &[(1, 4, CategoryCode::GrowerOnly)]);
        for strategy in BOTH {
            let off = find_nearest(&brain, CategoryCode::GrowerOnly, strategy).unwrap();
            assert_eq!(off, Offset { dx: 20.0, dy: -10.0 });
        }
    }

    #[test]
    fn test_no_match_is_none() {
        let brain = grid(5, 10.0, &[(0, 0, CategoryCode::HunterOnly)]);
        for strategy in BOTH {
            assert!(find_nearest(&brain, CategoryCode::GrowerOnly, strategy).is_none());
        }
    }

    #[test]
    fn test_centre_cell_matches_with_zero_offset() {
        let brain = grid(3, 7.0, &[(1, 1, CategoryCode::GrazerOnly)]);
        for strategy in BOTH {
            let off = find_nearest(&brain, CategoryCode::GrazerOnly, strategy).unwrap();
            assert_eq!(off, Offset { dx: 0.0, dy: 0.0 });
        }
    }

    #[test]
    fn test_strategies_disagree_across_rings() {
        // (0,0) is two rings out diagonally; (4,2) is two rings out straight down.
        let brain = grid(
            5,
            10.0,
            &[
                (0, 0, CategoryCode::GrowerOnly),
                (4, 2, CategoryCode::GrowerOnly),
            ],
        );
        assert_eq!(
            nearest_cell(&brain, CategoryCode::GrowerOnly, SearchStrategy::Breadth),
            Some((0, 0))
        );
        assert_eq!(
            nearest_cell(&brain, CategoryCode::GrowerOnly, SearchStrategy::Euclidean),
            Some((4, 2))
        );
    }

    #[test]
    fn test_breadth_prefers_inner_ring_over_euclidean_distance() {
        // Ring 1 corner (dist 1.41) beats ring 2 straight (dist 2) in both.
        let brain = grid(
            5,
            1.0,
            &[
                (0, 2, CategoryCode::HunterOnly),
                (3, 3, CategoryCode::HunterOnly),
            ],
        );
        for strategy in BOTH {
            assert_eq!(
                nearest_cell(&brain, CategoryCode::HunterOnly, strategy),
                Some((3, 3))
            );
        }
    }

    #[test]
    fn test_euclidean_tie_goes_to_row_major_first() {
        let brain = grid(
            5,
            1.0,
            &[
                (2, 0, CategoryCode::GrowerOnly),
                (0, 2, CategoryCode::GrowerOnly),
                (4, 2, CategoryCode::GrowerOnly),
            ],
        );
        assert_eq!(
            nearest_cell(&brain, CategoryCode::GrowerOnly, SearchStrategy::Euclidean),
            Some((0, 2))
        );
    }

    #[test]
    fn test_empty_or_malformed_grid() {
        let empty = grid(0, 10.0, &[]);
        let mut short = grid(3, 10.0, &[]);
        short.cells.truncate(4);
        for strategy in BOTH {
            assert!(find_nearest(&empty, CategoryCode::Empty, strategy).is_none());
            assert!(find_nearest(&short, CategoryCode::Empty, strategy).is_none());
        }
    }

    #[test]
    fn test_species_search_matches_shared_cells() {
        let brain = grid(
            5,
            10.0,
            &[
                (2, 3, CategoryCode::GrazerGrower),
                (0, 0, CategoryCode::GrowerOnly),
                (2, 1, CategoryCode::HunterOnly),
            ],
        );
        for strategy in BOTH {
            assert_eq!(
                find_nearest_species(&brain, Species::Grower, strategy),
                Some(Offset { dx: 10.0, dy: 0.0 })
            );
            assert_eq!(
                find_nearest_species(&brain, Species::Grazer, strategy),
                Some(Offset { dx: 10.0, dy: 0.0 })
            );
            assert_eq!(
                find_nearest(&brain, CategoryCode::GrowerOnly, strategy),
                Some(Offset { dx: -20.0, dy: -20.0 })
            );
        }
    }

    #[test]
    fn test_species_search_skips_cells_without_species() {
        let brain = grid(3, 5.0, &[(0, 1, CategoryCode::HunterGrower)]);
        for strategy in BOTH {
            assert!(find_nearest_species(&brain, Species::Grazer, strategy).is_none());
        }
    }
}
