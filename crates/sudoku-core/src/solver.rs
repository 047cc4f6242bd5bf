//! Backtracking solver.
//!
//! Recursive depth-first search with chronological backtracking: scan for
//! the next empty cell in row-major order, try digits 1-9 ascending, place,
//! recurse, and undo the placement on every failure path. The search is
//! finite (each placement strictly reduces the empty count) and
//! deterministic (both orders are fixed).

use crate::Grid;
use thiserror::Error;

/// Terminal outcome of a solve attempt. Both variants are deterministic:
/// retrying the identical input yields the identical result.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SolveError {
    /// Exhaustive search found no completion under the given clues.
    #[error("puzzle has no solution")]
    Unsolvable,
    /// The supplied grid already violates row/column/box uniqueness.
    #[error("puzzle violates Sudoku constraints before solving")]
    InvalidInput,
}

/// Stateless solver; all state is per-call.
pub struct Solver;

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver {
    /// Create a new solver.
    pub fn new() -> Self {
        Self
    }

    /// Solve the puzzle, returning the completed grid.
    ///
    /// The input is copied, never mutated. The grid is pre-validated and
    /// rejected with [`SolveError::InvalidInput`] if a row, column, or box
    /// already repeats a digit. For grids admitting several completions the
    /// result is the lexicographically-first one under the row-major scan
    /// and ascending digit order; that choice is implementation-defined,
    /// not a canonical solution.
    pub fn solve(&self, grid: &Grid) -> Result<Grid, SolveError> {
        if !grid.is_consistent() {
            return Err(SolveError::InvalidInput);
        }
        let mut working = grid.clone();
        if solve_recursive(&mut working) {
            Ok(working)
        } else {
            Err(SolveError::Unsolvable)
        }
    }

    /// Count completions of the puzzle, stopping once `limit` are found.
    /// An inconsistent grid has no completions.
    pub fn count_solutions(&self, grid: &Grid, limit: usize) -> usize {
        if !grid.is_consistent() {
            return 0;
        }
        let mut working = grid.clone();
        let mut count = 0;
        count_recursive(&mut working, &mut count, limit);
        count
    }

    /// Check if the puzzle has exactly one solution.
    pub fn has_unique_solution(&self, grid: &Grid) -> bool {
        self.count_solutions(grid, 2) == 1
    }
}

fn solve_recursive(grid: &mut Grid) -> bool {
    // No empty cell left means the grid is solved.
    let pos = match grid.find_empty() {
        Some(pos) => pos,
        None => return true,
    };

    for digit in 1..=9 {
        if grid.is_valid_placement(pos, digit) {
            grid.set(pos, digit);
            if solve_recursive(grid) {
                return true;
            }
            grid.clear(pos);
        }
    }

    false
}

fn count_recursive(grid: &mut Grid, count: &mut usize, limit: usize) {
    let pos = match grid.find_empty() {
        Some(pos) => pos,
        None => {
            *count += 1;
            return;
        }
    };

    for digit in 1..=9 {
        if *count >= limit {
            return;
        }
        if grid.is_valid_placement(pos, digit) {
            grid.set(pos, digit);
            count_recursive(grid, count, limit);
            grid.clear(pos);
        }
    }
}
