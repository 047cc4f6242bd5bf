//! Built-in puzzle source, used when generation cannot be delegated.

use sudoku_core::Grid;

/// Classic textbook puzzle with a unique solution.
const SAMPLE: &str =
    "530070000600195000098000060800060003400803001700020006060000280000419005000080079";

/// The board served when no external credential is configured or the
/// external service is unavailable.
pub fn sample_puzzle() -> Grid {
    Grid::from_string(SAMPLE).expect("sample board is well-formed")
}
