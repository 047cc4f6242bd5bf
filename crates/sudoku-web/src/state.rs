use std::sync::Mutex;

use sudoku_core::Grid;

use crate::client::ExternalClient;

/// Shared server state: the optional external-service client and the
/// single "last generated puzzle" slot the solve endpoint reads.
pub struct AppState {
    pub client: Option<ExternalClient>,
    last_puzzle: Mutex<Option<Grid>>,
}

impl AppState {
    pub fn new(client: Option<ExternalClient>) -> Self {
        Self {
            client,
            last_puzzle: Mutex::new(None),
        }
    }

    /// Replace the stored puzzle with the most recently generated one.
    pub fn store_puzzle(&self, grid: Grid) {
        *self.last_puzzle.lock().unwrap() = Some(grid);
    }

    /// Copy of the most recently generated puzzle, if any.
    pub fn last_puzzle(&self) -> Option<Grid> {
        self.last_puzzle.lock().unwrap().clone()
    }
}
