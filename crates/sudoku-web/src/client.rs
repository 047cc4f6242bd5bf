//! Client for the external third-party Sudoku service.
//!
//! Every board coming back from the service passes through
//! [`Grid::from_rows`] and a consistency check before it is trusted.

use serde::Deserialize;
use sudoku_core::Grid;
use thiserror::Error;

const BASE_URL: &str = "https://api.api-ninjas.com/v1";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("failed to encode puzzle: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("service returned an unusable board: {0}")]
    BadBoard(#[from] sudoku_core::GridError),
    #[error("service returned an inconsistent board")]
    InconsistentBoard,
    #[error("service returned a partial solution")]
    IncompleteSolution,
}

/// Wire shape of the generate endpoint; empty cells arrive as null.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    puzzle: Vec<Vec<Option<u8>>>,
}

#[derive(Debug, Deserialize)]
struct SolveResponse {
    solution: Vec<Vec<Option<u8>>>,
}

pub struct ExternalClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl ExternalClient {
    pub fn new(api_key: &str) -> Self {
        Self::with_base_url(api_key, BASE_URL)
    }

    pub fn with_base_url(api_key: &str, base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch a fresh 9x9 puzzle from the service.
    pub async fn generate(&self, difficulty: &str) -> Result<Grid, ClientError> {
        let response: GenerateResponse = self
            .http
            .get(format!("{}/sudokugenerate", self.base_url))
            .query(&[("width", "3"), ("height", "3"), ("difficulty", difficulty)])
            .header("X-Api-Key", &self.api_key)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        board_from_wire(response.puzzle)
    }

    /// Ask the service to solve a puzzle.
    pub async fn solve(&self, puzzle: &Grid) -> Result<Grid, ClientError> {
        let encoded = serde_json::to_string(&puzzle.to_rows())?;
        let response: SolveResponse = self
            .http
            .get(format!("{}/sudokusolve", self.base_url))
            .query(&[("puzzle", encoded.as_str())])
            .header("X-Api-Key", &self.api_key)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        let solution = board_from_wire(response.solution)?;
        if !solution.is_complete() {
            return Err(ClientError::IncompleteSolution);
        }
        Ok(solution)
    }
}

/// Convert a wire board (nulls for blanks) into a validated grid.
fn board_from_wire(rows: Vec<Vec<Option<u8>>>) -> Result<Grid, ClientError> {
    let rows: Vec<Vec<u8>> = rows
        .into_iter()
        .map(|row| row.into_iter().map(|cell| cell.unwrap_or(0)).collect())
        .collect();
    let grid = Grid::from_rows(&rows)?;
    if !grid.is_consistent() {
        return Err(ClientError::InconsistentBoard);
    }
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sudoku_core::Position;

    #[test]
    fn test_parse_generate_response_with_nulls() {
        let mut rows: Vec<Vec<Option<u8>>> = vec![vec![None; 9]; 9];
        rows[0][0] = Some(5);
        rows[8][8] = Some(9);
        let json = format!(
            "{{\"puzzle\":{}}}",
            serde_json::to_string(&rows).unwrap()
        );

        let response: GenerateResponse = serde_json::from_str(&json).unwrap();
        let grid = board_from_wire(response.puzzle).unwrap();
        assert_eq!(grid.get(Position::new(0, 0)), Some(5));
        assert_eq!(grid.get(Position::new(8, 8)), Some(9));
        assert_eq!(grid.given_count(), 2);
    }

    #[test]
    fn test_wire_board_shape_is_checked() {
        let rows: Vec<Vec<Option<u8>>> = vec![vec![None; 9]; 8];
        assert!(matches!(
            board_from_wire(rows),
            Err(ClientError::BadBoard(_))
        ));

        let mut rows: Vec<Vec<Option<u8>>> = vec![vec![None; 9]; 9];
        rows[3][3] = Some(11);
        assert!(matches!(
            board_from_wire(rows),
            Err(ClientError::BadBoard(_))
        ));
    }

    #[test]
    fn test_wire_board_consistency_is_checked() {
        let mut rows: Vec<Vec<Option<u8>>> = vec![vec![None; 9]; 9];
        rows[2][0] = Some(4);
        rows[2][5] = Some(4);
        assert!(matches!(
            board_from_wire(rows),
            Err(ClientError::InconsistentBoard)
        ));
    }
}
