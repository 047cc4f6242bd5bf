//! HTTP routes: the static page plus the generate/solve API.
//!
//! The generate endpoint proxies the external service when a key is
//! configured and falls back to the built-in sample board; the solve
//! endpoints try the external service first and fall back to the local
//! backtracking solver. Failure kinds map to distinct status codes so the
//! page can tell a broken puzzle from a genuinely unsolvable one.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use sudoku_core::{Grid, GridError, SolveError, Solver};
use thiserror::Error;

use crate::source;
use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/styles.css", get(styles))
        .route("/app.js", get(app_js))
        .route("/api/sudokugenerate", get(generate))
        .route("/api/sudokusolve", get(solve_stored).post(solve_supplied))
        .with_state(state)
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("no puzzle has been generated yet")]
    NoPuzzle,
    #[error("malformed grid: {0}")]
    Malformed(#[from] GridError),
    #[error("puzzle violates Sudoku constraints")]
    InvalidPuzzle,
    #[error("puzzle has no solution")]
    Unsolvable,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::NoPuzzle => StatusCode::NOT_FOUND,
            ApiError::Malformed(_) | ApiError::InvalidPuzzle => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Unsolvable => StatusCode::CONFLICT,
        }
    }
}

impl From<SolveError> for ApiError {
    fn from(err: SolveError) -> Self {
        match err {
            SolveError::Unsolvable => ApiError::Unsolvable,
            SolveError::InvalidInput => ApiError::InvalidPuzzle,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.to_string(),
        });
        (self.status(), body).into_response()
    }
}

#[derive(Debug, Deserialize)]
struct GenerateParams {
    #[serde(default = "default_difficulty")]
    difficulty: String,
}

fn default_difficulty() -> String {
    "medium".to_string()
}

#[derive(Debug, Serialize)]
struct PuzzleBody {
    puzzle: Grid,
}

#[derive(Debug, Serialize)]
struct SolutionBody {
    solution: Grid,
}

#[derive(Debug, Deserialize)]
struct SolveRequest {
    puzzle: Vec<Vec<u8>>,
}

async fn index() -> Html<&'static str> {
    Html(include_str!("../assets/index.html"))
}

async fn styles() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/css")],
        include_str!("../assets/styles.css"),
    )
}

async fn app_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript")],
        include_str!("../assets/app.js"),
    )
}

/// Produce a new puzzle and remember it as the current one.
async fn generate(
    State(state): State<Arc<AppState>>,
    Query(params): Query<GenerateParams>,
) -> Json<PuzzleBody> {
    let puzzle = match &state.client {
        Some(client) => match client.generate(&params.difficulty).await {
            Ok(grid) => {
                info!(
                    "generated a {} puzzle via the external service",
                    params.difficulty
                );
                grid
            }
            Err(err) => {
                warn!("external generation failed, serving the sample board: {}", err);
                source::sample_puzzle()
            }
        },
        None => source::sample_puzzle(),
    };
    state.store_puzzle(puzzle.clone());
    Json(PuzzleBody { puzzle })
}

/// Solve the last generated puzzle.
async fn solve_stored(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SolutionBody>, ApiError> {
    let puzzle = state.last_puzzle().ok_or(ApiError::NoPuzzle)?;
    let solution = solve_with_fallback(&state, &puzzle).await?;
    Ok(Json(SolutionBody { solution }))
}

/// Solve a puzzle supplied in the request body.
async fn solve_supplied(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SolveRequest>,
) -> Result<Json<SolutionBody>, ApiError> {
    let puzzle = Grid::from_rows(&body.puzzle)?;
    let solution = solve_with_fallback(&state, &puzzle).await?;
    Ok(Json(SolutionBody { solution }))
}

/// External service first when a key is configured; on no key or any
/// upstream failure the local solver decides.
async fn solve_with_fallback(state: &AppState, puzzle: &Grid) -> Result<Grid, ApiError> {
    if let Some(client) = &state.client {
        match client.solve(puzzle).await {
            Ok(solution) => return Ok(solution),
            Err(err) => {
                warn!("external solve failed, falling back to the local solver: {}", err);
            }
        }
    }
    Ok(Solver::new().solve(puzzle)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sudoku_core::Position;

    fn local_state() -> Arc<AppState> {
        Arc::new(AppState::new(None))
    }

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(ApiError::NoPuzzle.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Malformed(GridError::BadRowCount(8)).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::from(SolveError::InvalidInput).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::from(SolveError::Unsolvable).status(),
            StatusCode::CONFLICT
        );
    }

    #[tokio::test]
    async fn test_generate_serves_and_stores_sample_without_key() {
        let state = local_state();
        let Json(body) = generate(
            State(state.clone()),
            Query(GenerateParams {
                difficulty: default_difficulty(),
            }),
        )
        .await;

        assert_eq!(body.puzzle, source::sample_puzzle());
        assert_eq!(state.last_puzzle(), Some(source::sample_puzzle()));
    }

    #[tokio::test]
    async fn test_solve_stored_requires_a_puzzle() {
        let err = solve_stored(State(local_state())).await.unwrap_err();
        assert!(matches!(err, ApiError::NoPuzzle));
    }

    #[tokio::test]
    async fn test_solve_stored_solves_the_slot_locally() {
        let state = local_state();
        state.store_puzzle(source::sample_puzzle());

        let Json(body) = solve_stored(State(state)).await.unwrap();
        assert!(body.solution.is_complete());
        let first_row: Vec<u8> = (0..9)
            .map(|col| body.solution.get(Position::new(0, col)).unwrap())
            .collect();
        assert_eq!(first_row, vec![5, 3, 4, 6, 7, 8, 9, 1, 2]);
    }

    #[tokio::test]
    async fn test_solve_supplied_rejects_malformed_and_invalid() {
        let err = solve_supplied(
            State(local_state()),
            Json(SolveRequest {
                puzzle: vec![vec![0; 9]; 8],
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::Malformed(_)));

        // two 5s in the first row
        let mut rows = vec![vec![0u8; 9]; 9];
        rows[0][0] = 5;
        rows[0][4] = 5;
        let err = solve_supplied(State(local_state()), Json(SolveRequest { puzzle: rows }))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidPuzzle));
    }

    #[tokio::test]
    async fn test_solve_supplied_reports_unsolvable() {
        // consistent grid whose top-right cell has no candidate left
        let mut rows = vec![vec![0u8; 9]; 9];
        for col in 0..8 {
            rows[0][col] = col as u8 + 1;
        }
        rows[1][8] = 9;

        let err = solve_supplied(State(local_state()), Json(SolveRequest { puzzle: rows }))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unsolvable));
    }
}
