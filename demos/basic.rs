//! Basic example of using the Sudoku engine

use sudoku_core::{Grid, Solver};

fn main() {
    let puzzle_string =
        "530070000600195000098000060800060003400803001700020006060000280000419005000080079";
    let puzzle = match Grid::from_string(puzzle_string) {
        Ok(grid) => grid,
        Err(err) => {
            eprintln!("Bad puzzle string: {}", err);
            return;
        }
    };

    println!("Puzzle:");
    println!("{}", puzzle);

    // Show some stats
    println!("Given cells: {}", puzzle.given_count());
    println!("Empty cells: {}", puzzle.empty_count());

    let solver = Solver::new();

    // Check uniqueness
    let solutions = solver.count_solutions(&puzzle, 2);
    println!("Number of solutions (up to 2): {}\n", solutions);

    // Solve it
    println!("Solving...\n");
    match solver.solve(&puzzle) {
        Ok(solution) => {
            println!("Solution:");
            println!("{}", solution);
        }
        Err(err) => println!("No solution: {}", err),
    }
}
