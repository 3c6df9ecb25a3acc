//! Perfect maze generation and solving on ASCII grids.
//!
//! A maze of logical size `n` is a `(2n + 1) x (2n + 1)` grid of [`Tile`]s. Generators carve a
//! spanning tree into an empty grid; solvers copy a grid and mark the route from the entrance
//! `(0, 1)` to the exit `(2n, 2n - 1)`.
//!
//! ```
//! use mazegrid::{Generator, Solver, Tile, generate_maze, solve_maze};
//!
//! let maze = generate_maze(8, Generator::Kruskal, Some(42)).unwrap();
//! let solution = solve_maze(&maze, Solver::AStar);
//! assert!(solution.is_solved());
//! assert_eq!(solution.maze[(0, 1)], Tile::Path);
//! ```

pub mod app;
pub mod bench;
pub mod error;
pub mod generators;
pub mod maze;
pub mod observer;
pub mod solvers;

pub use error::{MazeError, Result};
pub use generators::{Generator, generate_maze, generate_maze_with};
pub use maze::{Coord, Maze, Tile};
pub use observer::{NoopObserver, Observer};
pub use solvers::{Solution, Solver, solve_maze, solve_maze_with};
