mod astar;
mod backtrack;

use astar::solve_astar;
use backtrack::solve_backtrack;

use crate::{
    maze::{Coord, Maze, Tile},
    observer::{NoopObserver, Observer},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Solver {
    Backtrack,
    AStar,
}

impl Solver {
    pub const ALL: [Solver; 2] = [Solver::Backtrack, Solver::AStar];
}

impl std::fmt::Display for Solver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Solver::Backtrack => write!(f, "Backtracking Depth-First Search"),
            Solver::AStar => write!(f, "A* Search"),
        }
    }
}

/// Result of a solver run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// Copy of the input grid with the route marked `o` and abandoned cells marked `*`.
    pub maze: Maze,
    /// Number of cells on the route, entrance and exit included. `None` when the exit
    /// cannot be reached.
    pub path_len: Option<usize>,
    /// Number of cells taken off the frontier and expanded.
    pub expanded: usize,
}

impl Solution {
    pub fn is_solved(&self) -> bool {
        self.path_len.is_some()
    }
}

/// Solves `maze` from the entrance `(0, 1)` to the exit `(height - 1, width - 2)`.
/// The input grid is never modified.
pub fn solve_maze(maze: &Maze, solver: Solver) -> Solution {
    solve_maze_with(maze, solver, &mut NoopObserver, &mut NoopObserver)
}

/// Like [`solve_maze`]. `on_visit` is shown the grid after each cell marked explored,
/// `on_path` after each cell marked on the route.
pub fn solve_maze_with(
    maze: &Maze,
    solver: Solver,
    on_visit: &mut dyn Observer,
    on_path: &mut dyn Observer,
) -> Solution {
    let solution = match endpoints(maze) {
        Some((start, goal)) => match solver {
            Solver::Backtrack => solve_backtrack(maze, start, goal, on_visit, on_path),
            Solver::AStar => solve_astar(maze, start, goal, on_visit, on_path),
        },
        None => {
            tracing::debug!(
                height = maze.height(),
                width = maze.width(),
                "entrance or exit is not a passage"
            );
            Solution {
                maze: maze.clone(),
                path_len: None,
                expanded: 0,
            }
        }
    };
    tracing::debug!(
        %solver,
        path_len = ?solution.path_len,
        expanded = solution.expanded,
        "solve finished"
    );
    solution
}

/// Entrance and exit, if both are in range and passable.
fn endpoints(maze: &Maze) -> Option<(Coord, Coord)> {
    let start = Maze::ENTRANCE;
    let goal = maze.exit()?;
    (maze.is_passable(start) && maze.is_passable(goal)).then_some((start, goal))
}

/// Marks the route from `goal` back to `start` by following `came_from`, then forces both
/// endpoints onto the route. Returns the number of cells on it.
fn mark_route(
    work: &mut Maze,
    came_from: &[Option<Coord>],
    start: Coord,
    goal: Coord,
    on_path: &mut dyn Observer,
) -> usize {
    let width = work.width();
    let mut len = 0;
    let mut node = Some(goal);
    while let Some(coord) = node {
        work[coord] = Tile::Path;
        len += 1;
        on_path.observe(work);
        node = came_from[coord.0 * width + coord.1];
    }
    work[start] = Tile::Path;
    work[goal] = Tile::Path;
    len
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        generators::{Generator, generate_maze},
        maze::testing::bfs_distance,
        observer::StepCounter,
    };
    use proptest::prelude::*;

    #[test]
    fn test_single_cell_maze() {
        let maze = generate_maze(1, Generator::Dfs, Some(0)).unwrap();
        for solver in Solver::ALL {
            let solution = solve_maze(&maze, solver);
            assert_eq!(solution.maze.to_string(), "#o#\n#o#\n#o#\n");
            assert_eq!(solution.path_len, Some(3));
        }
    }

    #[test]
    fn test_walled_off_exit() {
        let mut maze = generate_maze(5, Generator::Kruskal, Some(11)).unwrap();
        // Seal the last logical cell and the exit below it into their own pocket
        maze[(9, 8)] = Tile::Wall;
        maze[(8, 9)] = Tile::Wall;
        for solver in Solver::ALL {
            let solution = solve_maze(&maze, solver);
            assert!(!solution.is_solved());
            assert_eq!(solution.maze.count(Tile::Path), 0);
            assert!(solution.maze.count(Tile::Explored) > 0);
        }
    }

    #[test]
    fn test_endpoint_is_wall() {
        let mut maze = generate_maze(3, Generator::Dfs, Some(2)).unwrap();
        maze[Maze::ENTRANCE] = Tile::Wall;
        for solver in Solver::ALL {
            let solution = solve_maze(&maze, solver);
            assert!(!solution.is_solved());
            assert_eq!(solution.maze, maze);
        }
    }

    #[test]
    fn test_grid_too_narrow() {
        let maze = Maze::from_rows(vec![vec![Tile::Open]; 3]).unwrap();
        for solver in Solver::ALL {
            let solution = solve_maze(&maze, solver);
            assert!(!solution.is_solved());
            assert_eq!(solution.expanded, 0);
        }
    }

    #[test]
    fn test_open_field_uses_any_passable_tile() {
        // Loaded grids may already carry marks; they still count as passages
        let maze = "#o###\n#***#\n###*#\n".parse::<Maze>().unwrap();
        for solver in Solver::ALL {
            let solution = solve_maze(&maze, solver);
            assert_eq!(solution.path_len, Some(5));
            assert_eq!(solution.maze.to_string(), "#o###\n#ooo#\n###o#\n");
        }
    }

    #[test]
    fn test_observers_follow_marks() {
        let maze = generate_maze(7, Generator::Dfs, Some(4)).unwrap();
        for solver in Solver::ALL {
            let mut visits = StepCounter::default();
            let mut path = StepCounter::default();
            let solution = solve_maze_with(&maze, solver, &mut visits, &mut path);
            assert_eq!(Some(path.steps), solution.path_len);
            // Every expanded cell but the entrance gets an explored mark
            assert_eq!(visits.steps, solution.expanded - 1);
        }
    }

    #[test]
    fn test_observer_sees_solver_copy() {
        let maze = generate_maze(4, Generator::Kruskal, Some(8)).unwrap();
        let mut last = None;
        let mut on_path = |grid: &Maze| last = Some(grid.count(Tile::Path));
        let solution = solve_maze_with(&maze, Solver::AStar, &mut NoopObserver, &mut on_path);
        assert_eq!(last, solution.path_len);
        assert_eq!(maze.count(Tile::Path), 0);
    }

    proptest! {
        #[test]
        fn solvers_mark_entrance_and_exit(n in 1usize..14, seed in any::<u64>()) {
            for generator in Generator::ALL {
                let maze = generate_maze(n, generator, Some(seed)).unwrap();
                for solver in Solver::ALL {
                    let solution = solve_maze(&maze, solver);
                    prop_assert!(solution.is_solved());
                    prop_assert_eq!(solution.maze[Maze::ENTRANCE], Tile::Path);
                    prop_assert_eq!(solution.maze[(2 * n, 2 * n - 1)], Tile::Path);
                    prop_assert_eq!(solution.maze.count(Tile::Path), solution.path_len.unwrap());
                }
            }
        }

        #[test]
        fn astar_route_is_shortest(n in 1usize..14, seed in any::<u64>()) {
            for generator in Generator::ALL {
                let maze = generate_maze(n, generator, Some(seed)).unwrap();
                let steps = bfs_distance(&maze, Maze::ENTRANCE, maze.exit().unwrap()).unwrap();
                let solution = solve_maze(&maze, Solver::AStar);
                prop_assert_eq!(solution.maze.count(Tile::Path), steps + 1);
            }
        }

        #[test]
        fn solvers_leave_input_untouched(n in 1usize..10, seed in any::<u64>()) {
            let maze = generate_maze(n, Generator::Dfs, Some(seed)).unwrap();
            let before = maze.clone();
            for solver in Solver::ALL {
                let first = solve_maze(&maze, solver);
                prop_assert_eq!(&maze, &before);
                // Same input, same output
                let second = solve_maze(&maze, solver);
                prop_assert_eq!(first, second);
            }
        }

        #[test]
        fn observed_solve_matches_unobserved(n in 1usize..12, seed in any::<u64>()) {
            for generator in Generator::ALL {
                let maze = generate_maze(n, generator, Some(seed)).unwrap();
                for solver in Solver::ALL {
                    let mut visits = StepCounter::default();
                    let mut path = StepCounter::default();
                    let observed = solve_maze_with(&maze, solver, &mut visits, &mut path);
                    prop_assert_eq!(&observed, &solve_maze(&maze, solver));
                    prop_assert_eq!(Some(path.steps), observed.path_len);
                }
            }
        }
    }
}
