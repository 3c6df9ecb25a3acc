use super::{Solution, mark_route};
use crate::{
    maze::{Coord, Maze, Tile},
    observer::Observer,
};

/// Depth-first search with an explicit stack. Cells are marked visited when pushed, so each
/// one is expanded at most once and its parent is the cell that discovered it.
pub fn solve_backtrack(
    maze: &Maze,
    start: Coord,
    goal: Coord,
    on_visit: &mut dyn Observer,
    on_path: &mut dyn Observer,
) -> Solution {
    let mut work = maze.clone();
    let width = maze.width();
    let cell_count = maze.height() * width;

    let mut visited = vec![false; cell_count];
    let mut came_from: Vec<Option<Coord>> = vec![None; cell_count];
    visited[start.0 * width + start.1] = true;

    let mut stack = vec![start];
    let mut expanded = 0;

    while let Some(current) = stack.pop() {
        if current == goal {
            let len = mark_route(&mut work, &came_from, start, goal, on_path);
            return Solution {
                maze: work,
                path_len: Some(len),
                expanded,
            };
        }

        expanded += 1;
        if current != start {
            work[current] = Tile::Explored;
            on_visit.observe(&work);
        }

        // Pushed in the order down, up, right, left; the last one pushed is explored first
        for next in maze.passable_neighbors(current) {
            let idx = next.0 * width + next.1;
            if !visited[idx] {
                visited[idx] = true;
                came_from[idx] = Some(current);
                stack.push(next);
            }
        }
    }

    Solution {
        maze: work,
        path_len: None,
        expanded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::NoopObserver;

    fn solve(maze: &Maze) -> Solution {
        let goal = maze.exit().unwrap();
        solve_backtrack(maze, Maze::ENTRANCE, goal, &mut NoopObserver, &mut NoopObserver)
    }

    #[test]
    fn test_dead_ends_are_marked_explored() {
        // The left branch from (1, 1) is a dead end and is explored first
        let maze = "#.###\n....#\n###.#\n".parse::<Maze>().unwrap();
        let solution = solve(&maze);
        assert_eq!(solution.path_len, Some(5));
        assert_eq!(solution.maze.to_string(), "#o###\n*ooo#\n###o#\n");
    }

    #[test]
    fn test_long_corridor() {
        // A single snake-shaped corridor is the worst case for a recursive search
        let n = 200;
        let side = 2 * n + 1;
        let mut rows = vec![vec![Tile::Wall; side]; side];
        rows[0][1] = Tile::Open;
        for (row, line) in rows.iter_mut().enumerate().skip(1).take(side - 2) {
            if row % 2 == 1 {
                line[1..side - 1].fill(Tile::Open);
            } else if row % 4 == 2 {
                line[side - 2] = Tile::Open;
            } else {
                line[1] = Tile::Open;
            }
        }
        rows[side - 1][side - 2] = Tile::Open;
        let maze = Maze::from_rows(rows).unwrap();
        let solution = solve(&maze);
        assert!(solution.is_solved());
        // Only the tail of the last row, left of the exit, is a dead end
        assert_eq!(solution.maze.count(Tile::Explored), side - 3);
    }

    #[test]
    fn test_exhausted_search_keeps_explored_marks() {
        let maze = "#.#\n#.#\n###\n#.#\n".parse::<Maze>().unwrap();
        let solution = solve(&maze);
        assert_eq!(solution.path_len, None);
        assert_eq!(solution.expanded, 2);
        assert_eq!(solution.maze.to_string(), "#.#\n#*#\n###\n#.#\n");
    }
}
