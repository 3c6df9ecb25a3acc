use std::{cmp::Reverse, collections::BinaryHeap};

use super::{Solution, mark_route};
use crate::{
    maze::{Coord, Maze, Tile},
    observer::Observer,
};

/// A frontier entry. The derived ordering compares `f`, then `g`, then the coordinate, so
/// equal-priority entries pop in a fixed order for a given grid.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct TrackedCell {
    /// Traveling cost plus heuristic cost
    f: usize,
    /// Cost to reach this cell from the start
    g: usize,
    coord: Coord,
}

/// Manhattan distance, admissible and consistent on a 4-connected grid with unit steps.
fn heuristic(a: Coord, b: Coord) -> usize {
    a.0.abs_diff(b.0) + a.1.abs_diff(b.1)
}

pub fn solve_astar(
    maze: &Maze,
    start: Coord,
    goal: Coord,
    on_visit: &mut dyn Observer,
    on_path: &mut dyn Observer,
) -> Solution {
    let mut work = maze.clone();
    let width = maze.width();
    let cell_count = maze.height() * width;

    // Using Reverse to turn the max-heap into a min-heap
    let mut open: BinaryHeap<Reverse<TrackedCell>> = BinaryHeap::new();
    let mut closed = vec![false; cell_count];
    let mut g_score = vec![usize::MAX; cell_count];
    let mut came_from: Vec<Option<Coord>> = vec![None; cell_count];

    g_score[start.0 * width + start.1] = 0;
    open.push(Reverse(TrackedCell {
        f: heuristic(start, goal),
        g: 0,
        coord: start,
    }));
    let mut expanded = 0;

    while let Some(Reverse(current)) = open.pop() {
        let idx = current.coord.0 * width + current.coord.1;
        // Stale entry for a cell that was already expanded with a better score
        if closed[idx] {
            continue;
        }
        closed[idx] = true;

        if current.coord == goal {
            let len = mark_route(&mut work, &came_from, start, goal, on_path);
            return Solution {
                maze: work,
                path_len: Some(len),
                expanded,
            };
        }

        expanded += 1;
        if current.coord != start && work[current.coord] == Tile::Open {
            work[current.coord] = Tile::Explored;
            on_visit.observe(&work);
        }

        let new_cost = g_score[idx] + 1; // Uniform cost for each step
        for next in maze.passable_neighbors(current.coord) {
            let next_idx = next.0 * width + next.1;
            if closed[next_idx] || new_cost >= g_score[next_idx] {
                continue;
            }
            g_score[next_idx] = new_cost;
            came_from[next_idx] = Some(current.coord);
            open.push(Reverse(TrackedCell {
                f: new_cost + heuristic(next, goal),
                g: new_cost,
                coord: next,
            }));
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
        solve_astar(maze, Maze::ENTRANCE, goal, &mut NoopObserver, &mut NoopObserver)
    }

    #[test]
    fn test_frontier_order() {
        let mut heap = BinaryHeap::new();
        for (f, g, coord) in [(4, 2, (3, 1)), (3, 3, (0, 0)), (4, 1, (0, 5)), (4, 2, (1, 1))] {
            heap.push(Reverse(TrackedCell { f, g, coord }));
        }
        let order = std::iter::from_fn(|| heap.pop().map(|Reverse(c)| c.coord)).collect::<Vec<_>>();
        assert_eq!(order, vec![(0, 0), (0, 5), (1, 1), (3, 1)]);
    }

    #[test]
    fn test_prefers_shorter_route_in_open_room() {
        // Open room: a depth-first walk would wander, A* heads straight down
        let maze = concat!(
            "#.#####\n",
            "#.....#\n",
            "#.....#\n",
            "#.....#\n",
            "#####.#\n",
        )
        .parse::<Maze>()
        .unwrap();
        let solution = solve(&maze);
        // 4 steps down and 4 steps right, plus the entrance
        assert_eq!(solution.path_len, Some(9));
        assert_eq!(solution.maze.count(Tile::Path), 9);
    }

    #[test]
    fn test_unreachable_goal() {
        let maze = "#.###\n#.#.#\n###.#\n".parse::<Maze>().unwrap();
        let solution = solve(&maze);
        assert_eq!(solution.path_len, None);
        assert_eq!(solution.maze.count(Tile::Path), 0);
        assert_eq!(solution.maze.to_string(), "#.###\n#*#.#\n###.#\n");
    }

    #[test]
    fn test_heuristic() {
        assert_eq!(heuristic((0, 1), (10, 9)), 18);
        assert_eq!(heuristic((10, 9), (0, 1)), 18);
        assert_eq!(heuristic((3, 3), (3, 3)), 0);
    }
}
