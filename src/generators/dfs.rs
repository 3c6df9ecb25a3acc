use rand::seq::SliceRandom;

use crate::{
    error::Result,
    generators::get_rng,
    maze::{Maze, carve_between, logical_neighbors},
    observer::Observer,
};

/// Randomized depth-first carving from logical cell `(0, 0)`, driven by an explicit stack.
pub fn randomized_dfs(n: usize, seed: Option<u64>, observer: &mut dyn Observer) -> Result<Maze> {
    let mut maze = Maze::new(n)?;
    let mut rng = get_rng(seed);

    let mut visited = vec![false; n * n];
    let start = (0, 0);
    visited[0] = true;

    // The stack holds the current carving route; its top is the cell being extended
    let mut stack = vec![start];
    let mut carved = 0;

    while let Some(&cell) = stack.last() {
        let mut neighbors = logical_neighbors(cell, n)
            .filter(|&(row, col)| !visited[row * n + col])
            .collect::<Vec<_>>();
        neighbors.shuffle(&mut rng);

        match neighbors.first() {
            Some(&neighbor) => {
                carve_between(&mut maze, cell, neighbor);
                carved += 1;
                observer.observe(&maze);
                visited[neighbor.0 * n + neighbor.1] = true;
                stack.push(neighbor);
            }
            None => {
                // Dead end, backtrack
                stack.pop();
            }
        }
    }

    maze.open_endpoints();
    tracing::debug!(n, ?seed, carved, "dfs generation finished");
    Ok(maze)
}
