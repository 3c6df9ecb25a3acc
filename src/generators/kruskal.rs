use rand::seq::SliceRandom;

use crate::{
    error::Result,
    generators::{get_rng, union_find::UnionFind},
    maze::{Coord, Maze, carve_between},
    observer::Observer,
};

/// Wall edge between two adjacent cells
#[derive(Clone, Copy)]
struct Edge {
    cell1: Coord,
    cell2: Coord,
}

/// Randomized Kruskal: walls are visited in shuffled order and removed whenever they separate
/// two distinct components.
pub fn randomized_kruskal(
    n: usize,
    seed: Option<u64>,
    observer: &mut dyn Observer,
) -> Result<Maze> {
    let mut maze = Maze::new(n)?;

    // Collect all possible edges, right and down neighbours only
    let mut edges: Vec<Edge> = (0..n)
        .flat_map(|row| (0..n).map(move |col| (row, col)))
        .flat_map(|(row, col)| {
            [
                (col + 1 < n).then(|| Edge {
                    cell1: (row, col),
                    cell2: (row, col + 1),
                }),
                (row + 1 < n).then(|| Edge {
                    cell1: (row, col),
                    cell2: (row + 1, col),
                }),
            ]
        })
        .flatten()
        .collect();

    let mut rng = get_rng(seed);
    edges.shuffle(&mut rng);

    let mut uf = UnionFind::new(n * n);
    let mut carved = 0;

    for edge in edges {
        let idx1 = edge.cell1.0 * n + edge.cell1.1;
        let idx2 = edge.cell2.0 * n + edge.cell2.1;

        if uf.union(idx1, idx2) {
            carve_between(&mut maze, edge.cell1, edge.cell2);
            carved += 1;
            observer.observe(&maze);
        }
    }

    maze.open_endpoints();
    tracing::debug!(n, ?seed, carved, "kruskal generation finished");
    Ok(maze)
}
