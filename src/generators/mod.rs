use rand::{SeedableRng, rngs::StdRng};

mod dfs;
mod kruskal;
pub mod union_find;

use dfs::randomized_dfs;
use kruskal::randomized_kruskal;

use crate::{
    error::Result,
    maze::Maze,
    observer::{NoopObserver, Observer},
};

/// Get a random number generator, optionally seeded for reproducibility.
pub fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generator {
    Dfs,
    Kruskal,
}

impl Generator {
    pub const ALL: [Generator; 2] = [Generator::Dfs, Generator::Kruskal];
}

impl std::fmt::Display for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Generator::Dfs => write!(f, "Randomized Depth-First Search (DFS)"),
            Generator::Kruskal => write!(f, "Kruskal's Algorithm"),
        }
    }
}

/// Generates a perfect maze of logical size `n`. The same `seed` always yields the same maze;
/// `None` draws one from the OS.
pub fn generate_maze(n: usize, generator: Generator, seed: Option<u64>) -> Result<Maze> {
    generate_maze_with(n, generator, seed, &mut NoopObserver)
}

/// Like [`generate_maze`], showing the grid to `observer` after every carved wall.
pub fn generate_maze_with(
    n: usize,
    generator: Generator,
    seed: Option<u64>,
    observer: &mut dyn Observer,
) -> Result<Maze> {
    match generator {
        Generator::Dfs => randomized_dfs(n, seed, observer),
        Generator::Kruskal => randomized_kruskal(n, seed, observer),
    }
}
