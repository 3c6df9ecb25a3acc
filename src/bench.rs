//! Benchmark sweep over every generator and solver, one CSV row per timed run.

use std::{
    io::Write,
    time::{Duration, Instant},
};

use crate::{
    generators::{Generator, generate_maze},
    maze::{Maze, Tile},
    solvers::{Solver, solve_maze},
};

pub const CSV_HEADER: [&str; 15] = [
    "size",
    "seed",
    "role",
    "algo",
    "repeat",
    "ok",
    "error",
    "time_ns",
    "ascii_h",
    "ascii_w",
    "wall_count",
    "corridor_count",
    "path_length",
    "explored_count",
    "visited_count",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Generator,
    Solver,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Generator => write!(f, "generator"),
            Role::Solver => write!(f, "solver"),
        }
    }
}

/// Tile counts of a grid. All zero when a run produced no grid.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GridMetrics {
    pub height: usize,
    pub width: usize,
    pub walls: usize,
    /// Every non-wall tile, marked or not.
    pub corridors: usize,
    pub path: usize,
    pub explored: usize,
}

impl GridMetrics {
    pub fn of(maze: &Maze) -> Self {
        let walls = maze.count(Tile::Wall);
        Self {
            height: maze.height(),
            width: maze.width(),
            walls,
            corridors: maze.height() * maze.width() - walls,
            path: maze.count(Tile::Path),
            explored: maze.count(Tile::Explored),
        }
    }

    pub fn visited(&self) -> usize {
        self.path + self.explored
    }
}

/// One timed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchRow {
    pub size: usize,
    pub seed: u64,
    pub role: Role,
    pub algo: &'static str,
    /// 1-based.
    pub repeat: usize,
    /// `None` when the run succeeded.
    pub error: Option<String>,
    pub time: Duration,
    pub metrics: GridMetrics,
}

impl BenchRow {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Writes the row as one CSV record, fields in [`CSV_HEADER`] order.
    pub fn write_csv(&self, out: &mut impl Write) -> std::io::Result<()> {
        let m = &self.metrics;
        writeln!(
            out,
            "{},{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
            self.size,
            self.seed,
            self.role,
            self.algo,
            self.repeat,
            u8::from(self.is_ok()),
            csv_field(self.error.as_deref().unwrap_or("")),
            self.time.as_nanos(),
            m.height,
            m.width,
            m.walls,
            m.corridors,
            m.path,
            m.explored,
            m.visited()
        )
    }
}

/// Quotes a field when it holds a separator, a quote or a line break.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

pub fn generator_key(generator: Generator) -> &'static str {
    match generator {
        Generator::Dfs => "Backtracking",
        Generator::Kruskal => "Kruskal",
    }
}

pub fn solver_key(solver: Solver) -> &'static str {
    match solver {
        Solver::Backtrack => "Backtracking",
        Solver::AStar => "AStar",
    }
}

/// Benchmarks one logical size.
///
/// Every generator runs `repeats` times with seeds `seed, seed + 1, ..`. Every solver then runs
/// `repeats` times on the last maze the DFS generator produced, falling back to a Kruskal maze
/// of seed `seed`. A failed generation is recorded as a row and does not stop the sweep; when no
/// maze could be generated at all, every solver row records the failure.
pub fn run_size(size: usize, seed: u64, repeats: usize) -> Vec<BenchRow> {
    let mut rows = Vec::with_capacity(2 * repeats * (Generator::ALL.len() + Solver::ALL.len()));
    let mut to_solve = None;

    for generator in Generator::ALL {
        for r in 0..repeats {
            let run_seed = seed.wrapping_add(r as u64);
            let started = Instant::now();
            let result = generate_maze(size, generator, Some(run_seed));
            let time = started.elapsed();
            let (error, metrics) = match &result {
                Ok(maze) => (None, GridMetrics::of(maze)),
                Err(e) => (Some(e.to_string()), GridMetrics::default()),
            };
            rows.push(BenchRow {
                size,
                seed: run_seed,
                role: Role::Generator,
                algo: generator_key(generator),
                repeat: r + 1,
                error,
                time,
                metrics,
            });
            if let (Generator::Dfs, Ok(maze)) = (generator, result) {
                to_solve = Some(maze);
            }
        }
    }
    if to_solve.is_none() {
        to_solve = generate_maze(size, Generator::Kruskal, Some(seed)).ok();
    }

    for solver in Solver::ALL {
        for r in 0..repeats {
            let run_seed = seed.wrapping_add(r as u64);
            let (error, time, metrics) = match &to_solve {
                Some(maze) => {
                    let started = Instant::now();
                    let solution = solve_maze(maze, solver);
                    (None, started.elapsed(), GridMetrics::of(&solution.maze))
                }
                None => (
                    Some("no maze to solve".to_string()),
                    Duration::ZERO,
                    GridMetrics::default(),
                ),
            };
            rows.push(BenchRow {
                size,
                seed: run_seed,
                role: Role::Solver,
                algo: solver_key(solver),
                repeat: r + 1,
                error,
                time,
                metrics,
            });
        }
    }
    tracing::debug!(size, repeats, rows = rows.len(), "benchmarked size");
    rows
}

/// Writes the header and every row.
pub fn write_csv(rows: &[BenchRow], out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "{}", CSV_HEADER.join(","))?;
    for row in rows {
        row.write_csv(out)?;
    }
    out.flush()
}

/// Ok/fail counts and timing statistics for one `(size, role, algo)` group.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub size: usize,
    pub role: Role,
    pub algo: &'static str,
    pub ok: usize,
    pub failed: usize,
    /// Mean, median and standard deviation of the successful runs, in milliseconds.
    pub timings: Option<(f64, f64, f64)>,
}

/// Groups rows by `(size, role, algo)`, keeping first-seen order.
pub fn summarize(rows: &[BenchRow]) -> Vec<Summary> {
    let mut groups: Vec<(Summary, Vec<f64>)> = Vec::new();
    for row in rows {
        let idx = match groups
            .iter()
            .position(|(s, _)| (s.size, s.role, s.algo) == (row.size, row.role, row.algo))
        {
            Some(idx) => idx,
            None => {
                let summary = Summary {
                    size: row.size,
                    role: row.role,
                    algo: row.algo,
                    ok: 0,
                    failed: 0,
                    timings: None,
                };
                groups.push((summary, Vec::new()));
                groups.len() - 1
            }
        };
        let (summary, times) = &mut groups[idx];
        if row.is_ok() {
            summary.ok += 1;
            times.push(row.time.as_secs_f64() * 1e3);
        } else {
            summary.failed += 1;
        }
    }
    groups
        .into_iter()
        .map(|(mut summary, mut times)| {
            summary.timings = timing_stats(&mut times);
            summary
        })
        .collect()
}

/// Mean, median and sample standard deviation. `None` for no samples.
fn timing_stats(times: &mut [f64]) -> Option<(f64, f64, f64)> {
    if times.is_empty() {
        return None;
    }
    times.sort_by(f64::total_cmp);
    let len = times.len();
    let mean = times.iter().sum::<f64>() / len as f64;
    let median = if len % 2 == 1 {
        times[len / 2]
    } else {
        (times[len / 2 - 1] + times[len / 2]) / 2.0
    };
    let stdev = if len > 1 {
        let var = times.iter().map(|t| (t - mean).powi(2)).sum::<f64>() / (len - 1) as f64;
        var.sqrt()
    } else {
        0.0
    };
    Some((mean, median, stdev))
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "size={:>3} role={:<9} algo={:<12} OK={:>2} FAIL={:>2}",
            self.size,
            self.role.to_string(),
            self.algo,
            self.ok,
            self.failed
        )?;
        match self.timings {
            Some((mean, median, stdev)) => write!(
                f,
                " mean={:.3}ms median={:.3}ms std={:.3}ms",
                mean, median, stdev
            ),
            None => write!(f, " (no timing)"),
        }
    }
}
