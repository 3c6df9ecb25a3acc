pub mod cell;
mod text;

pub use cell::Tile;

use crate::error::{MazeError, Result};

/// A `(row, col)` position. Depending on context it addresses either the ASCII grid or the
/// logical `n x n` cell grid.
pub type Coord = (usize, usize);

/// A maze of logical size `n`, stored as its `(2n + 1) x (2n + 1)` ASCII grid.
///
/// Logical cells live at odd `(row, col)` positions; the cells between two logical
/// neighbours are either walls or carved passages. Positions where both coordinates are even
/// are always walls. The entrance is `(0, 1)` and the exit is `(2n, 2n - 1)`.
///
/// Grids loaded from text may have any rectangular shape, in which case [`Maze::size`] is `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    data: Box<[Tile]>,
    height: usize,
    width: usize,
}

impl Maze {
    /// The entrance sits in the top boundary row, above logical cell `(0, 0)`.
    pub const ENTRANCE: Coord = (0, 1);

    /// Creates an empty maze of logical size `n`: every logical cell is open, every wall between
    /// two logical cells is closed, and the entrance and exit are open.
    pub fn new(n: usize) -> Result<Self> {
        if n < 1 {
            return Err(MazeError::InvalidSize(n));
        }
        // n cells in each dimension -> n + 1 walls -> 2n + 1 total
        let side = 2 * n + 1;
        let mut maze = Maze {
            data: vec![Tile::Wall; side * side].into_boxed_slice(),
            height: side,
            width: side,
        };
        (0..n).for_each(|row| {
            (0..n).for_each(|col| {
                maze[to_ascii((row, col))] = Tile::Open;
            });
        });
        maze.open_endpoints();
        Ok(maze)
    }

    /// Builds a grid from arbitrary rows. Every row must have the same, non-zero length.
    pub fn from_rows(rows: Vec<Vec<Tile>>) -> Result<Self> {
        let height = rows.len();
        let width = match rows.first() {
            Some(first) if !first.is_empty() => first.len(),
            _ => {
                return Err(MazeError::MalformedGrid {
                    reason: "grid has no cells".to_string(),
                });
            }
        };
        if let Some((row, bad)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(MazeError::MalformedGrid {
                reason: format!(
                    "row {} has {} cells, expected {}",
                    row,
                    bad.len(),
                    width
                ),
            });
        }
        Ok(Maze {
            data: rows.into_iter().flatten().collect(),
            height,
            width,
        })
    }

    /// Height of the ASCII grid.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Width of the ASCII grid.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Logical size `n`, if the grid has the square `(2n + 1)` shape.
    pub fn size(&self) -> Option<usize> {
        let square = self.height == self.width && self.height % 2 == 1 && self.height >= 3;
        square.then_some(self.height / 2)
    }

    /// The exit cell, `(height - 1, width - 2)`. `None` if the grid is too narrow to have one.
    pub fn exit(&self) -> Option<Coord> {
        (self.width >= 2).then(|| (self.height - 1, self.width - 2))
    }

    pub fn is_in_bounds(&self, coord: Coord) -> bool {
        coord.0 < self.height && coord.1 < self.width
    }

    fn ravel_index(&self, coord: Coord) -> usize {
        coord.0 * self.width + coord.1
    }

    /// Tile at `coord`, or `None` when out of range.
    pub fn get(&self, coord: Coord) -> Option<Tile> {
        self.is_in_bounds(coord)
            .then(|| self.data[self.ravel_index(coord)])
    }

    /// Whether `coord` is in range and not a wall.
    pub fn is_passable(&self, coord: Coord) -> bool {
        self.get(coord).is_some_and(Tile::is_passable)
    }

    /// Forces the entrance and the exit open.
    pub fn open_endpoints(&mut self) {
        if self.is_in_bounds(Self::ENTRANCE) {
            self[Self::ENTRANCE] = Tile::Open;
        }
        if let Some(exit) = self.exit() {
            self[exit] = Tile::Open;
        }
    }

    /// Number of tiles of the given kind.
    pub fn count(&self, tile: Tile) -> usize {
        self.data.iter().filter(|&&t| t == tile).count()
    }

    /// Iterates over the grid rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.data.chunks(self.width)
    }

    /// A copy with every solution and exploration mark turned back into an open passage.
    pub fn strip_marks(&self) -> Maze {
        let mut stripped = self.clone();
        stripped
            .data
            .iter_mut()
            .filter(|t| matches!(t, Tile::Path | Tile::Explored))
            .for_each(|t| *t = Tile::Open);
        stripped
    }

    /// Passable ASCII neighbours of `coord`, in the order down, up, right, left.
    pub fn passable_neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        let (row, col) = coord;
        [
            // NOTE: wrapping_sub turns an underflow into usize::MAX, which the bounds check
            // in is_passable rejects.
            (row.saturating_add(1), col),
            (row.wrapping_sub(1), col),
            (row, col.saturating_add(1)),
            (row, col.wrapping_sub(1)),
        ]
        .into_iter()
        .filter(move |&c| c != coord && self.is_passable(c))
    }
}

impl std::ops::Index<Coord> for Maze {
    type Output = Tile;

    fn index(&self, index: Coord) -> &Self::Output {
        assert!(self.is_in_bounds(index), "coordinate {:?} is out of bounds", index);
        &self.data[self.ravel_index(index)]
    }
}

impl std::ops::IndexMut<Coord> for Maze {
    fn index_mut(&mut self, index: Coord) -> &mut Self::Output {
        assert!(self.is_in_bounds(index), "coordinate {:?} is out of bounds", index);
        let idx = self.ravel_index(index);
        &mut self.data[idx]
    }
}

/// Maps a logical cell to its position on the ASCII grid.
pub fn to_ascii(cell: Coord) -> Coord {
    (2 * cell.0 + 1, 2 * cell.1 + 1)
}

/// Get neighbors of a logical cell in an `n x n` maze.
/// A neighbor is a cell one step away in the cardinal directions, in the order up, down, left,
/// right.
pub fn logical_neighbors(cell: Coord, n: usize) -> impl Iterator<Item = Coord> {
    let (row, col) = cell;
    let in_bounds = row < n && col < n;
    [
        (row.wrapping_sub(1), col),
        (row.saturating_add(1), col),
        (row, col.wrapping_sub(1)),
        (row, col.saturating_add(1)),
    ]
    .into_iter()
    .filter(move |&(r, c)| in_bounds && r < n && c < n && (r, c) != cell)
}

/// Opens the wall between two adjacent logical cells and returns its ASCII position.
///
/// # Panics
/// If the two cells are not logical neighbours or lie outside the maze.
pub fn carve_between(maze: &mut Maze, a: Coord, b: Coord) -> Coord {
    assert_eq!(
        a.0.abs_diff(b.0) + a.1.abs_diff(b.1),
        1,
        "cells {:?} and {:?} are not adjacent",
        a,
        b
    );
    let (ar, ac) = to_ascii(a);
    let (br, bc) = to_ascii(b);
    let wall = ((ar + br) / 2, (ac + bc) / 2);
    maze[wall] = Tile::Open;
    wall
}
