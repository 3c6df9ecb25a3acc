//! Plain-text encoding of a grid: one line per row, one character per tile.

use std::{fmt, fs, path::Path, str::FromStr};

use super::{Maze, Tile};
use crate::error::{MazeError, Result};

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for tile in row {
                write!(f, "{}", tile)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl FromStr for Maze {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self> {
        let rows = s
            .lines()
            .enumerate()
            .map(|(row, line)| {
                line.trim_end_matches('\r')
                    .chars()
                    .enumerate()
                    .map(|(col, ch)| {
                        Tile::try_from(ch).map_err(|_| MazeError::UnknownTile { ch, row, col })
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;
        Maze::from_rows(rows)
    }
}

impl Maze {
    /// Writes the grid as text, creating missing parent directories.
    pub fn save_txt(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_string())?;
        tracing::debug!(path = %path.display(), height = self.height, width = self.width, "saved grid");
        Ok(())
    }

    pub fn load_txt(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let maze = fs::read_to_string(path)?.parse::<Maze>()?;
        tracing::debug!(path = %path.display(), height = maze.height, width = maze.width, "loaded grid");
        Ok(maze)
    }
}
