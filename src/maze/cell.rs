use crossterm::style::{Color, StyledContent, Stylize};

use std::fmt;

use crate::error::MazeError;

/// A single character of the ASCII grid.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tile {
    /// `#`
    #[default]
    Wall,
    /// `.`, a carved passage or a logical cell.
    Open,
    /// `o`, a cell on the solution route.
    Path,
    /// `*`, a cell explored by a solver but not kept on the route.
    Explored,
}

impl Tile {
    pub const WALL_CHAR: char = '#';
    pub const OPEN_CHAR: char = '.';
    pub const PATH_CHAR: char = 'o';
    pub const EXPLORED_CHAR: char = '*';

    pub fn as_char(self) -> char {
        match self {
            Tile::Wall => Self::WALL_CHAR,
            Tile::Open => Self::OPEN_CHAR,
            Tile::Path => Self::PATH_CHAR,
            Tile::Explored => Self::EXPLORED_CHAR,
        }
    }

    /// Every tile except a wall can be walked on.
    pub fn is_passable(self) -> bool {
        !matches!(self, Tile::Wall)
    }

    /// The tile's character, coloured for terminal output.
    pub fn styled(self) -> StyledContent<char> {
        let ch = self.as_char();
        match self {
            Tile::Wall => ch.with(Color::DarkGrey),
            Tile::Open => ch.with(Color::Reset),
            Tile::Path => ch.with(Color::Yellow).bold(),
            Tile::Explored => ch.with(Color::Blue),
        }
    }
}

impl TryFrom<char> for Tile {
    type Error = MazeError;

    /// Only the tile alphabet is accepted. The position is unknown here, so it is reported as
    /// `(0, 0)`; the grid parser fills in the real one.
    fn try_from(ch: char) -> Result<Self, Self::Error> {
        match ch {
            Self::WALL_CHAR => Ok(Tile::Wall),
            Self::OPEN_CHAR => Ok(Tile::Open),
            Self::PATH_CHAR => Ok(Tile::Path),
            Self::EXPLORED_CHAR => Ok(Tile::Explored),
            _ => Err(MazeError::UnknownTile { ch, row: 0, col: 0 }),
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_mapping() {
        for tile in [Tile::Wall, Tile::Open, Tile::Path, Tile::Explored] {
            assert_eq!(Tile::try_from(tile.as_char()).unwrap(), tile);
        }
        assert!(matches!(
            Tile::try_from('x'),
            Err(MazeError::UnknownTile { ch: 'x', .. })
        ));
    }

    #[test]
    fn test_passable() {
        assert!(!Tile::Wall.is_passable());
        assert!(Tile::Open.is_passable());
        assert!(Tile::Path.is_passable());
        assert!(Tile::Explored.is_passable());
    }
}
