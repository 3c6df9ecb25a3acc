use std::path::{Path, PathBuf};

use image::{ImageBuffer, ImageError, Rgb, RgbImage};

use crate::maze::{Maze, Tile};

fn tile_color(tile: Tile) -> Rgb<u8> {
    match tile {
        Tile::Wall => Rgb([0, 0, 0]),
        Tile::Open => Rgb([255, 255, 255]),
        Tile::Path => Rgb([220, 20, 60]),
        Tile::Explored => Rgb([200, 200, 200]),
    }
}

/// Rasterises the grid, drawing every tile as a `cell_size` square.
pub fn render_image(maze: &Maze, cell_size: u32) -> RgbImage {
    let cell_size = cell_size.max(1);
    let width = maze.width() as u32 * cell_size;
    let height = maze.height() as u32 * cell_size;
    ImageBuffer::from_fn(width, height, |x, y| {
        let coord = ((y / cell_size) as usize, (x / cell_size) as usize);
        tile_color(maze[coord])
    })
}

/// Writes the grid as a PNG and returns the path written. A missing extension becomes `.png`
/// and missing parent directories are created.
pub fn export_png(maze: &Maze, path: &Path, cell_size: u32) -> Result<PathBuf, ImageError> {
    let path = if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension("png")
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(ImageError::IoError)?;
    }
    render_image(maze, cell_size).save(&path)?;
    tracing::debug!(path = %path.display(), cell_size, "exported image");
    Ok(path)
}
