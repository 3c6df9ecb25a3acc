use std::{
    path::{Path, PathBuf},
    time::Duration,
};

/// Where the interactive app reads and writes its files, and how it animates.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Root of every output directory
    pub data_dir: PathBuf,
    /// Pause after each animation frame
    pub frame_delay: Duration,
    /// Side of one tile in exported images, in pixels
    pub cell_size: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            frame_delay: Duration::from_millis(25),
            cell_size: 10,
        }
    }
}

impl Settings {
    pub const DATA_DIR_VAR: &'static str = "MAZEGRID_DATA_DIR";
    pub const DELAY_VAR: &'static str = "MAZEGRID_DELAY_MS";

    /// Defaults, overridden by `MAZEGRID_DATA_DIR` and `MAZEGRID_DELAY_MS` when set.
    pub fn from_env() -> Self {
        let mut settings = Settings::default();
        if let Ok(dir) = std::env::var(Self::DATA_DIR_VAR) {
            settings.data_dir = PathBuf::from(dir);
        }
        match std::env::var(Self::DELAY_VAR).map(|v| v.parse::<u64>()) {
            Ok(Ok(ms)) => settings.frame_delay = Duration::from_millis(ms),
            Ok(Err(e)) => tracing::warn!("ignoring {}: {}", Self::DELAY_VAR, e),
            Err(_) => {}
        }
        settings
    }

    pub fn mazes_dir(&self) -> PathBuf {
        self.data_dir.join("outputs").join("mazes")
    }

    pub fn solutions_dir(&self) -> PathBuf {
        self.data_dir.join("outputs").join("solutions")
    }

    pub fn images_dir(&self) -> PathBuf {
        self.data_dir.join("outputs").join("images")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }

    /// Path of a maze file the user named. A bare file name is looked up in the mazes
    /// directory first, then in the solutions directory; anything else behaves like
    /// [`output_path`] with the mazes directory as default.
    pub fn resolve_maze_file(&self, name: &str) -> PathBuf {
        let in_mazes = output_path(name, &self.mazes_dir(), "maze_5", "txt");
        let bare = Path::new(name.trim())
            .parent()
            .is_some_and(|p| p.as_os_str().is_empty());
        if bare && !in_mazes.exists() {
            let in_solutions = output_path(name, &self.solutions_dir(), "maze_5", "txt");
            if in_solutions.exists() {
                return in_solutions;
            }
        }
        in_mazes
    }
}

/// Turns a user-entered file name into a path:
/// - empty: `default_dir/default_name`
/// - bare file name: placed in `default_dir`
/// - anything with a directory part: kept as given
///
/// The extension is then forced to `ext`.
pub fn output_path(name: &str, default_dir: &Path, default_name: &str, ext: &str) -> PathBuf {
    let name = name.trim();
    let path = if name.is_empty() {
        default_dir.join(default_name)
    } else {
        let given = Path::new(name);
        match given.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => given.to_path_buf(),
            _ => default_dir.join(given),
        }
    };
    let has_ext = path
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case(ext));
    if has_ext {
        path
    } else {
        path.with_extension(ext)
    }
}
