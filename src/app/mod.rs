mod animator;
pub mod export;
mod settings;

pub use animator::ConsoleAnimator;
pub use settings::{Settings, output_path};

use std::{
    io::{BufRead, Write},
    path::PathBuf,
    time::{Duration, Instant},
};

use crossterm::style::{Color, Stylize};
use thiserror::Error;

use crate::{
    error::MazeError,
    generators::{Generator, generate_maze_with},
    maze::{Maze, Tile},
    observer::NoopObserver,
    solvers::{Solver, solve_maze, solve_maze_with},
};

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Maze(#[from] MazeError),

    #[error("image export failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// What the user picked in the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    Generate,
    Solve,
    Compare,
    Export,
    Show,
    Quit,
}

impl MenuAction {
    fn parse(choice: &str) -> Option<Self> {
        match choice.trim() {
            "1" => Some(MenuAction::Generate),
            "2" => Some(MenuAction::Solve),
            "3" => Some(MenuAction::Compare),
            "4" => Some(MenuAction::Export),
            "5" => Some(MenuAction::Show),
            "q" | "Q" | "0" => Some(MenuAction::Quit),
            _ => None,
        }
    }
}

/// Line-based interactive menu over the generators and solvers.
pub struct App<R, W> {
    settings: Settings,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> App<R, W> {
    /// Default logical size when the user just presses Enter
    const DEFAULT_SIZE: usize = 5;

    pub fn new(settings: Settings, input: R, output: W) -> Self {
        Self {
            settings,
            input,
            output,
        }
    }

    /// Main menu loop. Failures of a single action are reported and the menu continues;
    /// only a broken stdin/stdout ends the loop with an error.
    pub fn run(&mut self) -> std::io::Result<()> {
        tracing::info!(data_dir = %self.settings.data_dir.display(), "started main menu");
        loop {
            writeln!(self.output, "\n{}", "=== Maze menu ===".with(Color::Yellow).bold())?;
            writeln!(self.output, "1) Generate a maze")?;
            writeln!(self.output, "2) Solve a maze file")?;
            writeln!(self.output, "3) Compare solvers on a maze file")?;
            writeln!(self.output, "4) Export a maze file as PNG")?;
            writeln!(self.output, "5) Show a maze file")?;
            writeln!(self.output, "q) Quit")?;

            let Some(choice) = self.prompt("Your choice? ")? else {
                // End of input
                break;
            };
            let result = match MenuAction::parse(&choice) {
                Some(MenuAction::Generate) => self.handle_generate(),
                Some(MenuAction::Solve) => self.handle_solve(),
                Some(MenuAction::Compare) => self.handle_compare(),
                Some(MenuAction::Export) => self.handle_export(),
                Some(MenuAction::Show) => self.handle_show(),
                Some(MenuAction::Quit) => break,
                None => Err(AppError::InvalidInput(format!("unknown choice {:?}", choice))),
            };
            match result {
                Ok(()) => {}
                Err(AppError::Io(e)) => return Err(e),
                Err(e) => {
                    tracing::warn!("menu action failed: {}", e);
                    writeln!(self.output, "{}", format!("Error: {}", e).with(Color::Red))?;
                }
            }
        }
        tracing::info!("exiting main menu");
        Ok(())
    }

    /// Prints `message` and reads one trimmed line. `None` at end of input.
    fn prompt(&mut self, message: &str) -> std::io::Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Like `prompt`, but end of input is an error since an action is half-way done.
    fn ask(&mut self, message: &str) -> Result<String, AppError> {
        self.prompt(message)?
            .ok_or_else(|| AppError::InvalidInput("unexpected end of input".to_string()))
    }

    /// Empty input picks `default`.
    fn ask_yes_no(&mut self, message: &str, default: bool) -> Result<bool, AppError> {
        let answer = self.ask(message)?;
        if answer.is_empty() {
            return Ok(default);
        }
        Ok(matches!(answer.as_str(), "y" | "Y" | "yes"))
    }

    fn ask_maze_path(&mut self) -> Result<PathBuf, AppError> {
        let raw = self.ask(&format!(
            "Maze file, from mazes/ or solutions/? (Enter = {}) ",
            self.settings.mazes_dir().join("maze_5.txt").display()
        ))?;
        Ok(self.settings.resolve_maze_file(&raw))
    }

    fn ask_frame_delay(&mut self) -> Result<Duration, AppError> {
        let default_ms = self.settings.frame_delay.as_millis() as u64;
        let raw = self.ask(&format!("Frame delay in ms? (Enter = {}) ", default_ms))?;
        Ok(Duration::from_millis(parse_or(&raw, default_ms)?))
    }

    fn ask_solver(&mut self) -> Result<Solver, AppError> {
        writeln!(self.output, "Solving algorithm:")?;
        for (i, solver) in Solver::ALL.iter().enumerate() {
            writeln!(self.output, "  {}) {}", i + 1, solver)?;
        }
        let choice = self.ask("Your choice? (Enter = 1) ")?;
        pick(&Solver::ALL, &choice)
    }

    fn handle_generate(&mut self) -> Result<(), AppError> {
        let raw = self.ask(&format!("Maze size n (n >= 1)? (Enter = {}) ", Self::DEFAULT_SIZE))?;
        let n = parse_or(&raw, Self::DEFAULT_SIZE)?;

        writeln!(self.output, "Generation algorithm:")?;
        for (i, generator) in Generator::ALL.iter().enumerate() {
            writeln!(self.output, "  {}) {}", i + 1, generator)?;
        }
        let choice = self.ask("Your choice? (Enter = 1) ")?;
        let generator = pick(&Generator::ALL, &choice)?;

        let raw = self.ask("Seed? (Enter = random) ")?;
        let seed = if raw.is_empty() {
            None
        } else {
            Some(parse_or(&raw, 0u64)?)
        };

        let delay = if self.ask_yes_no("Animate? [y/N] ", false)? {
            Some(self.ask_frame_delay()?)
        } else {
            None
        };
        let default_name = format!("maze_{}", n);
        let raw = self.ask(&format!(
            "Output file? (Enter = {}) ",
            self.settings.mazes_dir().join(&default_name).with_extension("txt").display()
        ))?;
        let path = output_path(&raw, &self.settings.mazes_dir(), &default_name, "txt");

        let started = Instant::now();
        let maze = match delay {
            Some(delay) => {
                let title = format!("Generating: {}", generator);
                generate_maze_with(n, generator, seed, &mut ConsoleAnimator::new(delay, title))?
            }
            None => generate_maze_with(n, generator, seed, &mut NoopObserver)?,
        };
        tracing::info!(n, %generator, ?seed, elapsed = ?started.elapsed(), "generated maze");

        maze.save_txt(&path)?;
        write!(self.output, "{}", maze)?;
        writeln!(
            self.output,
            "{}",
            format!("Maze {}x{} saved to {}", n, n, path.display()).with(Color::Green)
        )?;
        Ok(())
    }

    fn handle_solve(&mut self) -> Result<(), AppError> {
        let path = self.ask_maze_path()?;
        let mut maze = Maze::load_txt(&path)?;
        let clear_prompt = "The file is already solved. Clear its o/* marks first? [Y/n] ";
        if has_marks(&maze) && self.ask_yes_no(clear_prompt, true)? {
            maze = maze.strip_marks();
        }
        let solver = self.ask_solver()?;

        let solution = if self.ask_yes_no("Animate? [y/N] ", false)? {
            let delay = self.ask_frame_delay()?;
            let mut on_visit = ConsoleAnimator::new(delay, format!("Exploring: {}", solver));
            let mut on_path = ConsoleAnimator::new(delay, format!("Route: {}", solver));
            solve_maze_with(&maze, solver, &mut on_visit, &mut on_path)
        } else {
            solve_maze(&maze, solver)
        };

        write!(self.output, "{}", solution.maze)?;
        match solution.path_len {
            Some(len) => writeln!(
                self.output,
                "{}",
                format!("Path found: {} cells, {} expanded", len, solution.expanded)
                    .with(Color::Green)
            )?,
            None => writeln!(self.output, "{}", "No path found.".with(Color::Red))?,
        }

        let default_name = format!(
            "{}_{}",
            path.file_stem().and_then(|s| s.to_str()).unwrap_or("maze"),
            solver_tag(solver)
        );
        let raw = self.ask(&format!(
            "Save solution as? (Enter = {}) ",
            self.settings.solutions_dir().join(&default_name).with_extension("txt").display()
        ))?;
        let out = output_path(&raw, &self.settings.solutions_dir(), &default_name, "txt");
        solution.maze.save_txt(&out)?;
        writeln!(self.output, "Solution saved to {}", out.display())?;
        Ok(())
    }

    fn handle_compare(&mut self) -> Result<(), AppError> {
        let path = self.ask_maze_path()?;
        let maze = Maze::load_txt(&path)?.strip_marks();
        writeln!(
            self.output,
            "{:<34} {:>10} {:>10} {:>12}",
            "solver", "path", "expanded", "time"
        )?;
        for solver in Solver::ALL {
            let started = Instant::now();
            let solution = solve_maze(&maze, solver);
            let elapsed = started.elapsed();
            let path_len = solution
                .path_len
                .map_or_else(|| "-".to_string(), |len| len.to_string());
            writeln!(
                self.output,
                "{:<34} {:>10} {:>10} {:>12}",
                solver.to_string(),
                path_len,
                solution.expanded,
                format!("{:?}", elapsed)
            )?;
        }
        Ok(())
    }

    fn handle_export(&mut self) -> Result<(), AppError> {
        let path = self.ask_maze_path()?;
        let maze = Maze::load_txt(&path)?;
        let default_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("maze")
            .to_string();
        let raw = self.ask(&format!(
            "Image file? (Enter = {}) ",
            self.settings.images_dir().join(&default_name).with_extension("png").display()
        ))?;
        let out = output_path(&raw, &self.settings.images_dir(), &default_name, "png");
        let raw = self.ask(&format!(
            "Cell size in pixels? (Enter = {}) ",
            self.settings.cell_size
        ))?;
        let cell_size = parse_or(&raw, self.settings.cell_size)?;
        if cell_size == 0 {
            return Err(AppError::InvalidInput("cell size must be at least 1".to_string()));
        }
        let written = export::export_png(&maze, &out, cell_size)?;
        writeln!(self.output, "Image saved to {}", written.display())?;
        Ok(())
    }

    fn handle_show(&mut self) -> Result<(), AppError> {
        let path = self.ask_maze_path()?;
        let maze = Maze::load_txt(&path)?;
        print_styled(&mut self.output, &maze)?;
        Ok(())
    }
}

/// Writes the grid with one colour per tile.
pub fn print_styled(out: &mut impl Write, maze: &Maze) -> std::io::Result<()> {
    for row in maze.rows() {
        for &tile in row {
            write!(out, "{}", tile.styled())?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn has_marks(maze: &Maze) -> bool {
    maze.count(Tile::Path) + maze.count(Tile::Explored) > 0
}

fn solver_tag(solver: Solver) -> &'static str {
    match solver {
        Solver::Backtrack => "backtrack",
        Solver::AStar => "astar",
    }
}

/// Parses a number, falling back to `default` on empty input.
fn parse_or<T: std::str::FromStr>(raw: &str, default: T) -> Result<T, AppError> {
    if raw.is_empty() {
        return Ok(default);
    }
    raw.parse::<T>()
        .map_err(|_| AppError::InvalidInput(format!("{:?} is not a valid number", raw)))
}

/// Picks a 1-based menu entry, the first one on empty input.
fn pick<T: Copy>(options: &[T], choice: &str) -> Result<T, AppError> {
    let index = parse_or(choice, 1usize)?;
    index
        .checked_sub(1)
        .and_then(|i| options.get(i))
        .copied()
        .ok_or_else(|| AppError::InvalidInput(format!("no option {}", index)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::generate_maze;
    use std::io::Cursor;

    fn temp_settings(tag: &str) -> Settings {
        Settings {
            data_dir: std::env::temp_dir()
                .join(format!("mazegrid-app-{}-{}", tag, std::process::id())),
            ..Settings::default()
        }
    }

    fn run_app(settings: &Settings, input: &str) -> String {
        let mut output = Vec::new();
        App::new(settings.clone(), Cursor::new(input.as_bytes()), &mut output)
            .run()
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_generate_then_solve() {
        let settings = temp_settings("solve");
        // size 4, Kruskal, seed 7, no animation, default file name
        run_app(&settings, "1\n4\n2\n7\nn\n\nq\n");
        let maze_path = settings.mazes_dir().join("maze_4.txt");
        let saved = Maze::load_txt(&maze_path).unwrap();
        assert_eq!(saved, generate_maze(4, Generator::Kruskal, Some(7)).unwrap());

        // A*, no animation, default solution name
        let input = format!("2\n{}\n2\nn\n\nq\n", maze_path.display());
        let output = run_app(&settings, &input);
        assert!(output.contains("Path found"));
        let solved = Maze::load_txt(settings.solutions_dir().join("maze_4_astar.txt")).unwrap();
        assert_eq!(solved.strip_marks(), saved);
        assert_eq!(solved[Maze::ENTRANCE], Tile::Path);

        // Solving the solution file again starts from the stripped maze
        let input = format!(
            "3\n{}\nq\n",
            settings.solutions_dir().join("maze_4_astar.txt").display()
        );
        let output = run_app(&settings, &input);
        assert!(output.contains("A* Search"));
        assert!(output.contains("Backtracking Depth-First Search"));

        std::fs::remove_dir_all(&settings.data_dir).ok();
    }

    #[test]
    fn test_bad_choices_keep_menu_running() {
        let settings = temp_settings("bad");
        // Unknown entry, then a generation of size 0, then a solve of a missing file
        let input = "9\n1\n0\n\n\nn\n\n2\nnowhere/missing\nq\n";
        let output = run_app(&settings, input);
        assert!(output.contains("unknown choice"));
        assert!(output.contains("invalid maze size 0"));
        assert!(output.contains("io error"));
        assert!(!settings.mazes_dir().join("maze_0.txt").exists());
    }

    #[test]
    fn test_animated_generate_asks_frame_delay() {
        let settings = temp_settings("delay");
        // Size 1 carves nothing, so the animator never draws
        let output = run_app(&settings, "1\n1\n1\n3\ny\n0\n\nq\n");
        assert!(output.contains("Frame delay in ms? (Enter = 25)"));
        assert!(settings.mazes_dir().join("maze_1.txt").exists());
        std::fs::remove_dir_all(&settings.data_dir).ok();
    }

    #[test]
    fn test_solve_solution_file_by_name() {
        let settings = temp_settings("resolve");
        let maze = generate_maze(3, Generator::Dfs, Some(11)).unwrap();
        let solved = solve_maze(&maze, Solver::Backtrack).maze;
        solved.save_txt(settings.solutions_dir().join("old.txt")).unwrap();

        // Bare name found under solutions/, marks cleared by default, A*, saved as "fresh"
        let output = run_app(&settings, "2\nold\n\n2\nn\nfresh\nq\n");
        assert!(output.contains("already solved"));
        let fresh = Maze::load_txt(settings.solutions_dir().join("fresh.txt")).unwrap();
        assert_eq!(fresh, solve_maze(&maze, Solver::AStar).maze);

        // Keeping the marks still solves, since marked tiles are passable
        let output = run_app(&settings, "2\nold\nn\n2\nn\nkept\nq\n");
        assert!(output.contains("Path found"));
        let kept = Maze::load_txt(settings.solutions_dir().join("kept.txt")).unwrap();
        assert_eq!(kept.strip_marks(), maze);

        std::fs::remove_dir_all(&settings.data_dir).ok();
    }

    #[test]
    fn test_export_asks_cell_size() {
        let settings = temp_settings("export");
        let maze = generate_maze(2, Generator::Kruskal, Some(5)).unwrap();
        maze.save_txt(settings.mazes_dir().join("maze_2.txt")).unwrap();

        // Default image name, 3 pixels per tile
        run_app(&settings, "4\nmaze_2\n\n3\nq\n");
        let image = settings.images_dir().join("maze_2.png");
        assert_eq!(image::image_dimensions(&image).unwrap(), (15, 15));

        let output = run_app(&settings, "4\nmaze_2\nzero\n0\nq\n");
        assert!(output.contains("cell size must be at least 1"));
        assert!(!settings.images_dir().join("zero.png").exists());

        std::fs::remove_dir_all(&settings.data_dir).ok();
    }

    #[test]
    fn test_end_of_input_exits() {
        let settings = temp_settings("eof");
        let output = run_app(&settings, "");
        assert!(output.contains("Maze menu"));
    }

    #[test]
    fn test_pick() {
        assert_eq!(pick(&Solver::ALL, "").unwrap(), Solver::Backtrack);
        assert_eq!(pick(&Solver::ALL, "2").unwrap(), Solver::AStar);
        assert!(pick(&Solver::ALL, "0").is_err());
        assert!(pick(&Solver::ALL, "3").is_err());
        assert!(pick(&Solver::ALL, "x").is_err());
    }
}
