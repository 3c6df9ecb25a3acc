use std::{
    io::{Stdout, Write},
    time::Duration,
};

use crossterm::{
    cursor, queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};

use crate::{maze::Maze, observer::Observer};

/// Redraws the whole grid on every step, then sleeps for the frame delay.
pub struct ConsoleAnimator {
    stdout: Stdout,
    delay: Duration,
    title: String,
}

impl ConsoleAnimator {
    pub fn new(delay: Duration, title: impl Into<String>) -> Self {
        Self {
            stdout: std::io::stdout(),
            delay,
            title: title.into(),
        }
    }

    fn draw(&mut self, grid: &Maze) -> std::io::Result<()> {
        queue!(
            self.stdout,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0),
        )?;
        if !self.title.is_empty() {
            queue!(
                self.stdout,
                style::PrintStyledContent(
                    self.title
                        .as_str()
                        .with(Color::Yellow)
                        .attribute(Attribute::Bold)
                ),
                style::Print("\r\n"),
            )?;
        }
        for row in grid.rows() {
            for &tile in row {
                queue!(self.stdout, style::PrintStyledContent(tile.styled()))?;
            }
            queue!(self.stdout, style::Print("\r\n"))?;
        }
        self.stdout.flush()
    }
}

impl Observer for ConsoleAnimator {
    fn observe(&mut self, grid: &Maze) {
        // Drawing errors are logged, the run goes on
        if let Err(e) = self.draw(grid) {
            tracing::warn!("failed to draw animation frame: {}", e);
        }
        std::thread::sleep(self.delay);
    }
}
