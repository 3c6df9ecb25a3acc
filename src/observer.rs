use crate::maze::Maze;

/// Receives a snapshot of the grid after every mutating step of a generator or solver.
///
/// Observers run inline with the algorithm and only get a shared reference, so they cannot
/// change its outcome. Any closure taking `&Maze` is an observer.
pub trait Observer {
    fn observe(&mut self, grid: &Maze);
}

impl<F: FnMut(&Maze)> Observer for F {
    fn observe(&mut self, grid: &Maze) {
        self(grid)
    }
}

/// Observer that ignores every step.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl Observer for NoopObserver {
    fn observe(&mut self, _grid: &Maze) {}
}

/// Counts the steps it has been shown.
#[cfg(test)]
#[derive(Debug, Default, Clone, Copy)]
pub struct StepCounter {
    pub steps: usize,
}

#[cfg(test)]
impl Observer for StepCounter {
    fn observe(&mut self, _grid: &Maze) {
        self.steps += 1;
    }
}
