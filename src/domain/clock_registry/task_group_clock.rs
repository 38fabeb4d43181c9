use crate::domain::utils::id::TaskGroupId;
use crate::domain::utils::time_stamp::TimeStamp;

/// Per-instance clocks of one task group together with their minimum.
///
/// `min_clock` is recomputed on every write, so it always equals the minimum of `task_clocks`.
#[derive(Debug, Clone)]
pub struct TaskGroupClock {
    task_group: TaskGroupId,
    min_clock: TimeStamp,
    task_clocks: Vec<TimeStamp>,
}

impl TaskGroupClock {
    /// All `parallelism` instances start at `start_clock`.
    pub fn new(task_group: TaskGroupId, parallelism: usize, start_clock: TimeStamp) -> Self {
        Self { task_group, min_clock: start_clock, task_clocks: vec![start_clock; parallelism] }
    }

    pub fn task_group(&self) -> &TaskGroupId {
        &self.task_group
    }

    pub fn min_clock(&self) -> TimeStamp {
        self.min_clock
    }

    pub fn task_clocks(&self) -> &[TimeStamp] {
        &self.task_clocks
    }

    pub fn parallelism(&self) -> usize {
        self.task_clocks.len()
    }

    /// Caller must have checked `index < parallelism()`.
    pub(super) fn set_task_clock(&mut self, index: usize, clock: TimeStamp) {
        self.task_clocks[index] = clock;
        self.min_clock = self.task_clocks.iter().copied().min().unwrap_or(clock);
    }
}
