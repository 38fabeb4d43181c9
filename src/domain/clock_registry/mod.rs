mod task_group_clock;

pub use task_group_clock::TaskGroupClock;

use std::collections::{BTreeSet, HashMap};

use thiserror::Error;

use crate::domain::dag::{DagDescriptor, TaskId};
use crate::domain::utils::id::TaskGroupId;
use crate::domain::utils::time_stamp::TimeStamp;

/// Log target for watermark progress events (reporter lines and registry diagnostics).
pub const PROGRESS_TARGET: &str = "watermark_coordinator::progress";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Task group {0} is not part of the DAG")]
    UnknownTaskGroup(TaskGroupId),

    #[error("Task {task_id} is out of range, task group has parallelism {parallelism}")]
    TaskIndexOutOfRange { task_id: TaskId, parallelism: usize },
}

/// Ordered set of [`TaskGroupClock`]s, one per task group of the DAG.
///
/// Records are kept in a map keyed by task group, while `ordered` indexes them by
/// `(min_clock, task_group)`. The first element of `ordered` is the global minimum.
/// Groups sharing a `min_clock` stay distinct entries because the id breaks the tie.
///
/// A record's `min_clock` is part of its index key, so every write must unlink the
/// record from `ordered` first and relink it with the new key afterwards. Writing
/// in place would leave a stale key behind and `global_min` would silently drift.
#[derive(Debug)]
pub struct ClockRegistry {
    start_clock: TimeStamp,
    groups: HashMap<TaskGroupId, TaskGroupClock>,
    ordered: BTreeSet<(TimeStamp, TaskGroupId)>,
}

impl ClockRegistry {
    /// Creates one record per task group of `dag`, every task clock set to `start_clock`.
    pub fn new(dag: &DagDescriptor, start_clock: TimeStamp) -> Self {
        let mut groups = HashMap::with_capacity(dag.len());
        let mut ordered = BTreeSet::new();

        for (id, descriptor) in dag.task_groups() {
            let clock = TaskGroupClock::new(id.clone(), descriptor.parallelism, start_clock);
            ordered.insert((clock.min_clock(), id.clone()));
            groups.insert(id.clone(), clock);
        }

        Self { start_clock, groups, ordered }
    }

    pub fn start_clock(&self) -> TimeStamp {
        self.start_clock
    }

    /// Sets the clock of one task instance and returns the resulting global minimum.
    ///
    /// Fails without touching the registry if the task group is unknown or the index
    /// exceeds the group's parallelism.
    pub fn update(&mut self, task_id: &TaskId, clock: TimeStamp) -> Result<TimeStamp, RegistryError> {
        let group = self
            .groups
            .get_mut(&task_id.task_group)
            .ok_or_else(|| RegistryError::UnknownTaskGroup(task_id.task_group.clone()))?;

        if task_id.index >= group.parallelism() {
            return Err(RegistryError::TaskIndexOutOfRange { task_id: task_id.clone(), parallelism: group.parallelism() });
        }

        let mut key = (group.min_clock(), task_id.task_group.clone());
        let unlinked = self.ordered.remove(&key);
        debug_assert!(unlinked, "registry index lost track of {}", task_id.task_group);

        group.set_task_clock(task_id.index, clock);

        key.0 = group.min_clock();
        self.ordered.insert(key);

        Ok(self.global_min())
    }

    /// Smallest `min_clock` over all task groups.
    ///
    /// An empty registry only happens for a DAG without task groups. It is tolerated:
    /// a warning is emitted and the start clock is returned.
    pub fn global_min(&self) -> TimeStamp {
        match self.ordered.first() {
            Some((min_clock, _)) => *min_clock,
            None => {
                tracing::warn!(
                    target: PROGRESS_TARGET,
                    StartClock = self.start_clock,
                    "Clock registry is empty, falling back to start clock"
                );
                self.start_clock
            }
        }
    }

    pub fn group(&self, task_group: &TaskGroupId) -> Option<&TaskGroupClock> {
        self.groups.get(task_group)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
