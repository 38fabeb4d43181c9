use std::collections::BTreeMap;
use std::fmt;

use crate::api::dag_dto::DagDto;
use crate::domain::utils::id::TaskGroupId;
use crate::error::{Error, Result};

/// What the coordinator needs to know about one stage of the dataflow graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskGroupDescriptor {
    pub parallelism: usize,
}

/// One parallel instance of a task group.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskId {
    pub task_group: TaskGroupId,
    pub index: usize,
}

impl TaskId {
    pub fn new(task_group: impl Into<TaskGroupId>, index: usize) -> Self {
        TaskId { task_group: task_group.into(), index }
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.task_group, self.index)
    }
}

/// Fixed topology of the dataflow graph, read once when the coordinator starts.
#[derive(Debug, Clone, Default)]
pub struct DagDescriptor {
    task_groups: BTreeMap<TaskGroupId, TaskGroupDescriptor>,
}

impl DagDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style registration, mostly for tests and embedders without a DTO.
    pub fn with_task_group(mut self, id: impl Into<TaskGroupId>, parallelism: usize) -> Result<Self> {
        self.add_task_group(id.into(), parallelism)?;
        Ok(self)
    }

    fn add_task_group(&mut self, id: TaskGroupId, parallelism: usize) -> Result<()> {
        if parallelism == 0 {
            return Err(Error::DagConstructionError(format!("Task group {} has parallelism 0", id)));
        }
        if self.task_groups.contains_key(&id) {
            return Err(Error::DagConstructionError(format!("Task group {} is declared twice", id)));
        }
        self.task_groups.insert(id, TaskGroupDescriptor { parallelism });
        Ok(())
    }

    pub fn task_groups(&self) -> impl Iterator<Item = (&TaskGroupId, &TaskGroupDescriptor)> {
        self.task_groups.iter()
    }

    pub fn get(&self, id: &TaskGroupId) -> Option<&TaskGroupDescriptor> {
        self.task_groups.get(id)
    }

    pub fn len(&self) -> usize {
        self.task_groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.task_groups.is_empty()
    }

    /// Total number of task instances across all groups.
    pub fn task_count(&self) -> usize {
        self.task_groups.values().map(|d| d.parallelism).sum()
    }
}

impl TryFrom<DagDto> for DagDescriptor {
    type Error = Error;

    fn try_from(dto: DagDto) -> Result<Self> {
        let mut dag = DagDescriptor::new();
        for group in dto.task_groups {
            dag.add_task_group(TaskGroupId::new(group.id), group.parallelism)?;
        }

        if dag.is_empty() {
            log::warn!("DAG descriptor contains no task groups; the global clock will stay at its start value.");
        }

        Ok(dag)
    }
}
