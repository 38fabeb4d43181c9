use serde::{Deserialize, Serialize};

/// Topology handed over by the DAG builder: one entry per task group.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DagDto {
    pub task_groups: Vec<TaskGroupDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskGroupDto {
    pub id: String,
    pub parallelism: usize,
}
