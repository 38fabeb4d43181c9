use actix::prelude::Message;

use crate::domain::clock_service::error::ClockServiceError;
use crate::domain::dag::TaskId;
use crate::domain::utils::time_stamp::TimeStamp;

/// A task instance reports how far it has progressed.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
#[rtype(result = "Result<ClockUpdated, ClockServiceError>")]
pub struct UpdateClock {
    pub task_id: TaskId,
    pub clock: TimeStamp,
}

impl UpdateClock {
    pub fn new(task_id: TaskId, clock: TimeStamp) -> Self {
        Self { task_id, clock }
    }
}

/// Reply to [`UpdateClock`]: the global minimum after the update was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockUpdated {
    pub min_clock: TimeStamp,
}

#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
#[rtype(result = "Result<LatestMinClock, ClockServiceError>")]
pub struct GetLatestMinClock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatestMinClock {
    pub min_clock: TimeStamp,
}

/// Stops the service and cancels its periodic actions.
#[derive(Message, Debug, Clone, Copy)]
#[rtype(result = "()")]
pub struct Shutdown;
