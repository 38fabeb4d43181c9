mod actor;
pub mod config;
pub mod error;
mod handler;
pub mod messages;

use std::collections::VecDeque;
use std::sync::Arc;

use actix::prelude::SpawnHandle;
use futures::channel::oneshot;

use crate::domain::clock_registry::ClockRegistry;
use crate::domain::clock_service::config::ClockServiceConfig;
use crate::domain::clock_service::error::ClockServiceError;
use crate::domain::clock_service::messages::{ClockUpdated, LatestMinClock, UpdateClock};
use crate::domain::dag::DagDescriptor;
use crate::domain::snapshot_store::SnapshotStore;
use crate::domain::utils::id::ServiceInstanceId;

/// A request that arrived before the start clock was recovered, with the channel its
/// answer has to go to once it is replayed.
enum PendingRequest {
    UpdateClock { request: UpdateClock, reply_to: oneshot::Sender<Result<ClockUpdated, ClockServiceError>> },
    GetLatestMinClock { reply_to: oneshot::Sender<Result<LatestMinClock, ClockServiceError>> },
}

enum ServiceState {
    /// Waiting for the startup read; requests are queued in arrival order.
    Uninitialized { pending: VecDeque<PendingRequest> },
    Running { registry: ClockRegistry },
    /// Recovery failed. The actor is stopping and answers everything with this error.
    Failed(ClockServiceError),
}

/// The **Clock Service** tracks the global minimum clock of a dataflow graph.
///
/// It is the sole owner of the [`ClockRegistry`]; every read and write goes through its
/// mailbox, so the registry is never touched concurrently.
///
/// Lifecycle:
/// 1. **Uninitialized**: on start the last snapshot is read from the [`SnapshotStore`].
///    `UpdateClock` and `GetLatestMinClock` are queued, not answered.
/// 2. **Running**: once the read completes, one record per task group is created at the
///    recovered clock (or `0` if nothing was stored), the reporter and snapshotter start,
///    and queued requests are replayed in arrival order before anything newer.
///
/// A failing or timed-out read is fatal: queued requests receive the error and the
/// actor stops.
pub struct ClockService {
    instance_id: ServiceInstanceId,
    dag: DagDescriptor,
    store: Arc<dyn SnapshotStore>,
    config: ClockServiceConfig,
    state: ServiceState,

    /// Reporter and snapshotter, cancelled when the actor stops.
    periodic_actions: Vec<SpawnHandle>,
}

impl ClockService {
    pub fn new(dag: DagDescriptor, store: Arc<dyn SnapshotStore>, config: ClockServiceConfig) -> Self {
        Self {
            instance_id: ServiceInstanceId::random(),
            dag,
            store,
            config,
            state: ServiceState::Uninitialized { pending: VecDeque::new() },
            periodic_actions: Vec::new(),
        }
    }

    pub fn instance_id(&self) -> &ServiceInstanceId {
        &self.instance_id
    }
}
