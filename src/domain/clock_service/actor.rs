use std::collections::VecDeque;
use std::sync::Arc;

use actix::prelude::{Actor, ActorContext, ActorFutureExt, AsyncContext, Context, WrapFuture};

use crate::domain::clock_registry::{ClockRegistry, PROGRESS_TARGET};
use crate::domain::clock_service::error::ClockServiceError;
use crate::domain::clock_service::messages::{ClockUpdated, LatestMinClock, UpdateClock};
use crate::domain::clock_service::{ClockService, PendingRequest, ServiceState};
use crate::domain::snapshot_store::StoreError;
use crate::domain::utils::id::ServiceInstanceId;
use crate::domain::utils::time_stamp::{TimeStamp, format_time_stamp};

impl Actor for ClockService {
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        log::info!(
            "[{}] Clock service started for {} task groups ({} tasks). Recovering start clock '{}'.",
            self.instance_id,
            self.dag.len(),
            self.dag.task_count(),
            self.config.start_clock_key
        );
        self.recover(ctx);
    }

    fn stopped(&mut self, ctx: &mut Self::Context) {
        for handle in self.periodic_actions.drain(..) {
            ctx.cancel_future(handle);
        }
        log::info!("[{}] Clock service stopped.", self.instance_id);
    }
}

impl ClockService {
    /// Issues the startup read and applies its result in the actor context.
    ///
    /// The optional recovery timeout wraps the read itself, so a read that is ready
    /// when the deadline passes still wins.
    fn recover(&mut self, ctx: &mut Context<Self>) {
        let store = Arc::clone(&self.store);
        let key = self.config.start_clock_key.clone();
        let recovery_timeout = self.config.recovery_timeout;

        let read = async move {
            let failed = |e: StoreError| ClockServiceError::RecoveryFailed(e.to_string());
            match recovery_timeout {
                Some(timeout) => tokio::time::timeout(timeout, store.get(&key))
                    .await
                    .map_err(|_| ClockServiceError::RecoveryTimedOut(timeout))
                    .and_then(|read| read.map_err(failed)),
                None => store.get(&key).await.map_err(failed),
            }
        };

        ctx.spawn(read.into_actor(self).map(|result, act, ctx| match result {
            Ok(Some(value)) => act.initialize(value, ctx),
            Ok(None) => {
                log::info!("[{}] No snapshot found for '{}', starting from 0.", act.instance_id, act.config.start_clock_key);
                act.initialize(0, ctx);
            }
            Err(e) => act.fail_recovery(e, ctx),
        }));
    }

    /// Uninitialized -> Running.
    fn initialize(&mut self, start_clock: TimeStamp, ctx: &mut Context<Self>) {
        let pending = match &mut self.state {
            ServiceState::Uninitialized { pending } => std::mem::take(pending),
            _ => {
                log::warn!("[{}] Ignoring start clock {}, recovery already ended.", self.instance_id, start_clock);
                return;
            }
        };

        self.state = ServiceState::Running { registry: ClockRegistry::new(&self.dag, start_clock) };
        log::info!(
            "[{}] Recovered start clock {} ({}). Replaying {} queued requests.",
            self.instance_id,
            start_clock,
            format_time_stamp(start_clock),
            pending.len()
        );

        self.start_periodic_actions(ctx);
        self.replay(pending);
    }

    fn replay(&mut self, pending: VecDeque<PendingRequest>) {
        let ServiceState::Running { registry } = &mut self.state else {
            return;
        };

        // A dropped receiver only means the caller stopped waiting; the update itself still counts.
        for request in pending {
            match request {
                PendingRequest::UpdateClock { request, reply_to } => {
                    let _ = reply_to.send(apply_update(&self.instance_id, registry, &request));
                }
                PendingRequest::GetLatestMinClock { reply_to } => {
                    let _ = reply_to.send(Ok(LatestMinClock { min_clock: registry.global_min() }));
                }
            }
        }
    }

    /// Fatal: answers every queued request with `error` and stops the actor.
    fn fail_recovery(&mut self, error: ClockServiceError, ctx: &mut Context<Self>) {
        let pending = match std::mem::replace(&mut self.state, ServiceState::Failed(error.clone())) {
            ServiceState::Uninitialized { pending } => pending,
            other => {
                self.state = other;
                return;
            }
        };

        log::error!("[{}] {}. Failing {} queued requests and stopping.", self.instance_id, error, pending.len());
        for request in pending {
            match request {
                PendingRequest::UpdateClock { reply_to, .. } => {
                    let _ = reply_to.send(Err(error.clone()));
                }
                PendingRequest::GetLatestMinClock { reply_to } => {
                    let _ = reply_to.send(Err(error.clone()));
                }
            }
        }
        ctx.stop();
    }

    fn start_periodic_actions(&mut self, ctx: &mut Context<Self>) {
        let reporter = ctx.run_interval(self.config.report_interval, |act, _ctx| act.report_progress());
        let snapshotter = ctx.run_interval(self.config.snapshot_interval, |act, ctx| act.snapshot(ctx));
        self.periodic_actions.extend([reporter, snapshotter]);
    }

    fn report_progress(&self) {
        if let ServiceState::Running { registry } = &self.state {
            let min_clock = registry.global_min();
            tracing::info!(
                target: PROGRESS_TARGET,
                Instance = %self.instance_id,
                GlobalMinClock = min_clock,
                "Global min clock is {}",
                format_time_stamp(min_clock)
            );
        }
    }

    /// Fire-and-forget write of the current global minimum.
    fn snapshot(&mut self, ctx: &mut Context<Self>) {
        let ServiceState::Running { registry } = &self.state else {
            return;
        };
        let min_clock = registry.global_min();
        let store = Arc::clone(&self.store);
        let key = self.config.start_clock_key.clone();

        ctx.spawn(async move { store.put(&key, min_clock).await }.into_actor(self).map(move |result, act, _ctx| {
            match result {
                Ok(()) => log::debug!("[{}] Snapshot of min clock {} written.", act.instance_id, min_clock),
                Err(e) => log::warn!("[{}] Snapshot of min clock {} failed, retrying next interval: {}", act.instance_id, min_clock, e),
            }
        }));
    }
}

pub(super) fn apply_update(
    instance_id: &ServiceInstanceId,
    registry: &mut ClockRegistry,
    request: &UpdateClock,
) -> Result<ClockUpdated, ClockServiceError> {
    match registry.update(&request.task_id, request.clock) {
        Ok(min_clock) => Ok(ClockUpdated { min_clock }),
        Err(e) => {
            log::error!("[{}] Rejected clock update {} -> {}: {}", instance_id, request.task_id, request.clock, e);
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::time::Duration;

    use actix::prelude::Actor;
    use actix_rt::time::sleep;
    use tracing_test::traced_test;

    use super::*;
    use crate::domain::clock_service::config::ClockServiceConfig;
    use crate::domain::clock_service::messages::{GetLatestMinClock, Shutdown};
    use crate::domain::dag::DagDescriptor;
    use crate::domain::snapshot_store::{InMemorySnapshotStore, START_CLOCK_KEY};

    const REPORT_LINE: &str = "Global min clock is 1970-01-01T00:00:00.150Z";

    #[actix_rt::test]
    #[traced_test]
    async fn test_reporter_logs_readable_min_clock_until_shutdown() {
        let store = InMemorySnapshotStore::with_value(START_CLOCK_KEY, 150);
        let config = ClockServiceConfig {
            report_interval: Duration::from_millis(20),
            snapshot_interval: Duration::from_millis(20),
            ..ClockServiceConfig::default()
        };
        let dag = DagDescriptor::new().with_task_group("G0", 2).unwrap();
        let addr = ClockService::new(dag, Arc::new(store), config).start();

        assert_eq!(addr.send(GetLatestMinClock).await.unwrap(), Ok(LatestMinClock { min_clock: 150 }));
        sleep(Duration::from_millis(100)).await;
        assert!(logs_contain(REPORT_LINE));

        let report_lines = || {
            let count = Cell::new(0);
            logs_assert(|lines| {
                count.set(lines.iter().filter(|line| line.contains(REPORT_LINE)).count());
                Ok(())
            });
            count.get()
        };
        assert!(report_lines() >= 2);

        addr.send(Shutdown).await.unwrap();
        sleep(Duration::from_millis(20)).await;
        let after_shutdown = report_lines();
        sleep(Duration::from_millis(100)).await;
        assert_eq!(report_lines(), after_shutdown);
    }
}
