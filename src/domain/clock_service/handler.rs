use actix::prelude::{ActorContext, Context, Handler, ResponseFuture};
use futures::channel::oneshot;
use futures::future;

use crate::domain::clock_service::actor::apply_update;
use crate::domain::clock_service::error::ClockServiceError;
use crate::domain::clock_service::messages::{
    ClockUpdated, GetLatestMinClock, LatestMinClock, Shutdown, UpdateClock,
};
use crate::domain::clock_service::{ClockService, PendingRequest, ServiceState};

impl Handler<UpdateClock> for ClockService {
    type Result = ResponseFuture<Result<ClockUpdated, ClockServiceError>>;

    fn handle(&mut self, msg: UpdateClock, _ctx: &mut Self::Context) -> Self::Result {
        match &mut self.state {
            ServiceState::Uninitialized { pending } => {
                let (reply_to, reply) = oneshot::channel();
                pending.push_back(PendingRequest::UpdateClock { request: msg, reply_to });
                Box::pin(async move { reply.await.unwrap_or(Err(ClockServiceError::ServiceStopped)) })
            }
            ServiceState::Running { registry } => Box::pin(future::ready(apply_update(&self.instance_id, registry, &msg))),
            ServiceState::Failed(error) => Box::pin(future::ready(Err(error.clone()))),
        }
    }
}

impl Handler<GetLatestMinClock> for ClockService {
    type Result = ResponseFuture<Result<LatestMinClock, ClockServiceError>>;

    fn handle(&mut self, _msg: GetLatestMinClock, _ctx: &mut Self::Context) -> Self::Result {
        match &mut self.state {
            ServiceState::Uninitialized { pending } => {
                let (reply_to, reply) = oneshot::channel();
                pending.push_back(PendingRequest::GetLatestMinClock { reply_to });
                Box::pin(async move { reply.await.unwrap_or(Err(ClockServiceError::ServiceStopped)) })
            }
            ServiceState::Running { registry } => {
                Box::pin(future::ready(Ok(LatestMinClock { min_clock: registry.global_min() })))
            }
            ServiceState::Failed(error) => Box::pin(future::ready(Err(error.clone()))),
        }
    }
}

impl Handler<Shutdown> for ClockService {
    type Result = ();

    fn handle(&mut self, _msg: Shutdown, ctx: &mut Context<Self>) {
        log::info!("[{}] Shutdown requested.", self.instance_id);
        ctx.stop();
    }
}
