use std::pin::Pin;
use std::task::{Context, Poll};
use tower::Service;

use crate::strategy::Strategy;
use crate::types::plan::SchedulePlan;
use crate::types::request::PlanRequest;

/// Tail of the tower stack: one validated request in, one finished plan
/// out. Holds nothing but its strategy, so every call is an independent
/// run.
pub struct PlannerService<ST> {
    strategy: ST,
}

impl<ST> PlannerService<ST> {
    pub fn new(strategy: ST) -> Self {
        PlannerService { strategy }
    }
}

impl<ST> Service<PlanRequest> for PlannerService<ST>
where
    ST: Clone + Strategy<PlanRequest, SchedulePlan> + Send + Sync + 'static,
{
    type Response = SchedulePlan;
    type Error = anyhow::Error;
    type Future = Pin<Box<dyn Future<Output = Result<SchedulePlan, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: PlanRequest) -> Self::Future {
        let strategy = self.strategy.clone();
        Box::pin(async move { strategy.plan(request).await })
    }
}
