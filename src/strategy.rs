use async_trait::async_trait;

/// A scheduling policy: turns one validated request into a finished plan.
#[async_trait]
pub trait Strategy<Req, Resp> {
    async fn plan(&self, request: Req) -> anyhow::Result<Resp>;
}
