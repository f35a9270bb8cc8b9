use std::future::Future;

use crate::context::{InterceptContext, ProtoRequest, ProtoResponse};
use crate::errors::InterceptError;
use async_trait::async_trait;

pub mod context_init;
pub mod crypto_resolve;
pub mod decrypt_request;
pub mod encrypt_response;

#[async_trait]
pub trait Stage: Send + Sync {
    /// Runs before the handler, in chain order.
    async fn before(
        &self,
        _cx: &mut InterceptContext,
        _req: &mut dyn ProtoRequest,
    ) -> Result<StageOutcome, InterceptError> {
        Ok(StageOutcome::Continue)
    }

    /// Runs after the handler, in reverse chain order.
    async fn after(
        &self,
        _cx: &mut InterceptContext,
        _rsp: &mut dyn ProtoResponse,
    ) -> Result<(), InterceptError> {
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StageOutcome {
    Continue,
    /// Stop intercepting: the handler runs on the untouched request and its
    /// response is returned as-is.
    Bypass,
}

pub struct InterceptorChain {
    stages: Vec<Box<dyn Stage>>,
}

impl InterceptorChain {
    pub fn new(stages: Vec<Box<dyn Stage>>) -> Self {
        Self { stages }
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub async fn run_with_handler<Req, Res, F, Fut>(
        &self,
        mut cx: InterceptContext,
        mut req: Req,
        handler: F,
    ) -> Result<Res, InterceptError>
    where
        Req: ProtoRequest,
        Res: ProtoResponse,
        F: FnOnce(Req) -> Fut + Send,
        Fut: Future<Output = Result<Res, InterceptError>> + Send,
    {
        let mut entered = 0;
        for stage in &self.stages {
            match stage.before(&mut cx, &mut req).await? {
                StageOutcome::Continue => entered += 1,
                StageOutcome::Bypass => return handler(req).await,
            }
        }

        let mut rsp = handler(req).await?;
        for stage in self.stages[..entered].iter().rev() {
            stage.after(&mut cx, &mut rsp).await?;
        }
        Ok(rsp)
    }
}
