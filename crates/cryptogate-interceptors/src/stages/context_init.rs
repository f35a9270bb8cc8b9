use crate::context::{InterceptContext, ProtoRequest};
use crate::errors::InterceptError;
use crate::stages::{Stage, StageOutcome};
use async_trait::async_trait;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub struct ContextInitStage;

#[async_trait]
impl Stage for ContextInitStage {
    async fn before(
        &self,
        cx: &mut InterceptContext,
        req: &mut dyn ProtoRequest,
    ) -> Result<StageOutcome, InterceptError> {
        cx.request_id = req
            .header(REQUEST_ID_HEADER)
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        cx.route = Some(req.route().unwrap_or(req.path()).to_string());
        Ok(StageOutcome::Continue)
    }
}
