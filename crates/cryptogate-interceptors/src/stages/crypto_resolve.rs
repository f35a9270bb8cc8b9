use std::sync::Arc;

use crate::context::{InterceptContext, ProtoRequest};
use crate::errors::InterceptError;
use crate::resolver::{resolve_crypto_config, CRYPTO_HEADER};
use crate::routes::table::RouteCryptoTable;
use crate::stages::{Stage, StageOutcome};
use async_trait::async_trait;
use tracing::debug;

pub struct ResolveCryptoStage {
    pub table: Arc<RouteCryptoTable>,
}

#[async_trait]
impl Stage for ResolveCryptoStage {
    async fn before(
        &self,
        cx: &mut InterceptContext,
        req: &mut dyn ProtoRequest,
    ) -> Result<StageOutcome, InterceptError> {
        let metadata = self.table.lookup(req.method(), req.route(), req.path());
        let header_present = req.has_header(CRYPTO_HEADER);

        let Some(config) = resolve_crypto_config(metadata, header_present) else {
            return Ok(StageOutcome::Bypass);
        };

        let source = if metadata.is_some() { "route" } else { "header" };
        debug!(
            method = %config.method(),
            direction = %config.direction,
            source,
            path = req.path(),
            "crypto config resolved"
        );
        cx.crypto = Some(config);
        Ok(StageOutcome::Continue)
    }
}
