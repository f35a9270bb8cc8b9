use std::future::Future;
use std::sync::Arc;

use cryptogate_cipher::{CipherEngine, CryptoConfig};

use crate::context::{InterceptContext, ProtoRequest, ProtoResponse};
use crate::errors::InterceptError;
use crate::resolver::resolve_crypto_config;
use crate::routes::table::RouteCryptoTable;
use crate::stages::context_init::ContextInitStage;
use crate::stages::crypto_resolve::ResolveCryptoStage;
use crate::stages::decrypt_request::DecryptRequestStage;
use crate::stages::encrypt_response::EncryptResponseStage;
use crate::stages::InterceptorChain;

/// Route table, cipher engine and the standard stage order bundled together.
///
/// Resolution runs first so a request without crypto config costs one table
/// lookup and nothing else.
pub struct CryptoGate {
    chain: InterceptorChain,
    table: Arc<RouteCryptoTable>,
    log_payloads: bool,
}

impl CryptoGate {
    pub fn new(table: RouteCryptoTable, engine: Arc<dyn CipherEngine>) -> Self {
        let table = Arc::new(table);
        let chain = InterceptorChain::new(vec![
            Box::new(ResolveCryptoStage {
                table: table.clone(),
            }),
            Box::new(ContextInitStage),
            Box::new(DecryptRequestStage::new(engine.clone())),
            Box::new(EncryptResponseStage::new(engine)),
        ]);
        Self {
            chain,
            table,
            log_payloads: false,
        }
    }

    /// Emits plaintext bodies at debug level. Off unless asked for.
    pub fn with_payload_logging(mut self, enabled: bool) -> Self {
        self.log_payloads = enabled;
        self
    }

    pub fn table(&self) -> &RouteCryptoTable {
        &self.table
    }

    pub fn context(&self) -> InterceptContext {
        InterceptContext {
            log_payloads: self.log_payloads,
            ..InterceptContext::default()
        }
    }

    /// Config a request with this method, path and header state would get.
    pub fn resolve(&self, method: &str, path: &str, header_present: bool) -> Option<CryptoConfig> {
        resolve_crypto_config(self.table.lookup(method, None, path), header_present)
    }

    pub async fn run<Req, Res, F, Fut>(&self, req: Req, handler: F) -> Result<Res, InterceptError>
    where
        Req: ProtoRequest,
        Res: ProtoResponse,
        F: FnOnce(Req) -> Fut + Send,
        Fut: Future<Output = Result<Res, InterceptError>> + Send,
    {
        self.chain
            .run_with_handler(self.context(), req, handler)
            .await
    }
}
