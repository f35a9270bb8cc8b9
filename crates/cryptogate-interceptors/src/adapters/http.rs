use std::future::Future;
use std::sync::Arc;

use crate::context::{Payload, ProtoRequest, ProtoResponse};
use crate::errors::{to_http_response, InterceptError};
use crate::gate::CryptoGate;
use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::extract::{MatchedPath, State};
use axum::http::header::{HeaderValue, CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{HeaderMap, Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use cryptogate_errors::prelude::ErrorObj;
use tracing::debug;

/// Error produced by the chain, attached to the error response so outer
/// layers can log or report it.
#[derive(Clone, Debug)]
pub struct RecordedError(pub Arc<ErrorObj>);

pub struct AxumReq {
    req: Request<Body>,
    cached: Option<Payload>,
}

impl AxumReq {
    pub fn new(req: Request<Body>) -> Self {
        Self { req, cached: None }
    }

    pub fn into_inner(self) -> Request<Body> {
        self.req
    }
}

pub struct AxumRes {
    rsp: Response,
    cached: Option<Payload>,
}

impl AxumRes {
    pub fn new(rsp: Response) -> Self {
        Self { rsp, cached: None }
    }

    pub fn into_inner(self) -> Response {
        self.rsp
    }
}

async fn take_payload(body: &mut Body) -> Result<Payload, InterceptError> {
    let bytes = to_bytes(std::mem::take(body), usize::MAX)
        .await
        .map_err(|e| InterceptError::internal(&format!("read body: {e}")))?;
    let payload = Payload::from_bytes(&bytes);
    *body = Body::from(bytes);
    payload
}

fn write_payload(headers: &mut HeaderMap, body: &mut Body, payload: Payload) {
    headers.remove(CONTENT_LENGTH);
    match payload.content_type() {
        Some(ct) => {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(ct));
        }
        None => {
            headers.remove(CONTENT_TYPE);
        }
    }
    *body = Body::from(payload.into_bytes());
}

#[async_trait]
impl ProtoRequest for AxumReq {
    fn method(&self) -> &str {
        self.req.method().as_str()
    }

    fn path(&self) -> &str {
        self.req.uri().path()
    }

    fn route(&self) -> Option<&str> {
        self.req
            .extensions()
            .get::<MatchedPath>()
            .map(|matched| matched.as_str())
    }

    fn header(&self, name: &str) -> Option<String> {
        self.req
            .headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string())
    }

    fn has_header(&self, name: &str) -> bool {
        self.req.headers().contains_key(name)
    }

    async fn read_payload(&mut self) -> Result<Payload, InterceptError> {
        if let Some(payload) = self.cached.clone() {
            return Ok(payload);
        }
        let payload = take_payload(self.req.body_mut()).await?;
        self.cached = Some(payload.clone());
        Ok(payload)
    }

    fn replace_payload(&mut self, payload: Payload) {
        self.cached = Some(payload.clone());
        let mut body = std::mem::take(self.req.body_mut());
        write_payload(self.req.headers_mut(), &mut body, payload);
        *self.req.body_mut() = body;
    }
}

#[async_trait]
impl ProtoResponse for AxumRes {
    fn status(&self) -> u16 {
        self.rsp.status().as_u16()
    }

    async fn read_payload(&mut self) -> Result<Payload, InterceptError> {
        if let Some(payload) = self.cached.clone() {
            return Ok(payload);
        }
        let payload = take_payload(self.rsp.body_mut()).await?;
        self.cached = Some(payload.clone());
        Ok(payload)
    }

    fn replace_payload(&mut self, payload: Payload) {
        self.cached = Some(payload.clone());
        let mut body = std::mem::take(self.rsp.body_mut());
        write_payload(self.rsp.headers_mut(), &mut body, payload);
        *self.rsp.body_mut() = body;
    }
}

pub fn error_response(err: InterceptError) -> Response {
    debug!(audit = ?err.inner().to_audit(), "rendering crypto error response");
    let (status, json) = to_http_response(&err);
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut response = (status, Json(json)).into_response();
    response
        .extensions_mut()
        .insert(RecordedError(Arc::new(err.into_inner())));
    response
}

/// Runs `handler` behind the crypto chain and renders chain failures.
pub async fn handle_with_chain<F, Fut>(req: Request<Body>, gate: &CryptoGate, handler: F) -> Response
where
    F: FnOnce(Request<Body>) -> Fut + Send,
    Fut: Future<Output = Response> + Send,
{
    let outcome = gate
        .run(AxumReq::new(req), |req: AxumReq| async move {
            Ok::<_, InterceptError>(AxumRes::new(handler(req.into_inner()).await))
        })
        .await;
    match outcome {
        Ok(rsp) => rsp.into_inner(),
        Err(err) => error_response(err),
    }
}

/// `axum::middleware::from_fn_with_state` entry point.
pub async fn crypto_middleware(
    State(gate): State<Arc<CryptoGate>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    handle_with_chain(req, &gate, |req| next.run(req)).await
}
