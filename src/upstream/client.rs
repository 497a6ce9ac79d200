//! HTTP client for the upstream tile renderer.
//!
//! # Responsibilities
//! - Join the configured base URL with a routed upstream path
//! - Forward end-to-end request headers, letting the client set `Host`
//! - Enforce connect and request timeouts
//! - Read the whole tile body inside the request deadline
//! - Map every transport failure to `UpstreamUnavailable`
//!
//! # Design Decisions
//! - Tiles are small, so bodies are buffered: a stalled or truncated body
//!   becomes a 502 instead of a relayed response that breaks mid-stream

use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderMap, Method, Request, Response, StatusCode, Uri};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::config::UpstreamConfig;
use crate::error::{GatewayError, GatewayResult};
use crate::security::strip_hop_by_hop;

/// Upper bound on a buffered upstream body.
pub const MAX_TILE_BYTES: usize = 16 * 1024 * 1024;

/// Single-attempt client for the upstream renderer.
#[derive(Clone)]
pub struct UpstreamClient {
    client: Client<HttpConnector, Body>,
    base_url: String,
    timeout: Duration,
}

impl UpstreamClient {
    pub fn new(config: &UpstreamConfig) -> Self {
        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(Duration::from_secs(config.connect_timeout_secs)));

        let client = Client::builder(TokioExecutor::new()).build(connector);

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URI for an upstream path such as `/data/v3/5/10/10.pbf`.
    pub fn target(&self, upstream_path: &str) -> GatewayResult<Uri> {
        format!("{}{}", self.base_url, upstream_path)
            .parse::<Uri>()
            .map_err(|e| GatewayError::UpstreamUnavailable {
                reason: format!("invalid upstream URI: {}", e),
            })
    }

    /// Forward one request and read the full response.
    ///
    /// Any HTTP status from upstream is `Ok`. Connect errors, framing errors
    /// and a deadline that passes before the body ends are `UpstreamUnavailable`.
    pub async fn fetch(
        &self,
        method: Method,
        upstream_path: &str,
        inbound: &HeaderMap,
    ) -> GatewayResult<Response<Bytes>> {
        let mut headers = inbound.clone();
        strip_hop_by_hop(&mut headers);
        headers.remove(header::HOST);
        headers.remove(header::CONTENT_LENGTH);

        let mut request = Request::new(Body::empty());
        *request.method_mut() = method;
        *request.uri_mut() = self.target(upstream_path)?;
        *request.headers_mut() = headers;

        self.send(request, self.timeout).await
    }

    /// GET `path` with a custom deadline and report the status.
    pub async fn probe(&self, path: &str, timeout: Duration) -> GatewayResult<StatusCode> {
        let mut request = Request::new(Body::empty());
        *request.uri_mut() = self.target(path)?;
        request.headers_mut().insert(
            header::USER_AGENT,
            header::HeaderValue::from_static("tile-gateway-health-check"),
        );

        let response = self.send(request, timeout).await?;
        Ok(response.status())
    }

    async fn send(&self, request: Request<Body>, timeout: Duration) -> GatewayResult<Response<Bytes>> {
        let exchange = async {
            let response = self.client.request(request).await.map_err(|e| unavailable(describe(&e)))?;
            let (parts, body) = response.into_parts();
            let bytes = axum::body::to_bytes(Body::new(body), MAX_TILE_BYTES)
                .await
                .map_err(|e| unavailable(format!("reading body: {}", describe(&e))))?;
            Ok::<_, GatewayError>(Response::from_parts(parts, bytes))
        };

        match tokio::time::timeout(timeout, exchange).await {
            Ok(result) => result,
            Err(_) => Err(unavailable(format!("timed out after {}s", timeout.as_secs()))),
        }
    }
}

fn unavailable(reason: String) -> GatewayError {
    GatewayError::UpstreamUnavailable { reason }
}

/// hyper-util's top-level message is terse ("client error (Connect)"); include the cause chain.
fn describe(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
