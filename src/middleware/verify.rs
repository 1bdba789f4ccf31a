//! Webhook signature verification middleware.
//!
//! [`VerifyWebhookLayer`] wraps any tower service with a gate that:
//! 1. Extracts the shop domain and claimed HMAC from the request headers
//! 2. Buffers the request body, bounded by the configured size limit
//! 3. Recomputes the HMAC-SHA256 digest and compares it in constant time
//! 4. Rejects the request with HTTP 400, or forwards it downstream with the
//!    body intact
//!
//! The bytes handed to the wrapped service are the same bytes the digest was
//! computed over, so downstream extractors observe the body exactly as it
//! arrived on the wire.

use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use axum::{
    body::{Body, HttpBody},
    http::{HeaderMap, Request},
    response::{IntoResponse, Response},
};
use tower::{Layer, Service};
use tracing::{debug, warn};

use crate::{config::GateConfig, crypto, error::GateError};

/// Header carrying the hex-encoded HMAC-SHA256 digest of the request body.
pub const HMAC_HEADER: &str = "x-shopify-hmac-sha256";

/// Header carrying the domain of the shop that claims to have sent the call.
pub const SHOP_DOMAIN_HEADER: &str = "x-shopify-shop-domain";

/// Layer that wraps services with webhook signature verification.
///
/// Constructed once with the shared secret; the same layer value can wrap
/// any number of routes or services.
#[derive(Debug, Clone)]
pub struct VerifyWebhookLayer {
    config: Arc<GateConfig>,
}

impl VerifyWebhookLayer {
    /// Creates a layer verifying signatures against the given configuration.
    pub fn new(config: GateConfig) -> Self {
        Self { config: Arc::new(config) }
    }
}

impl<S> Layer<S> for VerifyWebhookLayer {
    type Service = VerifyWebhook<S>;

    fn layer(&self, inner: S) -> Self::Service {
        VerifyWebhook { config: Arc::clone(&self.config), inner }
    }
}

/// Service produced by [`VerifyWebhookLayer`].
///
/// Satisfies the same service interface it wraps, so gated services chain
/// and compose like any other tower middleware.
#[derive(Debug, Clone)]
pub struct VerifyWebhook<S> {
    config: Arc<GateConfig>,
    inner: S,
}

impl<S> Service<Request<Body>> for VerifyWebhook<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Response, S::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        // The future must own the service instance that reported readiness.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        let config = Arc::clone(&self.config);

        Box::pin(async move {
            let (parts, body) = req.into_parts();

            let shop_domain = header_str(&parts.headers, SHOP_DOMAIN_HEADER).to_owned();
            let claimed_hmac = header_str(&parts.headers, HMAC_HEADER).to_owned();

            // Refuse declared-oversize bodies before buffering anything.
            if let Some(declared) = body.size_hint().upper() {
                let size_bytes = usize::try_from(declared).unwrap_or(usize::MAX);
                if size_bytes > config.max_body_bytes {
                    warn!(
                        shop_domain = %shop_domain,
                        declared_bytes = size_bytes,
                        limit_bytes = config.max_body_bytes,
                        "webhook body exceeds size limit"
                    );
                    return Ok(GateError::PayloadTooLarge { size_bytes }.into_response());
                }
            }

            let body_bytes = match axum::body::to_bytes(body, config.max_body_bytes).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn!(shop_domain = %shop_domain, error = %e, "failed to read webhook body");
                    return Ok(GateError::BodyRead(e.to_string()).into_response());
                },
            };

            if !crypto::verify_webhook(
                config.secret.as_bytes(),
                &shop_domain,
                &claimed_hmac,
                &body_bytes,
            ) {
                warn!(
                    shop_domain = %shop_domain,
                    body_bytes = body_bytes.len(),
                    "webhook signature verification failed"
                );
                return Ok(GateError::InvalidSignature.into_response());
            }

            debug!(
                shop_domain = %shop_domain,
                body_bytes = body_bytes.len(),
                "webhook signature verified"
            );

            // Hand downstream the exact bytes the digest was computed over.
            let req = Request::from_parts(parts, Body::from(body_bytes));
            inner.call(req).await
        })
    }
}

/// Reads a header value as a string, treating absent or non-UTF-8 values as
/// empty. Matches the sender-facing contract: a missing claim is an empty
/// claim, which the verifier rejects.
fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers.get(name).and_then(|v| v.to_str().ok()).unwrap_or("")
}
