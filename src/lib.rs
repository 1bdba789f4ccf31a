//! Request-authentication gate for inbound Shopify webhooks.
//!
//! Verifies that a webhook delivery was produced by a sender holding the
//! app's shared secret, using the HMAC-SHA256 digest Shopify sends in the
//! `X-Shopify-Hmac-Sha256` header. Requests that fail verification are
//! answered with `400 Bad Request` and never reach the wrapped handler;
//! requests that pass are forwarded with the body byte-for-byte intact.
//!
//! The gate is a tower layer, so it wraps any axum route or service and
//! composes with the rest of the middleware stack:
//!
//! ```no_run
//! use axum::{routing::post, Router};
//! use shopify_webhook_gate::{GateConfig, VerifyWebhookLayer};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = GateConfig::from_env().expect("webhook secret");
//!
//!     let app: Router = Router::new()
//!         .route("/webhooks/orders", post(|| async { "ok" }))
//!         .layer(VerifyWebhookLayer::new(config));
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
//!     axum::serve(listener, app).await.unwrap();
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod crypto;
pub mod error;
pub mod middleware;

pub use config::GateConfig;
pub use error::GateError;
pub use middleware::{VerifyWebhookLayer, HMAC_HEADER, SHOP_DOMAIN_HEADER};
