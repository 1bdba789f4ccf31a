//! Error types for the verification gate.
//!
//! Every failure the gate can produce resolves locally into an HTTP
//! response; nothing propagates to the wrapped service or its caller.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Reasons the gate refuses to forward a request.
#[derive(Debug, Error)]
pub enum GateError {
    /// The HMAC digest did not match, or the shop domain header was missing.
    #[error("invalid webhook signature")]
    InvalidSignature,

    /// The request body exceeds the configured buffering limit.
    #[error("webhook payload too large: {size_bytes} bytes")]
    PayloadTooLarge {
        /// Size the request declared for its body.
        size_bytes: usize,
    },

    /// The body stream failed before it was fully read.
    #[error("failed to read webhook body: {0}")]
    BodyRead(String),
}

impl IntoResponse for GateError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::InvalidSignature => (StatusCode::BAD_REQUEST, "Invalid webhook signature\n"),
            Self::PayloadTooLarge { .. } => {
                (StatusCode::PAYLOAD_TOO_LARGE, "Webhook payload too large\n")
            },
            Self::BodyRead(_) => (StatusCode::BAD_REQUEST, "Failed to read webhook body\n"),
        };

        (status, message).into_response()
    }
}
