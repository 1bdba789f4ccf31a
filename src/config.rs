//! Gate configuration.
//!
//! The shared secret and body limit are supplied once at construction and
//! never mutated; the gate borrows them read-only for the process lifetime.
//! How the secret itself is provisioned (env, vault, config file) stays the
//! host application's concern.

use std::fmt;

use anyhow::{Context, Result};
use serde::Deserialize;

const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Configuration for the webhook verification gate.
///
/// Host applications can build one directly, load it from the environment,
/// or embed it in their own configuration file:
///
/// ```
/// use shopify_webhook_gate::GateConfig;
///
/// let config = GateConfig::new("shpss_example").with_max_body_bytes(1024 * 1024);
/// assert_eq!(config.max_body_bytes, 1024 * 1024);
/// ```
#[derive(Clone, Deserialize)]
pub struct GateConfig {
    /// Shared secret for the webhook trust relationship.
    pub secret: String,

    /// Maximum body size buffered for verification, in bytes.
    ///
    /// Requests declaring a larger body are rejected with `413` before any
    /// buffering happens.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl GateConfig {
    /// Creates a configuration with the default 10 MiB body limit.
    pub fn new(secret: impl Into<String>) -> Self {
        Self { secret: secret.into(), max_body_bytes: DEFAULT_MAX_BODY_BYTES }
    }

    /// Overrides the body buffering limit.
    #[must_use]
    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    /// Loads configuration from environment variables.
    ///
    /// Reads `WEBHOOK_SECRET` (required) and `WEBHOOK_MAX_BODY_BYTES`
    /// (optional, defaults to 10 MiB).
    ///
    /// # Errors
    ///
    /// Fails if `WEBHOOK_SECRET` is unset.
    pub fn from_env() -> Result<Self> {
        let secret = std::env::var("WEBHOOK_SECRET")
            .context("WEBHOOK_SECRET environment variable not set")?;

        let max_body_bytes = std::env::var("WEBHOOK_MAX_BODY_BYTES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_MAX_BODY_BYTES);

        Ok(Self { secret, max_body_bytes })
    }
}

// Keep the secret out of log output.
impl fmt::Debug for GateConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GateConfig")
            .field("secret", &"***")
            .field("max_body_bytes", &self.max_body_bytes)
            .finish()
    }
}

fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_body_limit_is_ten_mib() {
        let config = GateConfig::new("secret");
        assert_eq!(config.max_body_bytes, 10 * 1024 * 1024);
    }

    #[test]
    fn builder_overrides_body_limit() {
        let config = GateConfig::new("secret").with_max_body_bytes(1024);
        assert_eq!(config.max_body_bytes, 1024);
    }

    #[test]
    fn debug_masks_the_secret() {
        let config = GateConfig::new("shpss_very_secret");
        let rendered = format!("{config:?}");

        assert!(!rendered.contains("shpss_very_secret"));
        assert!(rendered.contains("***"));
    }

    #[test]
    fn deserializes_with_defaulted_limit() {
        let config: GateConfig = serde_json::from_str(r#"{"secret":"abc123"}"#).unwrap();

        assert_eq!(config.secret, "abc123");
        assert_eq!(config.max_body_bytes, 10 * 1024 * 1024);
    }
}
