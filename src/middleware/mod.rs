//! HTTP middleware for webhook request verification.
//!
//! Provides the tower layer that authenticates inbound webhook deliveries
//! before they reach application handlers.

pub mod verify;

pub use verify::{VerifyWebhook, VerifyWebhookLayer, HMAC_HEADER, SHOP_DOMAIN_HEADER};
