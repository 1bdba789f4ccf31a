#![no_main]

//! Fuzz target for webhook signature verification.
//!
//! Feeds arbitrary byte splits through the verifier to ensure it never
//! panics on hostile secrets, claimed signatures, or payloads, and that the
//! generate/verify pair stays consistent for whatever the fuzzer invents.

use libfuzzer_sys::fuzz_target;
use shopify_webhook_gate::crypto::{generate_hmac_hex, verify_webhook};

fuzz_target!(|data: &[u8]| {
    // Split the input into secret / claimed signature / body.
    let (secret, rest) = data.split_at(data.len() / 3);
    let (claimed, body) = rest.split_at(rest.len() / 2);
    let claimed = String::from_utf8_lossy(claimed);

    // Must never panic, whatever the claim looks like.
    let _ = verify_webhook(secret, "fuzz.myshopify.com", &claimed, body);
    let _ = verify_webhook(secret, "", &claimed, body);
    let _ = verify_webhook(b"", "fuzz.myshopify.com", &claimed, body);

    // A digest the verifier itself generated must round-trip.
    if let Ok(digest) = generate_hmac_hex(secret, body) {
        assert!(verify_webhook(secret, "fuzz.myshopify.com", &digest, body));
        assert!(!verify_webhook(secret, "", &digest, body));
    }
});
