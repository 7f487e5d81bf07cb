// src/crypto/hmac.rs

//! HMAC-SHA256 signing of the canonical signing string.

use hmac::Mac;

use crate::aliases::{Digest32, HmacSha256};

/// Sign `message` with `key`, overwriting all 32 bytes of `out_digest`.
///
/// Deterministic and infallible: HMAC accepts keys of any length, so the only
/// inputs are two in-memory byte spans.
#[inline]
pub fn sign_hmac_sha256(key: &[u8], message: &[u8], out_digest: &mut Digest32) {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(key)
        .expect("HMAC accepts keys of any length");
    mac.update(message);
    out_digest
        .expose_secret_mut()
        .copy_from_slice(mac.finalize().into_bytes().as_slice());
}
