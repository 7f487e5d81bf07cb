//! # Secure-Gate Type Aliases
//!
//! Fixed-capacity working buffers for token issuance, built on
//! [`secure-gate`](https://github.com/Slurp9187/secure-gate) so that key
//! material is zeroized on drop and never exposed by accident.
//!
//! ## Type Categories
//!
//! ### HMAC Primitives
//! - [`HmacSha256`] - HMAC-SHA256 used to sign the canonical signing string
//!
//! ### Generic Secure Buffers
//! - [`SpanBuffer<N>`] - Generic secure stack buffer for any size `N`
//!
//! ### Semantic Fixed-Size Types
//! - [`DecodedKey32`] - 32-byte device key decoded from base64
//! - [`Digest32`] - 32-byte HMAC-SHA256 output
//! - [`EncodedSignature64`] - base64 text of a digest (44 bytes used)
//!
//! All types require explicit `.expose_secret()` or `.expose_secret_mut()` to
//! access the underlying bytes. Capacities are part of the type, so a buffer of
//! the wrong size is a compile error rather than a silent truncation.

use hmac::Hmac;
use sha2::Sha256;

use crate::consts::{DECODED_KEY_CAPACITY, ENCODED_SIGNATURE_CAPACITY, SIGNATURE_LEN};

pub type HmacSha256 = Hmac<Sha256>;

// ─────────────────────────────────────────────────────────────────────────────
// SpanBuffer: generic secure stack buffer (direct alias to secure-gate's Fixed)
// ─────────────────────────────────────────────────────────────────────────────
pub type SpanBuffer<const N: usize> = secure_gate::Fixed<[u8; N]>;

pub type DecodedKey32 = SpanBuffer<DECODED_KEY_CAPACITY>;
pub type Digest32 = SpanBuffer<SIGNATURE_LEN>;
pub type EncodedSignature64 = SpanBuffer<ENCODED_SIGNATURE_CAPACITY>;

/// Fresh zeroed span buffer.
#[inline(always)]
pub fn zeroed<const N: usize>() -> SpanBuffer<N> {
    SpanBuffer::new([0u8; N])
}
