// src/crypto/mod.rs

//! Low-level crypto primitives.
//!
//! HMAC types are defined in `aliases.rs`.

pub mod hmac;

pub use self::hmac::sign_hmac_sha256;
