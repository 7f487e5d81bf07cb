//! # Constants
//!
//! Buffer capacities, the expiry field marker, and default lifetimes used
//! throughout the library.

/// Length of an HMAC-SHA256 digest in bytes.
pub const SIGNATURE_LEN: usize = 32;

/// Capacity of the scratch buffer the device key is decoded into.
///
/// Device keys are 32 random bytes (44 base64 characters). Keys that decode to
/// more than this are rejected rather than truncated.
pub const DECODED_KEY_CAPACITY: usize = 32;

/// Exact base64 length of a 32-byte signature, padding included.
pub const ENCODED_SIGNATURE_LEN: usize = 44;

/// Capacity of the scratch buffer the signature is encoded into.
pub const ENCODED_SIGNATURE_CAPACITY: usize = 64;

/// Field marker preceding the expiry timestamp inside an assembled token.
pub const EXPIRY_FIELD_MARKER: &[u8; 4] = b"&se=";

/// Separator terminating a token field.
pub const FIELD_SEPARATOR: u8 = b'&';

/// Default token lifetime used by [`refresh_if_expired`](crate::SasTokenIssuer::refresh_if_expired).
pub const DEFAULT_SAS_TOKEN_DURATION_MINUTES: u32 = 60;

pub const SECONDS_PER_MINUTE: u64 = 60;

/// A wall clock reporting a time before this has never been synchronized.
///
/// 2017-11-13T17:07:05Z, the reference date device firmware waits for after
/// starting SNTP.
pub const UNIX_TIME_NOV_13_2017: u64 = 1_510_592_825;
