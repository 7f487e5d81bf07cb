// src/lib.rs

//! Short-lived shared access tokens for devices authenticating to a cloud
//! message broker.
//!
//! A [`SasTokenIssuer`] signs a hub-provided canonical string with the
//! device's base64 key (HMAC-SHA256), hands the base64 signature back to the
//! hub client to assemble the token, and tracks when that token expires. All
//! working storage is caller-owned and fixed-size.
//!
//! ```
//! use iot_sas_token::{SasTokenError, SasTokenIssuer, SigningStringProvider, TokenAssembler};
//!
//! struct Hub;
//!
//! impl SigningStringProvider for Hub {
//!     fn signing_string(&self, expiry: u64, out: &mut [u8]) -> Result<usize, SasTokenError> {
//!         let s = format!("hub%2Fdevices%2Fdev\n{expiry}");
//!         out.get_mut(..s.len()).ok_or("signing buffer too small")?.copy_from_slice(s.as_bytes());
//!         Ok(s.len())
//!     }
//! }
//!
//! impl TokenAssembler for Hub {
//!     fn assemble_token(&self, expiry: u64, sig: &[u8], out: &mut [u8]) -> Result<usize, SasTokenError> {
//!         let s = format!("SharedAccessSignature sr=hub&sig={}&se={expiry}", String::from_utf8_lossy(sig));
//!         out.get_mut(..s.len()).ok_or("token buffer too small")?.copy_from_slice(s.as_bytes());
//!         Ok(s.len())
//!     }
//! }
//!
//! let mut signing = [0u8; 128];
//! let mut token = [0u8; 256];
//! let mut issuer = SasTokenIssuer::new(Hub, "YmFzZTY0a2V5", &mut signing, &mut token);
//! issuer.generate(60)?;
//! assert!(!issuer.is_expired());
//! assert!(issuer.get_str().unwrap().starts_with("SharedAccessSignature sr=hub&sig="));
//! # Ok::<(), SasTokenError>(())
//! ```

pub mod aliases;
pub mod builders;
pub mod clock;
pub mod codec;
pub mod consts;
pub mod crypto;
pub mod diagnostics;
pub mod error;
pub mod expiry;
pub mod issuer;
pub mod provider;

pub use builders::SasTokenIssuerBuilder;
pub use clock::{Clock, SystemClock};
pub use diagnostics::{DiagnosticSink, LogLevel, TracingSink};
pub use error::SasTokenError;
pub use issuer::SasTokenIssuer;
pub use provider::{SigningStringProvider, TokenAssembler};

pub use codec::{decode_base64, encode_base64};
pub use crypto::sign_hmac_sha256;
pub use expiry::extract_expiry;
