//! # Token Issuer
//!
//! Produces time-bound shared access tokens over caller-owned buffers and
//! answers expiry queries about the last one produced.
//!
//! One issuance runs these steps, aborting on the first failure:
//!
//! 1. expiry = now + `minutes * 60`
//! 2. the client writes the canonical signing string into the signing buffer
//! 3. the base64 device key is decoded into a 32-byte key buffer
//! 4. the signing string is signed with HMAC-SHA256
//! 5. the 32-byte digest is base64-encoded (44 characters)
//! 6. the client assembles the token into the token buffer
//! 7. the expiry is read back out of the token's `&se=` field
//!
//! A failed issuance leaves no token: [`SasTokenIssuer::get`] returns an empty
//! slice and [`SasTokenIssuer::is_expired`] returns `true`.
//!
//! # Thread Safety
//!
//! Not reentrant. Buffers are overwritten in place on every call, so an issuer
//! must have a single owner (or sit behind a mutex).

use std::fmt;

use crate::aliases::{zeroed, EncodedSignature64};
use crate::clock::{self, expiration_from_minutes, Clock, SystemClock};
use crate::codec::{decode_base64, encode_base64};
use crate::consts::{
    DECODED_KEY_CAPACITY, DEFAULT_SAS_TOKEN_DURATION_MINUTES, ENCODED_SIGNATURE_CAPACITY,
    SIGNATURE_LEN,
};
use crate::crypto::sign_hmac_sha256;
use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::error::SasTokenError;
use crate::expiry::extract_expiry;
use crate::provider::{SigningStringProvider, TokenAssembler};

/// Issues shared access tokens for one device.
///
/// `H` is the hub client that builds signing strings and assembles tokens.
/// The device key and both buffers are borrowed for the issuer's lifetime;
/// the current token is a view into the token buffer.
pub struct SasTokenIssuer<'a, H, C = SystemClock, S = TracingSink> {
    client: H,
    device_key: &'a [u8],
    signing_buffer: &'a mut [u8],
    token_buffer: &'a mut [u8],
    token_len: usize,
    expiration_unix_time: u32,
    duration_minutes: u32,
    clock: C,
    sink: S,
}

impl<H, C, S> fmt::Debug for SasTokenIssuer<'_, H, C, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SasTokenIssuer")
            .field("device_key", &"<redacted>")
            .field("signing_capacity", &self.signing_buffer.len())
            .field("token_capacity", &self.token_buffer.len())
            .field("token_len", &self.token_len)
            .field("expiration_unix_time", &self.expiration_unix_time)
            .field("duration_minutes", &self.duration_minutes)
            .finish_non_exhaustive()
    }
}

impl<'a, H> SasTokenIssuer<'a, H>
where
    H: SigningStringProvider + TokenAssembler,
{
    /// Issuer on the system clock, logging through `tracing` at the default
    /// threshold. Inputs are not validated; use
    /// [`SasTokenIssuerBuilder`](crate::SasTokenIssuerBuilder) for that.
    pub fn new<K>(
        client: H,
        device_key: &'a K,
        signing_buffer: &'a mut [u8],
        token_buffer: &'a mut [u8],
    ) -> Self
    where
        K: AsRef<[u8]> + ?Sized,
    {
        Self::from_parts(
            client,
            device_key.as_ref(),
            signing_buffer,
            token_buffer,
            DEFAULT_SAS_TOKEN_DURATION_MINUTES,
            SystemClock,
            TracingSink::default(),
        )
    }
}

impl<'a, H, C, S> SasTokenIssuer<'a, H, C, S>
where
    H: SigningStringProvider + TokenAssembler,
    C: Clock,
    S: DiagnosticSink,
{
    pub(crate) fn from_parts(
        client: H,
        device_key: &'a [u8],
        signing_buffer: &'a mut [u8],
        token_buffer: &'a mut [u8],
        duration_minutes: u32,
        clock: C,
        sink: S,
    ) -> Self {
        Self {
            client,
            device_key,
            signing_buffer,
            token_buffer,
            token_len: 0,
            expiration_unix_time: 0,
            duration_minutes,
            clock,
            sink,
        }
    }

    /// Generate a new token valid for `expiry_minutes`.
    ///
    /// On success the token is available from [`get`](Self::get) and its
    /// expiry, as read back from the token text, from
    /// [`expires_at`](Self::expires_at). On failure both are cleared, the cause
    /// is reported to the diagnostic sink, and the error is returned.
    ///
    /// # Errors
    ///
    /// - [`SasTokenError::Clock`] - the clock could not be read.
    /// - [`SasTokenError::Provider`] - the client failed to produce the signing
    ///   string or the token, or overran its buffer.
    /// - [`SasTokenError::InvalidBase64`] / [`SasTokenError::BufferTooSmall`] -
    ///   the device key did not decode into 32 bytes.
    /// - [`SasTokenError::Parse`] - the token has no usable `&se=` field.
    pub fn generate(&mut self, expiry_minutes: u32) -> Result<(), SasTokenError> {
        self.token_len = 0;
        self.expiration_unix_time = 0;

        match self.issue(expiry_minutes) {
            Ok((token_len, expiry)) => {
                self.token_len = token_len;
                self.expiration_unix_time = expiry;
                self.sink
                    .info(&format!("SAS token generated, expires at {expiry}"));
                Ok(())
            }
            Err(e) => {
                self.sink.error(&format!("Failed generating SAS token: {e}"));
                Err(e)
            }
        }
    }

    fn issue(&mut self, expiry_minutes: u32) -> Result<(usize, u32), SasTokenError> {
        let now = self
            .clock
            .now()
            .map_err(|e| report(&self.sink, "Failed reading current time", e))?;
        if !clock::is_synchronized(now) {
            self.sink
                .debug(&format!("Clock reads {now}, which looks unsynchronized"));
        }
        let expiry = expiration_from_minutes(now, expiry_minutes)
            .map_err(|e| report(&self.sink, "Failed computing token expiry", e))?;

        let signing_len = self
            .client
            .signing_string(expiry, &mut *self.signing_buffer)
            .and_then(|len| within(len, self.signing_buffer.len(), "signing string"))
            .map_err(|e| report(&self.sink, "Could not get the signature for SAS key", e))?;
        self.sink.debug(&format!(
            "Signing string is {signing_len} bytes, expiry {expiry}"
        ));

        let mut encoded = zeroed::<ENCODED_SIGNATURE_CAPACITY>();
        let encoded_len = encode_signed_signature(
            self.device_key,
            &self.signing_buffer[..signing_len],
            &mut encoded,
        )
        .map_err(|e| report(&self.sink, "Failed generating encoded signature", e))?;

        let token_len = self
            .client
            .assemble_token(
                expiry,
                &encoded.expose_secret()[..encoded_len],
                &mut *self.token_buffer,
            )
            .and_then(|len| within(len, self.token_buffer.len(), "token"))
            .map_err(|e| report(&self.sink, "Could not get the password", e))?;

        let parsed = extract_expiry(&self.token_buffer[..token_len])
            .map_err(|e| report(&self.sink, "Failed getting SAS token expiration time", e))?;
        if u64::from(parsed) != expiry {
            self.sink.error(&format!(
                "SAS token expiry {parsed} differs from requested {expiry}"
            ));
        }

        Ok((token_len, parsed))
    }

    /// Whether the last token has lapsed, or there is none.
    ///
    /// An unreadable clock counts as expired so that callers refresh.
    pub fn is_expired(&self) -> bool {
        match self.clock.now() {
            Ok(now) => now >= u64::from(self.expiration_unix_time),
            Err(e) => {
                self.sink
                    .error(&format!("Failed getting current time: {e}"));
                true
            }
        }
    }

    /// Regenerate with the configured duration if the current token is expired.
    ///
    /// Returns `Ok(true)` when a new token was issued.
    pub fn refresh_if_expired(&mut self) -> Result<bool, SasTokenError> {
        if !self.is_expired() {
            return Ok(false);
        }
        self.sink.event("SAS token expired; generating a new one");
        self.generate(self.duration_minutes).map(|()| true)
    }

    /// The last successfully generated token, possibly expired. Empty when the
    /// last [`generate`](Self::generate) failed or none has run.
    #[inline]
    pub fn get(&self) -> &[u8] {
        &self.token_buffer[..self.token_len]
    }

    /// [`get`](Self::get) as text, if the token is non-empty UTF-8.
    pub fn get_str(&self) -> Option<&str> {
        if self.token_len == 0 {
            return None;
        }
        std::str::from_utf8(self.get()).ok()
    }

    #[inline]
    pub fn has_token(&self) -> bool {
        self.token_len != 0
    }

    /// Expiry of the current token in Unix seconds.
    #[inline]
    pub fn expires_at(&self) -> Option<u32> {
        self.has_token().then_some(self.expiration_unix_time)
    }

    /// Lifetime used by [`refresh_if_expired`](Self::refresh_if_expired).
    #[inline]
    pub const fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

/// Decode the key, sign, and encode the digest into `out`, returning the
/// encoded length.
fn encode_signed_signature(
    device_key: &[u8],
    signing_string: &[u8],
    out: &mut EncodedSignature64,
) -> Result<usize, SasTokenError> {
    let mut key = zeroed::<DECODED_KEY_CAPACITY>();
    let key_len = decode_base64(device_key, key.expose_secret_mut())?.len();

    let mut digest = zeroed::<SIGNATURE_LEN>();
    sign_hmac_sha256(&key.expose_secret()[..key_len], signing_string, &mut digest);
    let signature = &digest.expose_secret()[..SIGNATURE_LEN];

    Ok(encode_base64(signature, out.expose_secret_mut())?.len())
}

fn within(len: usize, capacity: usize, what: &str) -> Result<usize, SasTokenError> {
    if len > capacity {
        return Err(SasTokenError::Provider(format!(
            "{what} length {len} exceeds buffer capacity {capacity}"
        )));
    }
    Ok(len)
}

fn report<S: DiagnosticSink>(sink: &S, context: &str, err: SasTokenError) -> SasTokenError {
    sink.error(&format!("{context}: {err}"));
    err
}
