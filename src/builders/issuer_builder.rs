//! src/builders/issuer_builder.rs
//! Validated construction of a `SasTokenIssuer`

use crate::clock::{Clock, SystemClock};
use crate::codec::decoded_len;
use crate::consts::{
    DECODED_KEY_CAPACITY, DEFAULT_SAS_TOKEN_DURATION_MINUTES, ENCODED_SIGNATURE_LEN,
};
use crate::diagnostics::{DiagnosticSink, LogLevel, TracingSink};
use crate::error::SasTokenError;
use crate::issuer::SasTokenIssuer;
use crate::provider::{SigningStringProvider, TokenAssembler};

/// Builder for [`SasTokenIssuer`].
///
/// Defaults: [`DEFAULT_SAS_TOKEN_DURATION_MINUTES`] lifetime, [`SystemClock`],
/// and a [`TracingSink`] at [`LogLevel::Info`].
///
/// [`build`](Self::build) rejects inputs that could never yield a token, so a
/// capacity mismatch surfaces at construction instead of on the first
/// `generate`.
pub struct SasTokenIssuerBuilder<'a, H, C = SystemClock, S = TracingSink> {
    client: H,
    device_key: &'a [u8],
    signing_buffer: &'a mut [u8],
    token_buffer: &'a mut [u8],
    duration_minutes: u32,
    clock: C,
    sink: S,
}

impl<'a, H> SasTokenIssuerBuilder<'a, H> {
    #[must_use]
    pub fn new<K>(
        client: H,
        device_key: &'a K,
        signing_buffer: &'a mut [u8],
        token_buffer: &'a mut [u8],
    ) -> Self
    where
        K: AsRef<[u8]> + ?Sized,
    {
        Self {
            client,
            device_key: device_key.as_ref(),
            signing_buffer,
            token_buffer,
            duration_minutes: DEFAULT_SAS_TOKEN_DURATION_MINUTES,
            clock: SystemClock,
            sink: TracingSink::default(),
        }
    }
}

impl<'a, H, C> SasTokenIssuerBuilder<'a, H, C, TracingSink> {
    /// Set the `tracing` sink's threshold.
    #[must_use]
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.sink = TracingSink::new(level);
        self
    }
}

impl<'a, H, C, S> SasTokenIssuerBuilder<'a, H, C, S> {
    /// Token lifetime used by `refresh_if_expired`.
    #[must_use]
    pub fn with_duration_minutes(mut self, minutes: u32) -> Self {
        self.duration_minutes = minutes;
        self
    }

    #[must_use]
    pub fn with_clock<C2: Clock>(self, clock: C2) -> SasTokenIssuerBuilder<'a, H, C2, S> {
        SasTokenIssuerBuilder {
            client: self.client,
            device_key: self.device_key,
            signing_buffer: self.signing_buffer,
            token_buffer: self.token_buffer,
            duration_minutes: self.duration_minutes,
            clock,
            sink: self.sink,
        }
    }

    #[must_use]
    pub fn with_sink<S2: DiagnosticSink>(self, sink: S2) -> SasTokenIssuerBuilder<'a, H, C, S2> {
        SasTokenIssuerBuilder {
            client: self.client,
            device_key: self.device_key,
            signing_buffer: self.signing_buffer,
            token_buffer: self.token_buffer,
            duration_minutes: self.duration_minutes,
            clock: self.clock,
            sink,
        }
    }

    /// Current token lifetime in minutes
    #[must_use]
    pub const fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }
}

impl<'a, H, C, S> SasTokenIssuerBuilder<'a, H, C, S>
where
    H: SigningStringProvider + TokenAssembler,
    C: Clock,
    S: DiagnosticSink,
{
    /// Validate and build.
    ///
    /// # Errors
    ///
    /// [`SasTokenError::Config`] if:
    /// - the device key is empty, not valid-length base64, or decodes to more
    ///   than 32 bytes
    /// - the signing buffer is empty
    /// - the token buffer cannot hold a 44-byte encoded signature
    /// - the duration is zero
    pub fn build(self) -> Result<SasTokenIssuer<'a, H, C, S>, SasTokenError> {
        if self.device_key.is_empty() {
            return Err(SasTokenError::Config("device key is empty".into()));
        }
        let key_len = decoded_len(self.device_key)
            .map_err(|e| SasTokenError::Config(format!("device key: {e}")))?;
        if key_len > DECODED_KEY_CAPACITY {
            return Err(SasTokenError::Config(format!(
                "device key decodes to {key_len} bytes, key buffer holds {DECODED_KEY_CAPACITY}"
            )));
        }
        if self.signing_buffer.is_empty() {
            return Err(SasTokenError::Config("signing buffer is empty".into()));
        }
        if self.token_buffer.len() < ENCODED_SIGNATURE_LEN {
            return Err(SasTokenError::Config(format!(
                "token buffer holds {} bytes, an encoded signature alone needs {ENCODED_SIGNATURE_LEN}",
                self.token_buffer.len()
            )));
        }
        if self.duration_minutes == 0 {
            return Err(SasTokenError::Config(
                "token duration must be at least 1 minute".into(),
            ));
        }

        Ok(SasTokenIssuer::from_parts(
            self.client,
            self.device_key,
            self.signing_buffer,
            self.token_buffer,
            self.duration_minutes,
            self.clock,
            self.sink,
        ))
    }
}
