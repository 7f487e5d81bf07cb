//! tests/common.rs
//! Test doubles and constants shared across test files

#![allow(dead_code)] // each test file uses a different subset

use iot_sas_token::{
    Clock, DiagnosticSink, LogLevel, SasTokenError, SigningStringProvider, TokenAssembler,
};
use std::cell::{Cell, RefCell};

/// "base64key" in base64
pub const TEST_DEVICE_KEY: &str = "YmFzZTY0a2V5";
pub const TEST_DEVICE_KEY_RAW: &[u8] = b"base64key";

pub const TEST_NOW: u64 = 1_700_000_000;
pub const TEST_EXPIRY_60_MIN: u64 = 1_700_003_600;

pub const TEST_SIGNING_STRING: &str = "devL%2FexampleHub%2Fdevices%2FdevA\n1700003600";
pub const TEST_RESOURCE: &str = "exampleHub.azure-devices.net%2Fdevices%2FdevA";

fn write_into(out: &mut [u8], text: &[u8], what: &str) -> Result<usize, SasTokenError> {
    let dst = out
        .get_mut(..text.len())
        .ok_or_else(|| SasTokenError::Provider(format!("{what} buffer too small")))?;
    dst.copy_from_slice(text);
    Ok(text.len())
}

/// Hub client double: builds signing strings and tokens, with switchable faults.
#[derive(Default)]
pub struct StubHub {
    /// Return this instead of a string derived from the expiry.
    pub fixed_signing_string: Option<&'static str>,
    pub fail_signing: Cell<bool>,
    pub fail_assembly: Cell<bool>,
    /// Leave `&se=` out of the assembled token.
    pub omit_expiry: Cell<bool>,
    /// Embed this expiry instead of the requested one.
    pub expiry_override: Cell<Option<u64>>,
    /// Report one byte more than the token buffer holds.
    pub overrun_token: Cell<bool>,
    pub last_signature: RefCell<Vec<u8>>,
    pub last_signing_expiry: Cell<Option<u64>>,
    pub assembled: Cell<usize>,
}

impl StubHub {
    pub fn with_fixed_signing_string(text: &'static str) -> Self {
        Self {
            fixed_signing_string: Some(text),
            ..Self::default()
        }
    }

    pub fn token_for(&self, expiry: u64, signature: &[u8]) -> String {
        let sig = String::from_utf8_lossy(signature);
        if self.omit_expiry.get() {
            format!("SharedAccessSignature sr={TEST_RESOURCE}&sig={sig}")
        } else {
            let se = self.expiry_override.get().unwrap_or(expiry);
            format!("SharedAccessSignature sr={TEST_RESOURCE}&sig={sig}&se={se}")
        }
    }
}

impl SigningStringProvider for StubHub {
    fn signing_string(&self, expiry: u64, out: &mut [u8]) -> Result<usize, SasTokenError> {
        self.last_signing_expiry.set(Some(expiry));
        if self.fail_signing.get() {
            return Err("signing string unavailable".into());
        }
        let text = match self.fixed_signing_string {
            Some(fixed) => fixed.to_string(),
            None => format!("{TEST_RESOURCE}\n{expiry}"),
        };
        write_into(out, text.as_bytes(), "signing")
    }
}

impl TokenAssembler for StubHub {
    fn assemble_token(
        &self,
        expiry: u64,
        signature: &[u8],
        out: &mut [u8],
    ) -> Result<usize, SasTokenError> {
        *self.last_signature.borrow_mut() = signature.to_vec();
        if self.fail_assembly.get() {
            return Err("password unavailable".into());
        }
        let token = self.token_for(expiry, signature);
        let written = write_into(out, token.as_bytes(), "token")?;
        self.assembled.set(self.assembled.get() + 1);
        if self.overrun_token.get() {
            return Ok(out.len() + 1);
        }
        Ok(written)
    }
}

/// Settable clock; a failed clock cannot be read until set again.
pub struct ManualClock {
    now: Cell<Option<u64>>,
}

impl ManualClock {
    pub fn at(now: u64) -> Self {
        Self {
            now: Cell::new(Some(now)),
        }
    }

    pub fn set(&self, now: u64) {
        self.now.set(Some(now));
    }

    pub fn advance(&self, seconds: u64) {
        self.now.set(self.now.get().map(|t| t + seconds));
    }

    pub fn fail(&self) {
        self.now.set(None);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Result<u64, SasTokenError> {
        self.now
            .get()
            .ok_or_else(|| SasTokenError::Clock("time unavailable".into()))
    }
}

/// Sink that keeps every message it receives.
#[derive(Default)]
pub struct RecordingSink {
    messages: RefCell<Vec<(LogLevel, String)>>,
}

impl RecordingSink {
    pub fn at(&self, level: LogLevel) -> Vec<String> {
        self.messages
            .borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn clear(&self) {
        self.messages.borrow_mut().clear();
    }
}

impl DiagnosticSink for RecordingSink {
    fn log(&self, level: LogLevel, message: &str) {
        self.messages.borrow_mut().push((level, message.to_string()));
    }
}

pub const SENTINEL: u8 = 0xEE;
pub const GUARD: usize = 8;

/// `len` usable bytes with `GUARD` sentinel bytes on each side.
pub fn guarded(len: usize) -> Vec<u8> {
    vec![SENTINEL; len + 2 * GUARD]
}

pub fn inner(buf: &mut [u8]) -> &mut [u8] {
    let len = buf.len();
    &mut buf[GUARD..len - GUARD]
}

pub fn assert_guards_intact(buf: &[u8]) {
    let len = buf.len();
    assert!(
        buf[..GUARD].iter().all(|&b| b == SENTINEL),
        "leading guard overwritten: {:02x?}",
        &buf[..GUARD]
    );
    assert!(
        buf[len - GUARD..].iter().all(|&b| b == SENTINEL),
        "trailing guard overwritten: {:02x?}",
        &buf[len - GUARD..]
    );
}
