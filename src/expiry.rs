//! # Expiry Field Extraction
//!
//! An assembled token carries its expiry as a query-style field,
//! `...&sig=<signature>&se=<unix-seconds>&...`. The issuer reads the expiry back
//! out of the token text instead of trusting the value it asked for.
//!
//! The scan is a small automaton: [`MarkerScanner`] tracks how much of
//! [`EXPIRY_FIELD_MARKER`] has been matched and reports the offset just past the
//! first complete match. The field then runs to the next `&`, a NUL byte, or
//! the end of the text, and must be a strict unsigned decimal `u32`.

use crate::consts::{EXPIRY_FIELD_MARKER, FIELD_SEPARATOR};
use crate::error::SasTokenError;

/// State of a marker scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// `matched` leading bytes of the marker have been seen.
    Searching { matched: usize },
    /// The marker ended just before byte offset `value_start`.
    Found { value_start: usize },
}

/// Streaming first-occurrence search for a fixed marker.
#[derive(Debug, Clone)]
pub struct MarkerScanner<'m> {
    marker: &'m [u8],
    state: ScanState,
}

impl<'m> MarkerScanner<'m> {
    /// `marker` must be non-empty and its first byte must not recur in it.
    pub fn new(marker: &'m [u8]) -> Self {
        debug_assert!(!marker.is_empty());
        Self {
            marker,
            state: ScanState::Searching { matched: 0 },
        }
    }

    #[inline]
    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Feed the byte at `offset`. Once [`ScanState::Found`] is reached the
    /// state no longer changes.
    pub fn step(&mut self, offset: usize, byte: u8) -> ScanState {
        if let ScanState::Searching { matched } = self.state {
            let matched = if byte == self.marker[matched] {
                matched + 1
            } else if byte == self.marker[0] {
                // first byte never recurs in the marker: a mismatch can only
                // restart a match at the current byte
                1
            } else {
                0
            };
            self.state = if matched == self.marker.len() {
                ScanState::Found {
                    value_start: offset + 1,
                }
            } else {
                ScanState::Searching { matched }
            };
        }
        self.state
    }

    /// Run the scan over `haystack`, stopping at the first match or at a NUL.
    pub fn scan(mut self, haystack: &[u8]) -> Option<usize> {
        for (offset, &byte) in haystack.iter().enumerate() {
            if byte == 0 {
                break;
            }
            if let ScanState::Found { value_start } = self.step(offset, byte) {
                return Some(value_start);
            }
        }
        None
    }
}

/// Locate the raw `se` field value: the bytes after the first `&se=` up to the
/// next `&`, NUL, or end of text.
pub fn find_expiry_field(token: &[u8]) -> Option<&[u8]> {
    let start = MarkerScanner::new(EXPIRY_FIELD_MARKER).scan(token)?;
    let rest = &token[start..];
    let end = rest
        .iter()
        .position(|&b| b == FIELD_SEPARATOR || b == 0)
        .unwrap_or(rest.len());
    Some(&rest[..end])
}

/// Strict unsigned decimal parse: one or more ASCII digits, value fits `u32`.
pub fn parse_u32_decimal(digits: &[u8]) -> Result<u32, SasTokenError> {
    if digits.is_empty() {
        return Err(SasTokenError::Parse("empty expiry field".into()));
    }
    digits.iter().try_fold(0u32, |acc, &b| {
        if !b.is_ascii_digit() {
            return Err(SasTokenError::Parse(format!(
                "non-numeric byte 0x{b:02x} in expiry field"
            )));
        }
        acc.checked_mul(10)
            .and_then(|v| v.checked_add(u32::from(b - b'0')))
            .ok_or_else(|| SasTokenError::Parse("expiry field overflows u32".into()))
    })
}

/// Extract the expiry timestamp (Unix seconds) from assembled token text.
///
/// A zero expiry is treated as "no valid expiry" and rejected.
///
/// # Errors
///
/// - [`SasTokenError::Parse`] - marker missing, field empty, non-numeric,
///   overflowing, or zero.
///
/// # Example
///
/// ```
/// use iot_sas_token::expiry::extract_expiry;
///
/// let token = b"SharedAccessSignature sr=hub&sig=abc&se=1700000000&skn=k";
/// assert_eq!(extract_expiry(token)?, 1_700_000_000);
/// assert!(extract_expiry(b"SharedAccessSignature sr=hub&sig=abc").is_err());
/// # Ok::<(), iot_sas_token::SasTokenError>(())
/// ```
pub fn extract_expiry(token: &[u8]) -> Result<u32, SasTokenError> {
    let field = find_expiry_field(token)
        .ok_or_else(|| SasTokenError::Parse("`se` field not found in token".into()))?;
    match parse_u32_decimal(field)? {
        0 => Err(SasTokenError::Parse("token expiry is zero".into())),
        expiry => Ok(expiry),
    }
}
