//! # Base64 Codec
//!
//! Lossless conversion between binary data and standard (padded) base64 text,
//! writing into caller-supplied fixed-capacity buffers. Neither function
//! allocates, and neither writes past the end of its output buffer.

use base64::engine::general_purpose::STANDARD;
use base64::{DecodeError, DecodeSliceError, EncodeSliceError, Engine};

use crate::error::SasTokenError;

/// Exact length of the padded base64 encoding of `binary_len` bytes.
#[inline]
pub const fn encoded_len(binary_len: usize) -> usize {
    binary_len.div_ceil(3) * 4
}

/// Exact decoded length of padded base64 text.
///
/// Returns an error if the text length is not a multiple of 4 or it carries
/// more than two padding characters. The alphabet itself is checked by
/// [`decode_base64`].
pub fn decoded_len(text: &[u8]) -> Result<usize, SasTokenError> {
    if text.len() % 4 != 0 {
        return Err(SasTokenError::InvalidBase64(format!(
            "length {} is not a multiple of 4",
            text.len()
        )));
    }
    let padding = text.iter().rev().take_while(|&&b| b == b'=').count();
    if padding > 2 {
        return Err(SasTokenError::InvalidBase64("too much padding".into()));
    }
    Ok(text.len() / 4 * 3 - padding)
}

/// Encode `binary` as base64 into `output`.
///
/// `output` must hold at least [`encoded_len`] bytes. On success the returned
/// slice is the exact encoded text at the start of `output`.
///
/// # Errors
///
/// - [`SasTokenError::BufferTooSmall`] - `output` is undersized; it is left untouched.
///
/// # Example
///
/// ```
/// use iot_sas_token::codec::encode_base64;
///
/// let mut out = [0u8; 16];
/// let text = encode_base64(b"base64key", &mut out)?;
/// assert_eq!(text, b"YmFzZTY0a2V5");
/// # Ok::<(), iot_sas_token::SasTokenError>(())
/// ```
pub fn encode_base64<'o>(binary: &[u8], output: &'o mut [u8]) -> Result<&'o [u8], SasTokenError> {
    let needed = encoded_len(binary.len());
    if output.len() < needed {
        return Err(SasTokenError::BufferTooSmall {
            needed,
            capacity: output.len(),
        });
    }

    let written = STANDARD
        .encode_slice(binary, output)
        .map_err(|_: EncodeSliceError| SasTokenError::BufferTooSmall {
            needed,
            capacity: output.len(),
        })?;

    Ok(&output[..written])
}

/// Decode base64 `text` into `output`.
///
/// The whole of `output` is zero-filled first, so nothing from a previous use
/// of the buffer survives past the decoded length. It is zero-filled again if
/// decoding fails, so no partial key material is left behind.
///
/// # Errors
///
/// - [`SasTokenError::InvalidBase64`] - bad alphabet, length, or padding.
/// - [`SasTokenError::BufferTooSmall`] - the decoded data does not fit in `output`.
pub fn decode_base64<'o>(text: &[u8], output: &'o mut [u8]) -> Result<&'o [u8], SasTokenError> {
    output.fill(0);

    let needed = decoded_len(text)?;
    if output.len() < needed {
        return Err(SasTokenError::BufferTooSmall {
            needed,
            capacity: output.len(),
        });
    }

    match STANDARD.decode_slice(text, output) {
        Ok(written) => Ok(&output[..written]),
        Err(e) => {
            output.fill(0);
            Err(match e {
                DecodeSliceError::DecodeError(inner) => invalid(inner),
                _ => SasTokenError::BufferTooSmall {
                    needed,
                    capacity: output.len(),
                },
            })
        }
    }
}

fn invalid(e: DecodeError) -> SasTokenError {
    SasTokenError::InvalidBase64(e.to_string())
}
