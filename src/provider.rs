//! # Collaborator Contracts
//!
//! The issuer does not know the token format. A hub client supplies the
//! canonical string to sign and assembles the final token around the encoded
//! signature; the issuer only transforms the bytes passed between them.

use crate::error::SasTokenError;

/// Produces the canonical signing string for a given expiry.
pub trait SigningStringProvider {
    /// Write the string to sign for `expiry` (Unix seconds) into `out`,
    /// returning the number of bytes written.
    fn signing_string(&self, expiry: u64, out: &mut [u8]) -> Result<usize, SasTokenError>;
}

/// Assembles the final token text from an encoded signature.
pub trait TokenAssembler {
    /// Write the token for `expiry` and base64 `signature` into `out`,
    /// returning the number of bytes written.
    ///
    /// The token must embed `&se=<expiry>`; the issuer reads its expiry back
    /// from that field.
    fn assemble_token(
        &self,
        expiry: u64,
        signature: &[u8],
        out: &mut [u8],
    ) -> Result<usize, SasTokenError>;
}

impl<P: SigningStringProvider + ?Sized> SigningStringProvider for &P {
    #[inline]
    fn signing_string(&self, expiry: u64, out: &mut [u8]) -> Result<usize, SasTokenError> {
        (**self).signing_string(expiry, out)
    }
}

impl<A: TokenAssembler + ?Sized> TokenAssembler for &A {
    #[inline]
    fn assemble_token(
        &self,
        expiry: u64,
        signature: &[u8],
        out: &mut [u8],
    ) -> Result<usize, SasTokenError> {
        (**self).assemble_token(expiry, signature, out)
    }
}
