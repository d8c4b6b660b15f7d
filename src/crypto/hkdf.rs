use crate::crypto::suite::HashAlgorithm;
use crate::error::Error;

/// HMAC-based Key Derivation Function (RFC 5869).
///
/// The derivation engine only composes these two operations; the
/// implementation is trusted to be correct and constant-time.
pub trait Hkdf {
    /// Hash function this instance is keyed with.
    const HASH: HashAlgorithm;
    /// Hash output length in bytes (e.g., 32 for SHA-256).
    ///
    /// Must equal `HASH.output_len()`; derivation rejects a backend where
    /// the two disagree.
    const HASH_LEN: usize = Self::HASH.output_len();

    /// HKDF-Extract: derive a pseudorandom key from salt and input keying material.
    ///
    /// `prk` must be exactly `HASH_LEN` bytes.
    fn extract(&self, salt: &[u8], ikm: &[u8], prk: &mut [u8]) -> Result<(), Error>;

    /// HKDF-Expand: expand a pseudorandom key with info into output keying material.
    fn expand(&self, prk: &[u8], info: &[u8], okm: &mut [u8]) -> Result<(), Error>;
}
