//! RustCrypto-backed implementations of the [`Hkdf`](crate::crypto::Hkdf) trait.

use crate::crypto::suite::HashAlgorithm;
use crate::crypto::Hkdf as HkdfTrait;
use crate::error::Error;

// ---- HKDF-SHA256 ----

/// HKDF using SHA-256 (via the `hkdf` crate).
#[derive(Debug, Clone, Copy, Default)]
pub struct HkdfSha256;

impl HkdfTrait for HkdfSha256 {
    const HASH: HashAlgorithm = HashAlgorithm::Sha256;
    const HASH_LEN: usize = 32;

    fn extract(&self, salt: &[u8], ikm: &[u8], prk: &mut [u8]) -> Result<(), Error> {
        if prk.len() != Self::HASH_LEN {
            return Err(Error::Crypto);
        }
        let (out, _) = hkdf::Hkdf::<sha2::Sha256>::extract(Some(salt), ikm);
        prk.copy_from_slice(&out);
        Ok(())
    }

    fn expand(&self, prk: &[u8], info: &[u8], okm: &mut [u8]) -> Result<(), Error> {
        let hk = hkdf::Hkdf::<sha2::Sha256>::from_prk(prk).map_err(|_| Error::Crypto)?;
        hk.expand(info, okm).map_err(|_| Error::Crypto)
    }
}

// ---- HKDF-SHA384 ----

/// HKDF using SHA-384, for `TLS_AES_256_GCM_SHA384`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HkdfSha384;

impl HkdfTrait for HkdfSha384 {
    const HASH: HashAlgorithm = HashAlgorithm::Sha384;
    const HASH_LEN: usize = 48;

    fn extract(&self, salt: &[u8], ikm: &[u8], prk: &mut [u8]) -> Result<(), Error> {
        if prk.len() != Self::HASH_LEN {
            return Err(Error::Crypto);
        }
        let (out, _) = hkdf::Hkdf::<sha2::Sha384>::extract(Some(salt), ikm);
        prk.copy_from_slice(&out);
        Ok(())
    }

    fn expand(&self, prk: &[u8], info: &[u8], okm: &mut [u8]) -> Result<(), Error> {
        let hk = hkdf::Hkdf::<sha2::Sha384>::from_prk(prk).map_err(|_| Error::Crypto)?;
        hk.expand(info, okm).map_err(|_| Error::Crypto)
    }
}
