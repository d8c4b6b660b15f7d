//! Cipher suite parameters.
//!
//! The suite is negotiated elsewhere; the derivation only needs to know how
//! many bytes to produce for each output and which hash drives HKDF.

use crate::crypto::key_material::MAX_KEY_LEN;
use crate::error::Error;

/// Hash function used for HKDF extraction and expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    Sha256,
    Sha384,
}

impl HashAlgorithm {
    /// Digest length in bytes.
    pub const fn output_len(self) -> usize {
        match self {
            HashAlgorithm::Sha256 => 32,
            HashAlgorithm::Sha384 => 48,
        }
    }

    /// Largest output HKDF-Expand can produce with this hash (RFC 5869 §2.3).
    pub const fn max_expand_len(self) -> usize {
        255 * self.output_len()
    }
}

/// Output lengths and hash function for one cipher suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SuiteParams {
    /// AEAD packet protection key length.
    pub key_len: usize,
    /// AEAD IV length.
    pub iv_len: usize,
    /// Header protection key length.
    pub hp_key_len: usize,
    pub hash: HashAlgorithm,
}

/// AES-128-GCM with SHA-256. Mandatory for Initial packets.
pub const TLS_AES_128_GCM_SHA256: SuiteParams = SuiteParams {
    key_len: 16,
    iv_len: 12,
    hp_key_len: 16,
    hash: HashAlgorithm::Sha256,
};

pub const TLS_AES_256_GCM_SHA384: SuiteParams = SuiteParams {
    key_len: 32,
    iv_len: 12,
    hp_key_len: 32,
    hash: HashAlgorithm::Sha384,
};

pub const TLS_CHACHA20_POLY1305_SHA256: SuiteParams = SuiteParams {
    key_len: 32,
    iv_len: 12,
    hp_key_len: 32,
    hash: HashAlgorithm::Sha256,
};

impl SuiteParams {
    /// Look up a TLS 1.3 cipher suite by its IANA codepoint.
    pub const fn from_tls_id(id: u16) -> Option<Self> {
        match id {
            0x1301 => Some(TLS_AES_128_GCM_SHA256),
            0x1302 => Some(TLS_AES_256_GCM_SHA384),
            0x1303 => Some(TLS_CHACHA20_POLY1305_SHA256),
            _ => None,
        }
    }

    /// Check every output length is producible.
    ///
    /// Lengths must be nonzero, within the HKDF-Expand bound for the hash,
    /// and within the fixed capacity of [`KeyBytes`](crate::KeyBytes).
    pub fn validate(&self) -> Result<(), Error> {
        let max = core::cmp::min(self.hash.max_expand_len(), MAX_KEY_LEN);
        for requested in [self.key_len, self.iv_len, self.hp_key_len] {
            if requested == 0 || requested > max {
                return Err(Error::InvalidLength { requested, max });
            }
        }
        Ok(())
    }
}

impl Default for SuiteParams {
    fn default() -> Self {
        TLS_AES_128_GCM_SHA256
    }
}
