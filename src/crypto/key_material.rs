//! Secret and key buffers.
//!
//! Every buffer here lives on the stack in a fixed-capacity `heapless::Vec`
//! and is wiped when dropped. `Debug` never prints the contents.

use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::Error;

/// Largest hash output supported (SHA-384).
pub const MAX_SECRET_LEN: usize = 48;
/// Largest key, IV or header protection key supported.
pub const MAX_KEY_LEN: usize = 32;

/// An intermediate HKDF secret (initial or directional).
pub struct Secret {
    bytes: heapless::Vec<u8, MAX_SECRET_LEN>,
}

impl Secret {
    /// A zero-filled secret of `len` bytes, to be written by extract/expand.
    pub(crate) fn zeroed(len: usize) -> Result<Self, Error> {
        let mut bytes = heapless::Vec::new();
        bytes.resize(len, 0).map_err(|_| Error::InvalidLength {
            requested: len,
            max: MAX_SECRET_LEN,
        })?;
        Ok(Self { bytes })
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl Drop for Secret {
    fn drop(&mut self) {
        self.bytes.as_mut_slice().zeroize();
    }
}

impl ZeroizeOnDrop for Secret {}

impl core::fmt::Debug for Secret {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Secret([REDACTED; {}])", self.bytes.len())
    }
}

/// One field of [`KeyMaterial`].
///
/// Comparisons run in constant time.
#[derive(Clone)]
pub struct KeyBytes {
    bytes: heapless::Vec<u8, MAX_KEY_LEN>,
}

impl KeyBytes {
    pub(crate) fn zeroed(len: usize) -> Result<Self, Error> {
        let mut bytes = heapless::Vec::new();
        bytes.resize(len, 0).map_err(|_| Error::InvalidLength {
            requested: len,
            max: MAX_KEY_LEN,
        })?;
        Ok(Self { bytes })
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl AsRef<[u8]> for KeyBytes {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl PartialEq for KeyBytes {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice().ct_eq(other.as_slice()).into()
    }
}

impl Eq for KeyBytes {}

impl PartialEq<[u8]> for KeyBytes {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_slice().ct_eq(other).into()
    }
}

impl<const N: usize> PartialEq<[u8; N]> for KeyBytes {
    fn eq(&self, other: &[u8; N]) -> bool {
        self.as_slice().ct_eq(other.as_slice()).into()
    }
}

impl Drop for KeyBytes {
    fn drop(&mut self) {
        self.bytes.as_mut_slice().zeroize();
    }
}

impl ZeroizeOnDrop for KeyBytes {}

impl core::fmt::Debug for KeyBytes {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "KeyBytes([REDACTED; {}])", self.bytes.len())
    }
}

/// Packet protection material for one direction at the Initial level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMaterial {
    key: KeyBytes,
    iv: KeyBytes,
    hp_key: KeyBytes,
}

impl KeyMaterial {
    pub(crate) fn new(key: KeyBytes, iv: KeyBytes, hp_key: KeyBytes) -> Self {
        Self { key, iv, hp_key }
    }

    /// AEAD packet protection key.
    pub fn key(&self) -> &KeyBytes {
        &self.key
    }

    /// AEAD IV (nonce base).
    pub fn iv(&self) -> &KeyBytes {
        &self.iv
    }

    /// Header protection key.
    pub fn hp_key(&self) -> &KeyBytes {
        &self.hp_key
    }

    /// Compute the AEAD nonce for a given packet number.
    ///
    /// The packet number, big-endian and left-padded to the IV length, is
    /// XORed with the IV.
    pub fn nonce(&self, packet_number: u64) -> KeyBytes {
        let mut nonce = self.iv.clone();
        let pn_bytes = packet_number.to_be_bytes();
        let buf = nonce.as_mut_slice();
        let n = buf.len();
        for i in 0..core::cmp::min(n, pn_bytes.len()) {
            buf[n - 1 - i] ^= pn_bytes[pn_bytes.len() - 1 - i];
        }
        nonce
    }
}
