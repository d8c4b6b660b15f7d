//! Key derivation building blocks for QUIC Initial packet protection.
//!
//! The HKDF primitive is pluggable through the [`Hkdf`] trait; the
//! `rustcrypto` feature supplies software implementations. Everything
//! above it (label encoding, the three derivation stages, output
//! packaging) is pure and keeps no state between calls.

mod hkdf;
pub mod initial;
pub mod key_material;
pub mod label;
pub mod suite;
pub mod version;

#[cfg(feature = "rustcrypto")]
pub mod rustcrypto;

pub use hkdf::Hkdf;
pub use key_material::{KeyBytes, KeyMaterial, Secret};

/// Which endpoint the keys are for.
///
/// Client and server protect their Initial packets with different keys
/// derived from the same connection ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Client,
    Server,
}

impl Role {
    /// The other endpoint.
    pub const fn peer(self) -> Self {
        match self {
            Role::Client => Role::Server,
            Role::Server => Role::Client,
        }
    }
}
