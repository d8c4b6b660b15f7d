//! QUIC Initial packet protection key derivation.
//!
//! Initial packets are protected with keys derived from the client's first
//! Destination Connection ID, which travels in the clear. Both endpoints run
//! the same three-step HKDF pipeline over it and land on the same keys:
//!
//! 1. `initial_secret = HKDF-Extract(version_salt, dcid)`
//! 2. `client_secret` / `server_secret` via HKDF-Expand-Label
//!    ("client in" / "server in")
//! 3. packet key, IV and header protection key via HKDF-Expand-Label
//!
//! ```
//! use quic_initial_keys::{derive, Role, TLS_AES_128_GCM_SHA256};
//!
//! let dcid = [0x83, 0x94, 0xc8, 0xf0, 0x3e, 0x51, 0x57, 0x08];
//! let km = derive(&dcid, Role::Client, &TLS_AES_128_GCM_SHA256).unwrap();
//! assert_eq!(km.key().len(), 16);
//! assert_eq!(km.iv().len(), 12);
//! assert_eq!(km.hp_key().len(), 16);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(any(test, feature = "std"))]
extern crate std;

macro_rules! trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "log")]
        log::trace!($($arg)*);
    };
}

pub mod crypto;
pub mod error;

pub use crypto::initial::{derive, derive_for_version, derive_pair, derive_with, InitialKeys};
pub use crypto::suite::{
    HashAlgorithm, SuiteParams, TLS_AES_128_GCM_SHA256, TLS_AES_256_GCM_SHA384,
    TLS_CHACHA20_POLY1305_SHA256,
};
pub use crypto::version::Version;
pub use crypto::{KeyBytes, KeyMaterial, Role};
pub use error::Error;
