//! Version-specific constants for Initial key derivation.
//!
//! Every QUIC version that changes the Initial salt or the key labels gets
//! its own [`Version`] record. The derivation code reads these fields and
//! never hardcodes a salt or label itself.

use crate::crypto::Role;

/// Salt, labels and connection ID bound for one QUIC wire version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Version {
    /// Short name, for diagnostics.
    pub name: &'static str,
    /// Wire version number carried in long headers.
    pub wire: u32,
    /// HKDF-Extract salt for the initial secret.
    pub salt: &'static [u8],
    /// Prefix prepended to every label inside `HkdfLabel`.
    pub label_prefix: &'static [u8],
    pub client_label: &'static [u8],
    pub server_label: &'static [u8],
    pub key_label: &'static [u8],
    pub iv_label: &'static [u8],
    /// Header protection key label ("pn" in draft-14, "quic hp" from v1 on).
    pub hp_label: &'static [u8],
    /// Longest connection ID the version allows.
    pub max_cid_len: usize,
}

impl Version {
    /// draft-ietf-quic-tls-14.
    pub const DRAFT_14: Version = Version {
        name: "draft-14",
        wire: 0xff00_000e,
        salt: &[
            0x9c, 0x10, 0x8f, 0x98, 0x52, 0x0a, 0x5c, 0x5c, 0x32, 0x96, 0x8e, 0x95, 0x0e, 0x8a,
            0x2c, 0x5f, 0xe0, 0x6d, 0x6c, 0x38,
        ],
        label_prefix: b"quic ",
        client_label: b"client in",
        server_label: b"server in",
        key_label: b"key",
        iv_label: b"iv",
        hp_label: b"pn",
        max_cid_len: 18,
    };

    /// QUIC version 1 (RFC 9001 section 5.2).
    pub const V1: Version = Version {
        name: "v1",
        wire: 0x0000_0001,
        salt: &[
            0x38, 0x76, 0x2c, 0xf7, 0xf5, 0x59, 0x34, 0xb3, 0x4d, 0x17, 0x9a, 0xe6, 0xa4, 0xc8,
            0x0c, 0xad, 0xcc, 0xbb, 0x7f, 0x0a,
        ],
        label_prefix: b"tls13 ",
        client_label: b"client in",
        server_label: b"server in",
        key_label: b"quic key",
        iv_label: b"quic iv",
        hp_label: b"quic hp",
        max_cid_len: 20,
    };

    /// QUIC version 2 (RFC 9369 section 3.3).
    pub const V2: Version = Version {
        name: "v2",
        wire: 0x6b33_43cf,
        salt: &[
            0x0d, 0xed, 0xe3, 0xde, 0xf7, 0x00, 0xa6, 0xdb, 0x81, 0x93, 0x81, 0xbe, 0x6e, 0x26,
            0x9d, 0xcb, 0xf9, 0xbd, 0x2e, 0xd9,
        ],
        label_prefix: b"tls13 ",
        client_label: b"client in",
        server_label: b"server in",
        key_label: b"quicv2 key",
        iv_label: b"quicv2 iv",
        hp_label: b"quicv2 hp",
        max_cid_len: 20,
    };

    /// Look up a version by the number carried on the wire.
    pub fn from_wire(wire: u32) -> Option<Self> {
        [Self::DRAFT_14, Self::V1, Self::V2]
            .into_iter()
            .find(|v| v.wire == wire)
    }

    /// Stage-2 label for the given endpoint.
    pub const fn direction_label(&self, role: Role) -> &'static [u8] {
        match role {
            Role::Client => self.client_label,
            Role::Server => self.server_label,
        }
    }
}

impl Default for Version {
    fn default() -> Self {
        Self::DRAFT_14
    }
}
