//! Initial packet protection key derivation.
//!
//! ```text
//! initial_secret = HKDF-Extract(initial_salt, client_dst_connection_id)
//! client_initial_secret = HKDF-Expand-Label(initial_secret, "client in", "", Hash.length)
//! server_initial_secret = HKDF-Expand-Label(initial_secret, "server in", "", Hash.length)
//! key = HKDF-Expand-Label(secret, "key", "", key_length)
//! iv  = HKDF-Expand-Label(secret, "iv", "", iv_length)
//! hp  = HKDF-Expand-Label(secret, "pn", "", hp_key_length)
//! ```
//!
//! Label spellings and the label prefix come from the [`Version`] record
//! ("quic " + "key" in draft-14, "tls13 " + "quic key" in v1).
//!
//! Each stage is a pure function over the previous stage's output. Nothing
//! is cached, so derivations for different connections can run in parallel.

use crate::crypto::label::hkdf_expand_label;
use crate::crypto::suite::{HashAlgorithm, SuiteParams};
use crate::crypto::version::Version;
use crate::crypto::{Hkdf, KeyBytes, KeyMaterial, Role, Secret};
use crate::error::Error;

/// Stage 1: bind to the connection ID and protocol version.
pub fn initial_secret<H: Hkdf>(hkdf: &H, version: &Version, dcid: &[u8]) -> Result<Secret, Error> {
    let mut secret = Secret::zeroed(H::HASH_LEN)?;
    hkdf.extract(version.salt, dcid, secret.as_mut_slice())?;
    Ok(secret)
}

/// Stage 2: bind to the sending endpoint.
pub fn direction_secret<H: Hkdf>(
    hkdf: &H,
    version: &Version,
    initial: &Secret,
    role: Role,
) -> Result<Secret, Error> {
    let mut secret = Secret::zeroed(H::HASH_LEN)?;
    hkdf_expand_label(
        hkdf,
        initial.as_slice(),
        version.label_prefix,
        version.direction_label(role),
        &[],
        secret.as_mut_slice(),
    )?;
    Ok(secret)
}

/// Stage 3: expand a directional secret into key, IV and header protection key.
pub fn packet_key_material<H: Hkdf>(
    hkdf: &H,
    version: &Version,
    secret: &Secret,
    suite: &SuiteParams,
) -> Result<KeyMaterial, Error> {
    let expand = |label: &[u8], len: usize| -> Result<KeyBytes, Error> {
        let mut out = KeyBytes::zeroed(len)?;
        hkdf_expand_label(
            hkdf,
            secret.as_slice(),
            version.label_prefix,
            label,
            &[],
            out.as_mut_slice(),
        )?;
        Ok(out)
    };

    let key = expand(version.key_label, suite.key_len)?;
    let iv = expand(version.iv_label, suite.iv_len)?;
    let hp_key = expand(version.hp_label, suite.hp_key_len)?;
    Ok(KeyMaterial::new(key, iv, hp_key))
}

fn check_inputs<H: Hkdf>(version: &Version, dcid: &[u8], suite: &SuiteParams) -> Result<(), Error> {
    if H::HASH != suite.hash || H::HASH_LEN != H::HASH.output_len() {
        return Err(Error::HashMismatch);
    }
    suite.validate()?;
    if dcid.len() > version.max_cid_len {
        return Err(Error::InvalidConnectionId {
            len: dcid.len(),
            max: version.max_cid_len,
        });
    }
    Ok(())
}

/// Derive Initial key material with a caller-supplied HKDF backend.
///
/// Validates the suite and connection ID before running any stage, so a
/// failed call never touches the primitive with bad parameters.
pub fn derive_with<H: Hkdf>(
    hkdf: &H,
    version: &Version,
    dcid: &[u8],
    role: Role,
    suite: &SuiteParams,
) -> Result<KeyMaterial, Error> {
    check_inputs::<H>(version, dcid, suite)?;
    trace!(
        "deriving {} initial keys for {:?}, dcid_len={}",
        version.name,
        role,
        dcid.len()
    );

    let initial = initial_secret(hkdf, version, dcid)?;
    let secret = direction_secret(hkdf, version, &initial, role)?;
    drop(initial);
    packet_key_material(hkdf, version, &secret, suite)
}

/// Both directions' Initial key material for one connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitialKeys {
    pub client: KeyMaterial,
    pub server: KeyMaterial,
}

impl InitialKeys {
    /// Keys this endpoint seals with.
    pub fn local(&self, role: Role) -> &KeyMaterial {
        match role {
            Role::Client => &self.client,
            Role::Server => &self.server,
        }
    }

    /// Keys this endpoint opens the peer's packets with.
    pub fn remote(&self, role: Role) -> &KeyMaterial {
        self.local(role.peer())
    }
}

#[cfg_attr(not(feature = "rustcrypto"), allow(dead_code))]
fn derive_pair_with<H: Hkdf>(
    hkdf: &H,
    version: &Version,
    dcid: &[u8],
    suite: &SuiteParams,
) -> Result<InitialKeys, Error> {
    check_inputs::<H>(version, dcid, suite)?;
    trace!(
        "deriving {} initial key pair, dcid_len={}",
        version.name,
        dcid.len()
    );

    let initial = initial_secret(hkdf, version, dcid)?;
    let client_secret = direction_secret(hkdf, version, &initial, Role::Client)?;
    let server_secret = direction_secret(hkdf, version, &initial, Role::Server)?;
    drop(initial);
    Ok(InitialKeys {
        client: packet_key_material(hkdf, version, &client_secret, suite)?,
        server: packet_key_material(hkdf, version, &server_secret, suite)?,
    })
}

/// Derive one endpoint's Initial key material.
///
/// Uses the built-in HKDF backend matching `suite.hash` and the default
/// protocol version ([`Version::DRAFT_14`]).
pub fn derive(dcid: &[u8], role: Role, suite: &SuiteParams) -> Result<KeyMaterial, Error> {
    derive_for_version(&Version::default(), dcid, role, suite)
}

/// Like [`derive`], for an explicit protocol version.
pub fn derive_for_version(
    version: &Version,
    dcid: &[u8],
    role: Role,
    suite: &SuiteParams,
) -> Result<KeyMaterial, Error> {
    match suite.hash {
        #[cfg(feature = "rustcrypto")]
        HashAlgorithm::Sha256 => {
            derive_with(&super::rustcrypto::HkdfSha256, version, dcid, role, suite)
        }
        #[cfg(feature = "rustcrypto")]
        HashAlgorithm::Sha384 => {
            derive_with(&super::rustcrypto::HkdfSha384, version, dcid, role, suite)
        }
        #[allow(unreachable_patterns)]
        _ => Err(Error::UnsupportedHash),
    }
}

/// Derive client and server Initial key material in one pass.
pub fn derive_pair(
    version: &Version,
    dcid: &[u8],
    suite: &SuiteParams,
) -> Result<InitialKeys, Error> {
    match suite.hash {
        #[cfg(feature = "rustcrypto")]
        HashAlgorithm::Sha256 => {
            derive_pair_with(&super::rustcrypto::HkdfSha256, version, dcid, suite)
        }
        #[cfg(feature = "rustcrypto")]
        HashAlgorithm::Sha384 => {
            derive_pair_with(&super::rustcrypto::HkdfSha384, version, dcid, suite)
        }
        #[allow(unreachable_patterns)]
        _ => Err(Error::UnsupportedHash),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::suite::TLS_AES_128_GCM_SHA256;
    use hex_literal::hex;

    /// HKDF stand-in that fails every call.
    struct FailingHkdf;

    impl Hkdf for FailingHkdf {
        const HASH: HashAlgorithm = HashAlgorithm::Sha256;
        const HASH_LEN: usize = 32;

        fn extract(&self, _salt: &[u8], _ikm: &[u8], _prk: &mut [u8]) -> Result<(), Error> {
            Err(Error::Crypto)
        }

        fn expand(&self, _prk: &[u8], _info: &[u8], _okm: &mut [u8]) -> Result<(), Error> {
            Err(Error::Crypto)
        }
    }

    /// HKDF stand-in that records the info strings it was asked to expand.
    struct RecordingHkdf {
        infos: core::cell::RefCell<std::vec::Vec<std::vec::Vec<u8>>>,
    }

    impl Hkdf for RecordingHkdf {
        const HASH: HashAlgorithm = HashAlgorithm::Sha256;
        const HASH_LEN: usize = 32;

        fn extract(&self, _salt: &[u8], _ikm: &[u8], prk: &mut [u8]) -> Result<(), Error> {
            prk.fill(0x11);
            Ok(())
        }

        fn expand(&self, _prk: &[u8], info: &[u8], okm: &mut [u8]) -> Result<(), Error> {
            self.infos.borrow_mut().push(info.to_vec());
            okm.fill(0x22);
            Ok(())
        }
    }

    /// HKDF stand-in whose expansions succeed until the `fail_at`-th call.
    struct FlakyHkdf {
        fail_at: usize,
        calls: core::cell::Cell<usize>,
    }

    impl Hkdf for FlakyHkdf {
        const HASH: HashAlgorithm = HashAlgorithm::Sha256;
        const HASH_LEN: usize = 32;

        fn extract(&self, _salt: &[u8], _ikm: &[u8], prk: &mut [u8]) -> Result<(), Error> {
            prk.fill(0x11);
            Ok(())
        }

        fn expand(&self, _prk: &[u8], _info: &[u8], okm: &mut [u8]) -> Result<(), Error> {
            let n = self.calls.get();
            self.calls.set(n + 1);
            if n == self.fail_at {
                return Err(Error::Crypto);
            }
            okm.fill(0x22);
            Ok(())
        }
    }

    /// Backend whose declared hash length disagrees with its hash function.
    struct MislabelledHkdf;

    impl Hkdf for MislabelledHkdf {
        const HASH: HashAlgorithm = HashAlgorithm::Sha256;
        const HASH_LEN: usize = 48;

        fn extract(&self, _salt: &[u8], _ikm: &[u8], prk: &mut [u8]) -> Result<(), Error> {
            prk.fill(0x11);
            Ok(())
        }

        fn expand(&self, _prk: &[u8], _info: &[u8], okm: &mut [u8]) -> Result<(), Error> {
            okm.fill(0x22);
            Ok(())
        }
    }

    #[test]
    fn stage_three_failure_yields_nothing() {
        // Expansion order: direction secret, key, iv, hp.
        for fail_at in 1..4 {
            let hkdf = FlakyHkdf {
                fail_at,
                calls: core::cell::Cell::new(0),
            };
            let result = derive_with(
                &hkdf,
                &Version::DRAFT_14,
                &hex!("8394c8f03e515708"),
                Role::Client,
                &TLS_AES_128_GCM_SHA256,
            );
            assert_eq!(result, Err(Error::Crypto), "failing expansion {fail_at}");
            assert_eq!(hkdf.calls.get(), fail_at + 1);
        }
    }

    #[test]
    fn pair_failure_in_server_keys_yields_nothing() {
        // Pair order: client in, server in, client key/iv/hp, server key/iv/hp.
        let hkdf = FlakyHkdf {
            fail_at: 7,
            calls: core::cell::Cell::new(0),
        };
        assert_eq!(
            derive_pair_with(&hkdf, &Version::V1, &[], &TLS_AES_128_GCM_SHA256),
            Err(Error::Crypto)
        );
    }

    #[test]
    fn hash_len_must_match_hash() {
        assert_eq!(
            derive_with(
                &MislabelledHkdf,
                &Version::V1,
                &[],
                Role::Client,
                &TLS_AES_128_GCM_SHA256
            ),
            Err(Error::HashMismatch)
        );
    }

    // ---- draft-14 known answers ----

    #[cfg(feature = "rustcrypto")]
    #[test]
    fn draft14_client_and_server_keys() {
        let dcid = hex!("8394c8f03e515708");

        let client = derive(&dcid, Role::Client, &TLS_AES_128_GCM_SHA256).unwrap();
        assert_eq!(client.key(), &hex!("f2928f2614ad6c20b9bd008e9c89631c"));
        assert_eq!(client.iv(), &hex!("ab950b0198637978cf44aab9"));
        assert_eq!(client.hp_key(), &hex!("68c3f64e2d6634412b8e3294628d76f1"));

        let server = derive(&dcid, Role::Server, &TLS_AES_128_GCM_SHA256).unwrap();
        assert_eq!(server.key(), &hex!("f56817d0fc595cfc0a2b0bcfb18735ec"));
        assert_eq!(server.iv(), &hex!("3205035a3c937c902ee4f4d6"));
        assert_eq!(server.hp_key(), &hex!("a313c86d1373ecbccb3294b14974226c"));
    }

    #[cfg(feature = "rustcrypto")]
    #[test]
    fn draft14_client_keys_06b858ec6f80452b() {
        let dcid = hex!("06b858ec6f80452b");
        let km = derive(&dcid, Role::Client, &TLS_AES_128_GCM_SHA256).unwrap();
        assert_eq!(km.key(), &hex!("a79943566c41342f2bc3de6b7c1539df"));
        assert_eq!(km.iv(), &hex!("84eb954ffe161c3875919f5f"));
        assert_eq!(km.hp_key(), &hex!("5c0f6472a15658047a3cc1f15478dcf4"));
    }

    #[test]
    fn primitive_failure_propagates() {
        let dcid = hex!("8394c8f03e515708");
        assert_eq!(
            derive_with(
                &FailingHkdf,
                &Version::DRAFT_14,
                &dcid,
                Role::Client,
                &TLS_AES_128_GCM_SHA256
            ),
            Err(Error::Crypto)
        );
    }

    #[test]
    fn expansion_labels_in_order() {
        let hkdf = RecordingHkdf {
            infos: Default::default(),
        };
        let km = derive_with(
            &hkdf,
            &Version::DRAFT_14,
            &[],
            Role::Server,
            &TLS_AES_128_GCM_SHA256,
        )
        .unwrap();
        assert_eq!(km.key(), &[0x22; 16]);

        let infos = hkdf.infos.borrow();
        assert_eq!(infos.len(), 4);
        assert_eq!(infos[0], b"\x00\x20\x0equic server in\x00");
        assert_eq!(infos[1], b"\x00\x10\x08quic key\x00");
        assert_eq!(infos[2], b"\x00\x0c\x07quic iv\x00");
        assert_eq!(infos[3], b"\x00\x10\x07quic pn\x00");
    }

    #[test]
    fn hash_mismatch_rejected() {
        let suite = SuiteParams {
            hash: HashAlgorithm::Sha384,
            ..TLS_AES_128_GCM_SHA256
        };
        assert_eq!(
            derive_with(&FailingHkdf, &Version::V1, &[], Role::Client, &suite),
            Err(Error::HashMismatch)
        );
    }

    #[cfg(feature = "rustcrypto")]
    #[test]
    fn cid_too_long() {
        let dcid = [0u8; 19];
        assert_eq!(
            derive(&dcid, Role::Client, &TLS_AES_128_GCM_SHA256),
            Err(Error::InvalidConnectionId { len: 19, max: 18 })
        );
        let v1 = derive_for_version(&Version::V1, &dcid, Role::Client, &TLS_AES_128_GCM_SHA256);
        assert!(v1.is_ok());
    }

    #[test]
    fn invalid_suite_checked_before_primitive() {
        let suite = SuiteParams {
            key_len: 0,
            ..TLS_AES_128_GCM_SHA256
        };
        // FailingHkdf would report Crypto if it were ever reached.
        assert_eq!(
            derive_with(&FailingHkdf, &Version::V1, &[], Role::Client, &suite),
            Err(Error::InvalidLength {
                requested: 0,
                max: 32
            })
        );
    }

    // ---- RFC 9001 Appendix A.1 ----

    #[cfg(feature = "rustcrypto")]
    #[test]
    fn initial_secrets_rfc9001_a1() {
        use crate::crypto::rustcrypto::HkdfSha256;

        let hkdf = HkdfSha256;
        let dcid = hex!("8394c8f03e515708");
        let initial = initial_secret(&hkdf, &Version::V1, &dcid).unwrap();
        assert_eq!(
            initial.as_slice(),
            hex!("7db5df06e7a69e432496adedb00851923595221596ae2ae9fb8115c1e9ed0a44")
        );

        let client = direction_secret(&hkdf, &Version::V1, &initial, Role::Client).unwrap();
        let server = direction_secret(&hkdf, &Version::V1, &initial, Role::Server).unwrap();
        assert_eq!(
            client.as_slice(),
            hex!("c00cf151ca5be075ed0ebfb5c80323c42d6b7db67881289af4008f1f6c357aea")
        );
        assert_eq!(
            server.as_slice(),
            hex!("3c199828fd139efd216c155ad844cc81fb82fa8d7446fa7d78be803acdda951b")
        );

        let km = packet_key_material(&hkdf, &Version::V1, &client, &TLS_AES_128_GCM_SHA256)
            .unwrap();
        assert_eq!(km.key(), &hex!("1f369613dd76d5467730efcbe3b1a22d"));
        assert_eq!(km.iv(), &hex!("fa044b2f42a3fd3b46fb255c"));
        assert_eq!(km.hp_key(), &hex!("9f50449e04a0e810283a1e9933adedd2"));
    }

    #[cfg(feature = "rustcrypto")]
    #[test]
    fn pair_matches_single_derivations() {
        let dcid = hex!("06b858ec6f80452b");
        let suite = TLS_AES_128_GCM_SHA256;
        let pair = derive_pair(&Version::DRAFT_14, &dcid, &suite).unwrap();

        assert_eq!(pair.client, derive(&dcid, Role::Client, &suite).unwrap());
        assert_eq!(pair.server, derive(&dcid, Role::Server, &suite).unwrap());
        assert_eq!(pair.local(Role::Client), &pair.client);
        assert_eq!(pair.remote(Role::Client), &pair.server);
        assert_eq!(pair.local(Role::Server), &pair.server);
    }

    #[cfg(feature = "rustcrypto")]
    #[test]
    fn sha384_suite_lengths() {
        use crate::crypto::suite::TLS_AES_256_GCM_SHA384;

        let km = derive(&hex!("8394c8f03e515708"), Role::Client, &TLS_AES_256_GCM_SHA384)
            .unwrap();
        assert_eq!(km.key().len(), 32);
        assert_eq!(km.iv().len(), 12);
        assert_eq!(km.hp_key().len(), 32);
    }
}
