#![no_main]

use libfuzzer_sys::fuzz_target;
use quic_initial_keys::crypto::label::HkdfLabel;
use quic_initial_keys::{derive_for_version, HashAlgorithm, Role, SuiteParams, Version};

fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }

    // Label encoding: never panics, never truncates
    let split = data[0] as usize % data.len();
    let (label, context) = data[1..].split_at(split.min(data.len() - 1));
    if let Ok(info) = HkdfLabel::new(b"tls13 ", label, context, data[1] as usize) {
        assert_eq!(info.as_bytes().len(), 2 + 1 + 6 + label.len() + 1 + context.len());
    }

    // Derivation: either exact-length output or an error, never a panic
    let suite = SuiteParams {
        key_len: data[1] as usize % 40,
        iv_len: data[2] as usize % 40,
        hp_key_len: data[3] as usize % 40,
        hash: if data[0] & 1 == 0 {
            HashAlgorithm::Sha256
        } else {
            HashAlgorithm::Sha384
        },
    };
    let version = [Version::DRAFT_14, Version::V1, Version::V2][data[0] as usize % 3];
    let role = if data[0] & 2 == 0 { Role::Client } else { Role::Server };
    if let Ok(km) = derive_for_version(&version, &data[4..], role, &suite) {
        assert_eq!(km.key().len(), suite.key_len);
        assert_eq!(km.iv().len(), suite.iv_len);
        assert_eq!(km.hp_key().len(), suite.hp_key_len);
    }
});
