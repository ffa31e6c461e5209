mod service_tests;

use std::sync::OnceLock;

use super::{generate_keypair, Es512KeyPair};

/// Fixed reference time for claim checks
pub(super) const NOW: i64 = 1_700_000_000;

/// P-521 key generation is slow in debug builds, so tests share two keys
pub(super) fn primary_keypair() -> &'static Es512KeyPair {
    static KEY: OnceLock<Es512KeyPair> = OnceLock::new();
    KEY.get_or_init(|| generate_keypair().unwrap())
}

pub(super) fn other_keypair() -> &'static Es512KeyPair {
    static KEY: OnceLock<Es512KeyPair> = OnceLock::new();
    KEY.get_or_init(|| generate_keypair().unwrap())
}
