//! Document identifiers: 24 lowercase hex characters, timestamp first.

use std::sync::LazyLock;

use regex::Regex;

static OBJECT_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Safety: this is a compile-time constant pattern, cannot fail.
    #[allow(clippy::expect_used)]
    Regex::new(r"^[0-9a-fA-F]{24}$").expect("valid regex")
});

/// Returns `true` if `id` is exactly 24 hexadecimal characters.
pub fn is_valid_object_id(id: &str) -> bool {
    OBJECT_ID_RE.is_match(id)
}

/// Generate a new identifier: 8 hex chars of Unix seconds followed by 16
/// random hex chars.
#[must_use]
pub fn generate_object_id() -> String {
    use std::collections::hash_map::RandomState;
    use std::hash::{BuildHasher, Hasher};

    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();

    let mut hasher = RandomState::new().build_hasher();
    hasher.write_u128(now.as_nanos());
    hasher.write_u64(RandomState::new().build_hasher().finish());

    #[allow(clippy::cast_possible_truncation)]
    let seconds = now.as_secs() as u32;
    format!("{seconds:08x}{:016x}", hasher.finish())
}
