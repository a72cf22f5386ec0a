//! Pure input predicates with no I/O, no async, never fail.
//!
//! Each function answers "is this input acceptable" with a plain `bool`.
//! Callers decide which error to raise.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// Default lower bound accepted by [`is_valid_age`].
pub const MIN_AGE: f64 = 18.0;
/// Default upper bound accepted by [`is_valid_age`].
pub const MAX_AGE: f64 = 130.0;
/// Longest accepted name, in characters, after trimming.
pub const MAX_NAME_LEN: usize = 100;
/// Shortest accepted password, in characters.
pub const MIN_PASSWORD_LEN: usize = 8;

pub static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Safety: this is a compile-time constant pattern, cannot fail.
    #[allow(clippy::expect_used)]
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex")
});

pub static NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^[a-zA-ZÀ-ÿ\s'-]+$").expect("valid regex")
});

pub static IPV4_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^([0-9]{1,3}\.){3}[0-9]{1,3}$").expect("valid regex")
});

/// Returns `true` if the trimmed input looks like `local@domain.tld`.
pub fn is_valid_email(email: &str) -> bool {
    if email.is_empty() {
        return false;
    }
    EMAIL_RE.is_match(email.trim())
}

/// Returns `true` if `password` has at least 8 characters including one
/// uppercase letter, one lowercase letter and one digit, in any position.
pub fn is_valid_password(password: &str) -> bool {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return false;
    }

    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    has_upper && has_lower && has_digit
}

/// Returns `true` if `age` lies in `[18, 130]`.
pub fn is_valid_age(age: f64) -> bool {
    is_valid_age_in(age, MIN_AGE, MAX_AGE)
}

/// Returns `true` if `age` is finite and lies in `[min, max]` inclusive.
pub fn is_valid_age_in(age: f64, min: f64, max: f64) -> bool {
    if !age.is_finite() {
        return false;
    }
    age >= min && age <= max
}

/// Returns `true` if the trimmed name is 1–100 characters made only of
/// letters (accented Latin included), whitespace, apostrophes and hyphens.
pub fn is_valid_name(name: &str) -> bool {
    let trimmed = name.trim();
    let len = trimmed.chars().count();
    if len == 0 || len > MAX_NAME_LEN {
        return false;
    }
    NAME_RE.is_match(trimmed)
}

/// Returns `true` for a dotted-quad IPv4 address with every octet in 0–255.
pub fn is_valid_ip(ip: &str) -> bool {
    if !IPV4_RE.is_match(ip) {
        return false;
    }
    ip.split('.')
        .all(|part| part.parse::<u16>().is_ok_and(|octet| octet <= 255))
}

/// Returns `true` if `obj` is a JSON object where every named field exists
/// and is not `null`.
pub fn has_required_fields(obj: &Value, fields: &[&str]) -> bool {
    let Some(map) = obj.as_object() else {
        return false;
    };
    fields
        .iter()
        .all(|field| map.get(*field).is_some_and(|v| !v.is_null()))
}
