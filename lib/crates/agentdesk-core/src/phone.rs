//! Spanish phone number normalisation.
//!
//! Input is cleaned, an optional country code is removed, and the remaining
//! nine-character national number is rendered as `+34 XXX XXX XXX`.

use crate::error::PhoneError;

/// Length of a Spanish national number.
pub const NATIONAL_LEN: usize = 9;

const COUNTRY_PREFIX: &str = "+34";
const INTERNATIONAL_PREFIX: &str = "0034";
const BARE_PREFIX: &str = "34";
const VALID_LEADING: [char; 4] = ['6', '7', '8', '9'];

/// Normalise `raw` to `+34 XXX XXX XXX`.
///
/// Steps, in order:
/// 1. trim, then drop every whitespace, `-`, `(` and `)` character
/// 2. strip a leading `+34`, else a leading `0034`, else a leading `34`
///    only when more than nine characters remain
/// 3. require exactly nine characters ([`PhoneError::InvalidLength`])
/// 4. require a leading 6, 7, 8 or 9 ([`PhoneError::InvalidPrefix`])
///
/// The length check always runs before the prefix check.
///
/// # Errors
///
/// Returns [`PhoneError`] when the cleaned number has the wrong length or
/// an invalid leading digit.
pub fn format_phone_number(raw: &str) -> Result<String, PhoneError> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '(' | ')'))
        .collect();

    let national = strip_country_code(&cleaned);
    let digits: Vec<char> = national.chars().collect();

    if digits.len() != NATIONAL_LEN {
        return Err(PhoneError::InvalidLength);
    }
    if !VALID_LEADING.contains(&digits[0]) {
        return Err(PhoneError::InvalidPrefix);
    }

    let group = |range: std::ops::Range<usize>| digits[range].iter().collect::<String>();
    Ok(format!(
        "{COUNTRY_PREFIX} {} {} {}",
        group(0..3),
        group(3..6),
        group(6..9)
    ))
}

/// A bare `34` is only treated as a country code when the number would
/// otherwise be too long, so a genuine nine-digit number starting with
/// `34` is left intact.
fn strip_country_code(cleaned: &str) -> &str {
    if let Some(rest) = cleaned.strip_prefix(COUNTRY_PREFIX) {
        rest
    } else if let Some(rest) = cleaned.strip_prefix(INTERNATIONAL_PREFIX) {
        rest
    } else if cleaned.chars().count() > NATIONAL_LEN
        && let Some(rest) = cleaned.strip_prefix(BARE_PREFIX)
    {
        rest
    } else {
        cleaned
    }
}
