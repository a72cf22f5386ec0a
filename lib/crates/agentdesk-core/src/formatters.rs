//! Pure text transforms for names, emails, dates, ages and HTML.
//!
//! None of these fail: an input that cannot be formatted yields `""`.

use crate::dates::{DateInput, Locale};

/// Default cut-off used by [`truncate_text_default`].
pub const DEFAULT_TRUNCATE_LEN: usize = 50;

/// Capitalises each whitespace-separated word and joins them with single
/// spaces: `"  joHN   doe "` → `"John Doe"`.
pub fn format_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Trims and lowercases an email address.
pub fn format_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Long-form date in the given locale, or `""` for an invalid date.
pub fn format_date(date: &(impl DateInput + ?Sized), locale: Locale) -> String {
    date.to_local()
        .map(|local| locale.long_date(&local))
        .unwrap_or_default()
}

/// Long-form date and `HH:MM` time in the given locale, or `""` for an
/// invalid date.
pub fn format_date_time(date: &(impl DateInput + ?Sized), locale: Locale) -> String {
    date.to_local()
        .map(|local| locale.long_date_time(&local))
        .unwrap_or_default()
}

/// `"1 año"` for exactly one, `"<n> años"` otherwise; `""` for NaN.
pub fn format_age(age: f64) -> String {
    if age.is_nan() {
        return String::new();
    }
    #[allow(clippy::float_cmp)]
    let unit = if age == 1.0 { "año" } else { "años" };
    format!("{age} {unit}")
}

/// Replaces `& < > " '` with their HTML entities in a single scan.
///
/// Output of one pass is never re-scanned, so `&amp;` becomes `&amp;amp;`
/// exactly once rather than being mangled further.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            other => out.push(other),
        }
    }
    out
}

/// Returns `text` unchanged when it fits in `max_len` characters, otherwise
/// its first `max_len` characters followed by `...`.
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_len).collect();
    out.push_str("...");
    out
}

/// [`truncate_text`] with the default 50-character limit.
pub fn truncate_text_default(text: &str) -> String {
    truncate_text(text, DEFAULT_TRUNCATE_LEN)
}
