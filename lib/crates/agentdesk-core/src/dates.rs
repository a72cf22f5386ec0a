//! Date inputs and locale-aware long-form rendering.
//!
//! [`DateInput`] lets formatters and calculators accept chrono values,
//! optional values, and loosely-typed strings alike. A value that cannot be
//! interpreted as a date yields `None` and callers treat it as invalid.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// Anything that may be interpreted as a point in time.
pub trait DateInput {
    /// Wall-clock value used for rendering.
    fn to_local(&self) -> Option<NaiveDateTime>;

    /// Absolute instant used for arithmetic. Naive values are taken as UTC.
    fn to_instant(&self) -> Option<DateTime<Utc>> {
        self.to_local().map(|naive| naive.and_utc())
    }
}

impl DateInput for NaiveDateTime {
    fn to_local(&self) -> Option<NaiveDateTime> {
        Some(*self)
    }
}

impl DateInput for NaiveDate {
    fn to_local(&self) -> Option<NaiveDateTime> {
        self.and_hms_opt(0, 0, 0)
    }
}

impl<Tz: TimeZone> DateInput for DateTime<Tz> {
    fn to_local(&self) -> Option<NaiveDateTime> {
        Some(self.naive_local())
    }

    fn to_instant(&self) -> Option<DateTime<Utc>> {
        Some(self.with_timezone(&Utc))
    }
}

impl DateInput for str {
    fn to_local(&self) -> Option<NaiveDateTime> {
        parse_date(self).map(|(local, _)| local)
    }

    fn to_instant(&self) -> Option<DateTime<Utc>> {
        parse_date(self).map(|(_, instant)| instant)
    }
}

impl DateInput for String {
    fn to_local(&self) -> Option<NaiveDateTime> {
        self.as_str().to_local()
    }

    fn to_instant(&self) -> Option<DateTime<Utc>> {
        self.as_str().to_instant()
    }
}

impl<T: DateInput + ?Sized> DateInput for &T {
    fn to_local(&self) -> Option<NaiveDateTime> {
        (**self).to_local()
    }

    fn to_instant(&self) -> Option<DateTime<Utc>> {
        (**self).to_instant()
    }
}

impl<T: DateInput> DateInput for Option<T> {
    fn to_local(&self) -> Option<NaiveDateTime> {
        self.as_ref().and_then(DateInput::to_local)
    }

    fn to_instant(&self) -> Option<DateTime<Utc>> {
        self.as_ref().and_then(DateInput::to_instant)
    }
}

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parses RFC 3339, ISO-like naive timestamps, or a bare `YYYY-MM-DD`.
/// Returns the wall-clock value together with the absolute instant.
fn parse_date(raw: &str) -> Option<(NaiveDateTime, DateTime<Utc>)> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some((dt.naive_local(), dt.with_timezone(&Utc)));
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some((naive, naive.and_utc()));
        }
    }
    let naive = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()?
        .and_hms_opt(0, 0, 0)?;
    Some((naive, naive.and_utc()))
}

// ── Locale ───────────────────────────────────────────────────────────────────

/// Supported rendering locales. `es-ES` is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "es-ES")]
    EsEs,
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "en-GB")]
    EnGb,
}

/// Returned by `Locale::from_str` for an unsupported tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported locale '{0}'. Supported: es-ES, en-US, en-GB")]
pub struct UnknownLocale(pub String);

impl Locale {
    pub const ALL: [Locale; 3] = [Locale::EsEs, Locale::EnUs, Locale::EnGb];

    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::EsEs => "es-ES",
            Self::EnUs => "en-US",
            Self::EnGb => "en-GB",
        }
    }

    fn month_name(self, month: u32) -> &'static str {
        const ES: [&str; 12] = [
            "enero",
            "febrero",
            "marzo",
            "abril",
            "mayo",
            "junio",
            "julio",
            "agosto",
            "septiembre",
            "octubre",
            "noviembre",
            "diciembre",
        ];
        const EN: [&str; 12] = [
            "January",
            "February",
            "March",
            "April",
            "May",
            "June",
            "July",
            "August",
            "September",
            "October",
            "November",
            "December",
        ];
        let idx = (month.clamp(1, 12) - 1) as usize;
        match self {
            Self::EsEs => ES[idx],
            Self::EnUs | Self::EnGb => EN[idx],
        }
    }

    /// Long date, e.g. `15 de enero de 2024` / `January 15, 2024`.
    pub(crate) fn long_date(self, date: &NaiveDateTime) -> String {
        let day = date.day();
        let month = self.month_name(date.month());
        let year = date.year();
        match self {
            Self::EsEs => format!("{day} de {month} de {year}"),
            Self::EnUs => format!("{month} {day}, {year}"),
            Self::EnGb => format!("{day} {month} {year}"),
        }
    }

    /// Long date followed by a two-digit time.
    pub(crate) fn long_date_time(self, date: &NaiveDateTime) -> String {
        let day_part = self.long_date(date);
        let (hour, minute) = (date.hour(), date.minute());
        match self {
            Self::EsEs => format!("{day_part}, {hour:02}:{minute:02}"),
            Self::EnGb => format!("{day_part} at {hour:02}:{minute:02}"),
            Self::EnUs => {
                let (pm, hour12) = date.hour12();
                let suffix = if pm { "PM" } else { "AM" };
                format!("{day_part} at {hour12:02}:{minute:02} {suffix}")
            }
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|locale| locale.tag().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownLocale(s.to_string()))
    }
}
