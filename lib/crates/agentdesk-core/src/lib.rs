//! Core business rules for agentdesk: validators, formatters, calculators and
//! the phone-number normaliser.
//!
//! Everything here is synchronous and free of I/O. Functions take data in and
//! return data out, so they are safe to call from any number of threads.

pub mod calculators;
pub mod dates;
pub mod error;
pub mod formatters;
pub mod phone;
pub mod validators;

pub use calculators::{
    DEFAULT_TAX_PERCENT, PriceQuote, PriceRequest, Sample, Statistics, calculate_average_age,
    calculate_average_age_value, calculate_days_between, calculate_percentage,
    calculate_price_with_discount, calculate_price_with_tax, calculate_price_with_tax_default,
    calculate_statistics, calculate_statistics_value, quote_price, round2,
};
pub use dates::{DateInput, Locale, UnknownLocale};
pub use error::{
    CoreError, DateError, ErrorKind, PercentageError, PhoneError, PriceError, SampleError,
};
pub use formatters::{
    escape_html, format_age, format_date, format_date_time, format_email, format_name,
    truncate_text, truncate_text_default,
};
pub use phone::format_phone_number;
pub use validators::{
    has_required_fields, is_valid_age, is_valid_age_in, is_valid_email, is_valid_ip,
    is_valid_name, is_valid_password,
};
