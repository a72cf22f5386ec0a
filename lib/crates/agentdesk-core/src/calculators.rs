//! Numeric pipelines: prices, averages, statistics, day counts, percentages.
//!
//! All results are rounded to two decimals with [`round2`] unless noted.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dates::DateInput;
use crate::error::{DateError, PercentageError, PriceError, SampleError};

/// Tax applied by [`calculate_price_with_tax_default`] (Spanish VAT).
pub const DEFAULT_TAX_PERCENT: f64 = 21.0;

const MILLIS_PER_DAY: f64 = 1000.0 * 60.0 * 60.0 * 24.0;

/// Round to cents, halves rounding up.
#[must_use]
pub fn round2(x: f64) -> f64 {
    (x * 100.0 + 0.5).floor() / 100.0
}

// ── Sample values ────────────────────────────────────────────────────────────

/// An element of a loosely-typed numeric sample.
///
/// Entries that are not numbers (`None`, JSON strings, `null`, ...) report
/// `None` and are skipped by the aggregate calculators.
pub trait Sample {
    fn numeric(&self) -> Option<f64>;
}

impl Sample for f64 {
    fn numeric(&self) -> Option<f64> {
        Some(*self)
    }
}

macro_rules! lossless_sample {
    ($($t:ty),*) => {
        $(impl Sample for $t {
            fn numeric(&self) -> Option<f64> {
                Some(f64::from(*self))
            }
        })*
    };
}

lossless_sample!(f32, i8, i16, i32, u8, u16, u32);

impl Sample for i64 {
    #[allow(clippy::cast_precision_loss)]
    fn numeric(&self) -> Option<f64> {
        Some(*self as f64)
    }
}

impl Sample for u64 {
    #[allow(clippy::cast_precision_loss)]
    fn numeric(&self) -> Option<f64> {
        Some(*self as f64)
    }
}

impl Sample for Value {
    fn numeric(&self) -> Option<f64> {
        match self {
            Value::Number(n) => n.as_f64(),
            _ => None,
        }
    }
}

impl<T: Sample> Sample for Option<T> {
    fn numeric(&self) -> Option<f64> {
        self.as_ref().and_then(Sample::numeric)
    }
}

impl<T: Sample + ?Sized> Sample for &T {
    fn numeric(&self) -> Option<f64> {
        (**self).numeric()
    }
}

#[allow(clippy::cast_precision_loss)]
fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

// ── Prices ───────────────────────────────────────────────────────────────────

fn check_base_price(base_price: f64) -> Result<(), PriceError> {
    if !base_price.is_finite() || base_price < 0.0 {
        return Err(PriceError::InvalidBasePrice);
    }
    Ok(())
}

fn apply_discount(base_price: f64, discount_percent: f64) -> Result<f64, PriceError> {
    check_base_price(base_price)?;
    if !discount_percent.is_finite() {
        return Err(PriceError::InvalidDiscount);
    }
    if !(0.0..=100.0).contains(&discount_percent) {
        return Err(PriceError::DiscountOutOfRange);
    }
    let discount = base_price * (discount_percent / 100.0);
    Ok(base_price - discount)
}

fn apply_tax(base_price: f64, tax_percent: f64) -> Result<f64, PriceError> {
    check_base_price(base_price)?;
    if !tax_percent.is_finite() || tax_percent < 0.0 {
        return Err(PriceError::InvalidTax);
    }
    let tax = base_price * (tax_percent / 100.0);
    Ok(base_price + tax)
}

/// Price after removing `discount_percent` (0–100) percent.
///
/// # Errors
///
/// Fails if the base price is negative or not finite, if the discount is not
/// finite, or if it lies outside `[0, 100]`.
pub fn calculate_price_with_discount(
    base_price: f64,
    discount_percent: f64,
) -> Result<f64, PriceError> {
    apply_discount(base_price, discount_percent).map(round2)
}

/// Price after adding `tax_percent` percent. There is no upper bound.
///
/// # Errors
///
/// Fails if the base price is negative or not finite, or if the tax is
/// negative or not finite.
pub fn calculate_price_with_tax(base_price: f64, tax_percent: f64) -> Result<f64, PriceError> {
    apply_tax(base_price, tax_percent).map(round2)
}

/// [`calculate_price_with_tax`] at [`DEFAULT_TAX_PERCENT`].
pub fn calculate_price_with_tax_default(base_price: f64) -> Result<f64, PriceError> {
    calculate_price_with_tax(base_price, DEFAULT_TAX_PERCENT)
}

/// Input of the combined price pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRequest {
    pub base_price: f64,
    #[serde(default)]
    pub discount_percent: Option<f64>,
    #[serde(default)]
    pub tax_percent: Option<f64>,
}

/// Result of the combined price pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    pub base_price: f64,
    pub discount_percent: f64,
    pub discount_amount: f64,
    pub tax_percent: f64,
    pub tax_amount: f64,
    pub final_price: f64,
}

/// Apply the optional discount, then the optional tax on the discounted
/// amount, and round once at the end.
///
/// Unlike the single-step calculators, a zero base price is rejected here.
///
/// # Errors
///
/// Fails with [`PriceError::InvalidBasePrice`] unless the base price is a
/// finite number greater than zero, and with the discount/tax errors of the
/// single-step calculators.
pub fn quote_price(request: &PriceRequest) -> Result<PriceQuote, PriceError> {
    let base_price = request.base_price;
    if !base_price.is_finite() || base_price <= 0.0 {
        return Err(PriceError::InvalidBasePrice);
    }

    let discounted = match request.discount_percent {
        Some(pct) => apply_discount(base_price, pct)?,
        None => base_price,
    };
    let taxed = match request.tax_percent {
        Some(pct) => apply_tax(discounted, pct)?,
        None => discounted,
    };

    Ok(PriceQuote {
        base_price,
        discount_percent: request.discount_percent.unwrap_or(0.0),
        discount_amount: round2(base_price - discounted),
        tax_percent: request.tax_percent.unwrap_or(0.0),
        tax_amount: round2(taxed - discounted),
        final_price: round2(taxed),
    })
}

// ── Aggregates ───────────────────────────────────────────────────────────────

/// Mean of the positive numeric entries of `ages`, rounded to cents.
///
/// Non-numeric, NaN, zero and negative entries are ignored.
///
/// # Errors
///
/// Fails when `ages` is empty or contains no usable entry.
pub fn calculate_average_age<T: Sample>(ages: &[T]) -> Result<f64, SampleError> {
    if ages.is_empty() {
        return Err(SampleError::AgesEmpty);
    }
    let valid: Vec<f64> = ages
        .iter()
        .filter_map(|entry| entry.numeric())
        .filter(|age| !age.is_nan() && *age > 0.0)
        .collect();
    if valid.is_empty() {
        return Err(SampleError::NoValidAges);
    }
    Ok(round2(mean(&valid)))
}

/// [`calculate_average_age`] over an untyped JSON value.
///
/// # Errors
///
/// Fails with [`SampleError::AgesNotSequence`] unless `ages` is an array.
pub fn calculate_average_age_value(ages: &Value) -> Result<f64, SampleError> {
    let items = ages.as_array().ok_or(SampleError::AgesNotSequence)?;
    calculate_average_age(items.as_slice())
}

/// Summary of a numeric sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Statistics {
    pub min: f64,
    pub max: f64,
    pub average: f64,
    pub sum: f64,
    pub count: usize,
}

/// Min, max, rounded mean, sum and count of the numeric entries of
/// `numbers`. Zero and negative values are kept; NaN and non-numbers are
/// skipped.
///
/// # Errors
///
/// Fails when `numbers` is empty or contains no numeric entry.
pub fn calculate_statistics<T: Sample>(numbers: &[T]) -> Result<Statistics, SampleError> {
    if numbers.is_empty() {
        return Err(SampleError::NumbersEmpty);
    }
    let valid: Vec<f64> = numbers
        .iter()
        .filter_map(|entry| entry.numeric())
        .filter(|n| !n.is_nan())
        .collect();
    if valid.is_empty() {
        return Err(SampleError::NoValidNumbers);
    }

    let min = valid.iter().copied().fold(f64::INFINITY, f64::min);
    let max = valid.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Ok(Statistics {
        min,
        max,
        average: round2(mean(&valid)),
        sum: valid.iter().sum(),
        count: valid.len(),
    })
}

/// [`calculate_statistics`] over an untyped JSON value.
///
/// # Errors
///
/// Fails with [`SampleError::NumbersNotSequence`] unless `numbers` is an
/// array.
pub fn calculate_statistics_value(numbers: &Value) -> Result<Statistics, SampleError> {
    let items = numbers.as_array().ok_or(SampleError::NumbersNotSequence)?;
    calculate_statistics(items.as_slice())
}

// ── Dates ────────────────────────────────────────────────────────────────────

/// Whole days between two instants, rounded up. Argument order does not
/// affect the result.
///
/// # Errors
///
/// Fails when either argument is not a valid date.
pub fn calculate_days_between(
    start: &(impl DateInput + ?Sized),
    end: &(impl DateInput + ?Sized),
) -> Result<i64, DateError> {
    let start = start.to_instant().ok_or(DateError::InvalidStart)?;
    let end = end.to_instant().ok_or(DateError::InvalidEnd)?;

    #[allow(clippy::cast_precision_loss)]
    let diff_ms = (end - start).num_milliseconds().abs() as f64;
    #[allow(clippy::cast_possible_truncation)]
    let days = (diff_ms / MILLIS_PER_DAY).ceil() as i64;
    Ok(days)
}

// ── Percentages ──────────────────────────────────────────────────────────────

/// `value` as a percentage of `total`, rounded to cents.
///
/// # Errors
///
/// Fails unless `0 <= value <= total` and `total > 0`, all finite.
pub fn calculate_percentage(value: f64, total: f64) -> Result<f64, PercentageError> {
    if !value.is_finite() || value < 0.0 {
        return Err(PercentageError::InvalidValue);
    }
    if !total.is_finite() || total <= 0.0 {
        return Err(PercentageError::InvalidTotal);
    }
    if value > total {
        return Err(PercentageError::ValueExceedsTotal);
    }
    Ok(round2(value / total * 100.0))
}
