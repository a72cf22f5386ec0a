//! Typed error enums for the core functions.
//!
//! Every message is user-facing Spanish text and is asserted verbatim by
//! callers, so the strings below must not be reworded.

use thiserror::Error;

// ── Price errors ──────────────────────────────────────────────────────────────

/// Failures of the discount/tax price calculators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PriceError {
    #[error("El precio base debe ser un número positivo")]
    InvalidBasePrice,

    #[error("El porcentaje de descuento debe ser un número")]
    InvalidDiscount,

    #[error("El porcentaje de descuento debe estar entre 0 y 100")]
    DiscountOutOfRange,

    #[error("El porcentaje de impuesto debe ser un número positivo")]
    InvalidTax,
}

// ── Sample errors ─────────────────────────────────────────────────────────────

/// Failures of the aggregate calculators (average age, statistics).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SampleError {
    #[error("Se espera un array de edades")]
    AgesNotSequence,

    #[error("El array de edades no puede estar vacío")]
    AgesEmpty,

    #[error("No hay edades válidas en el array")]
    NoValidAges,

    #[error("Se espera un array de números")]
    NumbersNotSequence,

    #[error("El array no puede estar vacío")]
    NumbersEmpty,

    #[error("No hay números válidos en el array")]
    NoValidNumbers,
}

// ── Date errors ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("La fecha de inicio debe ser una fecha válida")]
    InvalidStart,

    #[error("La fecha de fin debe ser una fecha válida")]
    InvalidEnd,
}

// ── Percentage errors ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PercentageError {
    #[error("El valor debe ser un número positivo")]
    InvalidValue,

    #[error("El total debe ser un número positivo mayor que cero")]
    InvalidTotal,

    #[error("El valor no puede ser mayor que el total")]
    ValueExceedsTotal,
}

// ── Phone errors ──────────────────────────────────────────────────────────────

/// Failures of [`crate::phone::format_phone_number`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PhoneError {
    #[error("El número de teléfono debe tener 9 dígitos")]
    InvalidLength,

    // The missing accent matches the message users have always seen.
    #[error("El número de telefono debe empezar por 6, 7, 8 o 9")]
    InvalidPrefix,
}

// ── Unified core error ────────────────────────────────────────────────────────

/// Any failure raised by the core, for callers that compose several
/// calculators and want a single error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error(transparent)]
    Price(#[from] PriceError),

    #[error(transparent)]
    Sample(#[from] SampleError),

    #[error(transparent)]
    Date(#[from] DateError),

    #[error(transparent)]
    Percentage(#[from] PercentageError),

    #[error(transparent)]
    Phone(#[from] PhoneError),
}

/// Closed classification of core failures, independent of message wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidPrice,
    InvalidPercent,
    PercentRange,
    TypeMismatch,
    EmptyInput,
    NoValidData,
    InvalidDate,
    InvalidValue,
    InvalidTotal,
    ValueExceedsTotal,
    InvalidLength,
    InvalidPrefix,
}

impl CoreError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Price(PriceError::InvalidBasePrice) => ErrorKind::InvalidPrice,
            Self::Price(PriceError::InvalidDiscount | PriceError::InvalidTax) => {
                ErrorKind::InvalidPercent
            }
            Self::Price(PriceError::DiscountOutOfRange) => ErrorKind::PercentRange,
            Self::Sample(SampleError::AgesNotSequence | SampleError::NumbersNotSequence) => {
                ErrorKind::TypeMismatch
            }
            Self::Sample(SampleError::AgesEmpty | SampleError::NumbersEmpty) => {
                ErrorKind::EmptyInput
            }
            Self::Sample(SampleError::NoValidAges | SampleError::NoValidNumbers) => {
                ErrorKind::NoValidData
            }
            Self::Date(_) => ErrorKind::InvalidDate,
            Self::Percentage(PercentageError::InvalidValue) => ErrorKind::InvalidValue,
            Self::Percentage(PercentageError::InvalidTotal) => ErrorKind::InvalidTotal,
            Self::Percentage(PercentageError::ValueExceedsTotal) => ErrorKind::ValueExceedsTotal,
            Self::Phone(PhoneError::InvalidLength) => ErrorKind::InvalidLength,
            Self::Phone(PhoneError::InvalidPrefix) => ErrorKind::InvalidPrefix,
        }
    }
}
