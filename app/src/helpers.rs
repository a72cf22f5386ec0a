//! Small async and request helpers shared by callers of the services.

use std::future::Future;
use std::time::Duration;

use anyhow::Result;
use thiserror::Error;

use crate::domain::RetryConfig;

/// Fallback text when an error carries no usable message.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Ha ocurrido un error desconocido";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HelperError {
    #[error("El número máximo de intentos debe ser al menos 1")]
    InvalidMaxRetries,
}

/// Await `duration`.
pub async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}

/// Run `op` up to `policy.max_retries` times, sleeping `policy.delay()`
/// between failed attempts. Returns the first success or the last error.
///
/// # Errors
///
/// Returns [`HelperError::InvalidMaxRetries`] when `max_retries` is zero,
/// otherwise the error of the final attempt.
pub async fn retry<T, F, Fut>(mut op: F, policy: &RetryConfig) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    if policy.max_retries < 1 {
        return Err(HelperError::InvalidMaxRetries.into());
    }

    let mut attempt = 1;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt >= policy.max_retries => return Err(err),
            Err(err) => {
                tracing::warn!(
                    attempt,
                    max_retries = policy.max_retries,
                    error = %err,
                    "attempt failed, retrying"
                );
                sleep(policy.delay()).await;
                attempt += 1;
            }
        }
    }
}

/// Display text of `error`, or [`UNKNOWN_ERROR_MESSAGE`] when absent or blank.
#[must_use]
pub fn error_message(error: Option<&dyn std::error::Error>) -> String {
    error
        .map(ToString::to_string)
        .filter(|msg| !msg.is_empty())
        .unwrap_or_else(|| UNKNOWN_ERROR_MESSAGE.to_string())
}

/// Places a request handler can learn the caller's address from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IpSources<'a> {
    /// Peer ip as resolved by the framework.
    pub ip: Option<&'a str>,
    /// Raw socket remote address.
    pub remote_addr: Option<&'a str>,
    /// `X-Forwarded-For` header value.
    pub forwarded_for: Option<&'a str>,
}

/// Best-effort client address: the resolved peer ip, then the socket's
/// remote address, then the first `X-Forwarded-For` entry. Empty values are
/// skipped; returns an empty string when nothing is known.
#[must_use]
pub fn client_ip(sources: &IpSources<'_>) -> String {
    let first_forwarded = sources
        .forwarded_for
        .and_then(|v| v.split(',').next())
        .map(str::trim);
    [sources.ip, sources.remote_addr, first_forwarded]
        .into_iter()
        .flatten()
        .find(|candidate| !candidate.is_empty())
        .unwrap_or_default()
        .to_string()
}

/// `true` for finite even numbers. NaN and infinities are not even.
#[must_use]
pub fn is_even(num: f64) -> bool {
    num.is_finite() && num % 2.0 == 0.0
}

/// Complement of [`is_even`]: fractions, NaN and infinities count as odd.
#[must_use]
pub fn is_odd(num: f64) -> bool {
    !is_even(num)
}
