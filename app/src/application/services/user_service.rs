//! Application service: user sign-up, authentication and login tracking.
//!
//! Imports only from `crate::domain`, `crate::application::ports` and
//! `agentdesk_core`. Emails are normalised before every lookup.

use agentdesk_core::{format_email, is_valid_email, is_valid_ip, is_valid_password};

use crate::application::ports::{Clock, PasswordHasher, UserStore};
use crate::domain::{
    LoginRecord, NewUser, ServiceError, User, UserCredentials, UserError, UserStatistics,
};

/// Register a new user.
///
/// Steps:
/// 1. Validate email, then password strength
/// 2. Normalise the email and reject duplicates
/// 3. Hash the password and insert
///
/// # Errors
///
/// Returns [`UserError`] on invalid input or a taken email, or a persistence
/// error if the store or hasher fails.
pub async fn create_user(
    users: &impl UserStore,
    hasher: &impl PasswordHasher,
    clock: &impl Clock,
    credentials: UserCredentials,
) -> Result<User, ServiceError> {
    if !is_valid_email(&credentials.email) {
        return Err(UserError::InvalidEmail.into());
    }
    if !is_valid_password(&credentials.password) {
        return Err(UserError::WeakPassword.into());
    }

    let email = format_email(&credentials.email);
    if users.find_one_by_email(&email).await?.is_some() {
        return Err(UserError::AlreadyExists.into());
    }

    let password_hash = hasher.hash(&credentials.password)?;
    let user = users
        .insert(NewUser {
            email,
            password_hash,
            created: clock.now(),
        })
        .await?;

    tracing::info!(user_id = %user.id, "user created");
    Ok(user)
}

/// Check credentials. Returns `None` for an unknown email or a wrong password.
///
/// # Errors
///
/// Returns [`UserError::MissingCredentials`] if either field is empty, or a
/// persistence error if the store or hasher fails.
pub async fn authenticate_user(
    users: &impl UserStore,
    hasher: &impl PasswordHasher,
    email: &str,
    password: &str,
) -> Result<Option<User>, ServiceError> {
    if email.is_empty() || password.is_empty() {
        return Err(UserError::MissingCredentials.into());
    }

    let email = format_email(email);
    let Some(user) = users.find_one_by_email(&email).await? else {
        tracing::warn!(email = %email, "authentication failed: unknown email");
        return Ok(None);
    };
    if !hasher.verify(password, &user.password_hash)? {
        tracing::warn!(user_id = %user.id, "authentication failed: wrong password");
        return Ok(None);
    }

    tracing::debug!(user_id = %user.id, "user authenticated");
    Ok(Some(user))
}

/// Append a login record stamped with the current time.
///
/// # Errors
///
/// Returns [`UserError::MissingUserId`], [`UserError::InvalidIp`] or
/// [`UserError::NotFound`] (checked in that order), or a persistence error.
pub async fn record_login(
    users: &impl UserStore,
    clock: &impl Clock,
    user_id: &str,
    ip: &str,
) -> Result<User, ServiceError> {
    if user_id.is_empty() {
        return Err(UserError::MissingUserId.into());
    }
    if !is_valid_ip(ip) {
        return Err(UserError::InvalidIp.into());
    }

    let mut user = find_user(users, user_id).await?;
    user.add_login_record(ip, clock.now());
    let user = users.save(&user).await?;

    tracing::info!(user_id = %user.id, ip = %ip, "login recorded");
    Ok(user)
}

/// At most `limit` login records, newest first.
///
/// # Errors
///
/// Returns [`UserError::MissingUserId`], [`UserError::InvalidLimit`] (for a
/// zero limit) or [`UserError::NotFound`], or a persistence error.
pub async fn get_login_history(
    users: &impl UserStore,
    user_id: &str,
    limit: usize,
) -> Result<Vec<LoginRecord>, ServiceError> {
    if user_id.is_empty() {
        return Err(UserError::MissingUserId.into());
    }
    if limit < 1 {
        return Err(UserError::InvalidLimit.into());
    }

    let user = find_user(users, user_id).await?;
    Ok(user.recent_logins(limit))
}

/// Email, login count and most recent login of one user.
///
/// # Errors
///
/// Returns [`UserError::MissingUserId`] or [`UserError::NotFound`], or a
/// persistence error.
pub async fn get_user_statistics(
    users: &impl UserStore,
    user_id: &str,
) -> Result<UserStatistics, ServiceError> {
    if user_id.is_empty() {
        return Err(UserError::MissingUserId.into());
    }
    let user = find_user(users, user_id).await?;
    Ok(UserStatistics {
        total_logins: user.login_records.len(),
        last_login: user.last_login(),
        email: user.email,
    })
}

/// Whether `email` (after normalisation) is already registered.
///
/// # Errors
///
/// Returns [`UserError::InvalidEmail`] for a malformed address, or a
/// persistence error.
pub async fn email_exists(users: &impl UserStore, email: &str) -> Result<bool, ServiceError> {
    if !is_valid_email(email) {
        return Err(UserError::InvalidEmail.into());
    }
    let found = users.find_one_by_email(&format_email(email)).await?;
    Ok(found.is_some())
}

async fn find_user(users: &impl UserStore, user_id: &str) -> Result<User, ServiceError> {
    let user = users.find_by_id(user_id).await?;
    tracing::debug!(user_id = %user_id, found = user.is_some(), "user lookup");
    user.ok_or_else(|| UserError::NotFound.into())
}
