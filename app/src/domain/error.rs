//! Typed service error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::application`,
//! or `tokio`. Messages are user-facing Spanish text and are surfaced
//! unchanged to callers.

use agentdesk_core::CoreError;
use thiserror::Error;

// ── Agent errors ──────────────────────────────────────────────────────────────

/// Errors raised by the agent use-cases.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AgentError {
    #[error("El nombre del agente no es válido")]
    InvalidName,

    #[error("La edad del agente debe estar entre 18 y 130 años")]
    InvalidAge,

    #[error("El agente debe tener un propietario")]
    MissingOwner,

    #[error("Se requiere un ID de usuario")]
    MissingUserId,

    #[error("Se requieren tanto el ID del agente como el ID del usuario")]
    MissingIds,

    #[error("El ID del agente no es válido")]
    InvalidId,

    #[error("Agente no encontrado")]
    NotFound,
}

// ── User errors ───────────────────────────────────────────────────────────────

/// Errors raised by the user use-cases.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserError {
    #[error("El email no tiene un formato válido")]
    InvalidEmail,

    #[error(
        "La contraseña debe tener al menos 8 caracteres, una mayúscula, una minúscula y un número"
    )]
    WeakPassword,

    #[error("Ya existe un usuario con ese email")]
    AlreadyExists,

    #[error("Se requieren email y contraseña")]
    MissingCredentials,

    #[error("Se requiere un ID de usuario")]
    MissingUserId,

    #[error("La dirección IP no es válida")]
    InvalidIp,

    #[error("Usuario no encontrado")]
    NotFound,

    #[error("El límite debe ser un número positivo")]
    InvalidLimit,
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Unsupported locale: {0}\n\nValid locales: es-ES, en-US, en-GB")]
    UnknownLocale(String),

    #[error("Invalid value for {key}: must be at least 1")]
    NotPositive { key: &'static str },
}

// ── Service error ─────────────────────────────────────────────────────────────

/// Everything a service call can fail with.
///
/// Validation variants carry their original message; persistence failures
/// keep the underlying `anyhow` chain.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Agent(#[from] AgentError),

    #[error(transparent)]
    User(#[from] UserError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Usuario no autenticado")]
    Unauthenticated,

    #[error("No tienes permiso para acceder a este recurso")]
    Forbidden,

    #[error(transparent)]
    Persistence(#[from] anyhow::Error),
}

impl ServiceError {
    /// HTTP status an outer layer should answer with.
    ///
    /// Validation → 400, unauthenticated → 401, ownership mismatch → 403,
    /// missing entity → 404, persistence → 500.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Agent(AgentError::NotFound) | Self::User(UserError::NotFound) => 404,
            Self::Agent(_) | Self::User(_) | Self::Core(_) => 400,
            Self::Unauthenticated => 401,
            Self::Forbidden => 403,
            Self::Persistence(_) => 500,
        }
    }

    /// `true` for errors caused by caller input rather than the system.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        self.status_code() == 400
    }
}
