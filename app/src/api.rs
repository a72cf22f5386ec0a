//! JSON handler layer: session checks, response envelopes and status codes.
//!
//! Handlers are plain async functions over the ports, so any HTTP framework
//! can mount them. They never decide business rules; they only translate
//! caller input to service calls and service results to envelopes.

use agentdesk_core::{PriceError, PriceQuote, PriceRequest, format_age, format_date, quote_price};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::application::ports::{AgentStore, Clock, PasswordHasher, UserStore};
use crate::application::services::{agent_service, user_service};
use crate::domain::{
    Agent, AgentData, AgentError, AgentFilter, AgentStatistics, AppConfig, LoginRecord,
    ServiceError, UserError, is_valid_object_id,
};
use crate::helpers::{IpSources, client_ip};

/// Message of the 401 returned when email and password do not match.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

// ── Session ──────────────────────────────────────────────────────────────────

/// Caller identity established by [`login`] or an outer authentication layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: Option<String>,
}

impl Session {
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
        }
    }

    /// The authenticated user id.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Unauthenticated`] for an anonymous session.
    pub fn require_user(&self) -> Result<&str, ServiceError> {
        self.user_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or(ServiceError::Unauthenticated)
    }
}

// ── Envelopes ────────────────────────────────────────────────────────────────

fn iso_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Success envelope: `{ success: true, data, message, timestamp }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    pub message: String,
    pub timestamp: String,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self::with_message(data, "")
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: message.into(),
            timestamp: iso_now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    pub message: String,
    pub status_code: u16,
}

/// Failure envelope: `{ success: false, error: { message, statusCode }, timestamp }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorResponse {
    pub success: bool,
    pub error: ApiErrorBody,
    pub timestamp: String,
}

impl ApiErrorResponse {
    pub fn new(message: impl Into<String>, status_code: u16) -> Self {
        Self {
            success: false,
            error: ApiErrorBody {
                message: message.into(),
                status_code,
            },
            timestamp: iso_now(),
        }
    }

    /// Validation failure (status 400).
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(message, 400)
    }

    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.error.status_code
    }
}

impl From<ServiceError> for ApiErrorResponse {
    fn from(err: ServiceError) -> Self {
        let status = err.status_code();
        if err.is_validation() {
            tracing::debug!(error = %err, "request rejected");
        } else if status >= 500 {
            tracing::error!(error = %err, "request failed");
        }
        Self::new(err.to_string(), status)
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, ApiErrorResponse>;

// ── Views ────────────────────────────────────────────────────────────────────

/// Agent plus its age rendered for display (`"30 años"`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentView {
    #[serde(flatten)]
    pub agent: Agent,
    pub formatted_age: String,
}

impl From<Agent> for AgentView {
    fn from(agent: Agent) -> Self {
        let formatted_age = format_age(f64::from(agent.age));
        Self {
            agent,
            formatted_age,
        }
    }
}

/// Login record plus its date rendered in the configured locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginEntry {
    #[serde(flatten)]
    pub record: LoginRecord,
    pub formatted_date: String,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

fn optional_percent(body: &Value, key: &str, err: PriceError) -> Result<Option<f64>, PriceError> {
    match body.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value.as_f64().map(Some).ok_or(err),
    }
}

fn parse_price_request(body: &Value) -> Result<PriceRequest, PriceError> {
    let base_price = body
        .get("basePrice")
        .and_then(Value::as_f64)
        .ok_or(PriceError::InvalidBasePrice)?;
    Ok(PriceRequest {
        base_price,
        discount_percent: optional_percent(body, "discountPercent", PriceError::InvalidDiscount)?,
        tax_percent: optional_percent(body, "taxPercent", PriceError::InvalidTax)?,
    })
}

/// `POST /api/calculate/price` with body `{ basePrice, discountPercent?, taxPercent? }`.
///
/// # Errors
///
/// Returns a 400 envelope when `basePrice` is not a positive number or a
/// percentage is malformed.
pub fn price_quote(body: &Value) -> ApiResult<PriceQuote> {
    let quote = parse_price_request(body)
        .and_then(|request| quote_price(&request))
        .map_err(|err| ApiErrorResponse::bad_request(err.to_string()))?;
    Ok(ApiResponse::ok(quote))
}

/// `GET /api/agents/statistics` for the session user.
///
/// # Errors
///
/// Returns a 401 envelope for anonymous sessions, or the mapped service error.
pub async fn agent_statistics(
    store: &impl AgentStore,
    session: &Session,
) -> ApiResult<AgentStatistics> {
    let user_id = session.require_user()?;
    let stats = agent_service::get_agent_statistics(store, user_id).await?;
    Ok(ApiResponse::ok(stats))
}

/// The session user's agents with display ages.
///
/// # Errors
///
/// Returns a 401 envelope for anonymous sessions, or the mapped service error.
pub async fn list_agents(store: &impl AgentStore, session: &Session) -> ApiResult<Vec<AgentView>> {
    let user_id = session.require_user()?;
    let agents = agent_service::get_agents_by_owner(store, user_id).await?;
    Ok(ApiResponse::ok(agents.into_iter().map(AgentView::from).collect()))
}

/// Create an agent owned by the session user. `age` arrives as form text.
///
/// # Errors
///
/// Returns a 400 envelope on invalid fields (an anonymous session surfaces
/// as a missing owner), or the mapped service error.
pub async fn create_agent(
    store: &impl AgentStore,
    clock: &impl Clock,
    session: &Session,
    name: &str,
    age: Option<&str>,
) -> ApiResult<Agent> {
    let data = AgentData {
        name: name.to_string(),
        age: age.and_then(|raw| raw.trim().parse().ok()),
        owner: session.user_id.clone().unwrap_or_default(),
    };
    let agent = agent_service::create_agent(store, clock, data).await?;
    Ok(ApiResponse::with_message(agent, "Agente creado"))
}

/// Delete one of the session user's agents.
///
/// # Errors
///
/// Returns 400 for a malformed id, 403 when the agent belongs to another
/// user, 404 when it does not exist, or the mapped service error.
pub async fn delete_agent(
    store: &impl AgentStore,
    session: &Session,
    agent_id: &str,
) -> ApiResult<()> {
    let user_id = session.require_user()?;
    if !is_valid_object_id(agent_id) {
        return Err(ServiceError::from(AgentError::InvalidId).into());
    }
    if agent_service::delete_agent(store, agent_id, user_id).await? {
        return Ok(ApiResponse::with_message((), "Agente eliminado"));
    }

    let by_id = AgentFilter {
        id: Some(agent_id.to_string()),
        owner: None,
    };
    let exists = !store.find(&by_id).await.map_err(ServiceError::from)?.is_empty();
    let err = if exists {
        tracing::warn!(agent_id = %agent_id, user_id = %user_id, "delete of foreign agent refused");
        ServiceError::Forbidden
    } else {
        AgentError::NotFound.into()
    };
    Err(err.into())
}

/// Leading integer of `raw` after optional whitespace and sign
/// (`"5abc"` → 5, `"3.5"` → 3). `None` when no digit follows.
fn leading_int(raw: &str) -> Option<i64> {
    let raw = raw.trim_start();
    let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    let digits = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    if digits == 0 {
        return None;
    }
    let sign_len = raw.len() - unsigned.len();
    match raw[..sign_len + digits].parse::<i64>() {
        Ok(n) => Some(n),
        Err(_) if raw.starts_with('-') => Some(i64::MIN),
        Err(_) => Some(i64::MAX),
    }
}

/// Resolve the `?limit=` query from its leading integer. No integer or zero
/// falls back to the configured default; negative values are rejected.
fn history_limit(limit_query: Option<&str>, config: &AppConfig) -> Result<usize, ServiceError> {
    match limit_query.and_then(leading_int) {
        None | Some(0) => Ok(config.login_history_limit),
        Some(n) => usize::try_from(n).or_else(|_| {
            if n < 0 {
                Err(UserError::InvalidLimit.into())
            } else {
                Ok(usize::MAX)
            }
        }),
    }
}

/// `GET /api/user/login-history?limit=N` for the session user.
///
/// # Errors
///
/// Returns a 401 envelope for anonymous sessions, 400 for a negative limit,
/// 404 when the user no longer exists, or the mapped service error.
pub async fn login_history(
    users: &impl UserStore,
    session: &Session,
    limit_query: Option<&str>,
    config: &AppConfig,
) -> ApiResult<Vec<LoginEntry>> {
    let user_id = session.require_user()?;
    let limit = history_limit(limit_query, config)?;
    let locale = config.locale().unwrap_or_default();

    let history = user_service::get_login_history(users, user_id, limit).await?;
    let entries = history
        .into_iter()
        .map(|record| LoginEntry {
            formatted_date: format_date(&record.timestamp, locale),
            record,
        })
        .collect();
    Ok(ApiResponse::ok(entries))
}

/// `POST /api/login`: check credentials, record the login from the caller's
/// address and open a session for the user.
///
/// # Errors
///
/// Returns 400 for missing credentials or an invalid client address, 401
/// with [`INVALID_CREDENTIALS`] when email and password do not match, or the
/// mapped service error.
pub async fn login(
    users: &impl UserStore,
    hasher: &impl PasswordHasher,
    clock: &impl Clock,
    email: &str,
    password: &str,
    sources: &IpSources<'_>,
) -> ApiResult<Session> {
    let authenticated = user_service::authenticate_user(users, hasher, email, password).await?;
    let Some(user) = authenticated else {
        return Err(ApiErrorResponse::new(INVALID_CREDENTIALS, 401));
    };

    let ip = client_ip(sources);
    let user = user_service::record_login(users, clock, &user.id, &ip).await?;
    Ok(ApiResponse::with_message(Session::for_user(user.id), "Sesión iniciada"))
}
