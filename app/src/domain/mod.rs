//! Domain layer: entities, typed errors and configuration schema.
//!
//! This module has zero imports from `crate::infra`, `crate::application`,
//! `tokio`, `std::fs` or `std::net`. Business rules on primitive values live
//! in `agentdesk_core`; this layer only shapes the entities they apply to.

pub mod agent;
pub mod config;
pub mod error;
pub mod id;
pub mod user;

pub use agent::{
    Agent, AgentChanges, AgentData, AgentFilter, AgentStatistics, AgentSummary, AgentUpdate,
    DeleteResult, NewAgent,
};
pub use config::{AppConfig, RetryConfig};
pub use error::{AgentError, ConfigError, ServiceError, UserError};
pub use id::{generate_object_id, is_valid_object_id};
pub use user::{
    DEFAULT_HISTORY_LIMIT, LoginRecord, NewUser, User, UserCredentials, UserStatistics,
};
