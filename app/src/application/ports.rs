//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`.

use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::domain::{
    Agent, AgentChanges, AgentFilter, AppConfig, DeleteResult, NewAgent, NewUser, User,
};

// ── Persistence Ports ─────────────────────────────────────────────────────────

/// Document-store access for agents.
#[allow(async_fn_in_trait)]
pub trait AgentStore {
    /// Every agent matching `filter`, in insertion order.
    async fn find(&self, filter: &AgentFilter) -> Result<Vec<Agent>>;
    /// Insert a new agent and return it with its assigned id.
    async fn save(&self, agent: NewAgent) -> Result<Agent>;
    /// Delete at most one agent matching `filter`.
    async fn delete_one(&self, filter: &AgentFilter) -> Result<DeleteResult>;
    /// Apply `changes` to the first agent matching `filter` and return the
    /// updated document, or `None` if nothing matched.
    async fn find_one_and_update(
        &self,
        filter: &AgentFilter,
        changes: &AgentChanges,
    ) -> Result<Option<Agent>>;
}

/// Document-store access for users.
#[allow(async_fn_in_trait)]
pub trait UserStore {
    /// Look a user up by normalised email.
    async fn find_one_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>>;
    /// Insert a new user and return it with its assigned id.
    async fn insert(&self, user: NewUser) -> Result<User>;
    /// Persist an existing user, replacing the stored document.
    async fn save(&self, user: &User) -> Result<User>;
}

// ── Credential Port ───────────────────────────────────────────────────────────

/// One-way password hashing. Sync trait, no async needed.
pub trait PasswordHasher {
    /// Hash a clear-text password for storage.
    fn hash(&self, password: &str) -> Result<String>;
    /// Check a clear-text password against a stored hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool>;
}

// ── Config Port ───────────────────────────────────────────────────────────────

/// Persistent configuration storage. Sync trait; config files are small.
pub trait ConfigStore {
    /// Load the stored config, or defaults when none exists.
    fn load(&self) -> Result<AppConfig>;
    fn save(&self, config: &AppConfig) -> Result<()>;
    /// Location of the backing file.
    fn path(&self) -> Result<PathBuf>;
}

// ── Time Port ─────────────────────────────────────────────────────────────────

/// Source of the current time, so timestamps can be fixed in tests.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}
