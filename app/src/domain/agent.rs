//! Agent domain types: pure data, no I/O, no async.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted agent, owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// 24-hex-character identifier.
    pub id: String,
    /// Display name, already formatted (`"Juan Pérez"`).
    pub name: String,
    /// Age in years, within `[18, 130]`.
    pub age: u32,
    /// Id of the owning user.
    pub owner: String,
    pub created: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
}

/// Caller-supplied data for a new agent, before validation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AgentData {
    pub name: String,
    pub age: Option<i64>,
    #[serde(default)]
    pub owner: String,
}

/// Validated, formatted fields handed to the store for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAgent {
    pub name: String,
    pub age: u32,
    pub owner: String,
    pub created: DateTime<Utc>,
}

/// Partial update requested by the owner. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AgentUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<i64>,
}

/// Validated field changes applied by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentChanges {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub updated: DateTime<Utc>,
}

impl AgentChanges {
    /// Apply these changes to `agent` in place.
    pub fn apply_to(&self, agent: &mut Agent) {
        if let Some(name) = &self.name {
            agent.name.clone_from(name);
        }
        if let Some(age) = self.age {
            agent.age = age;
        }
        agent.updated = Some(self.updated);
    }
}

/// Store query. Every set field must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentFilter {
    pub id: Option<String>,
    pub owner: Option<String>,
}

impl AgentFilter {
    /// All agents owned by `owner`.
    #[must_use]
    pub fn by_owner(owner: &str) -> Self {
        Self {
            id: None,
            owner: Some(owner.to_string()),
        }
    }

    /// The agent `id`, but only if owned by `owner`.
    #[must_use]
    pub fn owned(id: &str, owner: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            owner: Some(owner.to_string()),
        }
    }

    #[must_use]
    pub fn matches(&self, agent: &Agent) -> bool {
        self.id.as_deref().is_none_or(|id| id == agent.id)
            && self.owner.as_deref().is_none_or(|owner| owner == agent.owner)
    }
}

/// Outcome of a delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeleteResult {
    pub deleted_count: u64,
}

/// Name and age of one agent, as reported in statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentSummary {
    pub name: String,
    pub age: u32,
}

impl From<&Agent> for AgentSummary {
    fn from(agent: &Agent) -> Self {
        Self {
            name: agent.name.clone(),
            age: agent.age,
        }
    }
}

/// Aggregate view over one owner's agents.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentStatistics {
    pub count: usize,
    pub average_age: f64,
    pub oldest: Option<AgentSummary>,
    pub youngest: Option<AgentSummary>,
}

impl AgentStatistics {
    /// Statistics for an owner with no agents.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            count: 0,
            average_age: 0.0,
            oldest: None,
            youngest: None,
        }
    }
}
