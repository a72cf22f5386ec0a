//! Application service: agent create/list/delete/update/statistics use-cases.
//!
//! Imports only from `crate::domain`, `crate::application::ports` and
//! `agentdesk_core`. All I/O is routed through injected port traits, and
//! every read or write is scoped to the calling owner.

use agentdesk_core::{CoreError, calculate_average_age, format_name, is_valid_age, is_valid_name};

use crate::application::ports::{AgentStore, Clock};
use crate::domain::{
    Agent, AgentChanges, AgentData, AgentError, AgentFilter, AgentStatistics, AgentSummary,
    AgentUpdate, NewAgent, ServiceError,
};

/// Validated age in years, or `None` if the input is missing or out of range.
fn checked_age(age: Option<i64>) -> Option<u32> {
    #[allow(clippy::cast_precision_loss)]
    let age = age.filter(|&a| is_valid_age(a as f64))?;
    u32::try_from(age).ok()
}

/// Create a new agent for `data.owner`.
///
/// Steps:
/// 1. Validate name, age and owner (no I/O on failure)
/// 2. Format the name (`"juan  pérez"` → `"Juan Pérez"`)
/// 3. Persist via `AgentStore::save`
///
/// # Errors
///
/// Returns [`AgentError`] on invalid input, or a persistence error if the
/// store fails.
pub async fn create_agent(
    store: &impl AgentStore,
    clock: &impl Clock,
    data: AgentData,
) -> Result<Agent, ServiceError> {
    if !is_valid_name(&data.name) {
        return Err(AgentError::InvalidName.into());
    }
    let age = checked_age(data.age).ok_or(AgentError::InvalidAge)?;
    if data.owner.is_empty() {
        return Err(AgentError::MissingOwner.into());
    }

    let agent = store
        .save(NewAgent {
            name: format_name(&data.name),
            age,
            owner: data.owner,
            created: clock.now(),
        })
        .await?;

    tracing::info!(agent_id = %agent.id, owner = %agent.owner, "agent created");
    Ok(agent)
}

/// All agents owned by `user_id`.
///
/// # Errors
///
/// Returns [`AgentError::MissingUserId`] for an empty id, or a persistence
/// error if the store fails.
pub async fn get_agents_by_owner(
    store: &impl AgentStore,
    user_id: &str,
) -> Result<Vec<Agent>, ServiceError> {
    if user_id.is_empty() {
        return Err(AgentError::MissingUserId.into());
    }
    let agents = store.find(&AgentFilter::by_owner(user_id)).await?;
    tracing::debug!(owner = %user_id, count = agents.len(), "agents listed");
    Ok(agents)
}

/// Delete `agent_id` if it belongs to `user_id`.
///
/// Returns `false` when no such agent exists or it belongs to someone else.
///
/// # Errors
///
/// Returns [`AgentError::MissingIds`] if either id is empty, or a
/// persistence error if the store fails.
pub async fn delete_agent(
    store: &impl AgentStore,
    agent_id: &str,
    user_id: &str,
) -> Result<bool, ServiceError> {
    if agent_id.is_empty() || user_id.is_empty() {
        return Err(AgentError::MissingIds.into());
    }
    let result = store
        .delete_one(&AgentFilter::owned(agent_id, user_id))
        .await?;
    let deleted = result.deleted_count > 0;
    if deleted {
        tracing::info!(agent_id = %agent_id, owner = %user_id, "agent deleted");
    }
    Ok(deleted)
}

/// Count, average age, oldest and youngest among `user_id`'s agents.
///
/// An owner with no agents gets zeroed statistics rather than an error.
/// Ties keep the earliest-created agent as youngest and the latest-created
/// as oldest.
///
/// # Errors
///
/// Returns [`AgentError::MissingUserId`] for an empty id, or a persistence
/// error if the store fails.
pub async fn get_agent_statistics(
    store: &impl AgentStore,
    user_id: &str,
) -> Result<AgentStatistics, ServiceError> {
    if user_id.is_empty() {
        return Err(AgentError::MissingUserId.into());
    }
    let agents = store.find(&AgentFilter::by_owner(user_id)).await?;
    if agents.is_empty() {
        return Ok(AgentStatistics::empty());
    }

    let ages: Vec<u32> = agents.iter().map(|a| a.age).collect();
    let average_age = calculate_average_age(&ages).map_err(CoreError::from)?;

    let youngest = agents.iter().min_by_key(|a| a.age).map(AgentSummary::from);
    let oldest = agents.iter().max_by_key(|a| a.age).map(AgentSummary::from);

    Ok(AgentStatistics {
        count: agents.len(),
        average_age,
        oldest,
        youngest,
    })
}

/// Apply a partial update to `agent_id` if it belongs to `user_id`.
///
/// Provided fields are validated and the name is formatted; the `updated`
/// timestamp is always refreshed. Returns `None` when the agent does not
/// exist or belongs to someone else.
///
/// # Errors
///
/// Returns [`AgentError`] on missing ids or invalid fields, or a
/// persistence error if the store fails.
pub async fn update_agent(
    store: &impl AgentStore,
    clock: &impl Clock,
    agent_id: &str,
    user_id: &str,
    update: AgentUpdate,
) -> Result<Option<Agent>, ServiceError> {
    if agent_id.is_empty() || user_id.is_empty() {
        return Err(AgentError::MissingIds.into());
    }

    if let Some(name) = &update.name
        && !is_valid_name(name)
    {
        return Err(AgentError::InvalidName.into());
    }
    let age = match update.age {
        Some(raw) => Some(checked_age(Some(raw)).ok_or(AgentError::InvalidAge)?),
        None => None,
    };

    let changes = AgentChanges {
        name: update.name.as_deref().map(format_name),
        age,
        updated: clock.now(),
    };

    let agent = store
        .find_one_and_update(&AgentFilter::owned(agent_id, user_id), &changes)
        .await?;
    match &agent {
        Some(_) => tracing::info!(agent_id = %agent_id, owner = %user_id, "agent updated"),
        None => tracing::debug!(agent_id = %agent_id, owner = %user_id, "no owned agent to update"),
    }
    Ok(agent)
}
