//! In-process implementations of the persistence ports.
//!
//! Documents live in a `Vec` behind a `std::sync::Mutex`; the lock is held
//! only for the duration of one call and never across an `.await`.

use std::sync::{Mutex, MutexGuard};

use anyhow::{Result, bail};

use crate::application::ports::{AgentStore, UserStore};
use crate::domain::{
    Agent, AgentChanges, AgentFilter, DeleteResult, NewAgent, NewUser, User, generate_object_id,
};

fn lock<'a, T>(mutex: &'a Mutex<T>, what: &str) -> Result<MutexGuard<'a, T>> {
    mutex
        .lock()
        .map_err(|_| anyhow::anyhow!("{what} store lock poisoned"))
}

// ── Agents ───────────────────────────────────────────────────────────────────

/// Agent collection kept in memory, in insertion order.
#[derive(Debug, Default)]
pub struct MemoryAgentStore {
    agents: Mutex<Vec<Agent>>,
}

impl MemoryAgentStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored agents across all owners.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock is poisoned.
    pub fn len(&self) -> Result<usize> {
        Ok(lock(&self.agents, "agent")?.len())
    }

    /// # Errors
    ///
    /// Returns an error if the lock is poisoned.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

impl AgentStore for MemoryAgentStore {
    async fn find(&self, filter: &AgentFilter) -> Result<Vec<Agent>> {
        let agents = lock(&self.agents, "agent")?;
        Ok(agents.iter().filter(|a| filter.matches(a)).cloned().collect())
    }

    async fn save(&self, agent: NewAgent) -> Result<Agent> {
        let agent = Agent {
            id: generate_object_id(),
            name: agent.name,
            age: agent.age,
            owner: agent.owner,
            created: agent.created,
            updated: None,
        };
        lock(&self.agents, "agent")?.push(agent.clone());
        Ok(agent)
    }

    async fn delete_one(&self, filter: &AgentFilter) -> Result<DeleteResult> {
        let mut agents = lock(&self.agents, "agent")?;
        let deleted_count = match agents.iter().position(|a| filter.matches(a)) {
            Some(index) => {
                agents.remove(index);
                1
            }
            None => 0,
        };
        Ok(DeleteResult { deleted_count })
    }

    async fn find_one_and_update(
        &self,
        filter: &AgentFilter,
        changes: &AgentChanges,
    ) -> Result<Option<Agent>> {
        let mut agents = lock(&self.agents, "agent")?;
        Ok(agents.iter_mut().find(|a| filter.matches(a)).map(|agent| {
            changes.apply_to(agent);
            agent.clone()
        }))
    }
}

// ── Users ────────────────────────────────────────────────────────────────────

/// User collection kept in memory. Emails are assumed already normalised.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<User>>,
}

impl MemoryUserStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserStore for MemoryUserStore {
    async fn find_one_by_email(&self, email: &str) -> Result<Option<User>> {
        let users = lock(&self.users, "user")?;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        let users = lock(&self.users, "user")?;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<User> {
        let mut users = lock(&self.users, "user")?;
        if users.iter().any(|u| u.email == user.email) {
            bail!("duplicate key: email {}", user.email);
        }
        let user = User {
            id: generate_object_id(),
            email: user.email,
            password_hash: user.password_hash,
            login_records: Vec::new(),
            created: user.created,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn save(&self, user: &User) -> Result<User> {
        let mut users = lock(&self.users, "user")?;
        let Some(stored) = users.iter_mut().find(|u| u.id == user.id) else {
            bail!("no user with id {}", user.id);
        };
        stored.clone_from(user);
        Ok(user.clone())
    }
}
