//! Hand-written recording mocks of the application ports.

#![allow(clippy::expect_used, dead_code)]

use std::sync::Mutex;

use agentdesk::application::ports::{AgentStore, Clock, PasswordHasher, UserStore};
use agentdesk::domain::{Agent, AgentChanges, AgentFilter, DeleteResult, NewAgent, NewUser, User};
use anyhow::{Result, bail};
use chrono::{DateTime, TimeZone, Utc};

// ── Clock ─────────────────────────────────────────────────────────────────────

/// Always reports the same instant.
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub fn at(year: i32, month: u32, day: u32, hour: u32) -> Self {
        Self(
            Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
                .single()
                .expect("valid date"),
        )
    }
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::at(2024, 1, 15, 9)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

// ── Hasher ────────────────────────────────────────────────────────────────────

/// Reversible "hash" so tests can assert on stored values.
pub struct PlainHasher;

impl PasswordHasher for PlainHasher {
    fn hash(&self, password: &str) -> Result<String> {
        Ok(format!("plain${password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool> {
        Ok(hash == format!("plain${password}"))
    }
}

// ── Mock: recording agent store ───────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingAgentStore {
    agents: Mutex<Vec<Agent>>,
    next_id: Mutex<u32>,
    pub saved: Mutex<Vec<NewAgent>>,
    pub filters: Mutex<Vec<AgentFilter>>,
    pub changes: Mutex<Vec<AgentChanges>>,
}

impl RecordingAgentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an agent directly, bypassing validation.
    pub fn with_agent(self, id: &str, name: &str, age: u32, owner: &str) -> Self {
        self.agents.lock().expect("lock").push(Agent {
            id: id.to_string(),
            name: name.to_string(),
            age,
            owner: owner.to_string(),
            created: FixedClock::default().now(),
            updated: None,
        });
        self
    }

    pub fn save_count(&self) -> usize {
        self.saved.lock().expect("lock").len()
    }

    pub fn last_filter(&self) -> Option<AgentFilter> {
        self.filters.lock().expect("lock").last().cloned()
    }

    pub fn agents(&self) -> Vec<Agent> {
        self.agents.lock().expect("lock").clone()
    }

    fn record(&self, filter: &AgentFilter) {
        self.filters.lock().expect("lock").push(filter.clone());
    }
}

impl AgentStore for RecordingAgentStore {
    async fn find(&self, filter: &AgentFilter) -> Result<Vec<Agent>> {
        self.record(filter);
        let agents = self.agents.lock().expect("lock");
        Ok(agents.iter().filter(|a| filter.matches(a)).cloned().collect())
    }

    async fn save(&self, agent: NewAgent) -> Result<Agent> {
        self.saved.lock().expect("lock").push(agent.clone());
        let mut next = self.next_id.lock().expect("lock");
        *next += 1;
        let stored = Agent {
            id: format!("{:024x}", *next),
            name: agent.name,
            age: agent.age,
            owner: agent.owner,
            created: agent.created,
            updated: None,
        };
        self.agents.lock().expect("lock").push(stored.clone());
        Ok(stored)
    }

    async fn delete_one(&self, filter: &AgentFilter) -> Result<DeleteResult> {
        self.record(filter);
        let mut agents = self.agents.lock().expect("lock");
        let before = agents.len();
        if let Some(index) = agents.iter().position(|a| filter.matches(a)) {
            agents.remove(index);
        }
        Ok(DeleteResult {
            deleted_count: (before - agents.len()) as u64,
        })
    }

    async fn find_one_and_update(
        &self,
        filter: &AgentFilter,
        changes: &AgentChanges,
    ) -> Result<Option<Agent>> {
        self.record(filter);
        self.changes.lock().expect("lock").push(changes.clone());
        let mut agents = self.agents.lock().expect("lock");
        Ok(agents.iter_mut().find(|a| filter.matches(a)).map(|agent| {
            changes.apply_to(agent);
            agent.clone()
        }))
    }
}

// ── Mock: recording user store ────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingUserStore {
    users: Mutex<Vec<User>>,
    pub inserted: Mutex<Vec<NewUser>>,
    pub email_lookups: Mutex<Vec<String>>,
    pub save_calls: Mutex<u32>,
}

impl RecordingUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(self, id: &str, email: &str, password: &str) -> Self {
        self.users.lock().expect("lock").push(User {
            id: id.to_string(),
            email: email.to_string(),
            password_hash: format!("plain${password}"),
            login_records: Vec::new(),
            created: FixedClock::default().now(),
        });
        self
    }

    pub fn user(&self, id: &str) -> Option<User> {
        self.users
            .lock()
            .expect("lock")
            .iter()
            .find(|u| u.id == id)
            .cloned()
    }

    pub fn insert_count(&self) -> usize {
        self.inserted.lock().expect("lock").len()
    }

    pub fn save_count(&self) -> u32 {
        *self.save_calls.lock().expect("lock")
    }

    pub fn last_email_lookup(&self) -> Option<String> {
        self.email_lookups.lock().expect("lock").last().cloned()
    }
}

impl UserStore for RecordingUserStore {
    async fn find_one_by_email(&self, email: &str) -> Result<Option<User>> {
        self.email_lookups.lock().expect("lock").push(email.to_string());
        let users = self.users.lock().expect("lock");
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        Ok(self.user(id))
    }

    async fn insert(&self, user: NewUser) -> Result<User> {
        self.inserted.lock().expect("lock").push(user.clone());
        let stored = User {
            id: format!("user-{}", self.insert_count()),
            email: user.email,
            password_hash: user.password_hash,
            login_records: Vec::new(),
            created: user.created,
        };
        self.users.lock().expect("lock").push(stored.clone());
        Ok(stored)
    }

    async fn save(&self, user: &User) -> Result<User> {
        *self.save_calls.lock().expect("lock") += 1;
        let mut users = self.users.lock().expect("lock");
        let Some(stored) = users.iter_mut().find(|u| u.id == user.id) else {
            bail!("no user with id {}", user.id);
        };
        *stored = user.clone();
        Ok(user.clone())
    }
}

// ── Mock: store that always fails ─────────────────────────────────────────────

pub struct FailingStore;

impl AgentStore for FailingStore {
    async fn find(&self, _: &AgentFilter) -> Result<Vec<Agent>> {
        bail!("connection refused")
    }

    async fn save(&self, _: NewAgent) -> Result<Agent> {
        bail!("connection refused")
    }

    async fn delete_one(&self, _: &AgentFilter) -> Result<DeleteResult> {
        bail!("connection refused")
    }

    async fn find_one_and_update(
        &self,
        _: &AgentFilter,
        _: &AgentChanges,
    ) -> Result<Option<Agent>> {
        bail!("connection refused")
    }
}

impl UserStore for FailingStore {
    async fn find_one_by_email(&self, _: &str) -> Result<Option<User>> {
        bail!("connection refused")
    }

    async fn find_by_id(&self, _: &str) -> Result<Option<User>> {
        bail!("connection refused")
    }

    async fn insert(&self, _: NewUser) -> Result<User> {
        bail!("connection refused")
    }

    async fn save(&self, _: &User) -> Result<User> {
        bail!("connection refused")
    }
}
