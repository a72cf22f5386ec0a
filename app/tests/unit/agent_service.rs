//! Unit tests for the agent application service.
//!
//! Verifies validation happens before any I/O and that every store call is
//! scoped to the calling owner.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use agentdesk::application::services::agent_service::{
    create_agent, delete_agent, get_agent_statistics, get_agents_by_owner, update_agent,
};
use agentdesk::domain::{AgentData, AgentError, AgentFilter, AgentUpdate, ServiceError};

use crate::mocks::{FailingStore, FixedClock, RecordingAgentStore};

fn data(name: &str, age: Option<i64>, owner: &str) -> AgentData {
    AgentData {
        name: name.to_string(),
        age,
        owner: owner.to_string(),
    }
}

fn agent_error(err: ServiceError) -> AgentError {
    match err {
        ServiceError::Agent(e) => e,
        other => panic!("expected agent error, got {other:?}"),
    }
}

// ── create_agent ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_agent_formats_name_and_stamps_creation() {
    let store = RecordingAgentStore::new();
    let clock = FixedClock::default();

    let agent = create_agent(&store, &clock, data("  juan   PÉREZ ", Some(30), "u1"))
        .await
        .expect("valid agent");

    assert_eq!(agent.name, "Juan Pérez");
    assert_eq!(agent.age, 30);
    assert_eq!(agent.owner, "u1");
    assert_eq!(agent.created, clock.0);
    assert_eq!(store.save_count(), 1);
}

#[tokio::test]
async fn create_agent_rejects_invalid_name_before_io() {
    let store = RecordingAgentStore::new();
    let err = create_agent(&store, &FixedClock::default(), data("R2-D2", Some(30), "u1"))
        .await
        .unwrap_err();
    assert_eq!(agent_error(err), AgentError::InvalidName);
    assert_eq!(store.save_count(), 0);
}

#[tokio::test]
async fn create_agent_checks_name_before_age() {
    let store = RecordingAgentStore::new();
    let err = create_agent(&store, &FixedClock::default(), data("", None, ""))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "El nombre del agente no es válido");
}

#[tokio::test]
async fn create_agent_rejects_out_of_range_or_missing_age() {
    let store = RecordingAgentStore::new();
    let clock = FixedClock::default();
    for age in [None, Some(17), Some(131), Some(-5)] {
        let err = create_agent(&store, &clock, data("Ana", age, "u1"))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "La edad del agente debe estar entre 18 y 130 años"
        );
    }
    assert_eq!(store.save_count(), 0);
}

#[tokio::test]
async fn create_agent_accepts_age_bounds() {
    let store = RecordingAgentStore::new();
    let clock = FixedClock::default();
    create_agent(&store, &clock, data("Ana", Some(18), "u1"))
        .await
        .expect("lower bound");
    create_agent(&store, &clock, data("Eva", Some(130), "u1"))
        .await
        .expect("upper bound");
    assert_eq!(store.save_count(), 2);
}

#[tokio::test]
async fn create_agent_requires_owner() {
    let store = RecordingAgentStore::new();
    let err = create_agent(&store, &FixedClock::default(), data("Ana", Some(40), ""))
        .await
        .unwrap_err();
    assert_eq!(agent_error(err), AgentError::MissingOwner);
}

#[tokio::test]
async fn create_agent_surfaces_store_failure_as_persistence() {
    let err = create_agent(&FailingStore, &FixedClock::default(), data("Ana", Some(40), "u1"))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 500);
    assert!(err.to_string().contains("connection refused"));
}

// ── get_agents_by_owner ───────────────────────────────────────────────────────

#[tokio::test]
async fn list_is_scoped_to_owner() {
    let store = RecordingAgentStore::new()
        .with_agent("a1", "Ana", 30, "u1")
        .with_agent("a2", "Luis", 40, "u2")
        .with_agent("a3", "Eva", 50, "u1");

    let agents = get_agents_by_owner(&store, "u1").await.unwrap();
    let names: Vec<_> = agents.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, ["Ana", "Eva"]);
    assert_eq!(store.last_filter(), Some(AgentFilter::by_owner("u1")));
}

#[tokio::test]
async fn list_requires_user_id() {
    let err = get_agents_by_owner(&RecordingAgentStore::new(), "")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Se requiere un ID de usuario");
}

// ── delete_agent ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_filters_by_id_and_owner() {
    let store = RecordingAgentStore::new().with_agent("a1", "Ana", 30, "u1");

    assert!(!delete_agent(&store, "a1", "u2").await.unwrap());
    assert_eq!(store.agents().len(), 1);

    assert!(delete_agent(&store, "a1", "u1").await.unwrap());
    assert!(store.agents().is_empty());
    assert_eq!(store.last_filter(), Some(AgentFilter::owned("a1", "u1")));
}

#[tokio::test]
async fn delete_requires_both_ids() {
    let store = RecordingAgentStore::new();
    for (agent_id, user_id) in [("", "u1"), ("a1", ""), ("", "")] {
        let err = delete_agent(&store, agent_id, user_id).await.unwrap_err();
        assert_eq!(agent_error(err), AgentError::MissingIds);
    }
    assert!(store.last_filter().is_none());
}

// ── get_agent_statistics ──────────────────────────────────────────────────────

#[tokio::test]
async fn statistics_for_owner_without_agents_are_zeroed() {
    let stats = get_agent_statistics(&RecordingAgentStore::new(), "u1")
        .await
        .unwrap();
    assert_eq!(stats.count, 0);
    assert!(stats.average_age.abs() < f64::EPSILON);
    assert!(stats.oldest.is_none());
    assert!(stats.youngest.is_none());
}

#[tokio::test]
async fn statistics_report_average_and_extremes() {
    let store = RecordingAgentStore::new()
        .with_agent("a1", "Ana", 25, "u1")
        .with_agent("a2", "Luis", 60, "u1")
        .with_agent("a3", "Eva", 32, "u1")
        .with_agent("a4", "Otro", 99, "u2");

    let stats = get_agent_statistics(&store, "u1").await.unwrap();
    assert_eq!(stats.count, 3);
    assert!((stats.average_age - 39.0).abs() < 1e-9);
    assert_eq!(stats.youngest.unwrap().name, "Ana");
    assert_eq!(stats.oldest.unwrap().name, "Luis");
}

#[tokio::test]
async fn statistics_average_is_rounded_to_cents() {
    let store = RecordingAgentStore::new()
        .with_agent("a1", "Ana", 20, "u1")
        .with_agent("a2", "Luis", 21, "u1")
        .with_agent("a3", "Eva", 21, "u1");

    let stats = get_agent_statistics(&store, "u1").await.unwrap();
    assert!((stats.average_age - 20.67).abs() < 1e-9);
}

#[tokio::test]
async fn statistics_serialize_in_camel_case() {
    let store = RecordingAgentStore::new().with_agent("a1", "Ana", 30, "u1");
    let stats = get_agent_statistics(&store, "u1").await.unwrap();
    let json = serde_json::to_value(&stats).unwrap();
    assert_eq!(json["averageAge"], 30.0);
    assert_eq!(json["youngest"]["name"], "Ana");
    assert_eq!(json["oldest"]["age"], 30);
}

// ── update_agent ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_changes_only_provided_fields() {
    let store = RecordingAgentStore::new().with_agent("a1", "Ana", 30, "u1");
    let clock = FixedClock::at(2024, 3, 1, 12);

    let update = AgentUpdate {
        name: Some("ana maría".to_string()),
        age: None,
    };
    let agent = update_agent(&store, &clock, "a1", "u1", update)
        .await
        .unwrap()
        .expect("owned agent");

    assert_eq!(agent.name, "Ana María");
    assert_eq!(agent.age, 30);
    assert_eq!(agent.updated, Some(clock.0));
}

#[tokio::test]
async fn update_of_foreign_agent_returns_none() {
    let store = RecordingAgentStore::new().with_agent("a1", "Ana", 30, "u1");
    let update = AgentUpdate {
        name: None,
        age: Some(44),
    };
    let result = update_agent(&store, &FixedClock::default(), "a1", "u2", update)
        .await
        .unwrap();
    assert!(result.is_none());
    assert_eq!(store.agents()[0].age, 30);
}

#[tokio::test]
async fn update_validates_provided_fields() {
    let store = RecordingAgentStore::new().with_agent("a1", "Ana", 30, "u1");
    let clock = FixedClock::default();

    let bad_name = AgentUpdate {
        name: Some("<script>".to_string()),
        age: None,
    };
    let err = update_agent(&store, &clock, "a1", "u1", bad_name)
        .await
        .unwrap_err();
    assert_eq!(agent_error(err), AgentError::InvalidName);

    let bad_age = AgentUpdate {
        name: None,
        age: Some(200),
    };
    let err = update_agent(&store, &clock, "a1", "u1", bad_age)
        .await
        .unwrap_err();
    assert_eq!(agent_error(err), AgentError::InvalidAge);

    assert!(store.changes.lock().expect("lock").is_empty());
}

#[tokio::test]
async fn empty_update_still_refreshes_timestamp() {
    let store = RecordingAgentStore::new().with_agent("a1", "Ana", 30, "u1");
    let clock = FixedClock::at(2024, 5, 5, 5);
    let agent = update_agent(&store, &clock, "a1", "u1", AgentUpdate::default())
        .await
        .unwrap()
        .expect("owned agent");
    assert_eq!(agent.updated, Some(clock.0));
    assert_eq!(agent.name, "Ana");
}
