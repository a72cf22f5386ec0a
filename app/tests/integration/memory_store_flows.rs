//! Service flows over the in-memory stores, real hasher and system clock.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use agentdesk::api::{self, Session};
use agentdesk::application::services::{agent_service, user_service};
use agentdesk::domain::{AgentData, AgentUpdate, AppConfig, UserCredentials, is_valid_object_id};
use agentdesk::helpers::IpSources;
use agentdesk::infra::{Argon2PasswordHasher, MemoryAgentStore, MemoryUserStore, SystemClock};

#[tokio::test]
async fn sign_up_log_in_and_read_history() {
    let users = MemoryUserStore::new();
    let hasher = Argon2PasswordHasher;
    let clock = SystemClock;

    let user = user_service::create_user(
        &users,
        &hasher,
        &clock,
        UserCredentials {
            email: "Ana@Example.com".to_string(),
            password: "Secreta123".to_string(),
        },
    )
    .await
    .expect("sign up");
    assert!(is_valid_object_id(&user.id));
    assert_ne!(user.password_hash, "Secreta123");

    let sources = IpSources {
        remote_addr: Some("127.0.0.1"),
        ..IpSources::default()
    };
    let session = api::login(&users, &hasher, &clock, "ana@example.com", "Secreta123", &sources)
        .await
        .expect("credentials match")
        .data;
    assert_eq!(session.require_user().unwrap(), user.id);

    let response = api::login_history(&users, &session, None, &AppConfig::default())
        .await
        .unwrap();
    assert_eq!(response.data.len(), 1);
    assert_eq!(response.data[0].record.ip, "127.0.0.1");
    assert!(response.data[0].formatted_date.contains(" de "));

    let stats = user_service::get_user_statistics(&users, &user.id).await.unwrap();
    assert_eq!(stats.total_logins, 1);
    assert!(user_service::email_exists(&users, "ANA@example.com").await.unwrap());
}

#[tokio::test]
async fn wrong_password_does_not_authenticate() {
    let users = MemoryUserStore::new();
    let hasher = Argon2PasswordHasher;
    user_service::create_user(
        &users,
        &hasher,
        &SystemClock,
        UserCredentials {
            email: "eva@example.com".to_string(),
            password: "Secreta123".to_string(),
        },
    )
    .await
    .unwrap();

    let result = user_service::authenticate_user(&users, &hasher, "eva@example.com", "Secreta124")
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn agent_lifecycle_is_owner_scoped() {
    let store = MemoryAgentStore::new();
    let clock = SystemClock;

    let agent = agent_service::create_agent(
        &store,
        &clock,
        AgentData {
            name: "juan pérez".to_string(),
            age: Some(34),
            owner: "owner-a".to_string(),
        },
    )
    .await
    .unwrap();
    assert!(is_valid_object_id(&agent.id));

    let updated = agent_service::update_agent(
        &store,
        &clock,
        &agent.id,
        "owner-a",
        AgentUpdate {
            name: None,
            age: Some(35),
        },
    )
    .await
    .unwrap()
    .expect("owned");
    assert_eq!(updated.age, 35);
    assert!(updated.updated.is_some());

    let err = api::delete_agent(&store, &Session::for_user("owner-b"), &agent.id)
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 403);

    assert!(agent_service::delete_agent(&store, &agent.id, "owner-a").await.unwrap());
    assert!(store.is_empty().unwrap());

    let stats = agent_service::get_agent_statistics(&store, "owner-a").await.unwrap();
    assert_eq!(stats.count, 0);
}
