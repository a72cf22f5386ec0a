//! Application services: use-case orchestration.
//!
//! Each service module composes core rules with port trait calls. Services
//! are free functions taking their collaborators by reference, so callers
//! choose the backing store.

pub mod agent_service;
pub mod user_service;
