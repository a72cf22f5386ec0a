//! agentdesk: agent and user services over pluggable persistence.
//!
//! Layers: `domain` (entities, errors, config schema), `application`
//! (ports and use-case services), `infra` (in-memory stores, hashing, YAML
//! config) and `api` (JSON envelopes for an outer HTTP layer).

#![cfg_attr(test, allow(clippy::expect_used))]

pub mod api;
pub mod application;
pub mod domain;
pub mod helpers;
pub mod infra;
