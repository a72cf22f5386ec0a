//! Infrastructure layer: concrete implementations of the application ports.
//!
//! Nothing outside this module touches the filesystem, the environment or
//! the system clock directly.

pub mod clock;
pub mod config;
pub mod memory_store;
pub mod password;

pub use clock::SystemClock;
pub use config::{ENV_PREFIX, YamlConfigStore, apply_env_overrides, load_config};
pub use memory_store::{MemoryAgentStore, MemoryUserStore};
pub use password::Argon2PasswordHasher;
