//! Per-user session persistence
//!
//! Sessions live behind [`SessionRepository`] with a time-to-live. A missing
//! or expired session reads back as an empty [`Session`].

pub mod memory;
pub mod store;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::config::SessionConfig;
use crate::models::Session;

pub use memory::InMemorySessionStore;
pub use store::FjallSessionStore;

#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// The stored session, or an empty one when missing or expired
    async fn get(&self, user_id: &str) -> Result<Session>;
    async fn put(&self, user_id: &str, session: &Session, ttl: Duration) -> Result<()>;
    async fn remove(&self, user_id: &str) -> Result<()>;
}

/// Open the repository selected by `config.backend`
pub fn open(config: &SessionConfig) -> Result<Arc<dyn SessionRepository>> {
    match config.backend.as_str() {
        "memory" => Ok(Arc::new(InMemorySessionStore::default())),
        _ => {
            let path = config.resolved_location();
            std::fs::create_dir_all(&path)
                .with_context(|| format!("Failed to create session directory: {}", path.display()))?;
            Ok(Arc::new(FjallSessionStore::open(&path)?))
        }
    }
}

fn session_key(user_id: &str) -> String {
    format!("session:{user_id}")
}
