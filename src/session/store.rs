use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use fjall::Keyspace;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::task;

use super::{SessionRepository, session_key};
use crate::AssistantError;
use crate::models::Session;

#[derive(Serialize, Deserialize)]
struct StoredEntry<T> {
    value: T,
    expires_at: u64, // Unix timestamp (seconds)
}

/// Sessions persisted in an embedded fjall keyspace
pub struct FjallSessionStore {
    store: Keyspace,
}

fn get_from_store(store: Keyspace, key: Vec<u8>) -> Result<Option<Vec<u8>>> {
    let value = store.get(key).map_err(|e| storage_error("read", e))?;
    Ok(value.map(|v| v.to_vec()))
}

fn storage_error(action: &str, err: impl std::fmt::Display) -> AssistantError {
    AssistantError::session(format!("Failed to {action} session: {err}"))
}

fn unix_now() -> Result<u64> {
    Ok(SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs())
}

impl FjallSessionStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let db = fjall::Database::builder(path)
            .open()
            .with_context(|| format!("Failed to open session database: {}", path.display()))?;
        let items = db.keyspace("sessions", fjall::KeyspaceCreateOptions::default)?;
        Ok(Self { store: items })
    }
}

#[async_trait]
impl SessionRepository for FjallSessionStore {
    #[tracing::instrument(name = "load_session", level = "debug", skip(self))]
    async fn get(&self, user_id: &str) -> Result<Session> {
        let store = self.store.clone();
        let key = session_key(user_id).into_bytes();

        let maybe_bytes: Option<Vec<u8>> =
            task::spawn_blocking(move || get_from_store(store, key)).await??;

        let Some(bytes) = maybe_bytes else {
            tracing::debug!("Session not found");
            return Ok(Session::default());
        };

        let entry: StoredEntry<Session> =
            postcard::from_bytes(&bytes).map_err(|e| storage_error("decode", e))?;
        if unix_now()? < entry.expires_at {
            tracing::debug!("Session found and still fresh");
            Ok(entry.value)
        } else {
            tracing::debug!("Session found but expired");
            self.remove(user_id).await?;
            Ok(Session::default())
        }
    }

    #[tracing::instrument(name = "store_session", level = "debug", skip(self, session))]
    async fn put(&self, user_id: &str, session: &Session, ttl: Duration) -> Result<()> {
        let store = self.store.clone();
        let key = session_key(user_id).into_bytes();
        let expires_at = SystemTime::now()
            .checked_add(ttl)
            .ok_or(anyhow!("TTL overflow"))?
            .duration_since(UNIX_EPOCH)?
            .as_secs();
        let entry = StoredEntry {
            value: session,
            expires_at,
        };
        let bytes = postcard::to_stdvec(&entry).map_err(|e| storage_error("encode", e))?;

        task::spawn_blocking(move || store.insert(key, bytes))
            .await?
            .map_err(|e| storage_error("write", e))?;
        Ok(())
    }

    async fn remove(&self, user_id: &str) -> Result<()> {
        let store = self.store.clone();
        let key = session_key(user_id).into_bytes();
        task::spawn_blocking(move || store.remove(key))
            .await?
            .map_err(|e| storage_error("remove", e))?;
        Ok(())
    }
}
