use std::collections::HashMap;
use std::time::{Duration, Instant};

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{SessionRepository, session_key};
use crate::models::Session;

/// Process-local session store, lost on exit
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    entries: RwLock<HashMap<String, (Session, Instant)>>,
}

#[async_trait]
impl SessionRepository for InMemorySessionStore {
    async fn get(&self, user_id: &str) -> Result<Session> {
        let key = session_key(user_id);
        {
            let entries = self.entries.read().await;
            match entries.get(&key) {
                Some((session, expires_at)) if Instant::now() < *expires_at => {
                    return Ok(session.clone());
                }
                None => return Ok(Session::default()),
                Some(_) => {}
            }
        }

        self.entries.write().await.remove(&key);
        Ok(Session::default())
    }

    async fn put(&self, user_id: &str, session: &Session, ttl: Duration) -> Result<()> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        // drop everything already expired so one-off users don't accumulate
        entries.retain(|_, (_, expires_at)| now < *expires_at);
        entries.insert(session_key(user_id), (session.clone(), now + ttl));
        Ok(())
    }

    async fn remove(&self, user_id: &str) -> Result<()> {
        self.entries.write().await.remove(&session_key(user_id));
        Ok(())
    }
}
