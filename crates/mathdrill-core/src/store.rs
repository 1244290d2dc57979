//! Process-lifetime session storage.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::model::{PracticeSession, SessionStatus};
use crate::traits::SessionStore;

/// Sessions held in memory until the process exits.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, PracticeSession>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, id: &str) -> anyhow::Result<Option<PracticeSession>> {
        Ok(self.sessions.read().await.get(id).cloned())
    }

    async fn put(&self, session: PracticeSession) -> anyhow::Result<()> {
        self.sessions
            .write()
            .await
            .insert(session.id.clone(), session);
        Ok(())
    }

    async fn transition(
        &self,
        id: &str,
        from: SessionStatus,
        to: SessionStatus,
    ) -> anyhow::Result<bool> {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(id) {
            Some(session) if session.status == from => {
                session.status = to;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete(&self, id: &str) -> anyhow::Result<bool> {
        Ok(self.sessions.write().await.remove(id).is_some())
    }
}
