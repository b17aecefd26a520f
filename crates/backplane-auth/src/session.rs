use std::sync::Arc;

use tokio::sync::RwLock;

use crate::types::{AuthState, Session, User};

/// In-memory holder for the current session.
///
/// Clones share the same slot. Writes are last-writer-wins: when two auth
/// calls race, the session left behind is the one whose response resolved
/// last. Nothing is persisted; use [`SessionStore::replace`] (or
/// `AuthClient::set_session`) to restore a saved session.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    slot: Arc<RwLock<Option<Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clone of the held session, if any.
    pub async fn get(&self) -> Option<Session> {
        self.slot.read().await.clone()
    }

    /// Replace whatever is held with `session`.
    pub async fn replace(&self, session: Session) {
        *self.slot.write().await = Some(session);
    }

    /// Drop the held session, returning it.
    pub async fn clear(&self) -> Option<Session> {
        self.slot.write().await.take()
    }

    pub async fn state(&self) -> AuthState {
        if self.slot.read().await.is_some() {
            AuthState::Authenticated
        } else {
            AuthState::Anonymous
        }
    }

    pub async fn user(&self) -> Option<User> {
        self.slot.read().await.as_ref().map(|s| s.user.clone())
    }

    /// Held access token; an empty token counts as absent.
    pub async fn access_token(&self) -> Option<String> {
        self.slot
            .read()
            .await
            .as_ref()
            .map(|s| s.access_token.clone())
            .filter(|t| !t.is_empty())
    }

    /// Held refresh token; an empty token counts as absent.
    pub async fn refresh_token(&self) -> Option<String> {
        self.slot
            .read()
            .await
            .as_ref()
            .map(|s| s.refresh_token.clone())
            .filter(|t| !t.is_empty())
    }
}
