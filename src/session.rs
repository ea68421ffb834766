//! Gateway session id source.
//!
//! Simulated interactions may carry the session id of the connected gateway.
//! The interaction client only needs read access, so it depends on the small
//! [`SessionProvider`] trait rather than on any gateway implementation.

use async_lock::RwLock;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// The current session id, if a gateway session is established.
    async fn session_id(&self) -> Option<String>;
}

/// A provider that never has a session.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoSession;

#[async_trait]
impl SessionProvider for NoSession {
    async fn session_id(&self) -> Option<String> {
        None
    }
}

/// Shared, updatable session id.
///
/// Whatever owns the gateway connection calls [`SessionHandle::set`] on READY
/// and [`SessionHandle::clear`] on disconnect; clones observe the change.
#[derive(Clone, Debug, Default)]
pub struct SessionHandle {
    inner: Arc<RwLock<Option<String>>>,
}

impl SessionHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(session_id: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Some(session_id.into()))),
        }
    }

    pub async fn set(&self, session_id: impl Into<String>) {
        *self.inner.write().await = Some(session_id.into());
    }

    pub async fn clear(&self) {
        *self.inner.write().await = None;
    }
}

#[async_trait]
impl SessionProvider for SessionHandle {
    async fn session_id(&self) -> Option<String> {
        self.inner.read().await.clone()
    }
}
