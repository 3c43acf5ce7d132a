//! Auth session: token storage and refresh coordination.
//!
//! The session is the only state shared between in-flight requests. Refreshes
//! are serialized behind an async mutex, so simultaneous 401s trigger a single
//! exchange of the refresh token.

mod sqlite;

pub use sqlite::*;

use std::future::Future;

use tokio::sync::{watch, Mutex, RwLock};

use crate::errors::ClientError;
use crate::models::TokenPair;

/// Persistent home of the token pair.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> impl Future<Output = Result<Option<TokenPair>, ClientError>> + Send;

    fn save(&self, tokens: &TokenPair) -> impl Future<Output = Result<(), ClientError>> + Send;

    fn clear(&self) -> impl Future<Output = Result<(), ClientError>> + Send;
}

/// Token store kept in process memory.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    tokens: RwLock<Option<TokenPair>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tokens(tokens: TokenPair) -> Self {
        Self {
            tokens: RwLock::new(Some(tokens)),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> Result<Option<TokenPair>, ClientError> {
        Ok(self.tokens.read().await.clone())
    }

    async fn save(&self, tokens: &TokenPair) -> Result<(), ClientError> {
        *self.tokens.write().await = Some(tokens.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), ClientError> {
        *self.tokens.write().await = None;
        Ok(())
    }
}

/// Login state published to whoever renders the app shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    SignedOut,
    SignedIn,
    /// Refresh failed; the shell should route to the login screen.
    Expired,
}

/// Token pair plus the refresh gate.
pub struct Session<S> {
    store: S,
    refresh_gate: Mutex<()>,
    status: watch::Sender<SessionStatus>,
}

impl<S: TokenStore> Session<S> {
    /// Open a session over a store, deriving the initial status from its contents.
    pub async fn restore(store: S) -> Result<Self, ClientError> {
        let initial = match store.load().await? {
            Some(_) => SessionStatus::SignedIn,
            None => SessionStatus::SignedOut,
        };
        let (status, _) = watch::channel(initial);

        Ok(Self {
            store,
            refresh_gate: Mutex::new(()),
            status,
        })
    }

    pub fn status(&self) -> SessionStatus {
        *self.status.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionStatus> {
        self.status.subscribe()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn access_token(&self) -> Result<Option<String>, ClientError> {
        Ok(self.store.load().await?.map(|tokens| tokens.access))
    }

    pub async fn sign_in(&self, tokens: &TokenPair) -> Result<(), ClientError> {
        self.store.save(tokens).await?;
        self.status.send_replace(SessionStatus::SignedIn);
        Ok(())
    }

    pub async fn sign_out(&self) -> Result<(), ClientError> {
        self.store.clear().await?;
        self.status.send_replace(SessionStatus::SignedOut);
        Ok(())
    }

    /// Replace a rejected access token, running `exchange` at most once.
    ///
    /// `stale_access` is the token the rejected request carried. If another
    /// caller already replaced it while this one waited on the gate, the new
    /// token is returned without calling `exchange`. On any exchange failure the
    /// tokens are cleared, the status becomes [`SessionStatus::Expired`] and
    /// [`ClientError::SessionExpired`] is returned.
    pub async fn refresh<F, Fut>(&self, stale_access: &str, exchange: F) -> Result<String, ClientError>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = Result<TokenPair, ClientError>>,
    {
        let _gate = self.refresh_gate.lock().await;

        let Some(current) = self.store.load().await? else {
            tracing::warn!("Refresh requested with no stored tokens");
            return self.expire().await;
        };

        if current.access != stale_access {
            tracing::debug!("Access token already refreshed by a concurrent request");
            return Ok(current.access);
        }

        match exchange(current.refresh).await {
            Ok(tokens) => {
                self.store.save(&tokens).await?;
                tracing::info!("Access token refreshed");
                Ok(tokens.access)
            }
            Err(e) => {
                tracing::warn!("Token refresh failed: {}", e);
                self.expire().await
            }
        }
    }

    async fn expire(&self) -> Result<String, ClientError> {
        self.store.clear().await?;
        self.status.send_replace(SessionStatus::Expired);
        Err(ClientError::SessionExpired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn pair(access: &str, refresh: &str) -> TokenPair {
        TokenPair {
            access: access.to_string(),
            refresh: refresh.to_string(),
        }
    }

    #[tokio::test]
    async fn test_restore_status() {
        let empty = Session::restore(MemoryTokenStore::new()).await.unwrap();
        assert_eq!(empty.status(), SessionStatus::SignedOut);

        let stored = Session::restore(MemoryTokenStore::with_tokens(pair("a", "r")))
            .await
            .unwrap();
        assert_eq!(stored.status(), SessionStatus::SignedIn);
    }

    #[tokio::test]
    async fn test_refresh_success_saves_new_pair() {
        let session = Session::restore(MemoryTokenStore::with_tokens(pair("a1", "r1")))
            .await
            .unwrap();

        let access = session
            .refresh("a1", |refresh| async move {
                assert_eq!(refresh, "r1");
                Ok(pair("a2", "r2"))
            })
            .await
            .unwrap();

        assert_eq!(access, "a2");
        assert_eq!(session.store().load().await.unwrap(), Some(pair("a2", "r2")));
        assert_eq!(session.status(), SessionStatus::SignedIn);
    }

    #[tokio::test]
    async fn test_refresh_failure_expires_session() {
        let session = Session::restore(MemoryTokenStore::with_tokens(pair("a1", "r1")))
            .await
            .unwrap();
        let mut status = session.subscribe();

        let result = session
            .refresh("a1", |_| async {
                Err(ClientError::Api {
                    status: 401,
                    message: "Token is invalid or expired".to_string(),
                })
            })
            .await;

        assert_eq!(result, Err(ClientError::SessionExpired));
        assert_eq!(session.store().load().await.unwrap(), None);
        assert!(status.has_changed().unwrap());
        assert_eq!(*status.borrow_and_update(), SessionStatus::Expired);
    }

    #[tokio::test]
    async fn test_refresh_skipped_when_token_already_replaced() {
        let session = Session::restore(MemoryTokenStore::with_tokens(pair("a2", "r1")))
            .await
            .unwrap();
        let calls = AtomicUsize::new(0);

        let access = session
            .refresh("a1", |_| async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(pair("a3", "r1"))
            })
            .await
            .unwrap();

        assert_eq!(access, "a2");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_concurrent_refreshes_share_one_exchange() {
        let session = Arc::new(
            Session::restore(MemoryTokenStore::with_tokens(pair("stale", "r1")))
                .await
                .unwrap(),
        );
        let calls = Arc::new(AtomicUsize::new(0));

        let run = |session: Arc<Session<MemoryTokenStore>>, calls: Arc<AtomicUsize>| async move {
            session
                .refresh("stale", |_| async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
                    Ok(pair("fresh", "r1"))
                })
                .await
        };

        let (first, second) = tokio::join!(
            run(session.clone(), calls.clone()),
            run(session.clone(), calls.clone())
        );

        assert_eq!(first.unwrap(), "fresh");
        assert_eq!(second.unwrap(), "fresh");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_sign_out_clears_tokens() {
        let session = Session::restore(MemoryTokenStore::with_tokens(pair("a", "r")))
            .await
            .unwrap();
        session.sign_out().await.unwrap();
        assert_eq!(session.access_token().await.unwrap(), None);
        assert_eq!(session.status(), SessionStatus::SignedOut);
    }
}
