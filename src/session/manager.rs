use super::token_store::{StorageError, TokenStore};
use crate::api::AuthError;
use crate::redact::redact_secrets;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

/// One profile fetch with the candidate token. Success means the token is
/// still accepted by the backend.
#[async_trait]
pub trait TokenValidator: Send + Sync {
    async fn validate(&self, token: &str) -> Result<(), AuthError>;
}

#[derive(Default)]
struct SessionState {
    token: Option<String>,
    /// Bumped on every sign-in and sign-out so an in-flight restore can tell
    /// its validation result has been superseded.
    epoch: u64,
}

/// Single source of truth for "is a user authenticated".
///
/// All transitions go through this type; the presentation layer only reads
/// [`SessionManager::is_authenticated`] and invokes the transitions. Storage
/// and in-memory state never diverge on any exit path.
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn TokenStore>,
    validator: Arc<dyn TokenValidator>,
    state: Arc<Mutex<SessionState>>,
}

impl SessionManager {
    pub fn new(store: Arc<dyn TokenStore>, validator: Arc<dyn TokenValidator>) -> Self {
        Self {
            store,
            validator,
            state: Arc::new(Mutex::new(SessionState::default())),
        }
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.lock().await.token.is_some()
    }

    /// Restores the session persisted by an earlier sign-in.
    ///
    /// With no stored token this resolves to unauthenticated without touching
    /// the network. A stored token is validated with one profile fetch; any
    /// failure clears the stored token before returning, so a stale or
    /// revoked credential heals itself. Returns the resulting
    /// authentication state.
    pub async fn restore(&self) -> bool {
        let started_epoch = self.state.lock().await.epoch;

        let token = match self.store.get().await {
            Ok(Some(token)) => token,
            Ok(None) => return false,
            Err(err) => {
                tracing::warn!("token store read failed during restore: {err}");
                self.invalidate(started_epoch).await;
                return false;
            }
        };

        match self.validator.validate(&token).await {
            Ok(()) => {
                let mut state = self.state.lock().await;
                if state.epoch != started_epoch {
                    // A sign-in or sign-out won the race; its state stands.
                    return state.token.is_some();
                }
                state.token = Some(token);
                true
            }
            Err(err) => {
                tracing::warn!(
                    "stored token rejected during restore: {}",
                    redact_secrets(&err.to_string())
                );
                self.invalidate(started_epoch).await;
                false
            }
        }
    }

    /// Marks the session authenticated with `token`, persisting it first. A
    /// failed write surfaces as [`StorageError`] and leaves the prior state
    /// untouched; the write is not retried.
    pub async fn sign_in(&self, token: &str) -> Result<(), StorageError> {
        self.store.save(token).await?;

        let mut state = self.state.lock().await;
        state.epoch += 1;
        state.token = Some(token.to_string());
        Ok(())
    }

    /// Ends the session. Deletion from the store is best-effort: the local
    /// session ends even when the platform store refuses, so the user can
    /// always leave the authenticated state.
    pub async fn sign_out(&self) {
        let mut state = self.state.lock().await;
        state.epoch += 1;
        state.token = None;

        if let Err(err) = self.store.remove().await {
            tracing::warn!("token deletion failed during sign-out: {err}");
        }
    }

    /// Clears the stored token after a failed restore, unless a sign-in or
    /// sign-out has happened since `started_epoch` (the newer transition owns
    /// the store now). The state lock is held across the deletion so the two
    /// cannot interleave.
    async fn invalidate(&self, started_epoch: u64) {
        let mut state = self.state.lock().await;
        if state.epoch != started_epoch {
            return;
        }
        state.token = None;

        if let Err(err) = self.store.remove().await {
            tracing::warn!("could not clear stale token: {err}");
        }
    }
}
