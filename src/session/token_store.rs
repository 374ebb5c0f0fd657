use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::Mutex;

/// The single key the credential lives under. There is exactly one stored
/// token per installation.
pub const TOKEN_KEY: &str = "auth_token";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("secure store unavailable")]
    Unavailable,
    #[error("secure store operation failed: {0}")]
    Backend(String),
}

/// Durable, opaque persistence for the one credential value.
///
/// Implementations never retry and never swallow failures; callers decide
/// what a failed read or write means for session state.
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn save(&self, token: &str) -> Result<(), StorageError>;
    async fn get(&self) -> Result<Option<String>, StorageError>;
    async fn remove(&self) -> Result<(), StorageError>;
}

/// Token persistence in the platform keychain.
pub struct KeyringTokenStore {
    service: String,
}

impl KeyringTokenStore {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn entry(&self) -> Result<keyring::Entry, StorageError> {
        keyring::Entry::new(&self.service, TOKEN_KEY)
            .map_err(|err| StorageError::Backend(err.to_string()))
    }
}

fn map_keyring_error(err: keyring::Error) -> StorageError {
    match err {
        keyring::Error::NoStorageAccess(_) | keyring::Error::PlatformFailure(_) => {
            StorageError::Unavailable
        }
        other => StorageError::Backend(other.to_string()),
    }
}

#[async_trait]
impl TokenStore for KeyringTokenStore {
    async fn save(&self, token: &str) -> Result<(), StorageError> {
        self.entry()?.set_password(token).map_err(map_keyring_error)
    }

    async fn get(&self) -> Result<Option<String>, StorageError> {
        match self.entry()?.get_password() {
            Ok(value) => {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(trimmed.to_string()))
                }
            }
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(err) => Err(map_keyring_error(err)),
        }
    }

    async fn remove(&self) -> Result<(), StorageError> {
        match self.entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(err) => Err(map_keyring_error(err)),
        }
    }
}

/// In-process token storage for headless use and tests.
#[derive(Default)]
pub struct MemoryTokenStore {
    value: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn save(&self, token: &str) -> Result<(), StorageError> {
        *self.value.lock().await = Some(token.to_string());
        Ok(())
    }

    async fn get(&self) -> Result<Option<String>, StorageError> {
        Ok(self.value.lock().await.clone())
    }

    async fn remove(&self) -> Result<(), StorageError> {
        *self.value.lock().await = None;
        Ok(())
    }
}
