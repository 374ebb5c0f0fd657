use crate::api::{AuthError, BackendClient, TopicError};
use crate::config::AppConfig;
use crate::playback::{AudioBackend, PlaybackCoordinator, PlaybackError};
#[cfg(feature = "native-audio")]
use crate::playback::RodioBackend;
use crate::practice::PracticeSession;
#[cfg(feature = "native-audio")]
use crate::session::KeyringTokenStore;
use crate::session::{SessionManager, StorageError, TokenStore};
use crate::types::RegisterRequest;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Playback(#[from] PlaybackError),
    #[error(transparent)]
    Topic(#[from] TopicError),
}

/// Which screen the rendering layer should show. Selected solely by the
/// session's authentication state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Auth,
    Main,
}

/// Wires the client core together and exposes the use-cases the screens
/// drive.
#[derive(Clone)]
pub struct App {
    backend: Arc<BackendClient>,
    session: SessionManager,
    playback: PlaybackCoordinator,
}

impl App {
    /// Platform wiring: OS keychain storage and the default audio device.
    #[cfg(feature = "native-audio")]
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let store = Arc::new(KeyringTokenStore::new(config.keyring_service.clone()));
        let clip_http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(AuthError::from)?;
        let audio = Arc::new(RodioBackend::new(clip_http)?);
        Self::with_parts(config, store, audio)
    }

    /// Wiring with injected storage and audio, for headless hosts and tests.
    pub fn with_parts(
        config: &AppConfig,
        store: Arc<dyn TokenStore>,
        audio: Arc<dyn AudioBackend>,
    ) -> Result<Self, AppError> {
        let backend = Arc::new(BackendClient::new(config)?);
        let session = SessionManager::new(store, backend.clone());
        Ok(Self {
            backend,
            session,
            playback: PlaybackCoordinator::new(audio),
        })
    }

    /// Startup flow: restore any persisted session, then pick the screen.
    pub async fn startup(&self) -> Screen {
        if self.session.restore().await {
            tracing::info!("session restored");
        }
        self.active_screen().await
    }

    pub async fn active_screen(&self) -> Screen {
        if self.session.is_authenticated().await {
            Screen::Main
        } else {
            Screen::Auth
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<(), AppError> {
        let auth = self.backend.login(email, password).await?;
        self.session.sign_in(&auth.access_token).await?;
        Ok(())
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<(), AppError> {
        let auth = self.backend.register(request).await?;
        self.session.sign_in(&auth.access_token).await?;
        Ok(())
    }

    /// Signs out and silences any clip still playing.
    pub async fn sign_out(&self) {
        self.playback.stop_all().await;
        self.session.sign_out().await;
    }

    /// Fetches a random topic and assembles the practice screen's state.
    pub async fn load_practice(&self) -> Result<PracticeSession, AppError> {
        let topic = self.backend.get_random_topic().await?;
        Ok(PracticeSession::new(topic))
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    pub fn playback(&self) -> &PlaybackCoordinator {
        &self.playback
    }
}
