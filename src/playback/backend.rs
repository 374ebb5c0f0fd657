use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::oneshot;

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("clip download failed")]
    Fetch(#[from] reqwest::Error),
    #[error("clip could not be decoded: {0}")]
    Decode(String),
    #[error("audio device unavailable: {0}")]
    Device(String),
}

/// Control surface of a clip the backend has started.
pub trait ClipControls: Send + Sync {
    /// Stops playback and releases the clip's resources. Idempotent.
    fn stop(&self);
}

/// A clip that is playing right now.
pub struct PlayingClip {
    pub controls: Box<dyn ClipControls>,
    /// Resolves when the underlying audio subsystem is done with the clip.
    /// This fires on natural end-of-clip and may also fire after an explicit
    /// stop, on whatever thread the subsystem uses; consumers must check the
    /// clip is still current before acting on it.
    pub finished: oneshot::Receiver<()>,
}

/// Seam to the audio subsystem: fetch a clip by URI and start playing it
/// immediately.
#[async_trait]
pub trait AudioBackend: Send + Sync {
    async fn load(&self, uri: &str) -> Result<PlayingClip, PlaybackError>;
}
