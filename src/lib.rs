//! Headless core of the Parlo speaking-practice client.
//!
//! Owns the authentication session, the secure token store, the backend REST
//! client, and single-flight playback of example-phrase audio. The rendering
//! layer consumes these state machines through [`App`]; it never touches the
//! token or the audio handle directly.

mod api;
mod app;
mod config;
pub mod logging;
mod playback;
mod practice;
mod redact;
mod session;
pub mod types;

pub use api::{AuthError, BackendClient, TopicError};
pub use app::{App, AppError, Screen};
pub use config::AppConfig;
pub use playback::{
    AudioBackend, ClipControls, PlaybackCoordinator, PlaybackError, PlayingClip, ToggleOutcome,
};
#[cfg(feature = "native-audio")]
pub use playback::RodioBackend;
pub use practice::{
    format_duration, recommended_phrases, DraftStatus, PracticeSession, RecordingDraft,
    SpeakingTask, OWN_RECORDING_CLIP_ID,
};
pub use session::{
    KeyringTokenStore, MemoryTokenStore, SessionManager, StorageError, TokenStore, TokenValidator,
};
