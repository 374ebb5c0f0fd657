mod backend;
mod coordinator;
#[cfg(feature = "native-audio")]
mod rodio_backend;

pub use backend::{AudioBackend, ClipControls, PlaybackError, PlayingClip};
pub use coordinator::{PlaybackCoordinator, ToggleOutcome};
#[cfg(feature = "native-audio")]
pub use rodio_backend::RodioBackend;
