use super::backend::{AudioBackend, ClipControls, PlaybackError};
use std::sync::Arc;
use tokio::sync::{oneshot, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Started,
    Stopped,
}

struct ActiveClip {
    clip_id: String,
    controls: Box<dyn ClipControls>,
    generation: u64,
}

#[derive(Default)]
struct Slot {
    next_generation: u64,
    active: Option<ActiveClip>,
}

/// Enforces single-flight audio playback across an arbitrary set of clip
/// identifiers backed by remote URIs.
///
/// One slot holds the active clip, tagged with a generation so a completion
/// event for a clip that has since been superseded cannot clear state for
/// its successor. All state access is serialized through one async mutex.
#[derive(Clone)]
pub struct PlaybackCoordinator {
    backend: Arc<dyn AudioBackend>,
    slot: Arc<Mutex<Slot>>,
}

impl PlaybackCoordinator {
    pub fn new(backend: Arc<dyn AudioBackend>) -> Self {
        Self {
            backend,
            slot: Arc::new(Mutex::new(Slot::default())),
        }
    }

    /// Play/pause control for one clip.
    ///
    /// Toggling the active clip stops it. Toggling any other clip releases
    /// the active one first, then loads and starts the new URI; a load or
    /// start failure leaves the slot empty and surfaces to the caller.
    pub async fn toggle(&self, clip_id: &str, uri: &str) -> Result<ToggleOutcome, PlaybackError> {
        let mut slot = self.slot.lock().await;

        if let Some(active) = slot.active.take() {
            active.controls.stop();
            if active.clip_id == clip_id {
                tracing::debug!(clip_id, "playback toggled off");
                return Ok(ToggleOutcome::Stopped);
            }
            // Switching: the old clip is fully released before the new one
            // loads.
        }

        slot.next_generation += 1;
        let generation = slot.next_generation;

        // The slot stays locked across the load so a completion event for
        // the clip just released cannot observe a half-built state.
        let clip = self.backend.load(uri).await?;
        slot.active = Some(ActiveClip {
            clip_id: clip_id.to_string(),
            controls: clip.controls,
            generation,
        });
        drop(slot);

        self.watch_completion(generation, clip.finished);
        tracing::debug!(clip_id, "playback started");
        Ok(ToggleOutcome::Started)
    }

    /// Releases any active clip. Idempotent; used on teardown and sign-out.
    pub async fn stop_all(&self) {
        let mut slot = self.slot.lock().await;
        if let Some(active) = slot.active.take() {
            active.controls.stop();
            tracing::debug!(clip_id = %active.clip_id, "playback stopped");
        }
    }

    pub async fn current_clip(&self) -> Option<String> {
        self.slot
            .lock()
            .await
            .active
            .as_ref()
            .map(|active| active.clip_id.clone())
    }

    pub async fn is_playing(&self) -> bool {
        self.slot.lock().await.active.is_some()
    }

    fn watch_completion(&self, generation: u64, finished: oneshot::Receiver<()>) {
        let slot = Arc::clone(&self.slot);
        tokio::spawn(async move {
            // Err means the backend dropped the sender; the clip is done
            // either way.
            let _ = finished.await;

            let mut slot = slot.lock().await;
            let still_current = slot
                .active
                .as_ref()
                .is_some_and(|active| active.generation == generation);
            if still_current {
                slot.active = None;
            }
        });
    }
}
