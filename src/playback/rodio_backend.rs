use super::backend::{AudioBackend, ClipControls, PlaybackError, PlayingClip};
use async_trait::async_trait;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use std::io::Cursor;
use std::sync::Arc;
use tokio::sync::oneshot;

/// Plays clips fetched over HTTP through the default output device.
pub struct RodioBackend {
    http: reqwest::Client,
    stream: OutputStreamHandle,
}

impl RodioBackend {
    pub fn new(http: reqwest::Client) -> Result<Self, PlaybackError> {
        let (tx, rx) = std::sync::mpsc::channel();

        // rodio's OutputStream is not Send; a parked thread owns the device
        // handle for the life of the process and hands out the cloneable
        // stream handle.
        std::thread::Builder::new()
            .name("parlo-audio-output".to_string())
            .spawn(move || match OutputStream::try_default() {
                Ok((stream, handle)) => {
                    if tx.send(Ok(handle)).is_err() {
                        return;
                    }
                    let _keep_alive = stream;
                    loop {
                        std::thread::park();
                    }
                }
                Err(err) => {
                    let _ = tx.send(Err(PlaybackError::Device(err.to_string())));
                }
            })
            .map_err(|err| PlaybackError::Device(err.to_string()))?;

        let stream = rx
            .recv()
            .map_err(|_| PlaybackError::Device("audio output thread exited".to_string()))??;

        Ok(Self { http, stream })
    }
}

#[async_trait]
impl AudioBackend for RodioBackend {
    async fn load(&self, uri: &str) -> Result<PlayingClip, PlaybackError> {
        let response = self.http.get(uri).send().await?.error_for_status()?;
        let bytes = response.bytes().await?.to_vec();

        let handle = self.stream.clone();
        let sink = tokio::task::spawn_blocking(move || -> Result<Arc<Sink>, PlaybackError> {
            let source = Decoder::new(Cursor::new(bytes))
                .map_err(|err| PlaybackError::Decode(err.to_string()))?;
            let sink =
                Sink::try_new(&handle).map_err(|err| PlaybackError::Device(err.to_string()))?;
            sink.append(source);
            Ok(Arc::new(sink))
        })
        .await
        .map_err(|err| PlaybackError::Device(err.to_string()))??;

        let (finished_tx, finished_rx) = oneshot::channel();
        let waiter = Arc::clone(&sink);
        std::thread::spawn(move || {
            // Returns early when the sink is stopped; the coordinator's
            // generation check filters those signals out.
            waiter.sleep_until_end();
            let _ = finished_tx.send(());
        });

        Ok(PlayingClip {
            controls: Box::new(RodioClip { sink }),
            finished: finished_rx,
        })
    }
}

struct RodioClip {
    sink: Arc<Sink>,
}

impl ClipControls for RodioClip {
    fn stop(&self) {
        self.sink.stop();
    }
}
