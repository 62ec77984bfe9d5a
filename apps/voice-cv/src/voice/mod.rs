//! Voice I/O — speech output and bounded speech capture behind a swappable backend.
//!
//! `VoiceService` is the only handle the dialog layer sees. It owns the backend and
//! the single audio input lease, so at most one capture is outstanding at a time and
//! the lease is released on every exit path (success, error, or timeout).

pub mod console;
#[cfg(test)]
pub mod scripted;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

pub use console::ConsoleVoice;

pub type VoiceResult<T> = Result<T, VoiceError>;

#[derive(Debug, Error)]
pub enum VoiceError {
    #[error("Speech output failed: {0}")]
    Speech(String),

    #[error("Capture timed out")]
    Timeout,

    #[error("Speech not recognized")]
    Unrecognized,

    #[error("Input device unavailable: {0}")]
    Device(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Bounds for a single capture. `None` means wait for a natural pause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenLimits {
    /// How long to wait for speech to start.
    pub timeout: Option<Duration>,
    /// Maximum length of the captured phrase.
    pub phrase_limit: Option<Duration>,
}

impl ListenLimits {
    pub fn bounded(timeout: Duration, phrase_limit: Duration) -> Self {
        Self {
            timeout: Some(timeout),
            phrase_limit: Some(phrase_limit),
        }
    }

    /// Used only for the free-form monologue.
    pub const fn unbounded() -> Self {
        Self {
            timeout: None,
            phrase_limit: None,
        }
    }

    /// Hard ceiling enforced by the service on top of the backend's own handling.
    fn deadline(&self) -> Option<Duration> {
        let timeout = self.timeout?;
        Some(timeout + self.phrase_limit.unwrap_or_default() + Duration::from_secs(1))
    }
}

/// A speech engine + recognizer pair. Implementations may fail freely; the
/// service decides what the dialog layer gets to see.
#[async_trait]
pub trait VoiceBackend: Send + Sync {
    async fn init(&self) -> VoiceResult<()> {
        Ok(())
    }

    async fn speak(&self, text: &str) -> VoiceResult<()>;

    /// Captures one utterance. `Ok(None)` means nothing was heard.
    async fn capture(&self, limits: ListenLimits) -> VoiceResult<Option<String>>;

    async fn shutdown(&self) -> VoiceResult<()> {
        Ok(())
    }
}

/// Injected into the dialog controller and completer in place of a global engine.
pub struct VoiceService {
    backend: Box<dyn VoiceBackend>,
    input: Mutex<()>,
}

impl VoiceService {
    pub fn new(backend: Box<dyn VoiceBackend>) -> Self {
        Self {
            backend,
            input: Mutex::new(()),
        }
    }

    pub async fn init(&self) -> VoiceResult<()> {
        self.backend.init().await?;
        info!("Voice service initialized");
        Ok(())
    }

    pub async fn shutdown(&self) {
        if let Err(e) = self.backend.shutdown().await {
            warn!("Voice backend shutdown failed: {e}");
        }
        info!("Voice service shut down");
    }

    /// Speaks `text`. Failures are logged and swallowed.
    pub async fn speak(&self, text: &str) {
        debug!("speak: {text}");
        if let Err(e) = self.backend.speak(text).await {
            warn!("Speech output failed (prompt not heard): {e}");
        }
    }

    /// Captures one response. Every failure mode collapses to `None`.
    pub async fn listen(&self, limits: ListenLimits) -> Option<String> {
        let _lease = match self.input.try_lock() {
            Ok(lease) => lease,
            Err(_) => {
                warn!("Capture refused: input device already in use");
                return None;
            }
        };

        let capture = self.backend.capture(limits);
        let result = match limits.deadline() {
            Some(deadline) => tokio::time::timeout(deadline, capture)
                .await
                .unwrap_or(Err(VoiceError::Timeout)),
            None => capture.await,
        };

        match result {
            Ok(Some(text)) if !text.trim().is_empty() => {
                let text = text.trim().to_string();
                debug!("heard: {text}");
                Some(text)
            }
            Ok(_) => {
                warn!("Capture returned no speech");
                None
            }
            Err(e) => {
                warn!("Voice capture failed: {e}");
                None
            }
        }
    }

    /// True when no capture currently holds the input device.
    #[cfg(test)]
    pub fn input_released(&self) -> bool {
        self.input.try_lock().is_ok()
    }
}
