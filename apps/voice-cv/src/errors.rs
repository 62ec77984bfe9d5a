use thiserror::Error;

use crate::document::RenderError;
use crate::models::Record;
use crate::storage::PersistenceError;
use crate::voice::VoiceError;

/// Application-level error type returned by the session flows.
#[derive(Debug, Error)]
pub enum AppError {
    /// Fatal for the run, but the in-memory record travels with the error so
    /// the write can be retried without repeating the dialog.
    #[error("Persistence error: {source}")]
    Persistence {
        #[source]
        source: PersistenceError,
        record: Box<Record>,
    },

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Voice error: {0}")]
    Voice(#[from] VoiceError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn persistence(source: PersistenceError, record: &Record) -> Self {
        AppError::Persistence {
            source,
            record: Box::new(record.clone()),
        }
    }

    /// Short machine-readable code, used in the final log line.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Persistence { .. } => "PERSISTENCE_ERROR",
            AppError::Render(_) => "RENDER_ERROR",
            AppError::Voice(_) => "VOICE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// The record preserved by a persistence failure, if this is one.
    pub fn recover_record(self) -> Result<Record, AppError> {
        match self {
            AppError::Persistence { record, .. } => Ok(*record),
            other => Err(other),
        }
    }
}
