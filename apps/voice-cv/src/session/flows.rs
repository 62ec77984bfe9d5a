//! Collection flows and the shared publish pipeline.
//!
//! Every flow ends the same way: commit a snapshot (plus the current pointer),
//! assemble the document model, render it, then optionally email it. A
//! persistence failure aborts the flow but hands the record back inside
//! `AppError::Persistence` so `main` can retry without repeating the dialog.
//! Only writes of a record that has already been through completion are
//! fatal, so a retried record never skips the Completer.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::FlowKind;
use crate::dialog::DialogController;
use crate::dispatch::{dispatch_target, BODY, SUBJECT};
use crate::document::{assemble, render_document, Header, LatexRenderer, Renderer};
use crate::errors::AppError;
use crate::intake::{RecordCompleter, INTERVIEW_FIELDS, REQUIRED_FIELDS};
use crate::models::{Record, NOT_PROVIDED};
use crate::session::prompts::*;
use crate::state::AppState;
use crate::storage::{Committed, SnapshotStore};
use crate::voice::ListenLimits;

const ARTIFACT_EXTENSION: &str = "tex";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchStatus {
    /// No usable address, or no dispatcher configured.
    NotAttempted,
    Sent,
    Failed,
}

#[derive(Debug)]
pub struct Publication {
    pub record: Record,
    /// Snapshots written by this run, oldest first.
    pub snapshots: Vec<PathBuf>,
    pub artifact: PathBuf,
    pub dispatch: DispatchStatus,
}

#[derive(Debug)]
pub enum FlowOutcome {
    /// Nothing was captured; nothing was written.
    Abandoned,
    Produced(Publication),
}

/// Initializes voice, runs the selected flow and, on a persistence failure,
/// retries persist-and-publish once with the record the error carries.
pub async fn run_session(state: &AppState, flow: &FlowKind) -> Result<FlowOutcome, AppError> {
    state.voice.init().await?;
    match run(state, flow).await {
        Err(err @ AppError::Persistence { .. }) => {
            warn!("{err}; retrying once with the collected record");
            let record = err.recover_record()?;
            persist_and_publish(state, record).await
        }
        other => other,
    }
}

pub async fn run(state: &AppState, flow: &FlowKind) -> Result<FlowOutcome, AppError> {
    match flow {
        FlowKind::Interview => run_interview(state).await,
        FlowKind::Monologue => run_monologue(state).await,
        FlowKind::Complete(source) => run_completion(state, source).await,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Flows
// ────────────────────────────────────────────────────────────────────────────

/// Full question bank with confirmation. A field whose capture bound is hit
/// is stored as "Not provided" and the interview moves on.
pub async fn run_interview(state: &AppState) -> Result<FlowOutcome, AppError> {
    info!("Starting interview ({} questions)", INTERVIEW_FIELDS.len());
    let dialog = DialogController::new(&state.voice, state.dialog.clone());

    let mut record = Record::new();
    for spec in INTERVIEW_FIELDS {
        let value = match dialog.resolve_field(spec.name, spec.prompt).await {
            Ok(resolution) => resolution.into_value(),
            Err(e) => {
                warn!("{e}; leaving '{}' unset", spec.name);
                NOT_PROVIDED.to_string()
            }
        };
        spec.kind.merge(&mut record, spec.name, &value);
    }

    let committed = commit(state, &record)?;
    state.voice.speak(ALL_RECORDED).await;
    let snapshots = vec![committed.snapshot];
    let publication = publish(state, record, snapshots, &committed.timestamp).await?;
    Ok(FlowOutcome::Produced(publication))
}

/// Free-form introduction → Extractor → Completer.
pub async fn run_monologue(state: &AppState) -> Result<FlowOutcome, AppError> {
    state.voice.speak(INTRODUCE_YOURSELF).await;
    let Some(monologue) = state.voice.listen(ListenLimits::unbounded()).await else {
        state.voice.speak(NOTHING_HEARD).await;
        info!("No monologue captured; nothing written");
        return Ok(FlowOutcome::Abandoned);
    };
    debug!("Monologue captured ({} chars)", monologue.len());

    let mut record = state.extractor.extract(&monologue);
    // The extracted snapshot is best effort; the completed record is the one
    // that must reach disk.
    let initial = match commit(state, &record) {
        Ok(committed) => Some(committed),
        Err(e) => {
            warn!("{e}; continuing to completion");
            None
        }
    };
    let mut snapshots: Vec<PathBuf> = initial.iter().map(|c| c.snapshot.clone()).collect();

    let dialog = DialogController::new(&state.voice, state.dialog.clone());
    let outcome = RecordCompleter::new(&dialog)
        .complete_exhaustively(&mut record, REQUIRED_FIELDS, state.completer_max_passes)
        .await;
    if outcome.changed {
        state.voice.speak(RESPONSES_ADDED).await;
    }
    let committed = match initial {
        Some(committed) if !outcome.changed => committed,
        _ => {
            let committed = commit(state, &record)?;
            snapshots.push(committed.snapshot.clone());
            committed
        }
    };

    let publication = publish(state, record, snapshots, &committed.timestamp).await?;
    Ok(FlowOutcome::Produced(publication))
}

/// Fills the still-missing required fields of an existing snapshot. The source
/// file is only read.
pub async fn run_completion(state: &AppState, source: &Path) -> Result<FlowOutcome, AppError> {
    info!("Completing snapshot {}", source.display());
    let mut record = state.store.load(source).map_err(|e| {
        anyhow::Error::new(e).context(format!("Cannot complete from {}", source.display()))
    })?;

    let dialog = DialogController::new(&state.voice, state.dialog.clone());
    let outcome = RecordCompleter::new(&dialog)
        .complete_exhaustively(&mut record, REQUIRED_FIELDS, state.completer_max_passes)
        .await;

    let (snapshots, timestamp) = if outcome.changed {
        let committed = commit(state, &record)?;
        state.voice.speak(RESPONSES_ADDED).await;
        (vec![committed.snapshot], committed.timestamp)
    } else {
        info!("Snapshot already complete; no new snapshot written");
        state
            .store
            .update_current(&record)
            .map_err(|e| AppError::persistence(e, &record))?;
        (Vec::new(), SnapshotStore::timestamp_now())
    };

    let publication = publish(state, record, snapshots, &timestamp).await?;
    Ok(FlowOutcome::Produced(publication))
}

/// Retry entry point for a record recovered from `AppError::Persistence`.
pub async fn persist_and_publish(
    state: &AppState,
    record: Record,
) -> Result<FlowOutcome, AppError> {
    let committed = commit(state, &record)?;
    let snapshots = vec![committed.snapshot];
    let publication = publish(state, record, snapshots, &committed.timestamp).await?;
    Ok(FlowOutcome::Produced(publication))
}

// ────────────────────────────────────────────────────────────────────────────
// Shared pipeline
// ────────────────────────────────────────────────────────────────────────────

fn commit(state: &AppState, record: &Record) -> Result<Committed, AppError> {
    state
        .store
        .commit(record)
        .map_err(|e| AppError::persistence(e, record))
}

async fn publish(
    state: &AppState,
    record: Record,
    snapshots: Vec<PathBuf>,
    timestamp: &str,
) -> Result<Publication, AppError> {
    let header = match state.store.load_current() {
        Ok(current) => Header::from_record(current.as_ref()),
        Err(e) => {
            warn!("Current pointer unreadable, using default header: {e}");
            Header::from_record(None)
        }
    };

    let model = assemble(&record);
    let artifact = state.store.artifact_path(timestamp, ARTIFACT_EXTENSION);
    let mut renderer = LatexRenderer::new();
    render_document(&model, &header, &mut renderer, state.qr.as_ref())?;
    renderer.save(&artifact)?;
    info!("CV rendered to {}", artifact.display());
    state.voice.speak(CV_CREATED).await;

    let dispatch = dispatch(state, &record, &artifact).await;
    Ok(Publication {
        record,
        snapshots,
        artifact,
        dispatch,
    })
}

async fn dispatch(state: &AppState, record: &Record, artifact: &Path) -> DispatchStatus {
    let Some(to) = dispatch_target(record) else {
        debug!("No usable email address; CV not emailed");
        return DispatchStatus::NotAttempted;
    };
    let Some(dispatcher) = state.dispatcher.as_ref() else {
        info!("No dispatcher configured; CV not emailed");
        return DispatchStatus::NotAttempted;
    };

    match dispatcher.send(to, SUBJECT, BODY, artifact).await {
        Ok(()) => {
            state.voice.speak(EMAIL_SENT).await;
            DispatchStatus::Sent
        }
        Err(e) => {
            warn!("Dispatch to {to} failed: {e}");
            state.voice.speak(EMAIL_FAILED).await;
            DispatchStatus::Failed
        }
    }
}
