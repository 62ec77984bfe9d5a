//! Record Completer — asks for every required field that is still missing and
//! merges the raw answers into the record according to each field's kind.

use tracing::{debug, info};

use crate::dialog::DialogController;
use crate::intake::fields::{missing_fields, FieldSpec};
use crate::models::Record;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionOutcome {
    /// True if any field was written. Gates the snapshot write.
    pub changed: bool,
    /// Fields filled, in the order they were answered.
    pub filled: Vec<String>,
    /// Fields still missing after the last pass.
    pub unresolved: Vec<String>,
    pub passes: u32,
}

pub struct RecordCompleter<'d, 'v> {
    dialog: &'d DialogController<'v>,
}

impl<'d, 'v> RecordCompleter<'d, 'v> {
    pub fn new(dialog: &'d DialogController<'v>) -> Self {
        Self { dialog }
    }

    /// One pass over `fields`. An unanswered question leaves its field missing.
    pub async fn complete(&self, record: &mut Record, fields: &[FieldSpec]) -> CompletionOutcome {
        let mut outcome = CompletionOutcome {
            passes: 1,
            ..CompletionOutcome::default()
        };

        for spec in missing_fields(record, fields) {
            match self.dialog.ask_once(spec.prompt).await {
                Some(answer) => {
                    spec.kind.merge(record, spec.name, &answer);
                    debug!("Filled '{}'", spec.name);
                    outcome.filled.push(spec.name.to_string());
                    outcome.changed = true;
                }
                None => debug!("No answer for '{}' this pass", spec.name),
            }
        }

        outcome.unresolved = missing_names(record, fields);
        outcome
    }

    /// Repeats `complete` until nothing is missing or `max_passes` is spent.
    pub async fn complete_exhaustively(
        &self,
        record: &mut Record,
        fields: &[FieldSpec],
        max_passes: u32,
    ) -> CompletionOutcome {
        let mut total = CompletionOutcome {
            unresolved: missing_names(record, fields),
            ..CompletionOutcome::default()
        };

        while !total.unresolved.is_empty() && total.passes < max_passes {
            let pass = self.complete(record, fields).await;
            total.passes += 1;
            total.changed |= pass.changed;
            total.filled.extend(pass.filled);
            total.unresolved = pass.unresolved;
        }

        info!(
            "Completion finished after {} pass(es): {} filled, {} unresolved",
            total.passes,
            total.filled.len(),
            total.unresolved.len()
        );
        total
    }
}

fn missing_names(record: &Record, fields: &[FieldSpec]) -> Vec<String> {
    missing_fields(record, fields)
        .iter()
        .map(|f| f.name.to_string())
        .collect()
}
