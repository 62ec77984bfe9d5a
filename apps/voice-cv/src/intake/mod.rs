// Intake: turning speech into a Record.
// The Extractor handles the free-form monologue; the Completer fills whatever
// required fields are still missing by asking targeted questions.

pub mod completer;
pub mod extractor;
pub mod fields;
pub mod prompts;

pub use completer::RecordCompleter;
pub use extractor::{Extractor, KeywordExtractor};
pub use fields::{INTERVIEW_FIELDS, REQUIRED_FIELDS};
