// Session flows: interview, monologue and snapshot completion, each ending in
// the shared persist → assemble → render → dispatch pipeline.

pub mod flows;
pub mod prompts;

pub use flows::{run_session, FlowOutcome};
