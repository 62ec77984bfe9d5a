//! Spoken command classification.
//!
//! Matching is a case-insensitive substring test with a fixed priority:
//! `skip` > `repeat` > `pause` > answer. "Yesterday" therefore confirms and
//! "I'd rather skip it, yes" skips; both are accepted consequences of substring matching.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Skip,
    Repeat,
    Pause,
    /// Not a command: the response is a candidate value.
    Answer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationReply {
    Skip,
    Confirm,
    Reject,
}

/// Ordered by priority; the first match wins.
const COMMAND_KEYWORDS: &[(&str, Command)] = &[
    ("skip", Command::Skip),
    ("repeat", Command::Repeat),
    ("pause", Command::Pause),
];

pub fn classify(response: &str) -> Command {
    let lower = response.to_lowercase();
    COMMAND_KEYWORDS
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, command)| *command)
        .unwrap_or(Command::Answer)
}

/// Classifies the reply to "Should I save this?". Skip still outranks yes.
pub fn classify_confirmation(reply: &str) -> ConfirmationReply {
    let lower = reply.to_lowercase();
    if lower.contains("skip") {
        ConfirmationReply::Skip
    } else if lower.contains("yes") {
        ConfirmationReply::Confirm
    } else {
        ConfirmationReply::Reject
    }
}
