//! Dialog Controller — the per-field confirmation state machine.
//!
//! ```text
//!            ┌──── repeat / pause / capture failure ────┐
//!            ▼                                           │
//!        Pending ── answer ──▶ AwaitingConfirmation ── yes ──▶ Confirmed
//!            │  ▲                      │
//!          skip └──── anything else ───┤
//!            ▼                         skip
//!         Skipped ◀────────────────────┘
//! ```
//!
//! Consecutive capture failures on the question are bounded by
//! `DialogConfig::max_capture_failures`; reaching the bound is a hard failure.

use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::dialog::commands::{classify, classify_confirmation, Command, ConfirmationReply};
use crate::dialog::prompts::{
    confirmation_prompt, CAPTURE_FAILED_NOTICE, CAPTURE_GAVE_UP_NOTICE, PAUSE_NOTICE,
    REPEAT_NOTICE, RETRY_NOTICE, SKIP_NOTICE,
};
use crate::models::SKIPPED_BY_USER;
use crate::voice::{ListenLimits, VoiceService};

#[derive(Debug, Error)]
pub enum DialogError {
    #[error("No usable response for '{field}' after {attempts} attempts")]
    CaptureExhausted { field: String, attempts: u32 },
}

/// Confirmation state of one field during the full interview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldState {
    Pending,
    AwaitingConfirmation(String),
    Confirmed(String),
    Skipped,
}

/// Terminal outcome of `resolve_field`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Confirmed(String),
    Skipped,
}

impl Resolution {
    /// The value stored in the record: the confirmed text or the skip sentinel.
    pub fn into_value(self) -> String {
        match self {
            Resolution::Confirmed(value) => value,
            Resolution::Skipped => SKIPPED_BY_USER.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DialogConfig {
    /// Limits for question and confirmation captures.
    pub listen: ListenLimits,
    pub pause: Duration,
    pub max_capture_failures: u32,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            listen: ListenLimits::bounded(Duration::from_secs(5), Duration::from_secs(10)),
            pause: Duration::from_secs(5),
            max_capture_failures: 5,
        }
    }
}

pub struct DialogController<'a> {
    voice: &'a VoiceService,
    config: DialogConfig,
}

impl<'a> DialogController<'a> {
    pub fn new(voice: &'a VoiceService, config: DialogConfig) -> Self {
        Self { voice, config }
    }

    /// Asks `prompt` until the user confirms a value or skips.
    pub async fn resolve_field(
        &self,
        field: &str,
        prompt: &str,
    ) -> Result<Resolution, DialogError> {
        let mut state = FieldState::Pending;
        let mut failures = 0u32;

        loop {
            state = match state {
                FieldState::Pending => {
                    self.voice.speak(prompt).await;
                    match self.voice.listen(self.config.listen).await {
                        None => {
                            failures += 1;
                            warn!(
                                "No response for '{field}' ({failures}/{})",
                                self.config.max_capture_failures
                            );
                            if failures >= self.config.max_capture_failures {
                                self.voice.speak(CAPTURE_GAVE_UP_NOTICE).await;
                                return Err(DialogError::CaptureExhausted {
                                    field: field.to_string(),
                                    attempts: failures,
                                });
                            }
                            self.voice.speak(CAPTURE_FAILED_NOTICE).await;
                            FieldState::Pending
                        }
                        Some(response) => {
                            failures = 0;
                            self.on_response(field, response).await
                        }
                    }
                }

                FieldState::AwaitingConfirmation(candidate) => {
                    self.voice.speak(&confirmation_prompt(&candidate)).await;
                    let reply = self.voice.listen(self.config.listen).await;
                    match reply.as_deref().map(classify_confirmation) {
                        Some(ConfirmationReply::Confirm) => FieldState::Confirmed(candidate),
                        Some(ConfirmationReply::Skip) => {
                            self.voice.speak(SKIP_NOTICE).await;
                            FieldState::Skipped
                        }
                        Some(ConfirmationReply::Reject) | None => {
                            debug!("Candidate for '{field}' rejected");
                            self.voice.speak(RETRY_NOTICE).await;
                            FieldState::Pending
                        }
                    }
                }

                FieldState::Confirmed(value) => {
                    info!("Field '{field}' confirmed");
                    return Ok(Resolution::Confirmed(value));
                }

                FieldState::Skipped => {
                    info!("Field '{field}' skipped by user");
                    return Ok(Resolution::Skipped);
                }
            };
        }
    }

    async fn on_response(&self, field: &str, response: String) -> FieldState {
        let command = classify(&response);
        debug!("'{field}' response classified as {command:?}");
        match command {
            Command::Skip => {
                self.voice.speak(SKIP_NOTICE).await;
                FieldState::Skipped
            }
            Command::Repeat => {
                self.voice.speak(REPEAT_NOTICE).await;
                FieldState::Pending
            }
            Command::Pause => {
                self.voice.speak(PAUSE_NOTICE).await;
                tokio::time::sleep(self.config.pause).await;
                FieldState::Pending
            }
            Command::Answer => FieldState::AwaitingConfirmation(response),
        }
    }

    /// Single-question variant: no commands, no confirmation, no retry.
    pub async fn ask_once(&self, prompt: &str) -> Option<String> {
        self.voice.speak(prompt).await;
        self.voice.listen(self.config.listen).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voice::scripted::ScriptedVoice;

    const PROMPT: &str = "What is your full name?";

    fn service(voice: &ScriptedVoice) -> VoiceService {
        VoiceService::new(Box::new(voice.clone()))
    }

    fn config(max_capture_failures: u32) -> DialogConfig {
        DialogConfig {
            max_capture_failures,
            ..DialogConfig::default()
        }
    }

    fn count(spoken: &[String], text: &str) -> usize {
        spoken.iter().filter(|s| s.as_str() == text).count()
    }

    // ── confirm / skip ──────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_answer_then_yes_confirms() {
        let voice = ScriptedVoice::answering(["Alenso Joseph", "yes"]);
        let service = service(&voice);
        let dialog = DialogController::new(&service, config(5));

        let resolution = dialog.resolve_field("name", PROMPT).await.unwrap();

        assert_eq!(resolution, Resolution::Confirmed("Alenso Joseph".to_string()));
        assert_eq!(
            voice.spoken(),
            vec![PROMPT.to_string(), confirmation_prompt("Alenso Joseph")]
        );
    }

    #[tokio::test]
    async fn test_skip_yields_sentinel() {
        let voice = ScriptedVoice::answering(["skip"]);
        let service = service(&voice);
        let dialog = DialogController::new(&service, config(5));

        let resolution = dialog.resolve_field("github", PROMPT).await.unwrap();

        assert_eq!(resolution, Resolution::Skipped);
        assert_eq!(resolution.into_value(), SKIPPED_BY_USER);
        assert_eq!(count(&voice.spoken(), SKIP_NOTICE), 1);
    }

    #[tokio::test]
    async fn test_skip_during_confirmation() {
        let voice = ScriptedVoice::answering(["Alenso", "yes, skip it"]);
        let service = service(&voice);
        let dialog = DialogController::new(&service, config(5));

        assert_eq!(
            dialog.resolve_field("name", PROMPT).await.unwrap(),
            Resolution::Skipped
        );
    }

    // ── repeat / pause ──────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_repeat_reasks_same_prompt() {
        let voice = ScriptedVoice::answering(["please repeat", "Alenso", "yes"]);
        let service = service(&voice);
        let dialog = DialogController::new(&service, config(5));

        let resolution = dialog.resolve_field("name", PROMPT).await.unwrap();

        assert_eq!(resolution, Resolution::Confirmed("Alenso".to_string()));
        let spoken = voice.spoken();
        assert_eq!(count(&spoken, PROMPT), 2);
        assert_eq!(count(&spoken, REPEAT_NOTICE), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_suspends_for_configured_delay() {
        let voice = ScriptedVoice::answering(["pause", "Kochi", "yes"]);
        let service = service(&voice);
        let dialog = DialogController::new(&service, config(5));

        let started = tokio::time::Instant::now();
        let resolution = dialog.resolve_field("location", PROMPT).await.unwrap();

        assert_eq!(resolution, Resolution::Confirmed("Kochi".to_string()));
        assert!(started.elapsed() >= Duration::from_secs(5));
        assert_eq!(count(&voice.spoken(), PAUSE_NOTICE), 1);
        assert_eq!(count(&voice.spoken(), PROMPT), 2);
    }

    // ── rejection ───────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_negative_confirmations_never_write_value() {
        let voice = ScriptedVoice::answering([
            "Alenso", "no", "Alonso", "nope", "wrong", "no", "skip",
        ]);
        let service = service(&voice);
        let dialog = DialogController::new(&service, config(5));

        let resolution = dialog.resolve_field("name", PROMPT).await.unwrap();

        assert_eq!(resolution, Resolution::Skipped);
        assert_eq!(count(&voice.spoken(), RETRY_NOTICE), 3);
    }

    #[tokio::test]
    async fn test_missing_confirmation_counts_as_rejection() {
        let voice = ScriptedVoice::new([Some("Alenso"), None, Some("Alenso"), Some("yes")]);
        let service = service(&voice);
        let dialog = DialogController::new(&service, config(5));

        let resolution = dialog.resolve_field("name", PROMPT).await.unwrap();

        assert_eq!(resolution, Resolution::Confirmed("Alenso".to_string()));
        assert_eq!(count(&voice.spoken(), RETRY_NOTICE), 1);
    }

    // ── capture failures ────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_capture_failure_reprompts() {
        let voice = ScriptedVoice::new([None, Some("Alenso"), Some("yes")]);
        let service = service(&voice);
        let dialog = DialogController::new(&service, config(5));

        let resolution = dialog.resolve_field("name", PROMPT).await.unwrap();

        assert_eq!(resolution, Resolution::Confirmed("Alenso".to_string()));
        assert_eq!(count(&voice.spoken(), CAPTURE_FAILED_NOTICE), 1);
        assert_eq!(count(&voice.spoken(), PROMPT), 2);
    }

    #[tokio::test]
    async fn test_capture_failures_are_bounded() {
        let voice = ScriptedVoice::new([None, None, None, None]);
        let service = service(&voice);
        let dialog = DialogController::new(&service, config(3));

        let err = dialog.resolve_field("email", PROMPT).await.unwrap_err();

        match err {
            DialogError::CaptureExhausted { field, attempts } => {
                assert_eq!(field, "email");
                assert_eq!(attempts, 3);
            }
        }
        assert_eq!(voice.remaining(), 1);
        assert_eq!(count(&voice.spoken(), CAPTURE_GAVE_UP_NOTICE), 1);
        assert!(service.input_released());
    }

    #[tokio::test]
    async fn test_successful_capture_resets_failure_counter() {
        let voice = ScriptedVoice::new([
            None,
            Some("Alenso"),
            Some("no"),
            None,
            Some("Alenso J"),
            Some("yes"),
        ]);
        let service = service(&voice);
        let dialog = DialogController::new(&service, config(2));

        let resolution = dialog.resolve_field("name", PROMPT).await.unwrap();

        assert_eq!(resolution, Resolution::Confirmed("Alenso J".to_string()));
    }

    // ── ask_once ────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_ask_once_returns_raw_response() {
        let voice = ScriptedVoice::answering(["skip"]);
        let service = service(&voice);
        let dialog = DialogController::new(&service, config(5));

        assert_eq!(dialog.ask_once(PROMPT).await.as_deref(), Some("skip"));
        assert_eq!(voice.spoken(), vec![PROMPT.to_string()]);
    }

    #[tokio::test]
    async fn test_ask_once_does_not_retry() {
        let voice = ScriptedVoice::new([None, Some("late answer")]);
        let service = service(&voice);
        let dialog = DialogController::new(&service, config(5));

        assert_eq!(dialog.ask_once(PROMPT).await, None);
        assert_eq!(voice.remaining(), 1);
    }

    #[tokio::test]
    async fn test_question_captures_use_bounded_limits() {
        let voice = ScriptedVoice::answering(["Alenso", "yes"]);
        let service = service(&voice);
        let dialog = DialogController::new(&service, config(5));

        dialog.resolve_field("name", PROMPT).await.unwrap();

        assert!(voice
            .limits_seen()
            .iter()
            .all(|l| l.timeout.is_some() && l.phrase_limit.is_some()));
    }
}
