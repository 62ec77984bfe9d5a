// Fixed notices spoken by the Dialog Controller.

pub const CAPTURE_FAILED_NOTICE: &str = "I didn't catch that. Please try again.";

pub const CAPTURE_GAVE_UP_NOTICE: &str =
    "I'm having trouble hearing you, so I'll stop asking this question for now.";

pub const SKIP_NOTICE: &str = "Skipping this question.";

pub const REPEAT_NOTICE: &str = "Repeating the question.";

pub const PAUSE_NOTICE: &str = "Pausing for a few seconds.";

pub const RETRY_NOTICE: &str = "Okay, let's try again.";

/// Confirmation template. Replace `{response}` before speaking.
pub const CONFIRMATION_TEMPLATE: &str = "You said: {response}. Should I save this? Say Yes or No.";

pub fn confirmation_prompt(response: &str) -> String {
    CONFIRMATION_TEMPLATE.replace("{response}", response)
}
