// Session-level announcements.

pub const INTRODUCE_YOURSELF: &str = "Please introduce yourself. Start speaking now.";

pub const NOTHING_HEARD: &str = "Sorry, I didn't catch that.";

pub const ALL_RECORDED: &str = "All responses recorded. Generating your CV.";

pub const RESPONSES_ADDED: &str = "Thanks! I've added your responses.";

pub const CV_CREATED: &str = "Your CV has been created successfully.";

pub const EMAIL_SENT: &str = "Your CV has been emailed successfully.";

pub const EMAIL_FAILED: &str = "I was unable to send the email.";
