// Question Bank text, one constant per asked field.

// ── Required fields (monologue follow-up) ───────────────────────────────────

pub const ASK_NAME: &str = "What is your full name?";
pub const ASK_PROFESSION: &str = "What is your profession or role?";
pub const ASK_LOCATION: &str = "Where are you currently based?";
pub const ASK_QUALIFICATION: &str = "What is your latest qualification and where did you study?";
pub const ASK_WORK: &str = "Can you briefly describe your work or internship experience?";
pub const ASK_PROJECT: &str = "Tell me about a project you've worked on.";
pub const ASK_EMAIL: &str = "What is your email address?";

// ── Full interview ──────────────────────────────────────────────────────────

pub const ASK_DATE_OF_BIRTH: &str =
    "What is your date of birth? (Please provide in DD/MM/YYYY format)";
pub const ASK_COUNTRY: &str = "Which country do you currently live in?";
pub const ASK_CITY: &str = "Which city do you currently live in?";
pub const ASK_PHONE: &str = "What is your phone number, including the country code?";
pub const ASK_GITHUB: &str =
    "Do you have a GitHub profile or portfolio link you'd like to include?";
pub const ASK_LIVING: &str = "What do you do for a living?";
pub const ASK_LINKEDIN: &str = "Do you have a LinkedIn profile you'd like to share?";
pub const ASK_DEGREE: &str =
    "What is your highest degree and the name of your university/college?";
pub const ASK_SCHOOL: &str = "Which school did you attend for your XII (12th grade)?";
pub const ASK_JOBS: &str = "Have you had any internships or job experiences? \
    If yes, mention your position, company, and duration.";
pub const ASK_LEADERSHIP: &str = "Have you held any leadership positions in college, clubs, \
    or organizations? Please describe.";
pub const ASK_PROJECTS: &str = "Have you worked on any academic or personal projects? \
    Provide the title and a brief description.";
pub const ASK_ACHIEVEMENTS: &str = "Have you received any certifications or participated in \
    any competitions? If yes, please specify.";
pub const ASK_QR: &str =
    "Would you like to include a QR code linking to your LinkedIn profile? (Yes/No)";
pub const ASK_STYLE: &str = "Which CV style do you prefer? Say 'Basic' or 'Highlight'.";
