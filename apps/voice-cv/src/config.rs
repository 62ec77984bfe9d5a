use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::dialog::DialogConfig;
use crate::voice::ListenLimits;

/// Which collection flow a run performs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowKind {
    /// Full question bank with spoken confirmation.
    Interview,
    /// Free-form introduction, extraction, then completion.
    Monologue,
    /// Fill missing fields of an existing snapshot.
    Complete(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from: String,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub flow: FlowKind,
    pub output_dir: PathBuf,
    pub listen_timeout: Duration,
    pub phrase_limit: Duration,
    pub pause: Duration,
    pub max_capture_failures: u32,
    pub completer_max_passes: u32,
    pub tts_command: Option<String>,
    /// None disables dispatch.
    pub smtp: Option<SmtpConfig>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let flow = match get("CV_COMPLETE_FROM") {
            Some(path) => FlowKind::Complete(PathBuf::from(path)),
            None => match get("CV_FLOW").as_deref().map(str::trim) {
                None => FlowKind::Interview,
                Some(f) if f.eq_ignore_ascii_case("interview") => FlowKind::Interview,
                Some(f) if f.eq_ignore_ascii_case("monologue") => FlowKind::Monologue,
                Some(other) => bail!("CV_FLOW must be 'interview' or 'monologue', got '{other}'"),
            },
        };

        let smtp = match (
            get("SMTP_HOST"),
            get("SMTP_USERNAME"),
            get("SMTP_PASSWORD"),
            get("SMTP_FROM"),
        ) {
            (Some(host), Some(username), Some(password), Some(from)) => Some(SmtpConfig {
                host,
                port: parse_or(&get, "SMTP_PORT", 587)?,
                username,
                password,
                from,
            }),
            _ => None,
        };

        Ok(Config {
            flow,
            output_dir: get("CV_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            listen_timeout: Duration::from_secs(parse_or(&get, "CV_LISTEN_TIMEOUT_SECS", 5)?),
            phrase_limit: Duration::from_secs(parse_or(&get, "CV_PHRASE_LIMIT_SECS", 10)?),
            pause: Duration::from_secs(parse_or(&get, "CV_PAUSE_SECS", 5)?),
            max_capture_failures: parse_or::<u32>(&get, "CV_MAX_CAPTURE_FAILURES", 5)?.max(1),
            completer_max_passes: parse_or::<u32>(&get, "CV_COMPLETER_MAX_PASSES", 3)?.max(1),
            tts_command: get("CV_TTS_COMMAND"),
            smtp,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }

    pub fn dialog(&self) -> DialogConfig {
        DialogConfig {
            listen: ListenLimits::bounded(self.listen_timeout, self.phrase_limit),
            pause: self.pause,
            max_capture_failures: self.max_capture_failures,
        }
    }
}

fn parse_or<T>(get: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}
