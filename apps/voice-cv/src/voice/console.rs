//! Console backend: prompts go to stdout (and optionally an external TTS command),
//! answers are read line-by-line from stdin.

use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::process::Command;
use tokio::sync::Mutex;
use tracing::debug;

use super::{ListenLimits, VoiceBackend, VoiceError, VoiceResult};

pub struct ConsoleVoice {
    /// e.g. `espeak -s 150`; the spoken text is appended as the last argument.
    tts_command: Option<String>,
    stdin: Mutex<Lines<BufReader<Stdin>>>,
}

impl ConsoleVoice {
    pub fn new(tts_command: Option<String>) -> Self {
        Self {
            tts_command,
            stdin: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
        }
    }

    async fn run_tts(&self, command: &str, text: &str) -> VoiceResult<()> {
        let mut parts = command.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| VoiceError::Speech("empty TTS command".to_string()))?;
        let status = Command::new(program)
            .args(parts)
            .arg(text)
            .status()
            .await
            .map_err(|e| VoiceError::Speech(format!("{program}: {e}")))?;
        if !status.success() {
            return Err(VoiceError::Speech(format!("{program} exited with {status}")));
        }
        Ok(())
    }
}

#[async_trait]
impl VoiceBackend for ConsoleVoice {
    async fn speak(&self, text: &str) -> VoiceResult<()> {
        println!("🔊 {text}");
        match &self.tts_command {
            Some(command) => self.run_tts(command, text).await,
            None => Ok(()),
        }
    }

    async fn capture(&self, limits: ListenLimits) -> VoiceResult<Option<String>> {
        let mut lines = self.stdin.lock().await;
        println!("🎙️ Listening...");

        // A typed line arrives all at once, so the phrase limit only extends the wait.
        let line = match limits.timeout {
            Some(timeout) => {
                let wait = timeout + limits.phrase_limit.unwrap_or(Duration::ZERO);
                tokio::time::timeout(wait, lines.next_line())
                    .await
                    .map_err(|_| VoiceError::Timeout)??
            }
            None => lines.next_line().await?,
        };

        debug!("console capture: {line:?}");
        match line {
            Some(text) if text.trim().is_empty() => Err(VoiceError::Unrecognized),
            Some(text) => Ok(Some(text)),
            None => Err(VoiceError::Device("stdin closed".to_string())),
        }
    }
}
