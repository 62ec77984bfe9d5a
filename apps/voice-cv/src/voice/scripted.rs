//! Scripted backend for tests: replays queued responses and records everything spoken.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{ListenLimits, VoiceBackend, VoiceError, VoiceResult};

#[derive(Clone, Default)]
pub struct ScriptedVoice {
    responses: Arc<Mutex<VecDeque<Option<String>>>>,
    spoken: Arc<Mutex<Vec<String>>>,
    limits_seen: Arc<Mutex<Vec<ListenLimits>>>,
    fail_speech: bool,
    fail_init: bool,
    hang: bool,
}

impl ScriptedVoice {
    /// `None` entries simulate a capture failure. An exhausted script also fails.
    pub fn new<'a>(responses: impl IntoIterator<Item = Option<&'a str>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(
                responses.into_iter().map(|r| r.map(String::from)).collect(),
            )),
            ..Self::default()
        }
    }

    pub fn answering<'a>(responses: impl IntoIterator<Item = &'a str>) -> Self {
        Self::new(responses.into_iter().map(Some))
    }

    pub fn failing_speech(mut self) -> Self {
        self.fail_speech = true;
        self
    }

    pub fn without_device(mut self) -> Self {
        self.fail_init = true;
        self
    }

    pub fn hanging(mut self) -> Self {
        self.hang = true;
        self
    }

    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().unwrap().clone()
    }

    pub fn limits_seen(&self) -> Vec<ListenLimits> {
        self.limits_seen.lock().unwrap().clone()
    }

    pub fn remaining(&self) -> usize {
        self.responses.lock().unwrap().len()
    }
}

#[async_trait]
impl VoiceBackend for ScriptedVoice {
    async fn init(&self) -> VoiceResult<()> {
        if self.fail_init {
            return Err(VoiceError::Device("no microphone".to_string()));
        }
        Ok(())
    }

    async fn speak(&self, text: &str) -> VoiceResult<()> {
        if self.fail_speech {
            return Err(VoiceError::Speech("engine offline".to_string()));
        }
        self.spoken.lock().unwrap().push(text.to_string());
        Ok(())
    }

    async fn capture(&self, limits: ListenLimits) -> VoiceResult<Option<String>> {
        self.limits_seen.lock().unwrap().push(limits);
        if self.hang {
            std::future::pending::<()>().await;
        }
        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(Some(text)) => Ok(Some(text)),
            Some(None) => Err(VoiceError::Unrecognized),
            None => Err(VoiceError::Timeout),
        }
    }
}
