use std::sync::Arc;

use tracing::{info, warn};

use crate::config::Config;
use crate::dialog::DialogConfig;
use crate::dispatch::{Dispatcher, SmtpDispatcher};
use crate::document::{LatexQrEncoder, QrEncoder};
use crate::intake::{Extractor, KeywordExtractor};
use crate::storage::SnapshotStore;
use crate::voice::{ConsoleVoice, VoiceService};

/// Everything a session flow needs, built once in `main`.
pub struct AppState {
    pub voice: VoiceService,
    pub store: SnapshotStore,
    /// Pluggable monologue extractor. Default: KeywordExtractor.
    pub extractor: Arc<dyn Extractor>,
    /// None when SMTP is not configured; the CV is still written.
    pub dispatcher: Option<Arc<dyn Dispatcher>>,
    pub qr: Arc<dyn QrEncoder>,
    pub dialog: DialogConfig,
    pub completer_max_passes: u32,
}

impl AppState {
    pub fn from_config(config: &Config) -> Self {
        let dispatcher = config.smtp.as_ref().and_then(|smtp| {
            match SmtpDispatcher::new(smtp) {
                Ok(d) => {
                    info!("SMTP dispatcher enabled via {}:{}", smtp.host, smtp.port);
                    Some(Arc::new(d) as Arc<dyn Dispatcher>)
                }
                Err(e) => {
                    warn!("SMTP dispatcher disabled: {e}");
                    None
                }
            }
        });

        Self {
            voice: VoiceService::new(Box::new(ConsoleVoice::new(config.tts_command.clone()))),
            store: SnapshotStore::new(&config.output_dir),
            extractor: Arc::new(KeywordExtractor),
            dispatcher,
            qr: Arc::new(LatexQrEncoder::default()),
            dialog: config.dialog(),
            completer_max_passes: config.completer_max_passes,
        }
    }
}
