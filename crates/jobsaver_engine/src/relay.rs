use std::fmt;
use std::sync::Arc;

use jobsaver_core::{Request, ShortcutPayload, CONFIG_SHEET, SAVE_JOB_COMMAND, SAVE_JOB_SHORTCUT};
use jobsaver_logging::{saver_info, saver_warn};

use crate::channel::request_scrape;
use crate::{ChannelError, ConfigStore, Reply, SaveOutcome, TabChannel};

/// A step of the shortcut flow that did not produce its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayFailure {
    ConfigRead(String),
    Scrape(String),
    Forward(String),
}

impl fmt::Display for RelayFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelayFailure::ConfigRead(err) => write!(f, "reading sheet config failed: {err}"),
            RelayFailure::Scrape(err) => write!(f, "scraping the page failed: {err}"),
            RelayFailure::Forward(err) => write!(f, "forwarding to the page failed: {err}"),
        }
    }
}

/// What happened for one shortcut press. A non-empty `failures` list is a
/// partial failure: the payload was still forwarded with the missing half
/// set to `null`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayReport {
    pub payload: ShortcutPayload,
    pub failures: Vec<RelayFailure>,
    pub outcome: Option<SaveOutcome>,
}

impl RelayReport {
    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Background side of the keyboard shortcut: gathers the sheet id and the
/// page record, then hands both to the page for saving.
pub struct ShortcutRelay {
    config: Arc<dyn ConfigStore>,
    tab: Arc<dyn TabChannel>,
}

impl ShortcutRelay {
    pub fn new(config: Arc<dyn ConfigStore>, tab: Arc<dyn TabChannel>) -> Self {
        Self { config, tab }
    }

    /// Returns `None` for commands other than `save-job`.
    pub async fn on_command(&self, command: &str) -> Option<RelayReport> {
        if command != SAVE_JOB_COMMAND {
            return None;
        }
        saver_info!("Shortcut '{}' triggered", command);

        let mut failures = Vec::new();

        let sheet_id = match self.config.get(CONFIG_SHEET) {
            Ok(sheet) => sheet,
            Err(err) => {
                failures.push(RelayFailure::ConfigRead(err.to_string()));
                None
            }
        };

        let data = match request_scrape(self.tab.as_ref()).await {
            Ok(record) => Some(record),
            Err(err) => {
                failures.push(RelayFailure::Scrape(err));
                None
            }
        };

        let payload = ShortcutPayload { sheet_id, data };
        let outcome = match self.forward(payload.clone()).await {
            Ok(outcome) => Some(outcome),
            Err(err) => {
                failures.push(RelayFailure::Forward(err.to_string()));
                None
            }
        };

        for failure in &failures {
            saver_warn!("Shortcut save: {}", failure);
        }

        Some(RelayReport {
            payload,
            failures,
            outcome,
        })
    }

    async fn forward(&self, payload: ShortcutPayload) -> Result<SaveOutcome, ChannelError> {
        let message = Request::SaveJobShortcut(payload).into_wire();
        match self.tab.send(message).await? {
            Some(Reply::Saved(outcome)) => Ok(outcome),
            Some(_) => Err(ChannelError::UnexpectedReply(SAVE_JOB_SHORTCUT.into())),
            None => Err(ChannelError::NoReply(SAVE_JOB_SHORTCUT.into())),
        }
    }
}
