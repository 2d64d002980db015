use std::sync::Arc;

use jobsaver_core::{JobSubmission, ShortcutPayload, Toast};
use jobsaver_logging::{saver_info, saver_warn};

use crate::{ApiClient, ApiError, SaveOutcome, ToastSink};

const SAVED: &str = "Saved Job";
const NOT_CONFIGURED: &str = "Google Sheet not configured";
const PAGE_NOT_SUPPORTED: &str = "Page is not supported for auto job saving";
const SAVE_FAILED: &str = "Failed to save the job";

/// Shortcut-path save, running in page context. Writes through the query
/// string endpoint and reports every outcome as a toast.
pub struct ShortcutSaveHandler {
    api: Arc<dyn ApiClient>,
    toasts: Arc<dyn ToastSink>,
}

impl ShortcutSaveHandler {
    pub fn new(api: Arc<dyn ApiClient>, toasts: Arc<dyn ToastSink>) -> Self {
        Self { api, toasts }
    }

    pub async fn handle(&self, payload: ShortcutPayload) -> SaveOutcome {
        let outcome = self.save(payload).await;
        self.toasts.show(toast_for(&outcome));
        outcome
    }

    async fn save(&self, payload: ShortcutPayload) -> SaveOutcome {
        let Some(record) = payload.data else {
            return SaveOutcome::PageNotSupported;
        };
        let Some(sheet_id) = payload.sheet_id.filter(|id| !id.is_empty()) else {
            return SaveOutcome::NotConfigured;
        };

        let submission = record.with_sheet(sheet_id);
        match self.api.save_job_via_query(&submission).await {
            Ok(reply) => {
                saver_info!("Saved job '{}' at '{}'", submission.role, submission.company);
                SaveOutcome::Saved {
                    message: reply.message,
                }
            }
            Err(err) => {
                saver_warn!("Shortcut save failed: {}", err);
                SaveOutcome::Failed {
                    message: failure_message(err),
                }
            }
        }
    }
}

fn failure_message(err: ApiError) -> String {
    err.server_message
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| SAVE_FAILED.to_string())
}

fn toast_for(outcome: &SaveOutcome) -> Toast {
    match outcome {
        SaveOutcome::Saved { .. } => Toast::success(SAVED),
        SaveOutcome::NotConfigured => Toast::error(NOT_CONFIGURED),
        SaveOutcome::PageNotSupported => Toast::error(PAGE_NOT_SUPPORTED),
        SaveOutcome::Failed { message } => Toast::error(message.clone()),
    }
}

/// Popup-path save, running in the extension's own context: always a
/// body-bearing POST, whatever the configuration looks like.
pub struct ManualSave {
    api: Arc<dyn ApiClient>,
}

impl ManualSave {
    pub fn new(api: Arc<dyn ApiClient>) -> Self {
        Self { api }
    }

    /// `Ok` carries the server's `message`, if it sent one.
    pub async fn save(&self, submission: &JobSubmission) -> Result<Option<String>, ApiError> {
        let reply = self.api.save_job(submission).await?;
        Ok(reply.message)
    }
}
