use std::sync::mpsc;
use std::time::Duration;

use jobsaver_core::{Effect, OptionsMsg, PopupMsg, Toast, ToastKind};
use jobsaver_engine::{EngineCommand, EngineEvent, EngineHandle};
use jobsaver_logging::{saver_debug, saver_warn};

/// Longest wait for a single engine event. Above the API request timeout so
/// a slow save still reports its own error.
const EVENT_TIMEOUT: Duration = Duration::from_secs(45);

/// Runs core effects: engine work goes to the background engine, toasts and
/// navigation are printed to the terminal.
pub struct EffectRunner {
    engine: EngineHandle,
    toasts: mpsc::Receiver<Toast>,
    in_flight: usize,
    // Error toasts shown since the last `take_errors`.
    errors: Vec<String>,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, toasts: mpsc::Receiver<Toast>) -> Self {
        Self {
            engine,
            toasts,
            in_flight: 0,
            errors: Vec::new(),
        }
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            let command = match effect {
                Effect::ShowToast(toast) => {
                    self.show(&toast);
                    continue;
                }
                Effect::OpenUrl(url) => {
                    println!("Open {url}");
                    continue;
                }
                Effect::OpenOptionsPage => {
                    println!("Configure the sheet with `job_saver options`.");
                    continue;
                }
                Effect::LoadSheetConfig => EngineCommand::LoadSheetConfig,
                Effect::LoadOptionsConfig => EngineCommand::LoadOptionsConfig,
                Effect::ScrapeActiveTab => EngineCommand::ScrapeActiveTab,
                Effect::SaveJob(submission) => EngineCommand::SaveJob(submission),
                Effect::ValidateSheet { url } => EngineCommand::ValidateSheet { url },
                Effect::PersistConfig {
                    sheet_id,
                    sheet_url,
                    json_key,
                } => EngineCommand::PersistConfig {
                    sheet_id,
                    sheet_url,
                    json_key,
                },
                Effect::ClearConfig => EngineCommand::ClearConfig,
            };
            saver_debug!("Engine command {:?}", command);
            self.submit(command);
        }
    }

    pub fn submit(&mut self, command: EngineCommand) {
        self.engine.enqueue(command);
        self.in_flight += 1;
    }

    /// Next event for an outstanding command, or `None` once nothing is in
    /// flight. A timed-out wait abandons the remaining commands.
    pub fn next_event(&mut self) -> Option<EngineEvent> {
        if self.in_flight == 0 {
            return None;
        }
        match self.engine.recv_timeout(EVENT_TIMEOUT) {
            Some(event) => {
                self.in_flight -= 1;
                Some(event)
            }
            None => {
                saver_warn!(
                    "Gave up waiting for {} engine event(s) after {:?}",
                    self.in_flight,
                    EVENT_TIMEOUT
                );
                self.in_flight = 0;
                None
            }
        }
    }

    /// Prints toasts raised on the page side (shortcut saves).
    pub fn flush_toasts(&mut self) {
        while let Ok(toast) = self.toasts.try_recv() {
            self.show(&toast);
        }
    }

    pub fn take_errors(&mut self) -> Vec<String> {
        std::mem::take(&mut self.errors)
    }

    fn show(&mut self, toast: &Toast) {
        print_toast(toast);
        if toast.kind == ToastKind::Error {
            self.errors.push(toast.text.clone());
        }
    }
}

pub fn print_toast(toast: &Toast) {
    match toast.kind {
        ToastKind::Success => println!("[ok] {}", toast.text),
        ToastKind::Error => println!("[error] {}", toast.text),
    }
}

pub fn popup_msg(event: EngineEvent) -> Option<PopupMsg> {
    match event {
        EngineEvent::SheetConfigLoaded(result) => Some(PopupMsg::SheetConfigLoaded(
            result.unwrap_or_else(|err| {
                saver_warn!("Reading sheet config failed: {}", err);
                None
            }),
        )),
        EngineEvent::PageScraped(result) => Some(PopupMsg::PageScraped(result)),
        EngineEvent::JobSaved(result) => Some(PopupMsg::SaveFinished(result.map_err(|err| {
            saver_warn!("Saving the job failed: {}", err);
            err.to_string()
        }))),
        other => {
            saver_debug!("Popup ignores {:?}", other);
            None
        }
    }
}

pub fn options_msg(event: EngineEvent) -> Option<OptionsMsg> {
    match event {
        EngineEvent::OptionsConfigLoaded(result) => {
            let (sheet_url, json_key) = result.unwrap_or_else(|err| {
                saver_warn!("Reading options config failed: {}", err);
                (None, None)
            });
            Some(OptionsMsg::OptionsConfigLoaded {
                sheet_url,
                json_key,
            })
        }
        EngineEvent::ConfigPersisted(result) => Some(OptionsMsg::ConfigPersisted(
            result.map_err(|err| err.to_string()),
        )),
        EngineEvent::ConfigCleared(result) => Some(OptionsMsg::ConfigCleared(
            result.map_err(|err| err.to_string()),
        )),
        EngineEvent::SheetValidated(result) => Some(OptionsMsg::SheetValidated(
            result.map_err(|err| err.server_message.clone().unwrap_or_else(|| err.to_string())),
        )),
        other => {
            saver_debug!("Options page ignores {:?}", other);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobsaver_core::{PageRecord, SheetValidation};
    use jobsaver_engine::{ApiError, ApiFailureKind};
    use pretty_assertions::assert_eq;

    #[test]
    fn validation_errors_prefer_the_server_message() {
        let err = ApiError {
            kind: ApiFailureKind::Rejected,
            message: "rejected".to_string(),
            server_message: Some("Sheet not shared with service account".to_string()),
        };
        let msg = options_msg(EngineEvent::SheetValidated(Err(err)));
        assert_eq!(
            msg,
            Some(OptionsMsg::SheetValidated(Err(
                "Sheet not shared with service account".to_string()
            )))
        );

        let ok = options_msg(EngineEvent::SheetValidated(Ok(SheetValidation {
            sheet_id: "abc".to_string(),
            message: "Sheet is valid".to_string(),
        })));
        assert!(matches!(ok, Some(OptionsMsg::SheetValidated(Ok(_)))));
    }

    #[test]
    fn events_reach_only_their_page() {
        let scraped = EngineEvent::PageScraped(Ok(PageRecord::new("Acme", "Dev", "https://x")));
        assert!(options_msg(scraped).is_none());
        assert!(popup_msg(EngineEvent::ConfigCleared(Ok(()))).is_none());
        assert_eq!(
            popup_msg(EngineEvent::SheetConfigLoaded(Ok(Some("abc".to_string())))),
            Some(PopupMsg::SheetConfigLoaded(Some("abc".to_string())))
        );
    }
}
