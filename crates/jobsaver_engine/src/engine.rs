use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use jobsaver_core::{
    JobSubmission, PageRecord, SheetValidation, CONFIG_JSON_KEY, CONFIG_SHEET, CONFIG_SHEET_URL,
};
use jobsaver_logging::saver_debug;

use crate::channel::request_scrape;
use crate::{
    ApiClient, ApiError, ConfigError, ConfigStore, ManualSave, RelayReport, ShortcutRelay,
    TabChannel,
};

/// Collaborators the engine runs effects against.
#[derive(Clone)]
pub struct EngineServices {
    pub config: Arc<dyn ConfigStore>,
    pub api: Arc<dyn ApiClient>,
    /// The active tab.
    pub tab: Arc<dyn TabChannel>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCommand {
    LoadSheetConfig,
    LoadOptionsConfig,
    ScrapeActiveTab,
    SaveJob(JobSubmission),
    ValidateSheet { url: String },
    PersistConfig {
        sheet_id: String,
        sheet_url: String,
        json_key: String,
    },
    ClearConfig,
    /// A global keyboard command.
    Shortcut(String),
}

#[derive(Debug)]
pub enum EngineEvent {
    SheetConfigLoaded(Result<Option<String>, ConfigError>),
    OptionsConfigLoaded(Result<(Option<String>, Option<String>), ConfigError>),
    PageScraped(Result<PageRecord, String>),
    JobSaved(Result<Option<String>, ApiError>),
    SheetValidated(Result<SheetValidation, ApiError>),
    ConfigPersisted(Result<(), ConfigError>),
    ConfigCleared(Result<(), ConfigError>),
    /// `None` when the command was not one the relay handles.
    ShortcutHandled(Option<RelayReport>),
}

/// Runs engine commands on a background tokio runtime and hands results back
/// as events. Commands run concurrently; events arrive in completion order.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(services: EngineServices) -> std::io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<EngineCommand>();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let services = services.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let event = handle_command(&services, command).await;
                    let _ = event_tx.send(event);
                });
            }
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn enqueue(&self, command: EngineCommand) {
        saver_debug!("Engine command {:?}", command);
        let _ = self.cmd_tx.send(command);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Wait up to `timeout` for the next event.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(services: &EngineServices, command: EngineCommand) -> EngineEvent {
    match command {
        EngineCommand::LoadSheetConfig => {
            EngineEvent::SheetConfigLoaded(services.config.get(CONFIG_SHEET))
        }
        EngineCommand::LoadOptionsConfig => {
            let loaded = services.config.get(CONFIG_SHEET_URL).and_then(|sheet_url| {
                let json_key = services.config.get(CONFIG_JSON_KEY)?;
                Ok((sheet_url, json_key))
            });
            EngineEvent::OptionsConfigLoaded(loaded)
        }
        EngineCommand::ScrapeActiveTab => {
            EngineEvent::PageScraped(request_scrape(services.tab.as_ref()).await)
        }
        EngineCommand::SaveJob(submission) => {
            let saver = ManualSave::new(services.api.clone());
            EngineEvent::JobSaved(saver.save(&submission).await)
        }
        EngineCommand::ValidateSheet { url } => {
            EngineEvent::SheetValidated(services.api.validate_sheet(&url).await)
        }
        EngineCommand::PersistConfig {
            sheet_id,
            sheet_url,
            json_key,
        } => {
            let config = services.config.as_ref();
            let result = config
                .set(CONFIG_SHEET, &sheet_id)
                .and_then(|()| config.set(CONFIG_SHEET_URL, &sheet_url))
                .and_then(|()| config.set(CONFIG_JSON_KEY, &json_key));
            EngineEvent::ConfigPersisted(result)
        }
        EngineCommand::ClearConfig => EngineEvent::ConfigCleared(services.config.clear()),
        EngineCommand::Shortcut(command) => {
            let relay = ShortcutRelay::new(services.config.clone(), services.tab.clone());
            EngineEvent::ShortcutHandled(relay.on_command(&command).await)
        }
    }
}
