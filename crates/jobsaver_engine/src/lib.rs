//! Job saver engine: page scraping, message dispatch, API calls and
//! configuration storage.
mod api;
mod channel;
mod config;
mod content;
mod decode;
mod engine;
mod page;
mod persist;
mod relay;
mod save;
mod sites;
mod toast;
mod types;

pub use api::{ApiClient, ApiReply, ApiSettings, ReqwestApiClient, API_URL_ENV};
pub use channel::{LocalTab, TabChannel};
pub use config::{ConfigError, ConfigStore, FileConfigStore, MemoryConfigStore, CONFIG_FILENAME};
pub use content::ContentScript;
pub use decode::{decode_page, DecodeError, DecodedPage};
pub use engine::{EngineCommand, EngineEvent, EngineHandle, EngineServices};
pub use page::{PageContext, PageError};
pub use persist::{ensure_config_dir, AtomicFileWriter, PersistError};
pub use relay::{RelayFailure, RelayReport, ShortcutRelay};
pub use save::{ManualSave, ShortcutSaveHandler};
pub use sites::{IndeedScraper, LinkedInScraper, SeekScraper, SiteRegistry, SiteScraper};
pub use toast::{ChannelToastSink, ToastSink};
pub use types::{
    ApiError, ApiFailureKind, ChannelError, Reply, SaveOutcome, ScrapeError, Site,
};
