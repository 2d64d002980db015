//! Job saver core: page records, the message protocol, and the pure popup
//! and options state machines.
mod effect;
mod msg;
mod protocol;
mod record;
mod sheet;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, Toast, ToastKind};
pub use msg::{OptionsMsg, PopupMsg, SheetValidation};
pub use protocol::{
    Request, ShortcutPayload, WireMessage, ProtocolError, SAVE_JOB_COMMAND, SAVE_JOB_SHORTCUT,
    SCRAPE_PAGE,
};
pub use record::{JobSubmission, PageRecord, RecordField};
pub use sheet::{
    parse_sheet_id, sheet_view_url, validate_json_key, JsonKeyError, SheetUrlError,
    CONFIG_JSON_KEY, CONFIG_SHEET, CONFIG_SHEET_URL,
};
pub use state::{OptionsState, PopupPhase, PopupState};
pub use update::{update_options, update_popup};
pub use view_model::{OptionsViewModel, PopupViewModel};
