use crate::{PageRecord, PopupPhase};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PopupViewModel {
    pub phase: PopupPhase,
    pub form: PageRecord,
    pub sheet_id: String,
    pub errors: Vec<String>,
    /// Save button is disabled while any error is listed.
    pub submit_disabled: bool,
    pub button_label: &'static str,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OptionsViewModel {
    pub sheet_url: String,
    pub json_key: String,
    /// Identifier derived from `sheet_url`, shown under the input.
    pub sheet_id: String,
    pub url_error: Option<String>,
    pub json_error: Option<String>,
    pub dirty: bool,
}
