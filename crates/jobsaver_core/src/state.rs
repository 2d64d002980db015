use crate::view_model::{OptionsViewModel, PopupViewModel};
use crate::{PageRecord, RecordField, SheetUrlError};

pub(crate) const SHEET_NOT_CONFIGURED: &str = "Google Sheet not configured";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PopupPhase {
    #[default]
    Idle,
    /// Waiting for the config read and page scrape.
    Loading,
    Ready,
    Saving,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PopupState {
    phase: PopupPhase,
    form: PageRecord,
    sheet_id: String,
    errors: Vec<String>,
    config_pending: bool,
    scrape_pending: bool,
    dirty: bool,
}

impl PopupState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> PopupViewModel {
        PopupViewModel {
            phase: self.phase,
            form: self.form.clone(),
            sheet_id: self.sheet_id.clone(),
            errors: self.errors.clone(),
            submit_disabled: !self.errors.is_empty(),
            button_label: if self.phase == PopupPhase::Saving {
                "Saving..."
            } else {
                "Save Job"
            },
            dirty: self.dirty,
        }
    }

    pub fn phase(&self) -> PopupPhase {
        self.phase
    }

    pub fn form(&self) -> &PageRecord {
        &self.form
    }

    pub fn sheet_id(&self) -> &str {
        &self.sheet_id
    }

    /// Returns whether the state changed since the last call, clearing the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Start a fresh load; results from an earlier one no longer apply.
    pub(crate) fn begin_loading(&mut self) {
        self.phase = PopupPhase::Loading;
        self.errors.clear();
        self.sheet_id.clear();
        self.config_pending = true;
        self.scrape_pending = true;
        self.dirty = true;
    }

    pub(crate) fn apply_sheet_config(&mut self, sheet: Option<String>) {
        match sheet.filter(|id| !id.is_empty()) {
            Some(id) => self.sheet_id = id,
            None => self.errors.push(SHEET_NOT_CONFIGURED.to_string()),
        }
        self.config_pending = false;
        self.settle_loading();
    }

    pub(crate) fn apply_scrape(&mut self, record: Option<PageRecord>) {
        if let Some(record) = record {
            self.form = record;
        }
        self.scrape_pending = false;
        self.settle_loading();
    }

    pub(crate) fn set_field(&mut self, field: RecordField, value: String) {
        self.form.set_field(field, value);
        self.dirty = true;
    }

    /// Submission is possible once loading is over, no configuration error is
    /// outstanding, and every field is filled in.
    pub(crate) fn can_submit(&self) -> bool {
        matches!(self.phase, PopupPhase::Ready | PopupPhase::Idle)
            && self.errors.is_empty()
            && self.form.is_complete()
    }

    pub(crate) fn begin_saving(&mut self) {
        self.phase = PopupPhase::Saving;
        self.dirty = true;
    }

    pub(crate) fn finish_saving(&mut self) {
        self.phase = PopupPhase::Idle;
        self.dirty = true;
    }

    fn settle_loading(&mut self) {
        if self.phase == PopupPhase::Loading && !self.config_pending && !self.scrape_pending {
            self.phase = PopupPhase::Ready;
        }
        self.dirty = true;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OptionsState {
    sheet_url: String,
    json_key: String,
    sheet_id: String,
    url_error: Option<String>,
    json_error: Option<String>,
    dirty: bool,
}

impl OptionsState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> OptionsViewModel {
        OptionsViewModel {
            sheet_url: self.sheet_url.clone(),
            json_key: self.json_key.clone(),
            sheet_id: self.sheet_id.clone(),
            url_error: self.url_error.clone(),
            json_error: self.json_error.clone(),
            dirty: self.dirty,
        }
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn sheet_url(&self) -> &str {
        &self.sheet_url
    }

    pub(crate) fn json_key(&self) -> &str {
        &self.json_key
    }

    pub(crate) fn sheet_id(&self) -> &str {
        &self.sheet_id
    }

    pub(crate) fn has_url_error(&self) -> bool {
        self.url_error.is_some()
    }

    /// Store the typed URL and re-derive the sheet id from it.
    pub(crate) fn set_sheet_url(&mut self, url: String, parsed: Result<String, SheetUrlError>) {
        self.sheet_url = url;
        match parsed {
            Ok(id) => {
                self.sheet_id = id;
                self.url_error = None;
            }
            Err(err) => {
                self.sheet_id.clear();
                self.url_error = Some(err.to_string());
            }
        }
        self.dirty = true;
    }

    pub(crate) fn set_sheet_id(&mut self, id: String) {
        self.sheet_id = id;
        self.url_error = None;
        self.dirty = true;
    }

    pub(crate) fn set_json_key(&mut self, key: String) {
        self.json_key = key;
        self.dirty = true;
    }

    pub(crate) fn set_url_error(&mut self, error: Option<String>) {
        self.url_error = error;
        self.dirty = true;
    }

    pub(crate) fn set_json_error(&mut self, error: Option<String>) {
        self.json_error = error;
        self.dirty = true;
    }

    pub(crate) fn reset(&mut self) {
        *self = Self {
            dirty: true,
            ..Self::default()
        };
    }
}
