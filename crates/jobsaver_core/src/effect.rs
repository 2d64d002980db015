use crate::JobSubmission;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// Transient user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub text: String,
}

impl Toast {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Read the stored sheet identifier for the popup.
    LoadSheetConfig,
    /// Send `scrape-page` to the active tab.
    ScrapeActiveTab,
    /// POST the submission to the API.
    SaveJob(JobSubmission),
    OpenUrl(String),
    OpenOptionsPage,
    ShowToast(Toast),
    /// Read sheet URL and JSON key for the options form.
    LoadOptionsConfig,
    PersistConfig {
        sheet_id: String,
        sheet_url: String,
        json_key: String,
    },
    ClearConfig,
    /// Ask the API to validate a sheet URL.
    ValidateSheet { url: String },
}
