use crate::{PageRecord, RecordField};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupMsg {
    /// Popup became visible; starts the config read and page scrape.
    Opened,
    /// Stored sheet identifier, `None` when never configured.
    SheetConfigLoaded(Option<String>),
    /// Result of the `scrape-page` request sent to the active tab.
    PageScraped(Result<PageRecord, String>),
    /// User edited one of the form inputs.
    FieldChanged { field: RecordField, value: String },
    /// User pressed "Save Job".
    Submitted,
    /// API answered the POST; `Ok` carries the server message if any.
    SaveFinished(Result<Option<String>, String>),
    ViewSheetClicked,
    OptionsClicked,
    NoOp,
}

/// Server answer to a sheet validation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetValidation {
    pub sheet_id: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionsMsg {
    Opened,
    OptionsConfigLoaded {
        sheet_url: Option<String>,
        json_key: Option<String>,
    },
    SheetUrlChanged(String),
    JsonKeyChanged(String),
    Submitted,
    ConfigPersisted(Result<(), String>),
    ValidateClicked,
    SheetValidated(Result<SheetValidation, String>),
    ClearClicked,
    ConfigCleared(Result<(), String>),
    NoOp,
}
