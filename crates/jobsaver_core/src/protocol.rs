//! Cross-context message envelope and its typed requests.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::PageRecord;

/// Ask a content script to scrape the page it is attached to.
pub const SCRAPE_PAGE: &str = "scrape-page";
/// Hand scraped data and the sheet id to the content script for saving.
pub const SAVE_JOB_SHORTCUT: &str = "save-job-shortcut";
/// Keyboard command registered by the background relay.
pub const SAVE_JOB_COMMAND: &str = "save-job";

/// Untyped message as it travels between contexts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireMessage {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl WireMessage {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: None,
        }
    }

    pub fn with_body(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: Some(body.into()),
        }
    }
}

/// Body of a `save-job-shortcut` message. Either half may be missing when
/// the relay could not obtain it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShortcutPayload {
    #[serde(rename = "sheetId", default)]
    pub sheet_id: Option<String>,
    #[serde(default)]
    pub data: Option<PageRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    ScrapePage,
    SaveJobShortcut(ShortcutPayload),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("message '{0}' requires a body")]
    MissingBody(&'static str),
    #[error("malformed body for '{name}': {message}")]
    MalformedBody { name: &'static str, message: String },
}

impl Request {
    /// Decode a wire message. Unknown names yield `Ok(None)`: the receiver
    /// ignores them and sends no reply.
    pub fn from_wire(message: &WireMessage) -> Result<Option<Self>, ProtocolError> {
        match message.name.as_str() {
            SCRAPE_PAGE => Ok(Some(Request::ScrapePage)),
            SAVE_JOB_SHORTCUT => {
                let body = message
                    .body
                    .as_deref()
                    .ok_or(ProtocolError::MissingBody(SAVE_JOB_SHORTCUT))?;
                let payload = serde_json::from_str(body).map_err(|err| {
                    ProtocolError::MalformedBody {
                        name: SAVE_JOB_SHORTCUT,
                        message: err.to_string(),
                    }
                })?;
                Ok(Some(Request::SaveJobShortcut(payload)))
            }
            _ => Ok(None),
        }
    }

    pub fn into_wire(self) -> WireMessage {
        match self {
            Request::ScrapePage => WireMessage::new(SCRAPE_PAGE),
            Request::SaveJobShortcut(payload) => {
                let body = serde_json::to_string(&payload)
                    .unwrap_or_else(|_| String::from("{\"sheetId\":null,\"data\":null}"));
                WireMessage::with_body(SAVE_JOB_SHORTCUT, body)
            }
        }
    }
}
