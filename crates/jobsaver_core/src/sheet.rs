use thiserror::Error;
use url::Url;

/// Storage key holding the sheet identifier.
pub const CONFIG_SHEET: &str = "sheet";
/// Storage key holding the sheet URL as typed on the options page.
pub const CONFIG_SHEET_URL: &str = "sheetUrl";
/// Storage key holding the raw service-account JSON.
pub const CONFIG_JSON_KEY: &str = "jsonKey";

const SHEETS_HOST: &str = "docs.google.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SheetUrlError {
    #[error("Invalid url")]
    InvalidUrl,
    #[error("Only google sheets are supported")]
    UnsupportedHost,
    #[error("Could not parse document id from url")]
    MissingDocumentId,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JsonKeyError {
    #[error("Json key could not be parsed")]
    Unparsable,
    #[error("missing required field '{0}'")]
    MissingField(&'static str),
}

/// Extract the sheet identifier from a Google Sheets URL.
///
/// `https://docs.google.com/spreadsheets/d/<id>/edit` yields `<id>`.
pub fn parse_sheet_id(raw: &str) -> Result<String, SheetUrlError> {
    let url = Url::parse(raw.trim()).map_err(|_| SheetUrlError::InvalidUrl)?;
    if url.host_str() != Some(SHEETS_HOST) {
        return Err(SheetUrlError::UnsupportedHost);
    }
    // Leading "/" produces an empty first section: ["", "spreadsheets", "d", "<id>", ...]
    url.path()
        .split('/')
        .nth(3)
        .filter(|id| !id.is_empty())
        .map(ToOwned::to_owned)
        .ok_or(SheetUrlError::MissingDocumentId)
}

pub fn sheet_view_url(sheet_id: &str) -> String {
    format!("https://{SHEETS_HOST}/spreadsheets/d/{sheet_id}/edit#gid=0")
}

/// Check that the service-account key parses and names the fields the API needs.
pub fn validate_json_key(raw: &str) -> Result<(), JsonKeyError> {
    let json: serde_json::Value =
        serde_json::from_str(raw).map_err(|_| JsonKeyError::Unparsable)?;
    for field in ["client_email", "private_key"] {
        if json.get(field).map_or(true, serde_json::Value::is_null) {
            return Err(JsonKeyError::MissingField(field));
        }
    }
    Ok(())
}
