use std::fmt;

use jobsaver_core::{PageRecord, ProtocolError};

/// Job sites with a dedicated scraper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Site {
    Indeed,
    LinkedIn,
    Seek,
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Site::Indeed => write!(f, "indeed"),
            Site::LinkedIn => write!(f, "linkedin"),
            Site::Seek => write!(f, "seek"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScrapeError {
    #[error("page is not supported: {url}")]
    UnsupportedPage { url: String },
    #[error("{site}: element not found for selector {selector}")]
    ElementNotFound { site: Site, selector: &'static str },
    #[error("{site}: invalid selector {selector}")]
    InvalidSelector { site: Site, selector: &'static str },
    #[error("{site}: no job key in {url}")]
    MissingJobKey { site: Site, url: String },
}

/// Answer from a content script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Scraped(Result<PageRecord, ScrapeError>),
    Saved(SaveOutcome),
}

/// Result of the shortcut save path, mirrored by the toast shown on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved { message: Option<String> },
    NotConfigured,
    PageNotSupported,
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChannelError {
    #[error("could not establish connection: receiving end does not exist")]
    NoReceiver,
    #[error("no reply to '{0}'")]
    NoReply(String),
    #[error("unexpected reply to '{0}'")]
    UnexpectedReply(String),
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub kind: ApiFailureKind,
    pub message: String,
    /// `error` field of the response body, when the API sent one.
    pub server_message: Option<String>,
}

impl ApiError {
    pub(crate) fn new(kind: ApiFailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            server_message: None,
        }
    }

    pub(crate) fn with_server_message(mut self, server_message: Option<String>) -> Self {
        self.server_message = server_message;
        self
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.server_message {
            Some(server) => write!(f, "{}: {}", self.kind, server),
            None => write!(f, "{}: {}", self.kind, self.message),
        }
    }
}

impl std::error::Error for ApiError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiFailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Decode,
    /// 2xx answer whose body reports an `error`.
    Rejected,
    Network,
}

impl fmt::Display for ApiFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiFailureKind::InvalidUrl => write!(f, "invalid url"),
            ApiFailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            ApiFailureKind::Timeout => write!(f, "timeout"),
            ApiFailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            ApiFailureKind::Decode => write!(f, "undecodable response"),
            ApiFailureKind::Rejected => write!(f, "rejected"),
            ApiFailureKind::Network => write!(f, "network error"),
        }
    }
}
