use url::Url;

use crate::decode::{decode_page, DecodeError};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PageError {
    #[error("invalid page url {url}: {message}")]
    InvalidUrl { url: String, message: String },
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// A loaded page as seen by its content script: the location plus the
/// document markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContext {
    url: Url,
    html: String,
}

impl PageContext {
    pub fn new(url: &str, html: impl Into<String>) -> Result<Self, PageError> {
        Ok(Self {
            url: parse_url(url)?,
            html: html.into(),
        })
    }

    /// Build a page from raw bytes, e.g. a page saved to disk.
    pub fn from_bytes(
        url: &str,
        bytes: &[u8],
        content_type: Option<&str>,
    ) -> Result<Self, PageError> {
        let url = parse_url(url)?;
        let tld = url
            .host_str()
            .and_then(|host| host.rsplit('.').next())
            .map(ToOwned::to_owned);
        let decoded = decode_page(bytes, content_type, tld.as_deref())?;
        Ok(Self {
            url,
            html: decoded.html,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn html(&self) -> &str {
        &self.html
    }
}

fn parse_url(url: &str) -> Result<Url, PageError> {
    Url::parse(url).map_err(|err| PageError::InvalidUrl {
        url: url.to_string(),
        message: err.to_string(),
    })
}
