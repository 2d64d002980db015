use jobsaver_core::{PageRecord, WireMessage, SCRAPE_PAGE};

use crate::{ChannelError, ContentScript, Reply};

/// Request/response channel to the content script of a tab.
#[async_trait::async_trait]
pub trait TabChannel: Send + Sync {
    /// `Ok(None)` when the receiver ignored the message.
    async fn send(&self, message: WireMessage) -> Result<Option<Reply>, ChannelError>;
}

/// In-process tab. A tab without a content script (an unsupported page, or
/// one still loading) rejects every message with [`ChannelError::NoReceiver`].
pub struct LocalTab {
    script: Option<ContentScript>,
}

impl LocalTab {
    pub fn new(script: ContentScript) -> Self {
        Self {
            script: Some(script),
        }
    }

    pub fn detached() -> Self {
        Self { script: None }
    }
}

#[async_trait::async_trait]
impl TabChannel for LocalTab {
    async fn send(&self, message: WireMessage) -> Result<Option<Reply>, ChannelError> {
        let script = self.script.as_ref().ok_or(ChannelError::NoReceiver)?;
        Ok(script.dispatch(message).await?)
    }
}

/// Send `scrape-page` and unwrap the record; every failure is flattened to
/// its message, as callers only log or display it.
pub(crate) async fn request_scrape(tab: &dyn TabChannel) -> Result<PageRecord, String> {
    match tab.send(WireMessage::new(SCRAPE_PAGE)).await {
        Ok(Some(Reply::Scraped(result))) => result.map_err(|err| err.to_string()),
        Ok(Some(_)) => Err(ChannelError::UnexpectedReply(SCRAPE_PAGE.into()).to_string()),
        Ok(None) => Err(ChannelError::NoReply(SCRAPE_PAGE.into()).to_string()),
        Err(err) => Err(err.to_string()),
    }
}
