use std::sync::Arc;

use jobsaver_core::{PageRecord, ProtocolError, Request, WireMessage};
use jobsaver_logging::{saver_debug, saver_trace};

use crate::{PageContext, Reply, ScrapeError, ShortcutSaveHandler, SiteRegistry};

/// Everything attached to one page: the site scrapers and the shortcut save
/// handler, behind a single dispatch point.
pub struct ContentScript {
    page: PageContext,
    registry: Arc<SiteRegistry>,
    saver: ShortcutSaveHandler,
}

impl ContentScript {
    pub fn new(page: PageContext, registry: Arc<SiteRegistry>, saver: ShortcutSaveHandler) -> Self {
        Self {
            page,
            registry,
            saver,
        }
    }

    pub fn page(&self) -> &PageContext {
        &self.page
    }

    /// Handle one message. `Ok(None)` means the message was not addressed
    /// to this script and no reply is sent.
    pub async fn dispatch(&self, message: WireMessage) -> Result<Option<Reply>, ProtocolError> {
        let Some(request) = Request::from_wire(&message)? else {
            saver_trace!("Ignoring message '{}'", message.name);
            return Ok(None);
        };

        let reply = match request {
            Request::ScrapePage => Reply::Scraped(self.scrape()),
            Request::SaveJobShortcut(payload) => Reply::Saved(self.saver.handle(payload).await),
        };
        Ok(Some(reply))
    }

    /// One-shot scrape of the current page; no state is kept between calls.
    pub fn scrape(&self) -> Result<PageRecord, ScrapeError> {
        let result = self.registry.scrape(&self.page);
        if let Err(err) = &result {
            saver_debug!("Scrape of {} failed: {}", self.page.url(), err);
        }
        result
    }
}
