//! Per-site extraction strategies.
//!
//! Each job board gets its own [`SiteScraper`]. Selectors are tied to the
//! board's current markup, so a scraper only ever runs against pages its
//! [`SiteScraper::matches`] accepts; a markup change on one board cannot
//! break another.

mod indeed;
mod linkedin;
mod seek;

pub use indeed::IndeedScraper;
pub use linkedin::LinkedInScraper;
pub use seek::SeekScraper;

use jobsaver_core::PageRecord;
use jobsaver_logging::saver_debug;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::{PageContext, ScrapeError, Site};

pub trait SiteScraper: Send + Sync {
    fn site(&self) -> Site;

    /// Whether this scraper handles pages at `url`.
    fn matches(&self, url: &Url) -> bool;

    fn scrape(&self, url: &Url, document: &Html) -> Result<PageRecord, ScrapeError>;
}

/// The scrapers known to a content script, tried in registration order.
pub struct SiteRegistry {
    scrapers: Vec<Box<dyn SiteScraper>>,
}

impl Default for SiteRegistry {
    fn default() -> Self {
        Self::new(vec![
            Box::new(IndeedScraper),
            Box::new(LinkedInScraper),
            Box::new(SeekScraper),
        ])
    }
}

impl SiteRegistry {
    pub fn new(scrapers: Vec<Box<dyn SiteScraper>>) -> Self {
        Self { scrapers }
    }

    pub fn scraper_for(&self, url: &Url) -> Option<&dyn SiteScraper> {
        self.scrapers
            .iter()
            .find(|scraper| scraper.matches(url))
            .map(Box::as_ref)
    }

    pub fn sites(&self) -> Vec<Site> {
        self.scrapers.iter().map(|scraper| scraper.site()).collect()
    }

    /// Parse the page and run the matching scraper. Pure with respect to the
    /// page: the same markup always yields the same record.
    pub fn scrape(&self, page: &PageContext) -> Result<PageRecord, ScrapeError> {
        let scraper = self
            .scraper_for(page.url())
            .ok_or_else(|| ScrapeError::UnsupportedPage {
                url: page.url().to_string(),
            })?;
        saver_debug!("Scraping {} with the {} scraper", page.url(), scraper.site());
        let document = Html::parse_document(page.html());
        scraper.scrape(page.url(), &document)
    }
}

fn is_https_host(url: &Url, hosts: &[&str]) -> bool {
    url.scheme() == "https" && url.host_str().is_some_and(|host| hosts.contains(&host))
}

fn select_first<'a>(
    document: &'a Html,
    site: Site,
    selector: &'static str,
) -> Result<ElementRef<'a>, ScrapeError> {
    let parsed =
        Selector::parse(selector).map_err(|_| ScrapeError::InvalidSelector { site, selector })?;
    document
        .select(&parsed)
        .next()
        .ok_or(ScrapeError::ElementNotFound { site, selector })
}

/// Concatenated text of the element and its descendants, as in the DOM's
/// `textContent`.
fn text_content(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Approximates rendered text: whitespace runs collapse to one space.
fn rendered_text(element: ElementRef<'_>) -> String {
    text_content(element)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
