use jobsaver_core::PageRecord;
use scraper::Html;
use url::Url;

use super::{is_https_host, rendered_text, select_first, SiteScraper};
use crate::{ScrapeError, Site};

const HOSTS: &[&str] = &["seek.com.au", "www.seek.com.au"];
const TITLE: &str = "[data-automation='job-detail-title']";
const COMPANY: &str = "[data-automation='advertiser-name']";

#[derive(Debug, Default, Clone, Copy)]
pub struct SeekScraper;

impl SiteScraper for SeekScraper {
    fn site(&self) -> Site {
        Site::Seek
    }

    fn matches(&self, url: &Url) -> bool {
        is_https_host(url, HOSTS)
    }

    fn scrape(&self, url: &Url, document: &Html) -> Result<PageRecord, ScrapeError> {
        let company = rendered_text(select_first(document, Site::Seek, COMPANY)?);
        let role = rendered_text(select_first(document, Site::Seek, TITLE)?);
        Ok(PageRecord {
            company,
            role,
            url: url.to_string(),
        })
    }
}
