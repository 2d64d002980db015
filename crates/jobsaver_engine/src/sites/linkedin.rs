use jobsaver_core::PageRecord;
use scraper::Html;
use url::Url;

use super::{is_https_host, select_first, text_content, SiteScraper};
use crate::{ScrapeError, Site};

const HOSTS: &[&str] = &["www.linkedin.com"];
const TITLE: &str = "[class*='top-card__job-title']";
const COMPANY: &str = "div[class*='top-card__primary-description'] a";

#[derive(Debug, Default, Clone, Copy)]
pub struct LinkedInScraper;

impl SiteScraper for LinkedInScraper {
    fn site(&self) -> Site {
        Site::LinkedIn
    }

    fn matches(&self, url: &Url) -> bool {
        is_https_host(url, HOSTS)
    }

    fn scrape(&self, url: &Url, document: &Html) -> Result<PageRecord, ScrapeError> {
        let company = text_content(select_first(document, Site::LinkedIn, COMPANY)?);
        let role = text_content(select_first(document, Site::LinkedIn, TITLE)?);
        Ok(PageRecord {
            company: company.trim().to_string(),
            role: role.trim().to_string(),
            url: url.to_string(),
        })
    }
}
