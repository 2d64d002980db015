use jobsaver_core::PageRecord;
use scraper::Html;
use url::Url;

use super::{is_https_host, select_first, text_content, SiteScraper};
use crate::{ScrapeError, Site};

const HOSTS: &[&str] = &["au.indeed.com"];
const TITLE: &str = "[class*='-title-container']";
const COMPANY: &str = "[data-company-name='true']";

/// Indeed listings. Search result panes carry the job key in `vjk`; the
/// record always points at the standalone `viewjob` page.
#[derive(Debug, Default, Clone, Copy)]
pub struct IndeedScraper;

impl SiteScraper for IndeedScraper {
    fn site(&self) -> Site {
        Site::Indeed
    }

    fn matches(&self, url: &Url) -> bool {
        is_https_host(url, HOSTS)
    }

    fn scrape(&self, url: &Url, document: &Html) -> Result<PageRecord, ScrapeError> {
        let company = text_content(select_first(document, Site::Indeed, COMPANY)?);
        let role = text_content(select_first(document, Site::Indeed, TITLE)?);
        Ok(PageRecord {
            company,
            role,
            url: canonical_url(url)?,
        })
    }
}

fn canonical_url(url: &Url) -> Result<String, ScrapeError> {
    let first_section = url.path_segments().and_then(|mut s| s.next());
    if first_section == Some("viewjob") {
        return Ok(url.to_string());
    }

    let key = ["vjk", "jk"]
        .iter()
        .find_map(|name| {
            url.query_pairs()
                .find(|(key, value)| key.as_ref() == *name && !value.is_empty())
                .map(|(_, value)| value.into_owned())
        })
        .ok_or_else(|| ScrapeError::MissingJobKey {
            site: Site::Indeed,
            url: url.to_string(),
        })?;

    let mut canonical = url.clone();
    canonical.set_path("/viewjob");
    canonical.set_fragment(None);
    canonical.query_pairs_mut().clear().append_pair("jk", &key);
    Ok(canonical.to_string())
}
