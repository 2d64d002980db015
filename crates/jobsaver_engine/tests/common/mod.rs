#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use jobsaver_core::Toast;
use jobsaver_engine::{
    ApiSettings, ContentScript, PageContext, ReqwestApiClient, ShortcutSaveHandler, SiteRegistry,
    ToastSink,
};

pub const SEEK_URL: &str = "https://www.seek.com.au/job/71234567";
pub const SEEK_HTML: &str = r#"<html><body>
<h1 data-automation="job-detail-title">Backend Engineer</h1>
<span data-automation="advertiser-name">Initech</span>
</body></html>"#;

#[derive(Default)]
pub struct RecordingToasts {
    toasts: Mutex<Vec<Toast>>,
}

impl RecordingToasts {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn take(&self) -> Vec<Toast> {
        self.toasts.lock().unwrap().drain(..).collect()
    }
}

impl ToastSink for RecordingToasts {
    fn show(&self, toast: Toast) {
        self.toasts.lock().unwrap().push(toast);
    }
}

pub fn api_client(base_url: &str) -> Arc<ReqwestApiClient> {
    Arc::new(ReqwestApiClient::new(ApiSettings::with_base_url(format!(
        "{base_url}/api"
    ))))
}

pub fn content_script(
    url: &str,
    html: &str,
    base_url: &str,
    toasts: Arc<RecordingToasts>,
) -> ContentScript {
    let page = PageContext::new(url, html).unwrap();
    let saver = ShortcutSaveHandler::new(api_client(base_url), toasts);
    ContentScript::new(page, Arc::new(SiteRegistry::default()), saver)
}
