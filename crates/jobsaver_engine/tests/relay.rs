mod common;

use std::sync::Arc;

use common::{content_script, RecordingToasts, SEEK_HTML, SEEK_URL};
use jobsaver_core::{PageRecord, Toast, CONFIG_SHEET};
use jobsaver_engine::{
    ConfigError, ConfigStore, LocalTab, MemoryConfigStore, RelayFailure, SaveOutcome,
    ShortcutRelay,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct BrokenConfig;

impl ConfigStore for BrokenConfig {
    fn get(&self, _key: &str) -> Result<Option<String>, ConfigError> {
        Err(ConfigError::Poisoned)
    }
    fn set(&self, _key: &str, _value: &str) -> Result<(), ConfigError> {
        Err(ConfigError::Poisoned)
    }
    fn remove(&self, _key: &str) -> Result<(), ConfigError> {
        Err(ConfigError::Poisoned)
    }
    fn clear(&self) -> Result<(), ConfigError> {
        Err(ConfigError::Poisoned)
    }
}

fn configured() -> Arc<MemoryConfigStore> {
    Arc::new(MemoryConfigStore::with_values([(CONFIG_SHEET, "sheet-1")]))
}

async fn accepting_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/job"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn shortcut_scrapes_and_saves() {
    let server = accepting_server().await;
    let toasts = RecordingToasts::new();
    let tab = LocalTab::new(content_script(SEEK_URL, SEEK_HTML, &server.uri(), toasts.clone()));
    let relay = ShortcutRelay::new(configured(), Arc::new(tab));

    let report = relay.on_command("save-job").await.unwrap();

    assert!(!report.is_partial());
    assert_eq!(report.payload.sheet_id.as_deref(), Some("sheet-1"));
    assert_eq!(
        report.payload.data,
        Some(PageRecord::new("Initech", "Backend Engineer", SEEK_URL))
    );
    assert_eq!(
        report.outcome,
        Some(SaveOutcome::Saved {
            message: Some("ok".to_string())
        })
    );
    assert_eq!(toasts.take(), vec![Toast::success("Saved Job")]);
}

#[tokio::test]
async fn other_commands_are_ignored() {
    let relay = ShortcutRelay::new(configured(), Arc::new(LocalTab::detached()));
    assert_eq!(relay.on_command("_execute_action").await, None);
}

#[tokio::test]
async fn scrape_failure_still_forwards_with_null_data() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let toasts = RecordingToasts::new();
    let tab = LocalTab::new(content_script(
        "https://example.com/careers/1",
        SEEK_HTML,
        &server.uri(),
        toasts.clone(),
    ));
    let relay = ShortcutRelay::new(configured(), Arc::new(tab));

    let report = relay.on_command("save-job").await.unwrap();

    assert!(report.is_partial());
    assert!(matches!(report.failures.as_slice(), [RelayFailure::Scrape(_)]));
    assert_eq!(report.payload.data, None);
    assert_eq!(report.outcome, Some(SaveOutcome::PageNotSupported));
    assert_eq!(
        toasts.take(),
        vec![Toast::error("Page is not supported for auto job saving")]
    );
}

#[tokio::test]
async fn unconfigured_sheet_is_not_a_relay_failure() {
    let server = accepting_server().await;
    let toasts = RecordingToasts::new();
    let tab = LocalTab::new(content_script(SEEK_URL, SEEK_HTML, &server.uri(), toasts.clone()));
    let relay = ShortcutRelay::new(Arc::new(MemoryConfigStore::new()), Arc::new(tab));

    let report = relay.on_command("save-job").await.unwrap();

    assert!(!report.is_partial());
    assert_eq!(report.payload.sheet_id, None);
    assert_eq!(report.outcome, Some(SaveOutcome::NotConfigured));
    assert_eq!(toasts.take(), vec![Toast::error("Google Sheet not configured")]);
}

#[tokio::test]
async fn config_read_failure_is_reported_and_forwarded() {
    let server = accepting_server().await;
    let toasts = RecordingToasts::new();
    let tab = LocalTab::new(content_script(SEEK_URL, SEEK_HTML, &server.uri(), toasts.clone()));
    let relay = ShortcutRelay::new(Arc::new(BrokenConfig), Arc::new(tab));

    let report = relay.on_command("save-job").await.unwrap();

    assert!(matches!(report.failures.as_slice(), [RelayFailure::ConfigRead(_)]));
    assert!(report.payload.data.is_some());
    assert_eq!(report.outcome, Some(SaveOutcome::NotConfigured));
}

#[tokio::test]
async fn tab_without_content_script_fails_both_steps() {
    let relay = ShortcutRelay::new(configured(), Arc::new(LocalTab::detached()));

    let report = relay.on_command("save-job").await.unwrap();

    assert!(matches!(
        report.failures.as_slice(),
        [RelayFailure::Scrape(_), RelayFailure::Forward(_)]
    ));
    assert_eq!(report.outcome, None);
    assert_eq!(report.payload.sheet_id.as_deref(), Some("sheet-1"));
}
