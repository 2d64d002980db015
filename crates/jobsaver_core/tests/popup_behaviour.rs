use std::sync::Once;

use jobsaver_core::{
    update_popup, Effect, PageRecord, PopupMsg, PopupPhase, PopupState, RecordField, Toast,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(jobsaver_logging::initialize_for_tests);
}

fn record() -> PageRecord {
    PageRecord::new("Acme", "Rust Engineer", "https://au.indeed.com/viewjob?jk=abc123")
}

/// Open the popup and deliver both load results.
fn loaded(sheet: Option<&str>, scrape: Result<PageRecord, String>) -> PopupState {
    let (state, _) = update_popup(PopupState::new(), PopupMsg::Opened);
    let (state, _) = update_popup(
        state,
        PopupMsg::SheetConfigLoaded(sheet.map(ToOwned::to_owned)),
    );
    let (state, _) = update_popup(state, PopupMsg::PageScraped(scrape));
    state
}

#[test]
fn opening_requests_config_and_scrape() {
    init_logging();
    let (state, effects) = update_popup(PopupState::new(), PopupMsg::Opened);

    assert_eq!(state.phase(), PopupPhase::Loading);
    assert_eq!(effects, vec![Effect::LoadSheetConfig, Effect::ScrapeActiveTab]);

    // A second open while loading does nothing.
    let (state, effects) = update_popup(state, PopupMsg::Opened);
    assert_eq!(state.phase(), PopupPhase::Loading);
    assert!(effects.is_empty());
}

#[test]
fn ready_only_after_both_loads_report() {
    init_logging();
    let (state, _) = update_popup(PopupState::new(), PopupMsg::Opened);
    let (state, _) = update_popup(state, PopupMsg::PageScraped(Ok(record())));
    assert_eq!(state.phase(), PopupPhase::Loading);

    let (state, _) = update_popup(state, PopupMsg::SheetConfigLoaded(Some("sheet-1".into())));
    let view = state.view();
    assert_eq!(view.phase, PopupPhase::Ready);
    assert_eq!(view.form, record());
    assert_eq!(view.sheet_id, "sheet-1");
    assert!(!view.submit_disabled);
    assert_eq!(view.button_label, "Save Job");
}

#[test]
fn missing_config_reaches_ready_with_submit_disabled() {
    init_logging();
    let mut state = loaded(Some(""), Ok(record()));
    let view = state.view();

    assert_eq!(view.phase, PopupPhase::Ready);
    assert_eq!(view.errors, vec!["Google Sheet not configured".to_string()]);
    assert!(view.submit_disabled);
    assert!(state.consume_dirty());

    let (mut state, effects) = update_popup(state, PopupMsg::Submitted);
    assert!(effects.is_empty());
    assert_eq!(state.phase(), PopupPhase::Ready);
    assert!(!state.consume_dirty());
}

#[test]
fn scrape_failure_leaves_form_empty_but_ready() {
    init_logging();
    let state = loaded(Some("sheet-1"), Err("page not supported".into()));
    let view = state.view();

    assert_eq!(view.phase, PopupPhase::Ready);
    assert_eq!(view.form, PageRecord::default());
    assert!(view.errors.is_empty());
}

#[test]
fn edits_then_submit_emits_save_with_sheet_id() {
    init_logging();
    let state = loaded(Some("sheet-1"), Ok(record()));
    let (state, _) = update_popup(
        state,
        PopupMsg::FieldChanged {
            field: RecordField::Role,
            value: "Senior Rust Engineer".into(),
        },
    );
    let (state, effects) = update_popup(state, PopupMsg::Submitted);

    assert_eq!(state.phase(), PopupPhase::Saving);
    assert_eq!(state.view().button_label, "Saving...");
    let expected = PageRecord::new(
        "Acme",
        "Senior Rust Engineer",
        "https://au.indeed.com/viewjob?jk=abc123",
    )
    .with_sheet("sheet-1");
    assert_eq!(effects, vec![Effect::SaveJob(expected)]);

    // Submitting again while saving is ignored.
    let (state, effects) = update_popup(state, PopupMsg::Submitted);
    assert_eq!(state.phase(), PopupPhase::Saving);
    assert!(effects.is_empty());
}

#[test]
fn submit_requires_every_field() {
    init_logging();
    let state = loaded(Some("sheet-1"), Err("no scraper".into()));
    let (state, effects) = update_popup(state, PopupMsg::Submitted);
    assert!(effects.is_empty());
    assert_eq!(state.phase(), PopupPhase::Ready);
}

#[test]
fn save_result_returns_to_idle_with_toast() {
    init_logging();
    let state = loaded(Some("sheet-1"), Ok(record()));
    let (state, _) = update_popup(state, PopupMsg::Submitted);
    let (state, effects) = update_popup(
        state,
        PopupMsg::SaveFinished(Ok(Some("Added row 4".into()))),
    );
    assert_eq!(state.phase(), PopupPhase::Idle);
    assert_eq!(effects, vec![Effect::ShowToast(Toast::success("Added row 4"))]);

    // The form is kept, so the user can save again from idle.
    let (state, effects) = update_popup(state, PopupMsg::Submitted);
    assert_eq!(state.phase(), PopupPhase::Saving);
    assert_eq!(effects.len(), 1);

    let (state, effects) = update_popup(state, PopupMsg::SaveFinished(Err("500".into())));
    assert_eq!(state.phase(), PopupPhase::Idle);
    assert_eq!(
        effects,
        vec![Effect::ShowToast(Toast::error("Failed to save the job"))]
    );
}

#[test]
fn stray_save_result_is_ignored() {
    init_logging();
    let state = loaded(Some("sheet-1"), Ok(record()));
    let (state, effects) = update_popup(state, PopupMsg::SaveFinished(Ok(None)));
    assert_eq!(state.phase(), PopupPhase::Ready);
    assert!(effects.is_empty());
}

#[test]
fn view_sheet_needs_configuration() {
    init_logging();
    let (_, effects) = update_popup(loaded(None, Ok(record())), PopupMsg::ViewSheetClicked);
    assert_eq!(
        effects,
        vec![Effect::ShowToast(Toast::error("Sheet not configured"))]
    );

    let (_, effects) = update_popup(loaded(Some("abc"), Ok(record())), PopupMsg::ViewSheetClicked);
    assert_eq!(
        effects,
        vec![Effect::OpenUrl(
            "https://docs.google.com/spreadsheets/d/abc/edit#gid=0".into()
        )]
    );
}

#[test]
fn options_click_opens_options_page() {
    let (_, effects) = update_popup(PopupState::new(), PopupMsg::OptionsClicked);
    assert_eq!(effects, vec![Effect::OpenOptionsPage]);
}

#[test]
fn reopening_replaces_previous_load_results() {
    init_logging();
    let state = loaded(Some("sheet-1"), Ok(record()));
    let (state, _) = update_popup(state, PopupMsg::Submitted);
    let (state, _) = update_popup(state, PopupMsg::SaveFinished(Ok(None)));
    assert_eq!(state.phase(), PopupPhase::Idle);

    // The sheet was cleared on the options page in the meantime.
    let (state, effects) = update_popup(state, PopupMsg::Opened);
    assert_eq!(effects, vec![Effect::LoadSheetConfig, Effect::ScrapeActiveTab]);
    let (state, _) = update_popup(state, PopupMsg::SheetConfigLoaded(None));
    let (state, _) = update_popup(state, PopupMsg::PageScraped(Ok(record())));
    let view = state.view();
    assert_eq!(view.errors, vec!["Google Sheet not configured".to_string()]);
    assert_eq!(view.sheet_id, "");
    assert!(view.submit_disabled);
}
