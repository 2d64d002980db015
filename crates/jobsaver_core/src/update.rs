use jobsaver_logging::{saver_debug, saver_info};

use crate::{
    parse_sheet_id, sheet_view_url, validate_json_key, Effect, OptionsMsg, OptionsState,
    PopupMsg, PopupPhase, PopupState, SheetUrlError, Toast,
};

const DEFAULT_SAVED_MESSAGE: &str = "Saved Job";
const SAVE_FAILED: &str = "Failed to save the job";
const SHEET_NOT_CONFIGURED_SHORT: &str = "Sheet not configured";

/// Pure update function for the popup: applies a message to state and
/// returns any effects.
pub fn update_popup(mut state: PopupState, msg: PopupMsg) -> (PopupState, Vec<Effect>) {
    let effects = match msg {
        PopupMsg::Opened => {
            if state.phase() != PopupPhase::Idle {
                return (state, Vec::new());
            }
            state.begin_loading();
            vec![Effect::LoadSheetConfig, Effect::ScrapeActiveTab]
        }
        PopupMsg::SheetConfigLoaded(sheet) => {
            state.apply_sheet_config(sheet);
            Vec::new()
        }
        PopupMsg::PageScraped(result) => {
            let record = match result {
                Ok(record) => Some(record),
                Err(err) => {
                    saver_info!("Page not supported: {}", err);
                    None
                }
            };
            state.apply_scrape(record);
            Vec::new()
        }
        PopupMsg::FieldChanged { field, value } => {
            state.set_field(field, value);
            Vec::new()
        }
        PopupMsg::Submitted => {
            if !state.can_submit() {
                saver_debug!(
                    "Submit ignored in phase {:?} (missing fields: {:?})",
                    state.phase(),
                    state.form().missing_fields()
                );
                return (state, Vec::new());
            }
            let submission = state.form().clone().with_sheet(state.sheet_id());
            state.begin_saving();
            vec![Effect::SaveJob(submission)]
        }
        PopupMsg::SaveFinished(result) => {
            if state.phase() != PopupPhase::Saving {
                return (state, Vec::new());
            }
            state.finish_saving();
            let toast = match result {
                Ok(message) => {
                    Toast::success(message.unwrap_or_else(|| DEFAULT_SAVED_MESSAGE.to_string()))
                }
                Err(err) => {
                    saver_info!("Save failed: {}", err);
                    Toast::error(SAVE_FAILED)
                }
            };
            vec![Effect::ShowToast(toast)]
        }
        PopupMsg::ViewSheetClicked => {
            if state.sheet_id().is_empty() {
                vec![Effect::ShowToast(Toast::error(SHEET_NOT_CONFIGURED_SHORT))]
            } else {
                vec![Effect::OpenUrl(sheet_view_url(state.sheet_id()))]
            }
        }
        PopupMsg::OptionsClicked => vec![Effect::OpenOptionsPage],
        PopupMsg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Pure update function for the options page.
pub fn update_options(mut state: OptionsState, msg: OptionsMsg) -> (OptionsState, Vec<Effect>) {
    let effects = match msg {
        OptionsMsg::Opened => vec![Effect::LoadOptionsConfig],
        OptionsMsg::OptionsConfigLoaded {
            sheet_url,
            json_key,
        } => {
            if let Some(url) = sheet_url.filter(|url| !url.is_empty()) {
                let parsed = parse_sheet_id(&url);
                state.set_sheet_url(url, parsed);
            }
            state.set_json_key(json_key.unwrap_or_default());
            Vec::new()
        }
        OptionsMsg::SheetUrlChanged(url) => {
            let parsed = parse_sheet_id(&url);
            state.set_sheet_url(url, parsed);
            Vec::new()
        }
        OptionsMsg::JsonKeyChanged(key) => {
            state.set_json_key(key);
            Vec::new()
        }
        OptionsMsg::Submitted => {
            state.set_json_error(None);
            // Both inputs are required; an untouched URL field has no error yet.
            if state.sheet_url().trim().is_empty() {
                state.set_url_error(Some(SheetUrlError::InvalidUrl.to_string()));
            }
            if state.has_url_error() {
                return (state, Vec::new());
            }
            if let Err(err) = validate_json_key(state.json_key()) {
                state.set_json_error(Some(err.to_string()));
                return (state, Vec::new());
            }
            vec![Effect::PersistConfig {
                sheet_id: state.sheet_id().to_string(),
                sheet_url: state.sheet_url().to_string(),
                json_key: state.json_key().to_string(),
            }]
        }
        OptionsMsg::ConfigPersisted(result) => match result {
            Ok(()) => vec![Effect::ShowToast(Toast::success("Saved Config"))],
            Err(err) => vec![Effect::ShowToast(Toast::error(err))],
        },
        OptionsMsg::ValidateClicked => {
            if state.sheet_url().is_empty() {
                return (state, Vec::new());
            }
            vec![Effect::ValidateSheet {
                url: state.sheet_url().to_string(),
            }]
        }
        OptionsMsg::SheetValidated(result) => match result {
            Ok(validation) => {
                state.set_sheet_id(validation.sheet_id);
                vec![Effect::ShowToast(Toast::success(validation.message))]
            }
            Err(err) => {
                state.set_url_error(Some(err));
                Vec::new()
            }
        },
        OptionsMsg::ClearClicked => vec![Effect::ClearConfig],
        OptionsMsg::ConfigCleared(result) => match result {
            Ok(()) => {
                state.reset();
                vec![Effect::ShowToast(Toast::success("Cleared Config"))]
            }
            Err(err) => vec![Effect::ShowToast(Toast::error(err))],
        },
        OptionsMsg::NoOp => Vec::new(),
    };

    (state, effects)
}
