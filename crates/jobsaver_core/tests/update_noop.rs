use jobsaver_core::{update_options, update_popup, OptionsMsg, OptionsState, PopupMsg, PopupState};

#[test]
fn popup_noop_leaves_state_untouched() {
    let state = PopupState::new();
    let (next, effects) = update_popup(state.clone(), PopupMsg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn options_noop_leaves_state_untouched() {
    let state = OptionsState::new();
    let (next, effects) = update_options(state.clone(), OptionsMsg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}
