use popup_core::{update, Msg, PopupState};

#[test]
fn update_is_noop() {
    let state = PopupState::new();
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}
