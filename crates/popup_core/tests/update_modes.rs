use std::sync::Once;

use popup_core::{
    descriptor_for, update, Effect, Msg, Phase, PopupState, ProxyMode, SettingsPatch, UiStateKey,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(popup_logging::initialize_for_tests);
}

/// Opens the popup and resolves the load sequence into the given mode.
fn loaded_popup(enabled: ProxyMode) -> PopupState {
    let (state, _) = update(PopupState::new(), Msg::PopupOpened);
    let (state, _) = update(
        state,
        Msg::StateFetched {
            state: descriptor_for(UiStateKey::Mode(enabled)),
            enabled,
            storage_enabled: None,
        },
    );
    state
}

fn session_effect(effect: &Effect) -> bool {
    matches!(effect, Effect::StartPolyjuice { .. } | Effect::EndPolyjuice)
}

#[test]
fn selecting_a_plain_mode_issues_one_set_proxy() {
    init_logging();
    for mode in [
        ProxyMode::On,
        ProxyMode::Direct,
        ProxyMode::System,
        ProxyMode::China,
    ] {
        let state = loaded_popup(ProxyMode::On);
        let (state, effects) = update(state, Msg::ModeClicked(mode));

        let set_proxy: Vec<_> = effects
            .iter()
            .filter(|effect| matches!(effect, Effect::SetProxy { .. }))
            .collect();
        assert_eq!(set_proxy, vec![&Effect::SetProxy { mode }]);
        assert!(effects.iter().all(|effect| !session_effect(effect)));
        assert_eq!(state.checked(), Some(mode));
        assert_eq!(state.phase(), Phase::Mode(mode));
    }
}

#[test]
fn mode_click_is_optimistic_before_any_reply() {
    init_logging();
    let state = loaded_popup(ProxyMode::On);
    let (state, _) = update(state, Msg::ModeClicked(ProxyMode::Direct));

    // The radio flips synchronously; no reply has been applied yet.
    assert_eq!(state.checked(), Some(ProxyMode::Direct));
    assert_eq!(state.settings().enabled, ProxyMode::Direct);
}

#[test]
fn mode_click_persists_the_choice() {
    init_logging();
    let state = loaded_popup(ProxyMode::On);
    let (_, effects) = update(state, Msg::ModeClicked(ProxyMode::System));

    assert!(effects.contains(&Effect::SaveSettings(SettingsPatch::enabled(
        ProxyMode::System
    ))));
}

#[test]
fn switching_away_from_polyjuice_tears_down_first() {
    init_logging();
    let state = loaded_popup(ProxyMode::On);
    let (state, _) = update(state, Msg::ModeClicked(ProxyMode::Polyjuice));
    let (state, effects) = update(state, Msg::ModeClicked(ProxyMode::Direct));

    let end_pos = effects
        .iter()
        .position(|effect| *effect == Effect::EndPolyjuice)
        .expect("END_POLYJUICE issued");
    let set_pos = effects
        .iter()
        .position(|effect| {
            *effect
                == Effect::SetProxy {
                    mode: ProxyMode::Direct,
                }
        })
        .expect("SET_PROXY issued");
    assert!(end_pos < set_pos, "END_POLYJUICE must precede SET_PROXY");

    // The persisted country is cleared as part of the teardown.
    assert!(effects.iter().any(|effect| matches!(
        effect,
        Effect::SaveSettings(patch) if patch.polyjuice_country.as_deref() == Some("")
    )));
    assert_eq!(state.settings().polyjuice_country, "");
    assert!(!state.view().selector_enabled);
}

#[test]
fn baked_in_is_not_selectable() {
    init_logging();
    let state = loaded_popup(ProxyMode::On);
    let before = state.clone();
    let (state, effects) = update(state, Msg::ModeClicked(ProxyMode::BakedIn));

    assert_eq!(state, before);
    assert!(effects.is_empty());
}

#[test]
fn ui_change_replaces_banner_but_not_checked_control() {
    init_logging();
    let state = loaded_popup(ProxyMode::Direct);
    let pushed = descriptor_for(UiStateKey::ErrorProxyStolen);
    let (mut state, effects) = update(
        state,
        Msg::UiChangePushed {
            state: pushed.clone(),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.checked(), Some(ProxyMode::Direct));
    assert!(state.consume_dirty());
    assert_eq!(state.view().banner, pushed);
}
