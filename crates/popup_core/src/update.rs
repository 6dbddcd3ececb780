use crate::{
    descriptor_for, Effect, Msg, Phase, PolyjuiceFlow, PopupState, ProxyMode, SettingsPatch,
    UiStateKey,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: PopupState, msg: Msg) -> (PopupState, Vec<Effect>) {
    let effects = match msg {
        Msg::PopupOpened => {
            if state.phase() != Phase::Pending {
                return (state, Vec::new());
            }
            state.mark_dirty();
            vec![Effect::LoadSettings, Effect::FetchState, Effect::ProbeCompanion]
        }
        Msg::SettingsLoaded(settings) => {
            let enabled = settings.enabled;
            *state.settings_mut() = settings;
            if state.phase() == Phase::Pending {
                state.set_phase(Phase::Mode(enabled));
                state.set_checked(enabled);
            }
            enter_polyjuice_fetch_if_idle(&mut state)
        }
        Msg::SettingsLoadFailed { .. } | Msg::StateFetchFailed { .. } => {
            // Load failure aborts initialization; there is no retry.
            state.set_banner(descriptor_for(UiStateKey::ErrorLoad));
            Vec::new()
        }
        Msg::StateFetched {
            state: descriptor,
            enabled,
            storage_enabled,
        } => {
            state.set_banner(descriptor);
            state.set_phase(Phase::Mode(enabled));
            // BakedIn means the real mode is hard-coded; the radio reflects
            // the stored user choice instead.
            let effective = if enabled == ProxyMode::BakedIn {
                storage_enabled.unwrap_or(state.settings().enabled)
            } else {
                enabled
            };
            state.set_checked(effective);
            enter_polyjuice_fetch_if_idle(&mut state)
        }
        Msg::CompanionProbe { present } => {
            state.set_companion_present(present);
            Vec::new()
        }
        Msg::ModeClicked(mode) => {
            if !mode.user_selectable() {
                return (state, Vec::new());
            }
            let prev = state.checked();
            state.set_checked(mode);

            if mode == ProxyMode::Polyjuice {
                // No SET_PROXY yet; the session starts once a country is
                // chosen and START_POLYJUICE has succeeded.
                state.settings_mut().enabled = mode;
                state.set_banner(descriptor_for(UiStateKey::PolyjuicePending));
                state.set_polyjuice(PolyjuiceFlow::Fetching);
                vec![
                    Effect::SaveSettings(SettingsPatch::enabled(mode)),
                    Effect::FetchCountries,
                ]
            } else {
                state.set_phase(Phase::Mode(mode));
                state.settings_mut().enabled = mode;
                let mut patch = SettingsPatch::enabled(mode);
                let mut effects = Vec::new();
                if prev == Some(ProxyMode::Polyjuice) {
                    // Tear down the routing session before applying the new
                    // mode: selector off, persisted country cleared, then
                    // END_POLYJUICE ahead of SET_PROXY.
                    state.set_selector_enabled(false);
                    state.set_selected_country(None);
                    state.settings_mut().polyjuice_country.clear();
                    state.set_polyjuice(PolyjuiceFlow::Idle);
                    patch.polyjuice_country = Some(String::new());
                    effects.push(Effect::SaveSettings(patch));
                    effects.push(Effect::EndPolyjuice);
                } else {
                    effects.push(Effect::SaveSettings(patch));
                }
                effects.push(Effect::SetProxy { mode });
                effects
            }
        }
        Msg::CountriesFetched { mut countries } => {
            // Stable alphabetic sort on the localized display name, not the
            // ISO code.
            countries.sort_by(|a, b| a.name.cmp(&b.name));
            if countries.is_empty() {
                state.set_countries(countries);
                state.set_selector_enabled(false);
                return (state, Vec::new());
            }
            let preselected = countries
                .iter()
                .find(|entry| entry.code == state.settings().polyjuice_country)
                .map(|entry| entry.code.clone());
            state.set_countries(countries);
            state.set_selected_country(preselected);
            state.set_selector_enabled(true);
            state.set_polyjuice(PolyjuiceFlow::ListShown);
            Vec::new()
        }
        Msg::CountriesFetchFailed { .. } => {
            state.set_selector_enabled(false);
            state.set_polyjuice(PolyjuiceFlow::Error);
            Vec::new()
        }
        Msg::CountryChosen { code } => {
            if !state.selector_enabled() {
                return (state, Vec::new());
            }
            // The choice is persisted before the start round-trip resolves.
            state.settings_mut().polyjuice_country = code.clone();
            state.set_selected_country(Some(code.clone()));
            state.set_polyjuice(PolyjuiceFlow::Starting {
                country: code.clone(),
            });
            vec![
                Effect::SaveSettings(SettingsPatch::polyjuice_country(code.clone())),
                Effect::StartPolyjuice { country: code },
            ]
        }
        Msg::PolyjuiceStarted { country } => {
            state.set_phase(Phase::Mode(ProxyMode::Polyjuice));
            state.set_polyjuice(PolyjuiceFlow::Active { country });
            vec![Effect::SetProxy {
                mode: ProxyMode::Polyjuice,
            }]
        }
        Msg::PolyjuiceStartFailed { .. } => {
            state.set_polyjuice(PolyjuiceFlow::Error);
            notify_if_polyjuice_checked(&state)
        }
        Msg::PolyjuiceEnded => Vec::new(),
        Msg::PolyjuiceEndFailed { .. } => notify_if_polyjuice_checked(&state),
        Msg::UiChangePushed { state: descriptor } => {
            // Pushed descriptors replace the banner in place without
            // altering which radio control is checked.
            state.set_banner(descriptor);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// The coordinator is notified of a routing failure only while the
/// Polyjuice radio is the checked control.
fn notify_if_polyjuice_checked(state: &PopupState) -> Vec<Effect> {
    if state.checked() == Some(ProxyMode::Polyjuice) {
        vec![Effect::NotifyPolyjuiceError]
    } else {
        Vec::new()
    }
}

/// Entering polyjuice mode from the load sequence kicks off the country
/// fetch exactly once.
fn enter_polyjuice_fetch_if_idle(state: &mut PopupState) -> Vec<Effect> {
    if state.checked() == Some(ProxyMode::Polyjuice) && *state.polyjuice() == PolyjuiceFlow::Idle {
        state.set_polyjuice(PolyjuiceFlow::Fetching);
        vec![Effect::FetchCountries]
    } else {
        Vec::new()
    }
}
