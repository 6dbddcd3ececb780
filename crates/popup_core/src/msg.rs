use crate::{PersistedSettings, ProxyMode, UiStateDescriptor};

/// One selectable country entry; `name` is the localized display name the
/// runtime resolved for the ISO code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryEntry {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Popup window opened; kicks off settings load, state fetch and probe.
    PopupOpened,
    /// Settings Store finished loading the persisted fields.
    SettingsLoaded(PersistedSettings),
    /// Settings Store load failed at the transport level.
    SettingsLoadFailed { error: String },
    /// Reply to the one-shot `GET_STATE` poll.
    StateFetched {
        state: UiStateDescriptor,
        enabled: ProxyMode,
        storage_enabled: Option<ProxyMode>,
    },
    /// `GET_STATE` failed.
    StateFetchFailed { error: String },
    /// Outcome of the companion-extension hello probe.
    CompanionProbe { present: bool },
    /// User clicked one of the mode radio controls.
    ModeClicked(ProxyMode),
    /// Country list arrived from the companion extension.
    CountriesFetched { countries: Vec<CountryEntry> },
    /// Country list fetch failed.
    CountriesFetchFailed { error: String },
    /// User picked a country from the selector.
    CountryChosen { code: String },
    /// `START_POLYJUICE` succeeded for the given country.
    PolyjuiceStarted { country: String },
    /// `START_POLYJUICE` failed.
    PolyjuiceStartFailed { error: String },
    /// `END_POLYJUICE` succeeded.
    PolyjuiceEnded,
    /// `END_POLYJUICE` failed.
    PolyjuiceEndFailed { error: String },
    /// Coordinator pushed a new descriptor (`UI_CHANGE`).
    UiChangePushed { state: UiStateDescriptor },
    /// Fallback for acks that carry no information.
    NoOp,
}
