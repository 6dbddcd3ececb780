use crate::{ProxyMode, SettingsPatch};

/// IO the runtime must perform on behalf of the pure controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Read the fixed key set from the backing store.
    LoadSettings,
    /// Fire-and-forget partial write to the backing store.
    SaveSettings(SettingsPatch),
    /// One-shot `GET_STATE` poll of the coordinator.
    FetchState,
    /// Hello probe to the companion routing extension.
    ProbeCompanion,
    /// Ask the coordinator to apply a proxy mode.
    SetProxy { mode: ProxyMode },
    /// Ask the companion extension for its country list.
    FetchCountries,
    /// Start a routing session for the given country.
    StartPolyjuice { country: String },
    /// Tear down the active routing session.
    EndPolyjuice,
    /// Tell the coordinator the routing flow failed so it can revert.
    NotifyPolyjuiceError,
}
