use crate::{
    descriptor_for, CountryEntry, PersistedSettings, ProxyMode, UiStateDescriptor, UiStateKey,
};

/// Primary controller phase: pending until the load sequence reports a mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Pending,
    Mode(ProxyMode),
}

/// Country sub-flow states. `Error` is reachable from `Fetching`/`Starting`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PolyjuiceFlow {
    #[default]
    Idle,
    Fetching,
    ListShown,
    Starting {
        country: String,
    },
    Active {
        country: String,
    },
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupState {
    phase: Phase,
    /// Which radio control is checked. Updated optimistically on click,
    /// never rolled back on a failed apply.
    checked: Option<ProxyMode>,
    banner: UiStateDescriptor,
    settings: PersistedSettings,
    companion_present: bool,
    polyjuice: PolyjuiceFlow,
    countries: Vec<CountryEntry>,
    selected_country: Option<String>,
    selector_enabled: bool,
    dirty: bool,
}

impl Default for PopupState {
    fn default() -> Self {
        Self {
            phase: Phase::Pending,
            checked: None,
            banner: descriptor_for(UiStateKey::Pending),
            settings: PersistedSettings::default(),
            companion_present: false,
            polyjuice: PolyjuiceFlow::default(),
            countries: Vec::new(),
            selected_country: None,
            selector_enabled: false,
            dirty: false,
        }
    }
}

impl PopupState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn checked(&self) -> Option<ProxyMode> {
        self.checked
    }

    pub fn settings(&self) -> &PersistedSettings {
        &self.settings
    }

    pub fn polyjuice(&self) -> &PolyjuiceFlow {
        &self.polyjuice
    }

    pub fn countries(&self) -> &[CountryEntry] {
        &self.countries
    }

    pub fn selected_country(&self) -> Option<&str> {
        self.selected_country.as_deref()
    }

    /// Returns whether the state changed since the last call and resets the
    /// flag; the runtime re-renders only when this reports true.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
        self.dirty = true;
    }

    pub(crate) fn set_checked(&mut self, mode: ProxyMode) {
        self.checked = Some(mode);
        self.dirty = true;
    }

    pub(crate) fn set_banner(&mut self, banner: UiStateDescriptor) {
        self.banner = banner;
        self.dirty = true;
    }

    pub(crate) fn banner(&self) -> &UiStateDescriptor {
        &self.banner
    }

    pub(crate) fn settings_mut(&mut self) -> &mut PersistedSettings {
        self.dirty = true;
        &mut self.settings
    }

    pub(crate) fn set_companion_present(&mut self, present: bool) {
        self.companion_present = present;
        self.dirty = true;
    }

    pub(crate) fn companion_present(&self) -> bool {
        self.companion_present
    }

    pub(crate) fn set_polyjuice(&mut self, flow: PolyjuiceFlow) {
        self.polyjuice = flow;
        self.dirty = true;
    }

    pub(crate) fn set_countries(&mut self, countries: Vec<CountryEntry>) {
        self.countries = countries;
        self.dirty = true;
    }

    pub(crate) fn set_selected_country(&mut self, code: Option<String>) {
        self.selected_country = code;
        self.dirty = true;
    }

    pub(crate) fn set_selector_enabled(&mut self, enabled: bool) {
        self.selector_enabled = enabled;
        self.dirty = true;
    }

    pub(crate) fn selector_enabled(&self) -> bool {
        self.selector_enabled
    }
}
