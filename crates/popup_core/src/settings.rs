use crate::ProxyMode;

/// The handful of persisted fields the popup cares about.
///
/// Created with defaults at controller startup, populated by one read from
/// the store, then mutated field-by-field by user actions. Fields are never
/// deleted, only overwritten.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PersistedSettings {
    pub enabled: ProxyMode,
    pub show_china_option: bool,
    pub polyjuice_country: String,
    pub extra_pac_params: String,
    pub break_proxy: bool,
}

/// Partial update for [`PersistedSettings`]; only present fields are written.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SettingsPatch {
    pub enabled: Option<ProxyMode>,
    pub show_china_option: Option<bool>,
    pub polyjuice_country: Option<String>,
    pub extra_pac_params: Option<String>,
    pub break_proxy: Option<bool>,
}

impl SettingsPatch {
    pub fn enabled(mode: ProxyMode) -> Self {
        Self {
            enabled: Some(mode),
            ..Self::default()
        }
    }

    pub fn polyjuice_country(code: impl Into<String>) -> Self {
        Self {
            polyjuice_country: Some(code.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.enabled.is_none()
            && self.show_china_option.is_none()
            && self.polyjuice_country.is_none()
            && self.extra_pac_params.is_none()
            && self.break_proxy.is_none()
    }

    /// Applies the present fields to an in-memory settings value.
    pub fn apply_to(&self, settings: &mut PersistedSettings) {
        if let Some(enabled) = self.enabled {
            settings.enabled = enabled;
        }
        if let Some(show) = self.show_china_option {
            settings.show_china_option = show;
        }
        if let Some(country) = &self.polyjuice_country {
            settings.polyjuice_country = country.clone();
        }
        if let Some(params) = &self.extra_pac_params {
            settings.extra_pac_params = params.clone();
        }
        if let Some(break_proxy) = self.break_proxy {
            settings.break_proxy = break_proxy;
        }
    }
}
