use crate::{Phase, PopupState, ProxyMode, UiStateDescriptor};

/// One row of the country selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryRow {
    pub code: String,
    pub name: String,
    pub selected: bool,
}

/// Render-ready projection of the popup state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupViewModel {
    pub pending: bool,
    pub checked: Option<ProxyMode>,
    pub banner: UiStateDescriptor,
    pub china_visible: bool,
    pub polyjuice_visible: bool,
    pub selector_enabled: bool,
    pub countries: Vec<CountryRow>,
}

impl PopupState {
    pub fn view(&self) -> PopupViewModel {
        let countries = self
            .countries()
            .iter()
            .map(|entry| CountryRow {
                code: entry.code.clone(),
                name: entry.name.clone(),
                selected: self.selected_country() == Some(entry.code.as_str()),
            })
            .collect();

        PopupViewModel {
            pending: self.phase() == Phase::Pending,
            checked: self.checked(),
            banner: self.banner().clone(),
            china_visible: self.settings().show_china_option,
            polyjuice_visible: self.companion_present(),
            selector_enabled: self.selector_enabled(),
            countries,
        }
    }
}
