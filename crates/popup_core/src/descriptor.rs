use serde::{Deserialize, Serialize};

use crate::ProxyMode;

/// Popup banner text and colors for one UI state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopupText {
    pub title: String,
    pub description: String,
    pub color_top: String,
    pub color_bottom: String,
}

/// Immutable description of how the popup should look for one state.
///
/// One exists per proxy mode plus the pending and error states. The
/// coordinator pushes values of the same shape via `UI_CHANGE`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiStateDescriptor {
    pub title: String,
    pub icon: String,
    pub popup: PopupText,
}

/// Keys into the static descriptor table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiStateKey {
    Mode(ProxyMode),
    Pending,
    PolyjuicePending,
    ErrorLoad,
    ErrorProxyStolen,
    ErrorPolyjuice,
}

impl From<ProxyMode> for UiStateKey {
    fn from(mode: ProxyMode) -> Self {
        UiStateKey::Mode(mode)
    }
}

/// Builds the static descriptor for a UI state.
pub fn descriptor_for(key: UiStateKey) -> UiStateDescriptor {
    let (title, icon, popup_title, description, color_top, color_bottom) = match key {
        UiStateKey::Mode(ProxyMode::On) => (
            "Proxy on",
            "icon_on",
            "Proxy enabled",
            "All traffic is routed through the proxy.",
            "#2e7d32",
            "#1b5e20",
        ),
        UiStateKey::Mode(ProxyMode::Direct) => (
            "Direct connection",
            "icon_direct",
            "Proxy disabled",
            "Traffic goes directly to the network.",
            "#616161",
            "#424242",
        ),
        UiStateKey::Mode(ProxyMode::System) => (
            "System settings",
            "icon_system",
            "System proxy",
            "The operating system proxy settings are in effect.",
            "#455a64",
            "#263238",
        ),
        UiStateKey::Mode(ProxyMode::China) => (
            "China connectivity",
            "icon_china",
            "China connectivity",
            "Routing is optimized for connectivity from China.",
            "#c62828",
            "#8e0000",
        ),
        UiStateKey::Mode(ProxyMode::Polyjuice) => (
            "Country routing",
            "icon_polyjuice",
            "Country routing active",
            "Traffic appears to originate from the selected country.",
            "#6a1b9a",
            "#4a148c",
        ),
        UiStateKey::Mode(ProxyMode::BakedIn) => (
            "Managed proxy",
            "icon_baked_in",
            "Proxy managed externally",
            "The proxy mode is fixed by configuration and cannot be changed here.",
            "#37474f",
            "#263238",
        ),
        UiStateKey::Pending => (
            "Loading",
            "icon_pending",
            "Loading…",
            "Fetching the current proxy state.",
            "#9e9e9e",
            "#757575",
        ),
        UiStateKey::PolyjuicePending => (
            "Country routing",
            "icon_polyjuice",
            "Waiting for selection",
            "Pick a country to route traffic through.",
            "#7b1fa2",
            "#6a1b9a",
        ),
        UiStateKey::ErrorLoad => (
            "Error",
            "icon_error",
            "Could not load settings",
            "The popup failed to initialize. Reopen it to try again.",
            "#b71c1c",
            "#7f0000",
        ),
        UiStateKey::ErrorProxyStolen => (
            "Error",
            "icon_error",
            "Proxy settings changed externally",
            "Another application took over the proxy configuration.",
            "#b71c1c",
            "#7f0000",
        ),
        UiStateKey::ErrorPolyjuice => (
            "Error",
            "icon_error",
            "Country routing failed",
            "The routing extension reported an error.",
            "#b71c1c",
            "#7f0000",
        ),
    };

    UiStateDescriptor {
        title: title.to_string(),
        icon: icon.to_string(),
        popup: PopupText {
            title: popup_title.to_string(),
            description: description.to_string(),
            color_top: color_top.to_string(),
            color_bottom: color_bottom.to_string(),
        },
    }
}
