//! Popup core: pure state machine for the proxy-mode popup.
mod descriptor;
mod effect;
mod mode;
mod msg;
mod settings;
mod state;
mod update;
mod view_model;

pub use descriptor::{descriptor_for, PopupText, UiStateDescriptor, UiStateKey};
pub use effect::Effect;
pub use mode::ProxyMode;
pub use msg::{CountryEntry, Msg};
pub use settings::{PersistedSettings, SettingsPatch};
pub use state::{Phase, PolyjuiceFlow, PopupState};
pub use update::update;
pub use view_model::{CountryRow, PopupViewModel};
