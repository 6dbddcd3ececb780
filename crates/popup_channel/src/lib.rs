//! Popup channel: message-envelope protocol and IO for the popup.
mod channel;
mod client;
mod countries;
mod protocol;
mod storage;
mod transport;

pub use channel::{ChannelEvent, ChannelHandle};
pub use client::HostClient;
pub use countries::display_name;
pub use protocol::{CountriesReply, EmptyReply, HostRequest, PushMessage, StateReply, STATUS_OK};
pub use storage::{
    SettingsStore, KEY_BREAK_PROXY, KEY_ENABLED, KEY_EXTRA_PAC_PARAMS, KEY_SELECTED_COUNTRY,
    KEY_SHOW_CHINA_PROXY, SENTINEL_FALSE, SENTINEL_TRUE,
};
pub use transport::{ChannelError, Endpoint, Transport};
