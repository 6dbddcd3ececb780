use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use popup_core::{ProxyMode, UiStateDescriptor};

/// The one status token that resolves a call.
pub const STATUS_OK: &str = "OK";

/// Requests the popup may send. Serialized with an `action` tag carrying the
/// protocol token, e.g. `{"action": "SET_PROXY", "enabled": "D"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HostRequest {
    GetState,
    SetProxy { enabled: ProxyMode },
    GetPolyjuiceCountries,
    StartPolyjuice { country: String },
    EndPolyjuice,
    PolyjuiceError,
    ReadLocalStorage { keys: Vec<String> },
    WriteLocalStorage { items: BTreeMap<String, String> },
    Hello,
}

/// Messages pushed by the coordinator, not polled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PushMessage {
    UiChange { state: UiStateDescriptor },
}

/// Success payload of `GET_STATE`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateReply {
    pub state: UiStateDescriptor,
    pub enabled: ProxyMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_enabled: Option<ProxyMode>,
}

/// Success payload of `GET_POLYJUICE_COUNTRIES`; an empty list is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountriesReply {
    pub countries: Vec<String>,
}

/// Payload for replies that carry nothing beyond the envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyReply {}
