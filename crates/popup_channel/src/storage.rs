use std::collections::BTreeMap;

use popup_logging::popup_warn;
use serde::Deserialize;

use popup_core::{PersistedSettings, ProxyMode, SettingsPatch};

use crate::{ChannelError, Endpoint, HostClient, HostRequest};

pub const KEY_ENABLED: &str = "ENABLED";
pub const KEY_SHOW_CHINA_PROXY: &str = "SHOW_CHINA_PROXY";
pub const KEY_SELECTED_COUNTRY: &str = "SELECTED_COUNTRY";
pub const KEY_EXTRA_PAC_PARAMS: &str = "EXTRA_PAC_PARAMS";
pub const KEY_BREAK_PROXY: &str = "BREAK_PROXY";

/// The store encodes booleans as one reserved string, not a native boolean.
pub const SENTINEL_TRUE: &str = "T";
pub const SENTINEL_FALSE: &str = "F";

const COMPONENT: &str = "storage";

/// Reply of `READ_LOCAL_STORAGE`: the requested keys flattened next to the
/// envelope. Missing keys are simply absent.
#[derive(Debug, Deserialize)]
struct StorageItems {
    #[serde(flatten)]
    items: BTreeMap<String, String>,
}

/// Single source of truth for the persisted fields, backed by the external
/// key-value store reached through the message channel.
pub struct SettingsStore {
    client: HostClient,
    cache: PersistedSettings,
}

impl SettingsStore {
    pub fn new(client: HostClient) -> Self {
        Self {
            client,
            cache: PersistedSettings::default(),
        }
    }

    pub fn cached(&self) -> &PersistedSettings {
        &self.cache
    }

    /// Reads the fixed key set and updates the in-memory cache.
    ///
    /// Missing or unrecognized values are silently ignored (the cache keeps
    /// its current values); only a transport failure rejects.
    pub async fn load(&mut self) -> Result<PersistedSettings, ChannelError> {
        let keys = vec![
            KEY_ENABLED.to_string(),
            KEY_SHOW_CHINA_PROXY.to_string(),
            KEY_SELECTED_COUNTRY.to_string(),
            KEY_EXTRA_PAC_PARAMS.to_string(),
            KEY_BREAK_PROXY.to_string(),
        ];
        let reply: StorageItems = self
            .client
            .call(Endpoint::Storage, &HostRequest::ReadLocalStorage { keys })
            .await?;
        let items = reply.items;

        if let Some(mode) = items
            .get(KEY_ENABLED)
            .and_then(|token| ProxyMode::from_token(token))
        {
            self.cache.enabled = mode;
        }
        if items.contains_key(KEY_SHOW_CHINA_PROXY) {
            self.cache.show_china_option =
                items.get(KEY_SHOW_CHINA_PROXY).map(String::as_str) == Some(SENTINEL_TRUE);
        }
        if let Some(country) = items.get(KEY_SELECTED_COUNTRY) {
            self.cache.polyjuice_country = country.clone();
        }
        if let Some(params) = items.get(KEY_EXTRA_PAC_PARAMS) {
            self.cache.extra_pac_params = params.clone();
        }
        if items.contains_key(KEY_BREAK_PROXY) {
            self.cache.break_proxy =
                items.get(KEY_BREAK_PROXY).map(String::as_str) == Some(SENTINEL_TRUE);
        }

        Ok(self.cache.clone())
    }

    /// Applies a partial update to the cache and writes it through.
    ///
    /// The write is fire-and-forget: a failure is logged here and never
    /// observed by the caller, and the cache is not rolled back.
    pub async fn set(&mut self, patch: &SettingsPatch) {
        if patch.is_empty() {
            return;
        }
        patch.apply_to(&mut self.cache);

        let items = encode_patch(patch);
        let result: Result<crate::EmptyReply, ChannelError> = self
            .client
            .call(Endpoint::Storage, &HostRequest::WriteLocalStorage { items })
            .await;
        if let Err(err) = result {
            popup_warn!(COMPONENT, "settings write failed: {err}");
        }
    }
}

/// Boolean fields become the reserved sentinel string at this boundary; the
/// rest of the core only ever sees real booleans.
fn encode_patch(patch: &SettingsPatch) -> BTreeMap<String, String> {
    let mut items = BTreeMap::new();
    if let Some(enabled) = patch.enabled {
        items.insert(KEY_ENABLED.to_string(), enabled.token().to_string());
    }
    if let Some(show) = patch.show_china_option {
        items.insert(KEY_SHOW_CHINA_PROXY.to_string(), encode_bool(show));
    }
    if let Some(country) = &patch.polyjuice_country {
        items.insert(KEY_SELECTED_COUNTRY.to_string(), country.clone());
    }
    if let Some(params) = &patch.extra_pac_params {
        items.insert(KEY_EXTRA_PAC_PARAMS.to_string(), params.clone());
    }
    if let Some(break_proxy) = patch.break_proxy {
        items.insert(KEY_BREAK_PROXY.to_string(), encode_bool(break_proxy));
    }
    items
}

fn encode_bool(value: bool) -> String {
    if value { SENTINEL_TRUE } else { SENTINEL_FALSE }.to_string()
}
