use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use popup_channel::{
    ChannelError, Endpoint, HostClient, SettingsStore, Transport, KEY_ENABLED,
    KEY_SHOW_CHINA_PROXY, SENTINEL_TRUE,
};
use popup_core::{ProxyMode, SettingsPatch};

/// In-memory stand-in for the host key-value store, speaking the same
/// envelope protocol as the real one.
struct MemoryStore {
    map: Mutex<BTreeMap<String, String>>,
    fail_reads: bool,
}

impl MemoryStore {
    fn new() -> Arc<Self> {
        Self::with_items(BTreeMap::new())
    }

    fn with_items(map: BTreeMap<String, String>) -> Arc<Self> {
        Arc::new(Self {
            map: Mutex::new(map),
            fail_reads: false,
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            map: Mutex::new(BTreeMap::new()),
            fail_reads: true,
        })
    }

    fn raw(&self, key: &str) -> Option<String> {
        self.map.lock().unwrap().get(key).cloned()
    }
}

#[async_trait::async_trait]
impl Transport for MemoryStore {
    async fn send(&self, endpoint: Endpoint, request: Value) -> Result<Value, ChannelError> {
        assert_eq!(endpoint, Endpoint::Storage);
        match request.get("action").and_then(Value::as_str) {
            Some("READ_LOCAL_STORAGE") => {
                if self.fail_reads {
                    return Err(ChannelError::Transport("storage offline".to_string()));
                }
                let mut reply = serde_json::Map::new();
                reply.insert("status".to_string(), json!("OK"));
                let map = self.map.lock().unwrap();
                if let Some(keys) = request.get("keys").and_then(Value::as_array) {
                    for key in keys.iter().filter_map(Value::as_str) {
                        if let Some(value) = map.get(key) {
                            reply.insert(key.to_string(), json!(value));
                        }
                    }
                }
                Ok(Value::Object(reply))
            }
            Some("WRITE_LOCAL_STORAGE") => {
                let mut map = self.map.lock().unwrap();
                if let Some(items) = request.get("items").and_then(Value::as_object) {
                    for (key, value) in items {
                        if let Some(value) = value.as_str() {
                            map.insert(key.clone(), value.to_string());
                        }
                    }
                }
                Ok(json!({ "status": "OK" }))
            }
            other => panic!("unexpected storage action {other:?}"),
        }
    }
}

fn store_over(transport: Arc<MemoryStore>) -> SettingsStore {
    SettingsStore::new(HostClient::new(transport))
}

#[tokio::test]
async fn set_then_load_round_trips_the_mode() {
    let backing = MemoryStore::new();

    let mut store = store_over(backing.clone());
    store
        .set(&SettingsPatch::enabled(ProxyMode::China))
        .await;
    assert_eq!(backing.raw(KEY_ENABLED).as_deref(), Some("C"));

    // A fresh instance against the same backing store sees the value.
    let mut fresh = store_over(backing);
    let settings = fresh.load().await.expect("load resolves");
    assert_eq!(settings.enabled, ProxyMode::China);
}

#[tokio::test]
async fn booleans_are_written_as_the_sentinel_string() {
    let backing = MemoryStore::new();
    let mut store = store_over(backing.clone());

    store
        .set(&SettingsPatch {
            show_china_option: Some(true),
            ..Default::default()
        })
        .await;
    assert_eq!(
        backing.raw(KEY_SHOW_CHINA_PROXY).as_deref(),
        Some(SENTINEL_TRUE)
    );

    store
        .set(&SettingsPatch {
            show_china_option: Some(false),
            ..Default::default()
        })
        .await;
    let raw = backing.raw(KEY_SHOW_CHINA_PROXY);
    assert_ne!(raw.as_deref(), Some(SENTINEL_TRUE));

    let mut fresh = store_over(backing);
    let settings = fresh.load().await.expect("load resolves");
    assert!(!settings.show_china_option);
}

#[tokio::test]
async fn unrecognized_enabled_token_keeps_the_default() {
    let backing = MemoryStore::with_items(BTreeMap::from([(
        KEY_ENABLED.to_string(),
        "Z".to_string(),
    )]));
    let mut store = store_over(backing);

    let settings = store.load().await.expect("load resolves");
    assert_eq!(settings.enabled, ProxyMode::On);
}

#[tokio::test]
async fn missing_keys_resolve_to_defaults() {
    let mut store = store_over(MemoryStore::new());

    let settings = store.load().await.expect("missing keys are not an error");
    assert_eq!(settings.enabled, ProxyMode::On);
    assert!(!settings.show_china_option);
    assert_eq!(settings.polyjuice_country, "");
    assert_eq!(settings.extra_pac_params, "");
    assert!(!settings.break_proxy);
}

#[tokio::test]
async fn load_keeps_cached_flags_when_their_keys_are_absent() {
    let backing = MemoryStore::new();
    let mut store = store_over(backing.clone());

    store
        .set(&SettingsPatch {
            show_china_option: Some(true),
            break_proxy: Some(true),
            ..Default::default()
        })
        .await;

    // The backing store lost the flag keys (another party cleared them in
    // a way the popup never observes).
    backing.map.lock().unwrap().clear();

    let settings = store.load().await.expect("load resolves");
    assert!(settings.show_china_option);
    assert!(settings.break_proxy);
}

#[tokio::test]
async fn load_rejects_on_transport_failure() {
    let mut store = store_over(MemoryStore::failing());

    let result = store.load().await;
    assert_eq!(
        result,
        Err(ChannelError::Transport("storage offline".to_string()))
    );
}

#[tokio::test]
async fn full_load_decodes_every_field() {
    let backing = MemoryStore::with_items(BTreeMap::from([
        ("ENABLED".to_string(), "P".to_string()),
        ("SHOW_CHINA_PROXY".to_string(), "T".to_string()),
        ("SELECTED_COUNTRY".to_string(), "FR".to_string()),
        ("EXTRA_PAC_PARAMS".to_string(), "retry=1".to_string()),
        ("BREAK_PROXY".to_string(), "T".to_string()),
    ]));
    let mut store = store_over(backing);

    let settings = store.load().await.expect("load resolves");
    assert_eq!(settings.enabled, ProxyMode::Polyjuice);
    assert!(settings.show_china_option);
    assert_eq!(settings.polyjuice_country, "FR");
    assert_eq!(settings.extra_pac_params, "retry=1");
    assert!(settings.break_proxy);
}
