use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use popup_channel::{
    ChannelError, CountriesReply, EmptyReply, Endpoint, HostClient, HostRequest, Transport,
};
use popup_core::ProxyMode;

/// Replays canned replies and records every outgoing request.
struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<Value, ChannelError>>>,
    seen: Mutex<Vec<(Endpoint, Value)>>,
}

impl ScriptedTransport {
    fn new(replies: Vec<Result<Value, ChannelError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            seen: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<(Endpoint, Value)> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, endpoint: Endpoint, request: Value) -> Result<Value, ChannelError> {
        self.seen.lock().unwrap().push((endpoint, request));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ChannelError::Transport("script exhausted".to_string())))
    }
}

#[tokio::test]
async fn ok_envelope_resolves_with_the_flattened_payload() {
    let transport = ScriptedTransport::new(vec![Ok(json!({
        "status": "OK",
        "countries": ["FR", "DE"],
    }))]);
    let client = HostClient::new(transport.clone());

    let reply: CountriesReply = client
        .call(Endpoint::Companion, &HostRequest::GetPolyjuiceCountries)
        .await
        .expect("OK envelope resolves");
    assert_eq!(reply.countries, vec!["FR".to_string(), "DE".to_string()]);
}

#[tokio::test]
async fn error_status_rejects_with_the_error_string() {
    let transport = ScriptedTransport::new(vec![Ok(json!({
        "status": "error",
        "error": "proxy API unavailable",
    }))]);
    let client = HostClient::new(transport);

    let result: Result<EmptyReply, _> = client
        .call(Endpoint::Coordinator, &HostRequest::GetState)
        .await;
    assert_eq!(
        result,
        Err(ChannelError::Protocol("proxy API unavailable".to_string()))
    );
}

#[tokio::test]
async fn unknown_status_without_error_still_rejects() {
    let transport = ScriptedTransport::new(vec![Ok(json!({ "status": "busy" }))]);
    let client = HostClient::new(transport);

    let result: Result<EmptyReply, _> = client
        .call(Endpoint::Coordinator, &HostRequest::GetState)
        .await;
    match result {
        Err(ChannelError::Protocol(message)) => assert!(message.contains("busy")),
        other => panic!("expected protocol rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn transport_failure_passes_through() {
    let transport = ScriptedTransport::new(vec![Err(ChannelError::Transport(
        "no receiving end".to_string(),
    ))]);
    let client = HostClient::new(transport);

    let result: Result<EmptyReply, _> =
        client.call(Endpoint::Companion, &HostRequest::Hello).await;
    assert_eq!(
        result,
        Err(ChannelError::Transport("no receiving end".to_string()))
    );
}

#[tokio::test]
async fn requests_carry_the_action_token() {
    let transport = ScriptedTransport::new(vec![Ok(json!({ "status": "OK" }))]);
    let client = HostClient::new(transport.clone());

    let _: EmptyReply = client
        .call(
            Endpoint::Coordinator,
            &HostRequest::SetProxy {
                enabled: ProxyMode::Direct,
            },
        )
        .await
        .expect("call resolves");

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].0, Endpoint::Coordinator);
    assert_eq!(
        requests[0].1,
        json!({ "action": "SET_PROXY", "enabled": "D" })
    );
}
