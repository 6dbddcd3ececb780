use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{ChannelError, Endpoint, HostRequest, Transport, STATUS_OK};

/// The single adapter that enforces the `{status, error}` envelope contract.
///
/// A resolved call implies `status == "OK"`; any other status, or a
/// transport-level failure, rejects with a human-readable string. Call sites
/// never re-implement the check.
#[derive(Clone)]
pub struct HostClient {
    transport: Arc<dyn Transport>,
}

impl HostClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn call<P: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        request: &HostRequest,
    ) -> Result<P, ChannelError> {
        let request =
            serde_json::to_value(request).map_err(|err| ChannelError::Transport(err.to_string()))?;
        let mut reply = self.transport.send(endpoint, request).await?;

        let object = reply
            .as_object_mut()
            .ok_or_else(|| ChannelError::Protocol("reply is not an object".to_string()))?;
        let status = object
            .get("status")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        if status != STATUS_OK {
            let error = object
                .get("error")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("host reported status {status:?}"));
            return Err(ChannelError::Protocol(error));
        }

        // The payload is flattened next to the envelope fields; strip those
        // before handing the rest to the payload type.
        object.remove("status");
        object.remove("error");
        serde_json::from_value(reply).map_err(|err| ChannelError::Protocol(err.to_string()))
    }
}
