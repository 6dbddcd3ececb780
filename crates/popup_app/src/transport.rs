use std::collections::HashMap;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpStream;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use anyhow::Context;
use popup_channel::{ChannelError, Endpoint, PushMessage, Transport, STATUS_OK};
use popup_logging::{popup_debug, popup_warn};
use serde_json::{json, Value};

const COMPONENT: &str = "transport";

/// JSON-lines transport to the host process.
///
/// Each request goes out as one line tagged with a correlation `id` and a
/// `target`; the host answers with a line carrying the same `id`. Lines with
/// an `action` but no matching pending `id` are pushes from the coordinator
/// and are acknowledged with `{status: "OK"}` immediately.
pub struct TcpTransport {
    writer: Mutex<TcpStream>,
    pending: Arc<Mutex<HashMap<u64, tokio::sync::oneshot::Sender<Value>>>>,
    next_id: AtomicU64,
}

impl TcpTransport {
    /// Connects and spawns the reader thread. Pushed `UI_CHANGE` messages
    /// arrive on the returned receiver.
    pub fn connect(addr: &str) -> anyhow::Result<(Arc<Self>, mpsc::Receiver<PushMessage>)> {
        let stream = TcpStream::connect(addr)
            .with_context(|| format!("connect to host at {addr}"))?;
        let reader_stream = stream.try_clone().context("clone host stream")?;

        let transport = Arc::new(Self {
            writer: Mutex::new(stream),
            pending: Arc::new(Mutex::new(HashMap::new())),
            next_id: AtomicU64::new(1),
        });

        let (push_tx, push_rx) = mpsc::channel();
        let pending = transport.pending.clone();
        let ack_transport = transport.clone();
        thread::spawn(move || {
            read_loop(reader_stream, pending.clone(), push_tx, ack_transport);
            // Reader gone: fail every in-flight call by dropping its sender.
            if let Ok(mut pending) = pending.lock() {
                pending.clear();
            }
        });

        Ok((transport, push_rx))
    }

    fn write_line(&self, value: &Value) -> Result<(), ChannelError> {
        let line = serde_json::to_string(value)
            .map_err(|err| ChannelError::Transport(err.to_string()))?;
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| ChannelError::Transport("writer lock poisoned".to_string()))?;
        writer
            .write_all(line.as_bytes())
            .and_then(|_| writer.write_all(b"\n"))
            .map_err(|err| ChannelError::Transport(err.to_string()))
    }
}

#[async_trait::async_trait]
impl Transport for TcpTransport {
    async fn send(&self, endpoint: Endpoint, mut request: Value) -> Result<Value, ChannelError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (reply_tx, reply_rx) = tokio::sync::oneshot::channel();
        {
            let mut pending = self
                .pending
                .lock()
                .map_err(|_| ChannelError::Transport("pending lock poisoned".to_string()))?;
            pending.insert(id, reply_tx);
        }

        if let Some(object) = request.as_object_mut() {
            object.insert("id".to_string(), json!(id));
            object.insert("target".to_string(), json!(endpoint_token(endpoint)));
        }

        if let Err(err) = self.write_line(&request) {
            if let Ok(mut pending) = self.pending.lock() {
                pending.remove(&id);
            }
            return Err(err);
        }

        reply_rx
            .await
            .map_err(|_| ChannelError::Transport("messaging channel closed".to_string()))
    }
}

fn endpoint_token(endpoint: Endpoint) -> &'static str {
    match endpoint {
        Endpoint::Coordinator => "coordinator",
        Endpoint::Companion => "companion",
        Endpoint::Storage => "storage",
    }
}

fn read_loop(
    stream: TcpStream,
    pending: Arc<Mutex<HashMap<u64, tokio::sync::oneshot::Sender<Value>>>>,
    push_tx: mpsc::Sender<PushMessage>,
    transport: Arc<TcpTransport>,
) {
    let reader = BufReader::new(stream);
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                popup_warn!(COMPONENT, "host stream read failed: {err}");
                return;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        let value: Value = match serde_json::from_str(&line) {
            Ok(value) => value,
            Err(err) => {
                popup_warn!(COMPONENT, "unparseable host line: {err}");
                continue;
            }
        };

        let id = value.get("id").and_then(Value::as_u64);

        if value.get("action").is_some() {
            // Pushed message; ack before handing it on.
            match serde_json::from_value::<PushMessage>(value) {
                Ok(push) => {
                    if let Some(id) = id {
                        let ack = json!({ "id": id, "status": STATUS_OK });
                        if let Err(err) = transport.write_line(&ack) {
                            popup_warn!(COMPONENT, "push ack failed: {err}");
                        }
                    }
                    if push_tx.send(push).is_err() {
                        return;
                    }
                }
                Err(err) => {
                    popup_warn!(COMPONENT, "unknown push message: {err}");
                }
            }
            continue;
        }

        let Some(id) = id else {
            popup_debug!(COMPONENT, "host line without id, dropping");
            continue;
        };
        let reply_tx = pending.lock().ok().and_then(|mut pending| pending.remove(&id));
        match reply_tx {
            Some(reply_tx) => {
                let _ = reply_tx.send(value);
            }
            None => {
                popup_debug!(COMPONENT, "reply for unknown id {id}, dropping");
            }
        }
    }
}
