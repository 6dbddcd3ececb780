use std::sync::{mpsc, Arc};
use std::thread;

use popup_logging::{popup_debug, popup_warn};

use popup_core::{PersistedSettings, ProxyMode, SettingsPatch};

use crate::{
    ChannelError, CountriesReply, EmptyReply, Endpoint, HostClient, HostRequest, SettingsStore,
    StateReply, Transport,
};

const COMPONENT: &str = "channel";

enum Command {
    LoadSettings,
    SaveSettings(SettingsPatch),
    FetchState,
    ProbeCompanion,
    SetProxy { mode: ProxyMode },
    FetchCountries,
    StartPolyjuice { country: String },
    EndPolyjuice,
    NotifyPolyjuiceError,
}

/// Replies surfaced to the controller loop. Fire-and-forget operations
/// (settings writes, the error notification) emit nothing.
#[derive(Debug)]
pub enum ChannelEvent {
    SettingsLoaded(Result<PersistedSettings, ChannelError>),
    StateFetched(Result<StateReply, ChannelError>),
    CompanionProbe {
        present: bool,
    },
    SetProxyDone {
        mode: ProxyMode,
        result: Result<(), ChannelError>,
    },
    CountriesFetched(Result<Vec<String>, ChannelError>),
    PolyjuiceStarted {
        country: String,
        result: Result<(), ChannelError>,
    },
    PolyjuiceEnded(Result<(), ChannelError>),
}

/// Owns the worker thread and tokio runtime that drive host calls.
///
/// Commands are accepted from any thread and awaited one at a time, so they
/// reach the transport in submission order; the controller relies on that
/// (END_POLYJUICE must arrive before the SET_PROXY that follows it, and
/// settings writes must land in the order they were issued). There is no
/// cancellation: once issued, a request always delivers its event.
pub struct ChannelHandle {
    cmd_tx: mpsc::Sender<Command>,
}

impl ChannelHandle {
    pub fn new(transport: Arc<dyn Transport>) -> (Self, mpsc::Receiver<ChannelEvent>) {
        let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
        let (event_tx, event_rx) = mpsc::channel::<ChannelEvent>();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            let client = HostClient::new(transport);
            let mut store = SettingsStore::new(client.clone());
            while let Ok(command) = cmd_rx.recv() {
                runtime.block_on(handle_command(&client, &mut store, command, &event_tx));
            }
        });

        (Self { cmd_tx }, event_rx)
    }

    pub fn load_settings(&self) {
        self.send(Command::LoadSettings);
    }

    pub fn save_settings(&self, patch: SettingsPatch) {
        self.send(Command::SaveSettings(patch));
    }

    pub fn fetch_state(&self) {
        self.send(Command::FetchState);
    }

    pub fn probe_companion(&self) {
        self.send(Command::ProbeCompanion);
    }

    pub fn set_proxy(&self, mode: ProxyMode) {
        self.send(Command::SetProxy { mode });
    }

    pub fn fetch_countries(&self) {
        self.send(Command::FetchCountries);
    }

    pub fn start_polyjuice(&self, country: impl Into<String>) {
        self.send(Command::StartPolyjuice {
            country: country.into(),
        });
    }

    pub fn end_polyjuice(&self) {
        self.send(Command::EndPolyjuice);
    }

    pub fn notify_polyjuice_error(&self) {
        self.send(Command::NotifyPolyjuiceError);
    }

    fn send(&self, command: Command) {
        let _ = self.cmd_tx.send(command);
    }
}

async fn handle_command(
    client: &HostClient,
    store: &mut SettingsStore,
    command: Command,
    event_tx: &mpsc::Sender<ChannelEvent>,
) {
    match command {
        Command::LoadSettings => {
            let result = store.load().await;
            let _ = event_tx.send(ChannelEvent::SettingsLoaded(result));
        }
        Command::SaveSettings(patch) => {
            // Fire-and-forget; the store logs a failed write itself.
            store.set(&patch).await;
        }
        Command::FetchState => {
            let result = client
                .call::<StateReply>(Endpoint::Coordinator, &HostRequest::GetState)
                .await;
            let _ = event_tx.send(ChannelEvent::StateFetched(result));
        }
        Command::ProbeCompanion => {
            let result = client
                .call::<EmptyReply>(Endpoint::Companion, &HostRequest::Hello)
                .await;
            if let Err(err) = &result {
                popup_debug!(COMPONENT, "companion probe rejected: {err}");
            }
            let _ = event_tx.send(ChannelEvent::CompanionProbe {
                present: result.is_ok(),
            });
        }
        Command::SetProxy { mode } => {
            let result = client
                .call::<EmptyReply>(Endpoint::Coordinator, &HostRequest::SetProxy { enabled: mode })
                .await
                .map(|_| ());
            let _ = event_tx.send(ChannelEvent::SetProxyDone { mode, result });
        }
        Command::FetchCountries => {
            let result = client
                .call::<CountriesReply>(Endpoint::Companion, &HostRequest::GetPolyjuiceCountries)
                .await
                .map(|reply| reply.countries);
            let _ = event_tx.send(ChannelEvent::CountriesFetched(result));
        }
        Command::StartPolyjuice { country } => {
            let result = client
                .call::<EmptyReply>(
                    Endpoint::Companion,
                    &HostRequest::StartPolyjuice {
                        country: country.clone(),
                    },
                )
                .await
                .map(|_| ());
            let _ = event_tx.send(ChannelEvent::PolyjuiceStarted { country, result });
        }
        Command::EndPolyjuice => {
            let result = client
                .call::<EmptyReply>(Endpoint::Companion, &HostRequest::EndPolyjuice)
                .await
                .map(|_| ());
            let _ = event_tx.send(ChannelEvent::PolyjuiceEnded(result));
        }
        Command::NotifyPolyjuiceError => {
            // Notification only; there is nothing the popup can do if even
            // this fails.
            if let Err(err) = client
                .call::<EmptyReply>(Endpoint::Coordinator, &HostRequest::PolyjuiceError)
                .await
            {
                popup_warn!(COMPONENT, "POLYJUICE_ERROR notification failed: {err}");
            }
        }
    }
}
