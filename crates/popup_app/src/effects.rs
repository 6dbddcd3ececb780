use popup_channel::{display_name, ChannelEvent, ChannelHandle};
use popup_core::{CountryEntry, Effect, Msg};
use popup_logging::{popup_debug, popup_error, popup_info, popup_warn};

const COMPONENT: &str = "controller";

/// Executes controller effects against the message channel.
pub struct EffectRunner {
    channel: ChannelHandle,
}

impl EffectRunner {
    pub fn new(channel: ChannelHandle) -> Self {
        Self { channel }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::LoadSettings => self.channel.load_settings(),
                Effect::SaveSettings(patch) => self.channel.save_settings(patch),
                Effect::FetchState => self.channel.fetch_state(),
                Effect::ProbeCompanion => self.channel.probe_companion(),
                Effect::SetProxy { mode } => {
                    popup_info!(COMPONENT, "requesting proxy mode {mode}");
                    self.channel.set_proxy(mode);
                }
                Effect::FetchCountries => self.channel.fetch_countries(),
                Effect::StartPolyjuice { country } => {
                    popup_info!(COMPONENT, "starting country routing via {country}");
                    self.channel.start_polyjuice(country);
                }
                Effect::EndPolyjuice => self.channel.end_polyjuice(),
                Effect::NotifyPolyjuiceError => self.channel.notify_polyjuice_error(),
            }
        }
    }
}

/// Maps a channel reply onto a controller message, logging failures that
/// the controller deliberately does not react to.
pub fn map_event(event: ChannelEvent) -> Msg {
    match event {
        ChannelEvent::SettingsLoaded(Ok(settings)) => Msg::SettingsLoaded(settings),
        ChannelEvent::SettingsLoaded(Err(err)) => {
            popup_error!(COMPONENT, "settings load failed: {err}");
            Msg::SettingsLoadFailed {
                error: err.to_string(),
            }
        }
        ChannelEvent::StateFetched(Ok(reply)) => Msg::StateFetched {
            state: reply.state,
            enabled: reply.enabled,
            storage_enabled: reply.storage_enabled,
        },
        ChannelEvent::StateFetched(Err(err)) => {
            popup_error!(COMPONENT, "GET_STATE failed: {err}");
            Msg::StateFetchFailed {
                error: err.to_string(),
            }
        }
        ChannelEvent::CompanionProbe { present } => Msg::CompanionProbe { present },
        ChannelEvent::SetProxyDone { mode, result } => {
            match result {
                Ok(()) => popup_debug!(COMPONENT, "proxy mode {mode} applied"),
                // The checked control is not rolled back; the coordinator
                // pushes a UI_CHANGE if it reverts the mode.
                Err(err) => popup_warn!(COMPONENT, "SET_PROXY {mode} failed: {err}"),
            }
            Msg::NoOp
        }
        ChannelEvent::CountriesFetched(Ok(codes)) => Msg::CountriesFetched {
            countries: codes
                .into_iter()
                .map(|code| CountryEntry {
                    name: display_name(&code),
                    code,
                })
                .collect(),
        },
        ChannelEvent::CountriesFetched(Err(err)) => {
            popup_warn!(COMPONENT, "country list fetch failed: {err}");
            Msg::CountriesFetchFailed {
                error: err.to_string(),
            }
        }
        ChannelEvent::PolyjuiceStarted { country, result } => match result {
            Ok(()) => Msg::PolyjuiceStarted { country },
            Err(err) => {
                popup_warn!(COMPONENT, "START_POLYJUICE {country} failed: {err}");
                Msg::PolyjuiceStartFailed {
                    error: err.to_string(),
                }
            }
        },
        ChannelEvent::PolyjuiceEnded(result) => match result {
            Ok(()) => Msg::PolyjuiceEnded,
            Err(err) => {
                popup_warn!(COMPONENT, "END_POLYJUICE failed: {err}");
                Msg::PolyjuiceEndFailed {
                    error: err.to_string(),
                }
            }
        },
    }
}
