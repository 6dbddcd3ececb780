use std::sync::mpsc;
use std::thread;

use popup_channel::{ChannelEvent, ChannelHandle, PushMessage};
use popup_core::{update, Msg, PopupState};
use popup_logging::popup_info;

use crate::effects::{map_event, EffectRunner};
use crate::input::{self, InputCommand};
use crate::transport::TcpTransport;
use crate::ui;

const COMPONENT: &str = "controller";

enum AppMsg {
    Core(Msg),
    Quit,
}

pub fn run(addr: &str) -> anyhow::Result<()> {
    let (transport, push_rx) = TcpTransport::connect(addr)?;
    let (channel, event_rx) = ChannelHandle::new(transport);
    let runner = EffectRunner::new(channel);

    let (app_tx, app_rx) = mpsc::channel::<AppMsg>();
    spawn_event_pump(event_rx, app_tx.clone());
    spawn_push_pump(push_rx, app_tx.clone());
    spawn_input_pump(app_tx.clone());

    popup_info!(COMPONENT, "popup opened against host {addr}");
    let mut state = PopupState::new();
    let _ = app_tx.send(AppMsg::Core(Msg::PopupOpened));

    while let Ok(app_msg) = app_rx.recv() {
        let msg = match app_msg {
            AppMsg::Core(msg) => msg,
            AppMsg::Quit => break,
        };
        let (next, effects) = update(state, msg);
        state = next;
        runner.enqueue(effects);
        if state.consume_dirty() {
            ui::render(&state.view());
        }
    }

    Ok(())
}

fn spawn_event_pump(event_rx: mpsc::Receiver<ChannelEvent>, app_tx: mpsc::Sender<AppMsg>) {
    thread::spawn(move || {
        while let Ok(event) = event_rx.recv() {
            if app_tx.send(AppMsg::Core(map_event(event))).is_err() {
                break;
            }
        }
    });
}

fn spawn_push_pump(push_rx: mpsc::Receiver<PushMessage>, app_tx: mpsc::Sender<AppMsg>) {
    thread::spawn(move || {
        while let Ok(push) = push_rx.recv() {
            let PushMessage::UiChange { state } = push;
            if app_tx.send(AppMsg::Core(Msg::UiChangePushed { state })).is_err() {
                break;
            }
        }
    });
}

fn spawn_input_pump(app_tx: mpsc::Sender<AppMsg>) {
    let (input_tx, input_rx) = mpsc::channel::<InputCommand>();
    input::spawn_reader(input_tx);
    thread::spawn(move || {
        while let Ok(command) = input_rx.recv() {
            let app_msg = match command {
                InputCommand::Mode(mode) => AppMsg::Core(Msg::ModeClicked(mode)),
                InputCommand::Country(code) => AppMsg::Core(Msg::CountryChosen { code }),
                InputCommand::Quit => AppMsg::Quit,
            };
            if app_tx.send(app_msg).is_err() {
                break;
            }
        }
    });
}
