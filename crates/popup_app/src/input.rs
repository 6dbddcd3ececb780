use std::io::BufRead;
use std::sync::mpsc;
use std::thread;

use popup_core::ProxyMode;

/// User actions accepted on stdin, standing in for the popup's controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    Mode(ProxyMode),
    Country(String),
    Quit,
}

pub fn parse(line: &str) -> Option<InputCommand> {
    let mut words = line.split_whitespace();
    let command = match words.next()? {
        "on" => InputCommand::Mode(ProxyMode::On),
        "direct" => InputCommand::Mode(ProxyMode::Direct),
        "system" => InputCommand::Mode(ProxyMode::System),
        "china" => InputCommand::Mode(ProxyMode::China),
        "polyjuice" => InputCommand::Mode(ProxyMode::Polyjuice),
        "country" => InputCommand::Country(words.next()?.to_uppercase()),
        "quit" | "exit" => InputCommand::Quit,
        _ => return None,
    };
    Some(command)
}

pub fn spawn_reader(tx: mpsc::Sender<InputCommand>) {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if let Some(command) = parse(&line) {
                let quit = command == InputCommand::Quit;
                if tx.send(command).is_err() || quit {
                    break;
                }
            } else if !line.trim().is_empty() {
                eprintln!("commands: on | direct | system | china | polyjuice | country <CODE> | quit");
            }
        }
    });
}
