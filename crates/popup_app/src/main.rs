mod app;
mod effects;
mod input;
mod transport;
mod ui;

use anyhow::Result;

const DEFAULT_HOST_ADDR: &str = "127.0.0.1:9400";

fn main() -> Result<()> {
    init_logging();
    let addr = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_HOST_ADDR.to_string());
    app::run(&addr)
}

fn init_logging() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )]);
}
