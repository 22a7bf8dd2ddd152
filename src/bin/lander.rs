//! Rotating lunar lander wireframe in the terminal. Escape quits.

use std::process::ExitCode;

use anyhow::Context;
use bitmap_pong::GameConfig;
use bitmap_pong::app::run_lander;
use bitmap_pong::logging::{LoggingConfig, init_logging};
use bitmap_pong::platform::TerminalPlatform;

fn run() -> anyhow::Result<()> {
    let config = GameConfig::load().context("loading config")?;
    let mut platform = TerminalPlatform::open().context("opening terminal")?;
    run_lander(&config, &mut platform).context("running lander")
}

fn main() -> ExitCode {
    init_logging(LoggingConfig::default());

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
