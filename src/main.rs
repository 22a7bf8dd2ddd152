//! Pong in the terminal
//!
//! Left paddle: Z/W up, S down. Right paddle: K/Up up, J/Down down.
//! Escape resets a match in progress or quits. Logs go to stderr.

use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;
use bitmap_pong::GameConfig;
use bitmap_pong::app::run_pong;
use bitmap_pong::audio::default_device;
use bitmap_pong::consts::DEFAULT_SEED;
use bitmap_pong::logging::{LoggingConfig, init_logging};
use bitmap_pong::platform::TerminalPlatform;

fn seed_from_clock() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or(DEFAULT_SEED)
}

fn run() -> anyhow::Result<()> {
    let config = GameConfig::load().context("loading config")?;
    let device = default_device();
    let mut platform = TerminalPlatform::open().context("opening terminal")?;
    run_pong(config, seed_from_clock(), &mut platform, device).context("running pong")
}

fn main() -> ExitCode {
    init_logging(LoggingConfig::default());
    log::info!("Bitmap Pong v{}", env!("CARGO_PKG_VERSION"));

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
