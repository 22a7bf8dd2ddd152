//! Platform abstraction layer
//!
//! A platform pumps key events and presents finished frames. The demos never
//! talk to a terminal or window directly:
//! - `terminal`: crossterm presenter with half-block pixels
//! - `headless`: scripted input and captured frames for tests

use std::io;
use std::time::Duration;

use crate::renderer::Bitmap;
use crate::sim::KeyEvent;

pub mod headless;
pub mod terminal;

pub use headless::HeadlessPlatform;
pub use terminal::TerminalPlatform;

/// Input source and frame sink for one demo
pub trait Platform {
    /// Key events received since the last call, oldest first
    fn poll_events(&mut self) -> io::Result<Vec<KeyEvent>>;

    /// Show a finished frame
    fn present(&mut self, frame: &Bitmap) -> io::Result<()>;

    fn should_close(&self) -> bool;

    fn request_close(&mut self);

    /// Frame pacing
    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
