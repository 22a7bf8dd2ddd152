//! Crate-wide error type
//!
//! Only setup can fail: opening the window/terminal, opening the audio
//! device, allocating bitmaps, or reading a bad config. The simulation
//! itself has no failure path.

use std::fmt;
use std::io;

use crate::config::ConfigError;
use crate::renderer::lander::ModelError;

/// Errors surfaced while setting up or presenting a demo.
#[derive(Debug)]
pub enum Error {
    /// Window/terminal could not be created.
    Window(String),
    /// Audio device could not be opened.
    Audio(String),
    /// Bitmap storage could not be allocated.
    Allocation { width: u32, height: u32 },
    /// Configuration failed to parse or validate.
    Config(ConfigError),
    /// Wireframe data references missing vertices.
    Model(ModelError),
    /// Presenting a frame or reading input failed.
    Io(io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Window(msg) => write!(f, "cannot open window: {msg}"),
            Error::Audio(msg) => write!(f, "cannot open audio: {msg}"),
            Error::Allocation { width, height } => {
                write!(f, "cannot allocate {width}x{height} bitmap")
            }
            Error::Config(err) => write!(f, "invalid config: {err}"),
            Error::Model(err) => write!(f, "invalid model: {err}"),
            Error::Io(err) => write!(f, "i/o failure: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Config(err) => Some(err),
            Error::Model(err) => Some(err),
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Error::Config(err)
    }
}

impl From<ModelError> for Error {
    fn from(err: ModelError) -> Self {
        Error::Model(err)
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}
