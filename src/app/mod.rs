//! Frame loops
//!
//! Each demo owns its state and a frame bitmap; a `Platform` supplies input
//! and shows the result. Per frame: pump events, step, render, present,
//! then sleep.

pub mod lander;
pub mod pong;

pub use lander::{LanderDemo, run_lander};
pub use pong::{PongGame, run_pong};

/// Whether a demo wants another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Continue,
    Exit,
}
