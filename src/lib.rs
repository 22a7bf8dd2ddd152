//! Bitmap Pong - software-rendered arcade demos
//!
//! Core modules:
//! - `sim`: Pong simulation (ball/paddle state, physics step, scoring)
//! - `renderer`: Bitmap surfaces, digit glyph atlas, Pong and lander drawing
//! - `app`: Frame loops tying platform, simulation, audio and rendering together
//! - `platform`: Window/input collaborators (terminal and headless)
//! - `audio`: Tone cues over a pluggable tone device
//! - `config`: Data-driven game tuning

pub mod app;
pub mod audio;
pub mod config;
pub mod error;
pub mod logging;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod time;

pub use config::{GameConfig, GameOverRule};
pub use error::{Error, Result};

use glam::Vec2;

/// Fixed constants shared by both demos
pub mod consts {
    /// Logical framebuffer size
    pub const SCREEN_W: u32 = 800;
    pub const SCREEN_H: u32 = 600;

    /// Glyph cell dimensions in atlas pixels
    pub const GLYPH_W: u32 = 5;
    pub const GLYPH_H: u32 = 7;
    pub const GLYPH_COUNT: u32 = 10;

    /// Default seed when the caller does not provide one
    pub const DEFAULT_SEED: u64 = 0x5eed_b0a1;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    (angle + PI).rem_euclid(TAU) - PI
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(pos: Vec2) -> (f32, f32) {
    (pos.length(), pos.y.atan2(pos.x))
}
