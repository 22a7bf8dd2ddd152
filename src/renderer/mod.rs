//! Software rendering module
//!
//! Everything draws into a CPU `Bitmap`; platforms only present finished frames.

pub mod glyphs;
pub mod lander;
pub mod pong;
pub mod surface;

pub use glyphs::GlyphAtlas;
pub use lander::{LanderModel, LanderView, ModelError};
pub use pong::{CenterLine, PongRenderer};
pub use surface::{Bitmap, PixelFormat, Rect};
