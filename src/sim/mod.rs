//! Pong simulation module
//!
//! All gameplay logic lives here. This module stays pure:
//! - Seeded RNG only
//! - Input arrives through `TickInput`, never from a platform callback
//! - No rendering or platform dependencies

pub mod collision;
pub mod input;
pub mod state;
pub mod tick;

pub use collision::Aabb;
pub use input::{Direction, InputEvent, Key, KeyAction, KeyEvent, TickInput};
pub use state::{Ball, GameState, MatchState, Paddle, Side};
pub use tick::{Collision, InputOutcome, StepEvents, advance, apply_input, tick};
