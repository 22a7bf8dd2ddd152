//! Game state and core simulation types
//!
//! Everything the physics step mutates lives in `GameState`, constructed
//! explicitly by the frame loop and passed by reference.

use std::f32::consts::PI;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::config::GameConfig;
use crate::normalize_angle;

/// Which paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Left, Side::Right];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }

    /// Departure direction away from this side's paddle
    pub fn outward_angle(self) -> f32 {
        match self {
            Side::Left => 0.0,
            Side::Right => PI,
        }
    }
}

/// The ball: position plus scalar speed along a heading
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    /// Center, in screen pixels
    pub position: Vec2,
    /// Pixels per second, never negative
    pub speed: f32,
    /// Heading in radians, normalized to [-π, π)
    pub angle: f32,
}

impl Ball {
    pub fn new(position: Vec2, speed: f32, angle: f32) -> Self {
        Self {
            position,
            speed: speed.max(0.0),
            angle: normalize_angle(angle),
        }
    }

    /// Velocity vector derived from speed and heading
    #[inline]
    pub fn velocity(&self) -> Vec2 {
        Vec2::from_angle(self.angle) * self.speed
    }
}

/// A player's paddle
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Paddle {
    /// Vertical center
    pub position_y: f32,
    /// Held intent flags, written only by input handling and round resets
    pub up: bool,
    pub down: bool,
    pub score: u16,
}

impl Paddle {
    pub fn new(position_y: f32) -> Self {
        Self {
            position_y,
            ..Default::default()
        }
    }

    /// -1 (up), 0, or 1 (down); opposing keys cancel
    #[inline]
    pub fn direction(&self) -> f32 {
        self.down as i32 as f32 - self.up as i32 as f32
    }

    pub fn release(&mut self) {
        self.up = false;
        self.down = false;
    }
}

/// Round/match flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchState {
    /// Ball advances only while true
    pub running: bool,
    /// Sticky until the match is reset
    pub game_over: bool,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    pub ball: Ball,
    pub paddles: [Paddle; 2],
    pub match_state: MatchState,
    rng: Pcg32,
}

impl GameState {
    /// Create a fresh match with the ball served from the center
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let center = Self::center_of(&config);
        let mut state = Self {
            ball: Ball::new(center, config.ball_initial_speed, 0.0),
            paddles: [Paddle::new(center.y); 2],
            match_state: MatchState::default(),
            rng: Pcg32::seed_from_u64(seed),
            config,
        };
        state.reset_round();
        state
    }

    fn center_of(config: &GameConfig) -> Vec2 {
        Vec2::new(
            config.screen_width as f32 / 2.0,
            config.screen_height as f32 / 2.0,
        )
    }

    /// Screen center
    pub fn center(&self) -> Vec2 {
        Self::center_of(&self.config)
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        &self.paddles[side.index()]
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        &mut self.paddles[side.index()]
    }

    /// Horizontal center of a paddle
    pub fn paddle_center_x(&self, side: Side) -> f32 {
        let left_edge = match side {
            Side::Left => self.config.left_paddle_x(),
            Side::Right => self.config.right_paddle_x(),
        };
        left_edge + self.config.paddle_width * 0.5
    }

    /// Uniform sample in [-1, 1]
    pub(crate) fn random_unit(&mut self) -> f32 {
        self.rng.random_range(-1.0..=1.0)
    }

    /// Serve heading: toward a random side within the spread cone
    fn random_serve_angle(&mut self) -> f32 {
        let side = if self.rng.random_bool(0.5) {
            Side::Left
        } else {
            Side::Right
        };
        let spread = self.config.serve_spread;
        normalize_angle(side.outward_angle() + self.random_unit() * spread)
    }

    /// Recenter ball and paddles, drop held intents, wait for input
    pub fn reset_round(&mut self) {
        let center = self.center();
        let angle = self.random_serve_angle();
        self.ball = Ball::new(center, self.config.ball_initial_speed, angle);
        for paddle in &mut self.paddles {
            paddle.position_y = center.y;
            paddle.release();
        }
        self.match_state.running = false;
    }

    /// Clear scores and game over, then reset the round
    pub fn reset_match(&mut self) {
        for paddle in &mut self.paddles {
            paddle.score = 0;
        }
        self.match_state.game_over = false;
        self.reset_round();
    }

    /// Current scores (left, right)
    pub fn scores(&self) -> (u16, u16) {
        (self.paddles[0].score, self.paddles[1].score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_centered_and_idle() {
        let state = GameState::new(GameConfig::default(), 7);
        assert_eq!(state.ball.position, Vec2::new(400.0, 300.0));
        assert_eq!(state.ball.speed, state.config.ball_initial_speed);
        assert!(!state.match_state.running);
        assert!(!state.match_state.game_over);
        for side in Side::ALL {
            assert_eq!(state.paddle(side).position_y, 300.0);
            assert_eq!(state.paddle(side).score, 0);
        }
    }

    #[test]
    fn test_serve_angle_within_cone() {
        let config = GameConfig::default();
        let spread = config.serve_spread;
        let mut state = GameState::new(config, 1);
        for _ in 0..200 {
            state.reset_round();
            let a = state.ball.angle;
            // Angular distance to the nearest horizontal direction
            let off_axis = a.abs().min(PI - a.abs());
            assert!(off_axis <= spread + 1e-5, "angle {a} outside serve cone");
        }
    }

    #[test]
    fn test_serves_go_both_ways() {
        let mut state = GameState::new(GameConfig::default(), 99);
        let mut rightward = 0;
        for _ in 0..100 {
            state.reset_round();
            if state.ball.velocity().x > 0.0 {
                rightward += 1;
            }
        }
        assert!(rightward > 10 && rightward < 90);
    }

    #[test]
    fn test_same_seed_same_serves() {
        let mut a = GameState::new(GameConfig::default(), 4242);
        let mut b = GameState::new(GameConfig::default(), 4242);
        for _ in 0..10 {
            a.reset_round();
            b.reset_round();
            assert_eq!(a.ball, b.ball);
        }
    }

    #[test]
    fn test_paddle_direction_cancels() {
        let mut paddle = Paddle::new(100.0);
        paddle.up = true;
        assert_eq!(paddle.direction(), -1.0);
        paddle.down = true;
        assert_eq!(paddle.direction(), 0.0);
        paddle.up = false;
        assert_eq!(paddle.direction(), 1.0);
    }

    #[test]
    fn test_reset_match_clears_scores() {
        let mut state = GameState::new(GameConfig::default(), 3);
        state.paddles[0].score = 16;
        state.paddles[1].score = 14;
        state.match_state.game_over = true;
        state.paddles[1].up = true;
        state.reset_match();
        assert_eq!(state.scores(), (0, 0));
        assert!(!state.match_state.game_over);
        assert!(!state.paddles[1].up);
    }

    #[test]
    fn test_paddle_centers() {
        let state = GameState::new(GameConfig::default(), 0);
        assert_eq!(state.paddle_center_x(Side::Left), 62.0);
        assert_eq!(state.paddle_center_x(Side::Right), 738.0);
    }
}
