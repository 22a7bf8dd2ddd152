//! Variable-timestep simulation step
//!
//! `advance` integrates the ball, resolves walls and paddles against the
//! candidate position before committing it, scores, and moves paddles.

use glam::Vec2;

use super::collision::{Aabb, departure_angle, reflect_vertical, snap_outside, wall_contact};
use super::input::{Direction, InputEvent, TickInput};
use super::state::{GameState, Side};

/// What the ball touched during a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    Wall,
    Paddle(Side),
}

/// Events produced by one `advance`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepEvents {
    /// Side credited with a point
    pub score: Option<Side>,
    /// Last thing the ball bounced off
    pub collision: Option<Collision>,
    /// The point just scored ended the match
    pub game_over: bool,
}

/// Result of applying queued input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputOutcome {
    #[default]
    Continue,
    /// The match was reset to 0-0
    MatchReset,
    /// Escape outside a match: leave the program
    Quit,
}

/// Apply queued key events to paddle intents and match flags
pub fn apply_input(state: &mut GameState, input: &mut TickInput) -> InputOutcome {
    let mut outcome = InputOutcome::Continue;

    for event in input.drain() {
        match event {
            InputEvent::Paddle {
                side,
                direction,
                held,
            } => {
                let paddle = state.paddle_mut(side);
                match direction {
                    Direction::Up => paddle.up = held,
                    Direction::Down => paddle.down = held,
                }
                if held && !state.match_state.game_over {
                    state.match_state.running = true;
                }
            }
            InputEvent::Escape => {
                if state.match_state.running || state.match_state.game_over {
                    state.reset_match();
                    log::info!("match reset");
                    outcome = InputOutcome::MatchReset;
                } else {
                    outcome = InputOutcome::Quit;
                }
            }
        }
    }

    outcome
}

/// Advance the simulation by `dt` seconds
pub fn advance(state: &mut GameState, dt: f32) -> StepEvents {
    let mut events = StepEvents::default();
    if state.match_state.game_over {
        return events;
    }

    let dt = dt.max(0.0);
    let half_ball = state.config.half_ball();

    if state.match_state.running {
        let mut next = state.ball.position + state.ball.velocity() * dt;

        if let Some(y) = wall_contact(next.y, half_ball, state.config.screen_height as f32) {
            next.y = y;
            state.ball.angle = reflect_vertical(state.ball.angle);
            events.collision = Some(Collision::Wall);
        }

        if let Some(side) = paddle_hit(state, next) {
            bounce_off_paddle(state, side, &mut next);
            events.collision = Some(Collision::Paddle(side));
        }

        state.ball.position = next;
    }

    if let Some(side) = check_scoring(state) {
        events.score = Some(side);
        events.game_over = state.match_state.game_over;
    }

    move_paddles(state, dt);

    events
}

/// `apply_input` followed by `advance`
pub fn tick(state: &mut GameState, input: &mut TickInput, dt: f32) -> (InputOutcome, StepEvents) {
    let outcome = apply_input(state, input);
    if outcome == InputOutcome::Quit {
        return (outcome, StepEvents::default());
    }
    (outcome, advance(state, dt))
}

/// First paddle (left, then right) whose box overlaps the candidate ball box
fn paddle_hit(state: &GameState, candidate: Vec2) -> Option<Side> {
    let half_ball = state.config.half_ball();
    let ball = Aabb::new(candidate, Vec2::splat(half_ball));
    let paddle_half = Vec2::new(state.config.paddle_width * 0.5, state.config.paddle_length * 0.5);

    Side::ALL.into_iter().find(|&side| {
        let center = Vec2::new(state.paddle_center_x(side), state.paddle(side).position_y);
        Aabb::new(center, paddle_half).overlaps(&ball)
    })
}

fn bounce_off_paddle(state: &mut GameState, side: Side, next: &mut Vec2) {
    let config = &state.config;
    let half_ball = config.half_ball();
    let half_width = config.paddle_width * 0.5;
    let half_length = config.paddle_length * 0.5;
    let (spread, bias, epsilon) = (config.serve_spread, config.impact_bias, config.paddle_snap_epsilon);
    let (gain, cap) = (config.ball_speed_gain, config.ball_speed_cap());

    let paddle_y = state.paddle(side).position_y;
    let center_x = state.paddle_center_x(side);
    let impact = (next.y - paddle_y) / half_length;
    let jitter = state.random_unit();

    state.ball.angle = departure_angle(side, jitter, spread, impact, bias);
    next.x = snap_outside(side, center_x, half_ball, half_width, epsilon);
    state.ball.speed = (state.ball.speed * gain).min(cap);
}

/// Credit a point if the ball left the field, then reset the round
fn check_scoring(state: &mut GameState) -> Option<Side> {
    let half_ball = state.config.half_ball();
    let x = state.ball.position.x;

    let scorer = if x < -half_ball {
        Side::Right
    } else if x > state.config.screen_width as f32 + half_ball {
        Side::Left
    } else {
        return None;
    };

    state.paddle_mut(scorer).score = state.paddle(scorer).score.saturating_add(1);
    let (left, right) = state.scores();
    log::debug!("{scorer:?} scores: {left}-{right}");

    if state.config.game_over.is_over(left, right) {
        state.match_state.game_over = true;
        log::info!("game over at {left}-{right}");
    }
    state.reset_round();

    Some(scorer)
}

/// Move paddles by their held direction and clamp into the legal band
fn move_paddles(state: &mut GameState, dt: f32) {
    let speed = state.config.paddle_speed;
    for side in Side::ALL {
        let paddle = state.paddle(side);
        let y = paddle.position_y + paddle.direction() * speed * dt;
        let y = state.config.clamp_paddle_y(y);
        state.paddle_mut(side).position_y = y;
    }
}
