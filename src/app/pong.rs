//! Pong frame loop

use std::io;
use std::time::Duration;

use super::FrameStatus;
use crate::audio::{Buzzer, SoundEffect, ToneDevice};
use crate::config::GameConfig;
use crate::error::Result;
use crate::platform::Platform;
use crate::renderer::{Bitmap, PixelFormat, PongRenderer};
use crate::sim::{GameState, InputOutcome, TickInput, tick};
use crate::time::Stopwatch;

/// Simulation, renderer and tone cues for one Pong session
pub struct PongGame<D: ToneDevice> {
    state: GameState,
    input: TickInput,
    renderer: PongRenderer,
    frame: Bitmap,
    buzzer: Buzzer<D>,
    frame_sleep: Duration,
    /// The opening round reset cues on the first frame
    opening_cue: bool,
}

impl<D: ToneDevice> PongGame<D> {
    pub fn new(config: GameConfig, seed: u64, device: D) -> Result<Self> {
        let frame = Bitmap::new(
            config.screen_width,
            config.screen_height,
            PixelFormat::Xrgb8888,
        )?;
        let renderer = PongRenderer::new(&config, frame.format())?;
        let buzzer = Buzzer::from_config(device, &config);
        let frame_sleep = Duration::from_millis(config.frame_sleep_ms);

        Ok(Self {
            state: GameState::new(config, seed),
            input: TickInput::new(),
            renderer,
            frame,
            buzzer,
            frame_sleep,
            opening_cue: true,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn buzzer(&self) -> &Buzzer<D> {
        &self.buzzer
    }

    /// Last rendered frame
    pub fn frame(&self) -> &Bitmap {
        &self.frame
    }

    /// Run one frame of `dt` seconds against `platform`
    pub fn step<P: Platform>(&mut self, platform: &mut P, dt: f32) -> io::Result<FrameStatus> {
        for event in platform.poll_events()? {
            self.input.push(event);
        }

        let (outcome, events) = tick(&mut self.state, &mut self.input, dt);
        if outcome == InputOutcome::Quit {
            log::info!("quit requested");
            return Ok(FrameStatus::Exit);
        }

        // Every round reset cues the low tone, over any bounce
        let round_reset = std::mem::take(&mut self.opening_cue)
            || outcome == InputOutcome::MatchReset
            || events.score.is_some();
        if round_reset {
            self.buzzer.play(SoundEffect::RoundReset);
        } else if events.collision.is_some() {
            self.buzzer.play(SoundEffect::Bounce);
        }
        self.buzzer.update(dt);

        self.renderer.render(&self.state, &mut self.frame);
        platform.present(&self.frame)?;
        Ok(FrameStatus::Continue)
    }

    /// Loop until the platform closes or the player quits.
    ///
    /// `next_dt` yields the seconds elapsed since the previous frame.
    pub fn run<P: Platform>(&mut self, platform: &mut P, mut next_dt: impl FnMut() -> f32) -> Result<()> {
        while !platform.should_close() {
            if self.step(platform, next_dt())? == FrameStatus::Exit {
                platform.request_close();
                break;
            }
            platform.sleep(self.frame_sleep);
        }
        Ok(())
    }
}

/// Play Pong on `platform` with wall-clock frame timing
pub fn run_pong<P: Platform, D: ToneDevice>(
    config: GameConfig,
    seed: u64,
    platform: &mut P,
    device: D,
) -> Result<()> {
    log::info!(
        "pong starting ({}x{}, seed {seed:#x})",
        config.screen_width,
        config.screen_height
    );
    let mut game = PongGame::new(config, seed, device)?;
    let mut clock = Stopwatch::new();
    game.run(platform, || clock.step())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::HeadlessPlatform;
    use crate::sim::{Ball, Key, KeyEvent};
    use glam::Vec2;

    const DT: f32 = 1.0 / 60.0;

    #[derive(Debug, Default)]
    struct RecordingDevice {
        played: Vec<f32>,
    }

    impl ToneDevice for RecordingDevice {
        fn play(&mut self, frequency_hz: f32) {
            self.played.push(frequency_hz);
        }

        fn stop(&mut self) {}
    }

    fn game() -> PongGame<RecordingDevice> {
        PongGame::new(GameConfig::default(), 7, RecordingDevice::default()).unwrap()
    }

    /// A game past its first frame, opening cue already played
    fn started_game() -> PongGame<RecordingDevice> {
        let mut game = game();
        game.step(&mut HeadlessPlatform::new(), DT).unwrap();
        assert_eq!(game.buzzer().device().played.len(), 1);
        game
    }

    #[test]
    fn test_press_starts_round_and_moves_paddle() {
        let mut game = game();
        let mut platform = HeadlessPlatform::with_script(vec![vec![KeyEvent::press(Key::Char('w'))]])
            .close_after(5);

        game.run(&mut platform, || DT).unwrap();

        assert!(game.state().match_state.running);
        assert!(game.state().paddles[0].position_y < 300.0);
        assert_eq!(game.state().paddles[1].position_y, 300.0);
        assert_eq!(platform.presents(), 5);
        assert_eq!(platform.slept(), Duration::from_millis(15 * 5));
    }

    #[test]
    fn test_escape_before_serve_quits() {
        let mut game = game();
        let mut platform = HeadlessPlatform::with_script(vec![vec![KeyEvent::press(Key::Escape)]]);

        game.run(&mut platform, || DT).unwrap();

        assert!(platform.should_close());
        assert_eq!(platform.presents(), 0);
    }

    #[test]
    fn test_escape_during_match_resets() {
        let mut game = game();
        game.state_mut().paddles[0].score = 4;
        let mut platform = HeadlessPlatform::with_script(vec![
            vec![KeyEvent::press(Key::Char('k'))],
            vec![KeyEvent::press(Key::Escape)],
        ])
        .close_after(3);

        game.run(&mut platform, || DT).unwrap();

        assert_eq!(game.state().scores(), (0, 0));
        assert!(!game.state().match_state.running);
        assert_eq!(platform.presents(), 3);
    }

    #[test]
    fn test_wall_bounce_plays_high_tone() {
        let mut game = started_game();
        let tone = game.state().config.tone_frequency;
        game.state_mut().match_state.running = true;
        game.state_mut().ball = Ball::new(Vec2::new(400.0, 9.0), 282.0, -std::f32::consts::FRAC_PI_2);
        let mut platform = HeadlessPlatform::new();

        game.step(&mut platform, DT).unwrap();

        assert_eq!(game.buzzer().device().played, vec![tone, tone * 2.0]);
        assert!(game.buzzer().is_playing());
    }

    #[test]
    fn test_score_plays_low_tone_and_renders() {
        let mut game = started_game();
        let tone = game.state().config.tone_frequency;
        game.state_mut().match_state.running = true;
        game.state_mut().ball = Ball::new(Vec2::new(-50.0, 300.0), 282.0, std::f32::consts::PI);
        let mut platform = HeadlessPlatform::new().capture_frames();

        game.step(&mut platform, DT).unwrap();

        assert_eq!(game.state().scores(), (0, 1));
        assert!(!game.state().match_state.running);
        assert_eq!(game.buzzer().device().played, vec![tone, tone]);

        // Ball recentered and drawn
        let frame = platform.last_frame().unwrap();
        assert_ne!(frame.pixel(405, 300), Some(0));
    }

    #[test]
    fn test_muted_config_stays_silent() {
        let config = GameConfig {
            muted: true,
            ..GameConfig::default()
        };
        let mut game = PongGame::new(config, 7, RecordingDevice::default()).unwrap();
        game.state_mut().match_state.running = true;
        game.state_mut().ball = Ball::new(Vec2::new(-50.0, 300.0), 282.0, 0.0);
        let mut platform = HeadlessPlatform::new();

        game.step(&mut platform, DT).unwrap();

        assert_eq!(game.state().scores(), (0, 1));
        assert!(game.buzzer().device().played.is_empty());
    }

    #[test]
    fn test_first_frame_plays_opening_cue() {
        let mut game = game();
        let tone = game.state().config.tone_frequency;
        let mut platform = HeadlessPlatform::new().close_after(3);

        game.run(&mut platform, || DT).unwrap();

        assert_eq!(game.buzzer().device().played, vec![tone]);
    }

    #[test]
    fn test_escape_reset_plays_low_tone() {
        let mut game = started_game();
        let tone = game.state().config.tone_frequency;
        game.state_mut().paddles[1].score = 3;
        let mut platform = HeadlessPlatform::with_script(vec![
            vec![KeyEvent::press(Key::Char('k'))],
            vec![KeyEvent::press(Key::Escape)],
        ]);

        game.step(&mut platform, DT).unwrap();
        assert!(game.state().match_state.running);
        game.step(&mut platform, DT).unwrap();

        assert_eq!(game.state().scores(), (0, 0));
        assert_eq!(game.buzzer().device().played, vec![tone, tone]);
        assert!(game.buzzer().is_playing());
    }
}
