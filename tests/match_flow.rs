use std::time::Duration;

use bitmap_pong::GameConfig;
use bitmap_pong::app::PongGame;
use bitmap_pong::audio::SilentDevice;
use bitmap_pong::platform::{HeadlessPlatform, Platform};
use bitmap_pong::sim::{GameState, InputOutcome, Key, KeyAction, KeyEvent, Side, StepEvents, TickInput, tick};
use glam::Vec2;

const DT: f32 = 1.0 / 60.0;

/// Serve with a key press, then push the ball past `scorer`'s opponent
fn serve_and_score(state: &mut GameState, input: &mut TickInput, scorer: Side) -> StepEvents {
    input.handle_key(Key::Char('w'), KeyAction::Press);
    tick(state, input, 0.0);
    assert!(state.match_state.running);
    input.handle_key(Key::Char('w'), KeyAction::Release);

    let x = match scorer {
        Side::Left => state.config.screen_width as f32 + 20.0,
        Side::Right => -20.0,
    };
    state.ball.position = Vec2::new(x, 300.0);
    let (outcome, events) = tick(state, input, DT);
    assert_eq!(outcome, InputOutcome::Continue);
    events
}

#[test]
fn full_match_needs_two_point_lead_past_fifteen() {
    let mut state = GameState::new(GameConfig::default(), 42);
    let mut input = TickInput::new();

    for _ in 0..13 {
        for scorer in [Side::Left, Side::Right] {
            let events = serve_and_score(&mut state, &mut input, scorer);
            assert_eq!(events.score, Some(scorer));
            assert!(!events.game_over);
        }
    }
    for _ in 0..2 {
        assert!(!serve_and_score(&mut state, &mut input, Side::Left).game_over);
    }
    assert_eq!(state.scores(), (15, 13));
    assert!(!state.match_state.game_over);

    assert!(!serve_and_score(&mut state, &mut input, Side::Right).game_over);
    assert_eq!(state.scores(), (15, 14));

    let events = serve_and_score(&mut state, &mut input, Side::Left);
    assert!(events.game_over);
    assert_eq!(state.scores(), (16, 14));
    assert!(state.match_state.game_over);
    assert!(!state.match_state.running);

    // Frozen: keys do not serve and nothing moves
    let positions = |s: &GameState| (s.ball, s.paddles.map(|p| p.position_y));
    let before = positions(&state);
    input.handle_key(Key::Char('s'), KeyAction::Press);
    tick(&mut state, &mut input, 1.0);
    assert!(!state.match_state.running);
    assert_eq!(positions(&state), before);

    input.handle_key(Key::Escape, KeyAction::Press);
    let (outcome, _) = tick(&mut state, &mut input, DT);
    assert_eq!(outcome, InputOutcome::MatchReset);
    assert_eq!(state.scores(), (0, 0));
    assert!(!state.match_state.game_over);

    input.handle_key(Key::Escape, KeyAction::Press);
    let (outcome, _) = tick(&mut state, &mut input, DT);
    assert_eq!(outcome, InputOutcome::Quit);
}

#[test]
fn same_seed_same_match() {
    let script: Vec<Vec<KeyEvent>> = vec![
        vec![KeyEvent::press(Key::Char('w')), KeyEvent::press(Key::Down)],
        vec![],
        vec![KeyEvent::release(Key::Char('w'))],
    ];

    let run = || {
        let mut game = PongGame::new(GameConfig::default(), 99, SilentDevice).unwrap();
        let mut platform = HeadlessPlatform::with_script(script.clone()).close_after(240);
        game.run(&mut platform, || DT).unwrap();
        (game.state().ball, game.state().paddles, game.state().scores())
    };

    assert_eq!(run(), run());
}

#[test]
fn headless_session_presents_full_frames_then_quits() {
    let mut game = PongGame::new(GameConfig::default(), 1, SilentDevice).unwrap();
    let mut script = vec![Vec::new(); 9];
    script.push(vec![KeyEvent::press(Key::Escape)]);
    let mut platform = HeadlessPlatform::with_script(script).capture_frames();

    game.run(&mut platform, || DT).unwrap();

    assert!(platform.should_close());
    assert_eq!(platform.presents(), 9);
    assert_eq!(platform.slept(), Duration::from_millis(15 * 9));
    let frame = platform.last_frame().unwrap();
    assert_eq!((frame.width(), frame.height()), (800, 600));
    // Serve position: ball at the center
    assert_ne!(frame.pixel(400, 300), Some(0));
}
