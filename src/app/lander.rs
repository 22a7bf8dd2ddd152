//! Rotating lander frame loop

use std::io;
use std::time::Duration;

use super::FrameStatus;
use crate::config::GameConfig;
use crate::error::Result;
use crate::platform::Platform;
use crate::renderer::{Bitmap, LanderModel, LanderView, PixelFormat};
use crate::sim::{Key, KeyAction};
use crate::time::Stopwatch;

pub struct LanderDemo {
    model: LanderModel,
    view: LanderView,
    frame: Bitmap,
}

impl LanderDemo {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(Self {
            model: LanderModel::classic()?,
            view: LanderView::new(),
            frame: Bitmap::new(width, height, PixelFormat::Xrgb8888)?,
        })
    }

    pub fn view(&self) -> &LanderView {
        &self.view
    }

    pub fn frame(&self) -> &Bitmap {
        &self.frame
    }

    /// Rotate by `dt` seconds and present; Escape exits
    pub fn step<P: Platform>(&mut self, platform: &mut P, dt: f32) -> io::Result<FrameStatus> {
        let quit = platform
            .poll_events()?
            .iter()
            .any(|event| event.key == Key::Escape && event.action == KeyAction::Press);
        if quit {
            return Ok(FrameStatus::Exit);
        }

        self.view.advance(dt);
        self.view.render(&self.model, &mut self.frame);
        platform.present(&self.frame)?;
        Ok(FrameStatus::Continue)
    }

    pub fn run<P: Platform>(
        &mut self,
        platform: &mut P,
        frame_sleep: Duration,
        mut next_dt: impl FnMut() -> f32,
    ) -> Result<()> {
        while !platform.should_close() {
            if self.step(platform, next_dt())? == FrameStatus::Exit {
                platform.request_close();
                break;
            }
            platform.sleep(frame_sleep);
        }
        Ok(())
    }
}

/// Spin the lander on `platform` with wall-clock frame timing
pub fn run_lander<P: Platform>(config: &GameConfig, platform: &mut P) -> Result<()> {
    log::info!(
        "lander starting ({}x{})",
        config.screen_width,
        config.screen_height
    );
    let mut demo = LanderDemo::new(config.screen_width, config.screen_height)?;
    let mut clock = Stopwatch::new();
    demo.run(
        platform,
        Duration::from_millis(config.frame_sleep_ms),
        || clock.step(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::HeadlessPlatform;
    use crate::sim::KeyEvent;

    #[test]
    fn test_rotates_each_frame() {
        let mut demo = LanderDemo::new(800, 600).unwrap();
        let mut platform = HeadlessPlatform::new().close_after(3).capture_frames();

        demo.run(&mut platform, Duration::from_millis(15), || 1.0).unwrap();

        assert!((demo.view().phase - 0.9).abs() < 1e-5);
        assert_eq!(platform.presents(), 3);
        let frames = platform.frames();
        assert_ne!(frames[0], frames[2]);
        assert!(frames[2].pixels().iter().any(|&p| p != 0));
    }

    #[test]
    fn test_escape_exits() {
        let mut demo = LanderDemo::new(320, 240).unwrap();
        let mut platform = HeadlessPlatform::with_script(vec![
            vec![],
            vec![KeyEvent::press(Key::Escape)],
        ]);

        demo.run(&mut platform, Duration::ZERO, || 0.1).unwrap();

        assert!(platform.should_close());
        assert_eq!(platform.presents(), 1);
    }
}
