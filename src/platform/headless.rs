//! Scripted platform for tests and batch runs

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use super::Platform;
use crate::renderer::Bitmap;
use crate::sim::KeyEvent;

/// Feeds one scripted batch of key events per frame and records what was
/// presented. Sleeping only accumulates time.
#[derive(Debug, Default)]
pub struct HeadlessPlatform {
    script: VecDeque<Vec<KeyEvent>>,
    close_after: Option<usize>,
    capture: bool,
    frames: Vec<Bitmap>,
    presents: usize,
    slept: Duration,
    closed: bool,
}

impl HeadlessPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// One entry per frame; frames past the end of the script see no input
    pub fn with_script(script: Vec<Vec<KeyEvent>>) -> Self {
        Self {
            script: script.into(),
            ..Self::default()
        }
    }

    /// Close after `frames` presents
    pub fn close_after(mut self, frames: usize) -> Self {
        self.close_after = Some(frames);
        self
    }

    /// Keep a copy of every presented frame
    pub fn capture_frames(mut self) -> Self {
        self.capture = true;
        self
    }

    pub fn presents(&self) -> usize {
        self.presents
    }

    pub fn frames(&self) -> &[Bitmap] {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&Bitmap> {
        self.frames.last()
    }

    pub fn slept(&self) -> Duration {
        self.slept
    }
}

impl Platform for HeadlessPlatform {
    fn poll_events(&mut self) -> io::Result<Vec<KeyEvent>> {
        Ok(self.script.pop_front().unwrap_or_default())
    }

    fn present(&mut self, frame: &Bitmap) -> io::Result<()> {
        self.presents += 1;
        if self.capture {
            self.frames.push(frame.clone());
        }
        if self.close_after.is_some_and(|n| self.presents >= n) {
            self.closed = true;
        }
        Ok(())
    }

    fn should_close(&self) -> bool {
        self.closed
    }

    fn request_close(&mut self) {
        self.closed = true;
    }

    fn sleep(&mut self, duration: Duration) {
        self.slept += duration;
    }
}
