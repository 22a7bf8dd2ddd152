//! Terminal presenter
//!
//! Frames are scaled to the terminal and drawn with upper-half blocks: each
//! cell shows two vertical pixels (foreground on top, background below).
//! Key releases come from the keyboard enhancement protocol when the
//! terminal supports it; otherwise a held key is released once its
//! autorepeat stops arriving.

use std::collections::HashMap;
use std::io::{self, Stdout, Write, stdout};
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute, queue,
    style::{self, Color},
    terminal,
};

use super::Platform;
use crate::error::{Error, Result};
use crate::renderer::{Bitmap, PixelFormat};
use crate::sim::{Key, KeyAction, KeyEvent};

/// Longer than the usual initial autorepeat delay
const HOLD_TIMEOUT: Duration = Duration::from_millis(600);

pub struct TerminalPlatform {
    out: Stdout,
    canvas: Bitmap,
    reports_release: bool,
    held: HashMap<Key, Instant>,
    closed: bool,
}

impl TerminalPlatform {
    /// Enter raw mode and the alternate screen; restored on drop
    pub fn open() -> Result<Self> {
        let (cols, rows) = terminal::size().unwrap_or((80, 24));
        let canvas = Bitmap::new(cols as u32, rows as u32 * 2, PixelFormat::Xrgb8888)?;

        terminal::enable_raw_mode().map_err(|err| Error::Window(err.to_string()))?;
        // From here on Drop restores the terminal
        let mut platform = Self {
            out: stdout(),
            canvas,
            reports_release: false,
            held: HashMap::new(),
            closed: false,
        };

        execute!(
            platform.out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap,
        )
        .map_err(|err| Error::Window(err.to_string()))?;

        if terminal::supports_keyboard_enhancement().unwrap_or(false) {
            execute!(
                platform.out,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )
            .map_err(|err| Error::Window(err.to_string()))?;
            platform.reports_release = true;
        }

        log::info!(
            "terminal opened ({cols}x{rows}, key releases {})",
            if platform.reports_release {
                "reported"
            } else {
                "synthesized"
            }
        );
        Ok(platform)
    }

    fn resize(&mut self, cols: u16, rows: u16) -> io::Result<()> {
        self.canvas =
            Bitmap::new(cols as u32, rows as u32 * 2, PixelFormat::Xrgb8888).map_err(io::Error::other)?;
        execute!(self.out, terminal::Clear(terminal::ClearType::All))
    }

    fn translate(&mut self, key: event::KeyEvent, events: &mut Vec<KeyEvent>) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.request_close();
            return;
        }

        let mapped = match key.code {
            KeyCode::Char(c) => Key::Char(c.to_ascii_lowercase()),
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Esc => Key::Escape,
            _ => return,
        };

        let now = Instant::now();
        let action = match key.kind {
            KeyEventKind::Release => {
                self.held.remove(&mapped);
                KeyAction::Release
            }
            KeyEventKind::Repeat => {
                self.held.insert(mapped, now);
                KeyAction::Repeat
            }
            KeyEventKind::Press => {
                if self.held.insert(mapped, now).is_some() && !self.reports_release {
                    // Autorepeat arrives as presses without the protocol
                    KeyAction::Repeat
                } else {
                    KeyAction::Press
                }
            }
        };
        events.push(KeyEvent::new(mapped, action));
    }

    fn expire_held(&mut self, events: &mut Vec<KeyEvent>) {
        let now = Instant::now();
        self.held.retain(|&key, last| {
            let alive = now.duration_since(*last) < HOLD_TIMEOUT;
            if !alive {
                events.push(KeyEvent::release(key));
            }
            alive
        });
    }

    fn draw_canvas(&mut self) -> io::Result<()> {
        let out = &mut self.out;
        let canvas = &self.canvas;
        let rows = canvas.height() / 2;
        queue!(out, cursor::MoveTo(0, 0))?;

        let rgb = |x: u32, y: u32| {
            let (r, g, b) = canvas.format().to_rgb(canvas.pixel(x, y).unwrap_or(0));
            Color::Rgb { r, g, b }
        };

        for row in 0..rows {
            let mut fg = None;
            let mut bg = None;
            for col in 0..canvas.width() {
                let top = rgb(col, row * 2);
                let bottom = rgb(col, row * 2 + 1);

                if top == bottom {
                    if bg != Some(top) {
                        queue!(out, style::SetBackgroundColor(top))?;
                        bg = Some(top);
                    }
                    queue!(out, style::Print(' '))?;
                } else {
                    if fg != Some(top) {
                        queue!(out, style::SetForegroundColor(top))?;
                        fg = Some(top);
                    }
                    if bg != Some(bottom) {
                        queue!(out, style::SetBackgroundColor(bottom))?;
                        bg = Some(bottom);
                    }
                    queue!(out, style::Print('\u{2580}'))?;
                }
            }
            queue!(out, style::ResetColor)?;
            if row + 1 < rows {
                queue!(out, style::Print("\r\n"))?;
            }
        }
        out.flush()
    }
}

impl Platform for TerminalPlatform {
    fn poll_events(&mut self) -> io::Result<Vec<KeyEvent>> {
        let mut events = Vec::new();
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => self.translate(key, &mut events),
                Event::Resize(cols, rows) => self.resize(cols, rows)?,
                _ => {}
            }
        }
        if !self.reports_release {
            self.expire_held(&mut events);
        }
        Ok(events)
    }

    fn present(&mut self, frame: &Bitmap) -> io::Result<()> {
        self.canvas.blit_stretched(frame, None, None);
        self.draw_canvas()
    }

    fn should_close(&self) -> bool {
        self.closed
    }

    fn request_close(&mut self) {
        self.closed = true;
    }
}

impl Drop for TerminalPlatform {
    fn drop(&mut self) {
        if self.reports_release {
            let _ = execute!(self.out, PopKeyboardEnhancementFlags);
        }
        let _ = execute!(
            self.out,
            style::ResetColor,
            terminal::LeaveAlternateScreen,
            cursor::Show,
            terminal::EnableLineWrap,
        );
        let _ = terminal::disable_raw_mode();
    }
}
