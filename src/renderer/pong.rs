//! Pong frame rendering
//!
//! Pure function of `GameState`: clear, dashed center line, scores, then
//! ball and paddles unless the match is over.

use super::glyphs::GlyphAtlas;
use super::surface::{Bitmap, PixelFormat, Rect};
use crate::config::GameConfig;
use crate::consts::{GLYPH_H, GLYPH_W};
use crate::error::Result;
use crate::sim::{GameState, Side};

/// Dash layout of the center line, derived from the screen size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CenterLine {
    pub screen_width: u32,
    pub screen_height: u32,
    pub x: u32,
    pub thickness: u32,
    pub dash: u32,
    pub gap: u32,
    pub count: u32,
    /// Empty space above the first dash
    pub leading: u32,
}

impl CenterLine {
    pub fn for_screen(screen_width: u32, screen_height: u32) -> Self {
        let block = screen_height / 12;
        let dash = block * 2 / 3;
        let gap = block / 3;
        let thickness = screen_width / 400 + 1;
        let period = dash + gap;
        let count = if period == 0 {
            0
        } else {
            (screen_height + gap) / period
        };
        let pattern = Self::pattern_for(count, dash, gap);

        Self {
            screen_width,
            screen_height,
            x: screen_width.saturating_sub(thickness) / 2,
            thickness,
            dash,
            gap,
            count,
            leading: (screen_height - pattern) / 2,
        }
    }

    fn pattern_for(count: u32, dash: u32, gap: u32) -> u32 {
        if count == 0 {
            0
        } else {
            count * dash + (count - 1) * gap
        }
    }

    /// Height from the top of the first dash to the bottom of the last
    pub fn pattern_len(&self) -> u32 {
        Self::pattern_for(self.count, self.dash, self.gap)
    }

    /// Empty space below the last dash
    pub fn trailing(&self) -> u32 {
        self.screen_height - self.pattern_len() - self.leading
    }

    pub fn dashes(&self) -> impl Iterator<Item = Rect> + '_ {
        let period = self.dash + self.gap;
        (0..self.count).map(move |i| {
            Rect::new(
                self.x as i32,
                (self.leading + i * period) as i32,
                self.thickness,
                self.dash,
            )
        })
    }
}

/// Decimal digits of `value`, most significant first
pub fn score_digits(value: u16) -> Vec<u8> {
    let mut digits = Vec::with_capacity(5);
    let mut rest = value;
    loop {
        digits.push((rest % 10) as u8);
        rest /= 10;
        if rest == 0 {
            break;
        }
    }
    digits.reverse();
    digits
}

/// Screen rectangles for each digit cell of `value`, centered on `anchor_x`
pub fn score_cells(value: u16, anchor_x: i32, top: i32, scale: u32, spacing: u32) -> Vec<(u8, Rect)> {
    let digits = score_digits(value);
    let cell_w = GLYPH_W * scale;
    let cell_h = GLYPH_H * scale;
    let n = digits.len() as u32;
    let total = n * cell_w + (n - 1) * spacing;
    let start = anchor_x - (total / 2) as i32;

    digits
        .into_iter()
        .enumerate()
        .map(|(i, digit)| {
            let x = start + (i as u32 * (cell_w + spacing)) as i32;
            (digit, Rect::new(x, top, cell_w, cell_h))
        })
        .collect()
}

/// Draws Pong frames into a bitmap
#[derive(Debug, Clone)]
pub struct PongRenderer {
    atlas: GlyphAtlas,
    center_line: CenterLine,
    glyph_scale: u32,
    glyph_spacing: u32,
}

impl PongRenderer {
    pub fn new(config: &GameConfig, format: PixelFormat) -> Result<Self> {
        Ok(Self {
            atlas: GlyphAtlas::new(format)?,
            center_line: CenterLine::for_screen(config.screen_width, config.screen_height),
            glyph_scale: config.glyph_scale,
            glyph_spacing: config.glyph_spacing,
        })
    }

    pub fn center_line(&self) -> &CenterLine {
        &self.center_line
    }

    /// Render one frame of `state` into `target`
    pub fn render(&mut self, state: &GameState, target: &mut Bitmap) {
        if self.center_line.screen_width != target.width()
            || self.center_line.screen_height != target.height()
        {
            self.center_line = CenterLine::for_screen(target.width(), target.height());
        }

        let white = target.pixel_value(0xFF, 0xFF, 0xFF);
        target.clear();

        for dash in self.center_line.dashes() {
            target.fill_rect(&dash, white);
        }

        self.draw_scores(state, target);

        if state.match_state.game_over {
            return;
        }

        let config = &state.config;
        let size = config.ball_size as u32;
        let ball = Rect::centered(state.ball.position.x, state.ball.position.y, size, size);
        target.fill_rect(&ball, white);

        for side in Side::ALL {
            let left_edge = match side {
                Side::Left => config.left_paddle_x(),
                Side::Right => config.right_paddle_x(),
            };
            let rect = Rect::new(
                left_edge as i32,
                (state.paddle(side).position_y - config.paddle_length / 2.0) as i32,
                config.paddle_width as u32,
                config.paddle_length as u32,
            );
            target.fill_rect(&rect, white);
        }
    }

    fn draw_scores(&self, state: &GameState, target: &mut Bitmap) {
        let width = target.width() as i32;
        let top = self.glyph_spacing as i32;

        for side in Side::ALL {
            let anchor_x = match side {
                Side::Left => width / 4,
                Side::Right => width / 4 * 3,
            };
            let cells = score_cells(
                state.paddle(side).score,
                anchor_x,
                top,
                self.glyph_scale,
                self.glyph_spacing,
            );
            for (digit, dest) in cells {
                target.blit_stretched(
                    self.atlas.bitmap(),
                    Some(self.atlas.glyph_rect(digit)),
                    Some(dest),
                );
            }
        }
    }
}
