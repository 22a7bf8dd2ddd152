//! Digit glyph atlas
//!
//! Ten 5x7 digits rasterized once from bit-packed row masks into a single
//! 50x7 strip. Bit 4 of a row is the glyph's leftmost column.

use super::surface::{Bitmap, PixelFormat, Rect};
use crate::consts::{GLYPH_COUNT, GLYPH_H, GLYPH_W};
use crate::error::Result;

/// Row masks for digits 0-9, top row first
#[rustfmt::skip]
pub const DIGIT_ROWS: [[u8; GLYPH_H as usize]; GLYPH_COUNT as usize] = [
    [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E], // 0
    [0x0C, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E], // 1
    [0x0E, 0x11, 0x02, 0x04, 0x08, 0x10, 0x1F], // 2
    [0x0E, 0x11, 0x01, 0x0E, 0x01, 0x11, 0x0E], // 3
    [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02], // 4
    [0x1F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E], // 5
    [0x0E, 0x11, 0x10, 0x1E, 0x11, 0x11, 0x0E], // 6
    [0x1F, 0x01, 0x01, 0x02, 0x04, 0x04, 0x04], // 7
    [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E], // 8
    [0x0E, 0x11, 0x11, 0x0E, 0x01, 0x11, 0x0E], // 9
];

/// Immutable strip of rasterized digits
#[derive(Debug, Clone)]
pub struct GlyphAtlas {
    bitmap: Bitmap,
}

impl GlyphAtlas {
    /// Rasterize all digits in white on a cleared background
    pub fn new(format: PixelFormat) -> Result<Self> {
        let mut bitmap = Bitmap::new(GLYPH_W * GLYPH_COUNT, GLYPH_H, format)?;
        let color = bitmap.pixel_value(0xFF, 0xFF, 0xFF);

        for (digit, rows) in DIGIT_ROWS.iter().enumerate() {
            for (row, &mask) in rows.iter().enumerate() {
                for column in 0..GLYPH_W {
                    if (mask >> column) & 0x01 != 0 {
                        bitmap.put_pixel(
                            (digit as u32 * GLYPH_W + (GLYPH_W - 1 - column)) as i32,
                            row as i32,
                            color,
                        );
                    }
                }
            }
        }

        log::debug!("glyph atlas built ({}x{})", bitmap.width(), bitmap.height());
        Ok(Self { bitmap })
    }

    /// Source rectangle of `digit` inside the atlas (digits above 9 wrap)
    pub fn glyph_rect(&self, digit: u8) -> Rect {
        let digit = (digit as u32) % GLYPH_COUNT;
        Rect::new((digit * GLYPH_W) as i32, 0, GLYPH_W, GLYPH_H)
    }

    pub fn bitmap(&self) -> &Bitmap {
        &self.bitmap
    }
}
