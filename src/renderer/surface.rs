//! Software bitmap surface and drawing primitives
//!
//! Pixels are stored as packed `u32` values in the bitmap's pixel format.
//! Every primitive clips against the bitmap bounds, so callers can pass
//! rectangles and lines that hang off the edge.

use crate::error::{Error, Result};

/// Packed pixel layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelFormat {
    /// 0x00RRGGBB
    #[default]
    Xrgb8888,
    /// 5-6-5 packed into the low 16 bits
    Rgb565,
}

impl PixelFormat {
    /// Pack an 8-bit color into this format
    pub fn pixel_value(&self, r: u8, g: u8, b: u8) -> u32 {
        match self {
            PixelFormat::Xrgb8888 => (r as u32) << 16 | (g as u32) << 8 | b as u32,
            PixelFormat::Rgb565 => {
                ((r as u32) >> 3) << 11 | ((g as u32) >> 2) << 5 | (b as u32) >> 3
            }
        }
    }

    /// Unpack to an 8-bit color
    pub fn to_rgb(&self, value: u32) -> (u8, u8, u8) {
        match self {
            PixelFormat::Xrgb8888 => ((value >> 16) as u8, (value >> 8) as u8, value as u8),
            PixelFormat::Rgb565 => {
                let r = ((value >> 11) & 0x1F) as u8;
                let g = ((value >> 5) & 0x3F) as u8;
                let b = (value & 0x1F) as u8;
                // Replicate high bits so full intensity maps back to 0xFF
                (r << 3 | r >> 2, g << 2 | g >> 4, b << 3 | b >> 2)
            }
        }
    }
}

/// Integer rectangle (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of size `w`x`h` centered on (cx, cy), rounding toward the top-left
    pub fn centered(cx: f32, cy: f32, w: u32, h: u32) -> Self {
        Self {
            x: (cx - w as f32 / 2.0).floor() as i32,
            y: (cy - h as f32 / 2.0).floor() as i32,
            w,
            h,
        }
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w as i32
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h as i32
    }
}

/// A CPU-side bitmap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    format: PixelFormat,
    pixels: Vec<u32>,
}

impl Bitmap {
    /// Allocate a zeroed bitmap
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Result<Self> {
        let len = (width as usize)
            .checked_mul(height as usize)
            .ok_or(Error::Allocation { width, height })?;
        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|_| Error::Allocation { width, height })?;
        pixels.resize(len, 0);
        Ok(Self {
            width,
            height,
            format,
            pixels,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Whole-bitmap rectangle
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    /// Pack a color in this bitmap's format
    pub fn pixel_value(&self, r: u8, g: u8, b: u8) -> u32 {
        self.format.pixel_value(r, g, b)
    }

    #[inline]
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Reset every pixel to 0
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    /// Set one pixel; out-of-bounds writes are dropped
    pub fn put_pixel(&mut self, x: i32, y: i32, value: u32) {
        if self.in_bounds(x, y) {
            let idx = self.index(x as u32, y as u32);
            self.pixels[idx] = value;
        }
    }

    /// Read one pixel
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        (x < self.width && y < self.height).then(|| self.pixels[self.index(x, y)])
    }

    /// Raw row-major pixel storage
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Fill a rectangle, clipped to the bitmap
    pub fn fill_rect(&mut self, rect: &Rect, value: u32) {
        let x0 = rect.x.max(0);
        let y0 = rect.y.max(0);
        let x1 = rect.right().min(self.width as i32);
        let y1 = rect.bottom().min(self.height as i32);
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        for y in y0..y1 {
            let start = self.index(x0 as u32, y as u32);
            let end = start + (x1 - x0) as usize;
            self.pixels[start..end].fill(value);
        }
    }

    /// Bresenham line, both endpoints included
    pub fn draw_line(&mut self, mut x0: i32, mut y0: i32, x1: i32, y1: i32, value: u32) {
        let dx = (x1 - x0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let dy = -(y1 - y0).abs();
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut error = dx + dy;

        loop {
            self.put_pixel(x0, y0, value);
            if x0 == x1 && y0 == y1 {
                break;
            }

            let error2 = error.saturating_mul(2);
            if error2 >= dy {
                error = error.saturating_add(dy);
                x0 = x0.saturating_add(sx);
            }
            if error2 <= dx {
                error = error.saturating_add(dx);
                y0 = y0.saturating_add(sy);
            }
        }
    }

    /// Nearest-neighbour copy of `src_rect` of `src` into `dst_rect` of `self`.
    ///
    /// `None` means the whole bitmap on either side. Source pixels are
    /// converted when the formats differ.
    pub fn blit_stretched(&mut self, src: &Bitmap, src_rect: Option<Rect>, dst_rect: Option<Rect>) {
        let src_rect = src_rect.unwrap_or_else(|| src.bounds());
        let dst_rect = dst_rect.unwrap_or_else(|| self.bounds());
        if src_rect.w == 0 || src_rect.h == 0 || dst_rect.w == 0 || dst_rect.h == 0 {
            return;
        }

        let x0 = dst_rect.x.max(0);
        let y0 = dst_rect.y.max(0);
        let x1 = dst_rect.right().min(self.width as i32);
        let y1 = dst_rect.bottom().min(self.height as i32);
        let same_format = src.format == self.format;

        for y in y0..y1 {
            let v = (y - dst_rect.y) as u64 * src_rect.h as u64 / dst_rect.h as u64;
            let sy = src_rect.y + v as i32;
            for x in x0..x1 {
                let u = (x - dst_rect.x) as u64 * src_rect.w as u64 / dst_rect.w as u64;
                let sx = src_rect.x + u as i32;
                if !src.in_bounds(sx, sy) {
                    continue;
                }
                let value = src.pixels[src.index(sx as u32, sy as u32)];
                let value = if same_format {
                    value
                } else {
                    let (r, g, b) = src.format.to_rgb(value);
                    self.format.pixel_value(r, g, b)
                };
                let idx = self.index(x as u32, y as u32);
                self.pixels[idx] = value;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(bitmap: &Bitmap) -> usize {
        bitmap.pixels().iter().filter(|&&p| p != 0).count()
    }

    #[test]
    fn test_centered_rounds_toward_top_left() {
        assert_eq!(Rect::centered(400.0, 300.0, 16, 16), Rect::new(392, 292, 16, 16));
        // Partly off the top-left edge: -11.5 must land on -12, not -11
        assert_eq!(Rect::centered(-3.5, -3.5, 16, 16), Rect::new(-12, -12, 16, 16));
        assert_eq!(Rect::centered(3.5, 3.5, 16, 16), Rect::new(-5, -5, 16, 16));
    }

    #[test]
    fn test_pixel_formats() {
        let white = PixelFormat::Xrgb8888.pixel_value(0xFF, 0xFF, 0xFF);
        assert_eq!(white, 0x00FF_FFFF);
        assert_eq!(PixelFormat::Xrgb8888.to_rgb(0x0012_3456), (0x12, 0x34, 0x56));

        let white = PixelFormat::Rgb565.pixel_value(0xFF, 0xFF, 0xFF);
        assert_eq!(white, 0xFFFF);
        assert_eq!(PixelFormat::Rgb565.to_rgb(white), (0xFF, 0xFF, 0xFF));
        assert_eq!(PixelFormat::Rgb565.pixel_value(0, 0xFF, 0), 0x07E0);
    }

    #[test]
    fn test_new_is_zeroed() {
        let bitmap = Bitmap::new(4, 3, PixelFormat::Xrgb8888).unwrap();
        assert_eq!(bitmap.pixels().len(), 12);
        assert_eq!(lit(&bitmap), 0);
        assert_eq!(bitmap.pixel(4, 0), None);
    }

    #[test]
    fn test_allocation_overflow_is_error() {
        let result = Bitmap::new(u32::MAX, u32::MAX, PixelFormat::Xrgb8888);
        assert!(matches!(result, Err(Error::Allocation { .. })));
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut bitmap = Bitmap::new(10, 10, PixelFormat::Xrgb8888).unwrap();
        bitmap.fill_rect(&Rect::new(-2, -2, 4, 4), 1);
        assert_eq!(lit(&bitmap), 4);
        bitmap.fill_rect(&Rect::new(8, 8, 10, 10), 1);
        assert_eq!(lit(&bitmap), 8);
        bitmap.fill_rect(&Rect::new(20, 20, 5, 5), 1);
        assert_eq!(lit(&bitmap), 8);
    }

    #[test]
    fn test_clear() {
        let mut bitmap = Bitmap::new(5, 5, PixelFormat::Xrgb8888).unwrap();
        bitmap.fill_rect(&bitmap.bounds(), 7);
        bitmap.clear();
        assert_eq!(lit(&bitmap), 0);
    }

    #[test]
    fn test_line_endpoints_and_length() {
        let mut bitmap = Bitmap::new(20, 20, PixelFormat::Xrgb8888).unwrap();
        bitmap.draw_line(2, 3, 12, 3, 1);
        assert_eq!(lit(&bitmap), 11);

        bitmap.clear();
        bitmap.draw_line(15, 15, 5, 5, 1);
        assert_eq!(lit(&bitmap), 11);
        assert_eq!(bitmap.pixel(15, 15), Some(1));
        assert_eq!(bitmap.pixel(5, 5), Some(1));
        assert_eq!(bitmap.pixel(10, 10), Some(1));
    }

    #[test]
    fn test_line_clipped_off_screen() {
        let mut bitmap = Bitmap::new(4, 4, PixelFormat::Xrgb8888).unwrap();
        bitmap.draw_line(-10, 1, 10, 1, 1);
        assert_eq!(lit(&bitmap), 4);
    }

    #[test]
    fn test_blit_stretched_scales() {
        let mut src = Bitmap::new(2, 1, PixelFormat::Xrgb8888).unwrap();
        src.put_pixel(1, 0, 9);
        let mut dst = Bitmap::new(10, 10, PixelFormat::Xrgb8888).unwrap();
        dst.blit_stretched(&src, None, Some(Rect::new(0, 0, 4, 2)));
        // Right half of the 4x2 target comes from the lit source pixel
        assert_eq!(lit(&dst), 4);
        assert_eq!(dst.pixel(2, 0), Some(9));
        assert_eq!(dst.pixel(1, 1), Some(0));
    }

    #[test]
    fn test_blit_converts_format() {
        let mut src = Bitmap::new(1, 1, PixelFormat::Xrgb8888).unwrap();
        src.put_pixel(0, 0, src.pixel_value(0xFF, 0xFF, 0xFF));
        let mut dst = Bitmap::new(1, 1, PixelFormat::Rgb565).unwrap();
        dst.blit_stretched(&src, None, None);
        assert_eq!(dst.pixel(0, 0), Some(0xFFFF));
    }
}
