//! Half-block image widget
//!
//! Each terminal cell shows two vertically stacked pixels: the upper one as
//! the foreground of `▀` and the lower one as the background. The asset is
//! resampled (nearest neighbour) to fit the area and centred in it.

use image::Rgba;
use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

use crate::asset::Asset;

const UPPER_HALF_BLOCK: &str = "\u{2580}";

/// Largest size with the aspect ratio of `src` that fits in `max`.
///
/// Never returns a zero dimension when `max` is non-zero.
pub fn fit_within(src: (u32, u32), max: (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = src;
    let (max_w, max_h) = max;
    if src_w == 0 || src_h == 0 || max_w == 0 || max_h == 0 {
        return (0, 0);
    }
    let scale = f64::min(max_w as f64 / src_w as f64, max_h as f64 / src_h as f64);
    let w = ((src_w as f64 * scale).round() as u32).clamp(1, max_w);
    let h = ((src_h as f64 * scale).round() as u32).clamp(1, max_h);
    (w, h)
}

/// Renders an [`Asset`] with half-block characters.
pub struct AssetView<'a> {
    asset: &'a Asset,
    backdrop: Color,
}

impl<'a> AssetView<'a> {
    pub fn new(asset: &'a Asset) -> Self {
        Self {
            asset,
            backdrop: Color::Reset,
        }
    }

    /// Colour used below the last pixel row when the height is odd.
    pub fn backdrop(mut self, color: Color) -> Self {
        self.backdrop = color;
        self
    }

    fn sample(&self, x: u32, y: u32, size: (u32, u32)) -> Color {
        let pixels = self.asset.pixels();
        let sx = (x as u64 * pixels.width() as u64 / size.0 as u64) as u32;
        let sy = (y as u64 * pixels.height() as u64 / size.1 as u64) as u32;
        let Rgba([r, g, b, _]) = *pixels.get_pixel(sx, sy);
        Color::Rgb(r, g, b)
    }
}

impl Widget for AssetView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let size = fit_within(
            (self.asset.width(), self.asset.height()),
            (area.width as u32, area.height as u32 * 2),
        );
        if size.0 == 0 || size.1 == 0 {
            return;
        }

        let cols = size.0 as u16;
        let rows = size.1.div_ceil(2) as u16;
        let left = area.x + (area.width - cols) / 2;
        let top = area.y + (area.height - rows) / 2;

        for row in 0..rows {
            let upper_y = row as u32 * 2;
            let lower_y = upper_y + 1;
            for col in 0..cols {
                let upper = self.sample(col as u32, upper_y, size);
                let lower = if lower_y < size.1 {
                    self.sample(col as u32, lower_y, size)
                } else {
                    self.backdrop
                };
                if let Some(cell) = buf.cell_mut((left + col, top + row)) {
                    cell.set_symbol(UPPER_HALF_BLOCK).set_fg(upper).set_bg(lower);
                }
            }
        }
    }
}
