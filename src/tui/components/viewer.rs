//! # Viewer Component
//!
//! Renders a preloaded image as a half-block mosaic: each terminal cell
//! shows two vertically stacked pixels via `▀` with independent
//! foreground (top) and background (bottom) colors. Terminal cells are
//! roughly twice as tall as wide, so the 1x2 pixel packing keeps the
//! image aspect ratio close to correct.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::widgets::Block;

use crate::generate::{PreparedImage, Preview};
use crate::tui::component::Component;

const HALF_BLOCK: &str = "▀";

pub struct Viewer<'a> {
    pub image: &'a PreparedImage,
}

impl<'a> Viewer<'a> {
    pub fn new(image: &'a PreparedImage) -> Self {
        Self { image }
    }
}

/// Largest cell grid (cols, rows) that fits `inner` while preserving the
/// pixel aspect ratio, given that one cell row covers two pixel rows.
fn fit_cell_grid(pixel_w: u32, pixel_h: u32, inner: Rect) -> (u16, u16) {
    if pixel_w == 0 || pixel_h == 0 || inner.width == 0 || inner.height == 0 {
        return (0, 0);
    }
    let scale_x = f64::from(inner.width) / f64::from(pixel_w);
    let scale_y = f64::from(inner.height) * 2.0 / f64::from(pixel_h);
    let scale = scale_x.min(scale_y);

    let cols = ((f64::from(pixel_w) * scale).round() as u16).clamp(1, inner.width);
    let rows = ((f64::from(pixel_h) * scale / 2.0).round() as u16).clamp(1, inner.height);
    (cols, rows)
}

/// Nearest-neighbor sample: maps grid position (gx, gy) on a
/// `grid_w` x `grid_h` pixel grid back onto the preview.
fn sample(preview: &Preview, gx: u16, gy: u16, grid_w: u16, grid_h: u16) -> (u8, u8, u8) {
    let px = u32::from(gx) * preview.width() / u32::from(grid_w.max(1));
    let py = u32::from(gy) * preview.height() / u32::from(grid_h.max(1));
    preview.pixel(px, py)
}

/// Shortens the URL from the left so the interesting tail (filename) stays.
fn title_for(url: &str, width: u16) -> String {
    let budget = width.saturating_sub(4) as usize;
    if url.len() <= budget {
        return url.to_string();
    }
    let tail: String = url
        .chars()
        .rev()
        .take(budget.saturating_sub(1))
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("…{tail}")
}

impl Component for Viewer<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered().title(title_for(&self.image.url, area.width));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let preview = &self.image.preview;
        let (cols, rows) = fit_cell_grid(preview.width(), preview.height(), inner);
        if cols == 0 || rows == 0 {
            return;
        }

        let x0 = inner.x + (inner.width - cols) / 2;
        let y0 = inner.y + (inner.height - rows) / 2;
        let buf = frame.buffer_mut();

        for cy in 0..rows {
            for cx in 0..cols {
                let (tr, tg, tb) = sample(preview, cx, cy * 2, cols, rows * 2);
                let (br, bg, bb) = sample(preview, cx, cy * 2 + 1, cols, rows * 2);
                if let Some(cell) = buf.cell_mut((x0 + cx, y0 + cy)) {
                    cell.set_symbol(HALF_BLOCK);
                    cell.set_fg(Color::Rgb(tr, tg, tb));
                    cell.set_bg(Color::Rgb(br, bg, bb));
                }
            }
        }
    }
}
