//! Software renderer for headless screenshot generation.
//!
//! Executes a `DisplayList` to a pixel buffer using fontdue for text
//! rasterization.
//!
//! # Architecture
//!
//! The renderer is the final stage in the pipeline:
//!
//! ```text
//! Layout → Paint → Render
//!            ↓        ↓
//!      DisplayList → Pixels
//! ```
//!
//! The renderer knows nothing about styles, layout, or the styled tree.
//! It executes drawing commands in sequence order, applying the viewer's
//! scroll offset and skipping commands whose vertical extent falls
//! entirely outside the visible window.

use anyhow::Result;
use image::{ImageBuffer, Rgba, RgbaImage};
use quokka_layout::{ColorValue, DisplayCommand, DisplayList, FontKey};
use std::path::Path;

use crate::font_source::SystemFontSource;

/// Software renderer that executes a display list to a pixel buffer.
pub struct Renderer {
    /// RGBA pixel buffer
    buffer: RgbaImage,
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Loaded system faces, shared with the layout engine's font source.
    fonts: SystemFontSource,
}

impl Renderer {
    /// Create a renderer with the given viewport dimensions, drawing on a
    /// white background.
    #[must_use]
    pub fn new(width: u32, height: u32, fonts: SystemFontSource) -> Self {
        let buffer = ImageBuffer::from_pixel(width, height, Rgba([255, 255, 255, 255]));
        Self {
            buffer,
            width,
            height,
            fonts,
        }
    }

    /// Execute a display list at the given scroll offset.
    ///
    /// Commands run in order (back to front, as produced by the painter).
    /// A command is skipped when its `[top, bottom]` interval does not
    /// intersect the visible range `[scroll, scroll + height]`.
    pub fn render(&mut self, display_list: &DisplayList, scroll: f32) {
        let window_bottom = scroll + self.height as f32;
        for command in display_list.commands() {
            let (top, bottom) = match command {
                DisplayCommand::FillRect { y0, y1, .. } => (*y0, *y1),
                DisplayCommand::DrawText { top, bottom, .. } => (*top, *bottom),
            };
            if top > window_bottom || bottom < scroll {
                continue;
            }
            self.execute_command(command, scroll);
        }
    }

    /// Execute a single display command, offset by the scroll position.
    fn execute_command(&mut self, command: &DisplayCommand, scroll: f32) {
        match command {
            DisplayCommand::FillRect { x0, y0, x1, y1, color } => {
                self.fill_rect(*x0, *y0 - scroll, *x1, *y1 - scroll, color);
            }
            DisplayCommand::DrawText {
                x, y, text, font, color, ..
            } => {
                self.draw_text(text, *x, *y - scroll, *font, color);
            }
        }
    }

    /// Fill the rectangle between two corners with the given color.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_possible_wrap
    )]
    fn fill_rect(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: &ColorValue) {
        if color.is_transparent() {
            return;
        }
        let rgba = Rgba([color.r, color.g, color.b, color.a]);

        // Clamp to the buffer before iterating.
        let left = x0.max(0.0) as u32;
        let top = y0.max(0.0) as u32;
        let right = (x1.max(0.0) as u32).min(self.width);
        let bottom = (y1.max(0.0) as u32).min(self.height);

        for py in top..bottom {
            for px in left..right {
                if color.a == 255 {
                    self.buffer.put_pixel(px, py, rgba);
                } else {
                    let bg = *self.buffer.get_pixel(px, py);
                    self.buffer.put_pixel(px, py, alpha_blend(rgba, bg, color.a));
                }
            }
        }
    }

    /// Draw one word at the given position.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_possible_wrap
    )]
    fn draw_text(&mut self, text: &str, x: f32, y: f32, key: FontKey, color: &ColorValue) {
        let font = std::rc::Rc::clone(self.fonts.select(key.weight, key.slant));
        let px_size = key.px();
        let rgba = Rgba([color.r, color.g, color.b, color.a]);

        let mut cursor_x = x;
        for ch in text.chars() {
            if ch.is_control() {
                continue;
            }

            // Rasterize the character
            let (metrics, bitmap) = font.rasterize(ch, px_size);

            // Calculate position (fontdue gives us the bitmap offset)
            let glyph_x = cursor_x as i32 + metrics.xmin;
            let glyph_y = y as i32 + (px_size as i32 - metrics.ymin - metrics.height as i32);

            // Draw the glyph
            for gy in 0..metrics.height {
                for gx in 0..metrics.width {
                    let alpha = bitmap[gy * metrics.width + gx];
                    if alpha == 0 {
                        continue;
                    }
                    let px = glyph_x + gx as i32;
                    let py = glyph_y + gy as i32;

                    if px >= 0 && py >= 0 && (px as u32) < self.width && (py as u32) < self.height
                    {
                        // Alpha blend the glyph onto the background
                        let bg = *self.buffer.get_pixel(px as u32, py as u32);
                        let blended = alpha_blend(rgba, bg, alpha);
                        self.buffer.put_pixel(px as u32, py as u32, blended);
                    }
                }
            }

            // Advance cursor
            cursor_x += metrics.advance_width;
        }
    }

    /// Consume the renderer and return the pixel buffer.
    #[must_use]
    pub fn into_image(self) -> RgbaImage {
        self.buffer
    }

    /// Save the rendered image to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be saved to the given path.
    pub fn save(&self, path: &Path) -> Result<()> {
        self.buffer.save(path).map_err(|e| {
            anyhow::anyhow!("failed to save screenshot to '{}': {e}", path.display())
        })?;
        Ok(())
    }
}

/// Alpha blend a foreground color onto a background color.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn alpha_blend(fg: Rgba<u8>, bg: Rgba<u8>, alpha: u8) -> Rgba<u8> {
    let a = f32::from(alpha) / 255.0;
    let inv_a = 1.0 - a;

    Rgba([
        f32::from(fg[0]).mul_add(a, f32::from(bg[0]) * inv_a) as u8,
        f32::from(fg[1]).mul_add(a, f32::from(bg[1]) * inv_a) as u8,
        f32::from(fg[2]).mul_add(a, f32::from(bg[2]) * inv_a) as u8,
        255,
    ])
}
