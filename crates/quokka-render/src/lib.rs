//! System fonts and headless rendering for the Quokka engine.
//!
//! # Scope
//!
//! This crate provides the embedder half of the engine's external
//! interfaces:
//!
//! - **Font metrics** - a fontdue-backed [`SystemFontSource`] implementing
//!   the engine's font seam with real system font files
//! - **Software rendering** - a headless [`Renderer`] that executes a
//!   display list to an RGBA image, applying scroll and visibility culling
//! - **Pipeline helper** - [`render_document`], layout → paint → render in
//!   one call
//!
//! # Not implemented
//!
//! Windowing, event handling, and scrollbars — this crate renders frames;
//! an interactive shell would drive it per scroll/resize event.

pub mod font_source;
pub mod renderer;

pub use font_source::{FontLoadError, SystemFontSource};
pub use renderer::Renderer;

use anyhow::{Context, Result};
use image::RgbaImage;
use quokka_dom::StyledTree;
use quokka_layout::LayoutEngine;

/// Lay out, paint, and render a styled tree in one pass.
///
/// The same loaded system faces back both measurement and rasterization,
/// so the glyphs drawn are exactly the glyphs the line breaker measured.
///
/// # Errors
///
/// Fails when no usable system font can be loaded.
pub fn render_document(
    styled: &StyledTree,
    viewport_width: u32,
    viewport_height: u32,
    scroll: f32,
) -> Result<RgbaImage> {
    let fonts = SystemFontSource::load_default().context("loading system fonts")?;
    let engine = LayoutEngine::new(Box::new(fonts.clone()));

    let display_list = engine.display_list(styled, viewport_width as f32);

    let mut renderer = Renderer::new(viewport_width, viewport_height, fonts);
    renderer.render(&display_list, scroll);
    Ok(renderer.into_image())
}
