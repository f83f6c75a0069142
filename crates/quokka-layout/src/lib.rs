//! Layout engine and paint phase for the Quokka renderer.
//!
//! This crate turns a styled node tree ([`quokka_dom::StyledTree`]) plus a
//! viewport width into a tree of positioned boxes, then flattens that box
//! tree into an ordered display list of drawing commands.
//!
//! # Scope
//!
//! This crate implements:
//!
//! - **Style value interpretation** — colors (hex and named), font weight
//!   and slant, pixel font sizes, with safe defaulting for values the
//!   engine cannot interpret.
//! - **Font metrics seam** — the [`FontSource`]/[`FontHandle`] traits the
//!   embedder implements, and the memoizing [`FontCache`] the engine reads
//!   through. [`ApproximateFontSource`] provides deterministic fixed-ratio
//!   metrics for tests and as a last-resort fallback.
//! - **Layout** ([CSS 2.1 Visual Formatting Model](https://www.w3.org/TR/CSS2/visuren.html))
//!   — recursive block stacking and inline word-level line breaking over an
//!   arena box tree.
//! - **Paint** ([CSS 2.1 Appendix E](https://www.w3.org/TR/CSS2/zindex.html))
//!   — display list generation in painting order (back to front).
//!
//! # Not implemented
//!
//! Floats, positioned layout, tables, flexbox/grid, bidirectional text,
//! hyphenation, and incremental relayout. Every pass recomputes the full
//! box tree from the styled tree and the current viewport width.

/// Document-level layout driver owning the per-engine font cache.
pub mod engine;
/// Font metrics seam and memoizing font cache.
pub mod fonts;
/// Box tree construction and the block/inline layout algorithms.
pub mod layout;
/// Display list and painting per [CSS 2.1 Appendix E](https://www.w3.org/TR/CSS2/zindex.html).
pub mod paint;
/// Resolved style value interpretation.
pub mod style;

// Re-exports for convenience
pub use engine::LayoutEngine;
pub use fonts::{
    ApproximateFontSource, FontCache, FontHandle, FontKey, FontSlant, FontSource, FontWeight,
    VerticalMetrics,
};
pub use layout::{
    BoxId, H_MARGIN, LayoutBox, LayoutMode, LayoutTree, LineBuilder, PlacedRun, Rect, V_MARGIN,
    is_block_level,
};
pub use paint::{DisplayCommand, DisplayList, Painter};
pub use style::{ColorValue, DEFAULT_FONT_SIZE_PX, Style};
