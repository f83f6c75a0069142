//! Layout: styled tree → positioned box tree.
//!
//! This module implements the visual formatting model for the engine: a
//! recursive pass over the styled tree that produces one positioned box
//! per node, stacking block-level boxes vertically and line-breaking
//! inline content within its containing box.
//!
//! # Relevant specifications
//!
//! - [CSS 2.1 Visual Formatting Model](https://www.w3.org/TR/CSS2/visuren.html)
//! - [CSS Display Module Level 3](https://www.w3.org/TR/css-display-3/)
//! - [CSS Text Module Level 3](https://www.w3.org/TR/css-text-3/)
//!
//! # Module structure
//!
//! - [`box_model`] - box geometry types
//! - [`layout_box`] - the arena box tree and the block/inline algorithms
//! - [`inline`] - line builder: word placement, line breaking, baselines

pub mod box_model;
pub mod inline;
pub mod layout_box;

// Re-exports for convenience
pub use box_model::Rect;
pub use inline::{LEADING, LineBuilder, PlacedRun};
pub use layout_box::{BoxId, LayoutBox, LayoutMode, LayoutTree};

/// Horizontal page margin: the gap between the viewport edge and the
/// document's content area, in pixels.
pub const H_MARGIN: f32 = 13.0;

/// Vertical page margin, also used as the paragraph gap and as the
/// nominal one-line height when tagging text runs for scroll culling.
pub const V_MARGIN: f32 = 18.0;

/// [HTML § 15.3.3 Flow content](https://html.spec.whatwg.org/multipage/rendering.html#flow-content-3)
///
/// Elements that are block-level by default. A node with any of these
/// among its direct children lays out in block mode: sectioning, heading,
/// list, table, and form elements.
const BLOCK_ELEMENTS: &[&str] = &[
    "html",
    "body",
    "article",
    "section",
    "nav",
    "aside",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "hgroup",
    "header",
    "footer",
    "address",
    "p",
    "hr",
    "pre",
    "blockquote",
    "ol",
    "ul",
    "menu",
    "li",
    "dl",
    "dt",
    "dd",
    "figure",
    "figcaption",
    "main",
    "div",
    "table",
    "form",
    "fieldset",
    "legend",
    "details",
    "summary",
];

/// Whether a tag names a block-level element.
pub fn is_block_level(tag_name: &str) -> bool {
    BLOCK_ELEMENTS.contains(&tag_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_level_tags() {
        assert!(is_block_level("div"));
        assert!(is_block_level("p"));
        assert!(is_block_level("h1"));
        assert!(is_block_level("blockquote"));
    }

    #[test]
    fn test_inline_level_tags() {
        assert!(!is_block_level("span"));
        assert!(!is_block_level("a"));
        assert!(!is_block_level("b"));
        assert!(!is_block_level("br"));
    }
}
