//! Document-level layout driver.
//!
//! The engine ties the pieces together: it owns the per-engine
//! [`FontCache`] and exposes the two passes — layout (styled tree +
//! viewport width → box tree) and paint (box tree → display list).
//!
//! Passes are synchronous, single-threaded, and idempotent: nothing is
//! carried between them except the font cache, which only ever
//! accumulates resolved font handles. Re-running a pass over unchanged
//! inputs produces an identical result; a viewport change simply replaces
//! the previous box tree and display list wholesale.

use quokka_dom::StyledTree;

use crate::fonts::{ApproximateFontSource, FontCache, FontSource};
use crate::layout::LayoutTree;
use crate::paint::{DisplayList, Painter};

/// A layout engine instance: a font cache plus the layout/paint entry
/// points.
pub struct LayoutEngine {
    fonts: FontCache,
}

impl LayoutEngine {
    /// Create an engine backed by the given font source.
    ///
    /// The font cache lives as long as the engine; fonts resolved during
    /// one pass are reused by every later pass.
    pub fn new(source: Box<dyn FontSource>) -> Self {
        LayoutEngine {
            fonts: FontCache::new(source),
        }
    }

    /// Create an engine with deterministic fixed-ratio font metrics.
    ///
    /// Intended for tests and headless environments without font files.
    pub fn with_approximate_metrics() -> Self {
        Self::new(Box::new(ApproximateFontSource))
    }

    /// The engine's font cache.
    pub fn fonts(&self) -> &FontCache {
        &self.fonts
    }

    /// Run a full layout pass: build the positioned box tree for the
    /// styled tree at the given viewport width.
    pub fn layout(&self, styled: &StyledTree, viewport_width: f32) -> LayoutTree {
        LayoutTree::layout(styled, viewport_width, &self.fonts)
    }

    /// Run the paint pass over a finished box tree.
    pub fn paint(&self, styled: &StyledTree, layout: &LayoutTree) -> DisplayList {
        Painter::new(styled).paint(layout)
    }

    /// Convenience: layout then paint in one call.
    pub fn display_list(&self, styled: &StyledTree, viewport_width: f32) -> DisplayList {
        let layout = self.layout(styled, viewport_width);
        self.paint(styled, &layout)
    }
}
