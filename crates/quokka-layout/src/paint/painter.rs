//! Painter - generates a display list from a finished box tree
//!
//! [CSS 2.1 Appendix E.2 Painting order](https://www.w3.org/TR/CSS2/zindex.html#painting-order)
//!
//! The painter walks the box tree depth-first in pre-order: each box
//! paints its own contribution before its children, and children paint in
//! document order. Deeper and later content therefore draws over
//! shallower and earlier content — the painter's algorithm.

use quokka_dom::StyledTree;

use crate::layout::{BoxId, LayoutMode, LayoutTree, V_MARGIN};
use crate::style::Style;

use super::{DisplayCommand, DisplayList};

/// Painter that generates a display list from a layout tree.
pub struct Painter<'a> {
    /// The styled tree the boxes were generated from, used to look up
    /// background colors.
    styled: &'a StyledTree,
}

impl<'a> Painter<'a> {
    /// Create a painter for boxes generated from the given styled tree.
    #[must_use]
    pub fn new(styled: &'a StyledTree) -> Self {
        Self { styled }
    }

    /// Paint a layout tree and return the display list.
    ///
    /// The document-level bounds contribute nothing of their own; paint
    /// output starts at the root box.
    #[must_use]
    pub fn paint(&self, layout: &LayoutTree) -> DisplayList {
        let mut display_list = DisplayList::new();
        if let Some(root) = layout.root() {
            self.paint_box(layout, root, &mut display_list);
        }
        display_list
    }

    /// Paint a single box and its descendants.
    ///
    /// [CSS 2.1 Appendix E.2](https://www.w3.org/TR/CSS2/zindex.html#painting-order)
    ///
    /// Per box, in order: the background fill (if the resolved
    /// background-color paints anything), then the box's text runs, then
    /// the children.
    fn paint_box(&self, layout: &LayoutTree, id: BoxId, display_list: &mut DisplayList) {
        let layout_box = layout.get(id);
        let style = Style::of(self.styled.style(layout_box.node));

        if let Some(background) = style.background_color() {
            display_list.push(DisplayCommand::FillRect {
                x0: layout_box.rect.x,
                y0: layout_box.rect.y,
                x1: layout_box.rect.right(),
                y1: layout_box.rect.bottom(),
                color: background,
            });
        }

        if layout_box.mode == LayoutMode::Inline {
            for run in &layout_box.runs {
                display_list.push(DisplayCommand::DrawText {
                    x: run.x,
                    y: run.y,
                    text: run.text.clone(),
                    font: run.font,
                    color: run.color.clone(),
                    // The cull window extends one nominal line below the
                    // run's top edge.
                    top: run.y,
                    bottom: run.y + V_MARGIN,
                });
            }
        }

        for &child in &layout_box.children {
            self.paint_box(layout, child, display_list);
        }
    }
}
