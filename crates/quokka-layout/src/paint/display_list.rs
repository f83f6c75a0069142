//! Display List - a sequence of drawing commands
//!
//! [CSS 2.1 Appendix E](https://www.w3.org/TR/CSS2/zindex.html)
//!
//! The display list is the output of the painting phase. It contains all
//! the drawing commands needed to render a document, in the correct
//! z-order. The consumer applies a scroll offset, culls commands whose
//! vertical extent misses the visible range, and executes the remainder
//! in sequence order.

use serde::Serialize;

use crate::fonts::FontKey;
use crate::style::ColorValue;

/// A single drawing command.
///
/// [CSS 2.1 Appendix E.2 Painting order](https://www.w3.org/TR/CSS2/zindex.html#painting-order)
///
/// Commands are added to the display list in painting order (back to
/// front); later commands draw over earlier ones.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DisplayCommand {
    /// Fill a rectangle with a solid color.
    ///
    /// Used for element backgrounds. The rectangle is given by two
    /// corners rather than origin + extent, matching how consumers
    /// clamp it against the viewport.
    FillRect {
        /// X coordinate of the top-left corner.
        x0: f32,
        /// Y coordinate of the top-left corner.
        y0: f32,
        /// X coordinate of the bottom-right corner.
        x1: f32,
        /// Y coordinate of the bottom-right corner.
        y1: f32,
        /// Fill color.
        color: ColorValue,
    },

    /// Draw one word of text.
    ///
    /// [CSS 2.1 Appendix E.2](https://www.w3.org/TR/CSS2/zindex.html#painting-order)
    /// Step 7: "the element's text"
    DrawText {
        /// X coordinate of the word's left edge.
        x: f32,
        /// Y coordinate of the word's top edge.
        y: f32,
        /// The word to draw.
        text: String,
        /// Font variant to draw with.
        font: FontKey,
        /// Text color.
        color: ColorValue,
        /// Top of the command's vertical extent, for scroll culling.
        top: f32,
        /// Bottom of the command's vertical extent, for scroll culling.
        bottom: f32,
    },
}

impl DisplayCommand {
    /// The bottom edge of this command's vertical extent.
    pub fn bottom(&self) -> f32 {
        match self {
            DisplayCommand::FillRect { y1, .. } => *y1,
            DisplayCommand::DrawText { bottom, .. } => *bottom,
        }
    }
}

/// A list of drawing commands in painting order.
///
/// [CSS 2.1 Appendix E.2 Painting order](https://www.w3.org/TR/CSS2/zindex.html#painting-order)
///
/// One flat list is produced per whole-document paint pass and replaced
/// wholesale by the next pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DisplayList {
    commands: Vec<DisplayCommand>,
}

impl DisplayList {
    /// Create an empty display list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Add a command to the display list.
    pub fn push(&mut self, command: DisplayCommand) {
        self.commands.push(command);
    }

    /// Get the commands in painting order.
    #[must_use]
    pub fn commands(&self) -> &[DisplayCommand] {
        &self.commands
    }

    /// Get the number of commands.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if the display list is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// The lowest bottom edge of any command, i.e. the document's painted
    /// extent. Consumers use this for the maximum scroll position.
    #[must_use]
    pub fn max_y(&self) -> f32 {
        self.commands
            .iter()
            .map(DisplayCommand::bottom)
            .fold(0.0, f32::max)
    }
}
