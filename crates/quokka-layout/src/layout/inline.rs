//! Inline layout: word placement, line breaking, and baseline alignment.
//!
//! [§ 9.4.2 Inline formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#inline-formatting)
//!
//! "In an inline formatting context, boxes are laid out horizontally, one
//! after the other, beginning at the top of a containing block."
//!
//! An inline-mode box walks its styled subtree and feeds one word at a
//! time into a [`LineBuilder`]. The builder accumulates words for the
//! current line and, on flush, aligns them on a shared baseline computed
//! from the tallest font on the line.

use crate::fonts::FontCache;
use crate::fonts::FontKey;
use crate::style::{ColorValue, Style};

use super::box_model::Rect;

/// [§ 10.8.1 Leading and half-leading](https://www.w3.org/TR/CSS2/visudet.html#leading)
///
/// Fixed leading factor applied uniformly above the line's maximum ascent
/// and below its maximum descent.
pub const LEADING: f32 = 1.25;

/// A word positioned absolutely within the document.
///
/// Produced by [`LineBuilder::flush`]; the paint phase turns each run
/// into one text drawing command.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedRun {
    /// Absolute x of the word's left edge.
    pub x: f32,
    /// Absolute y of the word's top (baseline minus the word's ascent).
    pub y: f32,
    /// The word itself, whitespace-free.
    pub text: String,
    /// Font variant the word was measured with.
    pub font: FontKey,
    /// Text color.
    pub color: ColorValue,
}

/// A word accumulated on the current line, not yet baseline-aligned.
/// `x` is relative to the containing box until flush.
struct PendingWord {
    x: f32,
    text: String,
    font: FontKey,
    color: ColorValue,
}

/// Line builder state for one inline-mode box.
///
/// Transient: constructed when an inline box starts its subtree walk,
/// consumed by [`LineBuilder::finish`] when the walk ends. Cursor
/// positions are relative to the box; flush converts them to absolute
/// document coordinates.
pub struct LineBuilder<'a> {
    fonts: &'a FontCache,
    /// The containing box's rectangle (only x, y, width are read).
    bounds: Rect,
    /// Horizontal cursor, relative to the box's left edge.
    pub cursor_x: f32,
    /// Vertical cursor, relative to the box's top edge.
    pub cursor_y: f32,
    /// Words accumulated on the current line.
    line: Vec<PendingWord>,
    /// Finished, baseline-aligned runs.
    runs: Vec<PlacedRun>,
}

impl<'a> LineBuilder<'a> {
    /// Create a builder for an inline box with the given bounds.
    pub fn new(fonts: &'a FontCache, bounds: Rect) -> Self {
        LineBuilder {
            fonts,
            bounds,
            cursor_x: 0.0,
            cursor_y: 0.0,
            line: Vec::new(),
            runs: Vec::new(),
        }
    }

    /// Place one word, wrapping to a new line first if it would overflow.
    ///
    /// [§ 5.5.2 Word Breaking Rules](https://www.w3.org/TR/css-text-3/#word-breaking)
    ///
    /// Wrapping is word-granular: a word is never split. A word wider
    /// than the box is still placed when the line is empty — the
    /// non-empty-line guard is what makes zero and negative widths
    /// terminate, with every word on its own line.
    pub fn word(&mut self, style: Style<'_>, text: &str) {
        let font_key = style.font_key();
        let font = self.fonts.get(font_key);
        let width = font.measure(text);

        if self.cursor_x + width > self.bounds.width && !self.line.is_empty() {
            self.flush();
        }

        self.line.push(PendingWord {
            x: self.cursor_x,
            text: text.to_string(),
            font: font_key,
            color: style.color(),
        });

        // Advance past the word and one space at the word's own font.
        self.cursor_x += width + font.measure(" ");
    }

    /// Finalize the current line: align every pending word on a shared
    /// baseline and append the positioned runs.
    ///
    /// [§ 10.8 Line height calculations](https://www.w3.org/TR/CSS2/visudet.html#line-height)
    ///
    /// The baseline sits [`LEADING`]× the line's maximum ascent below the
    /// cursor; the cursor then advances [`LEADING`]× the maximum descent
    /// past the baseline. Each word is raised by its own ascent so that
    /// mixed font sizes share the baseline, not the top edge.
    ///
    /// A flush with no pending words is a no-op — repeated paragraph-close
    /// flushes do not accumulate vertical space.
    pub fn flush(&mut self) {
        if self.line.is_empty() {
            return;
        }

        let metrics: Vec<_> = self
            .line
            .iter()
            .map(|word| self.fonts.get(word.font).metrics())
            .collect();

        let max_ascent = metrics.iter().map(|m| m.ascent).fold(0.0, f32::max);
        let baseline = self.cursor_y + LEADING * max_ascent;

        for (word, word_metrics) in std::mem::take(&mut self.line).into_iter().zip(&metrics) {
            self.runs.push(PlacedRun {
                x: self.bounds.x + word.x,
                y: self.bounds.y + baseline - word_metrics.ascent,
                text: word.text,
                font: word.font,
                color: word.color,
            });
        }

        let max_descent = metrics.iter().map(|m| m.descent).fold(0.0, f32::max);
        self.cursor_y = baseline + LEADING * max_descent;
        self.cursor_x = 0.0;
    }

    /// Flush the last line and yield the positioned runs plus the total
    /// height consumed (the final vertical cursor position).
    pub fn finish(mut self) -> (Vec<PlacedRun>, f32) {
        self.flush();
        (self.runs, self.cursor_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::ApproximateFontSource;
    use quokka_dom::StyleMap;

    fn builder(fonts: &FontCache, width: f32) -> LineBuilder<'_> {
        LineBuilder::new(
            fonts,
            Rect {
                x: 0.0,
                y: 0.0,
                width,
                height: 0.0,
            },
        )
    }

    #[test]
    fn test_flush_on_empty_line_is_a_no_op() {
        let fonts = FontCache::new(Box::new(ApproximateFontSource));
        let mut line = builder(&fonts, 100.0);

        line.flush();
        line.flush();

        assert_eq!(line.cursor_x, 0.0);
        assert_eq!(line.cursor_y, 0.0);
        let (runs, height) = line.finish();
        assert!(runs.is_empty());
        assert_eq!(height, 0.0);
    }

    #[test]
    fn test_word_advances_by_width_plus_space() {
        let fonts = FontCache::new(Box::new(ApproximateFontSource));
        let mut line = builder(&fonts, 10_000.0);
        let map = StyleMap::new();

        line.word(Style::of(&map), "hello");

        let key = Style::of(&map).font_key();
        let font = fonts.get(key);
        assert_eq!(line.cursor_x, font.measure("hello") + font.measure(" "));
    }

    #[test]
    fn test_oversized_word_on_empty_line_is_still_placed() {
        let fonts = FontCache::new(Box::new(ApproximateFontSource));
        let mut line = builder(&fonts, 1.0);
        let map = StyleMap::new();

        line.word(Style::of(&map), "unbreakable");
        line.word(Style::of(&map), "words");

        let (runs, _) = line.finish();
        assert_eq!(runs.len(), 2);
        // Each word forced onto its own line: same x, different y.
        assert_eq!(runs[0].x, runs[1].x);
        assert!(runs[1].y > runs[0].y, "second word must wrap below the first");
        // Never split.
        assert_eq!(runs[0].text, "unbreakable");
        assert_eq!(runs[1].text, "words");
    }
}
