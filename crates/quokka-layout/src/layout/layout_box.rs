//! The arena box tree and the block/inline layout algorithms.
//!
//! [§ 9.2 Controlling box generation](https://www.w3.org/TR/CSS2/visuren.html#box-gen)
//!
//! "Each box is associated with its generating element."
//!
//! One layout box is generated per styled node. Boxes live in an arena
//! ([`LayoutTree`]) and reference their parent and previous sibling by
//! [`BoxId`], so the arena is the single owner of every box; the
//! back-references carry no ownership.
//!
//! Layout is a pure function of the styled tree and the viewport width:
//! every pass builds the box tree from scratch, and two passes over the
//! same inputs produce identical trees.

use quokka_dom::{NodeId, NodeKind, StyledTree};

use crate::fonts::FontCache;
use crate::style::Style;

use super::box_model::Rect;
use super::inline::{LineBuilder, PlacedRun};
use super::{H_MARGIN, V_MARGIN, is_block_level};

/// A type-safe index into the box arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoxId(pub usize);

/// [§ 9.4 Normal flow](https://www.w3.org/TR/CSS2/visuren.html#normal-flow)
///
/// The two layout strategies a box can use for its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// Child boxes stack vertically, each starting where the previous
    /// one ended.
    Block,
    /// The styled subtree is flattened into words and line-broken within
    /// the box's own width.
    Inline,
}

/// One positioned box in the layout tree.
#[derive(Debug, Clone)]
pub struct LayoutBox {
    /// The styled node this box was generated for.
    pub node: NodeId,
    /// Containing box, `None` for the root box (whose geometry derives
    /// from the document bounds instead).
    pub parent: Option<BoxId>,
    /// The sibling box laid out immediately above this one, `None` for
    /// a first child.
    pub previous: Option<BoxId>,
    /// Child boxes in document order.
    pub children: Vec<BoxId>,
    /// How this box laid out its content.
    pub mode: LayoutMode,
    /// Resolved geometry in absolute pixels.
    pub rect: Rect,
    /// Positioned text runs; non-empty only in inline mode.
    pub runs: Vec<PlacedRun>,
}

/// The box arena plus the document-level bounds.
///
/// The document itself is not a box in the arena: it contributes the
/// page margins and the content width, wraps exactly one root box around
/// the root styled node, and takes that box's height as its own.
#[derive(Debug, Clone)]
pub struct LayoutTree {
    boxes: Vec<LayoutBox>,
    /// Document content area: origin at the page margins, width derived
    /// from the viewport, height equal to the root box's height.
    pub bounds: Rect,
}

impl LayoutTree {
    /// Lay out a styled tree at the given viewport width.
    ///
    /// The document content area starts at (`H_MARGIN`, `V_MARGIN`) and
    /// is `2 * H_MARGIN` narrower than the viewport. An empty styled
    /// tree produces an empty box tree with zero height.
    pub fn layout(styled: &StyledTree, viewport_width: f32, fonts: &FontCache) -> Self {
        let mut tree = LayoutTree {
            boxes: Vec::new(),
            bounds: Rect {
                x: H_MARGIN,
                y: V_MARGIN,
                width: viewport_width - 2.0 * H_MARGIN,
                height: 0.0,
            },
        };

        if styled.is_empty() {
            return tree;
        }

        let root = tree.push_box(styled.root(), None, None);
        tree.layout_box(root, styled, fonts);
        tree.bounds.height = tree.boxes[root.0].rect.height;
        tree
    }

    /// The root box, if the styled tree had any nodes.
    pub fn root(&self) -> Option<BoxId> {
        if self.boxes.is_empty() { None } else { Some(BoxId(0)) }
    }

    /// Get a box by its ID.
    ///
    /// # Panics
    /// Panics if the ID did not come from this tree.
    pub fn get(&self, id: BoxId) -> &LayoutBox {
        &self.boxes[id.0]
    }

    /// All boxes in allocation (pre-)order.
    pub fn boxes(&self) -> &[LayoutBox] {
        &self.boxes
    }

    /// Allocate an un-laid-out box for a styled node.
    fn push_box(&mut self, node: NodeId, parent: Option<BoxId>, previous: Option<BoxId>) -> BoxId {
        let id = BoxId(self.boxes.len());
        self.boxes.push(LayoutBox {
            node,
            parent,
            previous,
            children: Vec::new(),
            mode: LayoutMode::Block,
            rect: Rect::default(),
            runs: Vec::new(),
        });
        id
    }

    /// Lay out one box: derive its geometry, build and lay out its
    /// children, then aggregate its height.
    ///
    /// Geometry comes from the box's relatives, which are finished by the
    /// time this runs: width and x from the parent (every box spans its
    /// parent's content width), y from the previous sibling's bottom edge
    /// (or the parent's top edge for a first child).
    fn layout_box(&mut self, id: BoxId, styled: &StyledTree, fonts: &FontCache) {
        let parent_rect = match self.boxes[id.0].parent {
            Some(parent) => self.boxes[parent.0].rect,
            None => self.bounds,
        };
        let y = match self.boxes[id.0].previous {
            Some(previous) => self.boxes[previous.0].rect.bottom(),
            None => parent_rect.y,
        };
        self.boxes[id.0].rect = Rect {
            x: parent_rect.x,
            y,
            width: parent_rect.width,
            height: 0.0,
        };

        let node = self.boxes[id.0].node;
        let mode = layout_mode(styled, node);
        self.boxes[id.0].mode = mode;

        match mode {
            LayoutMode::Block => {
                // Two phases: construct the child chain first, then lay
                // each child out in order — a child's y depends on the
                // finished height of the previous one.
                let mut previous = None;
                let child_nodes: Vec<NodeId> = styled.children(node).to_vec();
                for child_node in child_nodes {
                    let child = self.push_box(child_node, Some(id), previous);
                    self.boxes[id.0].children.push(child);
                    previous = Some(child);
                }

                let children = self.boxes[id.0].children.clone();
                for child in &children {
                    self.layout_box(*child, styled, fonts);
                }

                let height = children
                    .iter()
                    .map(|child| self.boxes[child.0].rect.height)
                    .sum();
                self.boxes[id.0].rect.height = height;
            }
            LayoutMode::Inline => {
                let mut line = LineBuilder::new(fonts, self.boxes[id.0].rect);
                walk_inline(styled, node, &mut line);
                let (runs, height) = line.finish();
                self.boxes[id.0].runs = runs;
                self.boxes[id.0].rect.height = height;
            }
        }
    }
}

/// [§ 9.2 Controlling box generation](https://www.w3.org/TR/CSS2/visuren.html#box-gen)
///
/// Select the layout strategy for a node:
///
/// - a text node is inline;
/// - an element with a block-level child is block (the block children
///   cannot participate in a line);
/// - an element with children, none of them block-level, is inline;
/// - a leaf element is block, producing an empty box rather than no box.
fn layout_mode(styled: &StyledTree, node: NodeId) -> LayoutMode {
    let Some(n) = styled.get(node) else {
        return LayoutMode::Block;
    };
    match &n.kind {
        NodeKind::Text(_) => LayoutMode::Inline,
        NodeKind::Element(_) => {
            let has_block_child = n.children.iter().any(|&child| {
                styled
                    .as_element(child)
                    .is_some_and(|data| is_block_level(&data.tag_name))
            });
            if has_block_child {
                LayoutMode::Block
            } else if !n.children.is_empty() {
                LayoutMode::Inline
            } else {
                LayoutMode::Block
            }
        }
    }
}

/// Depth-first walk of an inline subtree, feeding words into the line
/// builder.
///
/// Text content is split on whitespace; each word is placed with the
/// style of the text node it came from. Elements contribute no words of
/// their own but may trigger line breaks on the way in or out.
fn walk_inline(styled: &StyledTree, node: NodeId, line: &mut LineBuilder<'_>) {
    let Some(n) = styled.get(node) else { return };
    match &n.kind {
        NodeKind::Text(text) => {
            let style = Style::of(&n.style);
            for word in text.split_whitespace() {
                line.word(style, word);
            }
        }
        NodeKind::Element(data) => {
            open_tag(&data.tag_name, line);
            for &child in &n.children {
                walk_inline(styled, child, line);
            }
            close_tag(&data.tag_name, line);
        }
    }
}

/// Formatting trigger when entering an element: a line-break element
/// forces an immediate flush with no extra vertical gap.
fn open_tag(tag_name: &str, line: &mut LineBuilder<'_>) {
    if tag_name == "br" {
        line.flush();
    }
}

/// Formatting trigger when leaving an element: a closing paragraph
/// flushes its last line and adds one fixed vertical gap.
fn close_tag(tag_name: &str, line: &mut LineBuilder<'_>) {
    if tag_name == "p" {
        line.flush();
        line.cursor_y += V_MARGIN;
    }
}
