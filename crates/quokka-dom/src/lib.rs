//! Styled node tree consumed by the Quokka layout engine.
//!
//! A styled tree is the output of an upstream HTML parser plus CSS cascade:
//! a tree of element and text nodes where every node already carries its
//! resolved style properties as plain strings. The layout engine reads this
//! tree; it never mutates it.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all
//! relationships, providing O(1) access and traversal without borrow
//! checker issues. Parent and sibling links are plain indices, so the
//! arena is the single owner of every node.

use std::collections::HashMap;

/// Map of attribute names to values for an element.
pub type AttributesMap = HashMap<String, String>;

/// Map of resolved style property names to their string values.
///
/// [CSS Cascading Level 4 § 4.4](https://www.w3.org/TR/css-cascade-4/#cascaded)
///
/// "The cascaded value represents the result of the cascade: it is the
/// declared value that wins the cascade."
///
/// Values arrive fully resolved per node — the layout engine performs no
/// cascading, inheritance, or defaulting beyond substituting safe
/// fallbacks for values it cannot interpret.
pub type StyleMap = HashMap<String, String>;

/// A type-safe index into the styled tree.
///
/// `NodeId` provides O(1) access to any node in the tree without borrowing
/// issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The document root node is always at index 0.
    pub const ROOT: NodeId = NodeId(0);
}

/// A single node in the styled tree.
///
/// Stores indices for parent/child/sibling relationships, enabling O(1)
/// traversal in any direction.
#[derive(Debug, Clone)]
pub struct Node {
    /// Element or text payload.
    pub kind: NodeKind,

    /// Resolved style properties for this node.
    pub style: StyleMap,

    /// Parent node, `None` for the root.
    pub parent: Option<NodeId>,

    /// Child nodes in document order.
    pub children: Vec<NodeId>,

    /// The node immediately following this one among its parent's children.
    pub next_sibling: Option<NodeId>,

    /// The node immediately preceding this one among its parent's children.
    pub prev_sibling: Option<NodeId>,
}

/// The two kinds of renderable node.
///
/// Upstream document/comment/processing-instruction nodes never reach the
/// layout engine; the styled tree is strictly this two-variant union.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// An element with a tag name and attributes.
    Element(ElementData),
    /// A run of raw character data.
    Text(String),
}

/// Element-specific data.
#[derive(Debug, Clone)]
pub struct ElementData {
    /// The element's local name, lowercase.
    pub tag_name: String,
    /// The element's attribute list.
    pub attrs: AttributesMap,
}

/// Arena-based styled tree with O(1) node access and traversal.
///
/// The first node allocated into the tree is the document root
/// ([`NodeId::ROOT`]). All nodes are stored in a contiguous vector and
/// reference each other by index.
#[derive(Debug, Clone, Default)]
pub struct StyledTree {
    /// All nodes in the tree, indexed by NodeId.
    nodes: Vec<Node>,
}

impl StyledTree {
    /// Create an empty tree. The first node allocated becomes the root.
    pub fn new() -> Self {
        StyledTree { nodes: Vec::new() }
    }

    /// Get the root node ID.
    ///
    /// The root is the first allocated node. Calling this on an empty tree
    /// returns [`NodeId::ROOT`], which `get` will resolve to `None`.
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get the number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node and return its ID.
    /// The node is not yet attached to the tree.
    pub fn alloc(&mut self, kind: NodeKind, style: StyleMap) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            style,
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
        });
        id
    }

    /// Allocate an element node with the given tag name and style.
    pub fn new_element(&mut self, tag_name: &str, style: StyleMap) -> NodeId {
        self.alloc(
            NodeKind::Element(ElementData {
                tag_name: tag_name.to_string(),
                attrs: AttributesMap::new(),
            }),
            style,
        )
    }

    /// Allocate a text node with the given content and style.
    pub fn new_text(&mut self, content: &str, style: StyleMap) -> NodeId {
        self.alloc(NodeKind::Text(content.to_string()), style)
    }

    /// Appends `child` as the last child of `parent`, updating all
    /// relationships (parent link and both sibling links).
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        // Get the current last child of parent (if any) to set up sibling links
        let prev_last_child = self.nodes[parent.0].children.last().copied();

        // Update parent's children list
        self.nodes[parent.0].children.push(child);

        // Set child's parent
        self.nodes[child.0].parent = Some(parent);

        // Set up sibling links
        if let Some(prev_id) = prev_last_child {
            self.nodes[prev_id.0].next_sibling = Some(child);
            self.nodes[child.0].prev_sibling = Some(prev_id);
        }
    }

    /// Get the parent of a node.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node, in document order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Get the next sibling of a node.
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.next_sibling)
    }

    /// Get the previous sibling of a node.
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.prev_sibling)
    }

    /// Get element data if this node is an element.
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.kind {
            NodeKind::Element(data) => Some(data),
            NodeKind::Text(_) => None,
        })
    }

    /// Get text content if this node is a text node.
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.kind {
            NodeKind::Text(s) => Some(s.as_str()),
            NodeKind::Element(_) => None,
        })
    }

    /// Get the resolved style map of a node.
    ///
    /// Missing nodes yield an empty map so callers can always look up
    /// properties without a pre-check.
    pub fn style(&self, id: NodeId) -> &StyleMap {
        static EMPTY: std::sync::LazyLock<StyleMap> = std::sync::LazyLock::new(StyleMap::new);
        self.get(id).map(|n| &n.style).unwrap_or(&EMPTY)
    }
}
