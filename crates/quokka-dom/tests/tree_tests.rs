//! Tests for styled tree construction: allocation, append_child link
//! maintenance, and accessors.

use quokka_dom::{NodeId, NodeKind, StyleMap, StyledTree};

/// Helper to create an element node with no style and return its NodeId.
fn alloc_element(tree: &mut StyledTree, tag: &str) -> NodeId {
    tree.new_element(tag, StyleMap::new())
}

#[test]
fn test_first_allocation_is_root() {
    let mut tree = StyledTree::new();
    assert!(tree.is_empty());

    let html = alloc_element(&mut tree, "html");
    assert_eq!(html, NodeId::ROOT);
    assert_eq!(tree.root(), html);
    assert_eq!(tree.len(), 1);
}

#[test]
fn test_append_child_maintains_sibling_links() {
    let mut tree = StyledTree::new();
    let parent = alloc_element(&mut tree, "div");

    let a = alloc_element(&mut tree, "p");
    let b = alloc_element(&mut tree, "p");
    let c = alloc_element(&mut tree, "p");
    tree.append_child(parent, a);
    tree.append_child(parent, b);
    tree.append_child(parent, c);

    // Document order preserved
    assert_eq!(tree.children(parent), &[a, b, c]);

    // Parent links
    assert_eq!(tree.parent(a), Some(parent));
    assert_eq!(tree.parent(c), Some(parent));

    // Sibling chain: a <-> b <-> c
    assert_eq!(tree.prev_sibling(a), None);
    assert_eq!(tree.next_sibling(a), Some(b));
    assert_eq!(tree.prev_sibling(b), Some(a));
    assert_eq!(tree.next_sibling(b), Some(c));
    assert_eq!(tree.prev_sibling(c), Some(b));
    assert_eq!(tree.next_sibling(c), None);
}

#[test]
fn test_element_and_text_accessors() {
    let mut tree = StyledTree::new();
    let parent = alloc_element(&mut tree, "p");
    let text = tree.new_text("hello", StyleMap::new());
    tree.append_child(parent, text);

    assert_eq!(tree.as_element(parent).map(|e| e.tag_name.as_str()), Some("p"));
    assert!(tree.as_text(parent).is_none());

    assert_eq!(tree.as_text(text), Some("hello"));
    assert!(tree.as_element(text).is_none());

    // Exhaustive kind matching still works for consumers
    match &tree.get(text).unwrap().kind {
        NodeKind::Text(s) => assert_eq!(s, "hello"),
        NodeKind::Element(_) => panic!("text node reported as element"),
    }
}

#[test]
fn test_style_lookup() {
    let mut tree = StyledTree::new();
    let mut style = StyleMap::new();
    style.insert("color".to_string(), "red".to_string());
    let node = tree.new_element("span", style);

    assert_eq!(tree.style(node).get("color").map(String::as_str), Some("red"));

    // Out-of-range ids resolve to an empty style map, not a panic.
    let missing = NodeId(999);
    assert!(tree.get(missing).is_none());
    assert!(tree.style(missing).is_empty());
}
