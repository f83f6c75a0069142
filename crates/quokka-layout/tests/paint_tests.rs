//! Integration tests for the paint pass: painting order, background
//! emission, and the culling metadata on text commands.

use quokka_dom::{NodeId, StyleMap, StyledTree};
use quokka_layout::{DisplayCommand, LayoutEngine, V_MARGIN};

const EPS: f32 = 0.01;

fn style_with(pairs: &[(&str, &str)]) -> StyleMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn append_element(
    tree: &mut StyledTree,
    parent: NodeId,
    tag: &str,
    style: StyleMap,
) -> NodeId {
    let id = tree.new_element(tag, style);
    tree.append_child(parent, id);
    id
}

fn append_text(tree: &mut StyledTree, parent: NodeId, content: &str) -> NodeId {
    let id = tree.new_text(content, StyleMap::new());
    tree.append_child(parent, id);
    id
}

/// Helper: run layout + paint with approximate metrics at 800px.
fn paint(tree: &StyledTree) -> Vec<DisplayCommand> {
    let engine = LayoutEngine::with_approximate_metrics();
    engine.display_list(tree, 800.0).commands().to_vec()
}

// ---------------------------------------------------------------------------
// Scenario C: background then text, in that order
// ---------------------------------------------------------------------------

#[test]
fn test_background_paints_before_text() {
    let mut tree = StyledTree::new();
    let div = tree.new_element("div", style_with(&[("background-color", "red")]));
    let _ = append_text(&mut tree, div, "word");

    let commands = paint(&tree);
    assert_eq!(commands.len(), 2, "expected exactly [FillRect, DrawText]");

    match &commands[0] {
        DisplayCommand::FillRect { x0, y0, x1, y1, color } => {
            // The fill spans the box bounds exactly.
            let engine = LayoutEngine::with_approximate_metrics();
            let layout = engine.layout(&tree, 800.0);
            let root = layout.get(layout.root().unwrap());
            assert!((x0 - root.rect.x).abs() < EPS);
            assert!((y0 - root.rect.y).abs() < EPS);
            assert!((x1 - root.rect.right()).abs() < EPS);
            assert!((y1 - root.rect.bottom()).abs() < EPS);
            assert_eq!(color.to_hex_string(), "#ff0000");
        }
        other => panic!("first command should be the background fill, got {other:?}"),
    }

    match &commands[1] {
        DisplayCommand::DrawText { text, .. } => assert_eq!(text, "word"),
        other => panic!("second command should be the text run, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Scenario D: nested blocks with no inline content
// ---------------------------------------------------------------------------

#[test]
fn test_nested_blocks_without_content_paint_nothing() {
    let mut tree = StyledTree::new();
    let container = tree.new_element("div", StyleMap::new());
    let _ = append_element(&mut tree, container, "div", StyleMap::new());
    let _ = append_element(&mut tree, container, "div", StyleMap::new());

    let commands = paint(&tree);
    assert!(
        commands.is_empty(),
        "blocks without backgrounds or text must emit nothing, got {commands:?}"
    );
}

// ---------------------------------------------------------------------------
// Painter's algorithm: parents before children, document order among
// siblings
// ---------------------------------------------------------------------------

#[test]
fn test_parent_background_paints_under_child_background() {
    let mut tree = StyledTree::new();
    let html = tree.new_element("html", style_with(&[("background-color", "white")]));
    let body = append_element(
        &mut tree,
        html,
        "body",
        style_with(&[("background-color", "navy")]),
    );
    let p = append_element(
        &mut tree,
        body,
        "p",
        style_with(&[("background-color", "silver")]),
    );
    let _ = append_text(&mut tree, p, "text");

    let commands = paint(&tree);
    let fills: Vec<String> = commands
        .iter()
        .filter_map(|c| match c {
            DisplayCommand::FillRect { color, .. } => Some(color.to_hex_string()),
            DisplayCommand::DrawText { .. } => None,
        })
        .collect();

    assert_eq!(
        fills,
        vec!["#ffffff", "#000080", "#c0c0c0"],
        "ancestor backgrounds must precede descendant backgrounds"
    );
}

#[test]
fn test_transparent_background_emits_no_fill() {
    let mut tree = StyledTree::new();
    let div = tree.new_element("div", style_with(&[("background-color", "transparent")]));
    let _ = append_text(&mut tree, div, "x");

    let commands = paint(&tree);
    assert!(
        matches!(commands.as_slice(), [DisplayCommand::DrawText { .. }]),
        "transparent background must paint only the text, got {commands:?}"
    );
}

// ---------------------------------------------------------------------------
// Culling metadata
// ---------------------------------------------------------------------------

#[test]
fn test_text_runs_carry_cull_window() {
    let mut tree = StyledTree::new();
    let div = tree.new_element("div", StyleMap::new());
    let _ = append_text(&mut tree, div, "alpha beta");

    let commands = paint(&tree);
    for command in &commands {
        if let DisplayCommand::DrawText { y, top, bottom, .. } = command {
            assert!((top - y).abs() < EPS, "top must equal the run's y");
            assert!(
                (bottom - (y + V_MARGIN)).abs() < EPS,
                "bottom must sit one nominal line below the top"
            );
        }
    }
}

#[test]
fn test_max_y_tracks_lowest_command() {
    let mut tree = StyledTree::new();
    let html = tree.new_element("html", StyleMap::new());
    let p1 = append_element(&mut tree, html, "p", StyleMap::new());
    let _ = append_text(&mut tree, p1, "first");
    let p2 = append_element(&mut tree, html, "p", StyleMap::new());
    let _ = append_text(&mut tree, p2, "second");

    let engine = LayoutEngine::with_approximate_metrics();
    let list = engine.display_list(&tree, 800.0);

    let expected = list
        .commands()
        .iter()
        .map(DisplayCommand::bottom)
        .fold(0.0, f32::max);
    assert_eq!(list.max_y(), expected);
    assert!(list.max_y() > 0.0);
}

// ---------------------------------------------------------------------------
// Serialization (consumed by the CLI dump)
// ---------------------------------------------------------------------------

#[test]
fn test_display_list_serializes_to_json() {
    let mut tree = StyledTree::new();
    let div = tree.new_element("div", style_with(&[("background-color", "#112233")]));
    let _ = append_text(&mut tree, div, "hi");

    let engine = LayoutEngine::with_approximate_metrics();
    let list = engine.display_list(&tree, 800.0);

    let json = serde_json::to_string(&list).expect("display list must serialize");
    assert!(json.contains("FillRect"));
    assert!(json.contains("DrawText"));
}
