//! Quokka CLI
//!
//! A headless layout tool for testing and debugging: reads a styled tree
//! from JSON, runs the layout and paint passes, and prints what came out.
//!
//! The input format is a nested tree of element and text objects:
//!
//! ```json
//! {
//!   "tag": "html",
//!   "children": [
//!     { "tag": "p",
//!       "style": { "background-color": "#eeeeee" },
//!       "children": [ { "text": "hello world" } ] }
//!   ]
//! }
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use owo_colors::OwoColorize;
use serde::Deserialize;

use quokka_dom::{ElementData, NodeId, NodeKind, StyleMap, StyledTree};
use quokka_layout::{BoxId, LayoutEngine, LayoutMode, LayoutTree};
use quokka_render::{Renderer, SystemFontSource};

#[derive(Parser)]
#[command(name = "quokka", version, about = "Lay out a styled tree and inspect the result")]
struct Args {
    /// Styled tree JSON file
    input: PathBuf,

    /// Viewport width in pixels
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Print the positioned box tree
    #[arg(long)]
    boxes: bool,

    /// Print the display list as JSON
    #[arg(long)]
    commands: bool,

    /// Render a PNG screenshot to this path (uses system fonts)
    #[arg(long)]
    screenshot: Option<PathBuf>,

    /// Viewport height in pixels, used by --screenshot
    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Scroll offset in pixels, used by --screenshot
    #[arg(long, default_value_t = 0.0)]
    scroll: f32,
}

/// The nested JSON form of a styled node.
#[derive(Deserialize)]
#[serde(untagged)]
enum JsonNode {
    Element {
        tag: String,
        #[serde(default)]
        attrs: HashMap<String, String>,
        #[serde(default)]
        style: StyleMap,
        #[serde(default)]
        children: Vec<JsonNode>,
    },
    Text {
        text: String,
        #[serde(default)]
        style: StyleMap,
    },
}

/// Convert the nested JSON form into the arena styled tree.
fn build_tree(tree: &mut StyledTree, node: JsonNode, parent: Option<NodeId>) {
    let id = match node {
        JsonNode::Element {
            tag,
            attrs,
            style,
            children,
        } => {
            let id = tree.alloc(
                NodeKind::Element(ElementData {
                    tag_name: tag.to_ascii_lowercase(),
                    attrs,
                }),
                style,
            );
            if let Some(parent) = parent {
                tree.append_child(parent, id);
            }
            for child in children {
                build_tree(tree, child, Some(id));
            }
            return;
        }
        JsonNode::Text { text, style } => tree.alloc(NodeKind::Text(text), style),
    };
    if let Some(parent) = parent {
        tree.append_child(parent, id);
    }
}

/// Print one box and its descendants with indentation.
fn print_box(styled: &StyledTree, layout: &LayoutTree, id: BoxId, indent: usize) {
    let layout_box = layout.get(id);
    let pad = "  ".repeat(indent);

    let label = match styled.get(layout_box.node).map(|n| &n.kind) {
        Some(NodeKind::Element(data)) => format!("<{}>", data.tag_name),
        Some(NodeKind::Text(text)) => {
            let mut preview: String = text.chars().take(24).collect();
            if text.chars().count() > 24 {
                preview.push('…');
            }
            format!("{preview:?}")
        }
        None => "(missing node)".to_string(),
    };

    let mode = match layout_box.mode {
        LayoutMode::Block => "block",
        LayoutMode::Inline => "inline",
    };

    println!(
        "{pad}{} {} {}",
        label.cyan(),
        mode.yellow(),
        format!(
            "x={:.1} y={:.1} w={:.1} h={:.1}",
            layout_box.rect.x, layout_box.rect.y, layout_box.rect.width, layout_box.rect.height
        )
        .green()
    );

    if !layout_box.runs.is_empty() {
        println!("{pad}  {} runs", layout_box.runs.len().to_string().dimmed());
    }

    for &child in &layout_box.children {
        print_box(styled, layout, child, indent + 1);
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let json = fs::read_to_string(&args.input)
        .with_context(|| format!("reading '{}'", args.input.display()))?;
    let root: JsonNode = serde_json::from_str(&json)
        .with_context(|| format!("parsing '{}'", args.input.display()))?;

    let mut styled = StyledTree::new();
    build_tree(&mut styled, root, None);

    // Measure with the same faces the renderer will draw with; fall back
    // to fixed-ratio metrics when no system font is available.
    let (engine, system_fonts) = match SystemFontSource::load_default() {
        Ok(fonts) => (LayoutEngine::new(Box::new(fonts.clone())), Some(fonts)),
        Err(err) => {
            eprintln!("warning: {err}; using approximate font metrics");
            (LayoutEngine::with_approximate_metrics(), None)
        }
    };

    let layout = engine.layout(&styled, args.width as f32);
    let display_list = engine.paint(&styled, &layout);

    println!(
        "{} {} nodes, {} boxes, {} commands, document height {:.1}px",
        "quokka:".bold(),
        styled.len(),
        layout.boxes().len(),
        display_list.len(),
        layout.bounds.height
    );

    if args.boxes {
        println!("\n{}", "=== Box tree ===".bold());
        if let Some(root) = layout.root() {
            print_box(&styled, &layout, root, 0);
        }
    }

    if args.commands {
        println!("\n{}", "=== Display list ===".bold());
        println!("{}", serde_json::to_string_pretty(&display_list)?);
    }

    if let Some(path) = args.screenshot {
        let fonts = system_fonts.context("--screenshot requires a usable system font")?;
        let mut renderer = Renderer::new(args.width, args.height, fonts);
        renderer.render(&display_list, args.scroll);
        renderer.save(&path)?;
        println!("wrote {}", path.display());
    }

    Ok(())
}
