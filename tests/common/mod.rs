//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::sync::Arc;

use blocktint::dispatch::{Annotator, Decoration, PassReport};
use blocktint::extract::ExtractOptions;
use blocktint::text::LineIndexedText;
use blocktint::theme::Color;
use blocktint::theme_state::ThemeState;
use blocktint::tree::java::JavaTreeProvider;
use blocktint::tree::{SyntaxTree, TreeProvider};
use blocktint::HighlightCategory;

pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
pub const BLACK: Color = Color::rgb(0, 0, 0);

pub const SAMPLE: &str = include_str!("../../samples/Inventory.java");

/// Parse Java source, panicking on provider errors
pub fn parse_java(source: &str) -> SyntaxTree {
    JavaTreeProvider::new()
        .expect("Java grammar loads")
        .parse(source)
        .expect("source lowers")
}

/// One full pass over `source` with the stock colors over `background`
pub fn annotate(source: &str, background: Color) -> (SyntaxTree, Vec<Decoration>, PassReport) {
    annotate_with(source, background, ExtractOptions::default())
}

pub fn annotate_with(
    source: &str,
    background: Color,
    options: ExtractOptions,
) -> (SyntaxTree, Vec<Decoration>, PassReport) {
    let tree = parse_java(source);
    let text = LineIndexedText::new(source);
    let annotator = Annotator::new(Arc::new(ThemeState::from_background(background)), options);
    let (decorations, report) = annotator.annotate_to_vec(&tree, &text);
    (tree, decorations, report)
}

/// Source text under every decoration of `category`, in emission order
pub fn texts_of<'a>(
    source: &'a str,
    decorations: &[Decoration],
    category: HighlightCategory,
) -> Vec<&'a str> {
    decorations
        .iter()
        .filter(|d| d.category == category)
        .map(|d| &source[d.range.as_range()])
        .collect()
}
