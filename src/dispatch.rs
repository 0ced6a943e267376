//! Traversal dispatch: walk a tree, extract ranges, blend, emit
//!
//! A pass visits every node once in document order, asks [`crate::extract`]
//! for the node's spans, colors each span from the current [`Palette`] and
//! hands the result to a [`DecorationSink`]. A node whose rule fails is
//! skipped and recorded; the pass carries on.

use std::sync::Arc;

use serde::Serialize;

use crate::blend::{Palette, Rgb};
use crate::category::HighlightCategory;
use crate::error::DecorationError;
use crate::extract::{self, ExtractOptions};
use crate::text::LineIndexedText;
use crate::theme_state::ThemeState;
use crate::tree::{ByteRange, Node, SyntaxTree};

/// How a decoration is drawn: a box around the range, regular weight text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DecorationStyle {
    pub boxed: bool,
    pub bold: bool,
}

impl Default for DecorationStyle {
    fn default() -> Self {
        Self {
            boxed: true,
            bold: false,
        }
    }
}

/// A colored range ready for the rendering surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Decoration {
    pub range: ByteRange,
    pub color: Rgb,
    pub category: HighlightCategory,
    pub style: DecorationStyle,
}

/// Rendering surface that receives decorations.
///
/// Overlapping ranges are allowed; the last one emitted wins.
pub trait DecorationSink {
    fn emit(&mut self, decoration: Decoration);
}

impl DecorationSink for Vec<Decoration> {
    fn emit(&mut self, decoration: Decoration) {
        self.push(decoration);
    }
}

/// Summary of one pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassReport {
    /// Nodes seen
    pub visited: usize,
    /// Nodes with a decoration rule
    pub matched: usize,
    /// Decorations handed to the sink
    pub emitted: usize,
    /// Nodes skipped because their rule failed
    pub violations: Vec<DecorationError>,
}

impl PassReport {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

/// One traversal over one buffer with a fixed palette
pub struct Dispatcher<'a> {
    palette: &'a Palette,
    text: &'a LineIndexedText,
    options: ExtractOptions,
    style: DecorationStyle,
}

impl<'a> Dispatcher<'a> {
    pub fn new(palette: &'a Palette, text: &'a LineIndexedText, options: ExtractOptions) -> Self {
        Self {
            palette,
            text,
            options,
            style: DecorationStyle::default(),
        }
    }

    /// Visit `nodes` in the order given
    pub fn run<'t, I>(&self, nodes: I, sink: &mut dyn DecorationSink) -> PassReport
    where
        I: IntoIterator<Item = Node<'t>>,
    {
        let mut report = PassReport::default();
        for node in nodes {
            self.visit(node, sink, &mut report);
        }
        report
    }

    /// Decorate a single node, as a host visitation callback would
    pub fn visit(&self, node: Node<'_>, sink: &mut dyn DecorationSink, report: &mut PassReport) {
        report.visited += 1;
        if !extract::is_decorated(node.kind()) {
            return;
        }
        report.matched += 1;

        let spans = match extract::extract(node, self.text, self.options) {
            Ok(spans) => spans,
            Err(err) => {
                tracing::warn!("Skipping node: {}", err);
                report.violations.push(err);
                return;
            }
        };

        tracing::trace!(
            "{:?} {} -> {} decorations",
            node.kind(),
            node.range(),
            spans.len()
        );
        for span in spans {
            sink.emit(Decoration {
                range: span.range,
                color: self.palette.render(span.category),
                category: span.category,
                style: self.style,
            });
            report.emitted += 1;
        }
    }
}

/// Runs full passes against the shared theme state
#[derive(Clone)]
pub struct Annotator {
    theme: Arc<ThemeState>,
    options: ExtractOptions,
}

impl Annotator {
    pub fn new(theme: Arc<ThemeState>, options: ExtractOptions) -> Self {
        Self { theme, options }
    }

    pub fn options(&self) -> ExtractOptions {
        self.options
    }

    pub fn theme(&self) -> &Arc<ThemeState> {
        &self.theme
    }

    /// Decorate every node of `tree`.
    ///
    /// The palette is loaded once; a theme change during the pass takes
    /// effect on the next one.
    pub fn annotate(
        &self,
        tree: &SyntaxTree,
        text: &LineIndexedText,
        sink: &mut dyn DecorationSink,
    ) -> PassReport {
        let palette = self.theme.snapshot();
        let dispatcher = Dispatcher::new(&palette, text, self.options);
        let report = dispatcher.run(tree.preorder(), sink);

        tracing::debug!(
            "Annotated {} nodes ({} matched, {} decorations, {} skipped)",
            report.visited,
            report.matched,
            report.emitted,
            report.violations.len()
        );
        report
    }

    /// Convenience wrapper collecting into a `Vec`
    pub fn annotate_to_vec(
        &self,
        tree: &SyntaxTree,
        text: &LineIndexedText,
    ) -> (Vec<Decoration>, PassReport) {
        let mut decorations: Vec<Decoration> = Vec::new();
        let report = self.annotate(tree, text, &mut decorations);
        (decorations, report)
    }
}
