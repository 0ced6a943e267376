//! Range extraction: which parts of a node get which category
//!
//! Each recognised [`NodeKind`] maps to one rule. Rules only look at the node
//! they were given and its links; the dispatcher handles descendants when it
//! reaches them. Two helpers are shared between rules:
//!
//! - the brace rule colors a code block's `{` and `}`
//! - the indent rule colors the leading whitespace of every line spanned by a
//!   code block's statements (if-blocks only)
//!
//! Keywords, modifier lists, return types and catch parameters are padded by
//! one character so the highlight runs into the following separator.

use crate::category::HighlightCategory;
use crate::error::DecorationError;
use crate::indent;
use crate::text::LineIndexedText;
use crate::tree::{ByteRange, LoopKind, Node, NodeKind};

/// One decorated range and its category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub range: ByteRange,
    pub category: HighlightCategory,
}

/// Knobs for extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Run the indent rule inside if-blocks
    pub indent_guides: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            indent_guides: true,
        }
    }
}

type Rule = for<'t, 'a> fn(&mut Collector<'t, 'a>) -> Result<(), DecorationError>;

/// Rule for a node kind, or `None` for kinds that are never decorated
fn rule_for(kind: NodeKind) -> Option<Rule> {
    let rule: Rule = match kind {
        NodeKind::Import => import_rule,
        NodeKind::ClassDecl => class_rule,
        NodeKind::MethodDecl => method_rule,
        NodeKind::ConditionalLoop(_) => loop_rule,
        NodeKind::If => if_rule,
        NodeKind::Try => try_rule,
        NodeKind::DeclarationStatement
        | NodeKind::ExpressionStatement
        | NodeKind::ReturnStatement
        | NodeKind::BreakStatement
        | NodeKind::ContinueStatement => statement_rule,
        NodeKind::Field
        | NodeKind::CatchSection
        | NodeKind::BlockStatement
        | NodeKind::CodeBlock
        | NodeKind::Keyword
        | NodeKind::ModifierList
        | NodeKind::ReturnTypeElement
        | NodeKind::Identifier
        | NodeKind::ParameterList
        | NodeKind::Other => return None,
    };
    Some(rule)
}

/// Whether nodes of `kind` produce decorations of their own
pub fn is_decorated(kind: NodeKind) -> bool {
    rule_for(kind).is_some()
}

/// Decorated ranges for `node`.
///
/// Every range lies inside the node, except indent guides which only need to
/// lie inside `text`. A rule producing anything else fails as a whole.
pub fn extract(
    node: Node<'_>,
    text: &LineIndexedText,
    options: ExtractOptions,
) -> Result<Vec<Span>, DecorationError> {
    let Some(rule) = rule_for(node.kind()) else {
        return Ok(Vec::new());
    };

    let mut collector = Collector {
        node,
        text,
        options,
        spans: Vec::new(),
    };
    rule(&mut collector)?;
    Ok(collector.spans)
}

struct Collector<'t, 'a> {
    node: Node<'t>,
    text: &'a LineIndexedText,
    options: ExtractOptions,
    spans: Vec<Span>,
}

impl<'t> Collector<'t, '_> {
    fn push(&mut self, range: ByteRange, category: HighlightCategory) -> Result<(), DecorationError> {
        let extent = self.node.range();
        if !extent.contains(&range) {
            return Err(DecorationError::OutsideExtent {
                node: self.node.id(),
                kind: self.node.kind(),
                range,
                extent,
            });
        }
        self.spans.push(Span { range, category });
        Ok(())
    }

    fn exact(&mut self, node: Option<Node<'t>>, category: HighlightCategory) -> Result<(), DecorationError> {
        match node {
            Some(node) => self.push(node.range(), category),
            None => Ok(()),
        }
    }

    /// Node range extended over the one character that follows it
    fn padded(&mut self, node: Option<Node<'t>>, category: HighlightCategory) -> Result<(), DecorationError> {
        let Some(node) = node else {
            return Ok(());
        };
        let range = node.range();
        let width = self.text.char_len_at(range.end).max(1);
        self.push(range.padded(width), category)
    }

    /// Padded range for every keyword directly under `parent`
    fn keywords(&mut self, parent: Node<'t>, category: HighlightCategory) -> Result<(), DecorationError> {
        for child in parent.children().filter(|c| c.kind() == NodeKind::Keyword) {
            self.padded(Some(child), category)?;
        }
        Ok(())
    }

    fn braces(&mut self, block: Option<Node<'t>>, category: HighlightCategory) -> Result<(), DecorationError> {
        let Some(block) = block else {
            return Ok(());
        };
        self.exact(block.lbrace(), category)?;
        self.exact(block.rbrace(), category)
    }

    fn indent(&mut self, block: Node<'t>, category: HighlightCategory) -> Result<(), DecorationError> {
        if !self.options.indent_guides {
            return Ok(());
        }

        // An empty block has no lines to guide
        let mut statements = block.statements();
        let Some(first) = statements.next() else {
            return Ok(());
        };
        let last = statements.last().unwrap_or(first);
        let body = ByteRange {
            start: first.range().start,
            end: last.range().end,
        };

        let len = self.text.len_bytes();
        for range in indent::measure(self.text, body) {
            if range.end > len {
                return Err(DecorationError::OutsideBuffer {
                    node: self.node.id(),
                    kind: self.node.kind(),
                    range,
                    len,
                });
            }
            self.spans.push(Span { range, category });
        }
        Ok(())
    }

    /// Keywords and block-statement braces shared by loops and ifs
    fn branch_parts(&mut self, category: HighlightCategory, guides: bool) -> Result<(), DecorationError> {
        for child in self.node.children() {
            match child.kind() {
                NodeKind::Keyword => self.padded(Some(child), category)?,
                NodeKind::BlockStatement => {
                    let block = child.code_block();
                    self.braces(block, category)?;
                    if let (true, Some(block)) = (guides, block) {
                        self.indent(block, category)?;
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn parens(&mut self, category: HighlightCategory) -> Result<(), DecorationError> {
        self.exact(self.node.lparen(), category)?;
        self.exact(self.node.rparen(), category)
    }
}

fn import_rule(c: &mut Collector<'_, '_>) -> Result<(), DecorationError> {
    c.push(c.node.range(), HighlightCategory::Import)
}

fn class_rule(c: &mut Collector<'_, '_>) -> Result<(), DecorationError> {
    let category = HighlightCategory::Class;
    let node = c.node;

    for child in node.children() {
        if child.kind() == NodeKind::ModifierList || child.is_keyword("class") {
            c.padded(Some(child), category)?;
        }
    }
    c.exact(node.name(), category)?;
    c.exact(node.lbrace(), category)?;
    c.exact(node.rbrace(), category)?;
    for field in node.fields() {
        c.exact(Some(field), category)?;
    }
    Ok(())
}

fn method_rule(c: &mut Collector<'_, '_>) -> Result<(), DecorationError> {
    let category = HighlightCategory::Method;
    let node = c.node;

    c.padded(node.modifier_list(), category)?;
    c.padded(node.return_type(), category)?;
    c.exact(node.name(), category)?;
    c.exact(node.parameter_list(), category)?;
    c.braces(node.body(), category)
}

fn loop_rule(c: &mut Collector<'_, '_>) -> Result<(), DecorationError> {
    let category = HighlightCategory::Condition;
    let node = c.node;

    c.branch_parts(category, false)?;
    c.exact(node.condition(), category)?;

    if let NodeKind::ConditionalLoop(LoopKind::For) = node.kind() {
        for part in node.initialization().chain(node.update()) {
            c.exact(Some(part), category)?;
        }
    }
    c.parens(category)
}

fn if_rule(c: &mut Collector<'_, '_>) -> Result<(), DecorationError> {
    let category = HighlightCategory::Condition;
    let node = c.node;

    c.branch_parts(category, true)?;
    c.exact(node.condition(), category)?;
    c.parens(category)
}

fn try_rule(c: &mut Collector<'_, '_>) -> Result<(), DecorationError> {
    let category = HighlightCategory::Condition;
    let node = c.node;

    c.keywords(node, category)?;
    c.braces(node.try_block(), category)?;

    for catch in node.catch_sections() {
        c.keywords(catch, category)?;
        c.padded(catch.parameter(), category)?;
        c.exact(catch.lparen(), category)?;
        c.exact(catch.rparen(), category)?;
        c.braces(catch.catch_block(), category)?;
    }
    Ok(())
}

fn statement_rule(c: &mut Collector<'_, '_>) -> Result<(), DecorationError> {
    c.push(c.node.range(), HighlightCategory::Statement)
}
