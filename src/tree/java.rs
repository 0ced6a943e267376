//! Java tree provider backed by tree-sitter-java
//!
//! Lowers a tree-sitter parse tree into a [`SyntaxTree`]. Besides mapping node
//! kinds, lowering reshapes a few constructs so the engine sees the structure
//! it expects:
//!
//! - a `block` in statement position is wrapped in a synthetic
//!   [`NodeKind::BlockStatement`]; method, try and catch bodies stay bare
//! - `finally_clause` is flattened into its try statement
//! - parenthesized conditions are split into `lparen`, condition and `rparen`
//! - a method without modifiers gets an empty ModifierList at its start
//! - `new T() { ... }` with a class body becomes a nameless ClassDecl

use tree_sitter::{Node as TsNode, Parser, Tree};

use super::{ByteRange, Links, LoopKind, NodeId, NodeKind, SyntaxTree, SyntaxTreeBuilder, TreeProvider};
use crate::error::{ProviderError, TreeError};

/// Parent kinds in which a `block` child is a statement rather than a body
const STATEMENT_CONTEXTS: &[&str] = &[
    "block",
    "constructor_body",
    "while_statement",
    "do_statement",
    "for_statement",
    "enhanced_for_statement",
    "if_statement",
    "labeled_statement",
    "switch_block_statement_group",
];

/// Parses Java source into [`SyntaxTree`]s
pub struct JavaTreeProvider {
    parser: Parser,
}

impl JavaTreeProvider {
    pub fn new() -> Result<Self, ProviderError> {
        let language: tree_sitter::Language = tree_sitter_java::LANGUAGE.into();
        let mut parser = Parser::new();
        parser.set_language(&language)?;
        Ok(Self { parser })
    }
}

impl TreeProvider for JavaTreeProvider {
    fn parse(&mut self, source: &str) -> Result<SyntaxTree, ProviderError> {
        let tree = self.parser.parse(source, None).ok_or(ProviderError::NoTree)?;
        let lowered = lower_tree(&tree, source)?;
        tracing::debug!(
            nodes = lowered.len(),
            bytes = source.len(),
            has_error = tree.root_node().has_error(),
            "Lowered Java tree"
        );
        Ok(lowered)
    }
}

/// Lower an already-parsed tree-sitter tree over `source`
pub fn lower_tree(tree: &Tree, source: &str) -> Result<SyntaxTree, TreeError> {
    let mut lowering = Lowering {
        builder: SyntaxTreeBuilder::new(source),
    };
    lowering.lower(tree.root_node(), None, None, "")?;
    lowering.builder.finish()
}

/// A lowered child together with its tree-sitter node
struct Lowered<'n> {
    id: NodeId,
    field: Option<&'static str>,
    node: TsNode<'n>,
}

impl Lowered<'_> {
    fn kind(&self) -> &'static str {
        self.node.kind()
    }

    fn named(&self) -> bool {
        self.node.is_named()
    }

    fn extra(&self) -> bool {
        self.node.is_extra()
    }
}

struct Lowering {
    builder: SyntaxTreeBuilder,
}

impl Lowering {
    fn lower(
        &mut self,
        node: TsNode<'_>,
        parent: Option<NodeId>,
        field: Option<&'static str>,
        parent_kind: &str,
    ) -> Result<NodeId, TreeError> {
        let range = ByteRange::new(node.start_byte(), node.end_byte())?;
        let kind = classify(&node, field, parent_kind);

        if node.kind() == "block" && STATEMENT_CONTEXTS.contains(&parent_kind) {
            let wrapper = self.builder.push(parent, NodeKind::BlockStatement, range)?;
            let block = self.lower_as(node, Some(wrapper), kind, range)?;
            self.builder.links_mut(wrapper)?.code_block = Some(block);
            return Ok(wrapper);
        }

        self.lower_as(node, parent, kind, range)
    }

    fn lower_as(
        &mut self,
        node: TsNode<'_>,
        parent: Option<NodeId>,
        kind: NodeKind,
        range: ByteRange,
    ) -> Result<NodeId, TreeError> {
        let id = self.builder.push(parent, kind, range)?;

        // tree-sitter omits `modifiers` when there are none
        let empty_modifiers = if kind == NodeKind::MethodDecl && !has_child(node, "modifiers") {
            let at = ByteRange::from_len(range.start, 0);
            Some(self.builder.push(Some(id), NodeKind::ModifierList, at)?)
        } else {
            None
        };

        let children = self.lower_children(node, id)?;
        let mut links = links_for(&self.builder, kind, &children);
        if links.modifier_list.is_none() {
            links.modifier_list = empty_modifiers;
        }
        *self.builder.links_mut(id)? = links;
        Ok(id)
    }

    fn lower_children<'n>(
        &mut self,
        node: TsNode<'n>,
        id: NodeId,
    ) -> Result<Vec<Lowered<'n>>, TreeError> {
        let mut lowered = Vec::new();
        let mut cursor = node.walk();
        if !cursor.goto_first_child() {
            return Ok(lowered);
        }

        loop {
            let child = cursor.node();
            let field = cursor.field_name();
            if child.kind() == "finally_clause" {
                lowered.extend(self.lower_children(child, id)?);
            } else {
                let child_id = self.lower(child, Some(id), field, node.kind())?;
                lowered.push(Lowered {
                    id: child_id,
                    field,
                    node: child,
                });
            }

            if !cursor.goto_next_sibling() {
                break;
            }
        }

        Ok(lowered)
    }
}

fn classify(node: &TsNode<'_>, field: Option<&str>, parent_kind: &str) -> NodeKind {
    if field == Some("type") && parent_kind == "method_declaration" {
        return NodeKind::ReturnTypeElement;
    }

    match node.kind() {
        "import_declaration" => NodeKind::Import,
        "class_declaration" | "interface_declaration" | "enum_declaration"
        | "record_declaration" => NodeKind::ClassDecl,
        "object_creation_expression" if has_child(*node, "class_body") => NodeKind::ClassDecl,
        "method_declaration" | "constructor_declaration" => NodeKind::MethodDecl,
        "field_declaration" | "constant_declaration" | "enum_constant" => NodeKind::Field,
        "while_statement" => NodeKind::ConditionalLoop(LoopKind::While),
        "do_statement" => NodeKind::ConditionalLoop(LoopKind::DoWhile),
        "for_statement" => NodeKind::ConditionalLoop(LoopKind::For),
        "if_statement" => NodeKind::If,
        "try_statement" | "try_with_resources_statement" => NodeKind::Try,
        "catch_clause" => NodeKind::CatchSection,
        "block" | "constructor_body" => NodeKind::CodeBlock,
        "modifiers" => NodeKind::ModifierList,
        "formal_parameters" => NodeKind::ParameterList,
        "identifier" => NodeKind::Identifier,
        "local_variable_declaration" => NodeKind::DeclarationStatement,
        "expression_statement" | "explicit_constructor_invocation" => {
            NodeKind::ExpressionStatement
        }
        "return_statement" => NodeKind::ReturnStatement,
        "break_statement" => NodeKind::BreakStatement,
        "continue_statement" => NodeKind::ContinueStatement,
        kind if !node.is_named()
            && !kind.is_empty()
            && kind.bytes().all(|b| b.is_ascii_alphabetic()) =>
        {
            NodeKind::Keyword
        }
        _ => NodeKind::Other,
    }
}

fn links_for(builder: &SyntaxTreeBuilder, kind: NodeKind, children: &[Lowered<'_>]) -> Links {
    let field = |name: &str| {
        children
            .iter()
            .find(|c| c.field == Some(name))
            .map(|c| c.id)
    };
    let all_fields = |name: &str| {
        children
            .iter()
            .filter(|c| c.field == Some(name))
            .map(|c| c.id)
            .collect::<Vec<_>>()
    };
    let ts_kind = |name: &str| children.iter().find(|c| c.kind() == name);
    let token = |text: &str| {
        children
            .iter()
            .find(|c| !c.named() && builder.text(c.id) == text)
            .map(|c| c.id)
    };
    let last_token = |text: &str| {
        children
            .iter()
            .rev()
            .find(|c| !c.named() && builder.text(c.id) == text)
            .map(|c| c.id)
    };

    let mut links = Links::default();
    match kind {
        NodeKind::ClassDecl => {
            links.name = field("name");
            // anonymous class bodies carry no field name
            let body = field("body").or_else(|| ts_kind("class_body").map(|c| c.id));
            if let Some(body) = body {
                let (lbrace, rbrace) = braces(builder, body);
                links.lbrace = lbrace;
                links.rbrace = rbrace;
                links.fields = class_fields(builder, body);
            }
        }
        NodeKind::MethodDecl => {
            let of_kind = |kind: NodeKind| {
                children
                    .iter()
                    .find(|c| builder.kind(c.id) == Some(kind))
                    .map(|c| c.id)
            };
            links.modifier_list = of_kind(NodeKind::ModifierList);
            links.return_type = of_kind(NodeKind::ReturnTypeElement);
            links.name = field("name");
            links.parameter_list = field("parameters");
            links.body = field("body");
        }
        NodeKind::CodeBlock => {
            links.lbrace = token("{");
            links.rbrace = last_token("}");
            links.statements = children
                .iter()
                .filter(|c| c.named() && !c.extra())
                .map(|c| c.id)
                .collect();
        }
        NodeKind::ConditionalLoop(LoopKind::For) => {
            links.initialization = all_fields("init");
            links.condition = field("condition");
            links.update = all_fields("update");
            links.lparen = token("(");
            links.rparen = last_token(")");
            links.body = field("body");
        }
        NodeKind::ConditionalLoop(_) | NodeKind::If => {
            if let Some(condition) = children.iter().find(|c| c.field == Some("condition")) {
                if condition.kind() == "parenthesized_expression" {
                    let (lparen, inner, rparen) = parenthesized(builder, condition);
                    links.lparen = lparen;
                    links.condition = inner;
                    links.rparen = rparen;
                } else {
                    links.condition = Some(condition.id);
                }
            }
            links.body = field("body").or_else(|| field("consequence"));
        }
        NodeKind::Try => {
            links.try_block = field("body");
            links.catch_sections = children
                .iter()
                .filter(|c| c.kind() == "catch_clause")
                .map(|c| c.id)
                .collect();
        }
        NodeKind::CatchSection => {
            links.parameter = ts_kind("catch_formal_parameter").map(|c| c.id);
            links.lparen = token("(");
            links.rparen = last_token(")");
            links.catch_block = field("body");
        }
        _ => {}
    }
    links
}

fn braces(builder: &SyntaxTreeBuilder, body: NodeId) -> (Option<NodeId>, Option<NodeId>) {
    let children = builder.children(body);
    let lbrace = children.iter().copied().find(|&c| builder.text(c) == "{");
    let rbrace = children.iter().copied().rev().find(|&c| builder.text(c) == "}");
    (lbrace, rbrace)
}

fn has_child(node: TsNode<'_>, kind: &str) -> bool {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).any(|c| c.kind() == kind);
    found
}

/// Fields directly in a class body, enum constants included, plus fields in
/// an enum's trailing declarations
fn class_fields(builder: &SyntaxTreeBuilder, body: NodeId) -> Vec<NodeId> {
    let is_field = |id: NodeId| builder.kind(id) == Some(NodeKind::Field);
    let mut fields = Vec::new();
    for &child in builder.children(body) {
        match builder.kind(child) {
            Some(NodeKind::Field) => fields.push(child),
            Some(NodeKind::Other) => fields.extend(
                builder
                    .children(child)
                    .iter()
                    .copied()
                    .filter(|&c| is_field(c)),
            ),
            _ => {}
        }
    }
    fields
}

/// `(`, inner expression and `)` of a parenthesized condition. Comments
/// between the parentheses are skipped.
fn parenthesized(
    builder: &SyntaxTreeBuilder,
    condition: &Lowered<'_>,
) -> (Option<NodeId>, Option<NodeId>, Option<NodeId>) {
    let mut cursor = condition.node.walk();
    let parts: Vec<(NodeId, TsNode<'_>)> = builder
        .children(condition.id)
        .iter()
        .copied()
        .zip(condition.node.children(&mut cursor))
        .filter(|(_, ts)| !ts.is_extra())
        .collect();

    let lparen = parts.iter().find(|(_, ts)| ts.kind() == "(").map(|p| p.0);
    let rparen = parts.iter().rev().find(|(_, ts)| ts.kind() == ")").map(|p| p.0);
    let inner = parts.iter().find(|(_, ts)| ts.is_named()).map(|p| p.0);
    (lparen, inner, rparen)
}
