//! Syntax tree model consumed by the decoration engine
//!
//! Trees are produced by a provider (see [`java`]) and only read here. Nodes
//! live in an arena owned by [`SyntaxTree`]; a [`Node`] is a cheap borrowed
//! handle into it, so nothing the engine holds can outlive the pass.
//!
//! Kind-specific accessors (braces, parentheses, condition, ...) are stored as
//! optional links to other nodes. A missing link is never an error.

mod builder;
pub mod java;

use std::fmt;

use serde::Serialize;

pub use builder::SyntaxTreeBuilder;

use crate::error::ProviderError;

/// Source of syntax trees for one language.
///
/// The engine never parses; hosts hand it trees from an implementation of
/// this trait (or build them directly with [`SyntaxTreeBuilder`]).
pub trait TreeProvider {
    fn parse(&mut self, source: &str) -> Result<SyntaxTree, ProviderError>;
}

/// Half-open byte range `start..end` into the source buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
pub struct ByteRange {
    pub start: usize,
    pub end: usize,
}

impl ByteRange {
    /// Create a range, rejecting `start > end`
    pub fn new(start: usize, end: usize) -> Result<Self, crate::error::TreeError> {
        if start > end {
            return Err(crate::error::TreeError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Range of `len` bytes starting at `start`
    pub const fn from_len(start: usize, len: usize) -> Self {
        Self {
            start,
            end: start + len,
        }
    }

    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Same start, `extra` more bytes at the end
    pub const fn padded(&self, extra: usize) -> Self {
        Self {
            start: self.start,
            end: self.end + extra,
        }
    }

    /// Whether `other` lies entirely inside this range
    pub const fn contains(&self, other: &ByteRange) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    /// Whether the two ranges share at least one byte
    pub const fn overlaps(&self, other: &ByteRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub const fn as_range(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

impl fmt::Display for ByteRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Index of a node in its tree's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which flavour of conditional loop a node is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoopKind {
    While,
    DoWhile,
    For,
}

/// Closed set of node kinds the engine distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Import,
    ClassDecl,
    MethodDecl,
    Field,
    ConditionalLoop(LoopKind),
    If,
    Try,
    CatchSection,
    /// A code block used in statement position (loop and branch bodies)
    BlockStatement,
    CodeBlock,
    Keyword,
    ModifierList,
    ReturnTypeElement,
    Identifier,
    ParameterList,
    DeclarationStatement,
    ExpressionStatement,
    ReturnStatement,
    BreakStatement,
    ContinueStatement,
    Other,
}

/// Optional links from a node to related nodes.
///
/// Which links are populated depends on the node kind; everything defaults to
/// absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Links {
    pub name: Option<NodeId>,
    pub modifier_list: Option<NodeId>,
    pub return_type: Option<NodeId>,
    pub parameter_list: Option<NodeId>,
    pub body: Option<NodeId>,
    pub condition: Option<NodeId>,
    pub lparen: Option<NodeId>,
    pub rparen: Option<NodeId>,
    pub lbrace: Option<NodeId>,
    pub rbrace: Option<NodeId>,
    pub parameter: Option<NodeId>,
    pub try_block: Option<NodeId>,
    pub catch_block: Option<NodeId>,
    pub code_block: Option<NodeId>,
    pub initialization: Vec<NodeId>,
    pub update: Vec<NodeId>,
    pub fields: Vec<NodeId>,
    pub statements: Vec<NodeId>,
    pub catch_sections: Vec<NodeId>,
}

impl Links {
    /// Every linked node id, in no particular order
    pub(crate) fn targets(&self) -> impl Iterator<Item = NodeId> + '_ {
        [
            self.name,
            self.modifier_list,
            self.return_type,
            self.parameter_list,
            self.body,
            self.condition,
            self.lparen,
            self.rparen,
            self.lbrace,
            self.rbrace,
            self.parameter,
            self.try_block,
            self.catch_block,
            self.code_block,
        ]
        .into_iter()
        .flatten()
        .chain(self.initialization.iter().copied())
        .chain(self.update.iter().copied())
        .chain(self.fields.iter().copied())
        .chain(self.statements.iter().copied())
        .chain(self.catch_sections.iter().copied())
    }
}

#[derive(Debug, Clone)]
pub(crate) struct NodeData {
    pub(crate) kind: NodeKind,
    pub(crate) range: ByteRange,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) links: Links,
}

/// An immutable, validated syntax tree over a source buffer
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    source: String,
    nodes: Vec<NodeData>,
}

impl SyntaxTree {
    pub fn root(&self) -> Node<'_> {
        Node {
            tree: self,
            id: NodeId(0),
        }
    }

    /// Handle for `id`, if it belongs to this tree
    pub fn node(&self, id: NodeId) -> Option<Node<'_>> {
        (id.0 < self.nodes.len()).then_some(Node { tree: self, id })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Document-order (parent before children) walk over every node
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder {
            tree: self,
            stack: vec![NodeId(0)],
        }
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }
}

/// Borrowed handle to one node of a [`SyntaxTree`]
#[derive(Clone, Copy)]
pub struct Node<'t> {
    tree: &'t SyntaxTree,
    id: NodeId,
}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("kind", &self.kind())
            .field("range", &self.range())
            .finish()
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for Node<'_> {}

impl<'t> Node<'t> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.tree.data(self.id).kind
    }

    pub fn range(&self) -> ByteRange {
        self.tree.data(self.id).range
    }

    /// Source text covered by this node
    pub fn text(&self) -> &'t str {
        self.tree
            .source
            .get(self.range().as_range())
            .unwrap_or_default()
    }

    pub fn parent(&self) -> Option<Node<'t>> {
        self.tree
            .data(self.id)
            .parent
            .map(|id| self.handle(id))
    }

    pub fn children(&self) -> impl Iterator<Item = Node<'t>> + 't {
        handles(self.tree, &self.tree.data(self.id).children)
    }

    /// Whether this is a keyword token spelling exactly `word`
    pub fn is_keyword(&self, word: &str) -> bool {
        self.kind() == NodeKind::Keyword && self.text() == word
    }

    pub fn name(&self) -> Option<Node<'t>> {
        self.link(|l| l.name)
    }

    pub fn modifier_list(&self) -> Option<Node<'t>> {
        self.link(|l| l.modifier_list)
    }

    pub fn return_type(&self) -> Option<Node<'t>> {
        self.link(|l| l.return_type)
    }

    pub fn parameter_list(&self) -> Option<Node<'t>> {
        self.link(|l| l.parameter_list)
    }

    pub fn body(&self) -> Option<Node<'t>> {
        self.link(|l| l.body)
    }

    pub fn condition(&self) -> Option<Node<'t>> {
        self.link(|l| l.condition)
    }

    /// Initializers of a `for` header; a comma list yields one node each
    pub fn initialization(&self) -> impl Iterator<Item = Node<'t>> + 't {
        handles(self.tree, &self.tree.data(self.id).links.initialization)
    }

    /// Update expressions of a `for` header
    pub fn update(&self) -> impl Iterator<Item = Node<'t>> + 't {
        handles(self.tree, &self.tree.data(self.id).links.update)
    }

    pub fn lparen(&self) -> Option<Node<'t>> {
        self.link(|l| l.lparen)
    }

    pub fn rparen(&self) -> Option<Node<'t>> {
        self.link(|l| l.rparen)
    }

    pub fn lbrace(&self) -> Option<Node<'t>> {
        self.link(|l| l.lbrace)
    }

    pub fn rbrace(&self) -> Option<Node<'t>> {
        self.link(|l| l.rbrace)
    }

    pub fn parameter(&self) -> Option<Node<'t>> {
        self.link(|l| l.parameter)
    }

    pub fn try_block(&self) -> Option<Node<'t>> {
        self.link(|l| l.try_block)
    }

    pub fn catch_block(&self) -> Option<Node<'t>> {
        self.link(|l| l.catch_block)
    }

    /// The code block wrapped by a block statement
    pub fn code_block(&self) -> Option<Node<'t>> {
        self.link(|l| l.code_block)
    }

    /// Fields declared in a class body
    pub fn fields(&self) -> impl Iterator<Item = Node<'t>> + 't {
        handles(self.tree, &self.tree.data(self.id).links.fields)
    }

    /// Statements of a code block, in document order
    pub fn statements(&self) -> impl Iterator<Item = Node<'t>> + 't {
        handles(self.tree, &self.tree.data(self.id).links.statements)
    }

    pub fn catch_sections(&self) -> impl Iterator<Item = Node<'t>> + 't {
        handles(self.tree, &self.tree.data(self.id).links.catch_sections)
    }

    fn handle(&self, id: NodeId) -> Node<'t> {
        Node {
            tree: self.tree,
            id,
        }
    }

    fn link(&self, pick: impl FnOnce(&Links) -> Option<NodeId>) -> Option<Node<'t>> {
        pick(&self.tree.data(self.id).links).map(|id| self.handle(id))
    }
}

fn handles<'t>(tree: &'t SyntaxTree, ids: &'t [NodeId]) -> impl Iterator<Item = Node<'t>> + 't {
    ids.iter().map(move |&id| Node { tree, id })
}

/// Pre-order iterator returned by [`SyntaxTree::preorder`]
pub struct Preorder<'t> {
    tree: &'t SyntaxTree,
    stack: Vec<NodeId>,
}

impl<'t> Iterator for Preorder<'t> {
    type Item = Node<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.data(id).children.iter().rev().copied());
        Some(Node {
            tree: self.tree,
            id,
        })
    }
}
