//! Error types for tree construction, decoration passes, and tree providers

use thiserror::Error;

use crate::tree::{ByteRange, NodeId, NodeKind};

/// Inconsistent input from a tree provider.
///
/// These are contract violations: the engine never clamps a bad range into
/// shape, it reports it back to whoever built the tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("invalid range {start}..{end} (start after end)")]
    InvalidRange { start: usize, end: usize },

    #[error("range {range} exceeds source length {len}")]
    OutOfSource { range: ByteRange, len: usize },

    #[error("node {child} at {range} lies outside its parent {parent} at {parent_range}")]
    ChildOutsideParent {
        child: NodeId,
        range: ByteRange,
        parent: NodeId,
        parent_range: ByteRange,
    },

    #[error("node {owner} links to node {target} which lies outside it")]
    LinkOutsideNode { owner: NodeId, target: NodeId },

    #[error("unknown node id {0}")]
    UnknownNode(NodeId),

    #[error("tree already has a root node")]
    MultipleRoots,

    #[error("tree has no nodes")]
    Empty,
}

/// A single node's decorations could not be produced.
///
/// Reported per node; the traversal carries on with the next node.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecorationError {
    #[error("{kind:?} node {node} produced range {range} outside its extent {extent}")]
    OutsideExtent {
        node: NodeId,
        kind: NodeKind,
        range: ByteRange,
        extent: ByteRange,
    },

    #[error("{kind:?} node {node} produced indent range {range} past the end of the buffer ({len} bytes)")]
    OutsideBuffer {
        node: NodeId,
        kind: NodeKind,
        range: ByteRange,
        len: usize,
    },
}

/// Failure to turn source text into a [`crate::tree::SyntaxTree`].
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("failed to load grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    #[error("parser produced no tree")]
    NoTree,

    #[error(transparent)]
    Tree(#[from] TreeError),
}
