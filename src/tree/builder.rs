//! Incremental construction of a validated [`SyntaxTree`]

use super::{ByteRange, Links, NodeData, NodeId, NodeKind, SyntaxTree};
use crate::error::TreeError;

/// Builds a [`SyntaxTree`] node by node.
///
/// Nodes must be pushed in document order, parents before their children.
/// Every range is checked on the way in; links are checked in [`finish`].
///
/// [`finish`]: SyntaxTreeBuilder::finish
#[derive(Debug)]
pub struct SyntaxTreeBuilder {
    source: String,
    nodes: Vec<NodeData>,
}

impl SyntaxTreeBuilder {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            nodes: Vec::new(),
        }
    }

    /// Append a node under `parent` (or as the root when `parent` is `None`)
    pub fn push(
        &mut self,
        parent: Option<NodeId>,
        kind: NodeKind,
        range: ByteRange,
    ) -> Result<NodeId, TreeError> {
        if range.start > range.end {
            return Err(TreeError::InvalidRange {
                start: range.start,
                end: range.end,
            });
        }
        if range.end > self.source.len() {
            return Err(TreeError::OutOfSource {
                range,
                len: self.source.len(),
            });
        }

        let id = NodeId(self.nodes.len());
        match parent {
            None if !self.nodes.is_empty() => return Err(TreeError::MultipleRoots),
            None => {}
            Some(parent) => {
                let parent_range = self.data(parent)?.range;
                if !parent_range.contains(&range) {
                    return Err(TreeError::ChildOutsideParent {
                        child: id,
                        range,
                        parent,
                        parent_range,
                    });
                }
                self.nodes[parent.0].children.push(id);
            }
        }

        self.nodes.push(NodeData {
            kind,
            range,
            parent,
            children: Vec::new(),
            links: Links::default(),
        });
        Ok(id)
    }

    /// Mutable access to a node's links
    pub fn links_mut(&mut self, id: NodeId) -> Result<&mut Links, TreeError> {
        self.nodes
            .get_mut(id.0)
            .map(|n| &mut n.links)
            .ok_or(TreeError::UnknownNode(id))
    }

    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.nodes.get(id.0).map(|n| n.kind)
    }

    pub fn range(&self, id: NodeId) -> Option<ByteRange> {
        self.nodes.get(id.0).map(|n| n.range)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.0)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn text(&self, id: NodeId) -> &str {
        self.range(id)
            .and_then(|r| self.source.get(r.as_range()))
            .unwrap_or_default()
    }

    /// Validate links and freeze the tree
    pub fn finish(self) -> Result<SyntaxTree, TreeError> {
        if self.nodes.is_empty() {
            return Err(TreeError::Empty);
        }

        for (index, node) in self.nodes.iter().enumerate() {
            let owner = NodeId(index);
            for target in node.links.targets() {
                let target_range = self.data(target)?.range;
                if !node.range.contains(&target_range) {
                    return Err(TreeError::LinkOutsideNode { owner, target });
                }
            }
        }

        Ok(SyntaxTree {
            source: self.source,
            nodes: self.nodes,
        })
    }

    fn data(&self, id: NodeId) -> Result<&NodeData, TreeError> {
        self.nodes.get(id.0).ok_or(TreeError::UnknownNode(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_rejects_range_past_source() {
        let mut builder = SyntaxTreeBuilder::new("abc");
        let err = builder
            .push(None, NodeKind::Other, ByteRange::from_len(0, 4))
            .unwrap_err();
        assert!(matches!(err, TreeError::OutOfSource { len: 3, .. }));
    }

    #[test]
    fn test_push_rejects_inverted_range() {
        let mut builder = SyntaxTreeBuilder::new("abc");
        let err = builder
            .push(None, NodeKind::Other, ByteRange { start: 2, end: 1 })
            .unwrap_err();
        assert_eq!(err, TreeError::InvalidRange { start: 2, end: 1 });
    }

    #[test]
    fn test_push_rejects_child_outside_parent() {
        let mut builder = SyntaxTreeBuilder::new("abcdef");
        let root = builder
            .push(None, NodeKind::Other, ByteRange::from_len(0, 6))
            .unwrap();
        let inner = builder
            .push(Some(root), NodeKind::Other, ByteRange::from_len(1, 2))
            .unwrap();
        let err = builder
            .push(Some(inner), NodeKind::Other, ByteRange::from_len(2, 3))
            .unwrap_err();
        assert!(matches!(err, TreeError::ChildOutsideParent { .. }));
    }

    #[test]
    fn test_second_root_is_rejected() {
        let mut builder = SyntaxTreeBuilder::new("ab");
        builder
            .push(None, NodeKind::Other, ByteRange::from_len(0, 2))
            .unwrap();
        let err = builder
            .push(None, NodeKind::Other, ByteRange::from_len(0, 1))
            .unwrap_err();
        assert_eq!(err, TreeError::MultipleRoots);
    }

    #[test]
    fn test_finish_rejects_link_outside_owner() {
        let mut builder = SyntaxTreeBuilder::new("ab cd");
        let root = builder
            .push(None, NodeKind::Other, ByteRange::from_len(0, 5))
            .unwrap();
        let left = builder
            .push(Some(root), NodeKind::Identifier, ByteRange::from_len(0, 2))
            .unwrap();
        let right = builder
            .push(Some(root), NodeKind::Identifier, ByteRange::from_len(3, 2))
            .unwrap();
        builder.links_mut(left).unwrap().name = Some(right);
        let err = builder.finish().unwrap_err();
        assert_eq!(
            err,
            TreeError::LinkOutsideNode {
                owner: left,
                target: right
            }
        );
    }

    #[test]
    fn test_finish_rejects_unknown_link() {
        let mut builder = SyntaxTreeBuilder::new("ab");
        let root = builder
            .push(None, NodeKind::Other, ByteRange::from_len(0, 2))
            .unwrap();
        builder.links_mut(root).unwrap().body = Some(NodeId(7));
        assert_eq!(
            builder.finish().unwrap_err(),
            TreeError::UnknownNode(NodeId(7))
        );
    }

    #[test]
    fn test_links_mut_rejects_unknown_node() {
        let mut builder = SyntaxTreeBuilder::new("ab");
        let root = builder
            .push(None, NodeKind::Other, ByteRange::from_len(0, 2))
            .unwrap();
        assert!(builder.links_mut(root).is_ok());
        assert_eq!(
            builder.links_mut(NodeId(3)).unwrap_err(),
            TreeError::UnknownNode(NodeId(3))
        );
    }

    #[test]
    fn test_empty_builder_fails() {
        assert_eq!(
            SyntaxTreeBuilder::new("").finish().unwrap_err(),
            TreeError::Empty
        );
    }

    #[test]
    fn test_text_reads_source_slice() {
        let mut builder = SyntaxTreeBuilder::new("while (x)");
        let root = builder
            .push(None, NodeKind::Other, ByteRange::from_len(0, 9))
            .unwrap();
        let kw = builder
            .push(Some(root), NodeKind::Keyword, ByteRange::from_len(0, 5))
            .unwrap();
        assert_eq!(builder.text(kw), "while");
        assert_eq!(builder.children(root), &[kw]);
        assert_eq!(builder.kind(kw), Some(NodeKind::Keyword));
    }
}
