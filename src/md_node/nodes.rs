use crate::md_node::{Node, NodeType};
use std::ops::Deref;

/// An ordered sequence of [Node] handles.
///
/// Every multi-result query returns one of these. It's never absent: "nothing found" is an empty `Nodes`. It derefs to
/// a slice, so the usual `len`, `iter`, indexing and so on are all available.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct Nodes(Vec<Node>);

impl Nodes {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Keeps only the nodes matching `node_type`, in order. [NodeType::Any] keeps everything.
    pub fn filter(&self, node_type: NodeType) -> Nodes {
        self.iter()
            .filter(|node| node.node_type().matches(node_type))
            .cloned()
            .collect()
    }

    /// Keeps only the nodes whose type is not `node_type`, in order.
    ///
    /// This is not a complement of [Nodes::filter]: `not(NodeType::Any)` is always empty.
    pub fn not(&self, node_type: NodeType) -> Nodes {
        if node_type == NodeType::Any {
            return Nodes::new();
        }
        self.iter()
            .filter(|node| node.node_type() != node_type)
            .cloned()
            .collect()
    }

    /// The node at `index`, or a fresh placeholder if `index` is out of range.
    pub fn eq(&self, index: usize) -> Node {
        self.0.get(index).cloned().unwrap_or_else(Node::placeholder)
    }

    pub fn into_vec(self) -> Vec<Node> {
        self.0
    }

    pub(crate) fn push(&mut self, node: Node) {
        self.0.push(node)
    }
}

impl Deref for Nodes {
    type Target = [Node];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Node>> for Nodes {
    fn from(nodes: Vec<Node>) -> Self {
        Self(nodes)
    }
}

impl FromIterator<Node> for Nodes {
    fn from_iter<T: IntoIterator<Item = Node>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Node> for Nodes {
    fn extend<T: IntoIterator<Item = Node>>(&mut self, iter: T) {
        self.0.extend(iter)
    }
}

impl IntoIterator for Nodes {
    type Item = Node;
    type IntoIter = std::vec::IntoIter<Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Nodes {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
