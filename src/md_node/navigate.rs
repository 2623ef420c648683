use crate::md_node::{Node, NodeType, Nodes};

impl Node {
    /// The immediate parent, or `None` for a root (or a placeholder).
    ///
    /// A node that was [removed](Node::remove) still reports its old parent, as long as that parent is alive.
    pub fn parent(&self) -> Option<Node> {
        self.data().parent.upgrade().map(Node)
    }

    /// Every ancestor, nearest first, up to and including the root.
    pub fn parents(&self) -> Nodes {
        self.parents_until(NodeType::Any)
    }

    /// The contiguous run of ancestors, nearest first, whose type matches `node_type`.
    ///
    /// The walk stops at (and excludes) the first ancestor that does *not* match. That's the inverse of the usual DOM
    /// "until": `parents_until(NodeType::ListItem)` on a paragraph nested in list items collects those list items, and
    /// stops at the list that contains them. With [NodeType::Any], this is the same as [Node::parents].
    pub fn parents_until(&self, node_type: NodeType) -> Nodes {
        let mut parents = Nodes::new();
        let mut current = self.parent();
        while let Some(parent) = current {
            if !parent.node_type().matches(node_type) {
                break;
            }
            current = parent.parent();
            parents.push(parent);
        }
        parents
    }

    /// With [NodeType::Any], every other child of this node's parent.
    ///
    /// With any other type, this returns this node's own children that have that type (not its siblings!). Use
    /// [Node::type_siblings] to filter actual siblings by type.
    pub fn siblings(&self, node_type: NodeType) -> Nodes {
        if node_type == NodeType::Any {
            return self.type_siblings(NodeType::Any);
        }
        self.children(node_type)
            .into_iter()
            .filter(|child| child != self)
            .collect()
    }

    /// Every other child of this node's parent that matches `node_type`.
    pub fn type_siblings(&self, node_type: NodeType) -> Nodes {
        let Some(parent) = self.parent() else {
            return Nodes::new();
        };
        let siblings = parent.data();
        siblings
            .children
            .iter()
            .filter(|sibling| *sibling != self && sibling.node_type().matches(node_type))
            .cloned()
            .collect()
    }

    /// The nearest following sibling with the same type as this node, or a placeholder.
    pub fn next(&self) -> Node {
        self.scan_siblings(Direction::Forward, None)
            .into_iter()
            .next()
            .unwrap_or_else(Node::placeholder)
    }

    /// The nearest preceding sibling with the same type as this node, or a placeholder.
    pub fn prev(&self) -> Node {
        self.scan_siblings(Direction::Backward, None)
            .into_iter()
            .next()
            .unwrap_or_else(Node::placeholder)
    }

    /// All following siblings with the same type as this node, in document order.
    pub fn next_all(&self) -> Nodes {
        self.scan_siblings(Direction::Forward, None)
    }

    /// All preceding siblings with the same type as this node, nearest first.
    pub fn prev_all(&self) -> Nodes {
        self.scan_siblings(Direction::Backward, None)
    }

    /// Following siblings with the same type as this node, stopping before the first sibling whose type is exactly
    /// `stop_at`.
    ///
    /// `stop_at` is compared by equality, so [NodeType::Any] never stops the scan.
    pub fn next_until(&self, stop_at: NodeType) -> Nodes {
        self.scan_siblings(Direction::Forward, Some(stop_at))
    }

    /// Preceding siblings with the same type as this node, nearest first, stopping before the first sibling whose
    /// type is exactly `stop_at`.
    pub fn prev_until(&self, stop_at: NodeType) -> Nodes {
        self.scan_siblings(Direction::Backward, Some(stop_at))
    }

    /// The first direct child matching `node_type`, or a placeholder.
    pub fn first(&self, node_type: NodeType) -> Node {
        self.data()
            .children
            .iter()
            .find(|child| child.node_type().matches(node_type))
            .cloned()
            .unwrap_or_else(Node::placeholder)
    }

    /// The last direct child matching `node_type`, or a placeholder.
    pub fn last(&self, node_type: NodeType) -> Node {
        self.data()
            .children
            .iter()
            .rev()
            .find(|child| child.node_type().matches(node_type))
            .cloned()
            .unwrap_or_else(Node::placeholder)
    }

    /// Same-type siblings on one side of this node, nearest first.
    ///
    /// A node with no parent, or one its parent no longer lists, has no siblings.
    fn scan_siblings(&self, direction: Direction, stop_at: Option<NodeType>) -> Nodes {
        let Some(parent) = self.parent() else {
            return Nodes::new();
        };
        let Some(idx) = self.index_in(&parent) else {
            return Nodes::new();
        };
        let own_type = self.node_type();
        let family = parent.data();
        let candidates: Vec<&Node> = match direction {
            Direction::Forward => family.children[idx + 1..].iter().collect(),
            Direction::Backward => family.children[..idx].iter().rev().collect(),
        };

        let mut found = Nodes::new();
        for sibling in candidates {
            let sibling_type = sibling.node_type();
            if Some(sibling_type) == stop_at {
                break;
            }
            if sibling_type == own_type {
                found.push(sibling.clone());
            }
        }
        found
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}
