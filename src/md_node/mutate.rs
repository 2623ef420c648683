use crate::md_node::Node;
use std::fmt::{Display, Formatter};

/// A structural mutation that was rejected because the tree wasn't in the shape it requires.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TreeError {
    /// The node has no parent (it's a root, or its parent has been dropped).
    NoParent,
    /// The node's parent no longer lists it as a child; typically because it was already removed.
    NotAChild,
    /// The insertion would make a node its own ancestor.
    Cycle,
    /// Placeholders are stand-ins for "not found"; they can't be attached to, or inserted into, a tree.
    Placeholder,
}

impl Display for TreeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TreeError::NoParent => f.write_str("node has no parent"),
            TreeError::NotAChild => f.write_str("node is not among its parent's children"),
            TreeError::Cycle => f.write_str("node can't be inserted into its own subtree"),
            TreeError::Placeholder => f.write_str("placeholder nodes can't be part of a tree"),
        }
    }
}

impl std::error::Error for TreeError {}

impl Node {
    /// Adds `node` as this node's last child.
    ///
    /// `node` is not detached from any previous parent; if it has one, [remove](Node::remove) it first.
    pub fn append(&self, node: &Node) -> Result<(), TreeError> {
        self.check_insert(node)?;
        node.set_parent(self);
        self.data_mut().children.push(node.clone());
        Ok(())
    }

    /// Adds `node` as this node's first child.
    ///
    /// As with [Node::append], `node` is not detached from any previous parent.
    pub fn prepend(&self, node: &Node) -> Result<(), TreeError> {
        self.check_insert(node)?;
        node.set_parent(self);
        self.data_mut().children.insert(0, node.clone());
        Ok(())
    }

    /// Inserts `node` into this node's parent, immediately after this node.
    pub fn after(&self, node: &Node) -> Result<(), TreeError> {
        let (parent, idx) = self.attached_position()?;
        parent.check_insert(node)?;
        node.set_parent(&parent);
        parent.data_mut().children.insert(idx + 1, node.clone());
        Ok(())
    }

    /// Inserts `node` into this node's parent, immediately before this node.
    pub fn before(&self, node: &Node) -> Result<(), TreeError> {
        let (parent, idx) = self.attached_position()?;
        parent.check_insert(node)?;
        node.set_parent(&parent);
        parent.data_mut().children.insert(idx, node.clone());
        Ok(())
    }

    /// Detaches this node from its parent's children.
    ///
    /// This node keeps its back-reference: [Node::parent] still reports the old parent afterward. Don't use `parent()`
    /// to detect whether a node is attached.
    pub fn remove(&self) -> Result<(), TreeError> {
        let (parent, idx) = self.attached_position()?;
        parent.data_mut().children.remove(idx);
        Ok(())
    }

    /// Detaches all of this node's children.
    ///
    /// As with [Node::remove], the detached children keep pointing at this node as their parent.
    pub fn empty(&self) {
        self.data_mut().children.clear();
    }

    fn attached_position(&self) -> Result<(Node, usize), TreeError> {
        let parent = self.parent().ok_or(TreeError::NoParent).inspect_err(|err| {
            tracing::debug!(node = ?self, "rejected sibling mutation: {err}");
        })?;
        let idx = self.index_in(&parent).ok_or(TreeError::NotAChild).inspect_err(|err| {
            tracing::debug!(node = ?self, "rejected sibling mutation: {err}");
        })?;
        Ok((parent, idx))
    }

    /// Checks that `node` may become a child of `self`.
    fn check_insert(&self, node: &Node) -> Result<(), TreeError> {
        let result = if self.is_placeholder() || node.is_placeholder() {
            Err(TreeError::Placeholder)
        } else if node == self || self.parents().contains(node) {
            Err(TreeError::Cycle)
        } else {
            Ok(())
        };
        if let Err(err) = &result {
            tracing::debug!(parent = ?self, child = ?node, "rejected insert: {err}");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use crate::md_node::*;
    use crate::util::utils_for_test::*;

    fn abc() -> (Node, Node, Node, Node) {
        let root = md_tree!(Document [Paragraph, Paragraph, Paragraph]);
        let children = root.children(NodeType::Any);
        (root.clone(), children.eq(0), children.eq(1), children.eq(2))
    }

    #[test]
    fn append_then_last() {
        let (root, ..) = abc();
        let x = Node::of_type(NodeType::Title);
        root.append(&x).unwrap();
        assert_eq!(root.last(NodeType::Any), x);
        assert_eq!(root.children(NodeType::Any).len(), 4);
        assert_eq!(x.parent(), Some(root));
    }

    #[test]
    fn prepend_then_first() {
        let (root, a, ..) = abc();
        let x = Node::of_type(NodeType::Title);
        root.prepend(&x).unwrap();
        assert_eq!(root.first(NodeType::Any), x);
        assert_eq!(root.children(NodeType::Any).eq(1), a);
        assert_eq!(x.parent(), Some(root));
    }

    #[test]
    fn append_to_empty_node() {
        let list = Node::of_type(NodeType::UnorderedList);
        let item = Node::new(NodeConfig {
            node_type: NodeType::ListItem,
            value: "test".to_string(),
            text: "test".to_string(),
            html: "test".to_string(),
        });
        list.append(&item).unwrap();
        assert_eq!(list.first(NodeType::ListItem), item);
        assert_eq!(list.last(NodeType::ListItem), item);
    }

    #[test]
    fn remove_middle() {
        let (root, a, b, c) = abc();
        b.remove().unwrap();
        assert_eq!(root.children(NodeType::Any), Nodes::from(vec![a.clone(), c.clone()]));
        assert_eq!(a.next(), c);
        // the removed node still points at its old parent
        assert_eq!(b.parent(), Some(root));
    }

    #[test]
    fn remove_twice() {
        let (_root, _, b, _) = abc();
        b.remove().unwrap();
        assert_eq!(b.remove(), Err(TreeError::NotAChild));
        assert_eq!(b.after(&Node::of_type(NodeType::Text)), Err(TreeError::NotAChild));
    }

    #[test]
    fn remove_root() {
        let (root, ..) = abc();
        assert_eq!(root.remove(), Err(TreeError::NoParent));
        assert_eq!(Node::placeholder().remove(), Err(TreeError::NoParent));
    }

    #[test]
    fn after_and_before() {
        let (root, a, b, c) = abc();
        b.remove().unwrap();

        a.after(&b).unwrap();
        assert_eq!(
            root.children(NodeType::Any),
            Nodes::from(vec![a.clone(), b.clone(), c.clone()])
        );

        let b2 = Node::of_type(NodeType::Paragraph);
        c.before(&b2).unwrap();
        assert_eq!(c.prev(), b2);
        assert_eq!(
            root.children(NodeType::Any),
            Nodes::from(vec![a, b, b2.clone(), c])
        );
        assert_eq!(b2.parent(), Some(root));
    }

    #[test]
    fn after_last_and_before_first() {
        let (root, a, _, c) = abc();
        let end = Node::of_type(NodeType::Title);
        let start = Node::of_type(NodeType::Title);
        c.after(&end).unwrap();
        a.before(&start).unwrap();
        assert_eq!(root.last(NodeType::Any), end);
        assert_eq!(root.first(NodeType::Any), start);
        assert_eq!(root.children(NodeType::Any).len(), 5);
    }

    #[test]
    fn after_on_root() {
        let (root, ..) = abc();
        assert_eq!(root.after(&Node::of_type(NodeType::Text)), Err(TreeError::NoParent));
        assert_eq!(root.before(&Node::of_type(NodeType::Text)), Err(TreeError::NoParent));
    }

    #[test]
    fn empty_keeps_back_references() {
        let (root, a, ..) = abc();
        root.empty();
        assert!(root.children(NodeType::Any).is_empty());
        assert!(root.first(NodeType::Any).is_placeholder());
        assert_eq!(a.parent(), Some(root.clone()));

        root.empty();
        assert!(root.children(NodeType::Any).is_empty());
    }

    #[test]
    fn cycles_rejected() {
        let (root, a, ..) = abc();
        assert_eq!(a.append(&root), Err(TreeError::Cycle));
        assert_eq!(a.append(&a), Err(TreeError::Cycle));
        assert_eq!(a.prepend(&root), Err(TreeError::Cycle));

        let grandchild = Node::of_type(NodeType::Text);
        a.append(&grandchild).unwrap();
        assert_eq!(grandchild.after(&root), Err(TreeError::Cycle));
        assert_eq!(grandchild.before(&a), Err(TreeError::Cycle));
        assert_eq!(a.children(NodeType::Any), Nodes::from(vec![grandchild]));
    }

    #[test]
    fn placeholders_rejected() {
        let (root, a, ..) = abc();
        assert_eq!(root.append(&Node::placeholder()), Err(TreeError::Placeholder));
        assert_eq!(a.after(&Node::placeholder()), Err(TreeError::Placeholder));
        assert_eq!(
            Node::placeholder().append(&Node::of_type(NodeType::Text)),
            Err(TreeError::Placeholder)
        );
        assert_eq!(root.children(NodeType::Any).len(), 3);
    }

    #[test]
    fn error_messages() {
        assert_eq!(TreeError::NotAChild.to_string(), "node is not among its parent's children");
        assert_eq!(TreeError::Cycle.to_string(), "node can't be inserted into its own subtree");
    }
}
