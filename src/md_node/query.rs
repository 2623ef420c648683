use crate::md_node::{Node, NodeType, Nodes};

impl Node {
    /// Searches the whole subtree rooted here, including this node itself, in pre-order.
    ///
    /// This is the usual entry point: call it on the document root to search the entire document.
    pub fn gquery(&self, node_type: NodeType) -> Nodes {
        let mut found = Nodes::new();
        self.gquery_into(node_type, &mut found);
        found
    }

    /// Searches every descendant, but never this node itself.
    ///
    /// With [NodeType::Any], this returns only the immediate children, not every descendant.
    pub fn find(&self, node_type: NodeType) -> Nodes {
        if node_type == NodeType::Any {
            return self.children(NodeType::Any);
        }
        let mut found = Nodes::new();
        self.find_into(node_type, &mut found);
        found
    }

    /// The direct children matching `node_type`.
    pub fn children(&self, node_type: NodeType) -> Nodes {
        self.data()
            .children
            .iter()
            .filter(|child| child.node_type().matches(node_type))
            .cloned()
            .collect()
    }

    fn gquery_into(&self, node_type: NodeType, out: &mut Nodes) {
        let data = self.data();
        if data.node_type.matches(node_type) {
            out.push(self.clone());
        }
        for child in &data.children {
            child.gquery_into(node_type, out);
        }
    }

    fn find_into(&self, node_type: NodeType, out: &mut Nodes) {
        for child in &self.data().children {
            if child.node_type() == node_type {
                out.push(child.clone());
            }
            // keep descending even through matches
            child.find_into(node_type, out);
        }
    }
}
