use crate::md_node::NodeType;
use derive_builder::Builder;
use std::cell::{Ref, RefCell, RefMut};
use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::rc::{Rc, Weak};

/// The recognized settings for building a fresh [Node].
///
/// Unspecified fields default to their zero values. Build one directly, or through [NodeConfigBuilder]:
///
/// ```
/// use gquery::{Node, NodeConfig, NodeType};
///
/// let config = NodeConfig::builder()
///     .node_type(NodeType::ListItem)
///     .text("hello")
///     .build()
///     .unwrap();
/// let node = Node::new(config);
/// assert_eq!(node.node_type(), NodeType::ListItem);
/// assert_eq!(node.text(), "hello");
/// assert_eq!(node.value(), "");
/// ```
#[derive(Clone, Default, Debug, PartialEq, Eq, Builder)]
#[builder(default, setter(into))]
pub struct NodeConfig {
    pub node_type: NodeType,
    pub value: String,
    pub text: String,
    pub html: String,
}

impl NodeConfig {
    pub fn builder() -> NodeConfigBuilder {
        NodeConfigBuilder::default()
    }
}

#[derive(Default)]
pub(crate) struct NodeData {
    pub(crate) node_type: NodeType,
    pub(crate) attributes: HashMap<String, String>,
    pub(crate) text: String,
    pub(crate) html: String,
    pub(crate) value: String,
    pub(crate) tab_depth: usize,
    pub(crate) placeholder: bool,
    /// Lookup only: the parent owns us, not the other way around.
    pub(crate) parent: Weak<RefCell<NodeData>>,
    pub(crate) children: Vec<Node>,
}

/// A single element of the document tree.
///
/// `Node` is a handle: cloning it is cheap, and the clone refers to the same element. Two handles are equal iff they
/// refer to the same element; the contents are never compared.
///
/// A node owns its children. Its parent is a non-owning back-reference, so a subtree that gets detached (via
/// [`Node::remove`] or [`Node::empty`]) is reclaimed once nothing else holds a handle to it.
///
/// The flip side is that a handle doesn't keep its ancestors alive. Keep the root handle alive while navigating:
/// once the last handle to the root is dropped, the tree above any surviving node is gone, and that node reports no
/// [parent](Node::parent), no [parents](Node::parents), and no siblings.
///
/// ```
/// use gquery::NodeType;
///
/// let item = {
///     let root = gquery::parse_markdown("- a\n- b\n").unwrap();
///     root.gquery(NodeType::ListItem).eq(0)
/// };
/// assert_eq!(item.parent(), None);
/// assert!(item.next().is_placeholder());
/// ```
///
/// ## Placeholders
///
/// Lookups that find nothing ([`Node::first`], [`Node::last`], [`Node::next`], [`Node::prev`], [`Nodes::eq`]) return a
/// fresh placeholder rather than an `Option`, so that calls can be chained without checks. A placeholder has no
/// parent, no children, and type [`NodeType::Unset`], and it's never equal to a node in a tree. Use
/// [`Node::is_placeholder`] or [`Node::found`] to tell them apart.
///
/// Placeholders are read-only: the payload setters ([`Node::set_text`], [`Node::set_attr`] and so on) leave them
/// unchanged.
///
/// [`Nodes::eq`]: crate::md_node::Nodes::eq
#[derive(Clone)]
pub struct Node(pub(crate) Rc<RefCell<NodeData>>);

impl Node {
    pub fn new(config: NodeConfig) -> Self {
        let NodeConfig {
            node_type,
            value,
            text,
            html,
        } = config;
        Self::from_data(NodeData {
            node_type,
            value,
            text,
            html,
            ..NodeData::default()
        })
    }

    /// Shorthand for a node with the given type and every other field at its zero value.
    pub fn of_type(node_type: NodeType) -> Self {
        Self::new(NodeConfig {
            node_type,
            ..NodeConfig::default()
        })
    }

    /// A fresh, unattached stand-in for "not found".
    pub fn placeholder() -> Self {
        Self::from_data(NodeData {
            placeholder: true,
            ..NodeData::default()
        })
    }

    pub fn is_placeholder(&self) -> bool {
        self.data().placeholder
    }

    /// Converts a placeholder into `None`, and any other node into `Some(self)`.
    pub fn found(self) -> Option<Self> {
        if self.is_placeholder() {
            None
        } else {
            Some(self)
        }
    }

    pub fn node_type(&self) -> NodeType {
        self.data().node_type
    }

    pub fn text(&self) -> String {
        self.data().text.clone()
    }

    pub fn html(&self) -> String {
        self.data().html.clone()
    }

    pub fn value(&self) -> String {
        self.data().value.clone()
    }

    pub fn set_text(&self, text: impl Into<String>) {
        self.edit(|data| data.text = text.into());
    }

    pub fn set_html(&self, html: impl Into<String>) {
        self.edit(|data| data.html = html.into());
    }

    pub fn set_value(&self, value: impl Into<String>) {
        self.edit(|data| data.value = value.into());
    }

    pub fn attr(&self, key: &str) -> Option<String> {
        self.data().attributes.get(key).cloned()
    }

    pub fn set_attr(&self, key: impl Into<String>, value: impl Into<String>) {
        self.edit(|data| {
            data.attributes.insert(key.into(), value.into());
        });
    }

    /// A snapshot of all attributes.
    pub fn attributes(&self) -> HashMap<String, String> {
        self.data().attributes.clone()
    }

    pub fn tab_depth(&self) -> usize {
        self.data().tab_depth
    }

    pub fn set_tab_depth(&self, tab_depth: usize) {
        self.edit(|data| data.tab_depth = tab_depth);
    }

    /// Applies a payload change, unless this is a placeholder.
    fn edit(&self, change: impl FnOnce(&mut NodeData)) {
        let mut data = self.data_mut();
        if data.placeholder {
            tracing::debug!("ignoring write to a placeholder node");
            return;
        }
        change(&mut data);
    }

    pub(crate) fn from_data(data: NodeData) -> Self {
        Self(Rc::new(RefCell::new(data)))
    }

    pub(crate) fn data(&self) -> Ref<'_, NodeData> {
        self.0.borrow()
    }

    pub(crate) fn data_mut(&self) -> RefMut<'_, NodeData> {
        self.0.borrow_mut()
    }

    pub(crate) fn set_parent(&self, parent: &Node) {
        self.data_mut().parent = Rc::downgrade(&parent.0);
    }

    /// The index of `self` within `parent`'s children, by identity.
    pub(crate) fn index_in(&self, parent: &Node) -> Option<usize> {
        parent.data().children.iter().position(|child| child == self)
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Rc::as_ptr(&self.0).hash(state)
    }
}

impl Debug for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let data = self.data();
        let mut debug = f.debug_struct("Node");
        debug
            .field("type", &data.node_type)
            .field("text", &data.text)
            .field("children", &data.children.len());
        if data.placeholder {
            debug.field("placeholder", &true);
        }
        debug.finish()
    }
}
