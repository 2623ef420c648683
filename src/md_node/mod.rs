//! The document tree, and the query, navigation and mutation API over it.
//!
//! ## Example
//!
//! ```
//! use gquery::{Node, NodeType};
//!
//! # fn main() -> Result<(), gquery::TreeError> {
//! let root = Node::of_type(NodeType::Document);
//! let list = Node::of_type(NodeType::UnorderedList);
//! let item = Node::of_type(NodeType::ListItem);
//! root.append(&list)?;
//! list.append(&item)?;
//!
//! assert_eq!(root.gquery(NodeType::Any).len(), 3);
//! assert_eq!(root.find(NodeType::ListItem).eq(0), item);
//! assert_eq!(item.parents().len(), 2);
//! assert!(item.next().is_placeholder());
//! # Ok(())
//! # }
//! ```
mod mutate;
mod navigate;
mod node_type;
mod nodes;
mod query;
mod tree;

pub use mutate::*;
pub use node_type::*;
pub use nodes::*;
pub use tree::*;
