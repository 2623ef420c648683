//! A jQuery-style API over Markdown documents.
//!
//! Markdown is parsed into a tree of [Node]s, each tagged with a [NodeType]. From any node you can select
//! descendants by type ([`Node::gquery`], [`Node::find`], [`Node::children`]), walk to ancestors and siblings, and
//! restructure the tree in place ([`Node::append`], [`Node::remove`] and friends).
//!
//! Lookups that want a single node never fail: a miss returns a placeholder node, which you can test with
//! [`Node::is_placeholder`] or turn into an `Option` with [`Node::found`].
//!
//! Nodes own their children but only point back at their parents, so keep the root handle alive while navigating.
//! A node whose tree has been dropped has no parent and no siblings.
//!
//! ```
//! use gquery::NodeType;
//!
//! let md = "# Links\n\n- [baidu](http://www.baidu.com)\n- [google](http://www.google.com)\n";
//! let root = gquery::parse_markdown(md).unwrap();
//! let items = root.gquery(NodeType::ListItem);
//! assert_eq!(items.len(), 2);
//! assert_eq!(items.eq(1).text(), "google");
//! assert!(items.eq(2).is_placeholder());
//!
//! let google = items.eq(1);
//! google.remove().unwrap();
//! assert_eq!(root.gquery(NodeType::ListItem).len(), 1);
//! ```
//!
//! The `gquery` binary wraps this in a small CLI; see [`run`] to drive the same workflow in-process.
mod md_node;
pub mod output;
mod parse;
pub mod run;
mod util;

pub use md_node::*;
pub use parse::*;
