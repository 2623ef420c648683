//! Writers that render selected nodes as text.
use crate::md_node::{Node, NodeType};
use std::io::{self, Write};

/// Writes one line per node: its type name, then its plain text as a quoted, escaped string.
///
/// ```
/// use gquery::output::write_plain;
/// use gquery::NodeType;
///
/// let root = gquery::parse_markdown("# Hello\n\nSome *text*\n").unwrap();
/// let mut out = Vec::new();
/// write_plain(&root.children(NodeType::Any), &mut out).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "title \"Hello\"\nparagraph \"Some text\"\n");
/// ```
pub fn write_plain<'a, W>(nodes: impl IntoIterator<Item = &'a Node>, out: &mut W) -> io::Result<()>
where
    W: Write,
{
    for node in nodes {
        writeln!(out, "{} {:?}", node.node_type(), node.text())?;
    }
    Ok(())
}

/// Writes each node's whole subtree, one node per line.
///
/// Each level is indented by two spaces. A node whose value is non-empty shows it, quoted, after its type name.
pub fn write_tree<'a, W>(nodes: impl IntoIterator<Item = &'a Node>, out: &mut W) -> io::Result<()>
where
    W: Write,
{
    for node in nodes {
        write_subtree(node, 0, out)?;
    }
    Ok(())
}

fn write_subtree<W: Write>(node: &Node, indent: usize, out: &mut W) -> io::Result<()> {
    write!(out, "{:indent$}{}", "", node.node_type(), indent = indent * 2)?;
    let value = node.value();
    if !value.is_empty() {
        write!(out, " {value:?}")?;
    }
    writeln!(out)?;
    for child in &node.children(NodeType::Any) {
        write_subtree(child, indent + 1, out)?;
    }
    Ok(())
}
