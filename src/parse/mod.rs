//! Builds a [Node] tree from Markdown text.
//!
//! Parsing is delegated to the `markdown` crate; this module maps its mdast onto [NodeType] tags. Every node gets its
//! plain `text` (the concatenated text of its subtree), and leaf-ish nodes get a `value`:
//!
//! | type                         | `value`               | attributes                        |
//! |------------------------------|-----------------------|-----------------------------------|
//! | `title`                      |                       | `depth`                           |
//! | `ordered-list`               |                       | `start`                           |
//! | `list-item`                  |                       | `checked` (task items only)       |
//! | `code-block`                 | the code              | `lang`, `meta`                    |
//! | `link`                       | the url               | `href`, `title`, `ref`            |
//! | `image`                      | the url               | `src`, `alt`, `title`, `ref`      |
//! | `definition`                 | the url               | `id`, `href`, `title`             |
//! | `footnote-*`                 |                       | `id`                              |
//! | `html`                       | the raw html          |                                   |
//! | `text`, `inline-code`, etc   | the literal text      |                                   |
//!
//! `html` nodes also carry their raw html in the `html` payload; rendering any other node to html is not this crate's
//! job. `tab_depth` is the number of list items enclosing the node.
//!
//! ```
//! use gquery::NodeType;
//!
//! let root = gquery::parse_markdown("# Title\n\n- [baidu](http://www.baidu.com)\n").unwrap();
//! let link = root.gquery(NodeType::Link).eq(0);
//! assert_eq!(link.value(), "http://www.baidu.com");
//! assert_eq!(link.text(), "baidu");
//! assert_eq!(root.first(NodeType::Title).text(), "Title");
//! ```
use crate::md_node::{Node, NodeType};
use std::fmt::{Display, Formatter};

mod reader;

/// Options for parsing Markdown.
#[derive(Default, Debug)]
pub struct ParseOptions {
    pub(crate) mdast_options: markdown::ParseOptions,
    /// If `true`, constructs that have no [NodeType] (MDX expressions and elements) are dropped from the tree.
    /// Otherwise, they fail the parse with [InvalidMd::Unsupported]. Defaults to `false`.
    pub allow_unknown_markdown: bool,
}

impl ParseOptions {
    /// GitHub-flavored Markdown: tables, task lists, strikethrough, footnotes, and autolink literals.
    pub fn gfm() -> Self {
        Self {
            mdast_options: markdown::ParseOptions::gfm(),
            allow_unknown_markdown: false,
        }
    }
}

/// Parses GitHub-flavored Markdown into a tree, and returns its [`NodeType::Document`] root.
pub fn parse_markdown(text: &str) -> Result<Node, InvalidMd> {
    parse_with(text, &ParseOptions::gfm())
}

/// Parses Markdown into a tree, and returns its [`NodeType::Document`] root.
pub fn parse_with(text: &str, options: &ParseOptions) -> Result<Node, InvalidMd> {
    let ast = markdown::to_mdast(text, &options.mdast_options).map_err(|e| InvalidMd::ParseError(format!("{e}")))?;
    let root = reader::read(ast, options)?;
    if tracing::enabled!(tracing::Level::DEBUG) {
        tracing::debug!(
            bytes = text.len(),
            nodes = root.gquery(NodeType::Any).len(),
            "parsed markdown"
        );
    }
    Ok(root)
}

/// Various error conditions that can come from trying to parse Markdown.
#[derive(Debug, PartialEq, Eq)]
pub enum InvalidMd {
    /// Encountered a Markdown construct that has no [NodeType].
    ///
    /// See [`ParseOptions::allow_unknown_markdown`].
    Unsupported(&'static str),
    /// The underlying parser rejected the input.
    ParseError(String),
    /// Internal error. You shouldn't get this.
    Tree(crate::md_node::TreeError),
}

impl std::error::Error for InvalidMd {}

impl From<crate::md_node::TreeError> for InvalidMd {
    fn from(err: crate::md_node::TreeError) -> Self {
        InvalidMd::Tree(err)
    }
}

impl Display for InvalidMd {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidMd::Unsupported(description) => {
                write!(f, "unsupported markdown: {description}")
            }
            InvalidMd::ParseError(s) => {
                write!(f, "couldn't parse markdown: {s}")
            }
            InvalidMd::Tree(err) => {
                write!(f, "internal error while building the tree: {err}")
            }
        }
    }
}
