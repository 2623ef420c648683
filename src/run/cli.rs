use crate::md_node::NodeType;
use clap::{Parser, ValueEnum};
use derive_builder::Builder;
use std::fmt::{Display, Formatter};

/// Select the nodes of a given type from Markdown documents.
#[derive(Clone, Debug, PartialEq, Eq, Parser)]
#[command(version, about, long_about = None)]
#[doc(hidden)]
pub struct CliOptions {
    /// The type of node to select. "any" selects every node.
    #[arg(value_enum, value_name = "TYPE")]
    pub(crate) node_type: NodeType,

    /// Only look inside nodes of this type.
    ///
    /// The selected nodes are then the matching descendants of every node of this type (but not those nodes
    /// themselves). With a TYPE of "any", only the direct children of those nodes are selected.
    #[arg(long, value_enum, value_name = "TYPE")]
    pub(crate) within: Option<NodeType>,

    /// Specifies the output format.
    #[arg(long, short, value_enum, default_value_t = OutputFormat::Plain)]
    pub(crate) output: OutputFormat,

    /// Quiet: do not print anything to stdout. The exit code will still be 0 if any nodes match, and non-0 if none do.
    #[arg(long, short)]
    pub(crate) quiet: bool,

    /// Skip (rather than reject) Markdown constructs that have no node type.
    #[arg(long, hide = true)]
    pub(crate) allow_unknown_markdown: bool,

    /// An optional list of Markdown files to parse, by path. If not provided, standard input will be used.
    ///
    /// Files are concatenated in the order given, and parsed as a single document. A path of "-" represents
    /// standard input; all but the first "-" are ignored.
    #[arg()]
    pub(crate) markdown_file_paths: Vec<String>,
}

/// Options analogous to the gquery CLI's arguments.
#[derive(Clone, Debug, PartialEq, Eq, Builder)]
#[builder(default, setter(into))]
pub struct RunOptions {
    /// The type of node to select.
    pub node_type: NodeType,

    /// If set, only select descendants of nodes of this type. See `--within`.
    pub within: Option<NodeType>,

    pub output: OutputFormat,

    /// Don't write any output; only report whether anything matched.
    pub quiet: bool,

    pub allow_unknown_markdown: bool,

    pub markdown_file_paths: Vec<String>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            node_type: NodeType::Any,
            within: None,
            output: OutputFormat::Plain,
            quiet: false,
            allow_unknown_markdown: false,
            markdown_file_paths: vec![],
        }
    }
}

impl From<CliOptions> for RunOptions {
    fn from(value: CliOptions) -> Self {
        Self {
            node_type: value.node_type,
            within: value.within,
            output: value.output,
            quiet: value.quiet,
            allow_unknown_markdown: value.allow_unknown_markdown,
            markdown_file_paths: value.markdown_file_paths,
        }
    }
}

/// Output formats, analogous to `--output` in the CLI.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum)]
pub enum OutputFormat {
    /// One line per selected node: its type, then its plain text (quoted).
    ///
    /// ```text
    /// title "Hello"
    /// paragraph "Some text"
    /// ```
    #[default]
    Plain,

    /// Each selected node's whole subtree, one node per line, indented two spaces per level. Nodes with a value
    /// (text, code, link urls, and so on) show it, quoted.
    ///
    /// ```text
    /// paragraph
    ///   text "see "
    ///   link "https://example.com"
    ///     text "here"
    /// ```
    Tree,
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let self_str = match self {
            OutputFormat::Plain => "plain",
            OutputFormat::Tree => "tree",
        };
        f.write_str(self_str)
    }
}
