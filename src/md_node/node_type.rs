use clap::builder::PossibleValue;
use clap::ValueEnum;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Defines [NodeType] along with its kebab-case names.
///
/// `Unset` and `Any` are always present; every other variant is listed in the invocation below.
macro_rules! node_types {
    ( $( $(#[$meta:meta])* $variant:ident => $name:literal ),+ $(,)? ) => {
        /// The type tag of a [`Node`](crate::md_node::Node).
        ///
        /// Every query, filter and navigation operation takes one of these as its match predicate. [`NodeType::Any`]
        /// is the wildcard: it matches every node. [`NodeType::Unset`] is the zero value, which placeholder nodes
        /// carry.
        #[derive(Copy, Clone, Default, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum NodeType {
            /// The zero value.
            #[default]
            Unset,
            /// The wildcard. As a query argument, it matches every node type.
            Any,
            $(
            $(#[$meta])*
            $variant,
            )+
        }

        impl NodeType {
            /// All the types a caller can ask for by name. This excludes [NodeType::Unset].
            const SELECTABLE: &'static [NodeType] = &[NodeType::Any, $(NodeType::$variant),+];

            /// The kebab-case name of this type, as used by the CLI and by [Display].
            pub fn name(self) -> &'static str {
                match self {
                    NodeType::Unset => "unset",
                    NodeType::Any => "any",
                    $(NodeType::$variant => $name,)+
                }
            }
        }
    };
}

node_types! {
    /// The root of a parsed document.
    Document => "document",
    /// A heading. The parser stores its level in the `depth` attribute.
    Title => "title",
    Paragraph => "paragraph",
    UnorderedList => "unordered-list",
    OrderedList => "ordered-list",
    ListItem => "list-item",
    BlockQuote => "block-quote",
    /// A fenced or indented code block (or a math block).
    CodeBlock => "code-block",
    ThematicBreak => "thematic-break",
    Table => "table",
    TableRow => "table-row",
    TableCell => "table-cell",
    /// Raw HTML, block or inline.
    Html => "html",
    /// YAML or TOML front matter.
    FrontMatter => "front-matter",
    /// A link reference definition, like `[1]: https://example.com`.
    Definition => "definition",
    FootnoteDefinition => "footnote-definition",
    Link => "link",
    Image => "image",
    Text => "text",
    Emphasis => "emphasis",
    Strong => "strong",
    Delete => "delete",
    InlineCode => "inline-code",
    InlineMath => "inline-math",
    /// A hard line break.
    Break => "break",
    FootnoteReference => "footnote-reference",
}

impl NodeType {
    /// Whether a node of this type is selected by the `query` type.
    ///
    /// [NodeType::Any] matches everything; any other query requires exact equality.
    pub fn matches(self, query: NodeType) -> bool {
        query == NodeType::Any || self == query
    }
}

impl Display for NodeType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when parsing a [NodeType] from a name that isn't one.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UnknownNodeType(pub String);

impl Display for UnknownNodeType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown node type: {:?}", self.0)
    }
}

impl std::error::Error for UnknownNodeType {}

impl FromStr for NodeType {
    type Err = UnknownNodeType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::SELECTABLE
            .iter()
            .copied()
            .find(|node_type| node_type.name() == s)
            .ok_or_else(|| UnknownNodeType(s.to_string()))
    }
}

impl ValueEnum for NodeType {
    fn value_variants<'a>() -> &'a [Self] {
        Self::SELECTABLE
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        match self {
            NodeType::Unset => None,
            other => Some(PossibleValue::new(other.name())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_matches_everything() {
        assert!(NodeType::Title.matches(NodeType::Any));
        assert!(NodeType::Unset.matches(NodeType::Any));
        assert!(NodeType::Any.matches(NodeType::Any));
    }

    #[test]
    fn concrete_type_needs_equality() {
        assert!(NodeType::Title.matches(NodeType::Title));
        assert!(!NodeType::Title.matches(NodeType::Paragraph));
        // the wildcard is only special as the query argument
        assert!(!NodeType::Any.matches(NodeType::Title));
    }

    #[test]
    fn default_is_unset() {
        assert_eq!(NodeType::default(), NodeType::Unset);
    }

    #[test]
    fn names() {
        assert_eq!(NodeType::UnorderedList.to_string(), "unordered-list");
        assert_eq!("list-item".parse::<NodeType>(), Ok(NodeType::ListItem));
        assert_eq!("any".parse::<NodeType>(), Ok(NodeType::Any));
    }

    #[test]
    fn unset_is_not_selectable() {
        assert_eq!(
            "unset".parse::<NodeType>(),
            Err(UnknownNodeType("unset".to_string()))
        );
        assert_eq!(NodeType::Unset.to_possible_value(), None);
        assert!(!NodeType::value_variants().contains(&NodeType::Unset));
    }

    #[test]
    fn unknown_name() {
        let err = "heading".parse::<NodeType>().unwrap_err();
        assert_eq!(err.to_string(), r#"unknown node type: "heading""#);
    }
}
