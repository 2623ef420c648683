use crate::md_node::{Node, NodeConfig, NodeType};
use crate::parse::{InvalidMd, ParseOptions};
use markdown::mdast;
use std::collections::HashMap;

pub(crate) fn read(ast: mdast::Node, options: &ParseOptions) -> Result<Node, InvalidMd> {
    let mut reader = Reader {
        definitions: HashMap::with_capacity(4), // total guess
        options,
    };
    reader.collect_definitions(&ast);
    reader
        .read_node(ast, 0)?
        .ok_or(InvalidMd::Unsupported("document root"))
}

struct Reader<'a> {
    /// Keyed by the normalized identifier. The first definition wins.
    definitions: HashMap<String, LinkDefinition>,
    options: &'a ParseOptions,
}

struct LinkDefinition {
    url: String,
    title: Option<String>,
}

/// One mdast node, translated but not yet built.
struct Mapped {
    node_type: NodeType,
    value: String,
    html: String,
    /// Plain text contributed by the node itself, before its children's.
    own_text: String,
    attributes: Vec<(&'static str, String)>,
    children: Vec<mdast::Node>,
}

impl Mapped {
    fn container(node_type: NodeType, children: Vec<mdast::Node>) -> Self {
        Self {
            node_type,
            value: String::new(),
            html: String::new(),
            own_text: String::new(),
            attributes: Vec::new(),
            children,
        }
    }

    fn leaf(node_type: NodeType) -> Self {
        Self::container(node_type, Vec::new())
    }

    /// A leaf whose value is also its text.
    fn literal(node_type: NodeType, value: String) -> Self {
        Self {
            own_text: value.clone(),
            value,
            ..Self::leaf(node_type)
        }
    }

    fn with_value(mut self, value: String) -> Self {
        self.value = value;
        self
    }

    fn with_text(mut self, text: String) -> Self {
        self.own_text = text;
        self
    }

    fn with_attr(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.attributes.push((key, value.into()));
        self
    }

    fn with_opt_attr(self, key: &'static str, value: Option<String>) -> Self {
        match value {
            Some(value) => self.with_attr(key, value),
            None => self,
        }
    }
}

impl Reader<'_> {
    fn collect_definitions(&mut self, node: &mdast::Node) {
        if let mdast::Node::Definition(definition) = node {
            self.definitions
                .entry(definition.identifier.clone())
                .or_insert_with(|| LinkDefinition {
                    url: definition.url.clone(),
                    title: definition.title.clone(),
                });
        }
        if let Some(children) = node.children() {
            for child in children {
                self.collect_definitions(child);
            }
        }
    }

    /// Builds the subtree for `node`. `depth` is the number of enclosing list items.
    fn read_node(&self, node: mdast::Node, depth: usize) -> Result<Option<Node>, InvalidMd> {
        let Some(Mapped {
            node_type,
            value,
            html,
            own_text,
            attributes,
            children,
        }) = self.map(node)?
        else {
            return Ok(None);
        };

        let result = Node::new(NodeConfig {
            node_type,
            value,
            text: String::new(),
            html,
        });
        for (key, attr_value) in attributes {
            result.set_attr(key, attr_value);
        }
        result.set_tab_depth(depth);

        let child_depth = if node_type == NodeType::ListItem { depth + 1 } else { depth };
        let mut text = own_text;
        for child in children {
            if let Some(child) = self.read_node(child, child_depth)? {
                text.push_str(&child.text());
                result.append(&child)?;
            }
        }
        result.set_text(text);
        Ok(Some(result))
    }

    fn map(&self, node: mdast::Node) -> Result<Option<Mapped>, InvalidMd> {
        let mapped = match node {
            mdast::Node::Root(node) => Mapped::container(NodeType::Document, node.children),
            mdast::Node::Heading(node) => {
                Mapped::container(NodeType::Title, node.children).with_attr("depth", node.depth.to_string())
            }
            mdast::Node::Paragraph(node) => Mapped::container(NodeType::Paragraph, node.children),
            mdast::Node::List(node) => {
                let node_type = if node.ordered {
                    NodeType::OrderedList
                } else {
                    NodeType::UnorderedList
                };
                Mapped::container(node_type, node.children).with_opt_attr("start", node.start.map(|s| s.to_string()))
            }
            mdast::Node::ListItem(node) => Mapped::container(NodeType::ListItem, node.children)
                .with_opt_attr("checked", node.checked.map(|checked| checked.to_string())),
            mdast::Node::Blockquote(node) => Mapped::container(NodeType::BlockQuote, node.children),
            mdast::Node::Code(node) => Mapped::literal(NodeType::CodeBlock, node.value)
                .with_opt_attr("lang", node.lang)
                .with_opt_attr("meta", node.meta),
            mdast::Node::Math(node) => Mapped::literal(NodeType::CodeBlock, node.value)
                .with_attr("lang", "math")
                .with_opt_attr("meta", node.meta),
            mdast::Node::ThematicBreak(_) => Mapped::leaf(NodeType::ThematicBreak),
            mdast::Node::Table(node) => Mapped::container(NodeType::Table, node.children),
            mdast::Node::TableRow(node) => Mapped::container(NodeType::TableRow, node.children),
            mdast::Node::TableCell(node) => Mapped::container(NodeType::TableCell, node.children),
            mdast::Node::Html(node) => {
                let mut mapped = Mapped::leaf(NodeType::Html).with_value(node.value.clone());
                mapped.html = node.value;
                mapped
            }
            mdast::Node::Toml(node) => Mapped::literal(NodeType::FrontMatter, node.value).with_attr("format", "toml"),
            mdast::Node::Yaml(node) => Mapped::literal(NodeType::FrontMatter, node.value).with_attr("format", "yaml"),
            mdast::Node::Definition(node) => Mapped::leaf(NodeType::Definition)
                .with_value(node.url.clone())
                .with_attr("id", node.identifier)
                .with_attr("href", node.url)
                .with_opt_attr("title", node.title),
            mdast::Node::FootnoteDefinition(node) => {
                Mapped::container(NodeType::FootnoteDefinition, node.children).with_attr("id", node.identifier)
            }
            mdast::Node::FootnoteReference(node) => {
                Mapped::leaf(NodeType::FootnoteReference).with_attr("id", node.identifier)
            }
            mdast::Node::Link(node) => Mapped::container(NodeType::Link, node.children)
                .with_value(node.url.clone())
                .with_attr("href", node.url)
                .with_opt_attr("title", node.title),
            mdast::Node::LinkReference(node) => {
                let (url, title) = self.resolve(&node.identifier);
                Mapped::container(NodeType::Link, node.children)
                    .with_value(url.clone())
                    .with_attr("href", url)
                    .with_opt_attr("title", title)
                    .with_attr("ref", node.identifier)
            }
            mdast::Node::Image(node) => Mapped::leaf(NodeType::Image)
                .with_text(node.alt.clone())
                .with_value(node.url.clone())
                .with_attr("src", node.url)
                .with_attr("alt", node.alt)
                .with_opt_attr("title", node.title),
            mdast::Node::ImageReference(node) => {
                let (url, title) = self.resolve(&node.identifier);
                Mapped::leaf(NodeType::Image)
                    .with_text(node.alt.clone())
                    .with_value(url.clone())
                    .with_attr("src", url)
                    .with_attr("alt", node.alt)
                    .with_opt_attr("title", title)
                    .with_attr("ref", node.identifier)
            }
            mdast::Node::Text(node) => Mapped::literal(NodeType::Text, node.value),
            mdast::Node::InlineCode(node) => Mapped::literal(NodeType::InlineCode, node.value),
            mdast::Node::InlineMath(node) => Mapped::literal(NodeType::InlineMath, node.value),
            mdast::Node::Break(_) => Mapped::literal(NodeType::Break, "\n".to_string()),
            mdast::Node::Emphasis(node) => Mapped::container(NodeType::Emphasis, node.children),
            mdast::Node::Strong(node) => Mapped::container(NodeType::Strong, node.children),
            mdast::Node::Delete(node) => Mapped::container(NodeType::Delete, node.children),
            mdast::Node::MdxJsxFlowElement(_)
            | mdast::Node::MdxjsEsm(_)
            | mdast::Node::MdxTextExpression(_)
            | mdast::Node::MdxJsxTextElement(_)
            | mdast::Node::MdxFlowExpression(_) => {
                if self.options.allow_unknown_markdown {
                    tracing::debug!("skipping mdx node");
                    return Ok(None);
                }
                return Err(InvalidMd::Unsupported("mdx"));
            }
        };
        Ok(Some(mapped))
    }

    fn resolve(&self, identifier: &str) -> (String, Option<String>) {
        match self.definitions.get(identifier) {
            Some(definition) => (definition.url.clone(), definition.title.clone()),
            None => {
                tracing::debug!(identifier, "no definition for reference");
                (String::new(), None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::md_node::*;
    use crate::parse::*;
    use crate::util::utils_for_test::*;
    use indoc::indoc;

    fn parse(md: &str) -> Node {
        parse_markdown(md).unwrap()
    }

    fn types(nodes: &Nodes) -> Vec<NodeType> {
        nodes.iter().map(Node::node_type).collect()
    }

    #[test]
    fn title_paragraph_and_list() {
        let root = parse(indoc! {r#"
            # Title

            This is title

            - baidu
            - google
            "#});
        assert_eq!(root.node_type(), NodeType::Document);
        assert_eq!(
            types(&root.gquery(NodeType::Any)),
            vec![
                NodeType::Document,
                NodeType::Title,
                NodeType::Text,
                NodeType::Paragraph,
                NodeType::Text,
                NodeType::UnorderedList,
                NodeType::ListItem,
                NodeType::Paragraph,
                NodeType::Text,
                NodeType::ListItem,
                NodeType::Paragraph,
                NodeType::Text,
            ]
        );

        let title = get_only(root.gquery(NodeType::Title));
        assert_eq!(title.text(), "Title");
        assert_eq!(title.attr("depth").as_deref(), Some("1"));
        assert!(title.next().is_placeholder());

        let list = get_only(root.gquery(NodeType::UnorderedList));
        assert_eq!(list.first(NodeType::ListItem).text(), "baidu");
        assert_eq!(list.last(NodeType::ListItem).text(), "google");
        assert_eq!(list.first(NodeType::ListItem).next(), list.last(NodeType::ListItem));
        assert_eq!(root.text(), "TitleThis is titlebaidugoogle");
    }

    #[test]
    fn every_child_points_back_to_its_parent() {
        let root = parse(indoc! {r#"
            # Title

            > quoted *text*

            1. one
            2. two
            "#});
        for node in root.gquery(NodeType::Any) {
            for child in node.children(NodeType::Any) {
                assert_eq!(child.parent(), Some(node.clone()));
            }
        }
    }

    #[test]
    fn nested_lists_and_tab_depth() {
        let root = parse(indoc! {r#"
            - a
              - b
            - c
            "#});
        let lists = root.gquery(NodeType::UnorderedList);
        assert_eq!(lists.len(), 2);
        let (outer, inner) = (lists.eq(0), lists.eq(1));
        assert_eq!(outer.tab_depth(), 0);
        assert_eq!(outer.first(NodeType::ListItem).tab_depth(), 0);
        assert_eq!(inner.tab_depth(), 1);
        assert_eq!(inner.first(NodeType::ListItem).tab_depth(), 1);
        let b = inner.first(NodeType::ListItem).first(NodeType::Paragraph);
        assert_eq!(b.text(), "b");
        assert_eq!(b.tab_depth(), 2);

        assert_eq!(outer.first(NodeType::ListItem).text(), "ab");
        assert_eq!(outer.find(NodeType::ListItem).len(), 3);
        assert_eq!(b.parents_until(NodeType::ListItem).len(), 1);
    }

    #[test]
    fn ordered_and_task_lists() {
        let root = parse(indoc! {r#"
            3. three

            - [x] done
            - [ ] todo
            - plain
            "#});
        let ordered = get_only(root.gquery(NodeType::OrderedList));
        assert_eq!(ordered.attr("start").as_deref(), Some("3"));

        let items = root.gquery(NodeType::UnorderedList).eq(0).children(NodeType::ListItem);
        assert_eq!(items.len(), 3);
        assert_eq!(items.eq(0).attr("checked").as_deref(), Some("true"));
        assert_eq!(items.eq(1).attr("checked").as_deref(), Some("false"));
        assert_eq!(items.eq(2).attr("checked"), None);
    }

    #[test]
    fn inline_links() {
        let root = parse("hello [baidu](http://www.baidu.com \"Baidu\") world");
        let link = get_only(root.gquery(NodeType::Link));
        assert_eq!(link.value(), "http://www.baidu.com");
        assert_eq!(link.attr("href").as_deref(), Some("http://www.baidu.com"));
        assert_eq!(link.attr("title").as_deref(), Some("Baidu"));
        assert_eq!(link.text(), "baidu");
        assert_eq!(link.parent().map(|p| p.text()).as_deref(), Some("hello baidu world"));
    }

    #[test]
    fn reference_links_resolve_through_definitions() {
        let root = parse(indoc! {r#"
            See [the docs][1] and ![logo][img].

            [1]: https://example.com/docs "Docs"
            [img]: https://example.com/logo.png
            "#});
        let link = get_only(root.gquery(NodeType::Link));
        assert_eq!(link.value(), "https://example.com/docs");
        assert_eq!(link.attr("title").as_deref(), Some("Docs"));
        assert_eq!(link.attr("ref").as_deref(), Some("1"));
        assert_eq!(link.text(), "the docs");

        let image = get_only(root.gquery(NodeType::Image));
        assert_eq!(image.value(), "https://example.com/logo.png");
        assert_eq!(image.attr("alt").as_deref(), Some("logo"));
        assert_eq!(image.text(), "logo");

        let definitions = root.children(NodeType::Definition);
        assert_eq!(definitions.len(), 2);
        assert_eq!(definitions.eq(0).attr("id").as_deref(), Some("1"));
        assert_eq!(definitions.eq(0).value(), "https://example.com/docs");
    }

    #[test]
    fn code_and_html() {
        let root = parse(indoc! {r#"
            ```rust
            fn main() {}
            ```

            <div>hi</div>
            "#});
        let code = get_only(root.gquery(NodeType::CodeBlock));
        assert_eq!(code.value(), "fn main() {}");
        assert_eq!(code.text(), "fn main() {}");
        assert_eq!(code.attr("lang").as_deref(), Some("rust"));
        assert_eq!(code.attr("meta"), None);

        let html = get_only(root.gquery(NodeType::Html));
        assert_eq!(html.value(), "<div>hi</div>");
        assert_eq!(html.html(), "<div>hi</div>");
        assert_eq!(html.text(), "");
        assert!(code.next().is_placeholder());
    }

    #[test]
    fn inline_spans() {
        let root = parse("**bold** _em_ ~~gone~~ `code`");
        let paragraph = get_only(root.children(NodeType::Paragraph));
        assert_eq!(
            types(&paragraph.children(NodeType::Any).not(NodeType::Text)),
            vec![
                NodeType::Strong,
                NodeType::Emphasis,
                NodeType::Delete,
                NodeType::InlineCode
            ]
        );
        assert_eq!(paragraph.text(), "bold em gone code");
    }

    #[test]
    fn footnotes() {
        let root = parse(indoc! {r#"
            Cool story[^a].

            [^a]: My footnote.
            "#});
        let reference = get_only(root.gquery(NodeType::FootnoteReference));
        assert_eq!(reference.attr("id").as_deref(), Some("a"));
        let definition = get_only(root.gquery(NodeType::FootnoteDefinition));
        assert_eq!(definition.attr("id").as_deref(), Some("a"));
        assert_eq!(definition.text(), "My footnote.");
    }

    #[test]
    fn mdx_unsupported() {
        let options = ParseOptions {
            mdast_options: markdown::ParseOptions::mdx(),
            allow_unknown_markdown: false,
        };
        assert_eq!(parse_with("<Foo />", &options), Err(InvalidMd::Unsupported("mdx")));
    }

    #[test]
    fn mdx_skipped_when_allowed() {
        let options = ParseOptions {
            mdast_options: markdown::ParseOptions::mdx(),
            allow_unknown_markdown: true,
        };
        let root = parse_with("<Foo />", &options).unwrap();
        assert_eq!(root.node_type(), NodeType::Document);
        assert!(root.children(NodeType::Any).is_empty());
    }

    #[test]
    fn empty_document() {
        let root = parse("");
        assert_eq!(root.node_type(), NodeType::Document);
        assert!(root.first(NodeType::Any).is_placeholder());
        assert_eq!(root.text(), "");
    }
}
