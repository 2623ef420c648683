#[cfg(test)]
pub(crate) use test_utils::*;

// We keep this file's contents from prod by putting them in a submodule guarded by cfg(test), but then "pub use" it to
// export its contents.
#[cfg(test)]
mod test_utils {
    use std::fmt::Debug;

    pub fn get_only<T: Debug, C: IntoIterator<Item = T>>(col: C) -> T {
        let mut iter = col.into_iter();
        let Some(result) = iter.next() else {
            panic!("expected an element, but was empty");
        };
        match iter.next() {
            None => result,
            Some(extra) => {
                let mut all = Vec::new();
                all.push(result);
                all.push(extra);
                all.extend(iter);
                panic!("expected exactly one element, but found {}: {all:?}", all.len());
            }
        }
    }

    /// Turn a pattern match into an `if let ... { else panic! }`.
    macro_rules! unwrap {
        ($enum_value:expr, $enum_variant:pat) => {
            let node = $enum_value;
            let node_debug = format!("{:?}", node);
            let $enum_variant = node else {
                panic!("Expected {} but saw {}", stringify!($enum_variant), node_debug);
            };
        };
    }
    pub(crate) use unwrap;

    /// Builds a tree of empty nodes, returning its root.
    ///
    /// ```text
    /// md_tree!(Document [
    ///     Title,
    ///     UnorderedList [ ListItem, ListItem ],
    /// ])
    /// ```
    ///
    /// Each name is a [NodeType](crate::md_node::NodeType) variant; an optional bracketed list gives its children.
    macro_rules! md_tree {
        (@children $parent:ident; ) => {};
        (@children $parent:ident; $child:ident $([ $($grandchildren:tt)* ])? $(, $($rest:tt)*)?) => {
            $parent
                .append(&crate::util::utils_for_test::md_tree!($child $([ $($grandchildren)* ])?))
                .unwrap();
            $( crate::util::utils_for_test::md_tree!(@children $parent; $($rest)*); )?
        };
        ($node_type:ident $([ $($children:tt)* ])?) => {{
            let node = crate::md_node::Node::of_type(crate::md_node::NodeType::$node_type);
            $( crate::util::utils_for_test::md_tree!(@children node; $($children)*); )?
            node
        }};
    }
    pub(crate) use md_tree;

    #[test]
    fn md_tree_shape() {
        use crate::md_node::NodeType;
        let root = md_tree!(Document [
            Title,
            UnorderedList [ ListItem, ListItem [ Paragraph ] ],
        ]);
        assert_eq!(root.node_type(), NodeType::Document);
        assert_eq!(root.children(NodeType::Any).len(), 2);
        assert_eq!(root.gquery(NodeType::Any).len(), 6);
        let paragraph = get_only(root.gquery(NodeType::Paragraph));
        assert_eq!(paragraph.parents().len(), 3);
    }
}
