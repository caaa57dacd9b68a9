//! Diagnostic rendering of trees via termtree.
//!
//! The output is for humans and logs only; it is not a parseable format.

use std::fmt;

use itertools::Itertools;
use termtree::Tree;

use crate::tree::PropertyTree;

/// Conversion into a renderable [`termtree::Tree`].
pub trait TreeRender {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeRender for PropertyTree {
    fn to_tree_string(&self) -> Tree<String> {
        match self {
            PropertyTree::Empty => Tree::new("Empty tree".to_string()),
            PropertyTree::Node(_) => {
                let leaves: Vec<_> = self
                    .children()
                    .iter()
                    .map(|child| child.to_tree_string())
                    .collect();
                Tree::new(node_label(self)).with_leaves(leaves)
            }
        }
    }
}

fn node_label(tree: &PropertyTree) -> String {
    let data = tree.data();
    if data.is_empty() {
        tree.name().to_string()
    } else if let Some(value) = data.single() {
        format!("{}: {}", tree.name(), value)
    } else {
        format!("{}: [{}]", tree.name(), data.iter().join(","))
    }
}

impl PropertyTree {
    /// Deterministic box-drawing rendering of the subtree.
    pub fn draw(&self) -> String {
        self.to_tree_string().to_string()
    }
}

impl fmt::Display for PropertyTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.draw().trim_end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values;

    #[test]
    fn draws_names_with_values() {
        let tree = PropertyTree::node_of(
            "root",
            None,
            values![1, 2],
            [
                PropertyTree::leaf("child1", values!["foo"]),
                PropertyTree::leaf("child2", values![]),
            ],
        );
        let drawn = tree.draw();
        assert!(drawn.contains("root: [1,2]"));
        assert!(drawn.contains("child1: foo"));
        assert!(drawn.contains("child2"));
    }

    #[test]
    fn draws_empty_sentinel() {
        assert!(PropertyTree::empty().draw().contains("Empty tree"));
    }
}
