//! The persistent property tree and its rewrite algebra.
//!
//! A tree is either the absorbing [`PropertyTree::Empty`] sentinel or a
//! node holding one [`Property`] and its non-empty children. Nodes are
//! immutable; every rewrite returns a new tree that shares untouched
//! subtrees with its input via `Arc`, so rebuilds allocate only along the
//! path from the root to the changed node and concurrent readers need no
//! coordination.
//!
//! [`PropertyTree::try_transform`] is the single bottom-up primitive;
//! `prune`, `filter` and the replace operations derive from it, which is
//! what guarantees they all share the drop-empties-from-parents
//! invariant.

use std::convert::Infallible;
use std::sync::{Arc, OnceLock};

use tracing::instrument;

use crate::errors::{TreeError, TreeResult};
use crate::name::PropertyName;
use crate::property::Property;
use crate::value::ValueSet;

/// Predicate matching trees by property name.
pub fn by_name(name: impl Into<PropertyName>) -> impl Fn(&PropertyTree) -> bool {
    let name = name.into();
    move |tree: &PropertyTree| tree.name() == name.as_str()
}

/// Persistent tree: the Empty sentinel or a shared node.
///
/// Comparison and hashing are structural over the whole subtree. Empty is
/// equal only to itself and is never retained as a child.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyTree {
    Empty,
    Node(Arc<PropertyNode>),
}

/// Payload of a non-empty tree: one property plus ordered children.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct PropertyNode {
    property: Property,
    children: Vec<PropertyTree>,
}

impl PropertyNode {
    pub fn property(&self) -> &Property {
        &self.property
    }

    pub fn children(&self) -> &[PropertyTree] {
        &self.children
    }
}

fn empty_property() -> &'static Property {
    static EMPTY_PROPERTY: OnceLock<Property> = OnceLock::new();
    EMPTY_PROPERTY.get_or_init(Property::default)
}

impl PropertyTree {
    /// The absorbing Empty sentinel.
    pub fn empty() -> PropertyTree {
        PropertyTree::Empty
    }

    /// Constructs a node; children are filtered to non-empty.
    pub fn node_of(
        name: impl Into<PropertyName>,
        description: Option<&str>,
        data: ValueSet,
        children: impl IntoIterator<Item = PropertyTree>,
    ) -> PropertyTree {
        PropertyTree::from_parts(Property::new(name, description, data), children)
    }

    /// Childless node with a value bag.
    pub fn leaf(name: impl Into<PropertyName>, data: ValueSet) -> PropertyTree {
        PropertyTree::node_of(name, None, data, [])
    }

    /// Constructs a node from a ready-made property.
    pub fn from_parts(
        property: Property,
        children: impl IntoIterator<Item = PropertyTree>,
    ) -> PropertyTree {
        let children = children
            .into_iter()
            .filter(PropertyTree::is_not_empty)
            .collect();
        PropertyTree::Node(Arc::new(PropertyNode { property, children }))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, PropertyTree::Empty)
    }

    pub fn is_not_empty(&self) -> bool {
        !self.is_empty()
    }

    /// The node's property; Empty carries a nameless empty property.
    pub fn property(&self) -> &Property {
        match self {
            PropertyTree::Empty => empty_property(),
            PropertyTree::Node(node) => &node.property,
        }
    }

    pub fn name(&self) -> &str {
        self.property().name.as_str()
    }

    pub fn description(&self) -> Option<&str> {
        self.property().description.as_deref()
    }

    pub fn data(&self) -> &ValueSet {
        &self.property().data
    }

    pub fn children(&self) -> &[PropertyTree] {
        match self {
            PropertyTree::Empty => &[],
            PropertyTree::Node(node) => &node.children,
        }
    }

    /// Lazy pre-order traversal: the node itself, then each child's
    /// traversal in child order. Restartable; consumers may stop early.
    pub fn traverse(&self) -> Traverse<'_> {
        Traverse { stack: vec![self] }
    }

    /// First pre-order match, or Empty when nothing matches.
    pub fn find<P>(&self, mut predicate: P) -> PropertyTree
    where
        P: FnMut(&PropertyTree) -> bool,
    {
        self.traverse()
            .find(|tree| predicate(tree))
            .cloned()
            .unwrap_or(PropertyTree::Empty)
    }

    /// All pre-order matches over the full traversal.
    pub fn find_all<P>(&self, mut predicate: P) -> Vec<PropertyTree>
    where
        P: FnMut(&PropertyTree) -> bool,
    {
        self.traverse()
            .filter(|tree| predicate(tree))
            .cloned()
            .collect()
    }

    /// First pre-order match; fails with [`TreeError::NotFound`] when
    /// nothing matches. Callers who prefer the sentinel convention use
    /// [`PropertyTree::find`] and check `is_empty` instead.
    pub fn first<P>(&self, mut predicate: P) -> TreeResult<PropertyTree>
    where
        P: FnMut(&PropertyTree) -> bool,
    {
        self.traverse()
            .find(|tree| predicate(tree))
            .cloned()
            .ok_or(TreeError::NotFound)
    }

    /// First matching direct child, or Empty.
    pub fn find_child<P>(&self, mut predicate: P) -> PropertyTree
    where
        P: FnMut(&PropertyTree) -> bool,
    {
        self.children()
            .iter()
            .find(|child| predicate(child))
            .cloned()
            .unwrap_or(PropertyTree::Empty)
    }

    /// All matching direct children, in child order.
    pub fn find_children<P>(&self, mut predicate: P) -> Vec<PropertyTree>
    where
        P: FnMut(&PropertyTree) -> bool,
    {
        self.children()
            .iter()
            .filter(|child| predicate(child))
            .cloned()
            .collect()
    }

    /// First matching direct child; [`TreeError::NotFound`] otherwise.
    pub fn first_child<P>(&self, mut predicate: P) -> TreeResult<PropertyTree>
    where
        P: FnMut(&PropertyTree) -> bool,
    {
        self.children()
            .iter()
            .find(|child| predicate(child))
            .cloned()
            .ok_or(TreeError::NotFound)
    }

    /// Structural prune keeping the nodes for which `predicate` holds.
    pub fn filter<P>(&self, predicate: P) -> PropertyTree
    where
        P: Fn(&PropertyTree) -> bool,
    {
        self.prune(|tree| !predicate(tree))
    }

    /// Replaces every node matching `predicate` with Empty, bottom-up.
    /// Pruned subtrees disappear from their parents; pruning the root
    /// yields Empty. Idempotent for a fixed predicate.
    pub fn prune<P>(&self, predicate: P) -> PropertyTree
    where
        P: Fn(&PropertyTree) -> bool,
    {
        self.replace_matching(PropertyTree::Empty, predicate)
    }

    /// Replaces every subtree structurally equal to `target`.
    pub fn replace_node(&self, target: &PropertyTree, replacement: PropertyTree) -> PropertyTree {
        self.replace_matching(replacement, |tree| tree == target)
    }

    /// Replaces every node (at every depth) matching `predicate` with
    /// `replacement`, rebuilding all ancestors.
    #[instrument(level = "trace", skip_all)]
    pub fn replace_matching<P>(&self, replacement: PropertyTree, predicate: P) -> PropertyTree
    where
        P: Fn(&PropertyTree) -> bool,
    {
        if self.is_empty() {
            return PropertyTree::Empty;
        }
        self.transform(&|tree, children| {
            if predicate(tree) {
                replacement.clone()
            } else {
                tree.with_children(children)
            }
        })
    }

    /// Generic bottom-up rewrite: children are transformed first,
    /// children that became Empty are dropped, then `f(node, children)`
    /// produces the node for this position.
    pub fn transform<F>(&self, f: &F) -> PropertyTree
    where
        F: Fn(&PropertyTree, Vec<PropertyTree>) -> PropertyTree,
    {
        self.try_transform::<_, Infallible>(&|tree, children| Ok(f(tree, children)))
            .unwrap_or_else(|never| match never {})
    }

    /// Fallible variant of [`PropertyTree::transform`]; the first error
    /// aborts the rewrite.
    pub fn try_transform<F, E>(&self, f: &F) -> Result<PropertyTree, E>
    where
        F: Fn(&PropertyTree, Vec<PropertyTree>) -> Result<PropertyTree, E>,
    {
        let mut children = Vec::with_capacity(self.children().len());
        for child in self.children() {
            let rewritten = child.try_transform(f)?;
            if rewritten.is_not_empty() {
                children.push(rewritten);
            }
        }
        f(self, children)
    }

    /// Replaces the direct child list with `updater(children)`,
    /// rebuilding only this node.
    pub fn update_children<F>(&self, updater: F) -> PropertyTree
    where
        F: FnOnce(&[PropertyTree]) -> Vec<PropertyTree>,
    {
        self.with_children(updater(self.children()))
    }

    /// Removes all direct children with the given name, then appends
    /// `replacement` as a new child.
    pub fn overwrite_children(
        &self,
        replacement: PropertyTree,
        name: impl Into<PropertyName>,
    ) -> PropertyTree {
        self.overwrite_children_by(replacement, by_name(name))
    }

    /// Removes all direct children matching `predicate`, then appends
    /// `replacement` as a new child.
    pub fn overwrite_children_by<P>(&self, replacement: PropertyTree, predicate: P) -> PropertyTree
    where
        P: Fn(&PropertyTree) -> bool,
    {
        if self.is_empty() {
            return PropertyTree::Empty;
        }
        self.update_children(|children| {
            let mut kept: Vec<PropertyTree> = children
                .iter()
                .filter(|child| !predicate(child))
                .cloned()
                .collect();
            kept.push(replacement);
            kept
        })
    }

    /// Replaces the first descendant with the given name using `updater`;
    /// returns `self` unchanged when no such node exists.
    pub fn update_node<F>(&self, name: impl Into<PropertyName>, updater: F) -> PropertyTree
    where
        F: FnOnce(&PropertyTree) -> PropertyTree,
    {
        let target = self.find(by_name(name));
        if target.is_empty() {
            self.clone()
        } else {
            self.replace_node(&target, updater(&target))
        }
    }

    /// Rebuilds this node with a new property, keeping the children.
    pub fn with_property(&self, property: Property) -> PropertyTree {
        match self {
            PropertyTree::Empty => PropertyTree::Empty,
            PropertyTree::Node(node) => {
                if node.property == property {
                    self.clone()
                } else {
                    PropertyTree::from_parts(property, node.children.to_vec())
                }
            }
        }
    }

    /// Rebuilds this node with a new child list (filtered to non-empty),
    /// keeping the property. Returns `self` when nothing changed.
    pub fn with_children(&self, children: Vec<PropertyTree>) -> PropertyTree {
        match self {
            PropertyTree::Empty => PropertyTree::Empty,
            PropertyTree::Node(node) => {
                if node.children == children {
                    self.clone()
                } else {
                    PropertyTree::from_parts(node.property.clone(), children)
                }
            }
        }
    }
}

/// Pre-order iterator over a tree, borrowed from the root.
pub struct Traverse<'a> {
    stack: Vec<&'a PropertyTree>,
}

impl<'a> Iterator for Traverse<'a> {
    type Item = &'a PropertyTree;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        // Push children in reverse order for left-to-right traversal
        for child in current.children().iter().rev() {
            self.stack.push(child);
        }
        Some(current)
    }
}
