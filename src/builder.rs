//! Fluent construction of property trees.
//!
//! Builders nest the same way the finished tree does; children are
//! declared as builders and finalized bottom-up. The name is the only
//! required field, checked at [`PropertyTreeBuilder::build`] time so that
//! no partial tree is ever produced.

use tracing::instrument;

use crate::errors::{TreeError, TreeResult};
use crate::tree::PropertyTree;
use crate::value::{PropertyValue, ValueSet};

#[derive(Debug, Clone, Default)]
pub struct PropertyTreeBuilder {
    name: Option<String>,
    description: Option<String>,
    data: ValueSet,
    children: Vec<PropertyTreeBuilder>,
}

impl PropertyTreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh builder with the name already set.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new().name(name)
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds one value to the bag (deduplicated).
    pub fn value(mut self, value: impl Into<PropertyValue>) -> Self {
        self.data.insert(value);
        self
    }

    /// Replaces the value bag wholesale.
    pub fn data(mut self, data: ValueSet) -> Self {
        self.data = data;
        self
    }

    /// Declares a nested child.
    pub fn child(mut self, child: PropertyTreeBuilder) -> Self {
        self.children.push(child);
        self
    }

    /// Finalizes bottom-up into an immutable tree.
    ///
    /// Fails with [`TreeError::NameRequired`] when this builder or any
    /// nested child is missing a name; no partial tree is produced.
    #[instrument(level = "debug", skip(self))]
    pub fn build(self) -> TreeResult<PropertyTree> {
        let PropertyTreeBuilder {
            name,
            description,
            data,
            children,
        } = self;
        let name = name.ok_or(TreeError::NameRequired)?;
        let children = children
            .into_iter()
            .map(PropertyTreeBuilder::build)
            .collect::<TreeResult<Vec<_>>>()?;
        Ok(PropertyTree::node_of(
            name,
            description.as_deref(),
            data,
            children,
        ))
    }
}
