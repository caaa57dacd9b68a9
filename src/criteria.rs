//! Declarative criteria evaluated against a node's marker children.
//!
//! For each criterion `(name, values)` three independent checks are read
//! off the node's direct children by naming convention:
//!
//! - exclusion: any value shared with the union of `<name>Exclude` bags
//!   excludes the node (disjunction over all criteria);
//! - inclusion: with no `<name>Include` child the check passes
//!   vacuously, otherwise the union must intersect the criterion values
//!   (conjunction over all criteria);
//! - interval: a `<name>Start` child opens the closed range
//!   `[start, end]` (or `[start, +inf)` without an `<name>End` child);
//!   every criterion value must be same-family comparable and in range.
//!
//! Conflicting Include and Exclude markers for the same base name are not
//! an error: both checks apply independently and exclusion wins. All
//! same-named markers on one node act as a single logical value set.

use std::cmp::Ordering;

use tracing::instrument;

use crate::errors::{CriteriaError, CriteriaResult};
use crate::name::PropertyName;
use crate::tree::{by_name, PropertyTree};
use crate::value::{PropertyValue, ValueSet};

/// One named constraint: a property name plus its admissible values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Criterion {
    pub name: PropertyName,
    pub values: ValueSet,
}

impl Criterion {
    pub fn new(name: impl Into<PropertyName>, values: ValueSet) -> Self {
        Criterion {
            name: name.into(),
            values,
        }
    }

    /// Criterion admitting a single value.
    pub fn of(name: impl Into<PropertyName>, value: impl Into<PropertyValue>) -> Self {
        let mut values = ValueSet::new();
        values.insert(value);
        Criterion::new(name, values)
    }
}

/// Ordered collection of criteria forming one filter request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Criteria(Vec<Criterion>);

impl Criteria {
    pub fn new(criteria: impl IntoIterator<Item = Criterion>) -> Self {
        Criteria(criteria.into_iter().collect())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Criterion> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Decides whether the node's marker children satisfy every
    /// criterion: `!excluded && included && interval_included`.
    ///
    /// All three sub-checks are computed eagerly, so an interval type
    /// error surfaces even when the node is already excluded.
    #[instrument(level = "trace", skip(self, tree))]
    pub fn satisfied_by(&self, tree: &PropertyTree) -> CriteriaResult<bool> {
        let excluded = self.is_excluded(tree);
        let included = self.is_included(tree);
        let included_interval = self.is_included_interval(tree)?;
        Ok(!excluded && included && included_interval)
    }

    /// Prunes every node (at any depth) that does not satisfy the
    /// criteria; the root itself may be pruned to Empty.
    pub fn filter_tree(&self, tree: &PropertyTree) -> CriteriaResult<PropertyTree> {
        tree.try_transform(&|node, children| {
            if self.satisfied_by(node)? {
                Ok(node.with_children(children))
            } else {
                Ok(PropertyTree::Empty)
            }
        })
    }

    fn is_excluded(&self, tree: &PropertyTree) -> bool {
        self.0.iter().any(|criterion| {
            tree.find_children(by_name(criterion.name.exclude_marker()))
                .iter()
                .flat_map(|marker| marker.data().iter())
                .any(|value| criterion.values.contains(value))
        })
    }

    fn is_included(&self, tree: &PropertyTree) -> bool {
        self.0.iter().all(|criterion| {
            let markers = tree.find_children(by_name(criterion.name.include_marker()));
            markers.is_empty()
                || markers
                    .iter()
                    .flat_map(|marker| marker.data().iter())
                    .any(|value| criterion.values.contains(value))
        })
    }

    fn is_included_interval(&self, tree: &PropertyTree) -> CriteriaResult<bool> {
        for criterion in &self.0 {
            let start_node = tree.find_child(by_name(criterion.name.start_marker()));
            // A start marker whose bag is not a comparable singleton
            // counts as no marker at all.
            let Some(start) = start_node.property().single_comparable() else {
                continue;
            };
            let end_node = tree.find_child(by_name(criterion.name.end_marker()));
            let end = end_node.property().single_comparable();

            for value in &criterion.values {
                if !value.is_comparable() {
                    return Err(CriteriaError::NotComparable {
                        name: criterion.name.clone(),
                        value: value.clone(),
                    });
                }
                if !in_range(&criterion.name, start, end, value)? {
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }
}

impl FromIterator<Criterion> for Criteria {
    fn from_iter<I: IntoIterator<Item = Criterion>>(iter: I) -> Self {
        Criteria::new(iter)
    }
}

impl From<Vec<Criterion>> for Criteria {
    fn from(criteria: Vec<Criterion>) -> Self {
        Criteria(criteria)
    }
}

/// Predicate form of the evaluator for use with the fallible algebra.
pub fn by_criteria(
    criteria: &Criteria,
) -> impl Fn(&PropertyTree) -> CriteriaResult<bool> + '_ {
    move |tree: &PropertyTree| criteria.satisfied_by(tree)
}

fn in_range(
    name: &PropertyName,
    start: &PropertyValue,
    end: Option<&PropertyValue>,
    value: &PropertyValue,
) -> CriteriaResult<bool> {
    let lower = start
        .try_cmp(value)
        .ok_or_else(|| CriteriaError::IncomparableTypes {
            name: name.clone(),
            value: value.clone(),
            bound: start.clone(),
        })?;
    if lower == Ordering::Greater {
        return Ok(false);
    }
    if let Some(end) = end {
        let upper = value
            .try_cmp(end)
            .ok_or_else(|| CriteriaError::IncomparableTypes {
                name: name.clone(),
                value: value.clone(),
                bound: end.clone(),
            })?;
        if upper == Ordering::Greater {
            return Ok(false);
        }
    }
    Ok(true)
}
