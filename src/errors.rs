use thiserror::Error;

use crate::name::PropertyName;
use crate::value::PropertyValue;

/// Errors raised by tree construction and lookup.
#[derive(Error, Debug)]
pub enum TreeError {
    #[error("property name required")]
    NameRequired,

    #[error("no node matched the predicate")]
    NotFound,
}

pub type TreeResult<T> = Result<T, TreeError>;

/// Errors raised while evaluating criteria against a tree node.
///
/// These are configuration errors: the criteria or the tree shape is
/// wrong and the caller has to fix it. Evaluation never degrades a type
/// problem into a silent non-match.
#[derive(Error, Debug)]
pub enum CriteriaError {
    #[error("criterion value for '{name}' is not comparable: {value}")]
    NotComparable {
        name: PropertyName,
        value: PropertyValue,
    },

    #[error(
        "cannot compare {} value {} with {} bound {} for '{}'",
        .value.kind(),
        .value,
        .bound.kind(),
        .bound,
        .name
    )]
    IncomparableTypes {
        name: PropertyName,
        value: PropertyValue,
        bound: PropertyValue,
    },
}

pub type CriteriaResult<T> = Result<T, CriteriaError>;
