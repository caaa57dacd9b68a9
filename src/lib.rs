//! Persistent named property trees with a declarative criteria engine.
//!
//! A [`PropertyTree`] is an immutable, structurally-shared tree of named
//! properties: either the absorbing Empty sentinel or a node holding a
//! [`Property`] (name, optional description, heterogeneous value bag) and
//! its non-empty children. A generic bottom-up rewrite algebra (traverse,
//! prune, replace, transform) produces new trees that share untouched
//! subtrees with their inputs.
//!
//! [`Criteria`] filter trees through naming conventions on child
//! properties: a child named `<base>Exclude`, `<base>Include`,
//! `<base>Start` or `<base>End` is a marker the evaluator reads instead
//! of ordinary data.
//!
//! ```
//! use proptree::{values, Criteria, Criterion, PropertyTree};
//!
//! let offer = PropertyTree::node_of(
//!     "offer",
//!     Some("weekend offer"),
//!     values![],
//!     [
//!         PropertyTree::leaf("colorExclude", values!["red"]),
//!         PropertyTree::leaf("ageStart", values![18]),
//!     ],
//! );
//!
//! let criteria = Criteria::new([Criterion::of("age", 30)]);
//! assert!(criteria.satisfied_by(&offer)?);
//!
//! let criteria = Criteria::new([Criterion::of("color", "red")]);
//! assert!(!criteria.satisfied_by(&offer)?);
//! # Ok::<(), proptree::CriteriaError>(())
//! ```

pub mod builder;
pub mod criteria;
pub mod errors;
pub mod name;
pub mod property;
pub mod render;
pub mod tree;
pub mod util;
pub mod value;

pub use builder::PropertyTreeBuilder;
pub use criteria::{by_criteria, Criteria, Criterion};
pub use errors::{CriteriaError, CriteriaResult, TreeError, TreeResult};
pub use name::{
    PropertyName, CRITERION_SUFFIXES, EXCLUDE_SUFFIX, INCLUDE_SUFFIX, INTERVAL_END_SUFFIX,
    INTERVAL_START_SUFFIX,
};
pub use property::Property;
pub use render::TreeRender;
pub use tree::{by_name, PropertyNode, PropertyTree, Traverse};
pub use value::{PropertyValue, ValueSet};
