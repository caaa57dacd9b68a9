//! Property names and the criterion marker suffix conventions.
//!
//! A child whose name ends in one of the reserved suffixes is a marker
//! read by the criteria evaluator instead of ordinary domain data. The
//! convention is purely lexical: a property that happens to end in
//! `Start` is indistinguishable from a real interval marker. Callers own
//! the namespace and have to avoid the collision.

use std::fmt;

/// Suffix marking an inclusion whitelist child (`<base>Include`).
pub const INCLUDE_SUFFIX: &str = "Include";
/// Suffix marking an exclusion blacklist child (`<base>Exclude`).
pub const EXCLUDE_SUFFIX: &str = "Exclude";
/// Suffix marking the lower interval bound child (`<base>Start`).
pub const INTERVAL_START_SUFFIX: &str = "Start";
/// Suffix marking the upper interval bound child (`<base>End`).
pub const INTERVAL_END_SUFFIX: &str = "End";

/// All reserved criterion suffixes.
pub const CRITERION_SUFFIXES: [&str; 4] = [
    INCLUDE_SUFFIX,
    EXCLUDE_SUFFIX,
    INTERVAL_START_SUFFIX,
    INTERVAL_END_SUFFIX,
];

/// Opaque string key identifying a property.
///
/// Equality and suffix inspection are its only operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct PropertyName(String);

impl PropertyName {
    pub fn new(value: impl Into<String>) -> Self {
        PropertyName(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True iff the name carries one of the reserved criterion suffixes.
    pub fn is_criterion(&self) -> bool {
        CRITERION_SUFFIXES
            .iter()
            .any(|suffix| self.0.ends_with(suffix))
    }

    pub fn is_include_criterion(&self) -> bool {
        self.0.ends_with(INCLUDE_SUFFIX)
    }

    pub fn is_exclude_criterion(&self) -> bool {
        self.0.ends_with(EXCLUDE_SUFFIX)
    }

    pub fn is_include_exclude_criterion(&self) -> bool {
        self.is_include_criterion() || self.is_exclude_criterion()
    }

    pub fn is_interval_start_criterion(&self) -> bool {
        self.0.ends_with(INTERVAL_START_SUFFIX)
    }

    pub fn is_interval_end_criterion(&self) -> bool {
        self.0.ends_with(INTERVAL_END_SUFFIX)
    }

    pub fn is_interval_criterion(&self) -> bool {
        self.is_interval_start_criterion() || self.is_interval_end_criterion()
    }

    /// Base property name with the terminal criterion suffix stripped.
    ///
    /// Only the suffix at the end of the name is removed; occurrences
    /// elsewhere in the name are left alone. Non-marker names are
    /// returned unchanged.
    pub fn base_property(&self) -> PropertyName {
        for suffix in CRITERION_SUFFIXES {
            if let Some(base) = self.0.strip_suffix(suffix) {
                return PropertyName::new(base);
            }
        }
        self.clone()
    }

    /// Name of the inclusion marker child for this base name.
    pub fn include_marker(&self) -> PropertyName {
        self.with_suffix(INCLUDE_SUFFIX)
    }

    /// Name of the exclusion marker child for this base name.
    pub fn exclude_marker(&self) -> PropertyName {
        self.with_suffix(EXCLUDE_SUFFIX)
    }

    /// Name of the interval start marker child for this base name.
    pub fn start_marker(&self) -> PropertyName {
        self.with_suffix(INTERVAL_START_SUFFIX)
    }

    /// Name of the interval end marker child for this base name.
    pub fn end_marker(&self) -> PropertyName {
        self.with_suffix(INTERVAL_END_SUFFIX)
    }

    /// End marker name paired with a start marker (`<base>End`).
    pub fn end_marker_for_start(&self) -> PropertyName {
        self.base_property().end_marker()
    }

    fn with_suffix(&self, suffix: &str) -> PropertyName {
        PropertyName(format!("{}{}", self.0, suffix))
    }
}

impl From<&str> for PropertyName {
    fn from(value: &str) -> Self {
        PropertyName::new(value)
    }
}

impl From<String> for PropertyName {
    fn from(value: String) -> Self {
        PropertyName(value)
    }
}

impl fmt::Display for PropertyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
