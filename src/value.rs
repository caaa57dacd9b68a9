//! Heterogeneous property values and the ordered-unique value bag.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use itertools::Itertools;

/// One value inside a property's bag.
///
/// The bag is heterogeneous: a single property may hold booleans, numbers,
/// strings and objects side by side. `Bool`, `Int`, `Long` and `Str` form
/// the comparable family; ordering is defined only within one variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyValue {
    Bool(bool),
    Int(i32),
    Long(i64),
    Str(String),
    Object(BTreeMap<String, PropertyValue>),
}

impl PropertyValue {
    /// Human-readable kind tag, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            PropertyValue::Bool(_) => "boolean",
            PropertyValue::Int(_) => "int",
            PropertyValue::Long(_) => "long",
            PropertyValue::Str(_) => "string",
            PropertyValue::Object(_) => "object",
        }
    }

    /// True for variants that carry a total order.
    pub fn is_comparable(&self) -> bool {
        !matches!(self, PropertyValue::Object(_))
    }

    /// Compares two values of the same variant.
    ///
    /// Returns `None` for objects and for cross-variant pairs; the
    /// criteria evaluator turns that into a hard error rather than a
    /// silent non-match.
    pub fn try_cmp(&self, other: &PropertyValue) -> Option<Ordering> {
        match (self, other) {
            (PropertyValue::Bool(a), PropertyValue::Bool(b)) => Some(a.cmp(b)),
            (PropertyValue::Int(a), PropertyValue::Int(b)) => Some(a.cmp(b)),
            (PropertyValue::Long(a), PropertyValue::Long(b)) => Some(a.cmp(b)),
            (PropertyValue::Str(a), PropertyValue::Str(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            PropertyValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_long(&self) -> Option<i64> {
        match self {
            PropertyValue::Long(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::Str(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, PropertyValue>> {
        match self {
            PropertyValue::Object(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Bool(value) => write!(f, "{}", value),
            PropertyValue::Int(value) => write!(f, "{}", value),
            PropertyValue::Long(value) => write!(f, "{}", value),
            PropertyValue::Str(value) => f.write_str(value),
            PropertyValue::Object(map) => {
                write!(f, "{{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        PropertyValue::Int(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        PropertyValue::Long(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Str(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::Str(value)
    }
}

impl From<BTreeMap<String, PropertyValue>> for PropertyValue {
    fn from(value: BTreeMap<String, PropertyValue>) -> Self {
        PropertyValue::Object(value)
    }
}

/// Insertion-ordered, deduplicated bag of values.
///
/// Iteration preserves insertion order; equality and hashing ignore it
/// (set semantics).
#[derive(Debug, Clone, Default, Eq)]
pub struct ValueSet(Vec<PropertyValue>);

impl ValueSet {
    pub fn new() -> Self {
        ValueSet(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, value: &PropertyValue) -> bool {
        self.0.contains(value)
    }

    /// Appends a value unless an equal one is already present.
    pub fn insert(&mut self, value: impl Into<PropertyValue>) {
        let value = value.into();
        if !self.0.contains(&value) {
            self.0.push(value);
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PropertyValue> {
        self.0.iter()
    }

    /// The sole element, when the bag is a singleton.
    pub fn single(&self) -> Option<&PropertyValue> {
        match self.0.as_slice() {
            [value] => Some(value),
            _ => None,
        }
    }

    /// True iff any element is also present in `other`.
    pub fn intersects(&self, other: &ValueSet) -> bool {
        self.0.iter().any(|value| other.contains(value))
    }
}

impl PartialEq for ValueSet {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len() && self.0.iter().all(|value| other.contains(value))
    }
}

impl Hash for ValueSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Order-insensitive: combine per-element hashes commutatively.
        let mut combined = 0u64;
        for value in &self.0 {
            let mut hasher = std::collections::hash_map::DefaultHasher::new();
            value.hash(&mut hasher);
            combined = combined.wrapping_add(hasher.finish());
        }
        state.write_usize(self.0.len());
        state.write_u64(combined);
    }
}

impl FromIterator<PropertyValue> for ValueSet {
    fn from_iter<I: IntoIterator<Item = PropertyValue>>(iter: I) -> Self {
        ValueSet(iter.into_iter().unique().collect())
    }
}

impl From<Vec<PropertyValue>> for ValueSet {
    fn from(values: Vec<PropertyValue>) -> Self {
        values.into_iter().collect()
    }
}

impl Extend<PropertyValue> for ValueSet {
    fn extend<I: IntoIterator<Item = PropertyValue>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a> IntoIterator for &'a ValueSet {
    type Item = &'a PropertyValue;
    type IntoIter = std::slice::Iter<'a, PropertyValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for ValueSet {
    type Item = PropertyValue;
    type IntoIter = std::vec::IntoIter<PropertyValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Builds a [`ValueSet`] from a list of convertible values.
///
/// ```
/// use proptree::{values, PropertyValue};
///
/// let set = values![1, "red", true];
/// assert_eq!(set.len(), 3);
/// assert!(set.contains(&PropertyValue::Str("red".into())));
/// ```
#[macro_export]
macro_rules! values {
    () => {
        $crate::ValueSet::new()
    };
    ($($value:expr),+ $(,)?) => {
        [$($crate::PropertyValue::from($value)),+]
            .into_iter()
            .collect::<$crate::ValueSet>()
    };
}
