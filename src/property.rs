//! A named, immutable bag of values with typed accessors.

use crate::name::PropertyName;
use crate::value::{PropertyValue, ValueSet};

/// Immutable property: name, optional description, value bag.
///
/// The `single_*` accessors yield a value only when the bag holds exactly
/// one element of the requested kind; the plural projections filter the
/// bag down to one kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Property {
    pub name: PropertyName,
    pub description: Option<String>,
    pub data: ValueSet,
}

impl Property {
    pub fn new(name: impl Into<PropertyName>, description: Option<&str>, data: ValueSet) -> Self {
        Property {
            name: name.into(),
            description: description.map(str::to_string),
            data,
        }
    }

    pub fn named(name: impl Into<PropertyName>) -> Self {
        Property::new(name, None, ValueSet::new())
    }

    pub fn with_data(name: impl Into<PropertyName>, data: ValueSet) -> Self {
        Property::new(name, None, data)
    }

    /// True iff the bag is exactly `{true}`.
    pub fn is_set(&self) -> bool {
        self.single_bool().unwrap_or(false)
    }

    /// True iff the bag is exactly `{false}`.
    pub fn is_not_set(&self) -> bool {
        self.single_bool().map(|value| !value).unwrap_or(false)
    }

    pub fn single_bool(&self) -> Option<bool> {
        self.data.single().and_then(PropertyValue::as_bool)
    }

    pub fn single_int(&self) -> Option<i32> {
        self.data.single().and_then(PropertyValue::as_int)
    }

    pub fn single_long(&self) -> Option<i64> {
        self.data.single().and_then(PropertyValue::as_long)
    }

    pub fn single_str(&self) -> Option<&str> {
        self.data.single().and_then(PropertyValue::as_str)
    }

    pub fn single_object(&self) -> Option<&std::collections::BTreeMap<String, PropertyValue>> {
        self.data.single().and_then(PropertyValue::as_object)
    }

    /// The sole element, when it belongs to the comparable family.
    pub fn single_comparable(&self) -> Option<&PropertyValue> {
        self.data.single().filter(|value| value.is_comparable())
    }

    pub fn bools(&self) -> impl Iterator<Item = bool> + '_ {
        self.data.iter().filter_map(PropertyValue::as_bool)
    }

    pub fn ints(&self) -> impl Iterator<Item = i32> + '_ {
        self.data.iter().filter_map(PropertyValue::as_int)
    }

    pub fn longs(&self) -> impl Iterator<Item = i64> + '_ {
        self.data.iter().filter_map(PropertyValue::as_long)
    }

    pub fn strings(&self) -> impl Iterator<Item = &str> + '_ {
        self.data.iter().filter_map(PropertyValue::as_str)
    }

    pub fn objects(
        &self,
    ) -> impl Iterator<Item = &std::collections::BTreeMap<String, PropertyValue>> + '_ {
        self.data.iter().filter_map(PropertyValue::as_object)
    }

    /// Applies `updater` to the value bag; returns `self` unchanged when
    /// the result is equal to the current bag.
    pub fn update(&self, updater: impl FnOnce(&ValueSet) -> ValueSet) -> Property {
        let updated = updater(&self.data);
        if updated == self.data {
            self.clone()
        } else {
            Property {
                data: updated,
                ..self.clone()
            }
        }
    }
}
