//! Element attributes.

use core::slice;

/// An attribute on an element: a name and a value.
///
/// Boolean attributes (`<input disabled>`) have an empty value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name, never empty.
    pub name: String,
    /// Attribute value, possibly empty.
    pub value: String,
}

impl Attribute {
    /// Create a new attribute with the given name and value.
    #[must_use]
    pub const fn new(name: String, value: String) -> Self {
        Self { name, value }
    }
}

/// Attribute map that remembers insertion order.
///
/// Names are unique: inserting a name that is already present replaces its
/// value and keeps its original position. Elements carry a handful of
/// attributes at most, so lookups are a linear scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(Vec<Attribute>);

impl Attributes {
    /// Create an empty attribute map.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Insert or overwrite an attribute, returning the previous value.
    ///
    /// An empty name is ignored and returns `None`.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let name = name.into();
        if name.is_empty() {
            return None;
        }
        let value = value.into();
        if let Some(existing) = self.0.iter_mut().find(|attr| attr.name == name) {
            return Some(core::mem::replace(&mut existing.value, value));
        }
        self.0.push(Attribute::new(name, value));
        None
    }

    /// Value of the attribute named `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    /// True if an attribute named `name` is present, whatever its value.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|attr| attr.name == name)
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if there are no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Attributes in insertion order.
    pub fn iter(&self) -> slice::Iter<'_, Attribute> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = &'a Attribute;
    type IntoIter = slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut attributes = Self::new();
        for (name, value) in iter {
            let _ = attributes.insert(name, value);
        }
        attributes
    }
}
