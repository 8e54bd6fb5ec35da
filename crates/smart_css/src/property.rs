//! Css declarations

use crate::values::StyleValue;

/// Turn a camel cased property name into its hyphenated css form.
///
/// `backgroundColor` becomes `background-color` and a capitalized vendor prefix keeps its leading
/// hyphen (`MozTransition` becomes `-moz-transition`). Internet explorer prefixes are written with
/// a lower case `ms`, so `msTransition` is special cased into `-ms-transition`.
#[must_use]
pub fn hyphenate(name: &str) -> String {
    let mut result = String::with_capacity(name.len().saturating_add(4));
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            result.push('-');
            result.push(c.to_ascii_lowercase());
        } else {
            result.extend(c.to_lowercase());
        }
    }

    if result.starts_with("ms-") {
        result.insert(0, '-');
    }
    result
}

/// Render a single `name:value;` declaration.
#[must_use]
pub fn render_property(name: &str, value: &StyleValue) -> String {
    let mut result = hyphenate(name);
    result.push(':');
    result.push_str(&value.to_css());
    result.push(';');
    result
}

/// A ordered list of flat declarations, the body of one rule block
#[derive(Clone, Debug, Default, PartialEq)]
#[must_use]
pub struct Declarations {
    /// The declarations, in the order they were written
    pub(crate) properties: Vec<(String, StyleValue)>,
}

impl Declarations {
    /// Create a empty declaration list
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a declaration, replacing the value in place if the property is already set.
    pub fn set(mut self, property: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.insert(property.into(), value.into());
        self
    }

    /// Add a declaration in place
    pub(crate) fn insert(&mut self, property: String, value: StyleValue) {
        if let Some(slot) = self
            .properties
            .iter_mut()
            .find(|(existing, _)| *existing == property)
        {
            slot.1 = value;
        } else {
            self.properties.push((property, value));
        }
    }

    /// Is this list empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Number of declarations
    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Iterate over the raw `(property, value)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.properties
            .iter()
            .map(|(property, value)| (property.as_str(), value))
    }

    /// Render the body of a rule block, `prop:value;prop:value;`, without braces.
    #[must_use]
    pub fn to_css(&self) -> String {
        self.iter()
            .map(|(property, value)| render_property(property, value))
            .collect()
    }
}
