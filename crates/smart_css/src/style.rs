//! Style objects, the input format for registering rules.
//!
//! A [`StyleObject`] is the loosely shaped mapping an application writes, where a key means
//! different things depending on how it starts:
//!
//! * `:hover`, `::before`, ... start a pseudo group, holding flat declarations for that pseudo.
//! * `@media ...` starts a media group, holding a whole nested style for that condition.
//! * Anything else is a property name.
//!
//! Registering a rule normalizes this once into a [`StyleDef`], rendering never sniffs key
//! prefixes again.

use indexmap::IndexMap;

use crate::error_handling::{Diagnostic, report};
use crate::media::MediaQueryValidator;
use crate::property::Declarations;
use crate::values::StyleValue;

/// The prefix marking a media group key
const MEDIA_PREFIX: &str = "@media";

/// A value in a style object
#[derive(Clone, Debug, PartialEq)]
pub enum StyleEntry {
    /// A plain property value
    Value(StyleValue),
    /// A nested group, only meaningful under a pseudo or media key
    Nested(StyleObject),
}

/// A ordered raw style mapping.
///
/// Setting a key that already exists replaces its value but keeps its original position.
#[derive(Clone, Debug, Default, PartialEq)]
#[must_use]
pub struct StyleObject {
    /// The raw entries, in insertion order
    entries: IndexMap<String, StyleEntry>,
}

impl StyleObject {
    /// Create a empty style object
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property
    pub fn set(mut self, key: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.entries
            .insert(key.into(), StyleEntry::Value(value.into()));
        self
    }

    /// Set a nested pseudo (`:hover`) or media (`@media ...`) group
    pub fn nest(mut self, key: impl Into<String>, group: StyleObject) -> Self {
        self.entries.insert(key.into(), StyleEntry::Nested(group));
        self
    }

    /// Iterate the raw entries in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleEntry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    /// Is this object empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<StyleValue>> FromIterator<(K, V)> for StyleObject {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        iter.into_iter()
            .fold(Self::new(), |object, (key, value)| object.set(key, value))
    }
}

/// Build a [`StyleObject`] with literal syntax.
///
/// Braced values become nested groups, anything else is converted into a [`StyleValue`].
///
/// ```rust
/// use smart_css::style;
/// use smart_css::values::Color;
///
/// let button = style! {
///     "color" => "red",
///     "zIndex" => 10,
///     ":hover" => {
///         "color" => Color::rgb(0, 0, 255),
///     },
///     "@media (max-width: 600px)" => {
///         "display" => "none",
///     },
/// };
/// assert!(!button.is_empty());
/// ```
#[macro_export]
macro_rules! style {
    (@munch $object:expr;) => { $object };
    (@munch $object:expr; $key:expr => { $($inner:tt)* } $(, $($rest:tt)*)?) => {
        $crate::style!(@munch $object.nest($key, $crate::style!($($inner)*)); $($($rest)*)?)
    };
    (@munch $object:expr; $key:expr => $value:expr $(, $($rest:tt)*)?) => {
        $crate::style!(@munch $object.set($key, $value); $($($rest)*)?)
    };
    ($($body:tt)*) => {
        $crate::style!(@munch $crate::style::StyleObject::new(); $($body)*)
    };
}

/// A normalized style, split into its flat declarations and nested groups.
#[derive(Clone, Debug, Default, PartialEq)]
#[must_use]
pub struct StyleDef {
    /// Plain declarations applying to the rule selector itself
    pub(crate) declarations: Declarations,
    /// `(pseudo, declarations)` groups appended to the rule selector
    pub(crate) pseudo_groups: Vec<(String, Declarations)>,
    /// `(raw @media key, style)` groups, already validated
    pub(crate) media_groups: Vec<(String, StyleDef)>,
}

impl StyleDef {
    /// Normalize a raw style object.
    ///
    /// Media keys the validator rejects are reported and dropped, the rest of the style is kept.
    pub fn parse(object: &StyleObject, validator: &dyn MediaQueryValidator) -> Self {
        let mut result = Self::default();

        for (key, entry) in object.iter() {
            if key.starts_with(':') {
                result
                    .pseudo_groups
                    .push((key.to_owned(), flat_declarations(key, entry)));
            } else if key.starts_with(MEDIA_PREFIX) {
                if !validator.is_valid(key) {
                    report(&Diagnostic::InvalidMediaQuery {
                        query: key.to_owned(),
                    });
                    continue;
                }
                let nested = match entry {
                    StyleEntry::Nested(group) => Self::parse(group, validator),
                    StyleEntry::Value(_) => {
                        log::debug!("Media group {key} has a plain value, ignoring it");
                        continue;
                    }
                };
                result.media_groups.push((key.to_owned(), nested));
            } else {
                match entry {
                    StyleEntry::Value(value) => {
                        result.declarations.insert(key.to_owned(), value.clone());
                    }
                    StyleEntry::Nested(_) => {
                        log::debug!("Property {key} holds a nested group, ignoring it");
                    }
                }
            }
        }

        result
    }

    /// The flat declarations
    pub fn declarations(&self) -> &Declarations {
        &self.declarations
    }

    /// The nested pseudo groups
    #[must_use]
    pub fn pseudo_groups(&self) -> &[(String, Declarations)] {
        &self.pseudo_groups
    }

    /// The nested media groups
    #[must_use]
    pub fn media_groups(&self) -> &[(String, StyleDef)] {
        &self.media_groups
    }

    /// Render every block of this style scoped under `selector`.
    ///
    /// The flat declarations become `selector{...}`, each pseudo group a sibling
    /// `selector:pseudo{...}` block, and each media group `@media ...{...}` wrapping the nested
    /// style under the same selector. A empty base block is left out when there are nested groups
    /// to carry the output.
    #[must_use]
    pub fn to_css(&self, selector: &str) -> String {
        let mut result = String::new();

        let body = self.declarations.to_css();
        let has_groups = !self.pseudo_groups.is_empty() || !self.media_groups.is_empty();
        if !body.is_empty() || !has_groups {
            result.push_str(&format!("{selector}{{{body}}}"));
        }

        for (pseudo, declarations) in &self.pseudo_groups {
            result.push_str(&format!("{selector}{pseudo}{{{}}}", declarations.to_css()));
        }

        for (query, style) in &self.media_groups {
            result.push_str(&format!("{query}{{{}}}", style.to_css(selector)));
        }

        result
    }
}

/// Collect the plain values of a pseudo group, nesting stops here.
fn flat_declarations(key: &str, entry: &StyleEntry) -> Declarations {
    let mut declarations = Declarations::new();
    match entry {
        StyleEntry::Nested(group) => {
            for (property, value) in group.iter() {
                match value {
                    StyleEntry::Value(value) => {
                        declarations.insert(property.to_owned(), value.clone());
                    }
                    StyleEntry::Nested(_) => {
                        log::debug!("Dropping {property} nested inside pseudo group {key}");
                    }
                }
            }
        }
        StyleEntry::Value(_) => {
            log::debug!("Pseudo group {key} has a plain value, ignoring it");
        }
    }
    declarations
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use insta::assert_snapshot;

    use super::*;
    use crate::media::BasicMediaValidator;
    use crate::test_utils::{self, assert_valid_css};
    use crate::values::Color;

    fn parse(object: &StyleObject) -> StyleDef {
        StyleDef::parse(object, &BasicMediaValidator)
    }

    #[test]
    fn macro_matches_builder() {
        let from_macro = style! {
            "color" => "red",
            "zIndex" => 2,
            ":hover" => { "color" => "blue" },
        };
        let from_builder = StyleObject::new()
            .set("color", "red")
            .set("zIndex", 2)
            .nest(":hover", StyleObject::new().set("color", "blue"));

        assert_eq!(from_macro, from_builder);
        assert_eq!(style! {}, StyleObject::new());
    }

    #[test]
    fn macro_accepts_expressions() {
        let object = style! {
            "color" => Color::rgb(255, 0, 0),
            "width" => format!("{}px", 4 * 5)
        };
        assert_eq!(parse(&object).to_css(".a"), ".a{color:hsl(0, 100%, 50%);width:20px;}");
    }

    #[test]
    fn resetting_a_key_keeps_position() {
        let object = style! {
            "width" => "1px",
            "color" => "red",
            "width" => "2px",
        };
        assert_snapshot!(parse(&object).to_css(".a"), @".a{width:2px;color:red;}");
    }

    #[test]
    fn collected_from_pairs() {
        let object: StyleObject = [("color", "red"), ("marginTop", "1px")].into_iter().collect();
        assert_snapshot!(parse(&object).to_css(".x"), @".x{color:red;margin-top:1px;}");
    }

    #[test]
    fn normalizes_into_groups() {
        let object = style! {
            "color" => "red",
            ":hover" => { "color" => "blue" },
            "@media (max-width: 600px)" => { "color" => "green" },
        };
        let def = parse(&object);

        assert_eq!(def.declarations().len(), 1);
        assert_eq!(def.pseudo_groups().len(), 1);
        assert_eq!(def.media_groups().len(), 1);
    }

    #[test]
    fn pseudo_groups_render_as_siblings() {
        let object = style! {
            "color" => "red",
            ":hover" => { "color" => "blue" },
            "::before" => { "content" => "'>'" },
        };
        let css = parse(&object).to_css(".c-0");
        assert_snapshot!(css, @".c-0{color:red;}.c-0:hover{color:blue;}.c-0::before{content:'>';}");
    }

    #[test]
    fn media_groups_nest_the_selector() {
        let object = style! {
            "color" => "red",
            "@media (max-width: 600px)" => {
                "color" => "green",
                ":hover" => { "color" => "yellow" },
            },
        };
        let css = parse(&object).to_css(".c-0");
        assert_snapshot!(
            css,
            @".c-0{color:red;}@media (max-width: 600px){.c-0{color:green;}.c-0:hover{color:yellow;}}"
        );
        assert_valid_css(&css);
    }

    #[test]
    fn empty_base_block_left_out_with_groups() {
        let object = style! { ":hover" => { "color" => "blue" } };
        assert_snapshot!(parse(&object).to_css(".c"), @".c:hover{color:blue;}");
        assert_snapshot!(parse(&StyleObject::new()).to_css(".c"), @".c{}");
    }

    #[test]
    fn nesting_stops_at_pseudo_groups() {
        let object = style! {
            ":hover" => {
                "color" => "blue",
                ":focus" => { "color" => "red" },
            },
            "margin" => { "top" => "1px" },
        };
        assert_snapshot!(parse(&object).to_css(".c"), @".c:hover{color:blue;}");
    }

    #[test]
    fn invalid_media_dropped_with_diagnostic() {
        test_utils::init_logger();
        let _ = test_utils::take_records();

        let object = style! {
            "color" => "red",
            "@media (max-width: 600px" => { "color" => "green" },
        };
        let css = parse(&object).to_css(".c");

        assert_eq!(css, ".c{color:red;}");
        let records = test_utils::take_records();
        assert_eq!(
            records,
            vec![(
                log::Level::Warn,
                String::from("@media (max-width: 600px is not a valid media query.")
            )]
        );
    }
}
