//! Values that can appear on the right hand side of a declaration

mod colors;

pub use colors::Color;

use crate::type_macros;

/// Convert a value to a css
pub trait IntoCss {
    /// Convert a value to a css value string
    fn into_css(self) -> String;
}

/// A single property value in a style object.
///
/// Values are written out verbatim. They are not escaped, callers are responsible for handing in
/// safe literals.
#[derive(Clone, Debug, PartialEq)]
pub enum StyleValue {
    /// Any literal, strings and numbers both end up here
    Literal(String),
    /// A structured color, rendered in its hsl form
    Color(Color),
}

impl StyleValue {
    /// Render this value as the text that goes after the `:` in a declaration.
    #[must_use]
    pub fn to_css(&self) -> String {
        match self {
            Self::Literal(value) => value.clone(),
            Self::Color(color) => color.to_hsl_string(),
        }
    }
}

impl IntoCss for StyleValue {
    fn into_css(self) -> String {
        match self {
            Self::Literal(value) => value,
            Self::Color(color) => color.into_css(),
        }
    }
}

impl From<Color> for StyleValue {
    #[inline]
    fn from(value: Color) -> Self {
        Self::Color(value)
    }
}

/// generate `IntoCss` and `StyleValue` conversions for a numeric
macro_rules! impl_numerics {
    ($t:ident, $fmt:ident) => {
        impl IntoCss for $t {
            #[inline]
            fn into_css(self) -> String {
                let mut buffer = $fmt::Buffer::new();
                let result = buffer.format(self);
                result.to_string()
            }
        }

        impl From<$t> for StyleValue {
            #[inline]
            fn from(value: $t) -> Self {
                Self::Literal(value.into_css())
            }
        }
    };
}
type_macros::numerics!(impl_numerics);

/// generate `StyleValue` conversions for a string type
macro_rules! impl_strings {
    ($t:ty) => {
        impl From<$t> for StyleValue {
            #[inline]
            fn from(value: $t) -> Self {
                Self::Literal(String::from(value))
            }
        }
    };
}
type_macros::strings!(impl_strings);
