#![doc = include_str!(concat!("../", std::env!("CARGO_PKG_README")))]
#![forbid(unsafe_code)]

pub mod allocator;
pub mod context;
mod error_handling;
pub mod inject;
pub mod media;
pub mod property;
pub mod registry;
pub mod rule;
pub mod style;
mod test_utils;
mod type_macros;
pub mod values;

pub use context::{StyleContext, inject_styles, render_all, reset_all};
pub use error_handling::Diagnostic;
pub use registry::{RegisterOptions, Registry, RegistryOptions};
pub use rule::StyleRule;

/// Commonly used types and traits.
pub mod prelude {
    pub use super::inject::StyleInjector;
    pub use super::media::MediaQueryValidator;
    pub use super::style::StyleObject;
    pub use super::values::{Color, IntoCss, StyleValue};
    pub use super::{RegisterOptions, Registry, RegistryOptions, StyleContext, StyleRule};
    pub use crate::style;
}
