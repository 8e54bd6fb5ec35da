//! Various internal error handling mechanisms
//!
//! Nothing in this crate is allowed to fail loudly. A missing class or a broken media query
//! degrades the produced styling, and the reason ends up in the log.

use std::fmt;

/// Cold path hint, causes compiler to better optimize unlikely error paths.
#[cold]
pub(crate) fn cold_path() {}

/// A non-fatal problem noticed while registering, looking up or rendering styles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A class id was looked up that was never registered in the registry.
    MissingClass {
        /// The class id that was asked for
        class_id: String,
    },
    /// A nested `@media` key was rejected by the media query validator and dropped.
    InvalidMediaQuery {
        /// The raw key, including the `@media` prefix
        query: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingClass { class_id } => write!(f, "Class \"{class_id}\" not set."),
            Self::InvalidMediaQuery { query } => write!(f, "{query} is not a valid media query."),
        }
    }
}

/// Emit a diagnostic to the log as a warning.
pub(crate) fn report(diagnostic: &Diagnostic) {
    cold_path();
    log::warn!("{diagnostic}");
}
