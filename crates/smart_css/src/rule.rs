//! A registered style rule and its serialization

use std::rc::{Rc, Weak};

use crate::registry::{Registry, RegistryInner};
use crate::style::StyleDef;

/// One selector's worth of style.
///
/// Immutable once constructed, registering the same selector again replaces the rule in the
/// registry rather than changing it.
#[derive(Clone, Debug)]
pub struct StyleRule {
    /// The generated (or explicitly given) class name, without the leading `.`
    pub(crate) class_name: String,
    /// Empty, or a pseudo fragment starting with `:` such as `:hover::before`
    pub(crate) pseudo: String,
    /// The normalized style
    pub(crate) style: StyleDef,
    /// A media condition wrapped around the whole rule, without the parentheses
    pub(crate) media: Option<String>,
    /// The registry this rule was registered in
    pub(crate) owner: Weak<RegistryInner>,
}

impl StyleRule {
    /// Construct a rule that does not belong to any registry
    #[must_use]
    pub fn new(
        class_name: impl Into<String>,
        pseudo: impl Into<String>,
        style: StyleDef,
        media: Option<String>,
    ) -> Self {
        Self {
            class_name: class_name.into(),
            pseudo: pseudo.into(),
            style,
            media,
            owner: Weak::new(),
        }
    }

    /// The physical class name
    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// The pseudo suffix, or `""`
    #[must_use]
    pub fn pseudo(&self) -> &str {
        &self.pseudo
    }

    /// The style
    pub fn style(&self) -> &StyleDef {
        &self.style
    }

    /// The media condition, if any
    #[must_use]
    pub fn media(&self) -> Option<&str> {
        self.media.as_deref()
    }

    /// The registry that owns this rule, if it is still alive
    #[must_use]
    pub fn registry(&self) -> Option<Registry> {
        self.owner.upgrade().map(Registry::from_inner)
    }

    /// Does this rule belong to the given registry
    #[must_use]
    pub fn is_owned_by(&self, registry: &Registry) -> bool {
        Weak::ptr_eq(&self.owner, &Rc::downgrade(&registry.inner))
    }

    /// The selector this rule targets, `.` + class name + pseudo suffix
    #[must_use]
    pub fn selector(&self) -> String {
        format!(".{}{}", self.class_name, self.pseudo)
    }

    /// Serialize into css.
    ///
    /// ```rust
    /// use smart_css::{StyleRule, style};
    /// use smart_css::media::BasicMediaValidator;
    /// use smart_css::style::StyleDef;
    ///
    /// let style = StyleDef::parse(&style! { "color" => "red" }, &BasicMediaValidator);
    /// let rule = StyleRule::new("c-1", "", style, Some(String::from("max-width: 600px")));
    /// assert_eq!(rule.to_css(), "@media (max-width: 600px){.c-1{color:red;}}");
    /// ```
    #[must_use]
    pub fn to_css(&self) -> String {
        let css = self.style.to_css(&self.selector());
        match &self.media {
            Some(condition) => format!("@media ({condition}){{{css}}}"),
            None => css,
        }
    }
}
