//! Registries, mapping semantic class ids to generated class names and rules
//!
//! An application creates one [`Registry`] per logical module and registers its styles under
//! short class ids:
//!
//! ```rust
//! use smart_css::{Registry, RegistryOptions, StyleContext, style};
//!
//! let context = StyleContext::new();
//! let css = Registry::new(&context, RegistryOptions::default());
//!
//! css.register("button", style! { "color" => "red" });
//! css.register("button:hover", style! { "color" => "blue" });
//!
//! assert_eq!(css.lookup("button"), "c-button-0");
//! assert_eq!(
//!     context.render_all(),
//!     ".c-button-0{color:red;}.c-button-0:hover{color:blue;}"
//! );
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::context::{ContextShared, StyleContext};
use crate::error_handling::{Diagnostic, report};
use crate::rule::StyleRule;
use crate::style::{StyleDef, StyleObject};

/// Options fixed when a registry is created
#[derive(Clone, Debug)]
#[must_use]
pub struct RegistryOptions {
    /// Include the class id in generated class names (`c-button-3` instead of `c-3`)
    pub prefix_class_id: bool,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            prefix_class_id: true,
        }
    }
}

impl RegistryOptions {
    /// The default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set [`Self::prefix_class_id`]
    pub fn prefix_class_id(mut self, prefix: bool) -> Self {
        self.prefix_class_id = prefix;
        self
    }
}

/// Options for a single [`Registry::register_with`] call
#[derive(Clone, Debug, Default)]
#[must_use]
pub struct RegisterOptions {
    /// Use this class name verbatim instead of generating one.
    /// Lets rules in different registries share a physical class.
    pub class_name: Option<String>,
    /// Wrap the rule in `@media (<media>)`, the condition is used as is.
    pub media: Option<String>,
}

impl RegisterOptions {
    /// No overrides
    pub fn new() -> Self {
        Self::default()
    }

    /// Set [`Self::class_name`]
    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// Set [`Self::media`]
    pub fn media(mut self, media: impl Into<String>) -> Self {
        self.media = Some(media.into());
        self
    }
}

/// The mutable part of a registry
#[derive(Default)]
struct RegistryState {
    /// class id -> class name, pseudo variants share the entry of their class id
    class_names: IndexMap<String, String>,
    /// class id + pseudo -> rule, in registration order
    rules: IndexMap<String, StyleRule>,
}

/// The data behind a [`Registry`] handle
pub(crate) struct RegistryInner {
    /// The allocation state of the context this registry was created in
    shared: Rc<ContextShared>,
    /// See [`RegistryOptions::prefix_class_id`]
    prefix_class_id: bool,
    /// Registered classes
    state: RefCell<RegistryState>,
}

/// A set of styles registered under class ids.
///
/// Cheap to clone, clones refer to the same registry.
#[derive(Clone)]
#[must_use]
pub struct Registry {
    /// The shared data
    pub(crate) inner: Rc<RegistryInner>,
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("prefix_class_id", &self.inner.prefix_class_id)
            .field("rules", &self.style_rules().len())
            .finish_non_exhaustive()
    }
}

/// Split a selector into its class id and pseudo fragment, at the first `:`.
///
/// ```rust
/// use smart_css::registry::split_selector;
///
/// assert_eq!(split_selector("button"), ("button", ""));
/// assert_eq!(split_selector("button:hover::before"), ("button", ":hover::before"));
/// ```
#[must_use]
pub fn split_selector(selector: &str) -> (&str, &str) {
    match selector.find(':') {
        Some(index) => selector.split_at(index),
        None => (selector, ""),
    }
}

impl Registry {
    /// Create a registry and add it to `context`
    pub fn new(context: &StyleContext, options: RegistryOptions) -> Self {
        let inner = Rc::new(RegistryInner {
            shared: context.shared(),
            prefix_class_id: options.prefix_class_id,
            state: RefCell::new(RegistryState::default()),
        });
        context.attach(Rc::clone(&inner));
        Self { inner }
    }

    /// Wrap existing registry data
    pub(crate) fn from_inner(inner: Rc<RegistryInner>) -> Self {
        Self { inner }
    }

    /// Register a style, see [`Self::register_with`]
    pub fn register(&self, selector: &str, style: StyleObject) -> StyleRule {
        self.register_with(selector, style, RegisterOptions::default())
    }

    /// Register a style under `selector`, `<class id>` or `<class id>:<pseudo>`.
    ///
    /// The class name is, in order of preference, the one given in `options`, the one already
    /// used by this class id (so `button:hover` targets the same class as `button`), or a fresh
    /// `c[-<class id>]-<id>`.
    ///
    /// Registering the same selector twice replaces the earlier rule.
    pub fn register_with(
        &self,
        selector: &str,
        style: StyleObject,
        options: RegisterOptions,
    ) -> StyleRule {
        let (class_id, pseudo) = split_selector(selector);
        let style = StyleDef::parse(&style, &*self.inner.shared.validator);

        let mut state = self.inner.state.borrow_mut();

        let class_name = match options.class_name {
            Some(class_name) => class_name,
            None => match state.class_names.get(class_id) {
                Some(existing) => existing.clone(),
                None => self.generate_class_name(class_id),
            },
        };

        let rule = StyleRule {
            class_name: class_name.clone(),
            pseudo: pseudo.to_owned(),
            style,
            media: options.media,
            owner: Rc::downgrade(&self.inner),
        };
        log::trace!("Registered {selector} as {}", rule.selector());

        state
            .class_names
            .insert(class_id.to_owned(), class_name);
        state.rules.insert(selector.to_owned(), rule.clone());
        rule
    }

    /// A fresh class name for `class_id`
    fn generate_class_name(&self, class_id: &str) -> String {
        let mut class_name = String::from("c");
        if self.inner.prefix_class_id {
            class_name.push('-');
            class_name.push_str(class_id);
        }
        class_name.push('-');
        class_name.push_str(itoa::Buffer::new().format(self.inner.shared.ids.next_id()));
        class_name
    }

    /// Get the class name for a class id, without any pseudo part.
    ///
    /// A class id that was never registered is reported and gives `""`, so the markup simply ends
    /// up without the class.
    #[must_use]
    pub fn lookup(&self, class_id: &str) -> String {
        let state = self.inner.state.borrow();
        if let Some(class_name) = state.class_names.get(class_id) {
            class_name.clone()
        } else {
            report(&Diagnostic::MissingClass {
                class_id: class_id.to_owned(),
            });
            String::new()
        }
    }

    /// Look up every class id whose flag is `true`, in the order given.
    ///
    /// ```rust
    /// # use smart_css::{StyleContext, RegistryOptions, style};
    /// let css = StyleContext::new().registry(RegistryOptions::new().prefix_class_id(false));
    /// css.register("a", style! {});
    /// css.register("b", style! {});
    ///
    /// assert_eq!(css.lookup_many([("a", true), ("b", false)]), vec!["c-0"]);
    /// ```
    #[must_use]
    pub fn lookup_many<K: AsRef<str>>(
        &self,
        selection: impl IntoIterator<Item = (K, bool)>,
    ) -> Vec<String> {
        selection
            .into_iter()
            .filter(|(_, include)| *include)
            .map(|(class_id, _)| self.lookup(class_id.as_ref()))
            .collect()
    }

    /// [`Self::lookup_many`] joined with spaces, ready for a `class` attribute
    #[must_use]
    pub fn lookup_joined<K: AsRef<str>>(
        &self,
        selection: impl IntoIterator<Item = (K, bool)>,
    ) -> String {
        self.lookup_many(selection).join(" ")
    }

    /// Every rule of this registry, in registration order
    #[must_use]
    pub fn style_rules(&self) -> Vec<StyleRule> {
        self.inner.state.borrow().rules.values().cloned().collect()
    }

    /// A copy of the `selector -> rule` map
    #[must_use]
    pub fn rules_by_selector(&self) -> IndexMap<String, StyleRule> {
        self.inner.state.borrow().rules.clone()
    }

    /// Render only the rules of this registry
    #[must_use]
    pub fn to_css(&self) -> String {
        self.style_rules().iter().map(StyleRule::to_css).collect()
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use std::collections::HashSet;

    use insta::assert_snapshot;
    use proptest::prelude::*;

    use super::*;
    use crate::style;
    use crate::test_utils::{self, assert_valid_css};

    fn registry() -> (StyleContext, Registry) {
        let context = StyleContext::new();
        let registry = context.registry(RegistryOptions::default());
        (context, registry)
    }

    #[test]
    fn selector_splitting() {
        assert_eq!(split_selector("x"), ("x", ""));
        assert_eq!(split_selector("x:hover"), ("x", ":hover"));
        assert_eq!(split_selector("x::before"), ("x", "::before"));
        assert_eq!(split_selector(":hover"), ("", ":hover"));
        assert_eq!(split_selector(""), ("", ""));
    }

    #[test]
    fn generated_names() {
        let context = StyleContext::new();
        let prefixed = context.registry(RegistryOptions::default());
        let plain = context.registry(RegistryOptions::new().prefix_class_id(false));

        assert_eq!(prefixed.register("title", style! {}).class_name(), "c-title-0");
        assert_eq!(plain.register("title", style! {}).class_name(), "c-1");
    }

    #[test]
    fn pseudo_variants_share_the_class_name() {
        let (_context, registry) = registry();
        let base = registry.register("x", style! { "color" => "red" });
        let hover = registry.register("x:hover", style! { "color" => "blue" });

        assert_eq!(base.class_name(), hover.class_name());
        assert_eq!(base.pseudo(), "");
        assert_eq!(hover.pseudo(), ":hover");
    }

    #[test]
    fn pseudo_registered_first_is_shared_too() {
        let (_context, registry) = registry();
        let hover = registry.register("x:hover", style! { "color" => "blue" });
        let base = registry.register("x", style! { "color" => "red" });

        assert_eq!(base.class_name(), hover.class_name());
        assert_eq!(registry.lookup("x"), base.class_name());
    }

    #[test]
    fn lookup_is_stable() {
        let (_context, registry) = registry();
        registry.register("x", style! { "color" => "red" });
        let before = registry.lookup("x");
        registry.register("x:hover", style! { "color" => "blue" });

        assert_eq!(registry.lookup("x"), before);
    }

    #[test]
    fn reregistering_overwrites() {
        let (context, registry) = registry();
        let first = registry.register("x", style! { "color" => "red" });
        let second = registry.register("x", style! { "color" => "blue" });

        assert_eq!(first.class_name(), second.class_name());
        assert_eq!(registry.style_rules().len(), 1);
        assert_snapshot!(context.render_all(), @".c-x-0{color:blue;}");
    }

    #[test]
    fn overwrite_keeps_registration_position() {
        let (context, registry) = registry();
        registry.register("a", style! { "color" => "red" });
        registry.register("b", style! { "color" => "green" });
        registry.register("a", style! { "color" => "blue" });

        assert_snapshot!(context.render_all(), @".c-a-0{color:blue;}.c-b-1{color:green;}");
    }

    #[test]
    fn nested_hover_scenario() {
        let (context, registry) = registry();
        let rule = registry.register(
            "btn",
            style! {
                "color" => "red",
                ":hover" => { "color" => "blue" },
            },
        );
        let name = rule.class_name();

        let css = context.render_all();
        assert_eq!(css, format!(".{name}{{color:red;}}.{name}:hover{{color:blue;}}"));
        assert_valid_css(&css);
    }

    #[test]
    fn explicit_class_name() {
        let context = StyleContext::new();
        let first = context.registry(RegistryOptions::default());
        let second = context.registry(RegistryOptions::default());

        first.register("card", style! { "color" => "red" });
        let shared = second.register_with(
            "card:hover",
            style! { "color" => "blue" },
            RegisterOptions::new().class_name(first.lookup("card")),
        );

        assert_eq!(shared.class_name(), "c-card-0");
        assert_eq!(second.lookup("card"), "c-card-0");
        assert_eq!(context.next_id(), 1);
    }

    #[test]
    fn media_option() {
        let (context, registry) = registry();
        registry.register_with(
            "narrow",
            style! { "display" => "none" },
            RegisterOptions::new().media("max-width: 600px"),
        );

        let css = context.render_all();
        assert_snapshot!(css, @"@media (max-width: 600px){.c-narrow-0{display:none;}}");
        assert_valid_css(&css);
    }

    #[test]
    fn missing_lookup() {
        test_utils::init_logger();
        let _ = test_utils::take_records();

        let (_context, registry) = registry();
        assert_eq!(registry.lookup("nonexistent"), "");

        let records = test_utils::take_records();
        assert_eq!(
            records,
            vec![(
                log::Level::Warn,
                String::from("Class \"nonexistent\" not set.")
            )]
        );
    }

    #[test]
    fn lookup_many_and_joined() {
        let (_context, registry) = registry();
        registry.register("a", style! {});
        registry.register("b", style! {});
        registry.register("c", style! {});

        let selection = [("c", true), ("a", true), ("b", false)];
        assert_eq!(registry.lookup_many(selection), vec!["c-c-2", "c-a-0"]);
        assert_eq!(registry.lookup_joined(selection), "c-c-2 c-a-0");
        assert_eq!(registry.lookup_joined(Vec::<(String, bool)>::new()), "");
    }

    #[test]
    fn rules_know_their_registry() {
        let (context, registry) = registry();
        let other = context.registry(RegistryOptions::default());
        let rule = registry.register("x", style! {});

        assert!(rule.is_owned_by(&registry));
        assert!(!rule.is_owned_by(&other));
        assert!(rule.registry().is_some_and(|owner| rule.is_owned_by(&owner)));
    }

    #[test]
    fn rules_by_selector_keys() {
        let (_context, registry) = registry();
        registry.register("x", style! {});
        registry.register("x:hover", style! {});

        let keys: Vec<String> = registry.rules_by_selector().keys().cloned().collect();
        assert_eq!(keys, vec!["x", "x:hover"]);
    }

    proptest! {
        #[test]
        fn generated_names_are_unique(
            registrations in proptest::collection::vec(
                (0usize..4, "[a-z]{1,6}", proptest::option::of(":hover|::before")),
                1..40,
            ),
            prefix in proptest::bool::ANY,
        ) {
            let context = StyleContext::new();
            let registries: Vec<Registry> = (0..4)
                .map(|_| context.registry(RegistryOptions::new().prefix_class_id(prefix)))
                .collect();

            let mut names_per_id = std::collections::HashMap::new();
            for (index, class_id, pseudo) in registrations {
                let Some(registry) = registries.get(index) else { continue };
                let selector = format!("{class_id}{}", pseudo.unwrap_or_default());
                let rule = registry.register(&selector, style! { "color" => "red" });
                let name = names_per_id
                    .entry((index, class_id))
                    .or_insert_with(|| rule.class_name().to_owned());
                prop_assert_eq!(&*name, rule.class_name());
            }

            let unique: HashSet<&String> = names_per_id.values().collect();
            prop_assert_eq!(unique.len(), names_per_id.len());
        }
    }
}
