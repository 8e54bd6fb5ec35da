//! The allocation context shared by registries, and the aggregate css output

use std::cell::RefCell;
use std::rc::Rc;

use crate::allocator::IdAllocator;
use crate::inject::StyleInjector;
use crate::media::{BasicMediaValidator, MediaQueryValidator};
use crate::registry::{Registry, RegistryInner, RegistryOptions};

thread_local! {
    /// The default context of this thread
    static GLOBAL: StyleContext = StyleContext::new();
}

/// The part of a context every registry keeps a hold of
pub(crate) struct ContextShared {
    /// Class name suffixes
    pub(crate) ids: IdAllocator,
    /// Checks nested `@media` keys
    pub(crate) validator: Box<dyn MediaQueryValidator>,
}

/// The data behind a [`StyleContext`] handle
struct ContextInner {
    /// Shared with the registries
    shared: Rc<ContextShared>,
    /// Live registries, in creation order
    registries: RefCell<Vec<Rc<RegistryInner>>>,
}

/// The scope class names are unique within, and the list of registries rendered together.
///
/// Every [`Registry`] is created inside a context and adds itself to it. The context hands out
/// the numeric part of generated class names, so two registries in the same context never
/// produce the same name.
///
/// This is a cheap to clone handle, clones refer to the same context. Contexts are single
/// threaded, [`StyleContext::global`] gives each thread its own default one.
#[derive(Clone)]
#[must_use]
pub struct StyleContext {
    /// The shared data
    inner: Rc<ContextInner>,
}

impl Default for StyleContext {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StyleContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StyleContext")
            .field("next_id", &self.inner.shared.ids.peek())
            .field("registries", &self.registry_count())
            .finish_non_exhaustive()
    }
}

/// Build a [`StyleContext`] with a non default seed or validator
#[must_use]
pub struct ContextBuilder {
    /// The first id handed out
    seed: u64,
    /// The media query validator
    validator: Box<dyn MediaQueryValidator>,
}

impl ContextBuilder {
    /// Start handing out ids at `seed` instead of 0
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Use a different media query validator
    pub fn validator(mut self, validator: impl MediaQueryValidator + 'static) -> Self {
        self.validator = Box::new(validator);
        self
    }

    /// Create the context
    pub fn build(self) -> StyleContext {
        StyleContext {
            inner: Rc::new(ContextInner {
                shared: Rc::new(ContextShared {
                    ids: IdAllocator::with_seed(self.seed),
                    validator: self.validator,
                }),
                registries: RefCell::new(Vec::new()),
            }),
        }
    }
}

impl StyleContext {
    /// A fresh context, ids start at 0 and nested media queries use [`BasicMediaValidator`]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Configure a new context
    pub fn builder() -> ContextBuilder {
        ContextBuilder {
            seed: 0,
            validator: Box::new(BasicMediaValidator),
        }
    }

    /// The default context of the current thread
    pub fn global() -> Self {
        GLOBAL.with(Clone::clone)
    }

    /// Create a registry in this context, same as [`Registry::new`]
    pub fn registry(&self, options: RegistryOptions) -> Registry {
        Registry::new(self, options)
    }

    /// Take the next class name suffix
    pub fn next_id(&self) -> u64 {
        self.inner.shared.ids.next_id()
    }

    /// Number of registries rendered by [`Self::render_all`]
    #[must_use]
    pub fn registry_count(&self) -> usize {
        self.inner.registries.borrow().len()
    }

    /// The shared allocation state
    pub(crate) fn shared(&self) -> Rc<ContextShared> {
        Rc::clone(&self.inner.shared)
    }

    /// Add a registry, called once by every registry on construction
    pub(crate) fn attach(&self, registry: Rc<RegistryInner>) {
        self.inner.registries.borrow_mut().push(registry);
    }

    /// Snapshot of the live registries, so no borrow is held while rendering
    fn registries(&self) -> Vec<Rc<RegistryInner>> {
        self.inner.registries.borrow().clone()
    }

    /// Render every rule of every live registry.
    ///
    /// Registries are visited in creation order and rules in registration order, the output is
    /// concatenated without separators.
    #[must_use]
    pub fn render_all(&self) -> String {
        let registries = self.registries();
        log::debug!("Rendering css for {} registries", registries.len());

        let result: String = registries
            .into_iter()
            .map(|inner| Registry::from_inner(inner).to_css())
            .collect();

        log::trace!("Produced css: {result}");
        result
    }

    /// Forget every registry.
    ///
    /// Existing registries keep working but are no longer rendered. The id allocator is *not*
    /// reset, names from before the reset are never handed out again.
    pub fn reset_all(&self) {
        let mut registries = self.inner.registries.borrow_mut();
        log::debug!("Dropping {} registries", registries.len());
        registries.clear();
    }

    /// Render everything and hand it to `injector`
    pub fn inject_styles(&self, injector: &mut impl StyleInjector) {
        let css = self.render_all();
        log::info!("Injecting {} bytes of css", css.len());
        injector.inject(&css);
    }
}

/// [`StyleContext::render_all`] on the thread default context
#[must_use]
pub fn render_all() -> String {
    StyleContext::global().render_all()
}

/// [`StyleContext::reset_all`] on the thread default context
pub fn reset_all() {
    StyleContext::global().reset_all();
}

/// [`StyleContext::inject_styles`] on the thread default context
pub fn inject_styles(injector: &mut impl StyleInjector) {
    StyleContext::global().inject_styles(injector);
}
