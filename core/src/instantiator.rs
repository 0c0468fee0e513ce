//! The component instantiation seam.

use core::any::{Any, TypeId};

/// An external service that creates or retrieves component instances.
///
/// The export layer never constructs components directly; every instance is
/// requested through an `Instantiator` so that applications can plug in a
/// dependency-injection container, an object pool, or test doubles. The
/// caching and pooling policy of an implementation is opaque to the caller.
pub trait Instantiator: Send + Sync {
    /// Produces a boxed instance of the component type identified by `ty`.
    ///
    /// Returning `None` delegates creation to the component's [`Default`]
    /// implementation. A returned box whose concrete type does not match the
    /// request is reported as an error by the caller, not a panic.
    fn instantiate(&self, ty: TypeId) -> Option<Box<dyn Any + Send>>;
}

/// An [`Instantiator`] that always delegates to the component's [`Default`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultInstantiator;

impl Instantiator for DefaultInstantiator {
    fn instantiate(&self, _ty: TypeId) -> Option<Box<dyn Any + Send>> {
        None
    }
}
