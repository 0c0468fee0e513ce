//! The exporter contract and its startup-time registration descriptor.

use core::any::type_name;
use core::fmt;

use estuary_core::Component;

use crate::error::{BoxError, DefinitionError, ExportError};
use crate::webcomponent::builder::WebComponentBuilder;
use crate::webcomponent::definition::WebComponentDefinition;

/// Declares how one server-side component type is published as a custom
/// element.
///
/// An exporter names its tag and, in [`define`](Self::define), the
/// properties and instance setup of the exported component. Exporters are
/// constructed once at startup from their [`ExporterDescriptor`]; `define`
/// runs exactly once, synchronously, while the component's
/// [`WebComponentBuilder`] is constructed.
pub trait WebComponentExporter: 'static {
    /// The component type this exporter publishes.
    type Component: Component + Default;

    /// The custom element tag the component is addressable by.
    ///
    /// Must be a valid custom element name (lowercase, containing a
    /// hyphen); tags are validated before the registry is populated.
    fn tag(&self) -> String;

    /// Declares the exported properties and optional instance setup.
    ///
    /// # Errors
    ///
    /// Configuration mistakes reported by the definition surface (empty
    /// property names, duplicate change handlers) are propagated with `?`
    /// and abort this exporter's setup.
    fn define(
        &mut self,
        definition: &mut WebComponentDefinition<Self::Component>,
    ) -> Result<(), DefinitionError>;
}

/// An exporter that has been constructed but not yet turned into a builder,
/// with its identity erased. Exists so tags can be validated across the
/// whole discovered set before any builder is assembled.
pub(crate) struct ConstructedExporter {
    type_name: &'static str,
    tag: String,
    build: Box<dyn FnOnce() -> Result<WebComponentBuilder, ExportError>>,
}

impl ConstructedExporter {
    fn erase<E: WebComponentExporter>(exporter: E) -> Self {
        Self {
            type_name: type_name::<E>(),
            tag: exporter.tag(),
            build: Box::new(move || WebComponentBuilder::new(exporter)),
        }
    }

    pub(crate) fn tag(&self) -> &str {
        &self.tag
    }

    pub(crate) fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub(crate) fn into_builder(self) -> Result<WebComponentBuilder, ExportError> {
        (self.build)()
    }
}

/// A startup-time registration entry for one exporter type.
///
/// This replaces classpath scanning and reflective construction: the hosting
/// application enumerates its exporters explicitly, one descriptor per
/// exporter type, and hands the set to
/// [`initialize_registry`](crate::startup::initialize_registry).
pub struct ExporterDescriptor {
    type_name: &'static str,
    construct: Box<dyn Fn() -> Result<ConstructedExporter, BoxError> + Send + Sync>,
}

impl ExporterDescriptor {
    /// Describes an exporter constructed through its [`Default`]
    /// implementation.
    #[must_use]
    pub fn new<E: WebComponentExporter + Default>() -> Self {
        Self::with(|| Ok(E::default()))
    }

    /// Describes an exporter with a fallible constructor.
    ///
    /// A constructor error is fatal to registry population and is reported
    /// wrapped together with the exporter's type name.
    pub fn with<E, F>(construct: F) -> Self
    where
        E: WebComponentExporter,
        F: Fn() -> Result<E, BoxError> + Send + Sync + 'static,
    {
        Self {
            type_name: type_name::<E>(),
            construct: Box::new(move || construct().map(ConstructedExporter::erase)),
        }
    }

    /// Returns the type name of the described exporter.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub(crate) fn construct(&self) -> Result<ConstructedExporter, BoxError> {
        (self.construct)()
    }
}

impl fmt::Debug for ExporterDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExporterDescriptor")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}
