//! Error types produced by the export layer.
//!
//! The taxonomy mirrors the lifecycle: [`DefinitionError`] covers mistakes
//! inside a single exporter's `define` call, [`ExportError`] covers failures
//! that abort registry population at startup, and [`BindingError`] covers
//! request-time failures while creating or driving a binding. A missing tag
//! in the registry is not an error; lookups simply return `None`.

use estuary_core::PropertyKind;
use thiserror::Error;

/// A boxed error carried as the source of a construction failure.
pub type BoxError = Box<dyn core::error::Error + Send + Sync + 'static>;

/// A mistake in a single exporter's property definition.
///
/// These are fatal to the offending exporter's setup and surface
/// synchronously from the configuration method; they never corrupt the
/// processing of other exporters.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DefinitionError {
    /// A property was declared with an empty name.
    #[error("property name must not be empty")]
    EmptyPropertyName,
    /// `on_change` was called a second time on the same configuration.
    #[error("a change handler for property `{name}` has already been set and cannot be overwritten")]
    HandlerAlreadySet {
        /// Name of the property whose handler was already installed.
        name: String,
    },
}

/// A failure that aborts web component registry population.
///
/// Any of these leaves the registry exactly as it was; a partially
/// validated or partially built set is never published.
#[derive(Debug, Error)]
pub enum ExportError {
    /// An exporter declared an empty tag.
    #[error("exporter `{exporter}` declared an empty tag; provide a non-empty tag for the web component")]
    EmptyTag {
        /// Type name of the offending exporter.
        exporter: &'static str,
    },
    /// An exporter's constructor failed.
    #[error("failed to construct web component exporter `{exporter}`")]
    Construction {
        /// Type name of the exporter that could not be constructed.
        exporter: &'static str,
        /// The underlying constructor error.
        #[source]
        source: BoxError,
    },
    /// Two exporters declared the same tag.
    #[error("exporters `{first}` and `{second}` both declare the tag `{tag}`; tags must be unique")]
    DuplicateTag {
        /// Type name of the exporter that declared the tag first.
        first: &'static str,
        /// Type name of the colliding exporter.
        second: &'static str,
        /// The shared tag.
        tag: String,
    },
    /// An exporter declared a tag that is not a valid custom element name.
    #[error("tag `{tag}` declared by exporter `{exporter}` is not a valid custom element name")]
    InvalidCustomElementName {
        /// Type name of the offending exporter.
        exporter: &'static str,
        /// The malformed tag.
        tag: String,
    },
    /// An exporter's `define` call reported a configuration mistake.
    #[error("invalid exporter `{exporter}`")]
    Definition {
        /// Type name of the offending exporter.
        exporter: &'static str,
        /// The underlying definition error.
        #[source]
        source: DefinitionError,
    },
}

/// A request-time failure while creating or driving a binding.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BindingError {
    /// A value was pushed for a property the binding does not know.
    #[error("no property named `{name}` is registered for this web component")]
    UnknownProperty {
        /// The unknown property name.
        name: String,
    },
    /// A value of the wrong kind was pushed.
    #[error("property `{name}` expects a {expected} value but received a {actual} value")]
    TypeMismatch {
        /// Name of the property.
        name: String,
        /// The kind the property was declared with.
        expected: PropertyKind,
        /// The kind that was actually supplied.
        actual: PropertyKind,
    },
    /// A client-side write was attempted on a read-only property.
    #[error("property `{name}` is read-only and cannot be updated from the client")]
    ReadOnly {
        /// Name of the read-only property.
        name: String,
    },
    /// The instantiation service returned an instance of the wrong type.
    #[error("instantiator returned an instance of the wrong type for component `{component}`")]
    InstanceType {
        /// Type name of the requested component.
        component: &'static str,
    },
}
