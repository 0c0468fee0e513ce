#![doc = include_str!("../README.md")]

pub mod error;
pub mod naming;
pub mod startup;
pub mod webcomponent;

#[doc(inline)]
pub use error::{BindingError, BoxError, DefinitionError, ExportError};
#[doc(inline)]
pub use estuary_core::{
    Component, DefaultInstantiator, Instantiator, PropertyKind, PropertyValue, PropertyValueType,
};
#[doc(inline)]
pub use startup::initialize_registry;
#[doc(inline)]
pub use webcomponent::{
    ExporterDescriptor, PropertyConfiguration, PropertyData, WebComponent, WebComponentBinding,
    WebComponentBuilder, WebComponentDefinition, WebComponentExporter, WebComponentRegistry,
};
