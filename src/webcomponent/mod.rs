//! Publishing server-side components as browser custom elements.
//!
//! The pieces fit together in two phases. At startup,
//! [`initialize_registry`](crate::startup::initialize_registry) constructs
//! one exporter per registered [`ExporterDescriptor`], validates every
//! declared tag, compiles each exporter into a [`WebComponentBuilder`] and
//! publishes the set in a [`WebComponentRegistry`]. At request time, the
//! rendering layer resolves a tag to its builder and asks it for a
//! [`WebComponentBinding`]: a fresh component instance with all declared
//! properties wired to it.
//!
//! ```
//! use estuary::{
//!     DefaultInstantiator, DefinitionError, ExporterDescriptor, WebComponentDefinition,
//!     WebComponentExporter, WebComponentRegistry, initialize_registry,
//! };
//! use estuary_core::Component;
//!
//! #[derive(Default)]
//! struct Greeting {
//!     visible: bool,
//! }
//!
//! impl Component for Greeting {}
//!
//! #[derive(Default)]
//! struct GreetingExporter;
//!
//! impl WebComponentExporter for GreetingExporter {
//!     type Component = Greeting;
//!
//!     fn tag(&self) -> String {
//!         "my-greeting".into()
//!     }
//!
//!     fn define(
//!         &mut self,
//!         definition: &mut WebComponentDefinition<Greeting>,
//!     ) -> Result<(), DefinitionError> {
//!         definition
//!             .add_property("visible", true)?
//!             .on_change(|greeting, value| greeting.visible = value)?;
//!         Ok(())
//!     }
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = WebComponentRegistry::new();
//! initialize_registry(&registry, [ExporterDescriptor::new::<GreetingExporter>()])?;
//!
//! let builder = registry.get("my-greeting").expect("tag is registered");
//! let binding = builder.create_binding(&DefaultInstantiator)?;
//! assert!(binding.instance::<Greeting>().expect("greeting instance").visible);
//! # Ok(())
//! # }
//! ```

mod binding;
mod builder;
mod definition;
mod exporter;
mod property;
mod registry;

pub(crate) use exporter::ConstructedExporter;

pub use binding::{WebComponent, WebComponentBinding};
pub use builder::WebComponentBuilder;
pub use definition::WebComponentDefinition;
pub use exporter::{ExporterDescriptor, WebComponentExporter};
pub use property::{PropertyConfiguration, PropertyData};
pub use registry::WebComponentRegistry;
