//! The definition surface handed to an exporter's `define` call.

use core::fmt;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use estuary_core::{Component, PropertyValueType};

use crate::error::DefinitionError;
use crate::webcomponent::binding::WebComponent;
use crate::webcomponent::property::{PropertyConfiguration, PropertySlot};

/// The configurator invoked on every fresh instance before its properties
/// are populated.
pub(crate) type InstanceConfigurator<C> = Arc<dyn Fn(&WebComponent, &mut C) + Send + Sync>;

/// The surface through which an exporter declares what its component
/// publishes: properties and an optional instance configurator.
///
/// A definition is handed to [`WebComponentExporter::define`] exactly once,
/// while the component's builder is constructed; it cannot be obtained or
/// modified afterwards.
///
/// [`WebComponentExporter::define`]: crate::webcomponent::WebComponentExporter::define
pub struct WebComponentDefinition<C: Component> {
    properties: HashMap<String, Box<dyn PropertySlot<C>>>,
    configurator: Option<InstanceConfigurator<C>>,
}

impl<C: Component> WebComponentDefinition<C> {
    pub(crate) fn new() -> Self {
        Self {
            properties: HashMap::new(),
            configurator: None,
        }
    }

    /// Declares a property with the given name and optional default value.
    ///
    /// The value type must be one of the supported kinds; that is enforced
    /// by the [`PropertyValueType`] bound at compile time. Declaring the
    /// same name twice silently replaces the earlier declaration, change
    /// handler included; the last registration wins. This mirrors plain map
    /// semantics and is intentionally more lenient than the hard uniqueness
    /// check applied to tags across exporters.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError::EmptyPropertyName`] when `name` is empty.
    pub fn add_property<P: PropertyValueType>(
        &mut self,
        name: impl Into<String>,
        default: impl Into<Option<P>>,
    ) -> Result<&mut PropertyConfiguration<C, P>, DefinitionError> {
        let name = name.into();
        if name.is_empty() {
            return Err(DefinitionError::EmptyPropertyName);
        }
        let configuration = PropertyConfiguration::<C, P>::new(name.clone(), default.into());
        let slot = match self.properties.entry(name) {
            Entry::Occupied(mut entry) => {
                entry.insert(Box::new(configuration));
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(Box::new(configuration)),
        };
        Ok(slot
            .as_any_mut()
            .downcast_mut::<PropertyConfiguration<C, P>>()
            .expect("slot was inserted with this exact configuration type"))
    }

    /// Installs a configurator that runs on every fresh component instance,
    /// before the initial property values are applied.
    ///
    /// Calling this again replaces the previous configurator.
    pub fn set_instance_configurator<F>(&mut self, configurator: F)
    where
        F: Fn(&WebComponent, &mut C) + Send + Sync + 'static,
    {
        self.configurator = Some(Arc::new(configurator));
    }

    pub(crate) fn into_parts(
        self,
    ) -> (
        HashMap<String, Box<dyn PropertySlot<C>>>,
        Option<InstanceConfigurator<C>>,
    ) {
        (self.properties, self.configurator)
    }
}

impl<C: Component> fmt::Debug for WebComponentDefinition<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebComponentDefinition")
            .field("properties", &self.properties.keys())
            .field("has_configurator", &self.configurator.is_some())
            .finish()
    }
}
