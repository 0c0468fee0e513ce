//! Live bindings between one rendered custom element and one component
//! instance.

use core::any::Any;
use core::fmt;

use estuary_core::{Component, PropertyValue};

use crate::error::BindingError;
use crate::webcomponent::property::{ErasedSetter, PropertyData};

/// The handle through which a configured instance can see its host element.
///
/// Passed to the instance configurator registered via
/// [`WebComponentDefinition::set_instance_configurator`]; currently exposes
/// the tag the component is being mounted as.
///
/// [`WebComponentDefinition::set_instance_configurator`]: crate::webcomponent::WebComponentDefinition::set_instance_configurator
#[derive(Debug, Clone)]
pub struct WebComponent {
    tag: String,
}

impl WebComponent {
    pub(crate) const fn new(tag: String) -> Self {
        Self { tag }
    }

    /// Returns the tag this component is published under.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }
}

/// One property wired to one concrete component instance.
pub(crate) struct PropertyBinding {
    data: PropertyData,
    setter: Box<dyn Fn(&mut dyn Any, PropertyValue) + Send + Sync>,
}

impl PropertyBinding {
    pub(crate) fn new<C: Component>(data: PropertyData, setter: ErasedSetter<C>) -> Self {
        Self {
            data,
            setter: Box::new(move |instance, value| {
                if let Some(component) = instance.downcast_mut::<C>() {
                    setter(component, value);
                }
            }),
        }
    }
}

/// The live association between one rendered custom element instance and one
/// component instance.
///
/// A binding owns its component instance and the wiring that pushes property
/// values into it. Bindings are created per rendered element, never reused
/// across elements, and simply dropped when the element goes away.
pub struct WebComponentBinding {
    instance: Box<dyn Any + Send>,
    bindings: Vec<PropertyBinding>,
}

impl WebComponentBinding {
    pub(crate) fn new(instance: Box<dyn Any + Send>, bindings: Vec<PropertyBinding>) -> Self {
        Self { instance, bindings }
    }

    /// Pushes every property's declared default into the component through
    /// its change-handler path.
    ///
    /// Properties without a default are skipped and the read-only flag is
    /// ignored; this is the initial population, not a client write. The
    /// order in which properties are applied is unspecified; bindings are
    /// logically independent.
    pub fn update_properties(&mut self) {
        let Self { instance, bindings } = self;
        for binding in bindings.iter() {
            if let Some(default) = binding.data.default_value() {
                (binding.setter)(instance.as_mut(), default.clone());
            }
        }
    }

    /// Applies a client-side write to the named property.
    ///
    /// # Errors
    ///
    /// Returns [`BindingError::UnknownProperty`] for a name the binding does
    /// not know, [`BindingError::ReadOnly`] for a read-only property, and
    /// [`BindingError::TypeMismatch`] when the supplied value's kind
    /// disagrees with the declared one.
    pub fn update_property(
        &mut self,
        name: &str,
        value: PropertyValue,
    ) -> Result<(), BindingError> {
        let Self { instance, bindings } = self;
        let binding = bindings
            .iter()
            .find(|binding| binding.data.name() == name)
            .ok_or_else(|| BindingError::UnknownProperty {
                name: name.to_owned(),
            })?;
        if binding.data.is_read_only() {
            return Err(BindingError::ReadOnly {
                name: name.to_owned(),
            });
        }
        if value.kind() != binding.data.kind() {
            return Err(BindingError::TypeMismatch {
                name: name.to_owned(),
                expected: binding.data.kind(),
                actual: value.kind(),
            });
        }
        (binding.setter)(instance.as_mut(), value);
        Ok(())
    }

    /// Whether the binding carries a property with the given name.
    #[must_use]
    pub fn has_property(&self, name: &str) -> bool {
        self.bindings
            .iter()
            .any(|binding| binding.data.name() == name)
    }

    /// Returns the bound component instance, if it is of type `C`.
    #[must_use]
    pub fn instance<C: Component>(&self) -> Option<&C> {
        self.instance.downcast_ref()
    }

    /// Returns the bound component instance mutably, if it is of type `C`.
    #[must_use]
    pub fn instance_mut<C: Component>(&mut self) -> Option<&mut C> {
        self.instance.downcast_mut()
    }
}

impl fmt::Debug for WebComponentBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebComponentBinding")
            .field(
                "properties",
                &self
                    .bindings
                    .iter()
                    .map(|binding| binding.data.name())
                    .collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}
