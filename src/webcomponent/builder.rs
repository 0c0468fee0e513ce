//! The per-exporter builder: a reusable factory for bindings.

use core::any::{TypeId, type_name};
use core::fmt;
use std::sync::Arc;

use estuary_core::{Component, Instantiator, PropertyKind};

use crate::error::{BindingError, ExportError};
use crate::webcomponent::binding::{PropertyBinding, WebComponent, WebComponentBinding};
use crate::webcomponent::definition::{InstanceConfigurator, WebComponentDefinition};
use crate::webcomponent::exporter::WebComponentExporter;
use crate::webcomponent::property::{ErasedSetter, PropertyData};

/// One property of the built definition, snapshotted with its erased setter.
struct BoundProperty<C> {
    data: PropertyData,
    setter: ErasedSetter<C>,
}

/// The typed state captured by a builder: everything needed to stamp out
/// bindings for one component type.
struct BindingFactory<C> {
    tag: String,
    properties: Vec<BoundProperty<C>>,
    configurator: Option<InstanceConfigurator<C>>,
}

impl<C: Component + Default> BindingFactory<C> {
    fn create(&self, instantiator: &dyn Instantiator) -> Result<WebComponentBinding, BindingError> {
        let mut instance: C = match instantiator.instantiate(TypeId::of::<C>()) {
            Some(boxed) => *boxed.downcast::<C>().map_err(|_| BindingError::InstanceType {
                component: type_name::<C>(),
            })?,
            None => C::default(),
        };

        if let Some(configurator) = &self.configurator {
            configurator(&WebComponent::new(self.tag.clone()), &mut instance);
        }

        let bindings = self
            .properties
            .iter()
            .map(|property| PropertyBinding::new::<C>(property.data.clone(), property.setter.clone()))
            .collect();

        let mut binding = WebComponentBinding::new(Box::new(instance), bindings);
        binding.update_properties();
        Ok(binding)
    }
}

/// The compiled, immutable artifact derived from one exporter.
///
/// Holds the validated tag, the declared properties and an erased factory
/// closure over the exporter's component type. A builder is constructed once
/// at startup and may then produce any number of bindings; it carries no
/// mutable state, so concurrent [`create_binding`](Self::create_binding)
/// calls need no coordination.
pub struct WebComponentBuilder {
    tag: String,
    exporter_name: &'static str,
    component_name: &'static str,
    component_type: TypeId,
    properties: Vec<PropertyData>,
    create: Box<dyn Fn(&dyn Instantiator) -> Result<WebComponentBinding, BindingError> + Send + Sync>,
}

impl WebComponentBuilder {
    /// Builds the artifact for one exporter.
    ///
    /// Runs the exporter's `define` callback exactly once, synchronously;
    /// that call is the only place properties and the instance configurator
    /// can be registered.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::EmptyTag`] when the exporter declares an empty
    /// tag and [`ExportError::Definition`] when `define` reports a
    /// configuration mistake. Either way the error names the exporter type.
    pub fn new<E: WebComponentExporter>(mut exporter: E) -> Result<Self, ExportError> {
        let tag = exporter.tag();
        if tag.is_empty() {
            return Err(ExportError::EmptyTag {
                exporter: type_name::<E>(),
            });
        }

        let mut definition = WebComponentDefinition::new();
        exporter
            .define(&mut definition)
            .map_err(|source| ExportError::Definition {
                exporter: type_name::<E>(),
                source,
            })?;

        Ok(Self::from_definition(tag, type_name::<E>(), definition))
    }

    fn from_definition<C: Component + Default>(
        tag: String,
        exporter_name: &'static str,
        definition: WebComponentDefinition<C>,
    ) -> Self {
        let (slots, configurator) = definition.into_parts();
        let properties: Vec<BoundProperty<C>> = slots
            .values()
            .map(|slot| BoundProperty {
                data: slot.data().clone(),
                setter: slot.setter(),
            })
            .collect();
        let data: Vec<PropertyData> = properties
            .iter()
            .map(|property| property.data.clone())
            .collect();

        let factory = Arc::new(BindingFactory {
            tag: tag.clone(),
            properties,
            configurator,
        });

        Self {
            tag,
            exporter_name,
            component_name: type_name::<C>(),
            component_type: TypeId::of::<C>(),
            properties: data,
            create: Box::new(move |instantiator| factory.create(instantiator)),
        }
    }

    /// Returns the tag this builder's component is published under.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Returns the type name of the exporter this builder was derived from.
    #[must_use]
    pub const fn exporter_name(&self) -> &'static str {
        self.exporter_name
    }

    /// Returns the type name of the exported component.
    #[must_use]
    pub const fn component_name(&self) -> &'static str {
        self.component_name
    }

    /// Returns the [`TypeId`] of the exported component.
    #[must_use]
    pub const fn component_type(&self) -> TypeId {
        self.component_type
    }

    /// Whether a property with the given name was declared.
    #[must_use]
    pub fn has_property(&self, name: &str) -> bool {
        self.properties.iter().any(|data| data.name() == name)
    }

    /// Returns the declared kind of the named property, if any.
    #[must_use]
    pub fn property_kind(&self, name: &str) -> Option<PropertyKind> {
        self.properties
            .iter()
            .find(|data| data.name() == name)
            .map(PropertyData::kind)
    }

    /// Iterates over the declared property descriptors.
    ///
    /// The iteration order is unspecified.
    pub fn property_data(&self) -> impl Iterator<Item = &PropertyData> {
        self.properties.iter()
    }

    /// Creates one live binding: a fresh component instance with all
    /// declared properties wired to it.
    ///
    /// The instance is obtained through `instantiator` (falling back to the
    /// component's [`Default`]), the instance configurator runs if one was
    /// registered, and every declared default is applied before the binding
    /// is returned. May be called once per rendered element using this tag,
    /// from any number of threads.
    ///
    /// # Errors
    ///
    /// Returns [`BindingError::InstanceType`] when the instantiation service
    /// hands back an instance of the wrong type.
    pub fn create_binding(
        &self,
        instantiator: &dyn Instantiator,
    ) -> Result<WebComponentBinding, BindingError> {
        (self.create)(instantiator)
    }
}

impl fmt::Debug for WebComponentBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebComponentBuilder")
            .field("tag", &self.tag)
            .field("exporter", &self.exporter_name)
            .field("component", &self.component_name)
            .field("properties", &self.properties)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use estuary_core::{DefaultInstantiator, PropertyValue};

    use crate::error::DefinitionError;

    use super::*;

    #[derive(Default)]
    struct Counter {
        count: i32,
        label: String,
    }

    impl Component for Counter {}

    #[derive(Default)]
    struct CounterExporter;

    impl WebComponentExporter for CounterExporter {
        type Component = Counter;

        fn tag(&self) -> String {
            "my-counter".into()
        }

        fn define(
            &mut self,
            definition: &mut WebComponentDefinition<Counter>,
        ) -> Result<(), DefinitionError> {
            definition
                .add_property("count", 0)?
                .on_change(|counter, value| counter.count = value)?;
            definition
                .add_property("count", 5)?
                .on_change(|counter, value| counter.count = value)?;
            definition.add_property::<String>("label", None)?;
            Ok(())
        }
    }

    struct EmptyTagExporter;

    impl WebComponentExporter for EmptyTagExporter {
        type Component = Counter;

        fn tag(&self) -> String {
            String::new()
        }

        fn define(
            &mut self,
            _definition: &mut WebComponentDefinition<Counter>,
        ) -> Result<(), DefinitionError> {
            Ok(())
        }
    }

    struct BrokenExporter;

    impl WebComponentExporter for BrokenExporter {
        type Component = Counter;

        fn tag(&self) -> String {
            "broken-counter".into()
        }

        fn define(
            &mut self,
            definition: &mut WebComponentDefinition<Counter>,
        ) -> Result<(), DefinitionError> {
            let configuration = definition.add_property("count", 0)?;
            configuration.on_change(|counter, value| counter.count = value)?;
            configuration.on_change(|counter, value| counter.count = value)?;
            Ok(())
        }
    }

    #[test]
    fn duplicate_property_registration_keeps_the_last_default() {
        let builder = WebComponentBuilder::new(CounterExporter).unwrap();
        let descriptors: Vec<_> = builder
            .property_data()
            .filter(|data| data.name() == "count")
            .collect();
        assert_eq!(descriptors.len(), 1);
        assert_eq!(
            descriptors[0].default_value(),
            Some(&PropertyValue::Integer(5))
        );
    }

    #[test]
    fn builder_exposes_tag_and_property_metadata() {
        let builder = WebComponentBuilder::new(CounterExporter).unwrap();
        assert_eq!(builder.tag(), "my-counter");
        assert_eq!(builder.component_type(), TypeId::of::<Counter>());
        assert!(builder.has_property("label"));
        assert!(!builder.has_property("missing"));
        assert_eq!(builder.property_kind("count"), Some(PropertyKind::Integer));
        assert_eq!(builder.property_kind("label"), Some(PropertyKind::String));
    }

    #[test]
    fn empty_tag_is_rejected() {
        let err = WebComponentBuilder::new(EmptyTagExporter).unwrap_err();
        assert!(matches!(err, ExportError::EmptyTag { .. }));
    }

    #[test]
    fn definition_errors_name_the_exporter() {
        let err = WebComponentBuilder::new(BrokenExporter).unwrap_err();
        match err {
            ExportError::Definition { exporter, source } => {
                assert!(exporter.contains("BrokenExporter"));
                assert_eq!(
                    source,
                    DefinitionError::HandlerAlreadySet {
                        name: "count".into()
                    }
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn binding_applies_defaults_on_creation() {
        let builder = WebComponentBuilder::new(CounterExporter).unwrap();
        let binding = builder.create_binding(&DefaultInstantiator).unwrap();
        let counter = binding.instance::<Counter>().unwrap();
        assert_eq!(counter.count, 5);
        // No handler was registered for `label`, so its default push is a
        // no-op and the field keeps its `Default` value.
        assert_eq!(counter.label, "");
    }
}
