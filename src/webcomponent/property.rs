//! Property descriptors and their per-property configuration surface.

use core::any::Any;
use core::fmt;
use core::hash::{Hash, Hasher};
use std::sync::Arc;

use estuary_core::{Component, PropertyKind, PropertyValue, PropertyValueType};
use serde::Serialize;

use crate::error::DefinitionError;

/// An immutable description of one exposed property.
///
/// Together with the tag this is the client-visible contract of an exported
/// component: name, value kind, optional default and the read-only flag.
///
/// Identity is by `(name, kind)` only; two descriptors that differ just in
/// default value or read-only flag compare equal and hash alike.
#[derive(Debug, Clone, Serialize)]
pub struct PropertyData {
    name: String,
    kind: PropertyKind,
    default: Option<PropertyValue>,
    read_only: bool,
}

impl PropertyData {
    /// Creates a new property descriptor.
    pub fn new(
        name: impl Into<String>,
        kind: PropertyKind,
        default: Option<PropertyValue>,
        read_only: bool,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            default,
            read_only,
        }
    }

    /// Returns the property name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the kind of value this property carries.
    #[must_use]
    pub const fn kind(&self) -> PropertyKind {
        self.kind
    }

    /// Returns the default value, if one was declared.
    #[must_use]
    pub const fn default_value(&self) -> Option<&PropertyValue> {
        self.default.as_ref()
    }

    /// Whether the property is read-only on the client side.
    #[must_use]
    pub const fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Returns a copy of this descriptor with the read-only flag set.
    ///
    /// Descriptors are never mutated in place; the read-only variant is
    /// always produced by copy.
    #[must_use]
    pub fn as_read_only(&self) -> Self {
        Self {
            read_only: true,
            ..self.clone()
        }
    }
}

impl PartialEq for PropertyData {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.kind == other.kind
    }
}

impl Eq for PropertyData {}

impl Hash for PropertyData {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.kind.hash(state);
    }
}

/// The change handler type stored for a property of value type `P` on a
/// component of type `C`.
type ChangeHandler<C, P> = Arc<dyn Fn(&mut C, P) + Send + Sync>;

/// The erased setter a binding invokes to push a value into a component.
pub(crate) type ErasedSetter<C> = Arc<dyn Fn(&mut C, PropertyValue) + Send + Sync>;

/// Fluent per-property configuration.
///
/// Obtained from [`WebComponentDefinition::add_property`] during an
/// exporter's `define` call; wraps one [`PropertyData`] plus an optional
/// change handler that forwards client-side writes into the component.
///
/// [`WebComponentDefinition::add_property`]: crate::webcomponent::WebComponentDefinition::add_property
pub struct PropertyConfiguration<C, P> {
    data: PropertyData,
    on_change: Option<ChangeHandler<C, P>>,
}

impl<C: Component, P: PropertyValueType> PropertyConfiguration<C, P> {
    pub(crate) fn new(name: String, default: Option<P>) -> Self {
        Self {
            data: PropertyData::new(name, P::kind(), default.map(P::into_value), false),
            on_change: None,
        }
    }

    /// Installs the handler invoked when the client writes a new value.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError::HandlerAlreadySet`] if a handler was
    /// already installed on this configuration; the first handler stays in
    /// effect. Handlers are never silently overwritten.
    pub fn on_change<F>(&mut self, handler: F) -> Result<&mut Self, DefinitionError>
    where
        F: Fn(&mut C, P) + Send + Sync + 'static,
    {
        if self.on_change.is_some() {
            return Err(DefinitionError::HandlerAlreadySet {
                name: self.data.name().to_owned(),
            });
        }
        self.on_change = Some(Arc::new(handler));
        Ok(self)
    }

    /// Marks the property read-only on the client side.
    ///
    /// Always succeeds; the held descriptor is replaced by a fresh read-only
    /// copy, so calling this more than once is idempotent in effect.
    pub fn read_only(&mut self) -> &mut Self {
        self.data = self.data.as_read_only();
        self
    }

    /// Returns the descriptor computed from this configuration.
    #[must_use]
    pub const fn data(&self) -> &PropertyData {
        &self.data
    }
}

impl<C, P> fmt::Debug for PropertyConfiguration<C, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyConfiguration")
            .field("data", &self.data)
            .field("has_change_handler", &self.on_change.is_some())
            .finish()
    }
}

/// Type-erased view of a [`PropertyConfiguration`], so configurations with
/// different value types can live in one definition.
pub(crate) trait PropertySlot<C>: Send + Sync {
    fn data(&self) -> &PropertyData;

    /// Builds the erased setter that converts a dynamic value back to the
    /// typed representation and forwards it to the change handler. Without a
    /// handler the setter is a no-op.
    fn setter(&self) -> ErasedSetter<C>;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<C, P> PropertySlot<C> for PropertyConfiguration<C, P>
where
    C: Component,
    P: PropertyValueType,
{
    fn data(&self) -> &PropertyData {
        &self.data
    }

    fn setter(&self) -> ErasedSetter<C> {
        let handler = self.on_change.clone();
        Arc::new(move |component, value| {
            if let Some(handler) = &handler {
                if let Some(typed) = P::from_value(value) {
                    handler(component, typed);
                }
            }
        })
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        count: i32,
    }

    impl Component for Counter {}

    #[test]
    fn identity_is_name_and_kind_only() {
        let a = PropertyData::new("count", PropertyKind::Integer, None, false);
        let b = PropertyData::new(
            "count",
            PropertyKind::Integer,
            Some(PropertyValue::Integer(5)),
            true,
        );
        let c = PropertyData::new("count", PropertyKind::Double, None, false);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn read_only_variant_is_a_copy() {
        let base = PropertyData::new(
            "count",
            PropertyKind::Integer,
            Some(PropertyValue::Integer(1)),
            false,
        );
        let read_only = base.as_read_only();
        assert!(!base.is_read_only());
        assert!(read_only.is_read_only());
        assert_eq!(
            read_only.default_value(),
            Some(&PropertyValue::Integer(1))
        );
    }

    #[test]
    fn second_change_handler_is_rejected() {
        let mut configuration = PropertyConfiguration::<Counter, i32>::new("count".into(), None);
        configuration
            .on_change(|counter, value| counter.count = value)
            .unwrap();
        let err = configuration
            .on_change(|_, _| {})
            .map(|_| ())
            .unwrap_err();
        assert_eq!(
            err,
            DefinitionError::HandlerAlreadySet {
                name: "count".into()
            }
        );

        // The first handler stays wired up.
        let setter = PropertySlot::setter(&configuration);
        let mut counter = Counter::default();
        setter(&mut counter, PropertyValue::Integer(7));
        assert_eq!(counter.count, 7);
    }

    #[test]
    fn descriptor_serializes_for_the_client_contract() {
        let data = PropertyData::new(
            "show",
            PropertyKind::Boolean,
            Some(PropertyValue::Boolean(false)),
            true,
        );
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "show",
                "kind": "boolean",
                "default": false,
                "read_only": true,
            })
        );
    }

    #[test]
    fn read_only_reconstructs_the_descriptor() {
        let mut configuration =
            PropertyConfiguration::<Counter, bool>::new("show".into(), Some(true));
        configuration.read_only().read_only();
        assert!(configuration.data().is_read_only());
        assert_eq!(
            configuration.data().default_value(),
            Some(&PropertyValue::Boolean(true))
        );
    }
}
