//! Core abstractions for the Estuary framework.
//!
//! This crate holds the pieces the export layer builds on: the [`Component`]
//! marker for server-side component types, the [`Instantiator`] seam that
//! decouples component creation from any particular dependency-injection
//! mechanism, and the closed [`PropertyValue`] model describing the values a
//! published component may expose to the client.

mod component;
mod instantiator;
mod value;

pub use component::Component;
pub use instantiator::{DefaultInstantiator, Instantiator};
pub use value::{PropertyKind, PropertyValue, PropertyValueType};
