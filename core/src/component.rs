//! The server-side component contract.

use core::any::Any;

/// A server-side component type that may be published to a client.
///
/// The trait itself carries no behavior; implementing it declares that a type
/// participates in the component model and may be named as the target of an
/// exporter. Components that are published as custom elements must also
/// implement [`Default`] so a fresh instance can be materialized when no
/// instantiation service provides one.
///
/// # Examples
///
/// ```
/// use estuary_core::Component;
///
/// #[derive(Default)]
/// struct Greeting {
///     visible: bool,
/// }
///
/// impl Component for Greeting {}
/// ```
pub trait Component: Any + Send {}
