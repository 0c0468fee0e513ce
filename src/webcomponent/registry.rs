//! The process-wide lookup from tag to builder.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use crate::webcomponent::builder::WebComponentBuilder;

/// The lookup table from custom element tag to [`WebComponentBuilder`].
///
/// A registry starts empty; lookups on an unpopulated registry miss rather
/// than fail. [`set_builders`](Self::set_builders) replaces the whole
/// mapping behind a single reference swap, so concurrent readers observe
/// either the old set or the complete new one, never a mix. The registry is
/// owned by the application and its lifetime is tied to application start
/// and stop; there is no process-global instance.
#[derive(Debug, Default)]
pub struct WebComponentRegistry {
    builders: RwLock<Arc<HashMap<String, Arc<WebComponentBuilder>>>>,
}

impl WebComponentRegistry {
    /// Creates an empty, unpopulated registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the builder registered for `tag`.
    ///
    /// Returns `None` when no component is published under that tag; a miss
    /// is an expected outcome, not an error. Safe for unbounded concurrent
    /// callers.
    #[must_use]
    pub fn get(&self, tag: &str) -> Option<Arc<WebComponentBuilder>> {
        self.snapshot().get(tag).cloned()
    }

    /// Replaces the registry contents wholesale.
    ///
    /// Every call is a destructive replace, not a merge; population is
    /// expected to happen once, at startup. Keys are taken from each
    /// builder's tag.
    pub fn set_builders(&self, builders: impl IntoIterator<Item = WebComponentBuilder>) {
        let map: HashMap<String, Arc<WebComponentBuilder>> = builders
            .into_iter()
            .map(|builder| (builder.tag().to_owned(), Arc::new(builder)))
            .collect();
        debug!(count = map.len(), "replacing web component registry contents");
        let mut guard = self
            .builders
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(map);
    }

    /// Returns the currently registered tags, in unspecified order.
    #[must_use]
    pub fn tags(&self) -> Vec<String> {
        self.snapshot().keys().cloned().collect()
    }

    /// Returns the number of registered builders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    /// Whether the registry currently holds no builders.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    fn snapshot(&self) -> Arc<HashMap<String, Arc<WebComponentBuilder>>> {
        Arc::clone(
            &self
                .builders
                .read()
                .unwrap_or_else(PoisonError::into_inner),
        )
    }
}
