//! Startup-time registry population.
//!
//! The hosting application discovers its exporters (how is its business:
//! an explicit list, a plugin mechanism, generated code) and hands them
//! here as [`ExporterDescriptor`]s once, during deployment. Population is
//! all-or-nothing: any failure leaves the registry exactly as it was.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::error::ExportError;
use crate::naming;
use crate::webcomponent::{ConstructedExporter, ExporterDescriptor, WebComponentRegistry};

/// Populates `registry` from the discovered set of exporters.
///
/// Runs the full startup pipeline in order: construct one exporter per
/// descriptor, validate that tags are distinct, validate that every tag is
/// a well-formed custom element name, compile one builder per exporter and
/// finally replace the registry contents wholesale. An empty descriptor set
/// is not an error; it yields a successfully populated, empty registry.
///
/// The validation order is deliberate: a malformed or colliding tag is
/// reported before any builder is assembled, so the most specific error
/// wins.
///
/// # Errors
///
/// Returns the first [`ExportError`] encountered; the registry is left
/// untouched in that case. Errors are not retried; a malformed exporter
/// needs a code fix and a redeploy.
pub fn initialize_registry(
    registry: &WebComponentRegistry,
    exporters: impl IntoIterator<Item = ExporterDescriptor>,
) -> Result<(), ExportError> {
    let descriptors: Vec<ExporterDescriptor> = exporters.into_iter().collect();
    if descriptors.is_empty() {
        debug!("no web component exporters discovered");
        registry.set_builders([]);
        return Ok(());
    }

    let mut constructed = Vec::with_capacity(descriptors.len());
    for descriptor in &descriptors {
        let exporter = descriptor
            .construct()
            .map_err(|source| ExportError::Construction {
                exporter: descriptor.type_name(),
                source,
            })?;
        constructed.push(exporter);
    }

    validate_distinct(&constructed)?;
    validate_tag_names(&constructed)?;

    let mut builders = Vec::with_capacity(constructed.len());
    for exporter in constructed {
        debug!(
            tag = exporter.tag(),
            exporter = exporter.type_name(),
            "building web component"
        );
        builders.push(exporter.into_builder()?);
    }

    info!(count = builders.len(), "web component registry populated");
    registry.set_builders(builders);
    Ok(())
}

/// Checks that no two exporters share a tag. Tag equality is exact string
/// equality; the first collision in registration order is reported.
fn validate_distinct(exporters: &[ConstructedExporter]) -> Result<(), ExportError> {
    let mut seen: HashMap<&str, &'static str> = HashMap::with_capacity(exporters.len());
    for exporter in exporters {
        if let Some(&first) = seen.get(exporter.tag()) {
            return Err(ExportError::DuplicateTag {
                first,
                second: exporter.type_name(),
                tag: exporter.tag().to_owned(),
            });
        }
        seen.insert(exporter.tag(), exporter.type_name());
    }
    Ok(())
}

/// Checks that every declared tag is a valid custom element name.
fn validate_tag_names(exporters: &[ConstructedExporter]) -> Result<(), ExportError> {
    for exporter in exporters {
        if !naming::is_valid_custom_element_name(exporter.tag()) {
            return Err(ExportError::InvalidCustomElementName {
                exporter: exporter.type_name(),
                tag: exporter.tag().to_owned(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use estuary_core::{Component, DefaultInstantiator};

    use crate::error::DefinitionError;
    use crate::webcomponent::{WebComponentDefinition, WebComponentExporter};

    use super::*;

    /// The component behind the `client-select` example element.
    #[derive(Default)]
    struct ClientSelect {
        message_calls: Vec<bool>,
    }

    impl ClientSelect {
        fn set_message_visible(&mut self, visible: bool) {
            self.message_calls.push(visible);
        }
    }

    impl Component for ClientSelect {}

    #[derive(Default)]
    struct ClientSelectExporter;

    impl WebComponentExporter for ClientSelectExporter {
        type Component = ClientSelect;

        fn tag(&self) -> String {
            "client-select".into()
        }

        fn define(
            &mut self,
            definition: &mut WebComponentDefinition<ClientSelect>,
        ) -> Result<(), DefinitionError> {
            definition
                .add_property("show", false)?
                .on_change(ClientSelect::set_message_visible)?;
            Ok(())
        }
    }

    #[derive(Default)]
    struct Blank;

    impl Component for Blank {}

    struct FixedTagExporter(&'static str);

    impl WebComponentExporter for FixedTagExporter {
        type Component = Blank;

        fn tag(&self) -> String {
            self.0.into()
        }

        fn define(
            &mut self,
            _definition: &mut WebComponentDefinition<Blank>,
        ) -> Result<(), DefinitionError> {
            Ok(())
        }
    }

    struct OtherFixedTagExporter(&'static str);

    impl WebComponentExporter for OtherFixedTagExporter {
        type Component = Blank;

        fn tag(&self) -> String {
            self.0.into()
        }

        fn define(
            &mut self,
            _definition: &mut WebComponentDefinition<Blank>,
        ) -> Result<(), DefinitionError> {
            Ok(())
        }
    }

    fn fixed(tag: &'static str) -> ExporterDescriptor {
        ExporterDescriptor::with(move || Ok(FixedTagExporter(tag)))
    }

    fn other(tag: &'static str) -> ExporterDescriptor {
        ExporterDescriptor::with(move || Ok(OtherFixedTagExporter(tag)))
    }

    #[test]
    fn empty_input_populates_an_empty_registry() {
        let registry = WebComponentRegistry::new();
        initialize_registry(&registry, []).unwrap();
        assert!(registry.is_empty());
        assert!(registry.get("any-tag").is_none());
    }

    #[test]
    fn well_formed_exporters_become_resolvable_builders() {
        let registry = WebComponentRegistry::new();
        initialize_registry(
            &registry,
            [fixed("first-tag"), fixed("second-tag"), other("third-tag")],
        )
        .unwrap();
        assert_eq!(registry.len(), 3);
        for tag in ["first-tag", "second-tag", "third-tag"] {
            let builder = registry.get(tag).expect(tag);
            assert_eq!(builder.tag(), tag);
        }
    }

    #[test]
    fn duplicate_tags_abort_and_name_both_exporters() {
        let registry = WebComponentRegistry::new();
        let err = initialize_registry(
            &registry,
            [fixed("shared-tag"), other("shared-tag")],
        )
        .unwrap_err();
        match err {
            ExportError::DuplicateTag { first, second, tag } => {
                assert!(first.contains("FixedTagExporter"));
                assert!(second.contains("OtherFixedTagExporter"));
                assert_eq!(tag, "shared-tag");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(registry.is_empty());
    }

    #[test]
    fn malformed_tags_abort_population() {
        for tag in ["Foo", "foo", "foo-Bar", "button"] {
            let registry = WebComponentRegistry::new();
            let err =
                initialize_registry(&registry, [fixed("good-tag"), other(tag)]).unwrap_err();
            match err {
                ExportError::InvalidCustomElementName { exporter, tag: bad } => {
                    assert!(exporter.contains("OtherFixedTagExporter"));
                    assert_eq!(bad, tag);
                }
                other => panic!("unexpected error: {other}"),
            }
            assert!(registry.is_empty());
        }
    }

    #[test]
    fn construction_failure_aborts_population() {
        let registry = WebComponentRegistry::new();
        let failing = ExporterDescriptor::with(|| {
            Err::<FixedTagExporter, _>("constructor exploded".into())
        });
        let err = initialize_registry(&registry, [fixed("good-tag"), failing]).unwrap_err();
        match err {
            ExportError::Construction { exporter, source } => {
                assert!(exporter.contains("FixedTagExporter"));
                assert_eq!(source.to_string(), "constructor exploded");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(registry.is_empty());
    }

    #[test]
    fn failed_population_leaves_previous_contents_intact() {
        let registry = WebComponentRegistry::new();
        initialize_registry(&registry, [fixed("good-tag")]).unwrap();
        initialize_registry(&registry, [fixed("good-tag"), other("bad tag")]).unwrap_err();
        assert_eq!(registry.tags(), ["good-tag"]);
    }

    #[test]
    fn client_select_end_to_end() {
        let registry = WebComponentRegistry::new();
        initialize_registry(&registry, [ExporterDescriptor::new::<ClientSelectExporter>()])
            .unwrap();

        let builder = registry.get("client-select").expect("tag is registered");
        let binding = builder.create_binding(&DefaultInstantiator).unwrap();
        let select = binding.instance::<ClientSelect>().unwrap();
        // The declared default was pushed through the change handler during
        // the initial property population.
        assert_eq!(select.message_calls, [false]);
    }

    #[test]
    fn bindings_are_independent_per_element() {
        let registry = WebComponentRegistry::new();
        initialize_registry(&registry, [ExporterDescriptor::new::<ClientSelectExporter>()])
            .unwrap();
        let builder = registry.get("client-select").unwrap();

        let mut first = builder.create_binding(&DefaultInstantiator).unwrap();
        let second = builder.create_binding(&DefaultInstantiator).unwrap();

        first
            .update_property("show", estuary_core::PropertyValue::Boolean(true))
            .unwrap();

        assert_eq!(
            first.instance::<ClientSelect>().unwrap().message_calls,
            [false, true]
        );
        assert_eq!(
            second.instance::<ClientSelect>().unwrap().message_calls,
            [false]
        );
    }
}
