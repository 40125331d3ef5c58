//! Document assembly.
//!
//! Writes one complete `@startuml` … `@enduml` document per view:
//!
//! ```text
//! @startuml
//! <library include>
//!
//! ' <view type>: <view key>
//! title <title>
//!
//! [layout directives]
//!
//! <elements and frames>
//! <relationships>
//! @enduml
//! ```

use log::debug;

use c4_model::{Hierarchy, Model, View, ViewKind};

use crate::{
    C4Error,
    boundary::{self, Classification, Frame, Partition},
    config::AppConfig,
    deployment::DeploymentWalker,
    element::{self, BOUNDARY_CLOSE, ElementRenderer},
    output::Output,
    relationship::{RelationshipOrdering, RelationshipRenderer},
};

/// Definitions the PlantUML standard library lacks for deployment diagrams.
pub const DEPLOYMENT_FALLBACK: &str = include_str!("templates/deployment_fallback.puml");

const STANDARD_CONTEXT: &str = "!include <C4/C4_Context>";
const STANDARD_CONTAINER: &str = "!include <C4/C4_Container>";
const STANDARD_COMPONENT: &str = "!include <C4/C4_Component>";

/// Assembles full diagram documents under one configuration.
#[derive(Debug, Clone, Copy)]
pub struct DocumentAssembler<'c> {
    config: &'c AppConfig,
}

impl<'c> DocumentAssembler<'c> {
    pub fn new(config: &'c AppConfig) -> Self {
        Self { config }
    }

    /// Renders `view` of `model` into a complete document.
    ///
    /// # Errors
    ///
    /// Returns [`C4Error::UnsupportedElementKind`] when an element cannot be
    /// drawn in the place the view puts it. Nothing is returned for the view
    /// in that case.
    pub fn render(&self, model: &Model, view: &View) -> Result<String, C4Error> {
        let hierarchy = Hierarchy::new(model);
        let elements = ElementRenderer::new(model);
        let mut output = Output::new();

        self.prolog(view, &mut output);

        match boundary::classify(model, view, &hierarchy) {
            Classification::Partitioned(partition) => {
                write_partition(&partition, elements, &mut output)?;
            }
            Classification::Deployment { roots } => {
                debug!(roots = roots.len(); "Walking deployment trees");
                DeploymentWalker::new(&hierarchy, elements).walk(&roots, &mut output)?;
            }
        }

        let ordering = match view.kind() {
            ViewKind::Dynamic => RelationshipOrdering::Dynamic,
            _ => RelationshipOrdering::Static,
        };
        RelationshipRenderer::new(model).render_all(view.relationships(), ordering, &mut output);

        epilog(&mut output);
        Ok(output.into_string())
    }

    fn prolog(&self, view: &View, output: &mut Output) {
        output.line(0, "@startuml");
        self.include(view.kind(), output);
        output.blank();

        output.line(0, &format!("' {}: {}", view.kind().type_name(), view.key()));
        output.line(0, &format!("title {}", title(view)));
        output.blank();

        let layout = self.config.layout();
        let mut directives = Vec::new();
        if layout.legend() {
            directives.push("LAYOUT_WITH_LEGEND()");
        }
        if layout.sketch() {
            directives.push("LAYOUT_AS_SKETCH()");
        }
        if let Some(directive) = layout.direction().directive() {
            directives.push(directive);
        }
        if !directives.is_empty() {
            for directive in directives {
                output.line(0, directive);
            }
            output.blank();
        }
    }

    fn include(&self, kind: ViewKind, output: &mut Output) {
        if let Some(base) = self.config.library().custom_base_url() {
            let file = match kind {
                ViewKind::SystemLandscape | ViewKind::SystemContext => "C4_Context.puml",
                ViewKind::Container => "C4_Container.puml",
                ViewKind::Component => "C4_Component.puml",
                ViewKind::Dynamic => "C4_Dynamic.puml",
                ViewKind::Deployment => "C4_Deployment.puml",
            };
            output.line(0, &format!("!includeurl {base}{file}"));
            return;
        }

        match kind {
            ViewKind::SystemLandscape | ViewKind::SystemContext => {
                output.line(0, STANDARD_CONTEXT);
            }
            ViewKind::Container => output.line(0, STANDARD_CONTAINER),
            // The standard library has no dynamic macros; component ones cover them.
            ViewKind::Component | ViewKind::Dynamic => output.line(0, STANDARD_COMPONENT),
            ViewKind::Deployment => {
                output.line(0, STANDARD_CONTAINER);
                output.raw(DEPLOYMENT_FALLBACK);
            }
        }
    }
}

/// Title of a view: its explicit title, else its description, else its key.
pub fn title(view: &View) -> String {
    let title = view
        .title()
        .filter(|title| !title.trim().is_empty())
        .or_else(|| Some(view.description()).filter(|d| !d.trim().is_empty()))
        .unwrap_or(view.key());
    title.lines().map(str::trim).collect::<Vec<_>>().join(" ")
}

fn write_partition(
    partition: &Partition<'_>,
    elements: ElementRenderer<'_>,
    output: &mut Output,
) -> Result<(), C4Error> {
    for element in &partition.outer {
        output.line(0, &elements.leaf(element)?);
    }

    let depth = match partition.primary {
        Some(frame) => {
            output.line(0, &open_frame(frame, elements)?);
            1
        }
        None => 0,
    };
    for element in &partition.inner {
        output.line(depth, &elements.leaf(element)?);
    }
    if partition.primary.is_some() {
        output.line(0, BOUNDARY_CLOSE);
    }

    for group in &partition.extra {
        output.line(0, &open_frame(group.frame, elements)?);
        for member in &group.members {
            output.line(1, &elements.leaf(member)?);
        }
        output.line(0, BOUNDARY_CLOSE);
    }
    Ok(())
}

fn open_frame(frame: Frame<'_>, elements: ElementRenderer<'_>) -> Result<String, C4Error> {
    match frame {
        Frame::Enterprise(name) => Ok(element::enterprise_boundary(name)),
        Frame::Element(element) => elements.boundary(element),
    }
}

fn epilog(output: &mut Output) {
    output.line(0, "@enduml");
}

#[cfg(test)]
mod tests {
    use c4_model::{Element, ElementId};

    use super::*;
    use crate::config::{LayoutConfig, LayoutDirection, LibraryConfig};

    fn render(config: &AppConfig, model: &Model, view: &View) -> String {
        DocumentAssembler::new(config)
            .render(model, view)
            .expect("Failed to render view")
    }

    #[test]
    fn test_title_fallbacks() {
        let view = View::system_landscape("landscape");
        assert_eq!(title(&view), "landscape");

        let view = view.with_description("All systems\nof the bank");
        assert_eq!(title(&view), "All systems of the bank");

        let view = view.with_title("Landscape");
        assert_eq!(title(&view), "Landscape");
    }

    #[test]
    fn test_minimal_context_document() {
        let mut model = Model::new();
        model.add_element(Element::software_system("bank", "Bank"));
        let view = View::system_context("Context", "bank");

        let text = render(&AppConfig::default(), &model, &view);
        assert_eq!(
            text,
            concat!(
                "@startuml\n",
                "!include <C4/C4_Context>\n",
                "\n",
                "' SystemContextView: Context\n",
                "title Context\n",
                "\n",
                "LAYOUT_WITH_LEGEND()\n",
                "\n",
                "System(Bank, \"Bank\")\n",
                "@enduml\n",
            )
        );
    }

    #[test]
    fn test_all_layout_directives() {
        let model = Model::new();
        let view = View::container("containers", "bank");
        let config = AppConfig::new(
            LayoutConfig::new(true, true, LayoutDirection::LeftRight),
            LibraryConfig::default(),
        );

        let text = render(&config, &model, &view);
        assert!(text.contains(
            "LAYOUT_WITH_LEGEND()\nLAYOUT_AS_SKETCH()\nLAYOUT_LEFT_RIGHT\n\n"
        ));
    }

    #[test]
    fn test_no_layout_directives_no_blank_line() {
        let model = Model::new();
        let view = View::container("containers", "bank");
        let config = AppConfig::new(
            LayoutConfig::new(false, false, LayoutDirection::None),
            LibraryConfig::default(),
        );

        let text = render(&config, &model, &view);
        assert_eq!(
            text,
            "@startuml\n!include <C4/C4_Container>\n\n' ContainerView: containers\ntitle containers\n\n@enduml\n"
        );
    }

    #[test]
    fn test_standard_includes_per_view_kind() {
        let model = Model::new();
        let config = AppConfig::default();
        let cases = [
            (View::system_landscape("v"), "!include <C4/C4_Context>"),
            (View::container("v", "s"), "!include <C4/C4_Container>"),
            (View::component("v", "c"), "!include <C4/C4_Component>"),
            (View::dynamic("v", None), "!include <C4/C4_Component>"),
            (View::deployment("v"), "!include <C4/C4_Container>"),
        ];

        for (view, include) in cases {
            let text = render(&config, &model, &view);
            assert_eq!(text.lines().nth(1), Some(include), "view {:?}", view.kind());
        }
    }

    #[test]
    fn test_custom_base_includes() {
        let model = Model::new();
        let config = AppConfig::new(
            LayoutConfig::default(),
            LibraryConfig::new("https://example.com/c4/"),
        );
        let cases = [
            (View::system_context("v", "s"), "C4_Context.puml"),
            (View::container("v", "s"), "C4_Container.puml"),
            (View::component("v", "c"), "C4_Component.puml"),
            (View::dynamic("v", None), "C4_Dynamic.puml"),
            (View::deployment("v"), "C4_Deployment.puml"),
        ];

        for (view, file) in cases {
            let text = render(&config, &model, &view);
            assert_eq!(
                text.lines().nth(1),
                Some(format!("!includeurl https://example.com/c4/{file}").as_str())
            );
            assert!(!text.contains("C4_Deployment.puml is missing"));
        }
    }

    #[test]
    fn test_deployment_fallback_golden() {
        let golden = include_str!("../tests/fixtures/empty_deployment_view.puml");
        let block = golden
            .strip_prefix("@startuml\n!include <C4/C4_Container>\n")
            .and_then(|rest| rest.split("\n' DeploymentView:").next())
            .expect("golden should hold the fallback block");

        assert_eq!(DEPLOYMENT_FALLBACK, block);
        assert!(!DEPLOYMENT_FALLBACK.contains('\r'));
    }

    #[test]
    fn test_deployment_fallback_inlined_after_include() {
        let model = Model::new();
        let view = View::deployment("deployment");

        let text = render(&AppConfig::default(), &model, &view);
        let expected_prefix = format!(
            "@startuml\n!include <C4/C4_Container>\n{DEPLOYMENT_FALLBACK}\n' DeploymentView: deployment\n"
        );
        assert!(text.starts_with(&expected_prefix));
    }

    #[test]
    fn test_frames_and_extra_groups() {
        let mut model = Model::new();
        model.add_element(Element::software_system("bank", "Bank"));
        model.add_element(Element::container("api", "API", "bank"));
        model.add_element(Element::container("web", "Web", "bank"));
        model.add_element(Element::component("ctrl", "Controller", "api"));
        model.add_element(Element::component("page", "Page", "web"));
        model.add_element(Element::person("user", "User"));

        let mut view = View::component("components", "api");
        for id in ["page", "ctrl", "user"] {
            view.add_element(id);
        }
        let config = AppConfig::new(
            LayoutConfig::new(false, false, LayoutDirection::None),
            LibraryConfig::default(),
        );

        let text = render(&config, &model, &view);
        let body: Vec<_> = text.lines().skip(6).collect();
        assert_eq!(
            body,
            [
                "Person(User, \"User\")",
                "Container_Boundary(API, \"API\") {",
                "  Component(Controller, \"Controller\")",
                "}",
                "Container_Boundary(Web, \"Web\") {",
                "  Component(Page, \"Page\")",
                "}",
                "@enduml",
            ]
        );
    }

    #[test]
    fn test_dynamic_scope_that_cannot_be_framed() {
        let mut model = Model::new();
        model.add_element(Element::person("user", "User"));
        model.add_element(Element::person("admin", "Admin"));

        let mut view = View::dynamic("dynamic", Some(ElementId::new("user")));
        view.add_element("admin");

        let err = DocumentAssembler::new(&AppConfig::default())
            .render(&model, &view)
            .unwrap_err();
        assert!(matches!(
            err,
            C4Error::UnsupportedElementKind { kind: "Person", .. }
        ));
    }
}
