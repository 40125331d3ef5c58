//! C4-PlantUML - renders C4 architecture views as PlantUML diagram source.
//!
//! Loads a workspace (a C4 model plus the views defined on it) and turns each
//! view into a self-contained `@startuml` … `@enduml` document built on the
//! C4-PlantUML macro library.

pub mod config;
pub mod text;

mod boundary;
mod deployment;
mod document;
mod element;
mod error;
mod output;
mod relationship;

pub use c4_model::{
    Direction, Element, ElementId, ElementKind, Enterprise, Location, Model, Relationship,
    RelationshipView, View, ViewKind, Workspace,
};

pub use element::RenderContext;
pub use error::{C4Error, WorkspaceError};

use log::{debug, info, trace};

use config::AppConfig;
use document::DocumentAssembler;

/// One rendered view of a workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedView {
    key: String,
    source: String,
}

impl RenderedView {
    pub fn new(key: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            source: source.into(),
        }
    }

    /// Key of the view the document was rendered from.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The complete PlantUML document.
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// Loads workspaces and renders their views to C4-PlantUML text.
///
/// # Examples
///
/// ```rust
/// use c4_plantuml::{DiagramWriter, config::AppConfig};
///
/// let source = r#"
///     [[model.elements]]
///     id = "bank"
///     kind = "software_system"
///     name = "Internet Banking"
///
///     [[views]]
///     key = "context"
///     kind = "system_context"
///     elements = ["bank"]
/// "#;
///
/// let writer = DiagramWriter::new(AppConfig::default());
/// let workspace = writer.parse(source).expect("Failed to parse");
///
/// let text = writer
///     .render_view(&workspace, "context")
///     .expect("Failed to render");
/// assert!(text.starts_with("@startuml\n"));
/// assert!(text.contains("System(InternetBanking, \"Internet Banking\")"));
///
/// // Or use default config
/// let writer = DiagramWriter::default();
/// ```
#[derive(Debug, Default)]
pub struct DiagramWriter {
    config: AppConfig,
}

impl DiagramWriter {
    /// Create a new diagram writer with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Layout directives and library location written into every document
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a TOML workspace description.
    ///
    /// # Errors
    ///
    /// Returns [`C4Error::Workspace`] carrying the source text and the span of
    /// the offending input when the description is malformed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use c4_plantuml::DiagramWriter;
    ///
    /// let workspace = DiagramWriter::default()
    ///     .parse("name = \"Empty\"")
    ///     .expect("Failed to parse workspace");
    /// assert_eq!(workspace.name(), "Empty");
    /// assert!(workspace.views().is_empty());
    /// ```
    pub fn parse(&self, source: &str) -> Result<Workspace, C4Error> {
        info!("Parsing workspace");

        let workspace: Workspace = toml::from_str(source)
            .map_err(|err| C4Error::new_workspace_error(err.into(), source))?;

        debug!(
            name = workspace.name(),
            elements = workspace.model().elements().count(),
            views = workspace.views().len();
            "Workspace parsed successfully"
        );
        trace!(workspace:?; "Parsed workspace");

        Ok(workspace)
    }

    /// Render one view of `model` to a complete C4-PlantUML document.
    ///
    /// # Errors
    ///
    /// Returns [`C4Error::InvalidConfiguration`] when the configuration is
    /// unusable and [`C4Error::UnsupportedElementKind`] when an element cannot
    /// be drawn where the view places it. No partial document is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use c4_plantuml::{DiagramWriter, Element, Model, View};
    ///
    /// let mut model = Model::new();
    /// model.add_element(Element::person("user", "User"));
    ///
    /// let mut view = View::system_landscape("landscape");
    /// view.add_element("user");
    ///
    /// let text = DiagramWriter::default()
    ///     .render(&model, &view)
    ///     .expect("Failed to render");
    /// assert!(text.contains("Person(User, \"User\")"));
    /// assert!(text.ends_with("@enduml\n"));
    /// ```
    pub fn render(&self, model: &Model, view: &View) -> Result<String, C4Error> {
        self.config.validate()?;

        info!(view_key = view.key(), view_kind:% = view.kind(); "Rendering view");
        let text = DocumentAssembler::new(&self.config).render(model, view)?;
        debug!(view_key = view.key(), bytes = text.len(); "View rendered successfully");

        Ok(text)
    }

    /// Render the view of `workspace` with the given key.
    ///
    /// # Errors
    ///
    /// Returns [`C4Error::ViewNotFound`] when the workspace has no such view,
    /// otherwise the errors of [`DiagramWriter::render`].
    pub fn render_view(&self, workspace: &Workspace, key: &str) -> Result<String, C4Error> {
        let view = workspace
            .view(key)
            .ok_or_else(|| C4Error::ViewNotFound(key.to_string()))?;
        self.render(workspace.model(), view)
    }

    /// Render every view of `workspace`, in definition order.
    ///
    /// # Errors
    ///
    /// Stops at the first view that fails to render.
    pub fn render_workspace(&self, workspace: &Workspace) -> Result<Vec<RenderedView>, C4Error> {
        info!(views = workspace.views().len(); "Rendering workspace");
        workspace
            .views()
            .iter()
            .map(|view| {
                let source = self.render(workspace.model(), view)?;
                Ok(RenderedView::new(view.key(), source))
            })
            .collect()
    }
}
