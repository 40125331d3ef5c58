//! Views select which part of a model a single diagram shows.
//!
//! A [`View`] holds references (identities) into a [`Model`](crate::Model);
//! it never owns elements or relationships itself.

use std::fmt;

use serde::Deserialize;

use crate::{
    element::{ElementId, ElementKind},
    model::Model,
    relationship::RelationshipId,
};

/// The diagram kinds a view can describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    SystemLandscape,
    SystemContext,
    Container,
    Component,
    Dynamic,
    Deployment,
}

impl ViewKind {
    /// Returns the view type name, e.g. `"SystemContextView"`.
    pub fn type_name(&self) -> &'static str {
        match self {
            ViewKind::SystemLandscape => "SystemLandscapeView",
            ViewKind::SystemContext => "SystemContextView",
            ViewKind::Container => "ContainerView",
            ViewKind::Component => "ComponentView",
            ViewKind::Dynamic => "DynamicView",
            ViewKind::Deployment => "DeploymentView",
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// A relationship as it appears in one particular view.
///
/// Dynamic views number their relationships and may describe the same
/// relationship differently at each step.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RelationshipView {
    relationship: RelationshipId,
    #[serde(default)]
    order: Option<u32>,
    #[serde(default)]
    description: Option<String>,
}

impl RelationshipView {
    pub fn new(relationship: impl Into<RelationshipId>) -> Self {
        Self {
            relationship: relationship.into(),
            order: None,
            description: None,
        }
    }

    pub fn with_order(mut self, order: u32) -> Self {
        self.order = Some(order);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn relationship(&self) -> &RelationshipId {
        &self.relationship
    }

    pub fn order(&self) -> Option<u32> {
        self.order
    }

    /// Per-view description that overrides the relationship's own one.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// A named selection of elements and relationships rendered as one diagram.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "ViewSource")]
pub struct View {
    key: String,
    kind: ViewKind,
    title: Option<String>,
    description: String,
    /// The software system of a container view, the container of a
    /// component view, or the focal element of a dynamic view.
    scope: Option<ElementId>,
    enterprise_boundary_visible: Option<bool>,
    elements: Vec<ElementId>,
    relationships: Vec<RelationshipView>,
}

/// Serialized shape of a [`View`].
#[derive(Deserialize)]
struct ViewSource {
    key: String,
    kind: ViewKind,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    scope: Option<ElementId>,
    #[serde(default)]
    enterprise_boundary_visible: Option<bool>,
    #[serde(default)]
    elements: Vec<ElementId>,
    #[serde(default)]
    relationships: Vec<RelationshipView>,
}

impl From<ViewSource> for View {
    fn from(source: ViewSource) -> Self {
        let mut view = match (source.kind, source.scope) {
            (ViewKind::SystemContext, Some(system)) => View::system_context(source.key, system),
            (kind, scope) => {
                let mut view = View::new(source.key, kind);
                view.scope = scope;
                view
            }
        };
        view.title = source.title;
        view.description = source.description;
        view.enterprise_boundary_visible = source.enterprise_boundary_visible;
        for id in source.elements {
            view.add_element(id);
        }
        for relationship in source.relationships {
            view.add_relationship(relationship);
        }
        view
    }
}

impl View {
    /// Creates an empty view of the given kind.
    pub fn new(key: impl Into<String>, kind: ViewKind) -> Self {
        Self {
            key: key.into(),
            kind,
            title: None,
            description: String::new(),
            scope: None,
            enterprise_boundary_visible: None,
            elements: Vec::new(),
            relationships: Vec::new(),
        }
    }

    /// Creates a landscape view covering the whole enterprise.
    pub fn system_landscape(key: impl Into<String>) -> Self {
        Self::new(key, ViewKind::SystemLandscape)
    }

    /// Creates a context view around `system`, which is added to the view.
    pub fn system_context(key: impl Into<String>, system: impl Into<ElementId>) -> Self {
        let system = system.into();
        let mut view = Self::new(key, ViewKind::SystemContext).with_scope(system.clone());
        view.add_element(system);
        view
    }

    /// Creates a container view for the software system `system`.
    pub fn container(key: impl Into<String>, system: impl Into<ElementId>) -> Self {
        Self::new(key, ViewKind::Container).with_scope(system)
    }

    /// Creates a component view for the container `container`.
    pub fn component(key: impl Into<String>, container: impl Into<ElementId>) -> Self {
        Self::new(key, ViewKind::Component).with_scope(container)
    }

    /// Creates a dynamic view, optionally focused on one element.
    pub fn dynamic(key: impl Into<String>, scope: Option<ElementId>) -> Self {
        let mut view = Self::new(key, ViewKind::Dynamic);
        view.scope = scope;
        view
    }

    /// Creates a deployment view.
    pub fn deployment(key: impl Into<String>) -> Self {
        Self::new(key, ViewKind::Deployment)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_scope(mut self, scope: impl Into<ElementId>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    pub fn with_enterprise_boundary_visible(mut self, visible: bool) -> Self {
        self.enterprise_boundary_visible = Some(visible);
        self
    }

    /// Adds an element reference; adding the same element twice has no effect.
    pub fn add_element(&mut self, id: impl Into<ElementId>) {
        let id = id.into();
        if !self.elements.contains(&id) {
            self.elements.push(id);
        }
    }

    /// Adds a relationship reference; a relationship already in the view is replaced.
    pub fn add_relationship(&mut self, relationship: RelationshipView) {
        match self
            .relationships
            .iter_mut()
            .find(|rv| rv.relationship == relationship.relationship)
        {
            Some(existing) => *existing = relationship,
            None => self.relationships.push(relationship),
        }
    }

    /// Adds every person and software system of `model`.
    pub fn add_all_people_and_software_systems(&mut self, model: &Model) {
        for element in model.elements() {
            if matches!(
                element.kind(),
                ElementKind::Person { .. } | ElementKind::SoftwareSystem { .. }
            ) {
                self.add_element(element.id().clone());
            }
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn kind(&self) -> ViewKind {
        self.kind
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn scope(&self) -> Option<&ElementId> {
        self.scope.as_ref()
    }

    /// Whether the enterprise frame is drawn; defaults to `true`.
    pub fn enterprise_boundary_visible(&self) -> bool {
        self.enterprise_boundary_visible.unwrap_or(true)
    }

    pub fn elements(&self) -> &[ElementId] {
        &self.elements
    }

    pub fn relationships(&self) -> &[RelationshipView] {
        &self.relationships
    }
}
